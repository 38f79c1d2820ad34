//! Fatal error kinds surfaced by the core algorithm (spec.md §7).
//!
//! None of these are retried or recovered from: every kind signals a
//! structural invariant violation in the graph. `InputNotFound` has no
//! variant here — it is driver-level (spec.md §7) and lives as an
//! `anyhow` error in `crates/cli`.

use crate::graph::EdgeId;

/// Fatal errors from the contour/stitch core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A splice candidate search returned an edge sharing the target
    /// cycle's id — an invariant violation, since candidates are filtered
    /// by cycle membership before being compared.
    #[error("invalid geometry: candidate edge {candidate:?} shares cycle {cycle} with target edge {target:?}")]
    InvalidGeometry {
        target: EdgeId,
        candidate: EdgeId,
        cycle: usize,
    },

    /// More than one cycle remains alive but no cross-cycle candidate was
    /// found even after the full-scan fallback (spec.md §4.6, §7).
    #[error("no cross-cycle splice candidate found for cycle {cycle} with {alive} cycles still alive")]
    NoCandidate { cycle: usize, alive: usize },

    /// `lerp_zero` was invoked on two endpoints with equal sign; the core
    /// must never generate such a call (spec.md §4.3b only visits edges
    /// with a sign change).
    #[error("domain error: lerp_zero called on edge {edge:?} with no sign change")]
    DomainError { edge: EdgeId },
}
