//! Isocontour extraction over a 2D scalar grid: marching squares plus a
//! stitching pass that merges every partial cycle the saddle-ambiguity
//! cases leave behind into full closed contours.
//!
//! Module map
//! - [`edge_index`] — C1, the flat bijective edge addressing scheme.
//! - [`graph`] — the shared `Graph` state threaded through extraction and
//!   stitching.
//! - [`geom`] — C2, interpolation and splice-cost kernels.
//! - [`contour`] — C3, binarization and adjacency construction.
//! - [`cycle`] — C4/C5, flood-fill cycle discovery and the cycle catalog.
//! - [`stitch`] — C6, the iterative merge loop.
//! - [`polyline`] — C7, read-only polyline emission.
//! - [`error`] — fatal error kinds from the core.
//! - [`testutil`] — synthetic field generators shared by tests and benches.

pub mod contour;
pub mod cycle;
pub mod edge_index;
pub mod error;
pub mod geom;
pub mod graph;
pub mod polyline;
pub mod stitch;
pub mod testutil;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for callers that just want to run the pipeline end to
/// end: extract, discover cycles, stitch, emit.
pub mod prelude {
    pub use crate::contour::{extract, Field};
    pub use crate::cycle::discover;
    pub use crate::edge_index::Shape;
    pub use crate::error::Error;
    pub use crate::graph::Graph;
    pub use crate::polyline::{emit, Polyline};
    pub use crate::stitch::{run as stitch, StitchCfg, StitchStrategy};
}
