//! The shared mutable graph state threaded through C3-C7.
//!
//! Purpose
//! - Hold the flat parallel arrays described in spec.md §3 (`points`,
//!   `next_edge`, `prev_edge`, `cycle_index`) behind one struct so the
//!   stitching engine (C6) can mutate them in place without re-deriving
//!   addressing on every call.
//!
//! Why flat arrays
//! - Per spec.md §9: no pointer chasing, trivially relocatable/persistable,
//!   every "pointer" is an index or `None`.

use nalgebra::Vector2;

use crate::edge_index::Shape;

pub type Point = Vector2<f64>;

/// Index of one grid edge in the flat `[0, E)` addressing space of C1.
/// `Option<EdgeId>` stands in for the `-1` sentinel described in spec.md §9;
/// the `-1` convention itself is only materialized at the `.npz` boundary
/// in `crates/cli`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A cycle-catalog record (C5): a representative edge and the cycle's
/// length. `length == 0` marks a tombstone left behind by a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleRecord {
    pub start_edge: EdgeId,
    pub length: usize,
}

impl CycleRecord {
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.length == 0
    }
}

/// The full oriented-edge graph produced by extraction (C3/C4) and mutated
/// in place by stitching (C6). `points` is never mutated after extraction;
/// `next_edge`/`prev_edge`/`cycle_index`/`cycles` are mutated by stitching.
#[derive(Clone, Debug)]
pub struct Graph {
    pub shape: Shape,
    pub points: Vec<Option<Point>>,
    pub next_edge: Vec<Option<EdgeId>>,
    pub prev_edge: Vec<Option<EdgeId>>,
    pub cycle_index: Vec<Option<usize>>,
    pub cycles: Vec<CycleRecord>,
}

impl Graph {
    /// Number of edge slots, `E` from spec.md §3.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.points.len()
    }

    /// Count of non-tombstone cycle records currently alive.
    pub fn alive_cycle_count(&self) -> usize {
        self.cycles.iter().filter(|c| !c.is_tombstone()).count()
    }

    /// I1 (Pair): `prev_edge[next_edge[i]] == i` wherever `next_edge[i]` is set.
    #[cfg(test)]
    pub(crate) fn check_pair_invariant(&self) -> bool {
        self.next_edge.iter().enumerate().all(|(i, next)| match next {
            Some(n) => self.prev_edge[n.index()] == Some(EdgeId(i)),
            None => true,
        })
    }

    /// I3 (Labeling): `cycle_index[i].is_some() iff next_edge[i].is_some()`.
    #[cfg(test)]
    pub(crate) fn check_labeling_invariant(&self) -> bool {
        (0..self.edge_count())
            .all(|i| self.cycle_index[i].is_some() == self.next_edge[i].is_some())
    }

    /// I2 (Closure): each non-tombstone cycle's `length`-step walk from
    /// `start_edge` returns to itself, and every visited edge carries that
    /// cycle's id.
    #[cfg(test)]
    pub(crate) fn check_closure_invariant(&self) -> bool {
        self.cycles.iter().enumerate().all(|(k, rec)| {
            if rec.is_tombstone() {
                return true;
            }
            let mut cur = rec.start_edge;
            for step in 0..rec.length {
                if self.cycle_index[cur.index()] != Some(k) {
                    return false;
                }
                match self.next_edge[cur.index()] {
                    Some(n) => cur = n,
                    None => return false,
                }
                if step + 1 == rec.length && cur != rec.start_edge {
                    return false;
                }
            }
            true
        })
    }
}
