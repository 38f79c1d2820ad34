//! Flat edge addressing (C1).
//!
//! Purpose
//! - Bijections between a cell's four sides, a flat edge id, and the
//!   orientation-aware 3D `(x, y, z)` index used by the stitcher's
//!   localized neighborhood search.
//!
//! Why this design
//! - One flat `usize` range addresses every edge regardless of
//!   orientation, so `points`/`next_edge`/`prev_edge`/`cycle_index` are
//!   plain `Vec`s with no per-orientation bookkeeping.
//! - All three maps are pure arithmetic; no allocation.
//!
//! References
//! - Formula: spec.md §6 ("Edge-index formula (canonical)").
//! - Ported from `original_source/src/cglib/index.py`
//!   (`index2d_to_edge_index`, `edge_1d_to_3d_index`, `edge_3d_to_1d_index`).

use crate::graph::EdgeId;

/// Dimensions of the sample grid, `w` columns by `h` rows of sample points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub w: usize,
    pub h: usize,
}

impl Shape {
    #[inline]
    pub fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    /// Total number of distinct edge slots, `E = H·(W+1) + W·(H+1) − 1`.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.h * (self.w + 1) + self.w * (self.h + 1) - 1
    }

    #[inline]
    fn horizontal_count(&self) -> usize {
        self.h * (self.w + 1)
    }
}

/// Four sides of a grid cell, in the order the marching-squares case table
/// (spec.md §4.3) expects: top, right, bottom, left.
#[derive(Clone, Copy, Debug)]
pub struct CellEdges {
    pub top: EdgeId,
    pub right: EdgeId,
    pub bottom: EdgeId,
    pub left: EdgeId,
}

/// Flat ids of cell `(x, y)`'s four sides. Caller ensures `x < W-1`, `y < H-1`
/// (interior cells only — the grid's last row/column never owns a cell).
pub fn cell_to_edges(shape: Shape, x: usize, y: usize) -> CellEdges {
    CellEdges {
        top: edge_3d_to_1d(shape, x as isize, y as isize, 0).expect("interior cell: top"),
        right: edge_3d_to_1d(shape, x as isize, (y + 1) as isize, 1)
            .expect("interior cell: right"),
        bottom: edge_3d_to_1d(shape, (x + 1) as isize, y as isize, 0)
            .expect("interior cell: bottom"),
        left: edge_3d_to_1d(shape, x as isize, y as isize, 1).expect("interior cell: left"),
    }
}

/// Inverse of [`edge_3d_to_1d`]: recover `(x, y, z)` from a flat edge id.
/// `z = 0` for horizontal edges, `z = 1` for vertical edges.
pub fn edge_1d_to_3d(shape: Shape, edge: EdgeId) -> (usize, usize, usize) {
    let i = edge.0;
    let h_count = shape.horizontal_count();
    if i < h_count {
        (i / shape.h, i % shape.h, 0)
    } else {
        let j = i - h_count;
        (j / (shape.h + 1), j % (shape.h + 1), 1)
    }
}

/// Forward map `(x, y, z) -> flat edge id`, bounds-checked. Returns `None`
/// for out-of-range inputs; this is the only C1 operation that can fail.
///
/// Note: `E = H·(W+1) + W·(H+1) − 1` is one slot short of the naive count
/// of `(x, y, z)` triples satisfying the per-orientation range checks below
/// (spec.md §3/§6 fix this `E`, inherited unchanged from
/// `original_source/src/cglib/index.py`). The single triple this excludes is
/// the bottom-right vertical edge `(W−1, H, 1)`, which never arises from an
/// interior cell (spec.md §4.3b) and is rejected here by the final
/// `id < E` check rather than hand-cased.
pub fn edge_3d_to_1d(shape: Shape, x: isize, y: isize, z: usize) -> Option<EdgeId> {
    let w = shape.w as isize;
    let h = shape.h as isize;
    let raw = match z {
        0 => {
            if x < 0 || x > w || y < 0 || y >= h {
                return None;
            }
            (x as usize) * shape.h + y as usize
        }
        1 => {
            if x < 0 || x >= w || y < 0 || y > h {
                return None;
            }
            let h_count = shape.horizontal_count();
            h_count + (x as usize) * (shape.h + 1) + y as usize
        }
        _ => return None,
    };
    if raw < shape.edge_count() {
        Some(EdgeId(raw))
    } else {
        None
    }
}

/// Isotropic cell-to-Cartesian map: the larger grid dimension normalizes to
/// `1`, the smaller to `< 1`. Do not change the `max(W, H)` denominator —
/// see spec.md §9 ("Isotropic coordinate scaling").
#[inline]
pub fn cartesian(shape: Shape, x: usize, y: usize) -> (f64, f64) {
    let scale = shape.w.max(shape.h) as f64;
    (x as f64 / scale, y as f64 / scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn horizontal_bottom_formula_matches_spec() {
        let shape = Shape::new(5, 7);
        let edges = cell_to_edges(shape, 2, 3);
        assert_eq!(edges.top.0, 2 * shape.h + 3);
        assert_eq!(edges.bottom.0, 3 * shape.h + 3);
        assert_eq!(
            edges.left.0,
            shape.h * (shape.w + 1) + 2 * (shape.h + 1) + 3
        );
        assert_eq!(edges.right.0, edges.left.0 + 1);
    }

    #[test]
    fn edge_count_matches_spec_formula() {
        let shape = Shape::new(4, 3);
        assert_eq!(
            shape.edge_count(),
            shape.h * (shape.w + 1) + shape.w * (shape.h + 1) - 1
        );
    }

    #[test]
    fn out_of_range_returns_none() {
        let shape = Shape::new(4, 4);
        assert!(edge_3d_to_1d(shape, -1, 0, 0).is_none());
        assert!(edge_3d_to_1d(shape, 5, 0, 0).is_none());
        assert!(edge_3d_to_1d(shape, 0, 4, 0).is_none());
        assert!(edge_3d_to_1d(shape, 4, 0, 1).is_none());
    }

    proptest! {
        // R1: edge_1d_to_3d(edge_3d_to_1d(x, y, z)) == (x, y, z) for in-range inputs.
        #[test]
        fn round_trip_3d_1d_3d(
            w in 1usize..40, h in 1usize..40,
            x_raw in 0usize..41, y_raw in 0usize..41, z in 0usize..2,
        ) {
            let shape = Shape::new(w, h);
            let x = x_raw as isize;
            let y = y_raw as isize;
            if let Some(id) = edge_3d_to_1d(shape, x, y, z) {
                prop_assert!(id.0 < shape.edge_count());
                prop_assert_eq!(edge_1d_to_3d(shape, id), (x_raw, y_raw, z));
            }
        }
    }
}
