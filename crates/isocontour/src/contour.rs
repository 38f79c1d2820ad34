//! Contour extraction (C3): binarization, point interpolation, and the
//! marching-squares case table that builds oriented-edge adjacency.
//!
//! Why this design
//! - Binarization and point interpolation touch each cell independently and
//!   write into edge slots no other cell writes (spec.md §4.3b, §5), so
//!   both run as `rayon` parallel maps collected into flat `Vec`s.
//! - The case-table pass (adjacency) is *computed* in parallel per cell —
//!   the expensive part is looking up four corner bits and, for the two
//!   saddle cases, averaging four `f64`s — but the resulting `(from, to)`
//!   edge pairs are scattered into `next_edge`/`prev_edge` sequentially.
//!   Marching squares guarantees each edge slot is the scatter target of
//!   at most one cell (the orientation rule makes a shared active edge the
//!   "from" edge in exactly one of its two neighboring cells), so the
//!   scatter never double-writes a slot; it is kept single-threaded simply
//!   because it is already O(cells) and not worth the bookkeeping to prove
//!   disjointness to the borrow checker.
//!
//! References
//! - Case table & saddle rule: spec.md §4.3.
//! - Ported from `original_source/src/cglib/graph.py`
//!   (`compute_binary_grid`, `compute_points`, `compute_adajcency`).

use rayon::prelude::*;

use crate::edge_index::{cell_to_edges, cartesian, Shape};
use crate::geom::lerp_zero;
use crate::graph::{EdgeId, Graph, Point};

/// The input scalar field, `W` columns by `H` rows, row-major by column
/// (`data[x * H + y]` is the value at grid point `(x, y)`).
#[derive(Clone, Debug)]
pub struct Field {
    pub shape: Shape,
    data: Vec<f64>,
}

impl Field {
    /// Build a field from row-major-by-column data. Panics if `data.len() !=
    /// shape.w * shape.h` — this is a caller contract, not a recoverable
    /// error, matching the teacher's "functions accept only what they need"
    /// discipline for internal construction.
    pub fn new(shape: Shape, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), shape.w * shape.h, "field data size mismatch");
        Self { shape, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[x * self.shape.h + y]
    }
}

/// `binary[x, y] = 0` (false) for strictly negative values, `1` (true)
/// otherwise — zero and NaN are both treated as positive, matching
/// `f64::lt` returning `false` for NaN (spec.md §4.3a).
#[derive(Clone, Debug)]
struct BinaryGrid {
    shape: Shape,
    data: Vec<bool>,
}

impl BinaryGrid {
    #[inline]
    fn get(&self, x: usize, y: usize) -> bool {
        self.data[x * self.shape.h + y]
    }
}

fn binarize(field: &Field) -> BinaryGrid {
    let shape = field.shape;
    let data = (0..shape.w)
        .into_par_iter()
        .flat_map_iter(|x| (0..shape.h).map(move |y| !(field.get(x, y) < 0.0)).collect::<Vec<_>>())
        .collect();
    BinaryGrid { shape, data }
}

/// 4-bit marching-squares configuration of cell `(x, y)`:
/// `b(x,y)·1 + b(x,y+1)·2 + b(x+1,y+1)·4 + b(x+1,y)·8`.
fn cell_config(binary: &BinaryGrid, x: usize, y: usize) -> u8 {
    (binary.get(x, y) as u8)
        | ((binary.get(x, y + 1) as u8) << 1)
        | ((binary.get(x + 1, y + 1) as u8) << 2)
        | ((binary.get(x + 1, y) as u8) << 3)
}

fn corner_average(field: &Field, x: usize, y: usize) -> f64 {
    (field.get(x, y) + field.get(x, y + 1) + field.get(x + 1, y + 1) + field.get(x + 1, y)) / 4.0
}

fn interior_cells(shape: Shape) -> impl Iterator<Item = (usize, usize)> {
    (0..shape.w.saturating_sub(1)).flat_map(move |x| (0..shape.h.saturating_sub(1)).map(move |y| (x, y)))
}

/// Populate `points[edge]` for every interior cell's right and bottom
/// edges (spec.md §4.3b): each interior edge is owned by exactly one cell,
/// so this never writes the same slot twice.
fn compute_points(field: &Field, binary: &BinaryGrid) -> Vec<Option<Point>> {
    let shape = field.shape;
    let mut points = vec![None; shape.edge_count()];
    let writes: Vec<(EdgeId, Point)> = interior_cells(shape)
        .collect::<Vec<_>>()
        .into_par_iter()
        .flat_map_iter(|(x, y)| {
            let edges = cell_to_edges(shape, x, y);
            let mut out = Vec::with_capacity(2);
            if binary.get(x, y + 1) != binary.get(x + 1, y + 1) {
                let p0 = Point::new(cartesian(shape, x, y + 1).0, cartesian(shape, x, y + 1).1);
                let p1 = Point::new(
                    cartesian(shape, x + 1, y + 1).0,
                    cartesian(shape, x + 1, y + 1).1,
                );
                let p = lerp_zero(p0, field.get(x, y + 1), p1, field.get(x + 1, y + 1));
                out.push((edges.right, p));
            }
            if binary.get(x + 1, y + 1) != binary.get(x + 1, y) {
                let p0 = Point::new(
                    cartesian(shape, x + 1, y + 1).0,
                    cartesian(shape, x + 1, y + 1).1,
                );
                let p1 = Point::new(cartesian(shape, x + 1, y).0, cartesian(shape, x + 1, y).1);
                let p = lerp_zero(p0, field.get(x + 1, y + 1), p1, field.get(x + 1, y));
                out.push((edges.bottom, p));
            }
            out
        })
        .collect();
    for (edge, p) in writes {
        points[edge.index()] = Some(p);
    }
    points
}

/// Directed `(from, to)` pairs the case table assigns for one cell, or
/// `None` for cases 0/15 (no contour) — cases 5/10 yield two pairs.
fn case_assignments(field: &Field, binary: &BinaryGrid, x: usize, y: usize) -> Vec<(EdgeId, EdgeId)> {
    let edges = cell_to_edges(field.shape, x, y);
    let (top, right, bottom, left) = (edges.top, edges.right, edges.bottom, edges.left);
    let config = cell_config(binary, x, y);
    match config {
        0 | 15 => vec![],
        1 => vec![(top, left)],
        2 => vec![(right, top)],
        3 => vec![(right, left)],
        4 => vec![(bottom, right)],
        5 => {
            if corner_average(field, x, y) > 0.0 {
                vec![(top, right), (bottom, left)]
            } else {
                vec![(top, left), (bottom, right)]
            }
        }
        6 => vec![(bottom, top)],
        7 => vec![(bottom, left)],
        8 => vec![(left, bottom)],
        9 => vec![(top, bottom)],
        10 => {
            if corner_average(field, x, y) < 0.0 {
                vec![(left, top), (right, bottom)]
            } else {
                vec![(left, bottom), (right, top)]
            }
        }
        11 => vec![(right, bottom)],
        12 => vec![(left, right)],
        13 => vec![(top, right)],
        14 => vec![(left, top)],
        _ => unreachable!("4-bit configuration out of range"),
    }
}

fn build_adjacency(
    field: &Field,
    binary: &BinaryGrid,
) -> (Vec<Option<EdgeId>>, Vec<Option<EdgeId>>) {
    let shape = field.shape;
    let e = shape.edge_count();
    let mut next_edge = vec![None; e];
    let mut prev_edge = vec![None; e];
    let pairs: Vec<(EdgeId, EdgeId)> = interior_cells(shape)
        .collect::<Vec<_>>()
        .into_par_iter()
        .flat_map_iter(|(x, y)| case_assignments(field, binary, x, y))
        .collect();
    for (from, to) in pairs {
        next_edge[from.index()] = Some(to);
        prev_edge[to.index()] = Some(from);
    }
    (next_edge, prev_edge)
}

/// Run C3 in full: binarize, interpolate crossing points, and build
/// oriented-edge adjacency. `cycle_index`/`cycles` are left empty — cycle
/// discovery (C4, [`crate::cycle::discover`]) fills them in afterward.
pub fn extract(field: &Field) -> Graph {
    let binary = binarize(field);
    let points = compute_points(field, &binary);
    let (next_edge, prev_edge) = build_adjacency(field, &binary);
    let e = field.shape.edge_count();
    Graph {
        shape: field.shape,
        points,
        next_edge,
        prev_edge,
        cycle_index: vec![None; e],
        cycles: Vec::new(),
    }
}

/// Cell configuration, exposed for cycle discovery's seed-selection rule
/// (spec.md §4.4) without recomputing the binary grid twice.
pub(crate) fn configs(field: &Field) -> Vec<u8> {
    let binary = binarize(field);
    let shape = field.shape;
    let mut configs = vec![0u8; shape.w.saturating_sub(1).max(1) * shape.h.saturating_sub(1).max(1)];
    if shape.w < 2 || shape.h < 2 {
        return Vec::new();
    }
    for (x, y) in interior_cells(shape) {
        configs[x * (shape.h - 1) + y] = cell_config(&binary, x, y);
    }
    configs
}
