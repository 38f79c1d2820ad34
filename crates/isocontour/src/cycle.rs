//! Cycle discovery (C4) and the cycle catalog (C5).
//!
//! Why this design
//! - Discovery is a single flood-fill pass over `next_edge`: every active
//!   edge belongs to exactly one directed cycle once C3 has run (I2), so a
//!   visited-check on `cycle_index` is enough to avoid re-walking a cycle
//!   from a second seed.
//! - The catalog itself is just `Graph::cycles` plus the tombstoning
//!   convention (`CycleRecord::is_tombstone`, spec.md §4.5): `merge` never
//!   compacts the vector mid-stitch, so cycle ids stay stable while
//!   [`crate::stitch`] is running.
//!
//! References
//! - Seed rule & flood walk: spec.md §4.4.
//! - Ported from `original_source/src/cglib/graph.py`
//!   (`browse_grid`, `is_in_a_cycle`, `flood`).

use crate::contour::{configs as cell_configs, Field};
use crate::edge_index::{cell_to_edges, Shape};
use crate::graph::{CycleRecord, EdgeId, Graph};

/// Which of a cell's four edges to start a flood walk from, keyed by the
/// cell's marching-squares case (spec.md §4.4's seed-selection rule). Cases
/// 0/15 never seed (no contour); the catalog-all-remaining branch covers
/// the two single-connector cases that the top/right buckets don't claim
/// (7, 8). Cases 5 and 10 (saddles) never seed — their two arcs are only
/// entered from a neighboring cell (spec.md §4.4).
fn seed_edge(shape: Shape, x: usize, y: usize, config: u8) -> Option<EdgeId> {
    if config == 0 || config == 15 || config == 5 || config == 10 {
        return None;
    }
    let edges = cell_to_edges(shape, x, y);
    let edge = match config {
        1 | 2 | 6 | 9 | 13 | 14 => edges.top,
        3 | 4 | 11 | 12 => edges.right,
        _ => edges.bottom,
    };
    Some(edge)
}

/// Walk `next_edge` from `start` back to itself, labeling every visited
/// edge with cycle id `k`. Returns the cycle's length.
fn flood(graph: &mut Graph, start: EdgeId, k: usize) -> usize {
    let mut cur = start;
    let mut length = 0usize;
    loop {
        graph.cycle_index[cur.index()] = Some(k);
        length += 1;
        cur = graph.next_edge[cur.index()].expect("flood walk hit an edge with no next_edge");
        if cur == start {
            break;
        }
    }
    length
}

/// Run C4 over every interior cell in row-major `(x, y)` order, seeding a
/// flood walk wherever a cell's seed edge has not already been labeled by
/// an earlier cell's walk. Populates `graph.cycle_index` and
/// `graph.cycles` from scratch; call once, immediately after
/// [`crate::contour::extract`].
pub fn discover(graph: &mut Graph, field: &Field) {
    let shape = field.shape;
    let configs = cell_configs(field);
    if shape.w < 2 || shape.h < 2 {
        return;
    }
    for x in 0..shape.w - 1 {
        for y in 0..shape.h - 1 {
            let config = configs[x * (shape.h - 1) + y];
            let Some(seed) = seed_edge(shape, x, y, config) else {
                continue;
            };
            if graph.cycle_index[seed.index()].is_some() {
                continue;
            }
            let k = graph.cycles.len();
            let length = flood(graph, seed, k);
            graph.cycles.push(CycleRecord {
                start_edge: seed,
                length,
            });
        }
    }
}

/// C5: the id of the shortest alive cycle, tie-broken by the lowest id.
/// `None` once at most one cycle remains alive.
pub fn find_smallest(graph: &Graph) -> Option<usize> {
    graph
        .cycles
        .iter()
        .enumerate()
        .filter(|(_, rec)| !rec.is_tombstone())
        .min_by_key(|(k, rec)| (rec.length, *k))
        .map(|(k, _)| k)
}

/// C5: tombstone cycle `k` after its edges have been relabeled into the
/// cycle it was merged into. Does not touch `cycle_index` — the caller
/// (stitching) relabels absorbed edges itself as part of the splice.
pub fn tombstone(graph: &mut Graph, k: usize) {
    graph.cycles[k].length = 0;
}

/// Collect cycle `k`'s edges in walk order, starting from its
/// `start_edge`. Used by stitching to snapshot a cycle's membership before
/// mutating `next_edge`/`prev_edge` at the splice point.
pub(crate) fn cycle_edges(graph: &Graph, k: usize) -> Vec<EdgeId> {
    let rec = graph.cycles[k];
    let mut out = Vec::with_capacity(rec.length);
    let mut cur = rec.start_edge;
    for _ in 0..rec.length {
        out.push(cur);
        cur = graph.next_edge[cur.index()].expect("cycle walk hit an edge with no next_edge");
    }
    out
}
