//! The stitching engine (C6): repeatedly merge the smallest alive cycle
//! into another via a minimal-perimeter splice, until one cycle remains.
//!
//! Why this design
//! - Loop-carried mutation of a shared catalog is inherently sequential
//!   (spec.md §5), so unlike C3 this module does no `rayon` work at all.
//! - The splice rewrite is always the "crossed" four-pointer swap
//!   (`next[I.x]=J.y; prev[I.y]=J.x; next[J.x]=I.y; prev[J.y]=I.x`)
//!   regardless of which pairing [`crate::geom::splice_cost`] reports as
//!   cheaper — this is the reference behavior and an open design question
//!   (spec.md §9, §14 of the project's full spec). [`StitchCfg`] exposes an
//!   opt-in `honor_cheaper_topology` that reverses the smaller cycle's
//!   orientation first when the "straight" pairing was actually cheaper,
//!   which turns the same crossed-rewrite formula into the geometrically
//!   correct join.
//!
//! References
//! - Candidate search & splice: spec.md §4.6.
//! - Ported from `original_source/src/cglib/stitch.py`
//!   (`find_edges_with_minimum_energy_with_neighbours`,
//!   `compiled_stitching_algorithm_with_neighbours`, `stitch_two_cycles`).

use crate::cycle::{self, cycle_edges};
use crate::edge_index::{edge_1d_to_3d, edge_3d_to_1d, Shape};
use crate::error::Error;
use crate::geom::splice_cost;
use crate::graph::{EdgeId, Graph};

/// Which candidate search to run before the full-scan fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StitchStrategy {
    /// 5x5x2 neighborhood search in edge-3d-index space around each edge
    /// of the cycle being merged, falling back to [`candidates::full_scan`]
    /// when the neighborhood yields nothing.
    #[default]
    Localized,
    /// Always use [`candidates::full_scan`]; useful as a correctness
    /// oracle and for benchmarking against the localized strategy.
    Exhaustive,
}

/// Tuning knobs for [`run`], following the teacher's small `Copy` config
/// struct convention (`geom2::GeomCfg`, `geom4::cfg`).
#[derive(Clone, Copy, Debug, Default)]
pub struct StitchCfg {
    pub strategy: StitchStrategy,
    /// When `true` and the cheaper pairing for a chosen splice was
    /// "straight" rather than "crossed", reverse the smaller cycle's
    /// orientation before splicing so the result is the geometrically
    /// minimal join. Default `false` matches the reference behavior
    /// (always crossed, regardless of which pairing was cheaper).
    pub honor_cheaper_topology: bool,
}

/// Candidate-edge search strategies, kept as free functions so
/// [`StitchStrategy::Exhaustive`] and the localized-search fallback share
/// one code path.
mod candidates {
    use super::*;

    const RADIUS: isize = 2;

    /// Every edge belonging to a cycle other than `exclude` within a
    /// `5x5x2` neighborhood of `anchor` in edge-3d-index space.
    pub(super) fn localized(graph: &Graph, shape: Shape, anchor: EdgeId, exclude: usize) -> Vec<EdgeId> {
        let (ax, ay, _az) = edge_1d_to_3d(shape, anchor);
        let mut out = Vec::new();
        for z in 0..2 {
            for dx in -RADIUS..=RADIUS {
                for dy in -RADIUS..=RADIUS {
                    let x = ax as isize + dx;
                    let y = ay as isize + dy;
                    if let Some(candidate) = edge_3d_to_1d(shape, x, y, z) {
                        if graph.next_edge[candidate.index()].is_some()
                            && graph.cycle_index[candidate.index()] != Some(exclude)
                        {
                            out.push(candidate);
                        }
                    }
                }
            }
        }
        out
    }

    /// Every active edge belonging to a cycle other than `exclude`,
    /// unconditionally — the fallback when a localized search comes up
    /// empty, and [`StitchStrategy::Exhaustive`]'s only search.
    pub(super) fn full_scan(graph: &Graph, exclude: usize) -> Vec<EdgeId> {
        (0..graph.edge_count())
            .filter(|&i| {
                graph.next_edge[i].is_some() && graph.cycle_index[i] != Some(exclude)
            })
            .map(EdgeId)
            .collect()
    }
}

struct Best {
    cost: f64,
    i: EdgeId,
    j: EdgeId,
    crossed: bool,
}

fn consider(best: &mut Option<Best>, graph: &Graph, i: EdgeId, j: EdgeId) {
    let i_next = graph.next_edge[i.index()].expect("cycle edge always has next_edge");
    let j_next = graph.next_edge[j.index()].expect("candidate edge always has next_edge");
    let (cost, crossed) = splice_cost(
        graph.points[i.index()].expect("cycle edge always has a point"),
        graph.points[i_next.index()].expect("cycle edge always has a point"),
        graph.points[j.index()].expect("candidate edge always has a point"),
        graph.points[j_next.index()].expect("candidate edge always has a point"),
    );
    let better = match best {
        None => true,
        Some(b) => (cost, i.index(), j.index()) < (b.cost, b.i.index(), b.j.index()),
    };
    if better {
        *best = Some(Best { cost, i, j, crossed });
    }
}

fn best_over(graph: &Graph, i_edges: &[EdgeId], candidates_for: impl Fn(EdgeId) -> Vec<EdgeId>) -> Option<Best> {
    let mut best: Option<Best> = None;
    for &i in i_edges {
        for j in candidates_for(i) {
            consider(&mut best, graph, i, j);
        }
    }
    best
}

fn find_candidate(graph: &Graph, shape: Shape, k: usize, cfg: StitchCfg) -> Option<Best> {
    let i_edges = cycle_edges(graph, k);
    match cfg.strategy {
        StitchStrategy::Exhaustive => best_over(graph, &i_edges, |_| candidates::full_scan(graph, k)),
        StitchStrategy::Localized => {
            let localized = best_over(graph, &i_edges, |i| candidates::localized(graph, shape, i, k));
            localized.or_else(|| best_over(graph, &i_edges, |_| candidates::full_scan(graph, k)))
        }
    }
}

fn reverse_in_place(graph: &mut Graph, edges: &[EdgeId]) {
    let snapshot: Vec<_> = edges
        .iter()
        .map(|&e| (e, graph.next_edge[e.index()], graph.prev_edge[e.index()]))
        .collect();
    for (e, next, prev) in snapshot {
        graph.next_edge[e.index()] = prev;
        graph.prev_edge[e.index()] = next;
    }
}

fn splice(graph: &mut Graph, k: usize, i: EdgeId, j: EdgeId, crossed: bool, cfg: StitchCfg) {
    let other = graph.cycle_index[j.index()].expect("candidate edge always carries a cycle id");
    let k_edges = cycle_edges(graph, k);

    if cfg.honor_cheaper_topology && !crossed {
        // Reverse the smaller cycle's orientation so that the crossed-splice
        // formula below realizes the geometrically cheaper ("straight")
        // pairing relative to the original orientations.
        reverse_in_place(graph, &k_edges);
    }

    let other_edges = cycle_edges(graph, other);

    let i_next = graph.next_edge[i.index()].expect("cycle edge always has next_edge");
    let j_next = graph.next_edge[j.index()].expect("candidate edge always has next_edge");

    graph.next_edge[i.index()] = Some(j_next);
    graph.prev_edge[i_next.index()] = Some(j);
    graph.next_edge[j.index()] = Some(i_next);
    graph.prev_edge[j_next.index()] = Some(i);

    for e in &other_edges {
        graph.cycle_index[e.index()] = Some(k);
    }
    graph.cycles[k].length += graph.cycles[other].length;
    cycle::tombstone(graph, other);
}

/// Run C6 to completion: merge cycles until at most one remains alive.
/// Expects `graph` to already have `cycle_index`/`cycles` populated by
/// [`crate::cycle::discover`].
pub fn run(graph: &mut Graph, cfg: StitchCfg) -> Result<(), Error> {
    let shape = graph.shape;
    while graph.alive_cycle_count() > 1 {
        let alive = graph.alive_cycle_count();
        let k = cycle::find_smallest(graph).expect("alive_cycle_count > 1 implies a smallest cycle exists");
        let Best { i, j, crossed, .. } = find_candidate(graph, shape, k, cfg).ok_or(Error::NoCandidate { cycle: k, alive })?;
        if graph.cycle_index[j.index()] == Some(k) {
            return Err(Error::InvalidGeometry {
                target: i,
                candidate: j,
                cycle: k,
            });
        }
        splice(graph, k, i, j, crossed, cfg);
    }
    Ok(())
}
