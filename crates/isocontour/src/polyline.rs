//! Polyline emission (C7): read-only traversal of a finished cycle into an
//! ordered sequence of Cartesian points.
//!
//! References
//! - spec.md §4.7.
//! - Ported from `original_source/src/cglib/polylines.py`
//!   (`compute_lines`, `graph_to_polylines`).

use crate::graph::{Graph, Point};

/// One closed contour, in travel order. The last point is adjacent to the
/// first (the polyline is implicitly closed; it does not repeat the first
/// point at the end).
pub type Polyline = Vec<Point>;

/// Walk every alive cycle's `length`-step loop from `start_edge`, collecting
/// each visited edge's interpolated point. Cycle order in the result
/// follows `graph.cycles`' index order; tombstoned cycles are skipped.
pub fn emit(graph: &Graph) -> Vec<Polyline> {
    graph
        .cycles
        .iter()
        .filter(|rec| !rec.is_tombstone())
        .map(|rec| {
            let mut line = Vec::with_capacity(rec.length);
            let mut cur = rec.start_edge;
            for _ in 0..rec.length {
                line.push(graph.points[cur.index()].expect("cycle edge always has a point"));
                cur = graph.next_edge[cur.index()].expect("cycle walk hit an edge with no next_edge");
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{extract, Field};
    use crate::cycle::discover;
    use crate::edge_index::Shape;
    use crate::stitch::{self, StitchCfg};

    fn circle_field(shape: Shape) -> Field {
        let mut data = vec![0.0; shape.w * shape.h];
        let scale = shape.w.max(shape.h) as f64;
        for x in 0..shape.w {
            for y in 0..shape.h {
                let px = x as f64 / scale;
                let py = y as f64 / scale;
                data[x * shape.h + y] = 0.3 - ((px - 0.5).powi(2) + (py - 0.5).powi(2)).sqrt();
            }
        }
        Field::new(shape, data)
    }

    #[test]
    fn single_circle_emits_one_closed_polyline() {
        let shape = Shape::new(24, 24);
        let field = circle_field(shape);
        let mut g = extract(&field);
        discover(&mut g, &field);
        stitch::run(&mut g, StitchCfg::default()).unwrap();
        let lines = emit(&g);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].len() > 3);
    }

    #[test]
    fn emitted_points_stay_within_the_unit_square() {
        let shape = Shape::new(24, 24);
        let field = circle_field(shape);
        let mut g = extract(&field);
        discover(&mut g, &field);
        stitch::run(&mut g, StitchCfg::default()).unwrap();
        for line in emit(&g) {
            for p in line {
                assert!((0.0..=1.0).contains(&p.x));
                assert!((0.0..=1.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn empty_field_emits_no_polylines() {
        let shape = Shape::new(10, 10);
        let field = Field::new(shape, vec![-1.0; 100]);
        let mut g = extract(&field);
        discover(&mut g, &field);
        assert!(emit(&g).is_empty());
    }
}
