//! Property and scenario tests for the full extract -> discover -> stitch
//! -> emit pipeline, exercised through random synthetic fields.

use isocontour::contour::extract;
use isocontour::cycle::discover;
use isocontour::edge_index::Shape;
use isocontour::polyline::emit;
use isocontour::stitch::{run, StitchCfg};
use isocontour::testutil::{random_circles_field, union_of_circles_field, ReplayToken};

use proptest::prelude::*;

fn run_pipeline(shape: Shape, field: &isocontour::contour::Field) -> isocontour::graph::Graph {
    let mut g = extract(field);
    discover(&mut g, field);
    run(&mut g, StitchCfg::default()).unwrap();
    assert_eq!(shape, g.shape);
    g
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After stitching, at most one cycle is alive and every invariant
    /// checker passes, regardless of how many circles seeded the field.
    #[test]
    fn stitching_always_converges_to_a_single_cycle(
        seed in 0u64..10_000,
        count in 1usize..6,
    ) {
        let shape = Shape::new(48, 48);
        let field = random_circles_field(shape, count, ReplayToken(seed));
        let g = run_pipeline(shape, &field);
        prop_assert!(g.alive_cycle_count() <= 1);
        prop_assert!(g.check_pair_invariant());
        prop_assert!(g.check_labeling_invariant());
        prop_assert!(g.check_closure_invariant());
    }

    /// Every emitted point lies in the unit square the isotropic scaling
    /// maps the grid onto.
    #[test]
    fn emitted_points_are_always_in_the_unit_square(
        seed in 0u64..10_000,
        count in 1usize..6,
    ) {
        let shape = Shape::new(48, 48);
        let field = random_circles_field(shape, count, ReplayToken(seed));
        let g = run_pipeline(shape, &field);
        for line in emit(&g) {
            for p in line {
                prop_assert!((0.0..=1.0).contains(&p.x));
                prop_assert!((0.0..=1.0).contains(&p.y));
            }
        }
    }

    /// Running the whole pipeline twice on the same field produces the
    /// same set of cycle lengths: the stitcher's tie-breaking rule is
    /// deterministic.
    #[test]
    fn pipeline_is_deterministic(seed in 0u64..10_000, count in 1usize..6) {
        let shape = Shape::new(32, 32);
        let field = random_circles_field(shape, count, ReplayToken(seed));
        let g1 = run_pipeline(shape, &field);
        let g2 = run_pipeline(shape, &field);
        let lens = |g: &isocontour::graph::Graph| {
            let mut v: Vec<_> = g.cycles.iter().filter(|c| !c.is_tombstone()).map(|c| c.length).collect();
            v.sort_unstable();
            v
        };
        prop_assert_eq!(lens(&g1), lens(&g2));
    }
}

#[test]
fn scenario_single_circle() {
    let shape = Shape::new(48, 48);
    let field = union_of_circles_field(shape, &[(0.5, 0.5, 0.3)]);
    let g = run_pipeline(shape, &field);
    assert_eq!(g.alive_cycle_count(), 1);
}

#[test]
fn scenario_two_disjoint_circles() {
    let shape = Shape::new(48, 48);
    let field = union_of_circles_field(shape, &[(0.2, 0.2, 0.1), (0.8, 0.8, 0.1)]);
    let g = run_pipeline(shape, &field);
    assert_eq!(g.alive_cycle_count(), 1);
}

#[test]
fn scenario_saddle_stress_checkerboard() {
    // Alternating signs on every grid point: every interior cell is a
    // saddle (case 5 or 10), exercising the corner-average disambiguation
    // on every cell at once.
    let shape = Shape::new(16, 16);
    let mut data = vec![0.0; shape.w * shape.h];
    for x in 0..shape.w {
        for y in 0..shape.h {
            data[x * shape.h + y] = if (x + y) % 2 == 0 { 1.0 } else { -1.0 };
        }
    }
    let field = isocontour::contour::Field::new(shape, data);
    let g = run_pipeline(shape, &field);
    assert!(g.alive_cycle_count() <= 1);
}

#[test]
fn scenario_all_negative_grid_has_no_cycles() {
    let shape = Shape::new(20, 20);
    let field = isocontour::contour::Field::new(shape, vec![-1.0; 400]);
    let g = run_pipeline(shape, &field);
    assert_eq!(g.alive_cycle_count(), 0);
}

#[test]
fn scenario_all_positive_grid_has_no_cycles() {
    let shape = Shape::new(20, 20);
    let field = isocontour::contour::Field::new(shape, vec![1.0; 400]);
    let g = run_pipeline(shape, &field);
    assert_eq!(g.alive_cycle_count(), 0);
}

#[test]
fn scenario_determinism_across_repeated_runs() {
    let shape = Shape::new(32, 32);
    let field = random_circles_field(shape, 4, ReplayToken(123));
    let g1 = run_pipeline(shape, &field);
    let g2 = run_pipeline(shape, &field);
    assert_eq!(g1.alive_cycle_count(), g2.alive_cycle_count());
}
