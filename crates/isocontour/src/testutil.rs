//! Synthetic scalar fields for property tests and benchmarks.
//!
//! Why this design
//! - Mirrors the teacher's `geom2::rand` radial-jitter polygon sampler: a
//!   `ReplayToken` seeds a `StdRng` so a failing proptest case or a
//!   benchmark run can be reproduced exactly from the token alone.
//! - Kept as a public (non-`#[cfg(test)]`) module because
//!   `benches/stitch_bench.rs` needs the same generators outside the test
//!   harness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::contour::Field;
use crate::edge_index::Shape;

/// A replayable seed for synthetic field generation, following the
/// teacher's `geom2::rand::ReplayToken` convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken(pub u64);

/// Build a field from an explicit union of circles (each `(cx, cy, r)` in
/// unit-square coordinates): `field(x, y) = max_i(r_i - dist((x,y), c_i))`.
pub fn union_of_circles_field(shape: Shape, circles: &[(f64, f64, f64)]) -> Field {
    let scale = shape.w.max(shape.h) as f64;
    let mut data = vec![f64::NEG_INFINITY; shape.w * shape.h];
    for x in 0..shape.w {
        for y in 0..shape.h {
            let px = x as f64 / scale;
            let py = y as f64 / scale;
            let mut best = f64::NEG_INFINITY;
            for &(cx, cy, r) in circles {
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                best = best.max(r - d);
            }
            data[x * shape.h + y] = best;
        }
    }
    Field::new(shape, data)
}

/// Draw `count` circles at random non-overlapping-ish positions and radii,
/// replayable from `token`. Centers are kept away from the grid boundary
/// by at least the radius so every circle's contour lies fully in the
/// interior (spec.md §4.3b edge cases around the grid boundary are
/// exercised separately, not by this generator).
pub fn random_circles_field(shape: Shape, count: usize, token: ReplayToken) -> Field {
    let mut rng = StdRng::seed_from_u64(token.0);
    let circles: Vec<(f64, f64, f64)> = (0..count)
        .map(|_| {
            let r: f64 = rng.gen_range(0.05..0.15);
            let cx: f64 = rng.gen_range(r..(1.0 - r));
            let cy: f64 = rng.gen_range(r..(1.0 - r));
            (cx, cy, r)
        })
        .collect();
    union_of_circles_field(shape, &circles)
}
