//! Geometry kernels (C2): interpolation, norms, and the splice-cost formula.
//!
//! Why this design
//! - These are the innermost hot-path functions (called once per candidate
//!   edge pair during stitching), so they stay free functions over
//!   `nalgebra::Vector2<f64>` rather than methods on a heavier type.
//!
//! References
//! - Ported from `original_source/src/cglib/calc.py`
//!   (`linear_interpolation`, `euclidean_norm`, `compute_all_energies`).

use crate::graph::Point;

/// Euclidean norm of a 2D vector.
#[inline]
pub fn norm(v: Point) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Find the point on the segment `p0 -> p1` (in Cartesian coordinates, with
/// scalar-field values `v0`, `v1` at the respective endpoints) where the
/// linearly interpolated field value crosses zero.
///
/// Pre: `v0` and `v1` have opposite signs (one `< 0`, the other `>= 0`);
/// behavior is undefined (spec.md §4.2, §7 `DomainError`) otherwise — this
/// is a caller obligation checked only in debug builds, matching the
/// hot-path cost discipline of the teacher's `geom2`/`geom4` kernels.
///
/// When `p0` and `p1` share a row (a vertical edge's two grid corners),
/// only `x` is interpolated and `y` is taken from `p1`; when they share a
/// column (a horizontal edge), only `y` is interpolated and `x` is taken
/// from `p0`.
pub fn lerp_zero(p0: Point, v0: f64, p1: Point, v1: f64) -> Point {
    debug_assert!(
        (v0 < 0.0) != (v1 < 0.0) || v0 == 0.0 || v1 == 0.0,
        "lerp_zero requires a sign change between endpoints"
    );
    let t = -v0 / (v1 - v0);
    if p0.y == p1.y {
        // Shared row: this is a vertical grid edge, interpolate x, keep p1's y.
        Point::new(p0.x + t * (p1.x - p0.x), p1.y)
    } else {
        // Shared column: horizontal grid edge, interpolate y, keep p0's x.
        Point::new(p0.x, p0.y + t * (p1.y - p0.y))
    }
}

/// Minimum splice energy between two directed edges `I = (iA -> iB)` and
/// `J = (jA -> jB)` belonging to different cycles: the added perimeter of
/// joining them, choosing whichever of the "straight" (`iA-jA`, `iB-jB`) or
/// "crossed" (`iA-jB`, `iB-jA`) pairing sums to less length.
///
/// Returns `(cost, crossed)` where `crossed` records which pairing was
/// cheaper, for callers that need to know (spec.md §9, open question on
/// splice topology).
pub fn splice_cost(i_a: Point, i_b: Point, j_a: Point, j_b: Point) -> (f64, bool) {
    let base = norm(i_a - i_b) + norm(j_a - j_b);
    let straight = norm(i_a - j_a) + norm(i_b - j_b);
    let crossed = norm(i_a - j_b) + norm(i_b - j_a);
    if crossed < straight {
        (crossed - base, true)
    } else {
        (straight - base, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_zero_vertical_edge_interpolates_x() {
        // Same y (shared row): vertical grid edge.
        let p0 = Point::new(0.0, 0.5);
        let p1 = Point::new(1.0, 0.5);
        let p = lerp_zero(p0, -1.0, p1, 1.0);
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn lerp_zero_horizontal_edge_interpolates_y() {
        // Same x (shared column): horizontal grid edge.
        let p0 = Point::new(0.25, 0.0);
        let p1 = Point::new(0.25, 1.0);
        let p = lerp_zero(p0, -3.0, p1, 1.0);
        assert!((p.y - 0.75).abs() < 1e-12);
        assert!((p.x - 0.25).abs() < 1e-12);
    }

    #[test]
    fn splice_cost_picks_cheaper_pairing() {
        // Two short collinear-ish edges; crossing them should cost more
        // than the straight pairing when they sit side by side.
        let (cost, crossed) = splice_cost(
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        );
        assert!(!crossed);
        assert!(cost >= 0.0);
    }

    #[test]
    fn splice_cost_is_symmetric_in_edge_order() {
        let i_a = Point::new(0.1, 0.2);
        let i_b = Point::new(0.3, -0.1);
        let j_a = Point::new(1.0, 1.0);
        let j_b = Point::new(0.9, 1.4);
        let (c1, _) = splice_cost(i_a, i_b, j_a, j_b);
        let (c2, _) = splice_cost(j_a, j_b, i_a, i_b);
        assert!((c1 - c2).abs() < 1e-12);
    }
}
