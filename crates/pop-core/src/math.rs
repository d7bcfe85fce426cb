//! Angle helpers for the folding solvers.

use std::f64::consts::PI;

/// Converts an angle in radians to degrees.
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Converts an angle in degrees to radians.
pub fn deg2rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// If an angle gets close enough to a snapping step, round it onto that step.
///
/// E.g. with `snapping_steps = 90` and `snap_angle = 5`, an angle of 184
/// is rounded to 180.
pub fn snap_degree(angle: f64, snap_angle: f64, snapping_steps: f64) -> f64 {
    let distance =
        (snapping_steps / 2.0 - ((angle % snapping_steps) - snapping_steps / 2.0).abs()).abs();
    if distance < snap_angle {
        (angle / snapping_steps).round() * snapping_steps
    } else {
        angle
    }
}

/// Law-of-cosines angle, in degrees, opposite side `a` of a triangle with
/// side lengths `a`, `b`, `c`.
///
/// The cosine argument is clamped to [-1, 1] so floating-point drift on
/// near-degenerate triangles cannot push `acos` out of its domain. Degenerate
/// side lengths therefore yield a defined (if meaningless) angle rather than
/// NaN.
pub fn calc_triangle_angle(a: f64, b: f64, c: f64) -> f64 {
    let value = ((a * a - b * b - c * c) / (-2.0 * b * c)).clamp(-1.0, 1.0);
    rad2deg(value.acos())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn degree_radian_roundtrip() {
        for deg in [-270.0, -90.0, 0.0, 45.0, 90.0, 180.0, 359.0] {
            assert!((rad2deg(deg2rad(deg)) - deg).abs() < EPS);
        }
    }

    #[test]
    fn equilateral_triangle_angles_are_sixty() {
        let angle = calc_triangle_angle(1.0, 1.0, 1.0);
        assert!((angle - 60.0).abs() < EPS);
    }

    #[test]
    fn right_triangle_angle() {
        // 3-4-5: angle opposite the hypotenuse is 90 degrees
        let angle = calc_triangle_angle(5.0, 3.0, 4.0);
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_angle_never_nan_for_positive_inputs() {
        // includes violated triangle inequalities and collinear cases, where
        // the raw cosine argument falls outside [-1, 1]
        let sides = [1e-12, 0.5, 1.0, 2.0, 3.0, 10.0, 1e6];
        for &a in &sides {
            for &b in &sides {
                for &c in &sides {
                    let angle = calc_triangle_angle(a, b, c);
                    assert!(
                        angle.is_finite(),
                        "calc_triangle_angle({a}, {b}, {c}) = {angle}"
                    );
                    assert!((0.0..=180.0).contains(&angle));
                }
            }
        }
    }

    #[test]
    fn collinear_degenerate_is_clamped() {
        // a = b + c: zero-area triangle, cosine argument exactly -1
        let angle = calc_triangle_angle(5.0, 2.0, 3.0);
        assert!((angle - 180.0).abs() < EPS);
    }

    #[test]
    fn snap_rounds_near_step() {
        assert_eq!(snap_degree(184.0, 5.0, 90.0), 180.0);
        assert_eq!(snap_degree(87.0, 5.0, 90.0), 90.0);
    }

    #[test]
    fn snap_leaves_distant_angles_alone() {
        assert_eq!(snap_degree(130.0, 5.0, 90.0), 130.0);
        assert_eq!(snap_degree(45.0, 4.0, 90.0), 45.0);
    }
}
