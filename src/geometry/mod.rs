//! Geometry kernel: points, lines, circles, ellipses, Beziers and their intersections.
//!
//! Everything here is a pure function of its inputs. Public constructions that have no
//! solution return [`GeometryError`](crate::errors::GeometryError); numeric degeneracies
//! such as the slope of a vertical line are reported as `inf`/`NaN` instead.

pub mod bezier;
pub mod circle;
pub mod ellipse;
pub mod intersect;
pub mod line;

use std::f64::consts::TAU;

use crate::types::{Point, pt};

pub use bezier::Bezier;
pub use circle::{Arc, Circle};
pub use ellipse::Ellipse;
pub use line::{Line, Segment};

const REL_TOL: f64 = 1e-9;
const ABS_TOL: f64 = 1e-12;

pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

pub fn midpoint(p1: Point, p2: Point) -> Point {
    (p1 + p2) / 2.0
}

/// Slope of the segment from `p1` to `p2` (`inf` or `NaN` when vertical)
pub fn point_slope(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    if dx == 0.0 {
        if dy == 0.0 { f64::NAN } else { f64::INFINITY }
    } else {
        dy / dx
    }
}

pub(crate) fn isclose_f(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= REL_TOL * a.abs().max(b.abs()) || diff <= ABS_TOL
}

/// Whether two points coincide within floating point tolerance
pub fn isclose(p1: Point, p2: Point) -> bool {
    isclose_f(p1.x, p2.x) && isclose_f(p1.y, p2.y)
}

/// Remove points that are [`isclose`] to an earlier point, keeping order
pub fn unique_points(points: &[Point]) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !unique.iter().any(|&u| isclose(u, p)) {
            unique.push(p);
        }
    }
    unique
}

pub fn translate(point: Point, delta: Point) -> Point {
    point + delta
}

/// Rotate `point` by `theta` radians about the origin
pub fn rotate(point: Point, theta: f64) -> Point {
    let (s, c) = theta.sin_cos();
    pt(point.x * c - point.y * s, point.x * s + point.y * c)
}

/// Mirror `point` across `line`
pub fn reflect(point: Point, line: &Line) -> Point {
    let k = -2.0 * line.residual(point) / line.norm_sq();
    pt(point.x + k * line.a, point.y + k * line.b)
}

/// Foot of the perpendicular from `point` onto `line`
pub fn image(point: Point, line: &Line) -> Point {
    let k = -line.residual(point) / line.norm_sq();
    pt(point.x + k * line.a, point.y + k * line.b)
}

/// Counter-clockwise angle from `theta1` to `theta2`, in `[0, 2π)`
pub fn angle_diff(theta1: f64, theta2: f64) -> f64 {
    let d = theta2 - theta1;
    let delta = d.sin().atan2(d.cos());
    if delta < 0.0 { delta + TAU } else { delta }
}

/// Whether `angle` lies on the counter-clockwise sweep from `theta1` to `theta2`
pub fn angle_isbetween(angle: f64, theta1: f64, theta2: f64) -> bool {
    angle_diff(theta1, angle) <= angle_diff(theta1, theta2)
}

/// Circular mean of two angles, in `[0, 2π)`
pub fn angle_mean(theta1: f64, theta2: f64) -> f64 {
    let sine = theta1.sin() + theta2.sin();
    let cosine = theta1.cos() + theta2.cos();
    (sine.atan2(cosine) + TAU) % TAU
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    // ==================== Point tests ====================

    #[test]
    fn distance_and_midpoint() {
        assert_eq!(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0);
        assert_eq!(midpoint(pt(-2.0, 2.0), pt(4.0, 0.0)), pt(1.0, 1.0));
    }

    #[test]
    fn point_slope_vertical_is_inf() {
        assert_eq!(point_slope(pt(1.0, 0.0), pt(2.0, 2.0)), 2.0);
        assert_eq!(point_slope(pt(1.0, 0.0), pt(1.0, 2.0)), f64::INFINITY);
    }

    #[test]
    fn unique_points_drops_near_duplicates() {
        let pts = [pt(1.0, 1.0), pt(1.0 + 1e-13, 1.0), pt(2.0, 1.0), pt(1.0, 1.0)];
        assert_eq!(unique_points(&pts), vec![pt(1.0, 1.0), pt(2.0, 1.0)]);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate(pt(1.0, 0.0), FRAC_PI_2);
        assert!(isclose(p, pt(0.0, 1.0)));
    }

    #[test]
    fn reflect_and_image_over_diagonal() {
        let diag = Line::from_slope_intercept(1.0, 0.0);
        assert!(isclose(reflect(pt(2.0, 0.0), &diag), pt(0.0, 2.0)));
        assert!(isclose(image(pt(2.0, 0.0), &diag), pt(1.0, 1.0)));
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_between_wraps() {
        let deg = f64::to_radians;
        assert!(angle_isbetween(deg(10.0), deg(350.0), deg(20.0)));
        assert!(!angle_isbetween(deg(180.0), deg(350.0), deg(20.0)));
        assert!(angle_isbetween(deg(90.0), 0.0, PI));
    }

    #[test]
    fn angle_mean_across_zero() {
        let m = angle_mean(350f64.to_radians(), 10f64.to_radians());
        assert!(m < 1e-9 || (TAU - m) < 1e-9);
        assert!((angle_diff(0.0, -FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }
}
