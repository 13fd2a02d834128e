//! Circles and circular arcs.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;

use crate::errors::GeometryError;
use crate::types::{DataRange, Point, pt};

use super::line::Line;
use super::{angle_diff, isclose};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Angle of the tangent at `theta` (radians) around a circle
pub fn tangent_angle(theta: f64) -> f64 {
    (theta + FRAC_PI_2 + TAU) % TAU
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Circle {
            center,
            radius: radius.abs(),
        }
    }

    /// Circle through three points.
    ///
    /// Treats the points as complex numbers: with `w = (p3 - p1) / (p2 - p1)` the center
    /// is `(p2 - p1)(w - |w|²) / (2i·Im w) + p1`.
    pub fn circumcircle(p1: Point, p2: Point, p3: Point) -> Result<Circle, GeometryError> {
        let w = cdiv(p3 - p1, p2 - p1);
        if !w.y.is_finite() || w.y.abs() <= 0.0 {
            return Err(GeometryError::CollinearPoints);
        }
        let numer = DVec2::new(w.x - w.length_squared(), w.y);
        // Dividing by 2i·Im(w) rotates by -90° and scales
        let k = 2.0 * w.y;
        let quotient = DVec2::new(numer.y / k, -numer.x / k);
        let center = cmul(p2 - p1, quotient) + p1;
        Ok(Circle::new(center, p1.distance(center)))
    }

    /// Point on the circle at `theta` radians
    pub fn point_at(&self, theta: f64) -> Point {
        let (s, c) = theta.sin_cos();
        pt(self.center.x + self.radius * c, self.center.y + self.radius * s)
    }

    /// Tangent line at `theta` radians
    pub fn tangent_at(&self, theta: f64) -> Line {
        let p = self.point_at(theta);
        Line::from_point_slope(p, tangent_angle(theta).tan())
    }

    /// Line through the center and the point at `theta` radians
    pub fn normal_at(&self, theta: f64) -> Line {
        Line::from_point_slope(self.center, theta.tan())
    }

    /// The two points where tangents through `p` touch the circle.
    ///
    /// A point on the circle returns itself twice.
    pub fn tangent_points(&self, p: Point) -> Result<(Point, Point), GeometryError> {
        let d = p - self.center;
        let rsq = self.radius * self.radius;
        let dsq = d.length_squared();
        if dsq < rsq || dsq == 0.0 {
            return Err(GeometryError::PointInsideCircle);
        }
        let base = self.center + d * (rsq / dsq);
        let offset = DVec2::new(-d.y, d.x) * (self.radius / dsq * (dsq - rsq).sqrt());
        Ok((base + offset, base - offset))
    }

    /// Tangent points through `p` paired with the slope of each tangent line
    pub fn tangents(&self, p: Point) -> Result<[(Point, f64); 2], GeometryError> {
        let (t1, t2) = self.tangent_points(p)?;
        if isclose(t1, p) {
            let theta = (p.y - self.center.y).atan2(p.x - self.center.x);
            let m = tangent_angle(theta).tan();
            return Ok([(p, m), (p, m)]);
        }
        Ok([(t1, super::point_slope(p, t1)), (t2, super::point_slope(p, t2))])
    }

    pub fn datarange(&self) -> DataRange {
        DataRange::new(
            self.center.x - self.radius,
            self.center.x + self.radius,
            self.center.y - self.radius,
            self.center.y + self.radius,
        )
    }
}

/// Circular arc, angles in degrees measured counter-clockwise from `theta1` to `theta2`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub theta1: f64,
    pub theta2: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, theta1: f64, theta2: f64) -> Self {
        Arc {
            center,
            radius: radius.abs(),
            theta1,
            theta2,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    /// Angular sweep in radians, in `[0, 2π)`
    pub fn sweep(&self) -> f64 {
        angle_diff(self.theta1.to_radians(), self.theta2.to_radians())
    }

    /// Whether the angle `theta` (radians) falls within the sweep
    pub fn contains_angle(&self, theta: f64) -> bool {
        angle_diff(self.theta1.to_radians(), theta) <= self.sweep()
    }

    /// Whether the direction from the center to `p` falls within the sweep
    pub fn contains_direction(&self, p: Point) -> bool {
        self.contains_angle((p.y - self.center.y).atan2(p.x - self.center.x))
    }

    pub fn start(&self) -> Point {
        self.circle().point_at(self.theta1.to_radians())
    }

    pub fn end(&self) -> Point {
        self.circle().point_at(self.theta2.to_radians())
    }

    /// Bounds of the points sampled along the arc
    pub fn datarange(&self) -> DataRange {
        let circle = self.circle();
        let t1 = self.theta1.to_radians();
        let sweep = self.sweep();
        DataRange::of_points((0..=64).map(|i| circle.point_at(t1 + sweep * i as f64 / 64.0)))
    }
}

fn cmul(a: DVec2, b: DVec2) -> DVec2 {
    DVec2::new(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x)
}

fn cdiv(a: DVec2, b: DVec2) -> DVec2 {
    let den = b.length_squared();
    DVec2::new((a.x * b.x + a.y * b.y) / den, (a.y * b.x - a.x * b.y) / den)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circumcircle_of_right_triangle() {
        let c = Circle::circumcircle(pt(0.0, 0.0), pt(2.0, 0.0), pt(0.0, 2.0)).unwrap();
        assert!(isclose(c.center, pt(1.0, 1.0)));
        assert!((c.radius - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn circumcircle_collinear_fails() {
        assert_eq!(
            Circle::circumcircle(pt(0.0, 0.0), pt(1.0, 1.0), pt(3.0, 3.0)),
            Err(GeometryError::CollinearPoints)
        );
    }

    #[test]
    fn tangent_points_from_outside() {
        let c = Circle::new(pt(0.0, 0.0), 1.0);
        let (t1, t2) = c.tangent_points(pt(2.0, 0.0)).unwrap();
        assert!((t1.x - 0.5).abs() < 1e-12 && (t2.x - 0.5).abs() < 1e-12);
        assert!((t1.y.abs() - 0.75f64.sqrt()).abs() < 1e-12);
        assert!((t1.y + t2.y).abs() < 1e-12);
    }

    #[test]
    fn tangent_points_inside_fails() {
        let c = Circle::new(pt(0.0, 0.0), 1.0);
        assert_eq!(
            c.tangent_points(pt(0.2, 0.1)),
            Err(GeometryError::PointInsideCircle)
        );
    }

    #[test]
    fn tangents_on_circle_repeat_point() {
        let c = Circle::new(pt(0.0, 0.0), 1.0);
        let [(p1, m1), (p2, _)] = c.tangents(pt(1.0, 0.0)).unwrap();
        assert_eq!(p1, p2);
        assert!(m1.abs() > 1e10);
    }

    #[test]
    fn tangent_at_top_is_horizontal() {
        let c = Circle::new(pt(1.0, 1.0), 2.0);
        let t = c.tangent_at(FRAC_PI_2);
        assert!(t.slope().abs() < 1e-12 || t.slope().abs() > 1e12);
        assert!((t.y_at(1.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arc_wraps_through_zero() {
        let a = Arc::new(pt(0.0, 0.0), 1.0, 300.0, 60.0);
        assert!(a.contains_angle(0.0));
        assert!(!a.contains_angle(std::f64::consts::PI));
        assert!(a.contains_direction(pt(1.0, 0.5)));
    }
}
