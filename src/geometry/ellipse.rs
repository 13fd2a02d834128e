//! Rotated ellipses.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::errors::GeometryError;
use crate::types::{DataRange, Point, pt};

use super::line::Line;
use super::rotate;

/// Ellipse with radii `r1` (local x) and `r2` (local y), rotated `rotation` degrees
/// counter-clockwise about its center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub r1: f64,
    pub r2: f64,
    pub rotation: f64,
}

impl Ellipse {
    pub fn new(center: Point, r1: f64, r2: f64, rotation: f64) -> Self {
        Ellipse {
            center,
            r1: r1.abs(),
            r2: r2.abs(),
            rotation,
        }
    }

    /// Offset from the center to the boundary along local angle `theta` (radians)
    fn local_offset(&self, theta: f64) -> Point {
        let (s, c) = theta.sin_cos();
        let r = self.r1 * self.r2 / ((self.r2 * c).powi(2) + (self.r1 * s).powi(2)).sqrt();
        pt(r * c, r * s)
    }

    /// Point on the ellipse in direction `theta` (radians, relative to the ellipse axes)
    pub fn point_at(&self, theta: f64) -> Point {
        let d = rotate(self.local_offset(theta), self.rotation.to_radians());
        self.center + d
    }

    /// Angle (radians) of the tangent at `theta`
    pub fn tangent_angle(&self, theta: f64) -> f64 {
        let d = self.local_offset(theta);
        let normal = (d.y * self.r1 * self.r1).atan2(d.x * self.r2 * self.r2);
        (normal + FRAC_PI_2 + self.rotation.to_radians() + TAU) % TAU
    }

    /// The two points where tangents through `p` touch the ellipse.
    ///
    /// Solved in the ellipse's own frame and rotated back.
    pub fn tangent_points(&self, p: Point) -> Result<(Point, Point), GeometryError> {
        let theta = self.rotation.to_radians();
        let (rx, ry) = (self.r1, self.r2);
        let mut local = p - self.center;
        if theta != 0.0 {
            local = rotate(local, -theta);
        }
        let (px, py) = (local.x, local.y);

        let disc = px * px * ry * ry + py * py * rx * rx - rx * rx * ry * ry;
        if disc < 0.0 {
            return Err(GeometryError::PointInsideCircle);
        }

        let (t1, t2) = if super::isclose(pt(px.abs(), 0.0), pt(rx, 0.0)) {
            // Vertical tangent: the general formula divides by px² - rx²
            let m2 = (py - ry) * (py + ry) / (2.0 * py * px);
            let tline = Line::from_point_slope(local, m2);
            let t2x = px * (ry * ry - py * py) / (py * py + ry * ry);
            (pt(px, 0.0), pt(t2x, tline.y_at(t2x)))
        } else {
            let root = disc.sqrt();
            let den = px * px - rx * rx;
            let touch = |m: f64| {
                let x = (2.0 * m * m * px / (ry * ry) - 2.0 * m * py / (ry * ry))
                    / (2.0 * m * m / (ry * ry) + 2.0 / (rx * rx));
                pt(x, Line::from_point_slope(local, m).y_at(x))
            };
            (touch((px * py - root) / den), touch((px * py + root) / den))
        };

        let back = |t: Point| {
            let t = if theta != 0.0 { rotate(t, theta) } else { t };
            t + self.center
        };
        Ok((back(t1), back(t2)))
    }

    pub fn datarange(&self) -> DataRange {
        DataRange::of_points((0..64).map(|i| self.point_at(TAU * i as f64 / 64.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::isclose;

    #[test]
    fn point_at_axes() {
        let e = Ellipse::new(pt(1.0, 1.0), 3.0, 1.0, 0.0);
        assert!(isclose(e.point_at(0.0), pt(4.0, 1.0)));
        assert!((e.point_at(FRAC_PI_2) - pt(1.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn rotated_point_at() {
        let e = Ellipse::new(pt(0.0, 0.0), 2.0, 1.0, 90.0);
        assert!((e.point_at(0.0) - pt(0.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn tangent_points_from_major_axis() {
        let e = Ellipse::new(pt(0.0, 0.0), 2.0, 1.0, 0.0);
        let (t1, t2) = e.tangent_points(pt(4.0, 0.0)).unwrap();
        for t in [t1, t2] {
            assert!((t.x - 1.0).abs() < 1e-9);
            assert!((t.y.abs() - 0.75f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn tangent_points_vertical_case() {
        let e = Ellipse::new(pt(0.0, 0.0), 2.0, 1.0, 0.0);
        let (t1, t2) = e.tangent_points(pt(2.0, 2.0)).unwrap();
        assert!(isclose(t1, pt(2.0, 0.0)));
        assert!((t2.x * t2.x / 4.0 + t2.y * t2.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tangent_points_inside_fails() {
        let e = Ellipse::new(pt(0.0, 0.0), 2.0, 1.0, 30.0);
        assert_eq!(
            e.tangent_points(pt(0.1, 0.1)),
            Err(GeometryError::PointInsideCircle)
        );
    }

    #[test]
    fn tangent_angle_at_vertex() {
        let e = Ellipse::new(pt(0.0, 0.0), 2.0, 1.0, 0.0);
        assert!((e.tangent_angle(0.0) - FRAC_PI_2).abs() < 1e-12);
    }
}
