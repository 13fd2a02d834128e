//! Infinite lines in standard form and finite segments.

use std::f64::consts::TAU;

use crate::errors::GeometryError;
use crate::types::{Point, pt};

use super::{distance, midpoint, point_slope};

/// Infinite line `a*x + b*y = c`.
///
/// Non-vertical lines built from a slope are normalized to `b == 1`, so `c` is the
/// y-intercept. Vertical lines are `(1, 0, x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, GeometryError> {
        if a == 0.0 && b == 0.0 {
            return Err(GeometryError::DegenerateLine);
        }
        Ok(Line { a, b, c })
    }

    pub fn from_slope_intercept(slope: f64, intercept: f64) -> Self {
        Line {
            a: -slope,
            b: 1.0,
            c: intercept,
        }
    }

    /// Line through `point` with the given slope; an infinite slope gives a vertical line
    pub fn from_point_slope(point: Point, slope: f64) -> Self {
        if slope.is_finite() {
            Line::from_slope_intercept(slope, point.y - slope * point.x)
        } else {
            Line::vertical(point.x)
        }
    }

    pub fn from_points(p1: Point, p2: Point) -> Result<Self, GeometryError> {
        if p1 == p2 {
            return Err(GeometryError::DegenerateLine);
        }
        Ok(Line::from_point_slope(p1, point_slope(p1, p2)))
    }

    pub fn horizontal(y: f64) -> Self {
        Line::from_slope_intercept(0.0, y)
    }

    pub fn vertical(x: f64) -> Self {
        Line {
            a: 1.0,
            b: 0.0,
            c: x,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.b == 0.0
    }

    /// `a*x + b*y - c`, zero on the line
    pub(crate) fn residual(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y - self.c
    }

    pub(crate) fn norm_sq(&self) -> f64 {
        self.a * self.a + self.b * self.b
    }

    /// Slope, `+inf` for a vertical line
    pub fn slope(&self) -> f64 {
        if self.b == 0.0 {
            f64::INFINITY
        } else {
            -self.a / self.b
        }
    }

    /// y-intercept, `+inf` for a vertical line
    pub fn intercept(&self) -> f64 {
        if self.b == 0.0 {
            f64::INFINITY
        } else {
            self.c / self.b
        }
    }

    /// x-intercept, `+inf` for a horizontal line
    pub fn x_intercept(&self) -> f64 {
        if self.a == 0.0 {
            f64::INFINITY
        } else {
            self.c / self.a
        }
    }

    /// y value at `x`, NaN for a vertical line
    pub fn y_at(&self, x: f64) -> f64 {
        if self.b == 0.0 {
            f64::NAN
        } else {
            (self.c - self.a * x) / self.b
        }
    }

    /// x value at `y`, NaN for a horizontal line
    pub fn x_at(&self, y: f64) -> f64 {
        if self.a == 0.0 {
            f64::NAN
        } else {
            (self.c - self.b * y) / self.a
        }
    }

    /// Perpendicular distance from `point` to the line
    pub fn normal_distance(&self, point: Point) -> f64 {
        self.residual(point).abs() / self.norm_sq().sqrt()
    }

    /// Line perpendicular to this one passing through `point`
    pub fn normal_through(&self, point: Point) -> Line {
        Line::from_point_slope(point, normal_slope(self.slope()))
    }

    /// The two angle bisectors of this line and `other`
    pub fn bisectors(&self, other: &Line) -> (Line, Line) {
        let n1 = self.norm_sq().sqrt();
        let n2 = other.norm_sq().sqrt();
        let bisect = |sign: f64| Line {
            a: self.a / n1 + sign * other.a / n2,
            b: self.b / n1 + sign * other.b / n2,
            c: self.c / n1 + sign * other.c / n2,
        };
        (bisect(1.0), bisect(-1.0))
    }

    /// Line through the midpoint of `p1`-`p2`, perpendicular to it
    pub fn perpendicular_bisector(p1: Point, p2: Point) -> Line {
        let slope = point_slope(p1, p2);
        Line::from_point_slope(midpoint(p1, p2), normal_slope(slope))
    }

    /// Angle between this line and `other`, radians
    pub fn angle_between(&self, other: &Line) -> f64 {
        (self.slope().atan() - other.slope().atan()).abs() % TAU
    }
}

/// Slope of a perpendicular: `-1/m`, with 0 mapping to a vertical line
pub(crate) fn normal_slope(m: f64) -> f64 {
    if m == 0.0 {
        f64::INFINITY
    } else {
        -1.0 / m
    }
}

/// Finite line segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Segment { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    pub fn midpoint(&self) -> Point {
        midpoint(self.p1, self.p2)
    }

    pub fn slope(&self) -> f64 {
        point_slope(self.p1, self.p2)
    }

    /// The infinite line containing the segment
    pub fn line(&self) -> Result<Line, GeometryError> {
        Line::from_points(self.p1, self.p2)
    }

    /// Point at fraction `t` of the way from `p1` to `p2`
    pub fn point_at(&self, t: f64) -> Point {
        pt(
            self.p1.x + (self.p2.x - self.p1.x) * t,
            self.p1.y + (self.p2.y - self.p1.y) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::isclose;

    #[test]
    fn slope_intercept_roundtrip() {
        let l = Line::from_slope_intercept(2.0, -1.0);
        assert_eq!(l.slope(), 2.0);
        assert_eq!(l.intercept(), -1.0);
        assert_eq!(l.x_intercept(), 0.5);
        assert_eq!(l.y_at(3.0), 5.0);
        assert_eq!(l.x_at(5.0), 3.0);
    }

    #[test]
    fn vertical_line_degeneracies() {
        let v = Line::from_point_slope(pt(3.0, 7.0), f64::INFINITY);
        assert_eq!(v, Line::vertical(3.0));
        assert_eq!(v.slope(), f64::INFINITY);
        assert!(v.y_at(3.0).is_nan());
        assert_eq!(v.x_at(100.0), 3.0);
    }

    #[test]
    fn from_points_rejects_identical() {
        assert_eq!(
            Line::from_points(pt(1.0, 1.0), pt(1.0, 1.0)),
            Err(GeometryError::DegenerateLine)
        );
        let l = Line::from_points(pt(0.0, 1.0), pt(2.0, 5.0)).unwrap();
        assert_eq!(l.slope(), 2.0);
        assert_eq!(l.intercept(), 1.0);
    }

    #[test]
    fn normal_of_horizontal_is_vertical() {
        let n = Line::horizontal(2.0).normal_through(pt(4.0, 0.0));
        assert!(n.is_vertical());
        assert_eq!(n.c, 4.0);
    }

    #[test]
    fn normal_distance_to_diagonal() {
        let l = Line::from_slope_intercept(1.0, 0.0);
        assert!((l.normal_distance(pt(0.0, 2.0)) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn bisectors_of_axes_are_diagonals() {
        let (b1, b2) = Line::horizontal(0.0).bisectors(&Line::vertical(0.0));
        let slopes = [b1.slope(), b2.slope()];
        assert!(slopes.iter().any(|m| (m - 1.0).abs() < 1e-12));
        assert!(slopes.iter().any(|m| (m + 1.0).abs() < 1e-12));
    }

    #[test]
    fn perpendicular_bisector_passes_midpoint() {
        let l = Line::perpendicular_bisector(pt(0.0, 0.0), pt(2.0, 2.0));
        assert_eq!(l.slope(), -1.0);
        assert!(isclose(pt(1.0, l.y_at(1.0)), pt(1.0, 1.0)));
    }

    #[test]
    fn angle_between_perpendicular() {
        let a = Line::from_slope_intercept(1.0, 0.0);
        let b = Line::from_slope_intercept(-1.0, 0.0);
        assert!((a.angle_between(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
