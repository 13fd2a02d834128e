//! Quadratic and cubic Bezier curves.

use std::f64::consts::FRAC_PI_2;

use crate::errors::GeometryError;
use crate::numeric::linspace;
use crate::types::{DataRange, Point, pt};

use super::line::{Line, normal_slope};
use super::{distance, midpoint};

/// Default number of samples for length and equal-spacing estimates
pub const DEFAULT_SAMPLES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bezier {
    Quadratic(Point, Point, Point),
    Cubic(Point, Point, Point, Point),
}

impl Bezier {
    /// Quadratic curve between `p1` and `p2` bowed to the left by `k` times the
    /// distance between them
    pub fn symmetric_curve(p1: Point, p2: Point, k: f64) -> Bezier {
        let normal = (p2.y - p1.y).atan2(p2.x - p1.x) + FRAC_PI_2;
        let length = distance(p1, p2) * k;
        let mid = midpoint(p1, p2);
        let (s, c) = normal.sin_cos();
        Bezier::Quadratic(p1, pt(mid.x + length * c, mid.y + length * s), p2)
    }

    /// Quadratic curve from `start` to `end` that passes through `mid` at parameter `t`
    pub fn through_three_points(start: Point, end: Point, mid: Point, t: f64) -> Bezier {
        let ctrl = mid / (2.0 * t * (1.0 - t))
            - start * ((1.0 - t) / (2.0 * t))
            - end * (t / (2.0 * (1.0 - t)));
        Bezier::Quadratic(start, ctrl, end)
    }

    pub fn start(&self) -> Point {
        match *self {
            Bezier::Quadratic(p1, ..) | Bezier::Cubic(p1, ..) => p1,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Bezier::Quadratic(_, _, p3) => p3,
            Bezier::Cubic(_, _, _, p4) => p4,
        }
    }

    /// Point at parameter `t`; the endpoints are returned exactly
    pub fn xy(&self, t: f64) -> Point {
        if t == 0.0 {
            return self.start();
        }
        if t == 1.0 {
            return self.end();
        }
        let u = 1.0 - t;
        match *self {
            Bezier::Quadratic(p1, p2, p3) => p2 + (p1 - p2) * (u * u) + (p3 - p2) * (t * t),
            Bezier::Cubic(p1, p2, p3, p4) => {
                p1 * (u * u * u) + p2 * (3.0 * t * u * u) + p3 * (3.0 * u * t * t) + p4 * (t * t * t)
            }
        }
    }

    /// First derivative with respect to `t`
    fn derivative(&self, t: f64) -> Point {
        let u = 1.0 - t;
        match *self {
            Bezier::Quadratic(p1, p2, p3) => (p2 - p1) * (2.0 * u) + (p3 - p2) * (2.0 * t),
            Bezier::Cubic(p1, p2, p3, p4) => {
                (p2 - p1) * (3.0 * u * u) + (p3 - p2) * (6.0 * u * t) + (p4 - p3) * (3.0 * t * t)
            }
        }
    }

    /// Slope of the tangent at `t`
    pub fn tangent_slope(&self, t: f64) -> f64 {
        let d = self.derivative(t);
        d.y / d.x
    }

    /// Direction (radians) of the tangent at `t`
    pub fn tangent_angle(&self, t: f64) -> f64 {
        let d = self.derivative(t);
        d.y.atan2(d.x)
    }

    pub fn tangent_line(&self, t: f64) -> Line {
        Line::from_point_slope(self.xy(t), self.tangent_slope(t))
    }

    pub fn normal_line(&self, t: f64) -> Line {
        Line::from_point_slope(self.xy(t), normal_slope(self.tangent_slope(t)))
    }

    /// Line through the points at `t1` and `t2`
    pub fn secant(&self, t1: f64, t2: f64) -> Result<Line, GeometryError> {
        Line::from_points(self.xy(t1), self.xy(t2))
    }

    pub fn sample(&self, n: usize) -> Vec<Point> {
        linspace(0.0, 1.0, n.max(2))
            .into_iter()
            .map(|t| self.xy(t))
            .collect()
    }

    /// Approximate arc length from `n` chords
    pub fn length(&self, n: usize) -> f64 {
        self.sample(n).windows(2).map(|w| distance(w[0], w[1])).sum()
    }

    /// Parameters splitting the curve into `nsegments` pieces of roughly equal length,
    /// from `n` samples. Always starts at 0 and ends at 1.
    pub fn equal_spaced_t(&self, nsegments: usize, n: usize) -> Vec<f64> {
        let n = n.max(2);
        let grid = linspace(0.0, 1.0, n);
        let pts: Vec<Point> = grid.iter().map(|&t| self.xy(t)).collect();
        let dists: Vec<f64> = pts.windows(2).map(|w| distance(w[0], w[1])).collect();
        equal_arc_params(&dists, &grid, nsegments)
    }

    pub fn equal_spaced_points(&self, nsegments: usize, n: usize) -> Vec<Point> {
        self.equal_spaced_t(nsegments, n)
            .into_iter()
            .map(|t| self.xy(t))
            .collect()
    }

    pub fn datarange(&self) -> DataRange {
        DataRange::of_points(self.sample(DEFAULT_SAMPLES))
    }
}

/// Map equal fractions of total chord length back onto a parameter grid.
///
/// `dists[i]` is the chord length from sample `i` to sample `i + 1`. Each target length
/// is located with a bisect-left over the running sum and looked up in `grid`.
pub(crate) fn equal_arc_params(dists: &[f64], grid: &[f64], nsegments: usize) -> Vec<f64> {
    let nsegments = nsegments.max(1);
    let mut cumsum = Vec::with_capacity(dists.len());
    let mut total = 0.0;
    for d in dists {
        total += d;
        cumsum.push(total);
    }
    let delta = total / nsegments as f64;
    let last = grid.len().saturating_sub(1);

    let mut params = Vec::with_capacity(nsegments + 1);
    params.push(0.0);
    for i in 1..nsegments {
        let target = delta * i as f64;
        let idx = cumsum.partition_point(|&c| c < target);
        params.push(grid.get(idx.min(last)).copied().unwrap_or(1.0));
    }
    params.push(1.0);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::isclose;

    fn cubic() -> Bezier {
        Bezier::Cubic(pt(0.1, 0.3), pt(1.7, 2.9), pt(3.3, -1.1), pt(4.9, 0.7))
    }

    #[test]
    fn endpoints_are_exact() {
        for b in [cubic(), Bezier::Quadratic(pt(0.1, 0.2), pt(0.5, 3.0), pt(0.7, 0.3))] {
            assert_eq!(b.xy(0.0), b.start());
            assert_eq!(b.xy(1.0), b.end());
        }
    }

    #[test]
    fn quadratic_midpoint() {
        let b = Bezier::Quadratic(pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0));
        assert!(isclose(b.xy(0.5), pt(1.0, 1.0)));
        assert!(b.tangent_slope(0.5).abs() < 1e-12);
        assert!((b.tangent_angle(0.0) - 2f64.atan()).abs() < 1e-12);
    }

    #[test]
    fn straight_cubic_length() {
        let b = Bezier::Cubic(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0));
        assert!((b.length(50) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn equal_spacing_brackets_curve() {
        let t = cubic().equal_spaced_t(4, 200);
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[4], 1.0);
        assert!(t.windows(2).all(|w| w[0] <= w[1]));

        let pts = cubic().equal_spaced_points(4, 400);
        let d: Vec<f64> = pts.windows(2).map(|w| distance(w[0], w[1])).collect();
        let (lo, hi) = d.iter().fold((f64::MAX, 0.0f64), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        assert!(hi / lo < 1.2);
    }

    #[test]
    fn through_three_points_hits_mid() {
        let b = Bezier::through_three_points(pt(0.0, 0.0), pt(4.0, 0.0), pt(1.0, 2.0), 0.4);
        assert!((b.xy(0.4) - pt(1.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn symmetric_curve_bows_left() {
        let b = Bezier::symmetric_curve(pt(0.0, 0.0), pt(2.0, 0.0), 0.5);
        let Bezier::Quadratic(_, ctrl, _) = b else {
            panic!("expected quadratic");
        };
        assert!(isclose(ctrl, pt(1.0, 1.0)));
    }

    #[test]
    fn normal_of_horizontal_tangent_is_vertical() {
        let b = Bezier::Quadratic(pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0));
        assert!(b.normal_line(0.5).is_vertical());
    }
}
