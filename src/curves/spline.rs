//! Chains of cubic Bezier segments sharing their endpoints.

use crate::errors::GeometryError;
use crate::geometry::Bezier;
use crate::geometry::bezier::equal_arc_params;
use crate::geometry::distance;
use crate::numeric::linspace;
use crate::types::{DataRange, Point};

use super::hobby::hobby_control_points;

/// Cubic Bezier spline. Holds `3n + 1` points for `n` segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
    points: Vec<Point>,
}

impl Spline {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        let got = points.len();
        if got < 4 || (got - 1) % 3 != 0 {
            return Err(GeometryError::SplinePointCount { got });
        }
        Ok(Spline { points })
    }

    /// Smooth spline through `points` using Hobby's algorithm
    pub fn hobby(points: &[Point], omega: f64) -> Result<Self, GeometryError> {
        Spline::new(hobby_control_points(points, omega)?)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    pub fn segments(&self) -> Vec<Bezier> {
        self.points
            .windows(4)
            .step_by(3)
            .map(|w| Bezier::Cubic(w[0], w[1], w[2], w[3]))
            .collect()
    }

    /// Point at `t` in `[0, 1]` along the whole spline
    pub fn xy(&self, t: f64) -> Point {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if t <= 0.0 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }
        let n = self.segment_count();
        let scaled = t * n as f64;
        let idx = (scaled.floor() as usize).min(n - 1);
        let base = idx * 3;
        let seg = Bezier::Cubic(
            self.points[base],
            self.points[base + 1],
            self.points[base + 2],
            self.points[base + 3],
        );
        seg.xy(scaled - idx as f64)
    }

    /// `n_per_segment` points along each segment, shared endpoints emitted once
    pub fn sample(&self, n_per_segment: usize) -> Vec<Point> {
        let n = n_per_segment.max(2);
        let mut out = Vec::with_capacity(self.segment_count() * (n - 1) + 1);
        for (i, seg) in self.segments().iter().enumerate() {
            let pts = seg.sample(n);
            let skip = usize::from(i > 0);
            out.extend(pts.into_iter().skip(skip));
        }
        out
    }

    /// Parameters splitting the spline into `nsegments` pieces of roughly equal length,
    /// from `n` samples per Bezier segment
    pub fn equal_spaced_t(&self, nsegments: usize, n: usize) -> Vec<f64> {
        let n = n.max(2);
        let segments = self.segments();
        let local = linspace(0.0, 1.0, n);
        let mut dists = Vec::with_capacity(segments.len() * (n - 1));
        for seg in &segments {
            let pts: Vec<Point> = local.iter().map(|&t| seg.xy(t)).collect();
            dists.extend(pts.windows(2).map(|w| distance(w[0], w[1])));
        }
        let grid = linspace(0.0, 1.0, n * segments.len());
        equal_arc_params(&dists, &grid, nsegments)
    }

    pub fn equal_spaced_points(&self, nsegments: usize, n: usize) -> Vec<Point> {
        self.equal_spaced_t(nsegments, n)
            .into_iter()
            .map(|t| self.xy(t))
            .collect()
    }

    pub fn datarange(&self) -> DataRange {
        DataRange::of_points(self.sample(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    fn two_segment() -> Spline {
        Spline::new(vec![
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(2.0, 1.0),
            pt(3.0, 0.0),
            pt(4.0, -1.0),
            pt(5.0, -1.0),
            pt(6.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn point_count_is_checked() {
        for n in [0, 1, 3, 5, 6, 8] {
            let pts = vec![pt(0.0, 0.0); n];
            assert_eq!(
                Spline::new(pts),
                Err(GeometryError::SplinePointCount { got: n })
            );
        }
        assert!(Spline::new(vec![pt(0.0, 0.0); 10]).is_ok());
    }

    #[test]
    fn xy_maps_to_segments() {
        let s = two_segment();
        assert_eq!(s.segment_count(), 2);
        assert_eq!(s.xy(0.0), pt(0.0, 0.0));
        assert_eq!(s.xy(0.5), pt(3.0, 0.0));
        assert_eq!(s.xy(1.0), pt(6.0, 0.0));
        assert_eq!(s.xy(1.5), pt(6.0, 0.0));
    }

    #[test]
    fn sample_skips_shared_endpoints() {
        let pts = two_segment().sample(5);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[4], pt(3.0, 0.0));
    }

    #[test]
    fn equal_spaced_symmetric_spline() {
        let t = two_segment().equal_spaced_t(2, 200);
        assert_eq!(t.len(), 3);
        assert!((t[1] - 0.5).abs() < 0.01);
        let p = two_segment().equal_spaced_points(2, 200);
        assert!((p[1] - pt(3.0, 0.0)).length() < 0.1);
    }
}
