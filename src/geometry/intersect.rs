//! Intersections between lines, circles, arcs and functions.

use std::f64::consts::TAU;

use crate::errors::GeometryError;
use crate::numeric::root;
use crate::types::{Point, pt};

use super::circle::{Arc, Circle};
use super::line::Line;
use super::{isclose, isclose_f, unique_points};

/// Discriminants this far below zero still count as a tangent touch
const TANGENT_TOLERANCE: f64 = 1e-14;

/// Point where two lines cross
pub fn lines(l1: &Line, l2: &Line) -> Result<Point, GeometryError> {
    let d = l1.a * l2.b - l1.b * l2.a;
    if d == 0.0 {
        return Err(GeometryError::ParallelLines);
    }
    let dx = l1.c * l2.b - l1.b * l2.c;
    let dy = l1.a * l2.c - l1.c * l2.a;
    Ok(pt(dx / d, dy / d))
}

/// Angle (radians) at which two lines cross
pub fn line_angle(l1: &Line, l2: &Line) -> f64 {
    (l1.slope().atan() - l2.slope().atan()).abs() % TAU
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Result<(f64, f64), GeometryError> {
    let mut disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        if disc > -TANGENT_TOLERANCE {
            disc = 0.0;
        } else {
            return Err(GeometryError::NoIntersection);
        }
    }
    let d = disc.sqrt();
    Ok(((-b + d) / (2.0 * a), (-b - d) / (2.0 * a)))
}

/// The two points where a line crosses a circle (equal when tangent)
pub fn line_circle(line: &Line, circle: &Circle) -> Result<(Point, Point), GeometryError> {
    let (cx, cy) = (circle.center.x, circle.center.y);
    let r = circle.radius;
    let slope = line.slope();

    if !slope.is_finite() {
        let xint = line.x_at(0.0);
        let c = cx * cx + cy * cy - r * r - 2.0 * xint * cx + xint * xint;
        let (y1, y2) = quadratic_roots(1.0, -2.0 * cy, c)?;
        Ok((pt(line.x_at(y1), y1), pt(line.x_at(y2), y2)))
    } else {
        let intercept = line.intercept();
        let a = slope * slope + 1.0;
        let b = 2.0 * (slope * intercept - slope * cy - cx);
        let c = cy * cy - r * r + cx * cx - 2.0 * intercept * cy + intercept * intercept;
        let (x1, x2) = quadratic_roots(a, b, c)?;
        Ok((pt(x1, line.y_at(x1)), pt(x2, line.y_at(x2))))
    }
}

/// Intersections of two circles: none, one (tangent) or two points.
///
/// Identical circles intersect everywhere and report no points. Centers that are
/// [`isclose`] to the tangent distance touch at a single point.
pub fn circles(c1: &Circle, c2: &Circle) -> Vec<Point> {
    let delta = c2.center - c1.center;
    let dist = delta.length();
    let (r1, r2) = (c1.radius, c2.radius);
    if dist == 0.0 {
        return Vec::new();
    }

    let (outer, inner) = (r1 + r2, (r1 - r2).abs());
    let tangent = isclose_f(dist, outer) || isclose_f(dist, inner);
    if !tangent && (dist > outer || dist < inner) {
        return Vec::new();
    }

    let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
    let h = if tangent {
        0.0
    } else {
        (r1 * r1 - a * a).max(0.0).sqrt()
    };
    let mid = c1.center + delta * (a / dist);
    let p1 = pt(mid.x + h * delta.y / dist, mid.y - h * delta.x / dist);
    let p2 = pt(mid.x - h * delta.y / dist, mid.y + h * delta.x / dist);
    unique_points(&[p1, p2])
}

/// Circle intersections that lie on both arcs
pub fn circle_arcs(a1: &Arc, a2: &Arc) -> Vec<Point> {
    circles(&a1.circle(), &a2.circle())
        .into_iter()
        .filter(|&p| a1.contains_direction(p) && a2.contains_direction(p))
        .collect()
}

/// Points where a line crosses an arc; empty when it misses
pub fn line_arc(line: &Line, arc: &Arc) -> Vec<Point> {
    match line_circle(line, &arc.circle()) {
        Ok((p1, p2)) => {
            let pts = if isclose(p1, p2) { vec![p1] } else { vec![p1, p2] };
            pts.into_iter()
                .filter(|&p| arc.contains_direction(p))
                .collect()
        }
        Err(_) => Vec::new(),
    }
}

/// Where two functions cross within `[x1, x2]`
pub fn functions(
    f1: impl Fn(f64) -> f64,
    f2: impl Fn(f64) -> f64,
    x1: f64,
    x2: f64,
) -> Result<Point, GeometryError> {
    let tol = (x2 - x1).abs() * 1e-4;
    let x = root(|x| f1(x) - f2(x), x1, x2, tol).map_err(|_| GeometryError::NoIntersection)?;
    Ok(pt(x, f1(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_diagonals() {
        let l1 = Line::from_slope_intercept(1.0, 0.0);
        let l2 = Line::from_slope_intercept(-1.0, 2.0);
        let p = lines(&l1, &l2).unwrap();
        assert!(isclose(p, pt(1.0, 1.0)));
    }

    #[test]
    fn parallel_lines_fail() {
        let l1 = Line::from_slope_intercept(2.0, 0.0);
        let l2 = Line::from_slope_intercept(2.0, 5.0);
        assert_eq!(lines(&l1, &l2), Err(GeometryError::ParallelLines));
    }

    #[test]
    fn line_circle_vertical_branch() {
        let c = Circle::new(pt(0.0, 0.0), 1.0);
        let (p1, p2) = line_circle(&Line::vertical(0.0), &c).unwrap();
        assert!(isclose(p1, pt(0.0, 1.0)));
        assert!(isclose(p2, pt(0.0, -1.0)));
    }

    #[test]
    fn line_circle_tangent_and_miss() {
        let c = Circle::new(pt(0.0, 0.0), 1.0);
        let (p1, p2) = line_circle(&Line::horizontal(1.0), &c).unwrap();
        assert!(isclose(p1, p2));
        assert_eq!(
            line_circle(&Line::horizontal(2.0), &c),
            Err(GeometryError::NoIntersection)
        );
    }

    #[test]
    fn circles_two_one_none() {
        let c1 = Circle::new(pt(0.0, 0.0), 1.0);
        assert_eq!(circles(&c1, &Circle::new(pt(1.0, 0.0), 1.0)).len(), 2);
        assert_eq!(circles(&c1, &Circle::new(pt(2.0, 0.0), 1.0)), vec![pt(1.0, 0.0)]);
        assert!(circles(&c1, &Circle::new(pt(5.0, 0.0), 1.0)).is_empty());
        assert!(circles(&c1, &c1).is_empty());
    }

    #[test]
    fn tangent_circles_touch_once_despite_rounding() {
        // 0.7 + 0.1 rounds just below 0.8
        let big = Circle::new(pt(0.0, 0.0), 0.7);
        let outside = circles(&big, &Circle::new(pt(0.8, 0.0), 0.1));
        assert_eq!(outside.len(), 1);
        assert!(isclose(outside[0], pt(0.7, 0.0)));

        let inside = circles(&big, &Circle::new(pt(0.6, 0.0), 0.1));
        assert_eq!(inside.len(), 1);
        assert!(isclose(inside[0], pt(0.7, 0.0)));

        let unit = Circle::new(pt(0.0, 0.0), 1.0);
        let half = circles(&unit, &Circle::new(pt(0.5, 0.0), 0.5));
        assert_eq!(half.len(), 1);
        assert!(isclose(half[0], pt(1.0, 0.0)));
    }

    #[test]
    fn circle_intersection_is_symmetric() {
        let c1 = Circle::new(pt(0.0, 0.0), 2.0);
        let c2 = Circle::new(pt(1.5, 1.0), 1.5);
        let mut ab = circles(&c1, &c2);
        let mut ba = circles(&c2, &c1);
        let key = |p: &Point| (p.x * 1e6).round() as i64;
        ab.sort_by_key(key);
        ba.sort_by_key(key);
        assert_eq!(ab.len(), ba.len());
        for (p, q) in ab.iter().zip(&ba) {
            assert!((*p - *q).length() < 1e-9);
        }
    }

    #[test]
    fn arcs_filter_points() {
        let upper = Arc::new(pt(0.0, 0.0), 1.0, 0.0, 180.0);
        let other = Arc::new(pt(1.0, 0.0), 1.0, 0.0, 359.0);
        let pts = circle_arcs(&upper, &other);
        assert_eq!(pts.len(), 1);
        assert!(pts[0].y > 0.0);
        let hits = line_arc(&Line::horizontal(0.5), &upper);
        assert_eq!(hits.len(), 2);
        assert!(line_arc(&Line::horizontal(-0.5), &upper).is_empty());
    }

    #[test]
    fn function_crossing() {
        let p = functions(|x| x * x, |x| x + 2.0, 0.0, 5.0).unwrap();
        assert!((p.x - 2.0).abs() < 1e-3);
        assert_eq!(
            functions(|x| x * x + 5.0, |x| x, -1.0, 1.0),
            Err(GeometryError::NoIntersection)
        );
    }
}
