//! Geometric clipping against an axis-aligned rectangle.
//!
//! The SVG writer has no clip-path element to lean on, so primitives that cross the
//! clip rectangle are cut here before they are emitted.

use crate::types::{Point, ViewBox};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Segments per full turn when a curve has to be flattened
const CURVE_STEPS: usize = 96;

fn region_code(p: Point, rect: &ViewBox) -> u8 {
    let mut code = 0;
    if p.x < rect.x {
        code |= LEFT;
    } else if p.x > rect.right() {
        code |= RIGHT;
    }
    if p.y < rect.y {
        code |= BOTTOM;
    } else if p.y > rect.top() {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clip of one segment, `None` when it lies fully outside
pub(crate) fn clip_segment(mut a: Point, mut b: Point, rect: &ViewBox) -> Option<(Point, Point)> {
    let mut code_a = region_code(a, rect);
    let mut code_b = region_code(b, rect);
    loop {
        if code_a | code_b == 0 {
            return Some((a, b));
        }
        if code_a & code_b != 0 {
            return None;
        }
        let code = if code_a != 0 { code_a } else { code_b };
        let d = b - a;
        let p = if code & TOP != 0 {
            Point::new(a.x + d.x * (rect.top() - a.y) / d.y, rect.top())
        } else if code & BOTTOM != 0 {
            Point::new(a.x + d.x * (rect.y - a.y) / d.y, rect.y)
        } else if code & RIGHT != 0 {
            Point::new(rect.right(), a.y + d.y * (rect.right() - a.x) / d.x)
        } else {
            Point::new(rect.x, a.y + d.y * (rect.x - a.x) / d.x)
        };
        if code == code_a {
            a = p;
            code_a = region_code(a, rect);
        } else {
            b = p;
            code_b = region_code(b, rect);
        }
    }
}

/// Clip an open polyline, returning the pieces that remain inside
pub(crate) fn clip_polyline(points: &[Point], rect: &ViewBox) -> Vec<Vec<Point>> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], rect) {
            Some((a, b)) => {
                if current.last() != Some(&a) {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(a);
                }
                current.push(b);
            }
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Sutherland-Hodgman clip of a closed polygon
pub(crate) fn clip_polygon(points: &[Point], rect: &ViewBox) -> Vec<Point> {
    type Edge = (fn(Point, &ViewBox) -> bool, fn(Point, Point, &ViewBox) -> Point);
    let edges: [Edge; 4] = [
        (
            |p: Point, r: &ViewBox| p.x >= r.x,
            |a: Point, b: Point, r: &ViewBox| Point::new(r.x, a.y + (b.y - a.y) * (r.x - a.x) / (b.x - a.x)),
        ),
        (
            |p: Point, r: &ViewBox| p.x <= r.right(),
            |a: Point, b: Point, r: &ViewBox| Point::new(r.right(), a.y + (b.y - a.y) * (r.right() - a.x) / (b.x - a.x)),
        ),
        (
            |p: Point, r: &ViewBox| p.y >= r.y,
            |a: Point, b: Point, r: &ViewBox| Point::new(a.x + (b.x - a.x) * (r.y - a.y) / (b.y - a.y), r.y),
        ),
        (
            |p: Point, r: &ViewBox| p.y <= r.top(),
            |a: Point, b: Point, r: &ViewBox| Point::new(a.x + (b.x - a.x) * (r.top() - a.y) / (b.y - a.y), r.top()),
        ),
    ];

    let mut out = points.to_vec();
    for (inside, cross) in edges {
        if out.is_empty() {
            break;
        }
        let input = std::mem::take(&mut out);
        let mut prev = input[input.len() - 1];
        for &p in &input {
            match (inside(p, rect), inside(prev, rect)) {
                (true, true) => out.push(p),
                (true, false) => {
                    out.push(cross(prev, p, rect));
                    out.push(p);
                }
                (false, true) => out.push(cross(prev, p, rect)),
                (false, false) => {}
            }
            prev = p;
        }
    }
    out
}

/// Where a shape's bounding box sits relative to the clip rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Overlap {
    Inside,
    Outside,
    Partial,
}

pub(crate) fn overlap(bounds: &ViewBox, rect: &ViewBox) -> Overlap {
    if bounds.x >= rect.x
        && bounds.right() <= rect.right()
        && bounds.y >= rect.y
        && bounds.top() <= rect.top()
    {
        Overlap::Inside
    } else if bounds.x > rect.right()
        || bounds.right() < rect.x
        || bounds.y > rect.top()
        || bounds.top() < rect.y
    {
        Overlap::Outside
    } else {
        Overlap::Partial
    }
}

/// Points along an ellipse arc from `theta1` to `theta2` degrees (counter-clockwise)
pub(crate) fn flatten_arc(
    center: Point,
    rx: f64,
    ry: f64,
    rotation: f64,
    theta1: f64,
    theta2: f64,
) -> Vec<Point> {
    let sweep = theta2 - theta1;
    let steps = ((sweep.abs() / 360.0 * CURVE_STEPS as f64).ceil() as usize).max(2);
    let rot = Point::from_angle(rotation.to_radians());
    (0..=steps)
        .map(|i| {
            let t = (theta1 + sweep * i as f64 / steps as f64).to_radians();
            center + rot.rotate(Point::new(rx * t.cos(), ry * t.sin()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    fn unit() -> ViewBox {
        ViewBox::new(0.0, 0.0, 10.0, 10.0)
    }

    // ==================== Segment tests ====================

    #[test]
    fn segment_inside_is_untouched() {
        let (a, b) = clip_segment(pt(2.0, 2.0), pt(8.0, 8.0), &unit()).unwrap();
        assert_eq!((a, b), (pt(2.0, 2.0), pt(8.0, 8.0)));
    }

    #[test]
    fn segment_crossing_is_cut_at_the_edge() {
        let (a, b) = clip_segment(pt(-5.0, 5.0), pt(15.0, 5.0), &unit()).unwrap();
        assert_eq!((a, b), (pt(0.0, 5.0), pt(10.0, 5.0)));
        assert!(clip_segment(pt(-5.0, -1.0), pt(15.0, -1.0), &unit()).is_none());
    }

    // ==================== Polyline tests ====================

    #[test]
    fn polyline_leaving_and_reentering_splits() {
        let runs = clip_polyline(
            &[pt(1.0, 1.0), pt(5.0, 20.0), pt(9.0, 1.0)],
            &unit(),
        );
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0], pt(1.0, 1.0));
        assert_eq!(runs[1].last(), Some(&pt(9.0, 1.0)));
    }

    // ==================== Polygon tests ====================

    #[test]
    fn polygon_is_cut_to_the_rectangle() {
        let square = [pt(5.0, 5.0), pt(15.0, 5.0), pt(15.0, 15.0), pt(5.0, 15.0)];
        let clipped = clip_polygon(&square, &unit());
        assert_eq!(clipped.len(), 4);
        for p in clipped {
            assert!(p.x >= 5.0 && p.x <= 10.0 && p.y >= 5.0 && p.y <= 10.0);
        }
    }

    #[test]
    fn overlap_classifies_bounds() {
        let r = unit();
        assert_eq!(overlap(&ViewBox::new(1.0, 1.0, 2.0, 2.0), &r), Overlap::Inside);
        assert_eq!(overlap(&ViewBox::new(20.0, 1.0, 2.0, 2.0), &r), Overlap::Outside);
        assert_eq!(overlap(&ViewBox::new(9.0, 9.0, 2.0, 2.0), &r), Overlap::Partial);
    }

    #[test]
    fn flattened_arc_ends_on_the_angles() {
        let pts = flatten_arc(pt(0.0, 0.0), 2.0, 2.0, 0.0, 0.0, 90.0);
        assert!((pts[0] - pt(2.0, 0.0)).length() < 1e-12);
        assert!((pts[pts.len() - 1] - pt(0.0, 2.0)).length() < 1e-12);
    }
}
