//! Smith-chart conformal mapping.
//!
//! Curves of constant normalized resistance are circles tangent at `(1, 0)`; curves of
//! constant reactance are arcs centered on the vertical line `x = 1`. Both are returned
//! as [`SmithArc`]s in the chart's own `[-1, 1]²` coordinate space.

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::geometry::{Circle, intersect};
use crate::types::{Point, pt};

const INF: f64 = f64::INFINITY;

/// A circle or circular arc in Smith-chart coordinates.
///
/// `span` holds the start and end angles in degrees, counter-clockwise. `None` means the
/// full circle. A NaN angle marks an arc whose end could not be located; such arcs are
/// not drawable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmithArc {
    pub center: Point,
    pub radius: f64,
    pub span: Option<(f64, f64)>,
}

impl SmithArc {
    /// Whether the arc can be drawn at all
    pub fn is_drawable(&self) -> bool {
        self.center.is_finite()
            && self.radius.is_finite()
            && self.span.is_none_or(|(t1, t2)| t1.is_finite() && t2.is_finite())
    }

    /// Point at `theta` degrees around the arc's circle
    pub fn point_at(&self, theta: f64) -> Point {
        let t = theta.to_radians();
        pt(
            self.center.x + self.radius * t.cos(),
            self.center.y + self.radius * t.sin(),
        )
    }

    /// Reflection across the real axis, which maps reactance `x` to `-x`
    pub fn mirrored(&self) -> SmithArc {
        SmithArc {
            center: pt(self.center.x, -self.center.y),
            radius: self.radius,
            span: self.span.map(|(t1, t2)| (-t2, -t1)),
        }
    }
}

/// Angle (degrees) around the circle at `c1` where it meets the circle at `c2`.
///
/// On a Smith chart one of the two intersections is always the tangent point at angle
/// zero, so the one with the larger magnitude is returned.
pub fn circle_intersect_theta(c1: Point, r1: f64, c2: Point, r2: f64) -> Option<f64> {
    let hits = intersect::circles(&Circle::new(c1, r1), &Circle::new(c2, r2));
    hits.into_iter()
        .map(|p| (p.y - c1.y).atan2(p.x - c1.x))
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map(f64::to_degrees)
}

fn resist_center_radius(r: f64) -> (f64, f64) {
    if r == 0.0 {
        (0.0, 1.0)
    } else if r.is_finite() {
        let left = 2.0 / (1.0 / r + 1.0) - 1.0;
        ((left + 1.0) / 2.0, (left - 1.0).abs() / 2.0)
    } else {
        (1.0, 0.0)
    }
}

/// Angle around the resistance circle centered at `cx` where reactance `x` crosses it
fn reactance_crossing(x: f64, r: f64, cx: f64) -> f64 {
    let p = if x.is_finite() {
        let arc = const_react_arc(x.abs(), r, INF);
        match arc.span {
            Some((t1, _)) => arc.point_at(t1),
            None => pt(f64::NAN, f64::NAN),
        }
    } else {
        // Infinite reactance collapses onto the open-circuit point
        pt(1.0, 0.0)
    };
    p.y.atan2(p.x - cx).to_degrees()
}

/// Circle of constant resistance `r`, optionally trimmed to reactances in `[xmin, xmax]`
pub fn const_resist_circle(r: f64, xmin: f64, xmax: f64) -> SmithArc {
    let (cx, radius) = resist_center_radius(r);
    let center = pt(cx, 0.0);
    if !(xmin.is_finite() || xmax.is_finite()) {
        return SmithArc {
            center,
            radius,
            span: None,
        };
    }

    let mut theta1 = if xmin == 0.0 {
        180.0
    } else {
        let t = reactance_crossing(xmin, r, cx);
        if xmin < 0.0 { -t } else { t }
    };
    let mut theta2 = if xmax == 0.0 {
        180.0
    } else {
        reactance_crossing(xmax, r, cx)
    };
    if xmax != 0.0 && xmax < 0.0 {
        theta2 = -theta2;
        std::mem::swap(&mut theta1, &mut theta2);
    }

    SmithArc {
        center,
        radius,
        span: Some((theta2, theta1)),
    }
}

/// Arc of constant reactance `x` between the resistance circles `rmin` and `rmax`.
///
/// With an infinite `rmax` the arc runs to the open-circuit point at 270°.
pub fn const_react_arc(x: f64, rmin: f64, rmax: f64) -> SmithArc {
    let radius = 1.0 / x;
    let center = pt(1.0, radius);

    let (c1, r1) = if rmin == 0.0 {
        (0.0, 1.0)
    } else {
        resist_center_radius(rmin)
    };
    let theta1 = circle_intersect_theta(center, radius.abs(), pt(c1, 0.0), r1).unwrap_or(f64::NAN);
    let theta2 = if rmax.is_finite() {
        let (c2, r2) = resist_center_radius(rmax);
        circle_intersect_theta(center, radius.abs(), pt(c2, 0.0), r2).unwrap_or(f64::NAN)
    } else {
        270.0
    };

    SmithArc {
        center,
        radius,
        span: Some((theta1, theta2)),
    }
}

/// One grid line: a resistance circle or reactance arc of `value`, trimmed to the
/// crossing values `min..max` of the other family
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub value: f64,
    pub max: f64,
    pub min: f64,
    pub major: bool,
}

const fn g(value: f64, max: f64, min: f64, major: bool) -> GridLine {
    GridLine {
        value,
        max,
        min,
        major,
    }
}

/// Grid lines for a Smith chart background
#[derive(Clone, Copy, Debug)]
pub struct SmithGrid {
    pub circles: &'static [GridLine],
    pub arcs: &'static [GridLine],
}

/// Density of the Smith-chart background grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SmithGridLevel {
    #[default]
    Coarse,
    Medium,
    Fine,
    ExtraFine,
}

impl SmithGridLevel {
    pub const ALL: [SmithGridLevel; 4] = [
        SmithGridLevel::Coarse,
        SmithGridLevel::Medium,
        SmithGridLevel::Fine,
        SmithGridLevel::ExtraFine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SmithGridLevel::Coarse => "coarse",
            SmithGridLevel::Medium => "medium",
            SmithGridLevel::Fine => "fine",
            SmithGridLevel::ExtraFine => "extrafine",
        }
    }

    pub fn grid(&self) -> SmithGrid {
        match self {
            SmithGridLevel::Coarse => SmithGrid {
                circles: COARSE_CIRCLES,
                arcs: COARSE_ARCS,
            },
            SmithGridLevel::Medium => SmithGrid {
                circles: MEDIUM_CIRCLES,
                arcs: MEDIUM_ARCS,
            },
            SmithGridLevel::Fine => SmithGrid {
                circles: FINE_CIRCLES,
                arcs: FINE_ARCS,
            },
            SmithGridLevel::ExtraFine => SmithGrid {
                circles: EXTRAFINE_CIRCLES,
                arcs: EXTRAFINE_ARCS,
            },
        }
    }
}

impl fmt::Display for SmithGridLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SmithGridLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SmithGridLevel::ALL
            .into_iter()
            .find(|level| level.name() == s)
            .ok_or_else(|| ConfigError::UnknownSmithGrid {
                name: s.to_string(),
                valid: SmithGridLevel::ALL
                    .iter()
                    .map(SmithGridLevel::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

// ============================================================================
// Grid tables
// ============================================================================

const COARSE_CIRCLES: &[GridLine] = &[
    g(0.2, 2.0, 0.0, true), g(0.5, 5.0, 0.0, true), g(1.0, 5.0, 0.0, true),
    g(2.0, INF, 0.0, true), g(5.0, INF, 0.0, true),
];

const COARSE_ARCS: &[GridLine] = &[
    g(0.2, 2.0, 0.0, true), g(0.5, 2.0, 0.0, true), g(1.0, 5.0, 0.0, true),
    g(2.0, 5.0, 0.0, true), g(5.0, INF, 0.0, true),
];

const MEDIUM_CIRCLES: &[GridLine] = &[
    g(0.1, 2.0, 0.0, true), g(0.3, 2.0, 0.0, true), g(0.5, 3.0, 0.0, true),
    g(1.0, 3.0, 0.0, true), g(1.5, 5.0, 0.0, true), g(2.0, 5.0, 0.0, true),
    g(3.0, 10.0, 0.0, true), g(4.0, 10.0, 0.0, true), g(5.0, 10.0, 0.0, true),
    g(10.0, 20.0, 0.0, true), g(20.0, INF, 0.0, true),
];

const MEDIUM_ARCS: &[GridLine] = &[
    g(0.2, 2.0, 0.0, true), g(0.4, 3.0, 0.0, true), g(0.6, 3.0, 0.0, true),
    g(0.8, 3.0, 0.0, true), g(1.0, 5.0, 0.0, true), g(1.5, 5.0, 0.0, true),
    g(2.0, 5.0, 0.0, true), g(3.0, 10.0, 0.0, true), g(4.0, 10.0, 0.0, true),
    g(5.0, 10.0, 0.0, true), g(10.0, 20.0, 0.0, true), g(20.0, INF, 0.0, true),
];

const FINE_CIRCLES: &[GridLine] = &[
    g(0.1, 1.0, 0.0, false), g(0.2, 2.0, 0.0, true), g(0.3, 1.0, 0.0, false),
    g(0.4, 5.0, 0.0, true), g(0.5, 1.0, 0.0, false), g(0.6, 2.0, 0.0, true),
    g(0.7, 1.0, 0.0, false), g(0.8, 2.0, 0.0, true), g(0.9, 1.0, 0.0, false),
    g(1.0, 10.0, 0.0, true), g(1.2, 2.0, 0.0, true), g(1.4, 5.0, 0.0, true),
    g(1.6, 2.0, 0.0, true), g(1.8, 2.0, 0.0, false), g(2.0, 10.0, 0.0, true),
    g(2.5, 5.0, 0.0, false), g(3.0, 5.0, 0.0, true), g(4.0, 10.0, 0.0, true),
    g(5.0, 10.0, 0.0, true), g(6.0, 10.0, 0.0, false), g(7.0, 10.0, 0.0, false),
    g(8.0, 10.0, 0.0, false), g(9.0, 10.0, 0.0, false), g(10.0, 20.0, 0.0, true),
    g(20.0, INF, 0.0, true),
];

const FINE_ARCS: &[GridLine] = &[
    g(0.1, 1.0, 0.0, false), g(0.2, 2.0, 0.0, true), g(0.3, 1.0, 0.0, false),
    g(0.4, 5.0, 0.0, true), g(0.5, 1.0, 0.0, false), g(0.6, 2.0, 0.0, true),
    g(0.7, 1.0, 0.0, false), g(0.8, 2.0, 0.0, true), g(0.9, 1.0, 0.0, false),
    g(1.0, 10.0, 0.0, true), g(1.2, 2.0, 0.0, true), g(1.4, 4.0, 0.0, true),
    g(1.6, 2.0, 0.0, true), g(1.8, 2.0, 0.0, false), g(2.0, 10.0, 0.0, true),
    g(2.5, 5.0, 0.0, false), g(3.0, 10.0, 0.0, true), g(3.5, 5.0, 0.0, false),
    g(4.0, 10.0, 0.0, true), g(5.0, 20.0, 0.0, true), g(6.0, 10.0, 0.0, false),
    g(7.0, 10.0, 0.0, false), g(8.0, 10.0, 0.0, false), g(9.0, 10.0, 0.0, false),
    g(10.0, 20.0, 0.0, true), g(15.0, 20.0, 0.0, false), g(20.0, INF, 0.0, true),
];

const EXTRAFINE_CIRCLES: &[GridLine] = &[
    g(0.01, 0.2, 0.0, false), g(0.02, 0.5, 0.0, false), g(0.03, 0.2, 0.0, false),
    g(0.04, 0.5, 0.0, false), g(0.05, 0.2, 0.0, false), g(0.06, 0.5, 0.0, false),
    g(0.07, 0.2, 0.0, false), g(0.08, 0.5, 0.0, false), g(0.09, 0.2, 0.0, false),
    g(0.1, 2.0, 0.0, true), g(0.11, 0.2, 0.0, false), g(0.12, 0.5, 0.0, false),
    g(0.13, 0.2, 0.0, false), g(0.14, 0.5, 0.0, false), g(0.15, 0.2, 0.0, false),
    g(0.16, 0.5, 0.0, false), g(0.17, 0.2, 0.0, false), g(0.18, 0.5, 0.0, false),
    g(0.19, 0.2, 0.0, false), g(0.2, 5.0, 0.0, true), g(0.22, 0.5, 0.0, false),
    g(0.24, 0.5, 0.0, false), g(0.26, 0.5, 0.0, false), g(0.28, 0.5, 0.0, false),
    g(0.3, 2.0, 0.0, true), g(0.32, 0.5, 0.0, false), g(0.34, 0.5, 0.0, false),
    g(0.36, 0.5, 0.0, false), g(0.38, 0.5, 0.0, false), g(0.4, 5.0, 0.0, true),
    g(0.42, 0.5, 0.0, false), g(0.44, 0.5, 0.0, false), g(0.46, 0.5, 0.0, false),
    g(0.48, 0.5, 0.0, false), g(0.5, 2.0, 0.0, true), g(0.55, 1.0, 0.0, false),
    g(0.6, 5.0, 0.0, true), g(0.65, 1.0, 0.0, false), g(0.7, 2.0, 0.0, true),
    g(0.75, 1.0, 0.0, false), g(0.8, 5.0, 0.0, true), g(0.85, 1.0, 0.0, false),
    g(0.9, 2.0, 0.0, true), g(0.95, 1.0, 0.0, false), g(1.0, 10.0, 0.0, true),
    g(0.05, 1.0, 0.5, false), g(0.15, 1.0, 0.5, false), g(0.25, 1.0, 0.5, false),
    g(0.35, 1.0, 0.5, false), g(0.45, 1.0, 0.5, false), g(1.1, 2.0, 0.0, false),
    g(1.2, 5.0, 0.0, true), g(1.3, 2.0, 0.0, false), g(1.4, 5.0, 0.0, true),
    g(1.5, 2.0, 0.0, false), g(1.6, 5.0, 0.0, true), g(1.7, 2.0, 0.0, false),
    g(1.8, 5.0, 0.0, true), g(1.9, 2.0, 0.0, false), g(2.0, 20.0, 0.0, true),
    g(2.2, 5.0, 0.0, false), g(2.4, 5.0, 0.0, false), g(2.6, 5.0, 0.0, false),
    g(2.8, 5.0, 0.0, false), g(3.0, 10.0, 0.0, true), g(3.2, 5.0, 0.0, false),
    g(3.4, 5.0, 0.0, false), g(3.6, 5.0, 0.0, false), g(3.8, 5.0, 0.0, false),
    g(4.0, 20.0, 0.0, true), g(4.2, 5.0, 0.0, false), g(4.4, 5.0, 0.0, false),
    g(4.6, 5.0, 0.0, false), g(4.8, 5.0, 0.0, false), g(5.0, 10.0, 0.0, true),
    g(6.0, 20.0, 0.0, false), g(7.0, 10.0, 0.0, false), g(8.0, 20.0, 0.0, false),
    g(9.0, 10.0, 0.0, false), g(10.0, INF, 0.0, true), g(12.0, 20.0, 0.0, false),
    g(14.0, 20.0, 0.0, false), g(16.0, 20.0, 0.0, false), g(18.0, 20.0, 0.0, false),
    g(20.0, 50.0, 0.0, true), g(30.0, 50.0, 0.0, false), g(40.0, 50.0, 0.0, false),
    g(50.0, INF, 0.0, true),
];

const EXTRAFINE_ARCS: &[GridLine] = &[
    g(0.01, 0.2, 0.0, false), g(0.02, 0.5, 0.0, false), g(0.03, 0.2, 0.0, false),
    g(0.04, 0.5, 0.0, false), g(0.05, 0.2, 0.0, false), g(0.06, 0.5, 0.0, false),
    g(0.07, 0.2, 0.0, false), g(0.08, 0.5, 0.0, false), g(0.09, 0.2, 0.0, false),
    g(0.1, 2.0, 0.0, true), g(0.11, 0.2, 0.0, false), g(0.12, 0.5, 0.0, false),
    g(0.13, 0.2, 0.0, false), g(0.14, 0.5, 0.0, false), g(0.15, 0.2, 0.0, false),
    g(0.16, 0.5, 0.0, false), g(0.17, 0.2, 0.0, false), g(0.18, 0.5, 0.0, false),
    g(0.19, 0.2, 0.0, false), g(0.2, 5.0, 0.0, true), g(0.22, 0.5, 0.0, false),
    g(0.24, 0.5, 0.0, false), g(0.26, 0.5, 0.0, false), g(0.28, 0.5, 0.0, false),
    g(0.3, 2.0, 0.0, true), g(0.32, 0.5, 0.0, false), g(0.34, 0.5, 0.0, false),
    g(0.36, 0.5, 0.0, false), g(0.38, 0.5, 0.0, false), g(0.4, 5.0, 0.0, true),
    g(0.42, 0.5, 0.0, false), g(0.44, 0.5, 0.0, false), g(0.46, 0.5, 0.0, false),
    g(0.48, 0.5, 0.0, false), g(0.5, 2.0, 0.0, true), g(0.55, 1.0, 0.0, false),
    g(0.6, 5.0, 0.0, true), g(0.65, 1.0, 0.0, false), g(0.7, 2.0, 0.0, true),
    g(0.75, 1.0, 0.0, false), g(0.8, 5.0, 0.0, true), g(0.85, 1.0, 0.0, false),
    g(0.9, 2.0, 0.0, true), g(0.95, 1.0, 0.0, false), g(1.0, 10.0, 0.0, true),
    g(0.05, 1.0, 0.5, false), g(0.15, 1.0, 0.5, false), g(0.25, 1.0, 0.5, false),
    g(0.35, 1.0, 0.5, false), g(0.45, 1.0, 0.5, false), g(0.55, 1.0, 0.5, false),
    g(1.1, 2.0, 0.0, false), g(1.2, 5.0, 0.0, true), g(1.3, 2.0, 0.0, false),
    g(1.4, 5.0, 0.0, true), g(1.5, 2.0, 0.0, false), g(1.6, 5.0, 0.0, true),
    g(1.7, 2.0, 0.0, false), g(1.8, 5.0, 0.0, true), g(1.9, 2.0, 0.0, false),
    g(2.0, 20.0, 0.0, true), g(2.2, 5.0, 0.0, false), g(2.4, 5.0, 0.0, false),
    g(2.6, 5.0, 0.0, false), g(2.8, 5.0, 0.0, false), g(3.0, 10.0, 0.0, true),
    g(3.2, 5.0, 0.0, false), g(3.4, 5.0, 0.0, false), g(3.6, 5.0, 0.0, false),
    g(3.8, 5.0, 0.0, false), g(4.0, 20.0, 0.0, true), g(4.2, 5.0, 0.0, false),
    g(4.4, 5.0, 0.0, false), g(4.6, 5.0, 0.0, false), g(4.8, 5.0, 0.0, false),
    g(5.0, 10.0, 0.0, true), g(6.0, 20.0, 0.0, false), g(7.0, 10.0, 0.0, false),
    g(8.0, 20.0, 0.0, false), g(9.0, 10.0, 0.0, false), g(10.0, 20.0, 0.0, true),
    g(12.0, INF, 0.0, false), g(14.0, 20.0, 0.0, false), g(16.0, 20.0, 0.0, false),
    g(18.0, 20.0, 0.0, false), g(20.0, 50.0, 0.0, true), g(30.0, 50.0, 0.0, false),
    g(40.0, 50.0, 0.0, false), g(50.0, INF, 0.0, true),
];


#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== Resistance circle tests ====================

    #[test]
    fn unit_resistance_circle() {
        let arc = const_resist_circle(1.0, -INF, INF);
        assert!(close(arc.center.x, 0.5));
        assert_eq!(arc.center.y, 0.0);
        assert!(close(arc.radius, 0.5));
        assert_eq!(arc.span, None);
    }

    #[test]
    fn zero_and_infinite_resistance() {
        let zero = const_resist_circle(0.0, -INF, INF);
        assert_eq!((zero.center.x, zero.radius), (0.0, 1.0));
        let inf = const_resist_circle(INF, -INF, INF);
        assert_eq!((inf.center.x, inf.radius), (1.0, 0.0));
    }

    #[test]
    fn resistance_trimmed_symmetric() {
        let arc = const_resist_circle(1.0, -1.0, 1.0);
        let (t1, t2) = arc.span.unwrap();
        // x = ±1 meets r = 1 at (0.2, ±0.4)
        assert!(close(t1, 126.869_897_645_844));
        assert!(close(t2, -126.869_897_645_844));
        assert!(arc.is_drawable());
    }

    #[test]
    fn resistance_trim_from_zero() {
        let arc = const_resist_circle(1.0, 0.0, 1.0);
        let (t1, t2) = arc.span.unwrap();
        assert!(close(t1, 126.869_897_645_844));
        assert_eq!(t2, 180.0);
    }

    // ==================== Reactance arc tests ====================

    #[test]
    fn unit_reactance_arc() {
        let arc = const_react_arc(1.0, 0.0, INF);
        assert_eq!(arc.center, pt(1.0, 1.0));
        assert_eq!(arc.radius, 1.0);
        let (t1, t2) = arc.span.unwrap();
        // Meets the unit circle at (0, 1)
        assert!(close(t1.abs(), 180.0));
        assert_eq!(t2, 270.0);
        let p = arc.point_at(t1);
        assert!(close(p.x, 0.0) && close(p.y, 1.0));
    }

    #[test]
    fn reactance_to_finite_rmax() {
        let arc = const_react_arc(1.0, 0.0, 1.0);
        let (_, t2) = arc.span.unwrap();
        // x = 1 meets r = 1 at (0.2, 0.4)
        let p = arc.point_at(t2);
        assert!(close(p.x, 0.2) && close(p.y, 0.4));
    }

    #[test]
    fn mirrored_arc_negates_span() {
        let arc = const_react_arc(2.0, 0.0, INF).mirrored();
        assert_eq!(arc.center, pt(1.0, -0.5));
        let (t1, t2) = arc.span.unwrap();
        assert_eq!(t1, -270.0);
        assert!(t2 < 0.0);
    }

    // ==================== Grid level tests ====================

    #[test]
    fn grid_level_parsing() {
        assert_eq!("fine".parse::<SmithGridLevel>(), Ok(SmithGridLevel::Fine));
        assert_eq!(
            "extrafine".parse::<SmithGridLevel>(),
            Ok(SmithGridLevel::ExtraFine)
        );
        let err = "huge".parse::<SmithGridLevel>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownSmithGrid {
                name: "huge".into(),
                valid: "coarse, medium, fine, extrafine".into(),
            }
        );
    }

    #[test]
    fn grid_table_sizes() {
        let sizes: Vec<(usize, usize)> = SmithGridLevel::ALL
            .iter()
            .map(|l| (l.grid().circles.len(), l.grid().arcs.len()))
            .collect();
        assert_eq!(sizes, vec![(5, 5), (11, 12), (25, 27), (88, 89)]);
    }

    #[test]
    fn every_grid_line_has_a_drawable_arc() {
        for level in SmithGridLevel::ALL {
            for line in level.grid().arcs {
                let arc = const_react_arc(line.value, line.min, line.max);
                assert!(arc.is_drawable(), "{level} arc {}", line.value);
            }
        }
    }
}
