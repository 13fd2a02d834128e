//! Constant-resistance and constant-reactance curves for Smith charts.

use crate::errors::RenderError;
use crate::render::{FillStyle, StrokeStyle};
use crate::smith::{SmithArc, const_react_arc, const_resist_circle};
use crate::types::DataRange;

use super::{Common, Component, DrawContext, skip_degenerate};

/// Draw a Smith-chart circle or arc; returns false when it has no drawable geometry
pub(crate) fn draw_smith_arc(ctx: &mut DrawContext<'_>, arc: &SmithArc, stroke: &StrokeStyle) -> bool {
    if !arc.is_drawable() {
        return false;
    }
    let radius = arc.radius.abs();
    match arc.span {
        Some((theta1, theta2)) => ctx.arc(arc.center, radius, theta1, theta2, stroke),
        None => ctx.circle(arc.center, radius, &FillStyle::none(), stroke),
    }
    true
}

/// Circle of constant normalized resistance
#[derive(Clone, Debug, PartialEq)]
pub struct SmithConstResistance {
    common: Common,
    resistance: f64,
    xmin: f64,
    xmax: f64,
}

impl SmithConstResistance {
    /// Full circle of resistance `r` (0 to infinity)
    pub fn new(resistance: f64) -> Self {
        SmithConstResistance {
            common: Common::default(),
            resistance,
            xmin: f64::NEG_INFINITY,
            xmax: f64::INFINITY,
        }
    }

    /// Trim the circle to where it crosses reactances `xmin` and `xmax`
    pub fn between(mut self, xmin: f64, xmax: f64) -> Self {
        self.xmin = xmin;
        self.xmax = xmax;
        self
    }

    pub fn arc(&self) -> SmithArc {
        const_resist_circle(self.resistance, self.xmin, self.xmax)
    }
}

impl Component for SmithConstResistance {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        DataRange::unbounded()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let stroke = StrokeStyle::line(&ctx.style);
        if !draw_smith_arc(ctx, &self.arc(), &stroke) {
            skip_degenerate("smith resistance", &self.common);
        }
        Ok(())
    }
}

/// Pair of arcs of constant normalized reactance `+x` and `-x`
#[derive(Clone, Debug, PartialEq)]
pub struct SmithConstReactance {
    common: Common,
    reactance: f64,
    rmin: f64,
    rmax: f64,
}

impl SmithConstReactance {
    /// Arcs for reactance `|x|`, running from the outer circle to the open-circuit point
    pub fn new(reactance: f64) -> Self {
        SmithConstReactance {
            common: Common::default(),
            reactance: reactance.abs(),
            rmin: 0.0,
            rmax: f64::INFINITY,
        }
    }

    /// Trim the arcs to where they cross resistances `rmin` and `rmax`
    pub fn between(mut self, rmin: f64, rmax: f64) -> Self {
        self.rmin = rmin;
        self.rmax = rmax;
        self
    }

    /// The inductive (upper) arc; the capacitive one is its mirror image
    pub fn arc(&self) -> SmithArc {
        const_react_arc(self.reactance, self.rmin, self.rmax)
    }
}

impl Component for SmithConstReactance {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        DataRange::unbounded()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let stroke = StrokeStyle::line(&ctx.style);
        let arc = self.arc();
        let upper = draw_smith_arc(ctx, &arc, &stroke);
        let lower = draw_smith_arc(ctx, &arc.mirrored(), &stroke);
        if !(upper || lower) {
            skip_degenerate("smith reactance", &self.common);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Primitive, Recorder};
    use crate::style::{Color, Theme};
    use crate::types::{Transform, ViewBox, pt};

    fn draw(component: &dyn Component) -> Recorder {
        let theme = Theme::default();
        let mut rec = Recorder::new();
        let databox = ViewBox::new(-1.0, -1.0, 2.0, 2.0);
        let diagbox = ViewBox::new(0.0, 0.0, 200.0, 200.0);
        let mut ctx = DrawContext {
            drawing: &mut rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: component.resolved_style(&theme, &Color::Rgb(1, 2, 3)),
        };
        component.draw(&mut ctx).unwrap();
        rec
    }

    #[test]
    fn full_resistance_circle() {
        let rec = draw(&SmithConstResistance::new(1.0));
        match &rec.primitives()[0] {
            Primitive::Circle {
                center,
                radius,
                stroke,
                ..
            } => {
                assert_eq!(*center, pt(150.0, 100.0));
                assert_eq!(*radius, 50.0);
                assert_eq!(stroke.color, Color::Rgb(1, 2, 3));
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn trimmed_resistance_is_an_arc() {
        let rec = draw(&SmithConstResistance::new(1.0).between(-1.0, 1.0));
        assert_eq!(rec.count(|p| matches!(p, Primitive::Arc { .. })), 1);
    }

    #[test]
    fn reactance_draws_both_signs() {
        let component = SmithConstReactance::new(-1.0);
        assert_eq!(component.arc().center, pt(1.0, 1.0));
        let rec = draw(&component);
        let centers: Vec<_> = rec
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Arc { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![pt(200.0, 200.0), pt(200.0, 0.0)]);
    }

    #[test]
    fn smith_curves_do_not_constrain_range() {
        assert_eq!(SmithConstReactance::new(1.0).datarange(), DataRange::unbounded());
        assert_eq!(SmithConstResistance::new(1.0).datarange(), DataRange::unbounded());
    }
}
