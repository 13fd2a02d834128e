//! Filled and outlined geometric shapes in data coordinates.

use crate::errors::RenderError;
use crate::geometry::{Arc, Circle, Ellipse};
use crate::render::{FillStyle, StrokeStyle};
use crate::style::{Style, Theme};
use crate::types::{DataRange, Point};

use super::{Common, Component, DrawContext, skip_degenerate};

fn fill(style: &Style) -> FillStyle {
    FillStyle::new(style.color.clone()).opacity(style.opacity)
}

/// Circle with a fill and an outline
#[derive(Clone, Debug, PartialEq)]
pub struct CircleShape {
    common: Common,
    circle: Circle,
}

impl CircleShape {
    pub fn new(center: Point, radius: f64) -> Self {
        CircleShape {
            common: Common::default(),
            circle: Circle::new(center, radius),
        }
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }
}

impl Component for CircleShape {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.shape.clone()
    }

    fn steps_color(&self) -> bool {
        false
    }

    fn datarange(&self) -> DataRange {
        self.circle.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let Circle { center, radius } = self.circle;
        if !(center.is_finite() && radius.is_finite()) {
            skip_degenerate("circle", &self.common);
            return Ok(());
        }
        let stroke = StrokeStyle::outline(&ctx.style);
        ctx.circle(center, radius, &fill(&ctx.style), &stroke);
        Ok(())
    }
}

/// Open circular arc
#[derive(Clone, Debug, PartialEq)]
pub struct ArcShape {
    common: Common,
    arc: Arc,
}

impl ArcShape {
    /// Arc counter-clockwise from `theta1` to `theta2` degrees
    pub fn new(center: Point, radius: f64, theta1: f64, theta2: f64) -> Self {
        ArcShape {
            common: Common::default(),
            arc: Arc::new(center, radius, theta1, theta2),
        }
    }

    /// Arc starting at `theta` and spanning `width` degrees
    pub fn compass(center: Point, radius: f64, theta: f64, width: f64) -> Self {
        ArcShape::new(center, radius, theta, theta + width)
    }

    pub fn arc(&self) -> &Arc {
        &self.arc
    }
}

impl Component for ArcShape {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.shape.clone()
    }

    fn steps_color(&self) -> bool {
        false
    }

    fn datarange(&self) -> DataRange {
        self.arc.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let Arc {
            center,
            radius,
            theta1,
            theta2,
        } = self.arc;
        if ![center.x, center.y, radius, theta1, theta2].iter().all(|v| v.is_finite()) {
            skip_degenerate("arc", &self.common);
            return Ok(());
        }
        let stroke = StrokeStyle::outline(&ctx.style);
        ctx.arc(center, radius, theta1, theta2, &stroke);
        Ok(())
    }
}

/// Ellipse with a fill and an outline
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseShape {
    common: Common,
    ellipse: Ellipse,
}

impl EllipseShape {
    /// Radii `r1` and `r2` along the local axes, rotated `rotation` degrees
    pub fn new(center: Point, r1: f64, r2: f64, rotation: f64) -> Self {
        EllipseShape {
            common: Common::default(),
            ellipse: Ellipse::new(center, r1, r2, rotation),
        }
    }

    pub fn ellipse(&self) -> &Ellipse {
        &self.ellipse
    }
}

impl Component for EllipseShape {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.shape.clone()
    }

    fn steps_color(&self) -> bool {
        false
    }

    fn datarange(&self) -> DataRange {
        self.ellipse.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let e = &self.ellipse;
        if ![e.center.x, e.center.y, e.r1, e.r2, e.rotation].iter().all(|v| v.is_finite()) {
            skip_degenerate("ellipse", &self.common);
            return Ok(());
        }
        let stroke = StrokeStyle::outline(&ctx.style);
        ctx.ellipse(e, &fill(&ctx.style), &stroke);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Primitive, Recorder};
    use crate::style::Color;
    use crate::types::{Transform, ViewBox, pt};

    fn draw(component: &dyn Component, databox: ViewBox) -> Recorder {
        let theme = Theme::default();
        let mut rec = Recorder::new();
        let diagbox = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let mut ctx = DrawContext {
            drawing: &mut rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: component.resolved_style(&theme, &Color::Rgb(9, 9, 9)),
        };
        component.draw(&mut ctx).unwrap();
        rec
    }

    // ==================== Circle tests ====================

    #[test]
    fn circle_keeps_theme_color_and_draws_natively() {
        let circle = CircleShape::new(pt(5.0, 5.0), 2.0);
        assert!(!circle.steps_color());
        assert_eq!(circle.datarange(), DataRange::new(3.0, 7.0, 3.0, 7.0));

        let rec = draw(&circle, ViewBox::new(0.0, 0.0, 10.0, 10.0));
        match &rec.primitives()[0] {
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                assert_eq!(*center, pt(50.0, 50.0));
                assert_eq!(*radius, 20.0);
                assert_eq!(fill.color, Color::None);
                assert_eq!(stroke.color, Theme::default().shape.edge_color);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn circle_becomes_ellipse_on_stretched_axes() {
        let circle = CircleShape::new(pt(5.0, 5.0), 1.0);
        let rec = draw(&circle, ViewBox::new(0.0, 0.0, 10.0, 20.0));
        match rec.primitives()[0] {
            Primitive::Ellipse { rx, ry, .. } => assert_eq!((rx, ry), (10.0, 5.0)),
            ref other => panic!("expected an ellipse, got {other:?}"),
        }
    }

    // ==================== Arc and ellipse tests ====================

    #[test]
    fn arc_wraps_past_zero() {
        let arc = ArcShape::new(pt(0.0, 0.0), 1.0, 270.0, 90.0);
        let rec = draw(&arc, ViewBox::new(-5.0, -5.0, 10.0, 10.0));
        match &rec.primitives()[0] {
            Primitive::Arc { theta1, theta2, .. } => assert_eq!((*theta1, *theta2), (270.0, 450.0)),
            other => panic!("expected an arc, got {other:?}"),
        }
    }

    #[test]
    fn rotated_ellipse_on_stretched_axes_is_traced() {
        let ellipse = EllipseShape::new(pt(0.0, 0.0), 2.0, 1.0, 30.0);
        let rec = draw(&ellipse, ViewBox::new(-5.0, -10.0, 10.0, 20.0));
        assert_eq!(rec.count(|p| matches!(p, Primitive::Polygon { .. })), 1);
    }

    #[test]
    fn nan_radius_is_skipped() {
        let circle = CircleShape::new(pt(0.0, 0.0), f64::NAN);
        let rec = draw(&circle, ViewBox::new(0.0, 0.0, 1.0, 1.0));
        assert!(rec.primitives().is_empty());
    }
}
