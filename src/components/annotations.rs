//! Free-standing text placed in data coordinates.

use crate::errors::RenderError;
use crate::render::{Halign, TextStyle, Valign};
use crate::style::{Style, Theme};
use crate::types::{DataRange, Point};

use super::{Common, Component, DrawContext, log10, skip_degenerate};

/// A string anchored at a data point
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    common: Common,
    at: Point,
    text: String,
    halign: Halign,
    valign: Valign,
    rotate: Option<f64>,
}

impl Text {
    /// Text whose bottom-left corner sits at `at`
    pub fn new(at: Point, text: impl Into<String>) -> Self {
        Text {
            common: Common::default(),
            at,
            text: text.into(),
            halign: Halign::Left,
            valign: Valign::Bottom,
            rotate: None,
        }
    }

    pub fn align(mut self, halign: Halign, valign: Valign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    /// Counter-clockwise rotation in degrees about the anchor
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

impl Component for Text {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.text.clone()
    }

    fn steps_color(&self) -> bool {
        false
    }

    fn datarange(&self) -> DataRange {
        DataRange::unbounded()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        if !self.at.is_finite() {
            skip_degenerate("text", &self.common);
            return Ok(());
        }
        let mut style = TextStyle::new(&ctx.style, self.halign, self.valign);
        style.rotate = self.rotate;
        let at = ctx.transform.apply(self.at);
        ctx.drawing.text(at, &self.text, &style);
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        if x {
            self.at.x = log10(self.at.x);
        }
        if y {
            self.at.y = log10(self.at.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;
    use crate::render::{Primitive, Recorder};
    use crate::style::Color;
    use crate::types::{Transform, ViewBox, pt};

    fn draw(text: &Text) -> Recorder {
        let theme = Theme::default();
        let mut rec = Recorder::new();
        let databox = ViewBox::new(0.0, 0.0, 10.0, 10.0);
        let diagbox = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let mut ctx = DrawContext {
            drawing: &mut rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: text.resolved_style(&theme, &Color::Rgb(1, 1, 1)),
        };
        text.draw(&mut ctx).unwrap();
        rec
    }

    #[test]
    fn text_is_placed_in_data_space() {
        let text = Text::new(pt(2.0, 3.0), "peak")
            .align(Halign::Center, Valign::Top)
            .rotate(45.0)
            .font_size(20.0);
        assert_eq!(text.datarange(), DataRange::unbounded());
        let rec = draw(&text);
        match rec.primitives() {
            [Primitive::Text { at, text, style }] => {
                assert_eq!(*at, pt(20.0, 30.0));
                assert_eq!(text, "peak");
                assert_eq!(style.halign, Halign::Center);
                assert_eq!(style.rotate, Some(45.0));
                assert_eq!(style.size, 20.0);
            }
            other => panic!("expected one text, got {other:?}"),
        }
    }

    #[test]
    fn text_keeps_the_theme_color() {
        let rec = draw(&Text::new(pt(1.0, 1.0), "a"));
        match rec.primitives() {
            [Primitive::Text { style, .. }] => {
                assert_eq!(style.color, Theme::default().text.color);
            }
            other => panic!("expected one text, got {other:?}"),
        }
    }

    #[test]
    fn log_of_negative_anchor_skips_the_text() {
        let mut text = Text::new(pt(-1.0, 10.0), "gone");
        text.log_transform(true, true);
        assert!(draw(&text).primitives().is_empty());
    }
}
