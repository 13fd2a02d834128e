//! Straight lines, segments and labelled points.

use crate::errors::{GeometryError, RenderError};
use crate::geometry::{self, Line};
use crate::render::{PathMarkers, StrokeStyle, TextPosition, TextStyle};
use crate::style::{MarkerShape, Style, Theme};
use crate::types::{DataRange, Point, ViewBox, pt};

use super::{Common, Component, DrawContext, MarkerRequest, log10, skip_degenerate};

type Ends = (Option<MarkerShape>, Option<MarkerShape>);

// ============================================================================
// InfiniteLine
// ============================================================================

/// Line extending across the whole data area
#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteLine {
    common: Common,
    line: Line,
    ends: Ends,
}

impl InfiniteLine {
    pub fn new(line: Line) -> Self {
        InfiniteLine {
            common: Common::default(),
            line,
            ends: (None, None),
        }
    }

    pub fn horizontal(y: f64) -> Self {
        InfiniteLine::new(Line::horizontal(y))
    }

    pub fn vertical(x: f64) -> Self {
        InfiniteLine::new(Line::vertical(x))
    }

    /// Line through `point`; an infinite slope gives a vertical line
    pub fn through(point: Point, slope: f64) -> Self {
        InfiniteLine::new(Line::from_point_slope(point, slope))
    }

    pub fn from_points(p1: Point, p2: Point) -> Result<Self, GeometryError> {
        Ok(InfiniteLine::new(Line::from_points(p1, p2)?))
    }

    pub fn endmarkers(mut self, start: Option<MarkerShape>, end: Option<MarkerShape>) -> Self {
        self.ends = (start, end);
        self
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    fn is_horizontal(&self) -> bool {
        self.line.a == 0.0
    }

    /// Where the line crosses the edges of `databox`.
    ///
    /// Sloped lines are cut at the bottom and top of the box.
    fn endpoints(&self, databox: ViewBox) -> (Point, Point) {
        let line = &self.line;
        if line.is_vertical() {
            let x = line.x_at(0.0);
            (pt(x, databox.y), pt(x, databox.top()))
        } else if self.is_horizontal() {
            let y = line.y_at(0.0);
            (pt(databox.x, y), pt(databox.right(), y))
        } else {
            let x1 = line.x_at(databox.y);
            let x2 = line.x_at(databox.top());
            (pt(x1, databox.y), pt(x2, databox.top()))
        }
    }
}

impl Component for InfiniteLine {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        if self.line.is_vertical() {
            let x = self.line.x_at(0.0);
            DataRange::x_only(x, x)
        } else if self.is_horizontal() {
            let y = self.line.y_at(0.0);
            DataRange::y_only(y, y)
        } else {
            DataRange::unbounded()
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let (p1, p2) = self.endpoints(ctx.databox);
        let stroke = StrokeStyle::line(&ctx.style);
        let request = MarkerRequest::Ends(self.ends.0, self.ends.1);
        if ctx.marked_polyline(&[p1, p2], &stroke, request) == 0 {
            skip_degenerate("line", &self.common);
        }
        Ok(())
    }
}

// ============================================================================
// Segment
// ============================================================================

/// Straight segment between two points
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    common: Common,
    segment: geometry::Segment,
    ends: Ends,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Segment {
            common: Common::default(),
            segment: geometry::Segment::new(p1, p2),
            ends: (None, None),
        }
    }

    /// Horizontal segment from `p` to x = `to_x`
    pub fn horizontal(p: Point, to_x: f64) -> Self {
        Segment::new(p, pt(to_x, p.y))
    }

    /// Vertical segment from `p` to y = `to_y`
    pub fn vertical(p: Point, to_y: f64) -> Self {
        Segment::new(p, pt(p.x, to_y))
    }

    /// Arrow from the origin to `(x, y)`
    pub fn vector(x: f64, y: f64) -> Self {
        Segment::new(pt(0.0, 0.0), pt(x, y)).endmarkers(None, Some(MarkerShape::RightArrow))
    }

    pub fn endmarkers(mut self, start: Option<MarkerShape>, end: Option<MarkerShape>) -> Self {
        self.ends = (start, end);
        self
    }

    pub fn segment(&self) -> &geometry::Segment {
        &self.segment
    }
}

impl Component for Segment {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        DataRange::of_points([self.segment.p1, self.segment.p2])
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let stroke = StrokeStyle::line(&ctx.style);
        let points = [self.segment.p1, self.segment.p2];
        // A single finite end is not a segment
        if points.iter().any(|p| !p.is_finite()) {
            skip_degenerate("segment", &self.common);
            return Ok(());
        }
        ctx.marked_polyline(&points, &stroke, MarkerRequest::Ends(self.ends.0, self.ends.1));
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        for p in [&mut self.segment.p1, &mut self.segment.p2] {
            if x {
                p.x = log10(p.x);
            }
            if y {
                p.y = log10(p.y);
            }
        }
    }
}

// ============================================================================
// PointMark
// ============================================================================

/// Single marked point with an optional label and guide lines
#[derive(Clone, Debug, PartialEq)]
pub struct PointMark {
    common: Common,
    point: Point,
    label: Option<(String, TextPosition)>,
    /// y value the vertical guide runs to
    guide_x: Option<f64>,
    /// x value the horizontal guide runs to
    guide_y: Option<f64>,
}

impl PointMark {
    pub fn new(point: Point) -> Self {
        PointMark {
            common: Common::default(),
            point,
            label: None,
            guide_x: None,
            guide_y: None,
        }
    }

    pub fn label(mut self, text: impl Into<String>, position: TextPosition) -> Self {
        self.label = Some((text.into(), position));
        self
    }

    /// Vertical guide line from the point down (or up) to `to_y`
    pub fn guide_x(mut self, to_y: f64) -> Self {
        self.guide_x = Some(to_y);
        self
    }

    /// Horizontal guide line from the point across to `to_x`
    pub fn guide_y(mut self, to_x: f64) -> Self {
        self.guide_y = Some(to_x);
        self
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

impl Component for PointMark {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.point.clone()
    }

    fn steps_color(&self) -> bool {
        false
    }

    /// The point, padded by 5% of its coordinates
    fn datarange(&self) -> DataRange {
        let Point { x, y } = self.point;
        let dx = x.abs() * 0.05;
        let dy = y.abs() * 0.05;
        DataRange::new(x - dx, x + dx, y - dy, y + dy)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        if !self.point.is_finite() {
            skip_degenerate("point", &self.common);
            return Ok(());
        }
        let p = self.point;
        let guide = StrokeStyle::line(&ctx.theme.point_guide);
        if let Some(to_y) = self.guide_x {
            ctx.polyline(&[pt(p.x, to_y), p], &guide, &PathMarkers::default());
        }
        if let Some(to_x) = self.guide_y {
            ctx.polyline(&[pt(to_x, p.y), p], &guide, &PathMarkers::default());
        }

        let shape = ctx.style.marker.unwrap_or(MarkerShape::Round);
        let stroke = StrokeStyle::line(&ctx.style);
        ctx.marked_polyline(&[p], &stroke, MarkerRequest::Every(shape));

        if let Some((text, position)) = &self.label {
            let text_style = &ctx.theme.point_text;
            let (offset, halign, valign) = position.offset(text_style.margin);
            let style = TextStyle::new(text_style, halign, valign);
            let at = ctx.transform.apply(p) + offset;
            ctx.drawing.text(at, text, &style);
        }
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        if x {
            self.point.x = log10(self.point.x);
            self.guide_y = self.guide_y.map(log10);
        }
        if y {
            self.point.y = log10(self.point.y);
            self.guide_x = self.guide_x.map(log10);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Halign, Primitive, Recorder, Valign};
    use crate::types::Transform;

    fn draw(component: &dyn Component, rec: &mut Recorder) {
        let theme = Theme::default();
        let databox = ViewBox::new(0.0, 0.0, 10.0, 10.0);
        let diagbox = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let mut ctx = DrawContext {
            drawing: rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: component.resolved_style(&theme, &crate::style::Color::BLACK),
        };
        component.draw(&mut ctx).unwrap();
    }

    // ==================== InfiniteLine tests ====================

    #[test]
    fn guides_constrain_one_axis() {
        assert_eq!(InfiniteLine::horizontal(3.0).datarange(), DataRange::y_only(3.0, 3.0));
        assert_eq!(InfiniteLine::vertical(-2.0).datarange(), DataRange::x_only(-2.0, -2.0));
        assert_eq!(
            InfiniteLine::through(pt(0.0, 0.0), 2.0).datarange(),
            DataRange::unbounded()
        );
    }

    #[test]
    fn lines_span_the_data_box() {
        let mut rec = Recorder::new();
        draw(&InfiniteLine::horizontal(5.0), &mut rec);
        draw(&InfiniteLine::vertical(2.0), &mut rec);
        draw(&InfiniteLine::through(pt(0.0, 0.0), 2.0), &mut rec);
        let paths = rec.paths();
        assert_eq!(paths[0], &[pt(0.0, 50.0), pt(100.0, 50.0)]);
        assert_eq!(paths[1], &[pt(20.0, 0.0), pt(20.0, 100.0)]);
        assert_eq!(paths[2], &[pt(0.0, 0.0), pt(50.0, 100.0)]);
    }

    // ==================== Segment tests ====================

    #[test]
    fn segment_range_and_vector_arrow() {
        let seg = Segment::new(pt(4.0, 1.0), pt(2.0, 3.0));
        assert_eq!(seg.datarange(), DataRange::new(2.0, 4.0, 1.0, 3.0));

        let mut rec = Recorder::new();
        draw(&Segment::vector(5.0, 5.0), &mut rec);
        let marker = rec.count(|p| {
            matches!(p, Primitive::Marker { shape: MarkerShape::RightArrow, .. })
        });
        assert_eq!(marker, 1);
        assert_eq!(rec.paths()[0], &[pt(0.0, 0.0), pt(50.0, 50.0)]);
    }

    #[test]
    fn segment_with_nonpositive_log_end_is_skipped() {
        let mut seg = Segment::new(pt(0.0, 1.0), pt(10.0, 100.0));
        seg.log_transform(true, false);
        let mut rec = Recorder::new();
        draw(&seg, &mut rec);
        assert!(rec.paths().is_empty());
    }

    // ==================== PointMark tests ====================

    #[test]
    fn point_range_pads_five_percent() {
        let range = PointMark::new(pt(10.0, -20.0)).datarange();
        assert_eq!(range, DataRange::new(9.5, 10.5, -21.0, -19.0));
    }

    #[test]
    fn point_draws_guides_marker_and_label() {
        let point = PointMark::new(pt(5.0, 5.0))
            .guide_x(0.0)
            .guide_y(0.0)
            .label("P", TextPosition::SW);
        assert!(!point.steps_color());

        let mut rec = Recorder::new();
        draw(&point, &mut rec);
        let paths = rec.paths();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], &[pt(50.0, 0.0), pt(50.0, 50.0)]);
        assert_eq!(paths[1], &[pt(0.0, 50.0), pt(50.0, 50.0)]);
        assert_eq!(paths[2], &[pt(50.0, 50.0)]);

        match rec.primitives().last() {
            Some(Primitive::Text { at, text, style }) => {
                let margin = Theme::default().point_text.margin;
                assert_eq!(text, "P");
                assert_eq!(*at, pt(50.0 - margin, 50.0 - margin));
                assert_eq!((style.halign, style.valign), (Halign::Right, Valign::Top));
            }
            other => panic!("expected label text, got {other:?}"),
        }
    }
}
