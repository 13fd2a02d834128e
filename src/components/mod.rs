//! Drawable parts of a diagram.
//!
//! Each component owns its data and a partial [`StyleOverride`]; it never refers back to
//! the diagram it is added to. The diagram resolves the style (theme base, override,
//! cycle color) and hands it over in a [`DrawContext`] together with the data-to-device
//! transform.

mod annotations;
mod contour;
mod figures;
mod lines;
mod series;
mod shapes;
mod smith;

pub use annotations::Text;
pub use contour::{ColorbarPos, Contour, Implicit};
pub use figures::{BezierCurve, FunctionCurve, IntegralFill, SplineCurve};
pub use lines::{InfiniteLine, PointMark, Segment};
pub use series::{BarAlign, Bars, Bins, ErrorBar, Histogram, LineFill, PolyLine, Scatter};
pub use shapes::{ArcShape, CircleShape, EllipseShape};
pub use smith::{SmithConstReactance, SmithConstResistance};
pub(crate) use smith::draw_smith_arc;

use std::f64::consts::TAU;

use enum_dispatch::enum_dispatch;

use crate::errors::RenderError;
use crate::geometry::{Circle, Ellipse};
use crate::log::warn;
use crate::numeric::linspace;
use crate::render::{Drawing, FillStyle, PathMarkers, StrokeStyle};
use crate::style::{Color, Dash, MarkerShape, Style, StyleOverride, Theme};
use crate::types::{DataRange, Point, Transform, ViewBox};

/// Points used to trace a circle or ellipse that cannot be drawn natively
const CURVE_SAMPLES: usize = 120;

/// Name and style settings shared by every component
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Common {
    /// Legend entry; unnamed components are not listed
    pub name: Option<String>,
    pub style: StyleOverride,
}

/// Marker glyphs a polyline asks for; they are registered only if something is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MarkerRequest {
    Plain,
    /// `shape` at every vertex
    Every(MarkerShape),
    /// Markers at the first and last vertex, oriented along the line
    Ends(Option<MarkerShape>, Option<MarkerShape>),
}

impl From<Option<MarkerShape>> for MarkerRequest {
    fn from(shape: Option<MarkerShape>) -> Self {
        shape.map_or(MarkerRequest::Plain, MarkerRequest::Every)
    }
}

/// Everything a component needs to draw itself
pub struct DrawContext<'a> {
    pub drawing: &'a mut dyn Drawing,
    pub theme: &'a Theme,
    /// Data space to device space
    pub transform: Transform,
    /// Visible data area
    pub databox: ViewBox,
    /// Device area of the data
    pub diagbox: ViewBox,
    /// Resolved style of the component being drawn
    pub style: Style,
}

impl DrawContext<'_> {
    /// Whether one data unit spans the same device distance on both axes
    pub fn is_uniform(&self) -> bool {
        let sx = self.transform.scale_x(1.0);
        let sy = self.transform.scale_y(1.0);
        ((sx - sy) / sx).abs() < 1e-9
    }

    pub fn define_marker(&mut self, shape: MarkerShape, orient: bool) -> String {
        let stroke = StrokeStyle::edge(&self.style);
        self.drawing
            .define_marker(shape, self.style.radius, &self.style.color, &stroke, orient)
    }

    /// Draw a data-space polyline, split wherever a point is not finite.
    ///
    /// Returns how many pieces were drawn.
    pub fn polyline(&mut self, points: &[Point], stroke: &StrokeStyle, markers: &PathMarkers) -> usize {
        let runs = finite_runs(points);
        for run in &runs {
            let device: Vec<Point> = run.iter().map(|p| self.transform.apply(*p)).collect();
            self.drawing.path(&device, stroke, markers);
        }
        runs.len()
    }

    /// [`polyline`](Self::polyline) with markers, defined only when a piece is drawn
    pub(crate) fn marked_polyline(
        &mut self,
        points: &[Point],
        stroke: &StrokeStyle,
        request: MarkerRequest,
    ) -> usize {
        if finite_runs(points).is_empty() {
            return 0;
        }
        let markers = match request {
            MarkerRequest::Plain => PathMarkers::default(),
            MarkerRequest::Every(shape) => PathMarkers::every(self.define_marker(shape, false)),
            MarkerRequest::Ends(start, end) => PathMarkers {
                all: None,
                start: start.map(|shape| self.define_marker(shape, true)),
                end: end.map(|shape| self.define_marker(shape, true)),
            },
        };
        self.polyline(points, stroke, &markers)
    }

    /// Fill the band between two curves sampled at the same x values.
    ///
    /// A pair with a non-finite point splits the band. Returns how many pieces were filled.
    pub(crate) fn fill_between(&mut self, upper: &[Point], lower: &[Point], fill: &FillStyle) -> usize {
        let pairs: Vec<(Point, Point)> = upper.iter().copied().zip(lower.iter().copied()).collect();
        let mut drawn = 0;
        for run in pairs.split(|(a, b)| !(a.is_finite() && b.is_finite())) {
            if run.len() < 2 {
                continue;
            }
            let outline: Vec<Point> = run
                .iter()
                .map(|(a, _)| *a)
                .chain(run.iter().rev().map(|(_, b)| *b))
                .map(|p| self.transform.apply(p))
                .collect();
            self.drawing.polygon(&outline, fill, &StrokeStyle::none());
            drawn += 1;
        }
        drawn
    }

    /// Data-space circle; drawn as an ellipse when the axes are scaled differently
    pub fn circle(&mut self, center: Point, radius: f64, fill: &FillStyle, stroke: &StrokeStyle) {
        let c = self.transform.apply(center);
        let rx = self.transform.scale_x(radius).abs();
        let ry = self.transform.scale_y(radius).abs();
        if self.is_uniform() {
            self.drawing.circle(c, rx, fill, stroke);
        } else {
            self.drawing.ellipse(c, rx, ry, 0.0, fill, stroke);
        }
    }

    /// Data-space ellipse rotated `rotation` degrees counter-clockwise
    pub fn ellipse(&mut self, ellipse: &Ellipse, fill: &FillStyle, stroke: &StrokeStyle) {
        let c = self.transform.apply(ellipse.center);
        let rx = self.transform.scale_x(ellipse.r1).abs();
        let ry = self.transform.scale_y(ellipse.r2).abs();
        if self.is_uniform() || ellipse.rotation.rem_euclid(180.0) == 0.0 {
            self.drawing
                .ellipse(c, rx, ry, ellipse.rotation, fill, stroke);
        } else {
            // Rotation does not survive an anisotropic scale; trace the outline instead
            let outline: Vec<Point> = linspace(0.0, TAU, CURVE_SAMPLES)
                .into_iter()
                .map(|t| self.transform.apply(ellipse.point_at(t)))
                .collect();
            self.drawing.polygon(&outline, fill, stroke);
        }
    }

    /// Data-space arc counter-clockwise from `theta1` to `theta2` degrees
    pub fn arc(&mut self, center: Point, radius: f64, theta1: f64, theta2: f64, stroke: &StrokeStyle) {
        let mut theta2 = theta2;
        if theta2 < theta1 {
            theta2 += 360.0 * ((theta1 - theta2) / 360.0).ceil();
        }
        if self.is_uniform() {
            let c = self.transform.apply(center);
            let r = self.transform.scale_x(radius).abs();
            self.drawing.arc(c, r, theta1, theta2, stroke);
        } else {
            let circle = Circle::new(center, radius);
            let points: Vec<Point> = linspace(theta1, theta2, CURVE_SAMPLES)
                .into_iter()
                .map(|t| circle.point_at(t.to_radians()))
                .collect();
            self.polyline(&points, stroke, &PathMarkers::default());
        }
    }
}

/// Maximal runs of consecutive finite points
pub(crate) fn finite_runs(points: &[Point]) -> Vec<&[Point]> {
    points
        .split(|p| !p.is_finite())
        .filter(|run| !run.is_empty())
        .collect()
}

/// `log10(v)`, NaN for values that have no logarithm
pub(crate) fn log10(v: f64) -> f64 {
    if v > 0.0 { v.log10() } else { f64::NAN }
}

/// Warn about a component that had nothing to draw
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn skip_degenerate(kind: &str, common: &Common) {
    warn!(kind, name = ?common.name, "component has no drawable points, skipping");
}

/// Behavior every drawable component provides
#[enum_dispatch]
pub trait Component {
    fn common(&self) -> &Common;

    fn common_mut(&mut self) -> &mut Common;

    /// Theme style the override is applied to
    fn base_style(&self, theme: &Theme) -> Style {
        theme.series.clone()
    }

    /// Extent of the component's data; unset bounds do not constrain the diagram
    fn datarange(&self) -> DataRange;

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError>;

    /// Whether the component takes a color from the diagram's cycle
    fn steps_color(&self) -> bool {
        true
    }

    /// Whether the legend shows a filled square rather than a line sample
    fn has_square_legend_glyph(&self) -> bool {
        false
    }

    fn supports_log_transform(&self) -> bool {
        false
    }

    /// Replace coordinates by their base-10 logarithm along the chosen axes
    fn log_transform(&mut self, _x: bool, _y: bool) {}

    /// Line drawn for the legend entry
    fn legend_stroke(&self, style: &Style) -> StrokeStyle {
        StrokeStyle::line(style)
    }

    /// Fully resolved style, using `cycle` unless the color was set explicitly
    fn resolved_style(&self, theme: &Theme, cycle: &Color) -> Style {
        let common = self.common();
        let mut style = common.style.resolve(&self.base_style(theme));
        if common.style.color.is_none() && self.steps_color() {
            style.color = cycle.clone();
        }
        style
    }
}

/// Any component a diagram can hold
#[enum_dispatch(Component)]
#[derive(Clone, Debug)]
pub enum ComponentKind {
    PolyLine,
    Scatter,
    Bars,
    Histogram,
    ErrorBar,
    LineFill,
    FunctionCurve,
    IntegralFill,
    InfiniteLine,
    Segment,
    PointMark,
    BezierCurve,
    SplineCurve,
    Contour,
    Implicit,
    SmithConstResistance,
    SmithConstReactance,
    CircleShape,
    ArcShape,
    EllipseShape,
    Text,
}

/// Builder methods for the name and style of any component
pub trait ComponentExt: Component + Sized {
    /// Legend entry
    fn name(mut self, name: impl Into<String>) -> Self {
        self.common_mut().name = Some(name.into());
        self
    }

    fn color(mut self, color: Color) -> Self {
        self.common_mut().style.color = Some(color);
        self
    }

    fn edge_color(mut self, color: Color) -> Self {
        self.common_mut().style.edge_color = Some(color);
        self
    }

    fn stroke(mut self, dash: Dash) -> Self {
        self.common_mut().style.stroke = Some(dash);
        self
    }

    fn stroke_width(mut self, width: f64) -> Self {
        self.common_mut().style.stroke_width = Some(width);
        self
    }

    fn edge_width(mut self, width: f64) -> Self {
        self.common_mut().style.edge_width = Some(width);
        self
    }

    fn opacity(mut self, opacity: f64) -> Self {
        self.common_mut().style.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    /// Marker drawn at every data point, with an optional radius
    fn marker(mut self, shape: MarkerShape, radius: Option<f64>) -> Self {
        let style = &mut self.common_mut().style;
        style.marker = Some(Some(shape));
        if radius.is_some() {
            style.radius = radius;
        }
        self
    }

    fn no_marker(mut self) -> Self {
        self.common_mut().style.marker = Some(None);
        self
    }

    fn font_size(mut self, size: f64) -> Self {
        self.common_mut().style.font_size = Some(size);
        self
    }

    fn with_style(mut self, style: StyleOverride) -> Self {
        self.common_mut().style = style;
        self
    }
}

impl<T: Component> ComponentExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    // ==================== Helper tests ====================

    #[test]
    fn finite_runs_split_on_nan() {
        let points = [
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(2.0, f64::NAN),
            pt(3.0, 3.0),
            pt(f64::INFINITY, 0.0),
        ];
        let runs = finite_runs(&points);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1], &[pt(3.0, 3.0)]);
        assert!(finite_runs(&[pt(f64::NAN, 0.0)]).is_empty());
    }

    #[test]
    fn log10_of_non_positive_is_nan() {
        assert_eq!(log10(100.0), 2.0);
        assert!(log10(0.0).is_nan());
        assert!(log10(-5.0).is_nan());
    }

    // ==================== Style tests ====================

    #[test]
    fn cycle_color_only_when_unset() {
        let theme = Theme::default();
        let red = Color::Rgb(255, 0, 0);
        let cycle = Color::Rgb(1, 2, 3);

        let auto = PolyLine::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(Component::resolved_style(&auto, &theme, &cycle).color, cycle);

        let fixed = PolyLine::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .color(red.clone());
        assert_eq!(Component::resolved_style(&fixed, &theme, &cycle).color, red);
    }

    #[test]
    fn builders_fill_the_override() {
        let line = PolyLine::new(vec![0.0], vec![0.0])
            .unwrap()
            .name("data")
            .stroke(Dash::Dotted)
            .stroke_width(3.0)
            .marker(MarkerShape::Square, Some(6.0));
        let common = line.common();
        assert_eq!(common.name.as_deref(), Some("data"));
        assert_eq!(common.style.stroke, Some(Dash::Dotted));
        assert_eq!(common.style.marker, Some(Some(MarkerShape::Square)));
        assert_eq!(common.style.radius, Some(6.0));

        let style = Component::resolved_style(&line, &Theme::default(), &Color::BLACK);
        assert_eq!(style.stroke_width, 3.0);
        assert_eq!(style.marker, Some(MarkerShape::Square));
    }

    #[test]
    fn kinds_convert_from_components() {
        let kind: ComponentKind = Scatter::new(vec![1.0], vec![2.0]).unwrap().into();
        assert!(kind.steps_color());
        assert_eq!(kind.datarange(), DataRange::new(1.0, 1.0, 2.0, 2.0));
    }
}
