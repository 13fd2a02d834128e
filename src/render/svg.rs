//! SVG generation
//!
//! [`SvgDrawing`] collects `facet_svg` nodes in SVG user units and serializes them
//! through `facet_xml` in [`SvgDrawing::finish`]. Device space is y-up; every y
//! coordinate is flipped against the canvas height on the way in. Markers are drawn
//! inline at path vertices and clipping is geometric, see [`super::clip`].

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{
    Circle as SvgCircle, Ellipse as SvgEllipse, Path, PathData, Points, Polygon, Svg, SvgNode,
    Text, facet_xml,
};

use crate::errors::RenderError;
use crate::style::{Color, MarkerShape};
use crate::types::{Point, Size, ViewBox};

use super::clip::{Overlap, clip_polygon, clip_polyline, flatten_arc, overlap};
use super::text::estimate_text_size;
use super::{
    Drawing, FillStyle, Halign, PathMarkers, StrokeStyle, TextMetrics, TextStyle, Valign,
};

/// Options of the SVG writer
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SvgOptions {
    /// Outline the whole canvas
    pub border: bool,
    /// Canvas background, transparent when `None`
    pub background: Option<Color>,
}

/// Format a number with 6 significant figures, trailing zeros trimmed
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
    write!(writer, "{}", fmt_num(value))
}

/// Paint string for a color, folding opacity into `rgba()` where the channels are known
fn paint(color: &Color, opacity: f64) -> String {
    match color {
        Color::Rgb(r, g, b) if opacity < 1.0 => {
            format!("rgba({r},{g},{b},{})", fmt_num(opacity.max(0.0)))
        }
        _ => color.to_string(),
    }
}

fn path_data(points: &[Point], closed: bool) -> PathData {
    let mut d = PathData::new();
    for (i, p) in points.iter().enumerate() {
        d = if i == 0 { d.m(p.x, p.y) } else { d.l(p.x, p.y) };
    }
    if closed { d.z() } else { d }
}

fn bounds_of(points: &[Point]) -> ViewBox {
    let (min, max) = points.iter().fold(
        (Point::splat(f64::INFINITY), Point::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    ViewBox::from_corners(min, max)
}

/// A marker registered through [`Drawing::define_marker`]
#[derive(Clone, Debug)]
struct MarkerDef {
    id: String,
    shape: MarkerShape,
    radius: f64,
    fill: Color,
    stroke: StrokeStyle,
    orient: bool,
}

impl MarkerDef {
    /// Glyph outline around the origin, pointing along +x, y up
    fn outline(&self) -> Vec<Point> {
        let r = self.radius;
        let h = r / 3.0;
        let plus = || {
            vec![
                Point::new(-h, -r),
                Point::new(h, -r),
                Point::new(h, -h),
                Point::new(r, -h),
                Point::new(r, h),
                Point::new(h, h),
                Point::new(h, r),
                Point::new(-h, r),
                Point::new(-h, h),
                Point::new(-r, h),
                Point::new(-r, -h),
                Point::new(-h, -h),
            ]
        };
        match self.shape {
            MarkerShape::Round => Vec::new(),
            MarkerShape::Square => vec![
                Point::new(-r, -r),
                Point::new(r, -r),
                Point::new(r, r),
                Point::new(-r, r),
            ],
            MarkerShape::Triangle => vec![Point::new(-r, -r), Point::new(r, -r), Point::new(0.0, r)],
            MarkerShape::TriangleDown => {
                vec![Point::new(-r, r), Point::new(r, r), Point::new(0.0, -r)]
            }
            MarkerShape::LeftArrow => vec![Point::new(-r, 0.0), Point::new(r, r), Point::new(r, -r)],
            MarkerShape::RightArrow => {
                vec![Point::new(-r, -r), Point::new(-r, r), Point::new(r, 0.0)]
            }
            MarkerShape::Plus => plus(),
            MarkerShape::Cross => {
                let turn = Point::from_angle(std::f64::consts::FRAC_PI_4);
                plus().into_iter().map(|p| turn.rotate(p)).collect()
            }
            MarkerShape::HBar => vec![Point::new(-r, 0.0), Point::new(r, 0.0)],
            MarkerShape::VBar => vec![Point::new(0.0, -r), Point::new(0.0, r)],
        }
    }
}

/// SVG document writer
#[derive(Clone, Debug)]
pub struct SvgDrawing {
    width: f64,
    height: f64,
    options: SvgOptions,
    nodes: Vec<SvgNode>,
    markers: Vec<MarkerDef>,
    clip: Option<ViewBox>,
}

impl SvgDrawing {
    pub fn new(width: f64, height: f64, options: SvgOptions) -> Self {
        SvgDrawing {
            width,
            height,
            options,
            nodes: Vec::new(),
            markers: Vec::new(),
            clip: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn flip(&self, p: Point) -> Point {
        Point::new(p.x, self.height - p.y)
    }

    fn flip_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.flip(*p)).collect()
    }

    /// How `bounds` (device space) relates to the active clip
    fn clip_state(&self, bounds: &ViewBox) -> Overlap {
        match &self.clip {
            Some(rect) => overlap(bounds, rect),
            None => Overlap::Inside,
        }
    }

    /// Emit a `<path>` from SVG-space data
    fn push_path(&mut self, d: PathData, fill: &FillStyle, stroke: &StrokeStyle) {
        let (color, width, dash) = stroke_attrs(stroke);
        self.nodes.push(SvgNode::Path(Path {
            d: Some(d),
            fill: Some(paint(&fill.color, fill.opacity)),
            stroke: Some(color),
            stroke_width: width,
            stroke_dasharray: dash,
            ..Default::default()
        }));
    }

    fn push_polyline(&mut self, points: &[Point], stroke: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        let d = path_data(&self.flip_all(points), false);
        self.push_path(d, &FillStyle::none(), stroke);
    }

    fn push_polygon(&mut self, points: &[Point], fill: &FillStyle, stroke: &StrokeStyle) {
        if points.len() < 3 {
            return;
        }
        let (color, width, dash) = stroke_attrs(stroke);
        let points = self
            .flip_all(points)
            .into_iter()
            .fold(Points::new(), |acc, p| acc.push(p.x, p.y));
        self.nodes.push(SvgNode::Polygon(Polygon {
            points,
            fill: Some(paint(&fill.color, fill.opacity)),
            stroke: Some(color),
            stroke_width: width,
            stroke_dasharray: dash,
            ..Default::default()
        }));
    }

    /// A closed outline crossing the clip edge: fill the clipped area, stroke the
    /// clipped outline
    fn push_clipped_shape(&mut self, outline: &[Point], fill: &FillStyle, stroke: &StrokeStyle) {
        let Some(rect) = self.clip else {
            return;
        };
        if !fill.color.is_none() {
            let area = clip_polygon(outline, &rect);
            self.push_polygon(&area, fill, &StrokeStyle::none());
        }
        if stroke.is_visible() {
            let mut ring = outline.to_vec();
            ring.extend(outline.first().copied());
            for run in clip_polyline(&ring, &rect) {
                self.push_polyline(&run, stroke);
            }
        }
    }

    fn marker(&self, id: &str) -> Option<&MarkerDef> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Draw marker glyphs at the vertices of a path
    fn draw_markers(&mut self, points: &[Point], markers: &PathMarkers) {
        let last = points.len().saturating_sub(1);
        for (i, &at) in points.iter().enumerate() {
            let id = if i == 0 {
                markers.start.as_ref().or(markers.all.as_ref())
            } else if i == last {
                markers.end.as_ref().or(markers.all.as_ref())
            } else {
                markers.all.as_ref()
            };
            let Some(def) = id.and_then(|id| self.marker(id)).cloned() else {
                continue;
            };
            if !at.is_finite() || self.clip.is_some_and(|rect| !rect.contains(at)) {
                continue;
            }
            let angle = if def.orient {
                heading(points, i)
            } else {
                0.0
            };
            self.push_marker(&def, at, angle);
        }
    }

    fn push_marker(&mut self, def: &MarkerDef, at: Point, angle: f64) {
        let (color, width, _) = stroke_attrs(&def.stroke);
        if def.shape == MarkerShape::Round {
            let c = self.flip(at);
            self.nodes.push(SvgNode::Circle(SvgCircle {
                cx: Some(c.x),
                cy: Some(c.y),
                r: Some(def.radius),
                fill: Some(def.fill.to_string()),
                stroke: Some(color),
                stroke_width: width,
                ..Default::default()
            }));
            return;
        }
        let turn = Point::from_angle(angle.to_radians());
        let outline: Vec<Point> = def
            .outline()
            .into_iter()
            .map(|p| at + turn.rotate(p))
            .collect();
        match def.shape {
            MarkerShape::HBar | MarkerShape::VBar => {
                let bar = StrokeStyle::new(def.fill.clone(), def.stroke.width);
                self.push_polyline(&outline, &bar);
            }
            _ => {
                let fill = FillStyle::new(def.fill.clone());
                self.push_polygon(&outline, &fill, &def.stroke);
            }
        }
    }

    /// Serialize the document
    pub fn finish(self) -> Result<String, RenderError> {
        let mut children: Vec<SvgNode> = Vec::new();
        let frame = |fill: &Color, stroke: &Color| {
            let corners = [
                Point::new(0.0, 0.0),
                Point::new(self.width, 0.0),
                Point::new(self.width, self.height),
                Point::new(0.0, self.height),
            ];
            SvgNode::Path(Path {
                d: Some(path_data(&corners, true)),
                fill: Some(fill.to_string()),
                stroke: Some(stroke.to_string()),
                ..Default::default()
            })
        };
        if let Some(bg) = self.options.background.as_ref().filter(|c| !c.is_none()) {
            children.push(frame(bg, &Color::None));
        }
        let border = self.options.border.then(|| frame(&Color::None, &Color::BLACK));
        children.extend(self.nodes);
        children.extend(border);

        let svg = Svg {
            width: Some(fmt_num(self.width)),
            height: Some(fmt_num(self.height)),
            view_box: Some(format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height))),
            children,
        };
        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&svg, &options).map_err(|e| RenderError::Serialize {
            message: e.to_string(),
        })
    }
}

/// `stroke`, `stroke-width` and `stroke-dasharray` attribute values
fn stroke_attrs(stroke: &StrokeStyle) -> (String, Option<String>, Option<String>) {
    let color = paint(&stroke.color, stroke.opacity);
    if !stroke.is_visible() {
        return (color, None, None);
    }
    let dash = stroke.dash.dasharray(stroke.width).map(|dash| {
        dash.iter()
            .map(|v| fmt_num(*v))
            .collect::<Vec<_>>()
            .join(" ")
    });
    (color, Some(fmt_num(stroke.width)), dash)
}

/// Direction of a path at vertex `i`, degrees counter-clockwise from +x
fn heading(points: &[Point], i: usize) -> f64 {
    let before = points[..i].iter().rev().find(|p| p.is_finite()).copied();
    let after = points[i + 1..].iter().find(|p| p.is_finite()).copied();
    let d = match (before, after) {
        (Some(a), Some(b)) => b - a,
        (None, Some(b)) => b - points[i],
        (Some(a), None) => points[i] - a,
        (None, None) => return 0.0,
    };
    d.y.atan2(d.x).to_degrees()
}

impl TextMetrics for SvgDrawing {
    fn text_size(&self, text: &str, style: &TextStyle) -> Size {
        estimate_text_size(text, style.size, style.font)
    }
}

impl Drawing for SvgDrawing {
    fn path(&mut self, points: &[Point], stroke: &StrokeStyle, markers: &PathMarkers) {
        if points.is_empty() {
            return;
        }
        match self.clip {
            Some(rect) if overlap(&bounds_of(points), &rect) != Overlap::Inside => {
                for run in clip_polyline(points, &rect) {
                    self.push_polyline(&run, stroke);
                }
            }
            _ => self.push_polyline(points, stroke),
        }
        self.draw_markers(points, markers);
    }

    fn rect(&mut self, rect: ViewBox, fill: &FillStyle, stroke: &StrokeStyle) {
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.y),
            Point::new(rect.right(), rect.top()),
            Point::new(rect.x, rect.top()),
        ];
        match self.clip_state(&rect) {
            Overlap::Inside => {
                let d = path_data(&self.flip_all(&corners), true);
                self.push_path(d, fill, stroke);
            }
            Overlap::Partial => self.push_clipped_shape(&corners, fill, stroke),
            Overlap::Outside => {}
        }
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &FillStyle, stroke: &StrokeStyle) {
        let bounds = ViewBox::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
        match self.clip_state(&bounds) {
            Overlap::Inside => {
                let c = self.flip(center);
                let (color, width, dash) = stroke_attrs(stroke);
                self.nodes.push(SvgNode::Circle(SvgCircle {
                    cx: Some(c.x),
                    cy: Some(c.y),
                    r: Some(radius),
                    fill: Some(paint(&fill.color, fill.opacity)),
                    stroke: Some(color),
                    stroke_width: width,
                    stroke_dasharray: dash,
                    ..Default::default()
                }));
            }
            Overlap::Partial => {
                let mut outline = flatten_arc(center, radius, radius, 0.0, 0.0, 360.0);
                outline.pop();
                self.push_clipped_shape(&outline, fill, stroke);
            }
            Overlap::Outside => {}
        }
    }

    fn ellipse(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        fill: &FillStyle,
        stroke: &StrokeStyle,
    ) {
        let reach = rx.max(ry);
        let bounds = ViewBox::new(center.x - reach, center.y - reach, 2.0 * reach, 2.0 * reach);
        match self.clip_state(&bounds) {
            Overlap::Inside if rotation == 0.0 => {
                let c = self.flip(center);
                let (color, width, dash) = stroke_attrs(stroke);
                self.nodes.push(SvgNode::Ellipse(SvgEllipse {
                    cx: Some(c.x),
                    cy: Some(c.y),
                    rx: Some(rx),
                    ry: Some(ry),
                    fill: Some(paint(&fill.color, fill.opacity)),
                    stroke: Some(color),
                    stroke_width: width,
                    stroke_dasharray: dash,
                    ..Default::default()
                }));
            }
            Overlap::Inside => {
                let axis = Point::from_angle(rotation.to_radians()) * rx;
                let a = self.flip(center + axis);
                let b = self.flip(center - axis);
                let d = PathData::new()
                    .m(a.x, a.y)
                    .a(rx, ry, -rotation, false, false, b.x, b.y)
                    .a(rx, ry, -rotation, false, false, a.x, a.y)
                    .z();
                self.push_path(d, fill, stroke);
            }
            Overlap::Partial => {
                let mut outline = flatten_arc(center, rx, ry, rotation, 0.0, 360.0);
                outline.pop();
                self.push_clipped_shape(&outline, fill, stroke);
            }
            Overlap::Outside => {}
        }
    }

    fn arc(&mut self, center: Point, radius: f64, theta1: f64, theta2: f64, stroke: &StrokeStyle) {
        let t1 = theta1.rem_euclid(360.0);
        let mut t2 = theta2.rem_euclid(360.0);
        if t2 <= t1 {
            t2 += 360.0;
        }
        let bounds = ViewBox::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
        match self.clip_state(&bounds) {
            Overlap::Inside => {
                let start = self.flip(center + radius * Point::from_angle(t1.to_radians()));
                let end = self.flip(center + radius * Point::from_angle(t2.to_radians()));
                let d = PathData::new()
                    .m(start.x, start.y)
                    .a(radius, radius, 0.0, t2 - t1 > 180.0, false, end.x, end.y);
                self.push_path(d, &FillStyle::none(), stroke);
            }
            Overlap::Partial => {
                let points = flatten_arc(center, radius, radius, 0.0, t1, t2);
                self.path(&points, stroke, &PathMarkers::default());
            }
            Overlap::Outside => {}
        }
    }

    fn polygon(&mut self, points: &[Point], fill: &FillStyle, stroke: &StrokeStyle) {
        if points.is_empty() {
            return;
        }
        match self.clip_state(&bounds_of(points)) {
            Overlap::Inside => self.push_polygon(points, fill, stroke),
            Overlap::Partial => self.push_clipped_shape(points, fill, stroke),
            Overlap::Outside => {}
        }
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) -> Size {
        let p = self.flip(at);
        let anchor = match style.halign {
            Halign::Left => "start",
            Halign::Center => "middle",
            Halign::Right => "end",
        };
        let baseline = match style.valign {
            Valign::Top => "hanging",
            Valign::Center => "middle",
            Valign::Baseline | Valign::Bottom => "auto",
        };
        let transform = style
            .rotate
            .map(|rot| format!("rotate({} {} {})", fmt_num(-rot), fmt_num(p.x), fmt_num(p.y)));
        // Labels are never clipped to the data area
        self.nodes.push(SvgNode::Text(Text {
            x: Some(p.x),
            y: Some(p.y),
            transform,
            fill: Some(style.color.to_string()),
            font_family: Some(style.font.css_name().to_string()),
            font_size: Some(fmt_num(style.size)),
            text_anchor: Some(anchor.to_string()),
            dominant_baseline: Some(baseline.to_string()),
            content: Some(text.to_string()),
            ..Default::default()
        }));
        self.text_size(text, style)
    }

    fn define_marker(
        &mut self,
        shape: MarkerShape,
        radius: f64,
        fill: &Color,
        stroke: &StrokeStyle,
        orient: bool,
    ) -> String {
        let id = format!("dot{}", self.markers.len() + 1);
        self.markers.push(MarkerDef {
            id: id.clone(),
            shape,
            radius,
            fill: fill.clone(),
            stroke: stroke.clone(),
            orient,
        });
        id
    }

    fn clip(&mut self, area: Option<ViewBox>) {
        self.clip = area;
    }
}
