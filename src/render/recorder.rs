//! A [`Drawing`] that records primitives instead of producing output.
//!
//! Used by tests to inspect what a diagram drew, and handy for debugging layout.

use crate::style::{Color, MarkerShape};
use crate::types::{Point, Size, ViewBox};

use super::text::estimate_text_size;
use super::{Drawing, FillStyle, PathMarkers, StrokeStyle, TextMetrics, TextStyle};

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Path {
        points: Vec<Point>,
        stroke: StrokeStyle,
        markers: PathMarkers,
    },
    Rect {
        rect: ViewBox,
        fill: FillStyle,
        stroke: StrokeStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: FillStyle,
        stroke: StrokeStyle,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        fill: FillStyle,
        stroke: StrokeStyle,
    },
    Arc {
        center: Point,
        radius: f64,
        theta1: f64,
        theta2: f64,
        stroke: StrokeStyle,
    },
    Polygon {
        points: Vec<Point>,
        fill: FillStyle,
        stroke: StrokeStyle,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
    Marker {
        id: String,
        shape: MarkerShape,
        radius: f64,
        fill: Color,
    },
    Clip(Option<ViewBox>),
}

/// Records every primitive in call order
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    primitives: Vec<Primitive>,
    markers: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Strings passed to `text`, in order
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Point lists passed to `path`, in order
    pub fn paths(&self) -> Vec<&[Point]> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Path { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Stroke colors of all paths, in order
    pub fn path_colors(&self) -> Vec<&Color> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Path { stroke, .. } => Some(&stroke.color),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| pred(p)).count()
    }
}

impl TextMetrics for Recorder {
    fn text_size(&self, text: &str, style: &TextStyle) -> Size {
        estimate_text_size(text, style.size, style.font)
    }
}

impl Drawing for Recorder {
    fn path(&mut self, points: &[Point], stroke: &StrokeStyle, markers: &PathMarkers) {
        self.primitives.push(Primitive::Path {
            points: points.to_vec(),
            stroke: stroke.clone(),
            markers: markers.clone(),
        });
    }

    fn rect(&mut self, rect: ViewBox, fill: &FillStyle, stroke: &StrokeStyle) {
        self.primitives.push(Primitive::Rect {
            rect,
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &FillStyle, stroke: &StrokeStyle) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
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
        self.primitives.push(Primitive::Ellipse {
            center,
            rx,
            ry,
            rotation,
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
    }

    fn arc(&mut self, center: Point, radius: f64, theta1: f64, theta2: f64, stroke: &StrokeStyle) {
        self.primitives.push(Primitive::Arc {
            center,
            radius,
            theta1,
            theta2,
            stroke: stroke.clone(),
        });
    }

    fn polygon(&mut self, points: &[Point], fill: &FillStyle, stroke: &StrokeStyle) {
        self.primitives.push(Primitive::Polygon {
            points: points.to_vec(),
            fill: fill.clone(),
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) -> Size {
        self.primitives.push(Primitive::Text {
            at,
            text: text.to_string(),
            style: style.clone(),
        });
        self.text_size(text, style)
    }

    fn define_marker(
        &mut self,
        shape: MarkerShape,
        radius: f64,
        fill: &Color,
        _stroke: &StrokeStyle,
        _orient: bool,
    ) -> String {
        self.markers += 1;
        let id = format!("dot{}", self.markers);
        self.primitives.push(Primitive::Marker {
            id: id.clone(),
            shape,
            radius,
            fill: fill.clone(),
        });
        id
    }

    fn clip(&mut self, area: Option<ViewBox>) {
        self.primitives.push(Primitive::Clip(area));
    }
}
