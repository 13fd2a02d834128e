//! Drawing backends for diagrams
//!
//! Diagrams draw through the [`Drawing`] trait in device space: y up, origin at the
//! lower-left of the canvas. This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `text`: Text-size estimates from per-character widths
//! - `svg`: SVG document writer
//! - `clip`: Geometric clipping used by the SVG writer
//! - `recorder`: Backend that stores primitives for inspection

pub(crate) mod clip;
pub mod defaults;
pub mod recorder;
pub mod svg;
pub mod text;

pub use recorder::{Primitive, Recorder};
pub use svg::{SvgDrawing, SvgOptions};

use crate::style::{Color, Dash, FontFamily, MarkerShape, Style};
use crate::types::{Point, Size, ViewBox};

/// Horizontal text anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Halign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Valign {
    Top,
    Center,
    Baseline,
    #[default]
    Bottom,
}

/// Compass position of a label relative to its anchor point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextPosition {
    N,
    #[default]
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl TextPosition {
    /// Device offset from the anchor and the alignment that keeps the text clear of it
    pub fn offset(self, margin: f64) -> (Point, Halign, Valign) {
        let (dx, halign) = match self {
            TextPosition::N | TextPosition::S => (0.0, Halign::Center),
            TextPosition::NE | TextPosition::E | TextPosition::SE => (margin, Halign::Left),
            TextPosition::NW | TextPosition::W | TextPosition::SW => (-margin, Halign::Right),
        };
        let (dy, valign) = match self {
            TextPosition::E | TextPosition::W => (0.0, Valign::Center),
            TextPosition::N | TextPosition::NE | TextPosition::NW => (margin, Valign::Bottom),
            TextPosition::S | TextPosition::SE | TextPosition::SW => (-margin, Valign::Top),
        };
        (Point::new(dx, dy), halign, valign)
    }
}

/// Outline of a path or shape
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Dash,
    pub opacity: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        StrokeStyle {
            color,
            width,
            dash: Dash::Solid,
            opacity: 1.0,
        }
    }

    pub fn none() -> Self {
        StrokeStyle::new(Color::None, 0.0)
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = dash;
        self
    }

    /// Line drawn in the style's main color
    pub fn line(style: &Style) -> Self {
        StrokeStyle {
            color: style.color.clone(),
            width: style.stroke_width,
            dash: style.stroke,
            opacity: style.opacity,
        }
    }

    /// Border of a filled shape
    pub fn edge(style: &Style) -> Self {
        StrokeStyle::new(style.edge_color.clone(), style.edge_width)
    }

    /// Outline of a shape: edge color with the style's line width and dash
    pub fn outline(style: &Style) -> Self {
        StrokeStyle {
            color: style.edge_color.clone(),
            width: style.stroke_width,
            dash: style.stroke,
            opacity: style.opacity,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.color.is_none() && self.width > 0.0
    }
}

/// Interior paint of a closed shape
#[derive(Clone, Debug, PartialEq)]
pub struct FillStyle {
    pub color: Color,
    pub opacity: f64,
}

impl FillStyle {
    pub fn new(color: Color) -> Self {
        FillStyle {
            color,
            opacity: 1.0,
        }
    }

    pub fn none() -> Self {
        FillStyle::new(Color::None)
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// How a string is drawn
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font: FontFamily,
    pub size: f64,
    pub halign: Halign,
    pub valign: Valign,
    /// Counter-clockwise rotation in degrees about the anchor
    pub rotate: Option<f64>,
}

impl TextStyle {
    pub fn new(style: &Style, halign: Halign, valign: Valign) -> Self {
        TextStyle {
            color: style.color.clone(),
            font: style.font,
            size: style.font_size,
            halign,
            valign,
            rotate: None,
        }
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::new(&Style::default(), Halign::Left, Valign::Bottom)
    }
}

/// Marker references attached to a path
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PathMarkers {
    /// Marker at every vertex
    pub all: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PathMarkers {
    pub fn every(id: String) -> Self {
        PathMarkers {
            all: Some(id),
            ..PathMarkers::default()
        }
    }
}

/// Measures text before anything is drawn.
///
/// Layout needs label sizes to place the frame, so measurement is separate from
/// drawing.
pub trait TextMetrics {
    fn text_size(&self, text: &str, style: &TextStyle) -> Size;
}

/// A drawing surface in device coordinates (y up)
pub trait Drawing: TextMetrics {
    fn path(&mut self, points: &[Point], stroke: &StrokeStyle, markers: &PathMarkers);

    fn rect(&mut self, rect: ViewBox, fill: &FillStyle, stroke: &StrokeStyle);

    fn circle(&mut self, center: Point, radius: f64, fill: &FillStyle, stroke: &StrokeStyle);

    /// Ellipse with radii `rx`, `ry` rotated counter-clockwise by `rotation` degrees
    fn ellipse(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        fill: &FillStyle,
        stroke: &StrokeStyle,
    );

    /// Open arc counter-clockwise from `theta1` to `theta2` degrees
    fn arc(&mut self, center: Point, radius: f64, theta1: f64, theta2: f64, stroke: &StrokeStyle);

    fn polygon(&mut self, points: &[Point], fill: &FillStyle, stroke: &StrokeStyle);

    /// Draw `text` anchored at `at`, returning its size
    fn text(&mut self, at: Point, text: &str, style: &TextStyle) -> Size;

    /// Register a marker glyph and return the id paths refer to it by
    fn define_marker(
        &mut self,
        shape: MarkerShape,
        radius: f64,
        fill: &Color,
        stroke: &StrokeStyle,
        orient: bool,
    ) -> String;

    /// Clip subsequent primitives to `area`, or stop clipping with `None`
    fn clip(&mut self, area: Option<ViewBox>);
}
