//! Colors, stroke and marker styles, themes.
//!
//! A [`Theme`] holds one fully resolved [`Style`] per diagram part. Components carry a
//! [`StyleOverride`] with only the fields the user set; [`StyleOverride::resolve`]
//! merges it onto the theme's base so render code never sees an unset value.

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::format::NumberFormat;
use crate::numeric::{interpolate, linspace};
use crate::render::defaults;

// ============================================================================
// Color
// ============================================================================

/// A paint value
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// No paint
    None,
    Rgb(u8, u8, u8),
    /// SVG color keyword, kept lowercase
    Named(String),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub fn is_none(&self) -> bool {
        matches!(self, Color::None)
    }

    /// Linear interpolation between two RGB colors, truncating each channel
    pub fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> Color {
        let mix = |x: u8, y: u8| interpolate(0.0, 1.0, f64::from(x), f64::from(y), t) as u8;
        Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

/// Parse one of the built-in color constants
pub(crate) fn color(spec: &str) -> Color {
    spec.parse().unwrap_or(Color::BLACK)
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor {
            spec: spec.to_string(),
        };
        let s = spec.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Color::None);
        }
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |i: usize, w: usize| -> Result<u8, ConfigError> {
                let v = u8::from_str_radix(&hex[i * w..(i + 1) * w], 16).map_err(|_| invalid())?;
                Ok(if w == 1 { v * 17 } else { v })
            };
            return match hex.len() {
                3 => Ok(Color::Rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
                6 => Ok(Color::Rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
                _ => Err(invalid()),
            };
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(Color::Named(s.to_ascii_lowercase()));
        }
        Err(invalid())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Named(s) => write!(f, "{s}"),
        }
    }
}

// ============================================================================
// Color cycles
// ============================================================================

/// Colors handed out to components that do not set their own
#[derive(Clone, Debug, PartialEq)]
pub enum ColorCycle {
    /// Repeat a fixed list
    Cycle(Vec<Color>),
    /// Fade through RGB stops, one step per colored component
    Fade {
        colors: Vec<(u8, u8, u8)>,
        stops: Vec<f64>,
    },
}

impl Default for ColorCycle {
    fn default() -> Self {
        ColorCycle::Cycle(defaults::COLOR_CYCLE.iter().map(|c| color(c)).collect())
    }
}

impl ColorCycle {
    pub fn cycle(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyData {
                what: "color cycle",
            });
        }
        Ok(ColorCycle::Cycle(colors))
    }

    /// Fade between two or more RGB colors, evenly spaced unless `stops` are given.
    ///
    /// Stops must match the colors one to one, start at 0 and end at 1.
    pub fn fade(colors: &[Color], stops: Option<Vec<f64>>) -> Result<Self, ConfigError> {
        let bad = |reason: &str| ConfigError::InvalidColorFade {
            reason: reason.to_string(),
        };
        if colors.len() < 2 {
            return Err(bad("need at least two colors"));
        }
        let rgb = colors
            .iter()
            .map(|c| match c {
                Color::Rgb(r, g, b) => Ok((*r, *g, *b)),
                _ => Err(bad("colors must be hex RGB values")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let stops = match stops {
            Some(s) if s.len() != rgb.len() => {
                return Err(bad("stops must be the same length as colors"));
            }
            Some(s) if s[0] != 0.0 || s[s.len() - 1] != 1.0 => {
                return Err(bad("first stop must be 0 and last stop must be 1"));
            }
            Some(s) => s,
            None => linspace(0.0, 1.0, rgb.len()),
        };
        Ok(ColorCycle::Fade { colors: rgb, stops })
    }

    /// Color for item `index` of `count` colored items
    pub fn color(&self, index: usize, count: usize) -> Color {
        match self {
            ColorCycle::Cycle(colors) => colors[index % colors.len()].clone(),
            ColorCycle::Fade { colors, stops } => {
                let t = if count < 2 {
                    0.0
                } else {
                    index.min(count - 1) as f64 / (count - 1) as f64
                };
                let seg = stops
                    .windows(2)
                    .position(|w| t <= w[1])
                    .unwrap_or(stops.len() - 2);
                let local = (t - stops[seg]) / (stops[seg + 1] - stops[seg]);
                Color::lerp(colors[seg], colors[seg + 1], local.clamp(0.0, 1.0))
            }
        }
    }

    /// The first `count` colors
    pub fn colors(&self, count: usize) -> Vec<Color> {
        (0..count).map(|i| self.color(i, count)).collect()
    }
}

// ============================================================================
// Stroke, marker and font
// ============================================================================

/// Line dash pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl Dash {
    /// SVG `stroke-dasharray` for a line of the given width
    pub fn dasharray(&self, width: f64) -> Option<Vec<f64>> {
        match self {
            Dash::Solid => None,
            Dash::Dotted => Some(vec![width, width]),
            Dash::Dashed => Some(vec![width * 3.0, width * 4.0]),
            Dash::DashDot => Some(vec![width * 3.0, width, width / 2.0, width]),
        }
    }
}

/// Marker glyph drawn at data points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Round,
    Square,
    Triangle,
    TriangleDown,
    LeftArrow,
    RightArrow,
    Plus,
    Cross,
    HBar,
    VBar,
}

impl FromStr for MarkerShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "round" | "o" => MarkerShape::Round,
            "square" | "s" => MarkerShape::Square,
            "triangle" | "^" => MarkerShape::Triangle,
            "triangled" | "v" => MarkerShape::TriangleDown,
            "larrow" | "<" => MarkerShape::LeftArrow,
            "arrow" | ">" => MarkerShape::RightArrow,
            "+" => MarkerShape::Plus,
            "x" => MarkerShape::Cross,
            "-" => MarkerShape::HBar,
            "|" => MarkerShape::VBar,
            _ => {
                return Err(ConfigError::InvalidMarker {
                    name: s.to_string(),
                });
            }
        })
    }
}

/// Font family class, used for text-width estimates and the SVG `font-family`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
}

impl FontFamily {
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
        }
    }
}

// ============================================================================
// Style
// ============================================================================

/// Fully resolved style of one drawable part
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub color: Color,
    pub edge_color: Color,
    pub stroke: Dash,
    pub stroke_width: f64,
    pub opacity: f64,
    pub marker: Option<MarkerShape>,
    pub radius: f64,
    pub edge_width: f64,
    pub font: FontFamily,
    pub font_size: f64,
    pub num_format: NumberFormat,
    pub height: f64,
    pub width: f64,
    pub margin: f64,
    pub pad: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: Color::BLACK,
            edge_color: Color::BLACK,
            stroke: Dash::Solid,
            stroke_width: defaults::STROKE_WIDTH,
            opacity: 1.0,
            marker: None,
            radius: defaults::MARKER_RADIUS,
            edge_width: defaults::EDGE_WIDTH,
            font: FontFamily::SansSerif,
            font_size: defaults::FONT_SIZE,
            num_format: NumberFormat::default(),
            height: 0.0,
            width: 0.0,
            margin: 0.0,
            pad: 0.0,
        }
    }
}

impl Style {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Per-component style settings; unset fields fall back to the theme
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyleOverride {
    pub color: Option<Color>,
    pub edge_color: Option<Color>,
    pub stroke: Option<Dash>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub marker: Option<Option<MarkerShape>>,
    pub radius: Option<f64>,
    pub edge_width: Option<f64>,
    pub font: Option<FontFamily>,
    pub font_size: Option<f64>,
    pub num_format: Option<NumberFormat>,
}

impl StyleOverride {
    /// `base` with every set field replaced
    pub fn resolve(&self, base: &Style) -> Style {
        Style {
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            edge_color: self
                .edge_color
                .clone()
                .unwrap_or_else(|| base.edge_color.clone()),
            stroke: self.stroke.unwrap_or(base.stroke),
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            opacity: self.opacity.unwrap_or(base.opacity),
            marker: self.marker.unwrap_or(base.marker),
            radius: self.radius.unwrap_or(base.radius),
            edge_width: self.edge_width.unwrap_or(base.edge_width),
            font: self.font.unwrap_or(base.font),
            font_size: self.font_size.unwrap_or(base.font_size),
            num_format: self.num_format.unwrap_or(base.num_format),
            ..base.clone()
        }
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Names accepted by [`Theme::named`]
pub const THEME_NAMES: [&str; 8] = [
    "default",
    "lobo",
    "taffy",
    "pastel",
    "bold",
    "dark",
    "darktaffy",
    "darkbold",
];

/// Resolved styles for every part of a diagram
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Canvas background (color) and default size (width, height)
    pub canvas: Style,
    /// Data-area fill and frame edge
    pub frame: Style,
    pub grid_x: Style,
    pub grid_y: Style,
    pub title: Style,
    pub x_name: Style,
    pub y_name: Style,
    pub legend: Style,
    pub legend_text: Style,
    pub tick_x: Style,
    pub tick_x_minor: Style,
    pub tick_y: Style,
    pub tick_y_minor: Style,
    pub polar: Style,
    pub smith_grid: Style,
    pub smith_grid_minor: Style,
    /// Base style of data components (lines, bars, functions)
    pub series: Style,
    pub scatter: Style,
    pub point: Style,
    pub point_text: Style,
    pub point_guide: Style,
    pub shape: Style,
    /// Whisker caps of error bars; x whiskers use the vertical bar instead
    pub error_bar: Style,
    pub line_fill: Style,
    pub integral_fill: Style,
    /// Free-standing text annotations
    pub text: Style,
    pub colorbar: Style,
    pub contour_fade: ColorCycle,
    pub cycle: ColorCycle,
}

impl Default for Theme {
    fn default() -> Self {
        let base = Style::default();
        let tick = Style {
            font_size: defaults::TICK_FONT_SIZE,
            height: defaults::TICK_LENGTH,
            stroke_width: defaults::TICK_WIDTH,
            margin: defaults::TICK_MARGIN,
            pad: crate::ticks::DEFAULT_PAD,
            ..base.clone()
        };
        let minor = Style {
            height: defaults::MINOR_TICK_LENGTH,
            stroke_width: defaults::MINOR_TICK_WIDTH,
            ..tick.clone()
        };
        let grid = Style {
            color: color(defaults::GRID_COLOR),
            stroke: Dash::Dashed,
            stroke_width: defaults::GRID_WIDTH,
            ..base.clone()
        };
        let guide = Style {
            stroke: Dash::Dotted,
            stroke_width: defaults::POINT_GUIDE_WIDTH,
            ..base.clone()
        };
        let fade = [color(defaults::CONTOUR_FADE[0]), color(defaults::CONTOUR_FADE[1])];

        Theme {
            canvas: Style {
                color: Color::None,
                width: defaults::CANVAS_WIDTH,
                height: defaults::CANVAS_HEIGHT,
                ..base.clone()
            },
            frame: Style {
                color: color(defaults::FRAME_FILL),
                edge_width: defaults::FRAME_EDGE_WIDTH,
                font_size: defaults::FRAME_FONT_SIZE,
                ..base.clone()
            },
            grid_x: grid.clone(),
            grid_y: grid,
            title: Style {
                font_size: defaults::TITLE_FONT_SIZE,
                ..base.clone()
            },
            x_name: Style {
                font_size: defaults::AXIS_NAME_FONT_SIZE,
                ..base.clone()
            },
            y_name: Style {
                font_size: defaults::AXIS_NAME_FONT_SIZE,
                ..base.clone()
            },
            legend: Style {
                color: Color::None,
                stroke_width: defaults::LEGEND_STROKE_WIDTH,
                radius: defaults::LEGEND_RADIUS,
                margin: defaults::LEGEND_MARGIN,
                pad: defaults::LEGEND_PAD,
                ..base.clone()
            },
            legend_text: Style {
                font_size: defaults::LEGEND_FONT_SIZE,
                margin: defaults::LEGEND_TEXT_MARGIN,
                ..base.clone()
            },
            tick_x: tick.clone(),
            tick_x_minor: minor.clone(),
            tick_y: tick,
            tick_y_minor: minor,
            polar: Style {
                pad: defaults::POLAR_PAD,
                margin: defaults::POLAR_MARGIN,
                ..base.clone()
            },
            smith_grid: Style {
                color: color(defaults::SMITH_GRID_COLOR),
                stroke_width: defaults::SMITH_GRID_WIDTH,
                ..base.clone()
            },
            smith_grid_minor: Style {
                color: color(defaults::SMITH_GRID_MINOR_COLOR),
                stroke_width: defaults::SMITH_GRID_MINOR_WIDTH,
                ..base.clone()
            },
            series: base.clone(),
            scatter: Style {
                marker: Some(MarkerShape::Round),
                ..base.clone()
            },
            point: Style {
                color: color(defaults::POINT_COLOR),
                marker: Some(MarkerShape::Round),
                stroke_width: 1.0,
                radius: defaults::POINT_RADIUS,
                ..base.clone()
            },
            point_text: Style {
                font_size: defaults::POINT_FONT_SIZE,
                margin: defaults::POINT_TEXT_MARGIN,
                ..base.clone()
            },
            point_guide: guide,
            shape: Style {
                color: Color::None,
                ..base.clone()
            },
            error_bar: Style {
                marker: Some(MarkerShape::HBar),
                radius: defaults::ERROR_BAR_CAP_RADIUS,
                ..base.clone()
            },
            line_fill: Style {
                opacity: defaults::LINE_FILL_OPACITY,
                ..base.clone()
            },
            integral_fill: Style {
                opacity: defaults::INTEGRAL_FILL_OPACITY,
                ..base.clone()
            },
            text: base.clone(),
            colorbar: Style {
                stroke_width: 1.0,
                width: defaults::COLORBAR_WIDTH,
                margin: defaults::COLORBAR_MARGIN,
                num_format: NumberFormat::General(3),
                ..base
            },
            contour_fade: ColorCycle::Fade {
                colors: fade
                    .iter()
                    .map(|c| match c {
                        Color::Rgb(r, g, b) => (*r, *g, *b),
                        _ => (0, 0, 0),
                    })
                    .collect(),
                stops: vec![0.0, 1.0],
            },
            cycle: ColorCycle::default(),
        }
    }
}

impl Theme {
    /// One of the bundled themes, see [`THEME_NAMES`]
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        let mut theme = Theme::default();
        let cycle = |list: &[&str]| ColorCycle::Cycle(list.iter().map(|c| color(c)).collect());
        match name {
            "default" | "lobo" => {}
            "taffy" => theme.cycle = cycle(&defaults::TAFFY_CYCLE),
            "pastel" => {
                theme.set_foreground(color("#444444"), color("#555555"));
                theme.frame.color = color("#fafafa");
                theme.point.color = color("#7589bf");
                theme.cycle = cycle(&defaults::PASTEL_CYCLE);
            }
            "bold" => {
                theme.point.color = color("#00aa00");
                theme.cycle = cycle(&defaults::BOLD_CYCLE);
            }
            "dark" | "darktaffy" | "darkbold" => {
                theme.set_foreground(color("#cccccc"), color("#777777"));
                theme.canvas.color = Color::BLACK;
                theme.frame.color = Color::BLACK;
                theme.frame.edge_color = color("#cccccc");
                match name {
                    "darktaffy" => theme.cycle = cycle(&defaults::TAFFY_CYCLE),
                    "darkbold" => {
                        theme.point.color = color("#00aa00");
                        theme.cycle = cycle(&defaults::BOLD_CYCLE);
                    }
                    _ => {}
                }
            }
            _ => {
                return Err(ConfigError::UnknownTheme {
                    name: name.to_string(),
                    valid: THEME_NAMES.join(", "),
                });
            }
        }
        Ok(theme)
    }

    /// Text and line color of every part that uses the base foreground
    fn set_foreground(&mut self, fg: Color, edge: Color) {
        for style in [
            &mut self.title,
            &mut self.x_name,
            &mut self.y_name,
            &mut self.legend_text,
            &mut self.tick_x,
            &mut self.tick_x_minor,
            &mut self.tick_y,
            &mut self.tick_y_minor,
            &mut self.series,
            &mut self.scatter,
            &mut self.point_text,
            &mut self.error_bar,
            &mut self.line_fill,
            &mut self.text,
            &mut self.colorbar,
        ] {
            style.color = fg.clone();
            style.edge_color = edge.clone();
        }
        self.frame.edge_color = edge.clone();
        self.legend.edge_color = edge.clone();
        self.shape.edge_color = edge;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    // ==================== Color tests ====================

    #[test]
    fn parse_colors() {
        assert_eq!("#ba0c2f".parse(), Ok(Color::Rgb(0xba, 0x0c, 0x2f)));
        assert_eq!("#fff".parse(), Ok(Color::WHITE));
        assert_eq!("None".parse(), Ok(Color::None));
        assert_eq!("Red".parse(), Ok(Color::Named("red".into())));
        for bad in ["#12345", "#ggg", "", "rgb(1,2,3)"] {
            assert!(matches!(
                bad.parse::<Color>(),
                Err(ConfigError::InvalidColor { .. })
            ));
        }
        assert_eq!(Color::Rgb(0, 122, 134).to_string(), "#007a86");
    }

    #[test]
    fn fade_interpolates_endpoints() {
        let fade = ColorCycle::fade(&[color("#000000"), color("#ff0080")], None).unwrap();
        let colors = fade.colors(3);
        assert_eq!(colors[0], Color::Rgb(0, 0, 0));
        assert_eq!(colors[1], Color::Rgb(127, 0, 64));
        assert_eq!(colors[2], Color::Rgb(255, 0, 128));
    }

    #[test]
    fn fade_validates_inputs() {
        assert!(ColorCycle::fade(&[color("red"), color("#000000")], None).is_err());
        assert!(ColorCycle::fade(&[color("#000000")], None).is_err());
        assert!(
            ColorCycle::fade(&[color("#000000"), color("#ffffff")], Some(vec![0.1, 1.0]))
                .is_err()
        );
    }

    #[test]
    fn cycle_wraps() {
        let cycle = ColorCycle::default();
        assert_eq!(cycle.color(10, 0), cycle.color(0, 0));
        assert_eq!(cycle.color(2, 0).to_string(), "#007a86");
    }

    // ==================== Style tests ====================

    #[test]
    fn override_resolves_only_set_fields() {
        let base = Style::default();
        let over = StyleOverride {
            stroke: Some(Dash::Dashed),
            marker: Some(Some(MarkerShape::Square)),
            ..StyleOverride::default()
        };
        let style = over.resolve(&base);
        assert_eq!(style.stroke, Dash::Dashed);
        assert_eq!(style.marker, Some(MarkerShape::Square));
        assert_eq!(style.color, base.color);
        assert_eq!(style.stroke_width, base.stroke_width);
    }

    #[test]
    fn dash_patterns_scale_with_width() {
        assert_eq!(Dash::Solid.dasharray(2.0), None);
        assert_eq!(Dash::Dashed.dasharray(2.0), Some(vec![6.0, 8.0]));
        assert_eq!(Dash::DashDot.dasharray(2.0), Some(vec![6.0, 2.0, 1.0, 2.0]));
    }

    // ==================== Theme tests ====================

    #[test]
    fn named_themes() {
        for name in THEME_NAMES {
            assert!(Theme::named(name).is_ok(), "{name}");
        }
        let err = Theme::named("neon").unwrap_err();
        assert!(err.help().is_some_and(|h| h.to_string().contains("darkbold")));
        assert_eq!(Theme::named("dark").unwrap().canvas.color, Color::BLACK);
    }
}
