//! Contour lines of gridded data, with an optional colorbar, and implicit curves.

use std::fmt;
use std::rc::Rc;

use crate::contour::{Levels, LevelSegments, marching_squares};
use crate::errors::{ConfigError, RenderError};
use crate::log::{debug, warn};
use crate::numeric::linspace;
use crate::render::{FillStyle, Halign, PathMarkers, StrokeStyle, TextStyle, Valign};
use crate::style::{Color, ColorCycle};
use crate::types::{DataRange, Point, ViewBox, pt};

use super::{Common, Component, DrawContext, skip_degenerate};

/// Gap between a colorbar and its labels
const COLORBAR_LABEL_GAP: f64 = 3.0;

/// Edge of the data area a colorbar is drawn along
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorbarPos {
    Top,
    Bottom,
    Left,
    Right,
}

/// Contour plot of `z[row][col]` sampled at `(x[col], y[row])`
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    common: Common,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<Vec<f64>>,
    levels: Levels,
    fade: Option<ColorCycle>,
    colorbar: Option<ColorbarPos>,
}

impl Contour {
    /// Contours of a rectangular grid; fails when the shapes disagree
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        marching_squares(&x, &y, &z, &Levels::Values(Vec::new()))?;
        Ok(Contour {
            common: Common::default(),
            x,
            y,
            z,
            levels: Levels::default(),
            fade: None,
            colorbar: None,
        })
    }

    pub fn levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    /// Fade the level colors through `colors`, overriding the theme's contour fade
    pub fn colors(mut self, colors: &[Color], stops: Option<Vec<f64>>) -> Result<Self, ConfigError> {
        self.fade = Some(ColorCycle::fade(colors, stops)?);
        Ok(self)
    }

    pub fn colorbar(mut self, position: ColorbarPos) -> Self {
        self.colorbar = Some(position);
        self
    }

    /// Contour segments for every resolved level
    pub fn segments(&self) -> Result<Vec<LevelSegments>, ConfigError> {
        marching_squares(&self.x, &self.y, &self.z, &self.levels)
    }

    fn draw_colorbar(
        &self,
        ctx: &mut DrawContext<'_>,
        position: ColorbarPos,
        levels: &[f64],
        colors: &[Color],
    ) {
        let n = levels.len();
        if n == 0 {
            return;
        }
        let bar = ctx.theme.colorbar.clone();
        let diag = ctx.diagbox;
        let (m, width) = (bar.margin, bar.width);
        let horizontal = matches!(position, ColorbarPos::Top | ColorbarPos::Bottom);

        let span = if horizontal { diag.w } else { diag.h };
        let barwidth = ((span - 2.0 * m) / n as f64).floor();
        let length = barwidth * n as f64;
        debug!(?position, levels = n, barwidth, "drawing colorbar");

        let (x, y) = match position {
            ColorbarPos::Top => (diag.x + m, diag.top() - width - m * 2.5),
            ColorbarPos::Bottom => (diag.x + m, diag.y + m),
            ColorbarPos::Left => (diag.x + m, diag.y + m),
            ColorbarPos::Right => (diag.right() - width - m, diag.y + m),
        };
        let labelled = [0, n / 2, n - 1];

        for (i, (level, color)) in levels.iter().zip(colors).enumerate() {
            let offset = barwidth * (i as f64 + 0.5);
            let stroke = StrokeStyle::new(color.clone(), barwidth);
            let (ends, label_at, rotate) = if horizontal {
                let bx = x + offset;
                (
                    [pt(bx, y), pt(bx, y + width)],
                    pt(bx, y + width + COLORBAR_LABEL_GAP),
                    None,
                )
            } else {
                let by = y + offset;
                (
                    [pt(x, by), pt(x + width, by)],
                    pt(x - COLORBAR_LABEL_GAP, by),
                    Some(90.0),
                )
            };
            ctx.drawing.path(&ends, &stroke, &PathMarkers::default());
            if labelled.contains(&i) {
                let mut style = TextStyle::new(&bar, Halign::Center, Valign::Bottom);
                style.rotate = rotate;
                ctx.drawing.text(label_at, &bar.num_format.format(*level), &style);
            }
        }

        let outline = if horizontal {
            ViewBox::new(x, y, length, width)
        } else {
            ViewBox::new(x, y, width, length)
        };
        let edge = StrokeStyle::new(bar.edge_color.clone(), bar.stroke_width);
        ctx.drawing.rect(outline, &FillStyle::none(), &edge);
    }
}

impl Component for Contour {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn steps_color(&self) -> bool {
        false
    }

    fn datarange(&self) -> DataRange {
        let bounds = |v: &[f64]| {
            v.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
        };
        let (xmin, xmax) = bounds(&self.x);
        let (ymin, ymax) = bounds(&self.y);
        DataRange::new(xmin, xmax, ymin, ymax)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let contours = match self.segments() {
            Ok(contours) => contours,
            Err(_err) => {
                warn!(err = %_err, "contour grid rejected while drawing");
                return Ok(());
            }
        };
        let fade = self.fade.as_ref().unwrap_or(&ctx.theme.contour_fade);
        let colors = fade.colors(contours.len());

        let mut drawn = 0;
        for (contour, color) in contours.iter().zip(&colors) {
            let stroke = StrokeStyle {
                color: color.clone(),
                ..StrokeStyle::line(&ctx.style)
            };
            for (a, b) in &contour.segments {
                drawn += ctx.polyline(&[*a, *b], &stroke, &PathMarkers::default());
            }
        }
        if drawn == 0 {
            skip_degenerate("contour", &self.common);
        }

        if let Some(position) = self.colorbar {
            let levels: Vec<f64> = contours.iter().map(|c| c.level).collect();
            self.draw_colorbar(ctx, position, &levels, &colors);
        }
        Ok(())
    }
}

// ============================================================================
// Implicit
// ============================================================================

/// Default grid points along each axis when tracing an implicit curve
const IMPLICIT_SAMPLES: usize = 100;

/// Curve `f(x, y) = 0`, traced on a sampled grid
#[derive(Clone)]
pub struct Implicit {
    common: Common,
    func: Rc<dyn Fn(f64, f64) -> f64>,
    xlim: (f64, f64),
    ylim: (f64, f64),
    samples: usize,
}

impl fmt::Debug for Implicit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implicit")
            .field("xlim", &self.xlim)
            .field("ylim", &self.ylim)
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

impl Implicit {
    /// Trace `func` over `[-1, 1]` in both directions
    pub fn new(func: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Implicit {
            common: Common::default(),
            func: Rc::new(func),
            xlim: (-1.0, 1.0),
            ylim: (-1.0, 1.0),
            samples: IMPLICIT_SAMPLES,
        }
    }

    pub fn xlim(mut self, xmin: f64, xmax: f64) -> Self {
        self.xlim = (xmin, xmax);
        self
    }

    pub fn ylim(mut self, ymin: f64, ymax: f64) -> Self {
        self.ylim = (ymin, ymax);
        self
    }

    /// Grid points along each axis
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = n.max(2);
        self
    }

    /// Zero-level segments of the sampled grid
    pub fn segments(&self) -> Result<Vec<(Point, Point)>, ConfigError> {
        let x = linspace(self.xlim.0, self.xlim.1, self.samples);
        let y = linspace(self.ylim.0, self.ylim.1, self.samples);
        let z: Vec<Vec<f64>> = y
            .iter()
            .map(|&yy| x.iter().map(|&xx| (self.func)(xx, yy)).collect())
            .collect();
        let levels = marching_squares(&x, &y, &z, &Levels::Values(vec![0.0]))?;
        Ok(levels.into_iter().flat_map(|level| level.segments).collect())
    }
}

impl Component for Implicit {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        let (x1, x2) = self.xlim;
        let (y1, y2) = self.ylim;
        DataRange::new(x1.min(x2), x1.max(x2), y1.min(y2), y1.max(y2))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let segments = match self.segments() {
            Ok(segments) => segments,
            Err(_err) => {
                warn!(err = %_err, "implicit grid rejected while drawing");
                return Ok(());
            }
        };
        let stroke = StrokeStyle::line(&ctx.style);
        let mut drawn = 0;
        for (a, b) in &segments {
            drawn += ctx.polyline(&[*a, *b], &stroke, &PathMarkers::default());
        }
        if drawn == 0 {
            skip_degenerate("implicit", &self.common);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Primitive, Recorder};
    use crate::style::Theme;
    use crate::types::Transform;

    fn diamond() -> Contour {
        Contour::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
        .unwrap()
    }

    fn draw(component: &Contour) -> Recorder {
        let theme = Theme::default();
        let mut rec = Recorder::new();
        let databox = ViewBox::new(0.0, 0.0, 2.0, 2.0);
        let diagbox = ViewBox::new(0.0, 0.0, 200.0, 200.0);
        let mut ctx = DrawContext {
            drawing: &mut rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: component.resolved_style(&theme, &Color::BLACK),
        };
        component.draw(&mut ctx).unwrap();
        rec
    }

    // ==================== Construction tests ====================

    #[test]
    fn shape_mismatch_is_rejected_up_front() {
        let err = Contour::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, ConfigError::MismatchedLengths { .. }));
    }

    #[test]
    fn fade_needs_two_colors() {
        let err = diamond().colors(&[Color::BLACK], None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColorFade { .. }));
    }

    #[test]
    fn range_covers_the_grid() {
        assert_eq!(diamond().datarange(), DataRange::new(0.0, 2.0, 0.0, 2.0));
        assert!(!diamond().steps_color());
    }

    // ==================== Drawing tests ====================

    #[test]
    fn diamond_draws_four_segments_per_level() {
        let rec = draw(&diamond().levels(Levels::Values(vec![0.5])));
        assert_eq!(rec.paths().len(), 4);
    }

    #[test]
    fn level_colors_fade_from_first_to_last() {
        let contour = diamond()
            .levels(Levels::Values(vec![0.25, 0.75]))
            .colors(&[Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 0)], None)
            .unwrap();
        let rec = draw(&contour);
        let colors = rec.path_colors();
        assert_eq!(colors.first(), Some(&&Color::Rgb(0, 0, 0)));
        assert_eq!(colors.last(), Some(&&Color::Rgb(200, 100, 0)));
    }

    #[test]
    fn right_colorbar_has_bars_labels_and_outline() {
        let contour = diamond()
            .levels(Levels::Values(vec![0.25, 0.5, 0.75]))
            .colorbar(ColorbarPos::Right);
        let rec = draw(&contour);
        // 12 contour segments, then 3 bars
        assert_eq!(rec.paths().len(), 15);
        assert_eq!(rec.texts(), vec!["0.25", "0.5", "0.75"]);
        match rec.primitives().last() {
            Some(Primitive::Rect { rect, .. }) => {
                // floor((200 - 16) / 3) = 61
                assert_eq!(*rect, ViewBox::new(172.0, 8.0, 20.0, 183.0));
            }
            other => panic!("expected the colorbar outline, got {other:?}"),
        }
    }

    // ==================== Implicit tests ====================

    fn draw_implicit(curve: &Implicit) -> Recorder {
        let theme = Theme::default();
        let mut rec = Recorder::new();
        let databox = ViewBox::new(-2.0, -2.0, 4.0, 4.0);
        let diagbox = ViewBox::new(0.0, 0.0, 400.0, 400.0);
        let mut ctx = DrawContext {
            drawing: &mut rec,
            theme: &theme,
            transform: Transform::new(databox, diagbox),
            databox,
            diagbox,
            style: curve.resolved_style(&theme, &Color::Rgb(5, 6, 7)),
        };
        curve.draw(&mut ctx).unwrap();
        rec
    }

    #[test]
    fn implicit_circle_lies_on_the_unit_circle() {
        let curve = Implicit::new(|x, y| x * x + y * y - 1.0)
            .xlim(-2.0, 2.0)
            .ylim(-2.0, 2.0)
            .samples(41);
        assert_eq!(curve.datarange(), DataRange::new(-2.0, 2.0, -2.0, 2.0));
        let segments = curve.segments().unwrap();
        assert!(segments.len() > 20);
        for (a, b) in &segments {
            assert!((a.length() - 1.0).abs() < 0.02, "{a:?}");
            assert!((b.length() - 1.0).abs() < 0.02, "{b:?}");
        }
        let rec = draw_implicit(&curve);
        assert_eq!(rec.paths().len(), segments.len());
        assert!(rec.path_colors().iter().all(|c| **c == Color::Rgb(5, 6, 7)));
    }

    #[test]
    fn implicit_without_zero_draws_nothing() {
        let curve = Implicit::new(|x, y| x * x + y * y + 1.0).samples(5);
        assert!(curve.segments().unwrap().is_empty());
        assert!(draw_implicit(&curve).primitives().is_empty());
    }
}
