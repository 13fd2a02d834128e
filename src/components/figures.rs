//! Smooth curves: functions, Bezier curves and splines, and fills under functions.

use crate::curves::{Function, Spline};
use crate::errors::{GeometryError, RenderError};
use crate::geometry::Bezier;
use crate::geometry::bezier::DEFAULT_SAMPLES;
use crate::numeric::{linspace, root};
use crate::render::{FillStyle, PathMarkers, StrokeStyle};
use crate::style::{MarkerShape, Style, Theme};
use crate::types::{DataRange, Point, pt};

use super::{Common, Component, DrawContext, MarkerRequest, log10, skip_degenerate};

/// Samples per cubic segment when drawing a spline
const SPLINE_SAMPLES: usize = 25;

/// Arrowheads or other markers at the ends of an open curve
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct EndMarkers {
    start: Option<MarkerShape>,
    end: Option<MarkerShape>,
}

impl From<EndMarkers> for MarkerRequest {
    fn from(ends: EndMarkers) -> Self {
        MarkerRequest::Ends(ends.start, ends.end)
    }
}

// ============================================================================
// FunctionCurve
// ============================================================================

/// Graph of `y = f(x)`, over its own domain or the visible x range
#[derive(Clone, Debug)]
pub struct FunctionCurve {
    common: Common,
    func: Function,
    ends: EndMarkers,
    log_x: bool,
    log_y: bool,
}

impl FunctionCurve {
    pub fn new(func: Function) -> Self {
        FunctionCurve {
            common: Common::default(),
            func,
            ends: EndMarkers::default(),
            log_x: false,
            log_y: false,
        }
    }

    /// Markers at the first and last sample, oriented along the curve
    pub fn endmarkers(mut self, start: Option<MarkerShape>, end: Option<MarkerShape>) -> Self {
        self.ends = EndMarkers { start, end };
        self
    }

    pub fn function(&self) -> &Function {
        &self.func
    }

    /// Sample points in plotting coordinates; `x_span` is in the same space
    fn sample(&self, x_span: (f64, f64)) -> Vec<Point> {
        linspace(x_span.0, x_span.1, self.func.sample_count())
            .into_iter()
            .map(|x| {
                let fx = if self.log_x { 10f64.powf(x) } else { x };
                let y = self.func.y(fx);
                pt(x, if self.log_y { log10(y) } else { y })
            })
            .collect()
    }
}

impl Component for FunctionCurve {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        self.func.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let span = match self.func.get_domain() {
            Some((x1, x2)) if self.log_x => (log10(x1), log10(x2)),
            Some(domain) => domain,
            None => (ctx.databox.x, ctx.databox.right()),
        };
        let points = self.sample(span);
        let stroke = StrokeStyle::line(&ctx.style);
        if ctx.marked_polyline(&points, &stroke, self.ends.into()) == 0 {
            skip_degenerate("function", &self.common);
        }
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        self.log_x |= x;
        self.log_y |= y;
    }
}

// ============================================================================
// BezierCurve
// ============================================================================

/// Quadratic or cubic Bezier curve
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    common: Common,
    curve: Bezier,
    ends: EndMarkers,
}

impl BezierCurve {
    pub fn new(curve: Bezier) -> Self {
        BezierCurve {
            common: Common::default(),
            curve,
            ends: EndMarkers::default(),
        }
    }

    pub fn quadratic(p1: Point, p2: Point, p3: Point) -> Self {
        BezierCurve::new(Bezier::Quadratic(p1, p2, p3))
    }

    pub fn cubic(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        BezierCurve::new(Bezier::Cubic(p1, p2, p3, p4))
    }

    pub fn endmarkers(mut self, start: Option<MarkerShape>, end: Option<MarkerShape>) -> Self {
        self.ends = EndMarkers { start, end };
        self
    }

    pub fn curve(&self) -> &Bezier {
        &self.curve
    }
}

impl Component for BezierCurve {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        self.curve.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let points = self.curve.sample(DEFAULT_SAMPLES);
        let stroke = StrokeStyle::line(&ctx.style);
        if ctx.marked_polyline(&points, &stroke, self.ends.into()) == 0 {
            skip_degenerate("bezier", &self.common);
        }
        Ok(())
    }
}

// ============================================================================
// SplineCurve
// ============================================================================

/// Chain of cubic Bezier segments
#[derive(Clone, Debug, PartialEq)]
pub struct SplineCurve {
    common: Common,
    spline: Spline,
}

impl SplineCurve {
    /// Spline from `3n + 1` control points
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        Ok(SplineCurve::from_spline(Spline::new(points)?))
    }

    /// Smooth curve passing through every point in `points`
    pub fn hobby(points: &[Point], omega: f64) -> Result<Self, GeometryError> {
        Ok(SplineCurve::from_spline(Spline::hobby(points, omega)?))
    }

    pub fn from_spline(spline: Spline) -> Self {
        SplineCurve {
            common: Common::default(),
            spline,
        }
    }

    pub fn spline(&self) -> &Spline {
        &self.spline
    }
}

impl Component for SplineCurve {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        self.spline.datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let points = self.spline.sample(SPLINE_SAMPLES);
        let stroke = StrokeStyle::line(&ctx.style);
        if ctx.polyline(&points, &stroke, &PathMarkers::default()) == 0 {
            skip_degenerate("spline", &self.common);
        }
        Ok(())
    }
}

// ============================================================================
// IntegralFill
// ============================================================================

/// Area under a function, or between two functions, over an x interval
#[derive(Clone, Debug)]
pub struct IntegralFill {
    common: Common,
    func: Function,
    lower: Option<Function>,
    x1: Option<f64>,
    x2: Option<f64>,
}

impl IntegralFill {
    /// Fill between `func` and the x axis
    pub fn new(func: Function) -> Self {
        IntegralFill {
            common: Common::default(),
            func,
            lower: None,
            x1: None,
            x2: None,
        }
    }

    /// Fill down to `lower` instead of the x axis
    pub fn lower(mut self, lower: Function) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Limit the fill to `[x1, x2]`; otherwise the function's domain or the visible range
    pub fn between(mut self, x1: f64, x2: f64) -> Self {
        self.x1 = Some(x1.min(x2));
        self.x2 = Some(x1.max(x2));
        self
    }

    /// Fill the region enclosed by two crossings of `f` and `g`.
    ///
    /// `x1` and `x2` must lie outside the enclosed region, one crossing on either side
    /// of their midpoint.
    pub fn intersection(f: Function, g: Function, x1: f64, x2: f64) -> Result<Self, GeometryError> {
        let mid = (x1 + x2) / 2.0;
        let tol = (x2 - x1).abs() * 1e-10;
        let diff = |x: f64| f.y(x) - g.y(x);
        let a = root(diff, x1, mid, tol)?;
        let b = root(diff, mid, x2, tol)?;
        Ok(IntegralFill::new(f).lower(g).between(a, b))
    }

    fn span(&self, visible: (f64, f64)) -> (f64, f64) {
        let domain = self.func.get_domain();
        (
            self.x1.or(domain.map(|d| d.0)).unwrap_or(visible.0),
            self.x2.or(domain.map(|d| d.1)).unwrap_or(visible.1),
        )
    }
}

impl Component for IntegralFill {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.integral_fill.clone()
    }

    fn datarange(&self) -> DataRange {
        DataRange::unbounded()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let (a, b) = self.span((ctx.databox.x, ctx.databox.right()));
        let xs = linspace(a, b, self.func.sample_count());
        let upper: Vec<Point> = xs.iter().map(|&x| pt(x, self.func.y(x))).collect();
        let lower: Vec<Point> = xs
            .iter()
            .map(|&x| pt(x, self.lower.as_ref().map_or(0.0, |g| g.y(x))))
            .collect();
        let fill = FillStyle::new(ctx.style.color.clone()).opacity(ctx.style.opacity);
        if ctx.fill_between(&upper, &lower, &fill) == 0 {
            skip_degenerate("integral fill", &self.common);
        }
        Ok(())
    }

    fn has_square_legend_glyph(&self) -> bool {
        true
    }
}
