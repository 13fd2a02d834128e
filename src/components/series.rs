//! Components built from x/y data arrays.

use crate::errors::{ConfigError, RenderError};
use crate::render::{FillStyle, PathMarkers, StrokeStyle};
use crate::style::{MarkerShape, Style, Theme};
use crate::types::{DataRange, Point, ViewBox, pt};

use super::{Common, Component, DrawContext, MarkerRequest, log10, skip_degenerate};

fn zip_points(x: &[f64], y: &[f64], what: &'static str) -> Result<Vec<Point>, ConfigError> {
    if x.len() != y.len() {
        return Err(ConfigError::MismatchedLengths {
            what,
            left: x.len(),
            right: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(&x, &y)| pt(x, y)).collect())
}

fn log_points(points: &mut [Point], x: bool, y: bool) {
    for p in points {
        if x {
            p.x = log10(p.x);
        }
        if y {
            p.y = log10(p.y);
        }
    }
}

// ============================================================================
// PolyLine
// ============================================================================

/// Data points joined by straight segments, with optional markers
#[derive(Clone, Debug, PartialEq)]
pub struct PolyLine {
    common: Common,
    points: Vec<Point>,
}

impl PolyLine {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ConfigError> {
        Ok(PolyLine::from_points(zip_points(&x, &y, "polyline x vs y values")?))
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        PolyLine {
            common: Common::default(),
            points,
        }
    }

    /// Points given as radius and angle (degrees), for polar diagrams
    pub fn polar(radius: Vec<f64>, theta: Vec<f64>) -> Result<Self, ConfigError> {
        let polar = zip_points(&radius, &theta, "polar radius vs theta values")?;
        Ok(PolyLine::from_points(
            polar
                .into_iter()
                .map(|p| p.x * Point::from_angle(p.y.to_radians()))
                .collect(),
        ))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Component for PolyLine {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        DataRange::of_points(self.points.iter().copied())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let stroke = StrokeStyle::line(&ctx.style);
        let request = MarkerRequest::from(ctx.style.marker);
        if ctx.marked_polyline(&self.points, &stroke, request) == 0 {
            skip_degenerate("polyline", &self.common);
        }
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        log_points(&mut self.points, x, y);
    }
}

// ============================================================================
// Scatter
// ============================================================================

/// Markers at each data point, not joined
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter {
    common: Common,
    points: Vec<Point>,
}

impl Scatter {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ConfigError> {
        Ok(Scatter::from_points(zip_points(&x, &y, "scatter x vs y values")?))
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Scatter {
            common: Common::default(),
            points,
        }
    }
}

impl Component for Scatter {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.scatter.clone()
    }

    fn datarange(&self) -> DataRange {
        DataRange::of_points(self.points.iter().copied())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let shape = ctx.style.marker.unwrap_or(MarkerShape::Round);
        let request = MarkerRequest::Every(shape);
        if ctx.marked_polyline(&self.points, &StrokeStyle::none(), request) == 0 {
            skip_degenerate("scatter", &self.common);
        }
        Ok(())
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        log_points(&mut self.points, x, y);
    }

    fn legend_stroke(&self, _style: &Style) -> StrokeStyle {
        StrokeStyle::none()
    }
}

// ============================================================================
// Bars
// ============================================================================

/// Position of a bar relative to its x value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BarAlign {
    /// Bar starts at x
    Left,
    #[default]
    Center,
    /// Bar ends at x
    Right,
}

/// Vertical bars at quantitative x positions
#[derive(Clone, Debug, PartialEq)]
pub struct Bars {
    common: Common,
    x: Vec<f64>,
    y: Vec<f64>,
    /// Bottom of each bar
    base: Vec<f64>,
    width: f64,
    align: BarAlign,
}

impl Bars {
    /// Bars from zero up to `y`, as wide as the spacing of the first two x values
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ConfigError> {
        if x.len() != y.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "bar x vs y values",
                left: x.len(),
                right: y.len(),
            });
        }
        let width = match x.as_slice() {
            [a, b, ..] if b != a => (b - a).abs(),
            _ => 1.0,
        };
        Ok(Bars {
            common: Common::default(),
            base: vec![0.0; x.len()],
            x,
            y,
            width,
            align: BarAlign::Center,
        })
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width.abs();
        self
    }

    pub fn align(mut self, align: BarAlign) -> Self {
        self.align = align;
        self
    }

    /// Per-bar bottom values instead of zero
    pub fn base(mut self, base: Vec<f64>) -> Result<Self, ConfigError> {
        if base.len() != self.x.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "bar base vs x values",
                left: base.len(),
                right: self.x.len(),
            });
        }
        self.base = base;
        Ok(self)
    }

    /// Left edge of the bar at `x`
    fn left(&self, x: f64) -> f64 {
        match self.align {
            BarAlign::Left => x,
            BarAlign::Center => x - self.width / 2.0,
            BarAlign::Right => x - self.width,
        }
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let r = DataRange::of_points(values.iter().map(|&v| pt(v, 0.0)));
    r.x()
}

impl Component for Bars {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    /// Includes a 4% headroom above the tallest bar
    fn datarange(&self) -> DataRange {
        let (Some((xmin, xmax)), Some((_, ymax)), Some((bmin, _))) =
            (min_max(&self.x), min_max(&self.y), min_max(&self.base))
        else {
            return DataRange::unbounded();
        };
        let left = self.left(xmin);
        DataRange::new(
            left,
            self.left(xmax) + self.width,
            bmin,
            ymax + ymax / 25.0,
        )
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let fill = FillStyle::new(ctx.style.color.clone()).opacity(ctx.style.opacity);
        let stroke = StrokeStyle::edge(&ctx.style);
        let mut drawn = 0;
        for ((&x, &y), &base) in self.x.iter().zip(&self.y).zip(&self.base) {
            let left = self.left(x);
            let a = ctx.transform.apply(pt(left, base));
            let b = ctx.transform.apply(pt(left + self.width, y));
            if !(a.is_finite() && b.is_finite()) {
                continue;
            }
            let rect: ViewBox = ViewBox::from_corners(a, b);
            ctx.drawing.rect(rect, &fill, &stroke);
            drawn += 1;
        }
        if drawn == 0 {
            skip_degenerate("bars", &self.common);
        }
        Ok(())
    }

    fn has_square_legend_glyph(&self) -> bool {
        true
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        if x {
            if let Some(&first) = self.x.first() {
                self.width = log10(first + self.width) - log10(first);
            }
            self.x.iter_mut().for_each(|v| *v = log10(*v));
        }
        if y {
            self.y.iter_mut().for_each(|v| *v = log10(*v));
            self.base.iter_mut().for_each(|v| *v = log10(*v));
        }
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// How a histogram splits its data into bins
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Bins {
    /// `ceil(sqrt(n))` equal bins spanning the data
    #[default]
    Auto,
    /// Equal bins spanning the data
    Count(usize),
    /// Bins of width `step` from `start` until `stop` is covered; values outside are dropped
    Range { start: f64, stop: f64, step: f64 },
}

/// Counts of data values per bin, drawn as left-aligned bars
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    common: Common,
    data: Vec<f64>,
    weights: Option<Vec<f64>>,
    bins: Bins,
    density: bool,
    log_x: bool,
    log_y: bool,
}

impl Histogram {
    pub fn new(data: Vec<f64>) -> Result<Self, ConfigError> {
        if !data.iter().any(|v| v.is_finite()) {
            return Err(ConfigError::EmptyData { what: "histogram" });
        }
        Ok(Histogram {
            common: Common::default(),
            data,
            weights: None,
            bins: Bins::Auto,
            density: false,
            log_x: false,
            log_y: false,
        })
    }

    pub fn bins(mut self, bins: Bins) -> Result<Self, ConfigError> {
        let reason = match bins {
            Bins::Count(0) => Some("bin count must be positive"),
            Bins::Range { start, stop, .. } if !(start.is_finite() && stop.is_finite()) => {
                Some("bin range must be finite")
            }
            Bins::Range { step, .. } if !step.is_finite() || step <= 0.0 => {
                Some("bin step must be positive")
            }
            Bins::Range { start, stop, .. } if stop <= start => Some("bin range must increase"),
            _ => None,
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidBins {
                reason: reason.to_string(),
            });
        }
        self.bins = bins;
        Ok(self)
    }

    /// Scale counts so the bars enclose unit area
    pub fn density(mut self, density: bool) -> Self {
        self.density = density;
        self
    }

    /// Count each value with its weight instead of 1
    pub fn weights(mut self, weights: Vec<f64>) -> Result<Self, ConfigError> {
        if weights.len() != self.data.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "histogram weights vs data",
                left: weights.len(),
                right: self.data.len(),
            });
        }
        self.weights = Some(weights);
        Ok(self)
    }

    /// Left edge of every bin, their common width and the (weighted) count in each
    pub fn counts(&self) -> (Vec<f64>, f64, Vec<f64>) {
        let values = || self.data.iter().copied().filter(|v| v.is_finite());
        let (left, width, n, closed) = match self.bins {
            Bins::Range { start, stop, step } => {
                (start, step, ((stop - start) / step).ceil() as usize, false)
            }
            Bins::Auto | Bins::Count(_) => {
                let n = match self.bins {
                    Bins::Count(n) => n,
                    _ => (values().count() as f64).sqrt().ceil() as usize,
                }
                .max(1);
                let (lo, hi) = values().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                if hi > lo {
                    (lo, (hi - lo) / n as f64, n, true)
                } else {
                    // One unit per bin, centered on the single value
                    (lo - n as f64 / 2.0, 1.0, n, true)
                }
            }
        };

        let mut counts = vec![0.0; n];
        let weights = self.weights.as_deref();
        for (i, &v) in self.data.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let w = weights.map_or(1.0, |w| w[i]);
            let bin = ((v - left) / width).floor();
            if bin < 0.0 {
                continue;
            }
            let bin = bin as usize;
            if bin < n {
                counts[bin] += w;
            } else if closed && bin == n {
                // Auto bins include the maximum in the last bin
                counts[n - 1] += w;
            }
        }
        if self.density {
            let total: f64 = counts.iter().sum::<f64>() * width;
            if total > 0.0 {
                counts.iter_mut().for_each(|c| *c /= total);
            }
        }
        let lefts = (0..n).map(|i| left + width * i as f64).collect();
        (lefts, width, counts)
    }

    fn bars(&self) -> Bars {
        let (lefts, width, counts) = self.counts();
        let mut bars = Bars {
            common: self.common.clone(),
            base: vec![0.0; lefts.len()],
            x: lefts,
            y: counts,
            width,
            align: BarAlign::Left,
        };
        bars.log_transform(self.log_x, self.log_y);
        bars
    }
}

impl Component for Histogram {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn datarange(&self) -> DataRange {
        self.bars().datarange()
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        self.bars().draw(ctx)
    }

    fn has_square_legend_glyph(&self) -> bool {
        true
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
// ErrorBar
// ============================================================================

/// Polyline with capped whiskers showing x and/or y errors at each point
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorBar {
    line: PolyLine,
    xerr: Option<Vec<f64>>,
    yerr: Option<Vec<f64>>,
}

impl ErrorBar {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ConfigError> {
        Ok(ErrorBar {
            line: PolyLine::from_points(zip_points(&x, &y, "error bar x vs y values")?),
            xerr: None,
            yerr: None,
        })
    }

    fn check(&self, err: &[f64], what: &'static str) -> Result<(), ConfigError> {
        if err.len() != self.line.points.len() {
            return Err(ConfigError::MismatchedLengths {
                what,
                left: err.len(),
                right: self.line.points.len(),
            });
        }
        Ok(())
    }

    /// Vertical whiskers from `y - e` to `y + e`
    pub fn yerr(mut self, err: Vec<f64>) -> Result<Self, ConfigError> {
        self.check(&err, "error bar y errors vs points")?;
        self.yerr = Some(err);
        Ok(self)
    }

    /// Horizontal whiskers from `x - e` to `x + e`
    pub fn xerr(mut self, err: Vec<f64>) -> Result<Self, ConfigError> {
        self.check(&err, "error bar x errors vs points")?;
        self.xerr = Some(err);
        Ok(self)
    }

    /// Whisker end points, y whiskers first
    fn whiskers(&self) -> (Vec<[Point; 2]>, Vec<[Point; 2]>) {
        let points = &self.line.points;
        let vertical = self.yerr.as_deref().map_or_else(Vec::new, |err| {
            points
                .iter()
                .zip(err)
                .map(|(p, e)| [pt(p.x, p.y - e), pt(p.x, p.y + e)])
                .collect()
        });
        let horizontal = self.xerr.as_deref().map_or_else(Vec::new, |err| {
            points
                .iter()
                .zip(err)
                .map(|(p, e)| [pt(p.x - e, p.y), pt(p.x + e, p.y)])
                .collect()
        });
        (vertical, horizontal)
    }

    fn draw_whiskers(ctx: &mut DrawContext<'_>, whiskers: &[[Point; 2]], cap: MarkerShape) -> usize {
        let drawable: Vec<&[Point; 2]> = whiskers
            .iter()
            .filter(|w| w.iter().all(|p| p.is_finite()))
            .collect();
        if drawable.is_empty() {
            return 0;
        }
        let stroke = StrokeStyle::line(&ctx.style);
        let markers = PathMarkers::every(ctx.define_marker(cap, false));
        for whisker in &drawable {
            ctx.polyline(&whisker[..], &stroke, &markers);
        }
        drawable.len()
    }
}

impl Component for ErrorBar {
    fn common(&self) -> &Common {
        &self.line.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.line.common
    }

    fn datarange(&self) -> DataRange {
        let (vertical, horizontal) = self.whiskers();
        DataRange::of_points(
            self.line
                .points
                .iter()
                .copied()
                .chain(vertical.into_iter().chain(horizontal).flatten()),
        )
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let (vertical, horizontal) = self.whiskers();
        let color = ctx.style.color.clone();
        let caps = Style {
            color: color.clone(),
            edge_color: color,
            ..ctx.theme.error_bar.clone()
        };
        let line_style = std::mem::replace(&mut ctx.style, caps);
        let y_cap = ctx.style.marker.unwrap_or(MarkerShape::HBar);
        Self::draw_whiskers(ctx, &vertical, y_cap);
        Self::draw_whiskers(ctx, &horizontal, MarkerShape::VBar);
        ctx.style = line_style;
        self.line.draw(ctx)
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    /// Whiskers are symmetric in log space around the transformed point
    fn log_transform(&mut self, x: bool, y: bool) {
        let points = &self.line.points;
        if x {
            if let Some(err) = &mut self.xerr {
                for (e, p) in err.iter_mut().zip(points) {
                    *e = log10(p.x + *e) - log10(p.x);
                }
            }
        }
        if y {
            if let Some(err) = &mut self.yerr {
                for (e, p) in err.iter_mut().zip(points) {
                    *e = log10(p.y + *e) - log10(p.y);
                }
            }
        }
        self.line.log_transform(x, y);
    }
}

// ============================================================================
// LineFill
// ============================================================================

/// Region between an upper and a lower y series, outlined along both
#[derive(Clone, Debug, PartialEq)]
pub struct LineFill {
    common: Common,
    upper: Vec<Point>,
    lower: Vec<Point>,
}

impl LineFill {
    /// Region between `ymax` and zero
    pub fn new(x: Vec<f64>, ymax: Vec<f64>) -> Result<Self, ConfigError> {
        let upper = zip_points(&x, &ymax, "line fill x vs ymax values")?;
        let lower = x.iter().map(|&x| pt(x, 0.0)).collect();
        Ok(LineFill {
            common: Common::default(),
            upper,
            lower,
        })
    }

    /// Lower bound instead of zero
    pub fn ymin(mut self, ymin: Vec<f64>) -> Result<Self, ConfigError> {
        if ymin.len() != self.upper.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "line fill ymin vs x values",
                left: ymin.len(),
                right: self.upper.len(),
            });
        }
        self.lower = self.upper.iter().zip(ymin).map(|(p, y)| pt(p.x, y)).collect();
        Ok(self)
    }
}

impl Component for LineFill {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn base_style(&self, theme: &Theme) -> Style {
        theme.line_fill.clone()
    }

    fn datarange(&self) -> DataRange {
        DataRange::of_points(self.upper.iter().chain(&self.lower).copied())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let fill = FillStyle::new(ctx.style.color.clone()).opacity(ctx.style.opacity);
        if ctx.fill_between(&self.upper, &self.lower, &fill) == 0 {
            skip_degenerate("line fill", &self.common);
            return Ok(());
        }
        // The band's sides are left open
        let edge = StrokeStyle {
            opacity: 1.0,
            ..StrokeStyle::outline(&ctx.style)
        };
        ctx.polyline(&self.upper, &edge, &PathMarkers::default());
        ctx.polyline(&self.lower, &edge, &PathMarkers::default());
        Ok(())
    }

    fn has_square_legend_glyph(&self) -> bool {
        true
    }

    fn supports_log_transform(&self) -> bool {
        true
    }

    fn log_transform(&mut self, x: bool, y: bool) {
        log_points(&mut self.upper, x, y);
        log_points(&mut self.lower, x, y);
    }
}
