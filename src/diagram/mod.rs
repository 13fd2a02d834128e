//! Diagrams: a coordinate frame that owns its components.
//!
//! A [`Diagram`] resolves its data range and ticks lazily and caches both until a
//! mutator calls [`Diagram::invalidate`]. Borders and the legend size depend on the text
//! metrics of the [`Drawing`] in use, so they are measured on every pass.
//!
//! Rendering runs in a fixed order: ticks, borders, data and device boxes, frame, ticks
//! and grid, title, components (clipped to the data area), legend.

mod axes;
mod legend;

use std::borrow::Cow;
use std::cell::OnceCell;

use crate::components::{Component, ComponentKind, DrawContext};
use crate::errors::{ConfigError, RenderError};
use crate::layout::{
    BorderInputs, Borders, LegendLoc, diagram_box, equal_aspect, graph_borders, plain_borders,
    quad_borders,
};
use crate::log::debug;
use crate::render::defaults::{CANVAS_HEIGHT, CANVAS_WIDTH, PLAIN_PAD};
use crate::render::{Drawing, Halign, SvgDrawing, SvgOptions, TextMetrics, TextStyle, Valign};
use crate::smith::SmithGridLevel;
use crate::style::{Color, ColorCycle, Style, Theme};
use crate::ticks::{
    AxisTicks, ManualTicks, TickConfig, Ticks, log_ticks, make_axis_ticks, polar_radius_ticks,
    polar_theta_ticks,
};
use crate::types::{Extent, Size, Transform, ViewBox, pt};

use legend::{LegendEntry, draw_legend, legend_anchor, legend_size, quad_legend_anchor};

/// Kind of coordinate frame a diagram draws
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxesKind {
    /// No axes; the data range is padded 5% and drawn with equal aspect
    Plain,
    /// Framed axes with ticks along the left and bottom edges
    Graph,
    /// Axes with arrows crossing at the origin
    Quad { centered: bool },
    /// Graph with base-10 logarithmic axes
    Log { x: bool, y: bool },
    /// Circular frame with radius grid circles and theta spokes
    Polar { degrees: bool, label_theta: f64 },
    /// Smith chart of normalized impedance
    Smith { grid: SmithGridLevel },
}

/// A coordinate frame and the components drawn in it
#[derive(Clone, Debug)]
pub struct Diagram {
    kind: AxesKind,
    components: Vec<ComponentKind>,
    theme: Theme,
    size: Size,
    title: Option<String>,
    xname: Option<String>,
    yname: Option<String>,
    xrange: Option<(f64, f64)>,
    yrange: Option<(f64, f64)>,
    xticks: TickConfig,
    yticks: TickConfig,
    show_xticks: bool,
    show_yticks: bool,
    legend: LegendLoc,
    equal_aspect: bool,
    full_box: bool,
    log_divisions: (usize, usize),
    fade: Option<ColorCycle>,
    range_cache: OnceCell<Extent>,
    ticks_cache: OnceCell<Ticks>,
}

impl Diagram {
    pub fn new(kind: AxesKind) -> Self {
        Diagram {
            kind,
            components: Vec::new(),
            theme: Theme::default(),
            size: Size::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            title: None,
            xname: None,
            yname: None,
            xrange: None,
            yrange: None,
            xticks: TickConfig::default(),
            yticks: TickConfig::default(),
            show_xticks: true,
            show_yticks: true,
            legend: LegendLoc::default(),
            equal_aspect: kind == AxesKind::Plain,
            full_box: false,
            log_divisions: (10, 10),
            fade: None,
            range_cache: OnceCell::new(),
            ticks_cache: OnceCell::new(),
        }
    }

    pub fn plain() -> Self {
        Diagram::new(AxesKind::Plain)
    }

    pub fn graph() -> Self {
        Diagram::new(AxesKind::Graph)
    }

    pub fn quad() -> Self {
        Diagram::new(AxesKind::Quad { centered: false })
    }

    /// Quadrant axes with the origin kept at the center
    pub fn quad_centered() -> Self {
        Diagram::new(AxesKind::Quad { centered: true })
    }

    /// Graph with logarithmic x and/or y axes
    pub fn log(x: bool, y: bool) -> Self {
        Diagram::new(AxesKind::Log { x, y })
    }

    /// Polar diagram labelled in degrees, radius labels along theta = 0
    pub fn polar() -> Self {
        Diagram::polar_with(true, 0.0)
    }

    /// Polar diagram with theta labels in degrees or radians and radius labels drawn
    /// along `label_theta` degrees
    pub fn polar_with(degrees: bool, label_theta: f64) -> Self {
        Diagram::new(AxesKind::Polar {
            degrees,
            label_theta,
        })
    }

    pub fn smith(grid: SmithGridLevel) -> Self {
        Diagram::new(AxesKind::Smith { grid })
    }

    /// Smith chart with a grid given by name (`coarse`, `medium`, `fine`, `extrafine`)
    pub fn smith_named(grid: &str) -> Result<Self, ConfigError> {
        Ok(Diagram::smith(grid.parse()?))
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Drop the cached data range and ticks
    pub fn invalidate(&mut self) {
        self.range_cache.take();
        self.ticks_cache.take();
    }

    /// Add a component; insertion order is draw order and color-cycle order
    pub fn add(&mut self, component: impl Into<ComponentKind>) -> &mut Self {
        self.components.push(component.into());
        self.invalidate();
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into()).filter(|t: &String| !t.is_empty());
        self.invalidate();
        self
    }

    pub fn axis_names(&mut self, x: impl Into<String>, y: impl Into<String>) -> &mut Self {
        self.xname = Some(x.into()).filter(|n: &String| !n.is_empty());
        self.yname = Some(y.into()).filter(|n: &String| !n.is_empty());
        self.invalidate();
        self
    }

    /// Fix the x data range; on polar diagrams this sets the outer radius
    pub fn xrange(&mut self, min: f64, max: f64) -> &mut Self {
        self.xrange = Some((min, max));
        self.invalidate();
        self
    }

    pub fn yrange(&mut self, min: f64, max: f64) -> Result<&mut Self, ConfigError> {
        if matches!(self.kind, AxesKind::Polar { .. }) {
            return Err(ConfigError::PolarThetaRange);
        }
        self.yrange = Some((min, max));
        self.invalidate();
        Ok(self)
    }

    /// Manual x ticks, with optional labels (one per value) and minor ticks
    pub fn xticks(
        &mut self,
        values: Vec<f64>,
        names: Option<Vec<String>>,
        minor: Option<Vec<f64>>,
    ) -> Result<&mut Self, ConfigError> {
        self.xticks.manual = Some(manual_ticks(values, names, minor)?);
        self.invalidate();
        Ok(self)
    }

    pub fn yticks(
        &mut self,
        values: Vec<f64>,
        names: Option<Vec<String>>,
        minor: Option<Vec<f64>>,
    ) -> Result<&mut Self, ConfigError> {
        self.yticks.manual = Some(manual_ticks(values, names, minor)?);
        self.invalidate();
        Ok(self)
    }

    pub fn no_xticks(&mut self) -> &mut Self {
        self.show_xticks = false;
        self.invalidate();
        self
    }

    pub fn no_yticks(&mut self) -> &mut Self {
        self.show_yticks = false;
        self.invalidate();
        self
    }

    pub fn legend(&mut self, loc: LegendLoc) -> &mut Self {
        self.legend = loc;
        self.invalidate();
        self
    }

    pub fn equal_aspect(&mut self, equal: bool) -> &mut Self {
        self.equal_aspect = equal;
        self.invalidate();
        self
    }

    /// Canvas size used when the diagram is rendered on its own
    pub fn size(&mut self, width: f64, height: f64) -> Result<&mut Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        self.size = Size::new(width, height);
        self.invalidate();
        Ok(self)
    }

    /// Minor tick divisions between major ticks on each axis; 0 disables them
    pub fn minor_divisions(&mut self, x: usize, y: usize) -> &mut Self {
        self.xticks.minor_divisions = x;
        self.yticks.minor_divisions = y;
        self.invalidate();
        self
    }

    pub fn max_ticks(&mut self, x: usize, y: usize) -> &mut Self {
        self.xticks.max_ticks = x.max(2);
        self.yticks.max_ticks = y.max(2);
        self.invalidate();
        self
    }

    pub fn theme(&mut self, theme: Theme) -> &mut Self {
        self.theme = theme;
        self.invalidate();
        self
    }

    /// Bundled theme by name
    pub fn theme_named(&mut self, name: &str) -> Result<&mut Self, ConfigError> {
        Ok(self.theme(Theme::named(name)?))
    }

    /// Draw a full rectangle around the data area instead of left and bottom edges
    pub fn full_box(&mut self, full: bool) -> &mut Self {
        self.full_box = full;
        self.invalidate();
        self
    }

    /// Minor divisions per decade on log axes: 10, 5, 2, or 0 for none
    pub fn log_divisions(&mut self, x: usize, y: usize) -> &mut Self {
        self.log_divisions = (x, y);
        self.invalidate();
        self
    }

    /// Color components by fading through `colors` instead of the theme cycle
    pub fn color_fade(
        &mut self,
        colors: &[Color],
        stops: Option<Vec<f64>>,
    ) -> Result<&mut Self, ConfigError> {
        self.fade = Some(ColorCycle::fade(colors, stops)?);
        self.invalidate();
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn kind(&self) -> AxesKind {
        self.kind
    }

    pub fn components(&self) -> &[ComponentKind] {
        &self.components
    }

    pub fn canvas_size(&self) -> Size {
        self.size
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the diagram has a rectangular framed data area whose borders can be
    /// aligned with neighbours in a grid
    pub fn is_box_framed(&self) -> bool {
        matches!(
            self.kind,
            AxesKind::Graph | AxesKind::Log { .. } | AxesKind::Quad { .. }
        )
    }

    // ------------------------------------------------------------------
    // Data range and ticks
    // ------------------------------------------------------------------

    /// Combined range of the components, after overrides and per-kind adjustments
    pub fn datarange(&self) -> Extent {
        *self.range_cache.get_or_init(|| self.compute_datarange())
    }

    fn base_range(&self) -> Extent {
        let mut x: Option<(f64, f64)> = None;
        let mut y: Option<(f64, f64)> = None;
        let merge = |acc: Option<(f64, f64)>, bounds: Option<(f64, f64)>| match bounds {
            Some((lo, hi)) if lo.is_finite() && hi.is_finite() => {
                Some(acc.map_or((lo, hi), |(a, b)| (a.min(lo), b.max(hi))))
            }
            _ => acc,
        };
        for component in &self.components {
            let range = component.datarange();
            x = merge(x, range.x());
            y = merge(y, range.y());
        }
        let resolve = |bounds: Option<(f64, f64)>| match bounds {
            Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
            Some(bounds) => bounds,
            None => (-1.0, 1.0),
        };
        let (xmin, xmax) = resolve(self.xrange.or(x));
        let (ymin, ymax) = resolve(self.yrange.or(y));
        Extent::new(xmin, xmax, ymin, ymax)
    }

    fn compute_datarange(&self) -> Extent {
        let base = self.base_range();
        let extent = match self.kind {
            AxesKind::Plain | AxesKind::Graph => base,
            AxesKind::Quad { centered } => {
                let (mut xmin, mut xmax) = (base.xmin.min(0.0), base.xmax.max(0.0));
                let (mut ymin, mut ymax) = (base.ymin.min(0.0), base.ymax.max(0.0));
                if centered {
                    let x = xmin.abs().max(xmax.abs());
                    let y = ymin.abs().max(ymax.abs());
                    (xmin, xmax, ymin, ymax) = (-x, x, -y, y);
                }
                if [xmin, xmax, ymin, ymax].iter().all(|v| *v == 0.0) {
                    (xmin, xmax, ymin, ymax) = (-1.0, 1.0, -1.0, 1.0);
                }
                Extent::new(xmin, xmax, ymin, ymax)
            }
            AxesKind::Log { x, y } => {
                let log = |v: f64, fallback: f64| if v > 0.0 { v.log10() } else { fallback };
                let (xmin, xmax) = if x {
                    (log(base.xmin, 0.0), log(base.xmax, 1.0))
                } else {
                    (base.xmin, base.xmax)
                };
                let (ymin, ymax) = if y {
                    (log(base.ymin, 0.0), log(base.ymax, 1.0))
                } else {
                    (base.ymin, base.ymax)
                };
                Extent::new(xmin, xmax, ymin, ymax)
            }
            AxesKind::Polar { .. } => {
                let rmax = match self.xrange {
                    Some((_, max)) => max.abs(),
                    None => [base.xmin, base.xmax, base.ymin, base.ymax]
                        .iter()
                        .fold(0.0, |acc: f64, v| acc.max(v.abs())),
                };
                let rmax = if rmax > 0.0 { rmax } else { 1.0 };
                Extent::new(-rmax, rmax, -rmax, rmax)
            }
            AxesKind::Smith { .. } => Extent::new(-1.0, 1.0, -1.0, 1.0),
        };
        debug!(
            xmin = extent.xmin,
            xmax = extent.xmax,
            ymin = extent.ymin,
            ymax = extent.ymax,
            "resolved data range"
        );
        extent
    }

    /// Tick positions, labels and the axis ranges they span
    pub fn ticks(&self) -> &Ticks {
        self.ticks_cache.get_or_init(|| self.compute_ticks())
    }

    fn tick_config(&self, x_axis: bool, pad: bool) -> TickConfig {
        let (config, style) = if x_axis {
            (&self.xticks, &self.theme.tick_x)
        } else {
            (&self.yticks, &self.theme.tick_y)
        };
        TickConfig {
            format: style.num_format,
            pad: pad.then_some(style.pad),
            ..config.clone()
        }
    }

    fn compute_ticks(&self) -> Ticks {
        let range = self.datarange();
        let (xr, yr) = ((range.xmin, range.xmax), (range.ymin, range.ymax));
        match self.kind {
            AxesKind::Plain => {
                let padded = |(lo, hi): (f64, f64)| {
                    let pad = (hi - lo) * PLAIN_PAD;
                    (lo - pad, hi + pad)
                };
                Ticks {
                    x: bare_axis(padded(xr)),
                    y: bare_axis(padded(yr)),
                }
            }
            AxesKind::Graph => Ticks {
                x: make_axis_ticks(xr, &self.tick_config(true, true)),
                y: make_axis_ticks(yr, &self.tick_config(false, true)),
            },
            AxesKind::Quad { .. } => Ticks {
                x: make_axis_ticks(xr, &self.tick_config(true, false)),
                y: make_axis_ticks(yr, &self.tick_config(false, false)),
            },
            AxesKind::Log { x, y } => {
                let axis = |log: bool, r, x_axis, divisions| {
                    if log {
                        let linear = make_axis_ticks(r, &self.tick_config(x_axis, false));
                        log_ticks(&linear.positions, divisions)
                    } else {
                        make_axis_ticks(r, &self.tick_config(x_axis, true))
                    }
                };
                Ticks {
                    x: axis(x, xr, true, self.log_divisions.0),
                    y: axis(y, yr, false, self.log_divisions.1),
                }
            }
            AxesKind::Polar { degrees, .. } => Ticks {
                x: polar_radius_ticks(range.xmax, &self.tick_config(true, false)),
                y: polar_theta_ticks(degrees),
            },
            AxesKind::Smith { .. } => Ticks {
                x: bare_axis(xr),
                y: bare_axis(yr),
            },
        }
    }

    // ------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------

    /// Widest y tick label, zero when y ticks are hidden or the kind has none
    pub fn ylabel_width<M: TextMetrics + ?Sized>(&self, metrics: &M) -> f64 {
        if !self.show_yticks || !self.is_box_framed() {
            return 0.0;
        }
        let style = TextStyle::new(&self.theme.tick_y, Halign::Right, Valign::Center);
        self.ticks()
            .y
            .labels
            .iter()
            .map(|label| metrics.text_size(label, &style).width)
            .fold(0.0, f64::max)
    }

    fn legend_entries(&self, colors: &[Color]) -> Vec<LegendEntry<'_>> {
        self.components
            .iter()
            .zip(colors)
            .filter_map(|(component, color)| LegendEntry::new(component, &self.theme, color))
            .collect()
    }

    /// Device size of the legend box; zero when it is hidden or nothing is named
    pub fn legend_size<M: TextMetrics + ?Sized>(&self, metrics: &M) -> Size {
        if self.legend == LegendLoc::None {
            return Size::ZERO;
        }
        let colors = self.cycle_colors();
        legend_size(&self.legend_entries(&colors), &self.theme, metrics)
    }

    /// Margins around the data area for this diagram on its own
    pub fn borders<M: TextMetrics + ?Sized>(&self, metrics: &M) -> Borders {
        let theme = &self.theme;
        let measure = |text: &Option<String>, style: &Style| {
            text.as_deref().map(|t| {
                metrics.text_size(t, &TextStyle::new(style, Halign::Center, Valign::Center))
            })
        };
        let inputs = || {
            let legend_size = self.legend_size(metrics);
            BorderInputs {
                show_xticks: self.show_xticks,
                show_yticks: self.show_yticks,
                ylabel_width: self.ylabel_width(metrics),
                xname: measure(&self.xname, &theme.x_name),
                yname: measure(&self.yname, &theme.y_name),
                title: measure(&self.title, &theme.title),
                // An empty legend takes no room wherever it is placed
                legend: if legend_size == Size::ZERO {
                    LegendLoc::None
                } else {
                    self.legend
                },
                legend_size,
            }
        };
        match self.kind {
            AxesKind::Plain => plain_borders(self.title.is_some(), theme),
            AxesKind::Graph | AxesKind::Log { .. } => graph_borders(&inputs(), theme),
            AxesKind::Quad { .. } => {
                let ticks = self.ticks();
                quad_borders(
                    &inputs(),
                    ticks.x.range.0 == 0.0,
                    ticks.y.range.0 == 0.0,
                    theme,
                )
            }
            AxesKind::Polar { .. } | AxesKind::Smith { .. } => Borders::default(),
        }
    }

    /// Cycle color for each component, in insertion order.
    ///
    /// Only color-stepping components are counted, and only those without an explicit
    /// color advance the cycle. Other entries are [`Color::None`].
    pub fn cycle_colors(&self) -> Vec<Color> {
        let count = self.components.iter().filter(|c| c.steps_color()).count();
        let cycle = self.fade.as_ref().unwrap_or(&self.theme.cycle);
        let mut index = 0;
        self.components
            .iter()
            .map(|component| {
                if component.steps_color() && component.common().style.color.is_none() {
                    index += 1;
                    cycle.color(index - 1, count)
                } else {
                    Color::None
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draw the diagram into `canvas` (device space, y up)
    pub fn render(&self, drawing: &mut dyn Drawing, canvas: ViewBox) -> Result<(), RenderError> {
        self.render_with_borders(drawing, canvas, None)
    }

    /// Draw with externally decided borders, as a grid does to align neighbours
    pub fn render_with_borders(
        &self,
        drawing: &mut dyn Drawing,
        canvas: ViewBox,
        borders: Option<Borders>,
    ) -> Result<(), RenderError> {
        if !canvas.is_finite() {
            return Err(RenderError::NonFiniteViewBox);
        }
        debug!(kind = ?self.kind, components = self.components.len(), %canvas, "rendering diagram");
        let colors = self.cycle_colors();
        match self.kind {
            AxesKind::Polar { label_theta, .. } => {
                self.render_polar(drawing, canvas, &colors, label_theta)
            }
            AxesKind::Smith { grid } => self.render_smith(drawing, canvas, &colors, grid),
            _ => self.render_framed(drawing, canvas, borders, &colors),
        }
    }

    /// Render on a fresh SVG canvas of the diagram's size
    pub fn to_svg(&self, options: SvgOptions) -> Result<String, RenderError> {
        let mut svg = SvgDrawing::new(self.size.width, self.size.height, options);
        self.render(
            &mut svg,
            ViewBox::new(0.0, 0.0, self.size.width, self.size.height),
        )?;
        svg.finish()
    }

    fn render_framed(
        &self,
        drawing: &mut dyn Drawing,
        canvas: ViewBox,
        borders: Option<Borders>,
        colors: &[Color],
    ) -> Result<(), RenderError> {
        let borders = borders.unwrap_or_else(|| self.borders(&*drawing));
        let ticks = self.ticks();
        let databox = ViewBox::new(
            ticks.x.range.0,
            ticks.y.range.0,
            ticks.x.range.1 - ticks.x.range.0,
            ticks.y.range.1 - ticks.y.range.0,
        );
        let mut diagbox = diagram_box(canvas, &borders);
        if self.equal_aspect {
            diagbox = equal_aspect(databox, diagbox);
        }
        if !(databox.is_finite() && diagbox.is_finite()) {
            return Err(RenderError::NonFiniteViewBox);
        }
        debug!(%databox, %diagbox, "framed layout");

        let ylabel_width = self.ylabel_width(&*drawing);
        let quad = matches!(self.kind, AxesKind::Quad { .. });
        match self.kind {
            AxesKind::Graph | AxesKind::Log { .. } => {
                self.draw_graph_frame(drawing, diagbox);
                self.draw_graph_ticks(drawing, ticks, diagbox, databox, ylabel_width);
            }
            AxesKind::Quad { .. } => {
                self.draw_quad_frame(drawing, diagbox);
                self.draw_quad_axes(drawing, ticks, diagbox, databox);
            }
            _ => {}
        }

        if let Some(title) = &self.title {
            let (at, halign) = if quad {
                (pt(diagbox.x, diagbox.top()), Halign::Left)
            } else {
                (pt(diagbox.center().x, diagbox.top()), Halign::Center)
            };
            drawing.text(
                at,
                title,
                &TextStyle::new(&self.theme.title, halign, Valign::Bottom),
            );
        }

        self.draw_components(drawing, diagbox, databox, colors)?;
        self.draw_legend(drawing, diagbox, ylabel_width, quad, colors);
        Ok(())
    }

    /// The component as drawn: log-transformed copies on log axes
    fn prepared<'a>(&self, component: &'a ComponentKind) -> Cow<'a, ComponentKind> {
        match self.kind {
            AxesKind::Log { x, y } if component.supports_log_transform() => {
                let mut copy = component.clone();
                copy.log_transform(x, y);
                Cow::Owned(copy)
            }
            _ => Cow::Borrowed(component),
        }
    }

    fn draw_components(
        &self,
        drawing: &mut dyn Drawing,
        diagbox: ViewBox,
        databox: ViewBox,
        colors: &[Color],
    ) -> Result<(), RenderError> {
        let transform = Transform::new(databox, diagbox);
        drawing.clip(Some(diagbox));
        for (component, color) in self.components.iter().zip(colors) {
            let component = self.prepared(component);
            let mut ctx = DrawContext {
                drawing: &mut *drawing,
                theme: &self.theme,
                transform,
                databox,
                diagbox,
                style: component.resolved_style(&self.theme, color),
            };
            if let Err(err) = component.draw(&mut ctx) {
                drawing.clip(None);
                return Err(err);
            }
        }
        drawing.clip(None);
        Ok(())
    }

    fn draw_legend(
        &self,
        drawing: &mut dyn Drawing,
        diagbox: ViewBox,
        ylabel_width: f64,
        quad: bool,
        colors: &[Color],
    ) {
        let entries = self.legend_entries(colors);
        if entries.is_empty() {
            return;
        }
        let size = legend_size(&entries, &self.theme, &*drawing);
        let anchor = if quad {
            quad_legend_anchor(self.legend, diagbox, size, &self.theme)
        } else {
            legend_anchor(self.legend, diagbox, size, ylabel_width, &self.theme)
        };
        if let Some(anchor) = anchor {
            draw_legend(drawing, &entries, anchor, size, &self.theme);
        }
    }
}

fn manual_ticks(
    values: Vec<f64>,
    names: Option<Vec<String>>,
    minor: Option<Vec<f64>>,
) -> Result<ManualTicks, ConfigError> {
    if let Some(names) = &names {
        if names.len() != values.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "tick names",
                left: values.len(),
                right: names.len(),
            });
        }
    }
    Ok(ManualTicks {
        values,
        names,
        minor,
    })
}

/// An axis without tick marks spanning `range`
fn bare_axis(range: (f64, f64)) -> AxisTicks {
    AxisTicks {
        positions: Vec::new(),
        labels: Vec::new(),
        minor: None,
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Bars, ComponentExt, InfiniteLine, PolyLine, Scatter};
    use crate::render::{Primitive, Recorder};

    fn line(x: Vec<f64>, y: Vec<f64>) -> PolyLine {
        PolyLine::new(x, y).unwrap()
    }

    fn render(diagram: &Diagram) -> Recorder {
        let mut rec = Recorder::new();
        diagram
            .render(&mut rec, ViewBox::new(0.0, 0.0, 600.0, 400.0))
            .unwrap();
        rec
    }

    // ==================== Data range tests ====================

    #[test]
    fn range_aggregates_components() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 10.0], vec![1.0, 2.0]))
            .add(line(vec![-5.0, 3.0], vec![0.0, 4.0]));
        assert_eq!(d.datarange(), Extent::new(-5.0, 10.0, 0.0, 4.0));
    }

    #[test]
    fn empty_and_flat_ranges_widen() {
        assert_eq!(Diagram::graph().datarange(), Extent::new(-1.0, 1.0, -1.0, 1.0));
        let mut d = Diagram::graph();
        d.add(line(vec![2.0, 2.0], vec![3.0, 5.0]));
        assert_eq!(d.datarange(), Extent::new(1.0, 3.0, 3.0, 5.0));
    }

    #[test]
    fn unbounded_axes_do_not_constrain() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 4.0], vec![0.0, 1.0]))
            .add(InfiniteLine::horizontal(8.0));
        assert_eq!(d.datarange(), Extent::new(0.0, 4.0, 0.0, 8.0));
    }

    #[test]
    fn overrides_replace_the_data_range() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 4.0], vec![0.0, 1.0])).xrange(-2.0, 2.0);
        d.yrange(5.0, 6.0).unwrap();
        assert_eq!(d.datarange(), Extent::new(-2.0, 2.0, 5.0, 6.0));
    }

    #[test]
    fn flat_overrides_widen_like_data() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 4.0], vec![0.0, 1.0])).xrange(3.0, 3.0);
        d.yrange(-2.0, -2.0).unwrap();
        assert_eq!(d.datarange(), Extent::new(2.0, 4.0, -3.0, -1.0));
        let ticks = d.ticks();
        assert!(ticks.x.range.0 <= 2.0 && ticks.x.range.1 >= 4.0);
    }

    #[test]
    fn cache_is_invalidated_by_add() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 1.0], vec![0.0, 1.0]));
        assert_eq!(d.datarange().xmax, 1.0);
        d.add(line(vec![0.0, 9.0], vec![0.0, 1.0]));
        assert_eq!(d.datarange().xmax, 9.0);
    }

    #[test]
    fn quad_range_includes_origin() {
        let mut d = Diagram::quad();
        d.add(line(vec![2.0, 4.0], vec![-3.0, -1.0]));
        assert_eq!(d.datarange(), Extent::new(0.0, 4.0, -3.0, 0.0));

        let mut d = Diagram::quad_centered();
        d.add(line(vec![2.0, 4.0], vec![-3.0, -1.0]));
        assert_eq!(d.datarange(), Extent::new(-4.0, 4.0, -3.0, 3.0));
    }

    #[test]
    fn log_range_falls_back_for_non_positive() {
        let mut d = Diagram::log(true, true);
        d.add(line(vec![-1.0, 1000.0], vec![10.0, 100.0]));
        assert_eq!(d.datarange(), Extent::new(0.0, 3.0, 1.0, 2.0));
    }

    #[test]
    fn polar_radius_is_largest_bound() {
        let mut d = Diagram::polar();
        d.add(line(vec![-7.0, 2.0], vec![0.0, 3.0]));
        assert_eq!(d.datarange().xmax, 7.0);
        assert_eq!(d.yrange(0.0, 1.0).unwrap_err(), ConfigError::PolarThetaRange);
    }

    // ==================== Tick tests ====================

    #[test]
    fn graph_ticks_are_padded() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 97.0], vec![0.0, 1.0]));
        let ticks = d.ticks();
        assert_eq!(ticks.x.positions, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks.x.range, (-4.0, 104.0));
    }

    #[test]
    fn quad_ticks_are_not_padded() {
        let mut d = Diagram::quad();
        d.add(line(vec![0.0, 97.0], vec![0.0, 1.0]));
        assert_eq!(d.ticks().x.range, (0.0, 100.0));
    }

    #[test]
    fn log_ticks_label_decades() {
        let mut d = Diagram::log(false, true);
        d.add(line(vec![0.0, 1.0], vec![1.0, 1000.0]));
        assert_eq!(d.ticks().y.labels, vec!["1", "10", "100", "1000"]);
    }

    #[test]
    fn manual_names_must_match_values() {
        let mut d = Diagram::graph();
        let err = d
            .xticks(vec![0.0, 1.0], Some(vec!["a".into()]), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MismatchedLengths { left: 2, right: 1, .. }));
    }

    // ==================== Color tests ====================

    #[test]
    fn explicit_colors_do_not_advance_the_cycle() {
        let red = Color::Rgb(255, 0, 0);
        let mut d = Diagram::graph();
        d.add(line(vec![0.0], vec![0.0]))
            .add(line(vec![0.0], vec![0.0]).color(red))
            .add(InfiniteLine::vertical(1.0))
            .add(crate::components::CircleShape::new(pt(0.0, 0.0), 1.0))
            .add(line(vec![0.0], vec![0.0]));
        let colors = d.cycle_colors();
        let cycle = &d.get_theme().cycle;
        assert_eq!(colors[0], cycle.color(0, 4));
        assert_eq!(colors[1], Color::None);
        assert_eq!(colors[2], cycle.color(1, 4));
        assert_eq!(colors[3], Color::None);
        assert_eq!(colors[4], cycle.color(2, 4));
    }

    #[test]
    fn fade_replaces_the_cycle() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0], vec![0.0])).add(line(vec![0.0], vec![0.0]));
        d.color_fade(&[Color::Rgb(0, 0, 0), Color::Rgb(100, 100, 100)], None)
            .unwrap();
        assert_eq!(
            d.cycle_colors(),
            vec![Color::Rgb(0, 0, 0), Color::Rgb(100, 100, 100)]
        );
    }

    // ==================== Border tests ====================

    #[test]
    fn graph_borders_leave_room_for_labels() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0, 1.0], vec![0.0, 1.0]));
        let rec = Recorder::new();
        let b = d.borders(&rec);
        assert_eq!(b.left, d.ylabel_width(&rec) + 9.0 + 4.0);
        assert_eq!(b.bottom, 9.0 + 13.0 + 4.0);
        assert!(d.is_box_framed());
    }

    #[test]
    fn legend_size_counts_named_components() {
        let mut d = Diagram::graph();
        d.add(line(vec![0.0], vec![0.0]).name("one"))
            .add(line(vec![0.0], vec![0.0]))
            .add(Bars::new(vec![0.0], vec![1.0]).unwrap().name("two"));
        let size = d.legend_size(&Recorder::new());
        assert!((size.height - (4.0 + 2.0 * 14.0 * 1.2)).abs() < 1e-9);
        d.legend(LegendLoc::None);
        assert_eq!(d.legend_size(&Recorder::new()), Size::ZERO);
    }

    #[test]
    fn plain_and_polar_borders() {
        let mut d = Diagram::plain();
        assert_eq!(d.borders(&Recorder::new()), Borders::default());
        d.title("T");
        assert_eq!(d.borders(&Recorder::new()).top, 22.0);
        assert_eq!(Diagram::polar().borders(&Recorder::new()), Borders::default());
        assert!(!Diagram::polar().is_box_framed());
    }

    // ==================== Render tests ====================

    #[test]
    fn graph_draw_order() {
        let mut d = Diagram::graph();
        d.title("Title")
            .add(line(vec![0.0, 1.0], vec![0.0, 1.0]).name("data"));
        let rec = render(&d);
        let prims = rec.primitives();

        // Frame fill first, then the L-shaped edge
        assert!(matches!(prims[0], Primitive::Rect { .. }));
        let title = prims
            .iter()
            .position(|p| matches!(p, Primitive::Text { text, .. } if text == "Title"))
            .unwrap();
        let clip = prims
            .iter()
            .position(|p| matches!(p, Primitive::Clip(Some(_))))
            .unwrap();
        assert!(title < clip);
        assert_eq!(rec.texts().last(), Some(&"data"));
    }

    #[test]
    fn components_are_clipped_to_the_data_area() {
        let mut d = Diagram::graph();
        d.add(Scatter::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());
        let rec = render(&d);
        let clips: Vec<_> = rec
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Clip(area) => Some(*area),
                _ => None,
            })
            .collect();
        assert_eq!(clips.len(), 2);
        assert!(clips[0].is_some());
        assert_eq!(clips[1], None);
    }

    #[test]
    fn non_finite_canvas_is_rejected() {
        let mut rec = Recorder::new();
        let err = Diagram::graph()
            .render(&mut rec, ViewBox::new(0.0, 0.0, f64::NAN, 10.0))
            .unwrap_err();
        assert_eq!(err, RenderError::NonFiniteViewBox);
    }

    #[test]
    fn size_must_be_positive() {
        let mut d = Diagram::graph();
        assert!(d.size(0.0, 100.0).is_err());
        d.size(300.0, 200.0).unwrap();
        assert_eq!(d.canvas_size(), Size::new(300.0, 200.0));
    }
}
