//! Frames, axes, ticks and grids of each diagram kind.

use crate::components::{DrawContext, draw_smith_arc};
use crate::errors::RenderError;
use crate::format::NumberFormat;
use crate::log::{debug, warn};
use crate::render::defaults::{SMITH_CLIP_PAD, SMITH_LABEL_FONT_SIZE};
use crate::render::{Drawing, FillStyle, Halign, PathMarkers, StrokeStyle, TextStyle, Valign};
use crate::smith::{SmithArc, SmithGridLevel, const_react_arc, const_resist_circle};
use crate::style::{Color, MarkerShape, Style};
use crate::ticks::{Ticks, minor_ticks};
use crate::types::{Point, Transform, ViewBox, pt};

use super::Diagram;

/// Tolerance for treating a polar label as level with the center
const ALIGN_TOLERANCE: f64 = 0.1;

/// Offset of Smith grid labels from the line they name, in chart units
const SMITH_LABEL_OFFSET: f64 = 0.01;

fn tick_stroke(style: &Style) -> StrokeStyle {
    StrokeStyle::new(style.color.clone(), style.stroke_width)
}

fn grid_visible(style: &Style) -> bool {
    !style.color.is_none() && style.stroke_width > 0.0
}

fn no_markers() -> PathMarkers {
    PathMarkers::default()
}

impl Diagram {
    // ------------------------------------------------------------------
    // Graph
    // ------------------------------------------------------------------

    pub(super) fn draw_graph_frame(&self, drawing: &mut dyn Drawing, diagbox: ViewBox) {
        let frame = &self.theme.frame;
        drawing.rect(diagbox, &FillStyle::new(frame.color.clone()), &StrokeStyle::none());
        let edge = StrokeStyle::new(frame.edge_color.clone(), frame.edge_width);
        if self.full_box {
            drawing.rect(diagbox, &FillStyle::none(), &edge);
        } else {
            let corner = [
                pt(diagbox.x, diagbox.top()),
                pt(diagbox.x, diagbox.y),
                pt(diagbox.right(), diagbox.y),
            ];
            drawing.path(&corner, &edge, &no_markers());
        }
    }

    pub(super) fn draw_graph_ticks(
        &self,
        drawing: &mut dyn Drawing,
        ticks: &Ticks,
        diagbox: ViewBox,
        databox: ViewBox,
        ylabel_width: f64,
    ) {
        let theme = &self.theme;
        let t = Transform::new(databox, diagbox);
        let edge = theme.frame.edge_width;
        let (xtick, ytick) = (&theme.tick_x, &theme.tick_y);

        for (value, label) in ticks.x.positions.iter().zip(&ticks.x.labels) {
            let x = t.apply_x(*value);
            if grid_visible(&theme.grid_x) && x > diagbox.x + edge && x < diagbox.right() - edge {
                drawing.path(
                    &[pt(x, diagbox.y), pt(x, diagbox.top())],
                    &StrokeStyle::line(&theme.grid_x),
                    &no_markers(),
                );
            }
            if self.show_xticks {
                let y2 = diagbox.y - xtick.height;
                drawing.path(&[pt(x, diagbox.y), pt(x, y2)], &tick_stroke(xtick), &no_markers());
                drawing.text(
                    pt(x, y2 - xtick.margin),
                    label,
                    &TextStyle::new(xtick, Halign::Center, Valign::Top),
                );
            }
        }
        if let (true, Some(minor)) = (self.show_xticks, &ticks.x.minor) {
            let style = &theme.tick_x_minor;
            for value in minor_ticks(&ticks.x.positions, minor) {
                let x = t.apply_x(value);
                let ends = [pt(x, diagbox.y), pt(x, diagbox.y - style.height)];
                drawing.path(&ends, &tick_stroke(style), &no_markers());
            }
        }

        for (value, label) in ticks.y.positions.iter().zip(&ticks.y.labels) {
            let y = t.apply_y(*value);
            if grid_visible(&theme.grid_y) && y > diagbox.y + edge && y < diagbox.top() - edge {
                drawing.path(
                    &[pt(diagbox.x, y), pt(diagbox.right(), y)],
                    &StrokeStyle::line(&theme.grid_y),
                    &no_markers(),
                );
            }
            if self.show_yticks {
                let x2 = diagbox.x - ytick.height;
                drawing.path(&[pt(diagbox.x, y), pt(x2, y)], &tick_stroke(ytick), &no_markers());
                drawing.text(
                    pt(x2 - ytick.margin, y),
                    label,
                    &TextStyle::new(ytick, Halign::Right, Valign::Center),
                );
            }
        }
        if let (true, Some(minor)) = (self.show_yticks, &ticks.y.minor) {
            let style = &theme.tick_y_minor;
            for value in minor_ticks(&ticks.y.positions, minor) {
                let y = t.apply_y(value);
                let ends = [pt(diagbox.x, y), pt(diagbox.x - style.height, y)];
                drawing.path(&ends, &tick_stroke(style), &no_markers());
            }
        }

        if let Some(name) = &self.xname {
            let y = diagbox.y - xtick.font_size - xtick.height - xtick.margin;
            drawing.text(
                pt(diagbox.center().x, y),
                name,
                &TextStyle::new(&theme.x_name, Halign::Center, Valign::Top),
            );
        }
        if let Some(name) = &self.yname {
            let x = diagbox.x - ytick.height - ylabel_width - ytick.font_size;
            drawing.text(
                pt(x, diagbox.center().y),
                name,
                &TextStyle::new(&theme.y_name, Halign::Center, Valign::Center).rotate(90.0),
            );
        }
    }

    // ------------------------------------------------------------------
    // Quadrant axes
    // ------------------------------------------------------------------

    pub(super) fn draw_quad_frame(&self, drawing: &mut dyn Drawing, diagbox: ViewBox) {
        let fill = FillStyle::new(self.theme.frame.color.clone());
        drawing.rect(diagbox, &fill, &StrokeStyle::none());
    }

    pub(super) fn draw_quad_axes(
        &self,
        drawing: &mut dyn Drawing,
        ticks: &Ticks,
        diagbox: ViewBox,
        databox: ViewBox,
    ) {
        let theme = &self.theme;
        let frame = &theme.frame;
        let t = Transform::new(databox, diagbox);
        let origin = t.apply(pt(0.0, 0.0));
        let arrow = frame.edge_width * 3.0;
        let (xleft, xright) = (diagbox.x, diagbox.right());
        let (ybot, ytop) = (diagbox.y, diagbox.top());

        let axis = StrokeStyle::new(frame.edge_color.clone(), frame.edge_width);
        let start = drawing.define_marker(MarkerShape::LeftArrow, arrow, &frame.edge_color, &axis, true);
        let end = drawing.define_marker(MarkerShape::RightArrow, arrow, &frame.edge_color, &axis, true);

        // An axis that starts at the origin has no arrow pointing back
        let x_from_origin = databox.x == 0.0;
        let y_from_origin = databox.y == 0.0;
        let xstart = if x_from_origin { xleft } else { xleft + arrow };
        drawing.path(
            &[pt(xstart, origin.y), pt(xright - arrow, origin.y)],
            &axis,
            &PathMarkers {
                start: (!x_from_origin).then(|| start.clone()),
                end: Some(end.clone()),
                ..PathMarkers::default()
            },
        );
        let ystop = if y_from_origin { ybot } else { ybot + arrow };
        drawing.path(
            &[pt(origin.x, ytop - arrow), pt(origin.x, ystop)],
            &axis,
            &PathMarkers {
                start: Some(start),
                end: (!y_from_origin).then_some(end),
                ..PathMarkers::default()
            },
        );

        let (xtick, ytick) = (&theme.tick_x, &theme.tick_y);
        if self.show_xticks {
            for (value, label) in ticks.x.positions.iter().zip(&ticks.x.labels) {
                if *value == 0.0 {
                    continue;
                }
                let x = t.apply_x(*value);
                if grid_visible(&theme.grid_x) {
                    drawing.path(
                        &[pt(x, ybot), pt(x, ytop)],
                        &StrokeStyle::line(&theme.grid_x),
                        &no_markers(),
                    );
                }
                if xleft < x && x < xright {
                    let (y1, y2) = (origin.y + xtick.height / 2.0, origin.y - xtick.height / 2.0);
                    drawing.path(&[pt(x, y1), pt(x, y2)], &tick_stroke(xtick), &no_markers());
                    drawing.text(
                        pt(x, y2 - xtick.margin),
                        label,
                        &TextStyle::new(xtick, Halign::Center, Valign::Top),
                    );
                }
            }
            if let Some(minor) = &ticks.x.minor {
                let style = &theme.tick_x_minor;
                for value in minor_ticks(&ticks.x.positions, minor) {
                    let x = t.apply_x(value);
                    let ends = [
                        pt(x, origin.y + style.height / 2.0),
                        pt(x, origin.y - style.height / 2.0),
                    ];
                    drawing.path(&ends, &tick_stroke(style), &no_markers());
                }
            }
        }

        if self.show_yticks {
            for (value, label) in ticks.y.positions.iter().zip(&ticks.y.labels) {
                if *value == 0.0 {
                    continue;
                }
                let y = t.apply_y(*value);
                if grid_visible(&theme.grid_y) {
                    drawing.path(
                        &[pt(xleft, y), pt(xright, y)],
                        &StrokeStyle::line(&theme.grid_y),
                        &no_markers(),
                    );
                }
                if ybot < y && y < ytop {
                    let (x1, x2) = (origin.x + ytick.height / 2.0, origin.x - ytick.height / 2.0);
                    drawing.path(&[pt(x1, y), pt(x2, y)], &tick_stroke(ytick), &no_markers());
                    drawing.text(
                        pt(x2 - ytick.margin, y),
                        label,
                        &TextStyle::new(ytick, Halign::Right, Valign::Center),
                    );
                }
            }
            if let Some(minor) = &ticks.y.minor {
                let style = &theme.tick_y_minor;
                for value in minor_ticks(&ticks.y.positions, minor) {
                    let y = t.apply_y(value);
                    let ends = [
                        pt(origin.x + style.height / 2.0, y),
                        pt(origin.x - style.height / 2.0, y),
                    ];
                    drawing.path(&ends, &tick_stroke(style), &no_markers());
                }
            }
        }

        if let Some(name) = &self.xname {
            drawing.text(
                pt(xright + xtick.margin, origin.y),
                name,
                &TextStyle::new(&theme.x_name, Halign::Left, Valign::Center),
            );
        }
        if let Some(name) = &self.yname {
            drawing.text(
                pt(origin.x, ytop + ytick.margin),
                name,
                &TextStyle::new(&theme.y_name, Halign::Center, Valign::Bottom),
            );
        }
    }

    // ------------------------------------------------------------------
    // Round frames
    // ------------------------------------------------------------------

    /// Draw the title centered at the top of `canvas` and return the circle the chart
    /// fits in, given the room `inset` reserved around it
    fn round_frame(&self, drawing: &mut dyn Drawing, canvas: ViewBox, inset: f64) -> (Point, f64) {
        let mut radius = canvas.w.min(canvas.h) / 2.0 - inset;
        let mut center = canvas.center();
        if let Some(title) = &self.title {
            let style = &self.theme.title;
            radius -= style.font_size / 2.0;
            center.y -= style.font_size / 2.0;
            drawing.text(
                pt(center.x, canvas.top()),
                title,
                &TextStyle::new(style, Halign::Center, Valign::Top),
            );
        }
        if radius <= 0.0 {
            warn!(radius, %canvas, "canvas too small for a round frame");
            radius = radius.max(0.0);
        }
        (center, radius)
    }

    pub(super) fn render_polar(
        &self,
        drawing: &mut dyn Drawing,
        canvas: ViewBox,
        colors: &[Color],
        label_theta: f64,
    ) -> Result<(), RenderError> {
        let theme = &self.theme;
        let polar = &theme.polar;
        let (center, radius) =
            self.round_frame(drawing, canvas, polar.pad * 2.0 + polar.font_size * 2.0);
        let ticks = self.ticks();
        debug!(radius, rmax = ticks.x.range.1, "polar layout");

        let frame = &theme.frame;
        drawing.circle(
            center,
            radius,
            &FillStyle::new(frame.color.clone()),
            &StrokeStyle::new(frame.edge_color.clone(), frame.edge_width),
        );

        let grid = StrokeStyle::line(&theme.grid_x);
        let label_dir = Point::from_angle(label_theta.to_radians());
        let rings = ticks.x.labels.len();
        for (i, label) in ticks.x.labels.iter().enumerate() {
            if i == 0 || i + 1 == rings {
                continue;
            }
            let r = radius / (rings - 1) as f64 * i as f64;
            drawing.circle(center, r, &FillStyle::none(), &grid);
            drawing.text(
                center + label_dir * r,
                label,
                &TextStyle::new(&theme.tick_x, Halign::Center, Valign::Bottom),
            );
        }

        for (theta, label) in ticks.y.positions.iter().zip(&ticks.y.labels) {
            let dir = Point::from_angle(theta.to_radians());
            drawing.path(&[center, center + dir * radius], &grid, &no_markers());

            let at = center + dir * (radius + polar.margin);
            let halign = if (at.x - center.x).abs() < ALIGN_TOLERANCE {
                Halign::Center
            } else if at.x > center.x {
                Halign::Left
            } else {
                Halign::Right
            };
            let valign = if (at.y - center.y).abs() < ALIGN_TOLERANCE {
                Valign::Center
            } else if at.y > center.y {
                Valign::Bottom
            } else {
                Valign::Top
            };
            drawing.text(at, label, &TextStyle::new(&theme.tick_x, halign, valign));
        }

        let rmax = ticks.x.range.1;
        let databox = ViewBox::new(-rmax, -rmax, rmax * 2.0, rmax * 2.0);
        let diagbox = ViewBox::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.draw_components(drawing, diagbox, databox, colors)?;
        self.draw_legend(drawing, diagbox, 0.0, false, colors);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Smith chart
    // ------------------------------------------------------------------

    pub(super) fn render_smith(
        &self,
        drawing: &mut dyn Drawing,
        canvas: ViewBox,
        colors: &[Color],
        level: SmithGridLevel,
    ) -> Result<(), RenderError> {
        let theme = &self.theme;
        let inset = theme.polar.pad * 2.0 + theme.tick_y.font_size;
        let (center, radius) = self.round_frame(drawing, canvas, inset);
        let frame = &theme.frame;
        drawing.circle(
            center,
            radius,
            &FillStyle::new(frame.color.clone()),
            &StrokeStyle::none(),
        );

        let chart = ViewBox::new(-1.0, -1.0, 2.0, 2.0);
        let diagbox = ViewBox::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        drawing.clip(Some(ViewBox::new(
            diagbox.x - SMITH_CLIP_PAD,
            diagbox.y - SMITH_CLIP_PAD,
            diagbox.w + SMITH_CLIP_PAD * 2.0,
            diagbox.h + SMITH_CLIP_PAD * 2.0,
        )));
        let mut ctx = DrawContext {
            drawing: &mut *drawing,
            theme,
            transform: Transform::new(chart, diagbox),
            databox: chart,
            diagbox,
            style: theme.smith_grid.clone(),
        };
        draw_smith_grid(&mut ctx, level);
        drawing.clip(None);

        drawing.circle(
            center,
            radius,
            &FillStyle::none(),
            &StrokeStyle::new(frame.edge_color.clone(), frame.edge_width),
        );

        self.draw_components(drawing, diagbox, chart, colors)?;
        self.draw_legend(drawing, diagbox, 0.0, false, colors);
        Ok(())
    }
}

fn smith_label(value: f64) -> String {
    let format = if value.abs() < 10.0 {
        NumberFormat::Fixed(1)
    } else {
        NumberFormat::Fixed(0)
    };
    format.format(value)
}

/// Reactance arcs (both signs), resistance circles, the real axis and their labels
fn draw_smith_grid(ctx: &mut DrawContext<'_>, level: SmithGridLevel) {
    let theme = ctx.theme;
    let major = StrokeStyle::new(theme.smith_grid.color.clone(), theme.smith_grid.stroke_width);
    let minor = StrokeStyle::new(
        theme.smith_grid_minor.color.clone(),
        theme.smith_grid_minor.stroke_width,
    );
    let label_style = |halign: Halign, valign: Valign, rotate: f64| TextStyle {
        size: SMITH_LABEL_FONT_SIZE,
        ..TextStyle::new(&theme.tick_x, halign, valign).rotate(rotate)
    };
    let grid = level.grid();

    for line in grid.arcs {
        let arc = const_react_arc(line.value, line.min, line.max);
        let stroke = if line.major { &major } else { &minor };
        draw_smith_arc(ctx, &arc, stroke);
        draw_smith_arc(ctx, &arc.mirrored(), stroke);

        let Some((theta1, _)) = arc.span.filter(|_| line.major && arc.is_drawable()) else {
            continue;
        };
        let end = arc.point_at(theta1);
        let at = end + Point::from_angle(end.y.atan2(end.x)) * SMITH_LABEL_OFFSET;
        let upper = ctx.transform.apply(at);
        let lower = ctx.transform.apply(pt(at.x, -at.y));
        ctx.drawing.text(
            upper,
            &smith_label(line.value),
            &label_style(Halign::Center, Valign::Bottom, theta1 - 180.0),
        );
        ctx.drawing.text(
            lower,
            &smith_label(-line.value),
            &label_style(Halign::Center, Valign::Top, 180.0 - theta1),
        );
    }

    for line in grid.circles {
        let xmin = if line.min == 0.0 { -line.max } else { line.min };
        let arc = const_resist_circle(line.value, xmin, line.max);
        let stroke = if line.major { &major } else { &minor };
        let symmetric = xmin == -line.max;
        match arc.span {
            Some((t1, t2)) if t1 != t2 && !symmetric => {
                draw_smith_arc(ctx, &arc, stroke);
                draw_smith_arc(ctx, &arc.mirrored(), stroke);
            }
            Some((t1, t2)) if t1 != t2 => {
                draw_smith_arc(ctx, &arc, stroke);
            }
            _ => {
                let full = SmithArc { span: None, ..arc };
                draw_smith_arc(ctx, &full, stroke);
            }
        }
        if line.major {
            let at = pt(
                arc.center.x - arc.radius - SMITH_LABEL_OFFSET,
                arc.center.y + SMITH_LABEL_OFFSET,
            );
            let at = ctx.transform.apply(at);
            ctx.drawing.text(
                at,
                &smith_label(line.value),
                &label_style(Halign::Left, Valign::Bottom, 90.0),
            );
        }
    }

    let axis = [ctx.transform.apply(pt(-1.0, 0.0)), ctx.transform.apply(pt(1.0, 0.0))];
    ctx.drawing.path(&axis, &major, &no_markers());
    let zero = ctx.transform.apply(pt(-1.0 - SMITH_LABEL_OFFSET, 0.0));
    ctx.drawing
        .text(zero, "0", &label_style(Halign::Center, Valign::Bottom, 90.0));
}
