//! Pixel margins around the data area.
//!
//! Borders depend on measured text (tick labels, axis names, title, legend entries) so
//! they are computed from a [`BorderInputs`] snapshot assembled during each render pass.

use crate::log::debug;
use crate::style::Theme;
use crate::types::{Size, ViewBox};

use super::LegendLoc;

/// Margins between the canvas edge and the data area, in device units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Borders {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Borders {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Borders {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Side-by-side maximum of two border sets
    pub fn max(self, other: Borders) -> Borders {
        Borders {
            left: self.left.max(other.left),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Measured sizes that decide the borders of a framed diagram
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BorderInputs {
    pub show_xticks: bool,
    pub show_yticks: bool,
    /// Widest y tick label
    pub ylabel_width: f64,
    pub xname: Option<Size>,
    pub yname: Option<Size>,
    pub title: Option<Size>,
    pub legend: LegendLoc,
    /// Zero when there is nothing to list
    pub legend_size: Size,
}

/// Borders of a boxed or L-framed graph
pub fn graph_borders(inputs: &BorderInputs, theme: &Theme) -> Borders {
    let (xtick, ytick, legend) = (&theme.tick_x, &theme.tick_y, &theme.legend);

    let mut left = if inputs.show_yticks {
        inputs.ylabel_width + ytick.height + ytick.margin
    } else {
        0.0
    };
    if let Some(name) = inputs.yname {
        left += name.height + ytick.margin;
    }
    if inputs.legend == LegendLoc::Left {
        left += inputs.legend_size.width + ytick.margin;
    }

    let mut bottom = if inputs.show_xticks {
        xtick.height + xtick.font_size + 4.0
    } else {
        0.0
    };
    if let Some(name) = inputs.xname {
        bottom += name.height + 2.0;
    }

    let mut top = legend.edge_width + ytick.font_size / 2.0;
    if let Some(title) = inputs.title {
        top += title.height;
    }

    let mut right = legend.edge_width;
    if inputs.legend == LegendLoc::Right {
        right += inputs.legend_size.width + 5.0;
    }

    let borders = Borders::new(left, right, top, bottom);
    debug!(left, right, top, bottom, "graph borders");
    borders
}

/// Borders of a quadrant graph whose axes cross at the origin.
///
/// Tick labels only take room on a side where the data range starts at zero, since
/// otherwise they sit inside the data area next to the axis.
pub fn quad_borders(inputs: &BorderInputs, xmin_zero: bool, ymin_zero: bool, theme: &Theme) -> Borders {
    let (xtick, ytick, legend) = (&theme.tick_x, &theme.tick_y, &theme.legend);
    let arrow = theme.frame.edge_width * 3.0;

    let mut left = if xmin_zero {
        inputs.ylabel_width + ytick.height + ytick.margin
    } else {
        1.0
    };
    let bottom = if ymin_zero {
        xtick.height + xtick.font_size + 4.0
    } else {
        1.0
    };
    let mut right = arrow * 2.0;
    let mut top = arrow;

    match inputs.legend {
        LegendLoc::Left => left += inputs.legend_size.width + legend.edge_width,
        LegendLoc::Right => right += inputs.legend_size.width + legend.edge_width,
        _ => {}
    }
    if inputs.yname.is_some() {
        top += ytick.margin + theme.y_name.font_size + 2.0;
    }
    if let Some(name) = inputs.xname {
        right += name.width;
    }
    if inputs.title.is_some() {
        top += theme.title.font_size;
    }

    debug!(left, right, top, bottom, "quad borders");
    Borders::new(left, right, top, bottom)
}

/// Borders of a diagram without axes: room for the title only
pub fn plain_borders(has_title: bool, theme: &Theme) -> Borders {
    let top = if has_title {
        theme.title.font_size + 4.0
    } else {
        0.0
    };
    Borders::new(0.0, 0.0, top, 0.0)
}

/// The canvas viewbox shrunk by `borders` (y up)
pub fn diagram_box(canvas: ViewBox, borders: &Borders) -> ViewBox {
    ViewBox::new(
        canvas.x + borders.left,
        canvas.y + borders.bottom,
        canvas.w - (borders.left + borders.right),
        canvas.h - (borders.top + borders.bottom),
    )
}

/// Shrink `diagbox` so one data unit spans the same device distance on both axes.
///
/// The data box itself is never changed; the device box keeps its lower-left corner.
pub fn equal_aspect(databox: ViewBox, diagbox: ViewBox) -> ViewBox {
    let ratio = databox.aspect() / diagbox.aspect();
    if !ratio.is_finite() || ratio <= 0.0 {
        return diagbox;
    }
    let w = if ratio >= 1.0 { diagbox.w } else { diagbox.w * ratio };
    let h = if ratio <= 1.0 { diagbox.h } else { diagbox.h / ratio };
    debug!(ratio, w, h, "equal aspect");
    ViewBox::new(diagbox.x, diagbox.y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> BorderInputs {
        BorderInputs {
            show_xticks: true,
            show_yticks: true,
            ylabel_width: 20.0,
            legend: LegendLoc::None,
            ..BorderInputs::default()
        }
    }

    // ==================== graph_borders tests ====================

    #[test]
    fn graph_borders_from_ticks() {
        let theme = Theme::default();
        let b = graph_borders(&inputs(), &theme);
        assert_eq!(b.left, 20.0 + 9.0 + 4.0);
        assert_eq!(b.bottom, 9.0 + 13.0 + 4.0);
        assert_eq!(b.top, 1.0 + 6.5);
        assert_eq!(b.right, 1.0);
    }

    #[test]
    fn names_title_and_legend_add_room() {
        let theme = Theme::default();
        let plain = graph_borders(&inputs(), &theme);
        let full = graph_borders(
            &BorderInputs {
                xname: Some(Size::new(30.0, 14.0)),
                yname: Some(Size::new(30.0, 14.0)),
                title: Some(Size::new(80.0, 18.0)),
                legend: LegendLoc::Right,
                legend_size: Size::new(60.0, 20.0),
                ..inputs()
            },
            &theme,
        );
        assert_eq!(full.left - plain.left, 14.0 + 4.0);
        assert_eq!(full.bottom - plain.bottom, 16.0);
        assert_eq!(full.top - plain.top, 18.0);
        assert_eq!(full.right - plain.right, 65.0);
    }

    #[test]
    fn hidden_ticks_take_no_room() {
        let b = graph_borders(
            &BorderInputs {
                show_xticks: false,
                show_yticks: false,
                ..inputs()
            },
            &Theme::default(),
        );
        assert_eq!((b.left, b.bottom), (0.0, 0.0));
    }

    // ==================== quad_borders tests ====================

    #[test]
    fn quad_borders_leave_room_for_arrows() {
        let theme = Theme::default();
        let b = quad_borders(&inputs(), false, false, &theme);
        assert_eq!(b, Borders::new(1.0, 12.0, 6.0, 1.0));
        let b = quad_borders(&inputs(), true, true, &theme);
        assert_eq!(b.left, 33.0);
        assert_eq!(b.bottom, 26.0);
    }

    // ==================== Box tests ====================

    #[test]
    fn diagram_box_shrinks_canvas() {
        let vb = diagram_box(
            ViewBox::new(0.0, 0.0, 600.0, 400.0),
            &Borders::new(50.0, 10.0, 20.0, 30.0),
        );
        assert_eq!(vb, ViewBox::new(50.0, 30.0, 540.0, 350.0));
    }

    #[test]
    fn equal_aspect_matches_scales() {
        let diag = ViewBox::new(10.0, 10.0, 400.0, 300.0);
        for data in [
            ViewBox::new(0.0, 0.0, 10.0, 10.0),
            ViewBox::new(-5.0, 0.0, 40.0, 2.0),
            ViewBox::new(0.0, 0.0, 1.0, 3.0),
        ] {
            let out = equal_aspect(data, diag);
            let sx = data.w / out.w;
            let sy = data.h / out.h;
            assert!((sx - sy).abs() / sx < 1e-12, "{data} -> {out}");
            assert!(out.w <= diag.w && out.h <= diag.h);
            assert_eq!((out.x, out.y), (diag.x, diag.y));
        }
    }
}
