//! Legend box: sizing, placement and drawing.

use crate::components::{Component, ComponentKind};
use crate::layout::LegendLoc;
use crate::render::defaults::LEGEND_LINE_HEIGHT;
use crate::render::{
    Drawing, FillStyle, Halign, PathMarkers, StrokeStyle, TextMetrics, TextStyle, Valign,
};
use crate::style::{Color, Style, Theme};
use crate::types::{Point, Size, ViewBox, pt};

/// One listed component, with the style it is drawn in
pub(crate) struct LegendEntry<'a> {
    pub name: &'a str,
    pub style: Style,
    pub stroke: StrokeStyle,
    pub square: bool,
}

impl<'a> LegendEntry<'a> {
    /// Entry for a named component, `None` for unnamed ones
    pub fn new(component: &'a ComponentKind, theme: &Theme, cycle: &Color) -> Option<Self> {
        let name = component.common().name.as_deref().filter(|n| !n.is_empty())?;
        let style = component.resolved_style(theme, cycle);
        Some(LegendEntry {
            name,
            stroke: component.legend_stroke(&style),
            square: component.has_square_legend_glyph(),
            style,
        })
    }
}

fn text_style(theme: &Theme, halign: Halign) -> TextStyle {
    TextStyle::new(&theme.legend_text, halign, Valign::Baseline)
}

/// Device size of the legend box; zero when nothing is listed
pub(crate) fn legend_size<M: TextMetrics + ?Sized>(
    entries: &[LegendEntry<'_>],
    theme: &Theme,
    metrics: &M,
) -> Size {
    if entries.is_empty() {
        return Size::ZERO;
    }
    let legend = &theme.legend;
    let markw = legend.radius;
    let square = markw / 4.0;
    let style = text_style(theme, Halign::Left);

    let width = entries
        .iter()
        .map(|entry| {
            let glyph = if entry.square { square * 2.0 } else { markw };
            glyph + metrics.text_size(entry.name, &style).width + legend.pad * 2.0
        })
        .fold(0.0, f64::max);
    let height = legend.pad + entries.len() as f64 * theme.legend_text.font_size * LEGEND_LINE_HEIGHT;
    Size::new(width, height)
}

/// Top edge and right edge of the legend box, or `None` when it is hidden.
///
/// `ylabel_width` is the widest y tick label, so a left legend clears the labels.
pub(crate) fn legend_anchor(
    loc: LegendLoc,
    diagbox: ViewBox,
    size: Size,
    ylabel_width: f64,
    theme: &Theme,
) -> Option<(f64, f64)> {
    let (legend, tick) = (&theme.legend, &theme.tick_x);
    let margin = legend.margin + legend.stroke_width;
    let (top, right) = (diagbox.top(), diagbox.right());
    let anchor = match loc {
        LegendLoc::None => return None,
        LegendLoc::Left => (
            top,
            diagbox.x - tick.height - ylabel_width - tick.margin * 2.0 + legend.stroke_width,
        ),
        LegendLoc::Right => (top, right + size.width + margin - legend.stroke_width * 4.0),
        LegendLoc::TopRight => (top - margin, right - margin),
        LegendLoc::BottomLeft => (diagbox.y + size.height + margin, diagbox.x + size.width + margin),
        LegendLoc::BottomRight => (diagbox.y + size.height + legend.margin, right - margin),
        LegendLoc::TopLeft => (top - margin, diagbox.x + size.width + margin),
    };
    Some(anchor)
}

/// Legend placement around quadrant axes, which leave room for the axis arrows
pub(crate) fn quad_legend_anchor(
    loc: LegendLoc,
    diagbox: ViewBox,
    size: Size,
    theme: &Theme,
) -> Option<(f64, f64)> {
    let legend = &theme.legend;
    let arrow = legend.edge_width * 3.0;
    let pad = legend.pad;
    let (top, right) = (diagbox.top(), diagbox.right());
    let anchor = match loc {
        LegendLoc::None => return None,
        LegendLoc::Left => (top, diagbox.x - arrow + legend.edge_width),
        LegendLoc::Right => (top, right + size.width + arrow),
        LegendLoc::TopRight => (top - pad, right - pad),
        LegendLoc::BottomLeft => (diagbox.y + size.height + pad, diagbox.x + size.width + pad),
        LegendLoc::BottomRight => (diagbox.y + size.height + pad, right - pad),
        LegendLoc::TopLeft => (top - pad, diagbox.x + size.width + pad),
    };
    Some(anchor)
}

/// Draw the legend box with its top edge at `ytop` and right edge at `xright`
pub(crate) fn draw_legend(
    drawing: &mut dyn Drawing,
    entries: &[LegendEntry<'_>],
    (ytop, xright): (f64, f64),
    size: Size,
    theme: &Theme,
) {
    let legend = &theme.legend;
    let font_size = theme.legend_text.font_size;
    let markw = legend.radius;
    let square = markw / 4.0;
    let pad = legend.pad;

    let boxl = xright - size.width;
    drawing.rect(
        ViewBox::new(boxl, ytop - size.height, size.width, size.height),
        &FillStyle::new(legend.color.clone()),
        &StrokeStyle::new(legend.edge_color.clone(), legend.stroke_width),
    );

    let text = text_style(theme, Halign::Left);
    let mut yytext = ytop - font_size;
    for entry in entries {
        if entry.square {
            drawing.text(pt(boxl + square + pad * 2.0, yytext), entry.name, &text);
            drawing.rect(
                ViewBox::new(boxl + pad, yytext, square, square),
                &FillStyle::new(entry.style.color.clone()),
                &StrokeStyle::edge(&entry.style),
            );
        } else {
            drawing.text(pt(xright - size.width + markw, yytext), entry.name, &text);
            let yline = yytext + font_size / 3.0;
            let sample: [Point; 3] = [
                pt(boxl - pad * 2.0, yline),
                pt(boxl + markw / 2.0, yline),
                pt(boxl + markw + pad * 2.0, yline),
            ];
            let markers = match entry.style.marker {
                Some(shape) => PathMarkers::every(drawing.define_marker(
                    shape,
                    entry.style.radius,
                    &entry.style.color,
                    &StrokeStyle::edge(&entry.style),
                    false,
                )),
                None => PathMarkers::default(),
            };
            drawing.clip(Some(ViewBox::new(
                boxl + pad,
                ytop - size.height,
                markw - pad * 2.0,
                size.height,
            )));
            drawing.path(&sample, &entry.stroke, &markers);
            drawing.clip(None);
        }
        yytext -= font_size * LEGEND_LINE_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Bars, ComponentExt, PolyLine};
    use crate::render::{Primitive, Recorder};
    use crate::render::text::estimate_text_size;

    fn line(name: &str) -> ComponentKind {
        PolyLine::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap().name(name).into()
    }

    // ==================== Size tests ====================

    #[test]
    fn size_from_widest_entry() {
        let theme = Theme::default();
        let kinds = [line("a"), line("longer name")];
        let entries: Vec<_> = kinds
            .iter()
            .filter_map(|c| LegendEntry::new(c, &theme, &Color::BLACK))
            .collect();
        let rec = Recorder::new();
        let size = legend_size(&entries, &theme, &rec);

        let text = estimate_text_size("longer name", 14.0, theme.legend_text.font);
        assert_eq!(size.width, 40.0 + text.width + 8.0);
        assert!((size.height - (4.0 + 2.0 * 14.0 * 1.2)).abs() < 1e-9);
    }

    #[test]
    fn unnamed_components_are_not_listed() {
        let theme = Theme::default();
        let unnamed: ComponentKind = PolyLine::new(vec![0.0], vec![0.0]).unwrap().into();
        assert!(LegendEntry::new(&unnamed, &theme, &Color::BLACK).is_none());
        assert_eq!(legend_size(&[], &theme, &Recorder::new()), Size::ZERO);
    }

    #[test]
    fn square_glyph_is_narrower() {
        let theme = Theme::default();
        let bars: ComponentKind = Bars::new(vec![1.0], vec![1.0]).unwrap().name("a").into();
        let entry = LegendEntry::new(&bars, &theme, &Color::BLACK).unwrap();
        assert!(entry.square);
        let size = legend_size(&[entry], &theme, &Recorder::new());
        let text = estimate_text_size("a", 14.0, theme.legend_text.font);
        assert_eq!(size.width, 20.0 + text.width + 8.0);
    }

    // ==================== Placement tests ====================

    #[test]
    fn anchors_around_the_data_box() {
        let theme = Theme::default();
        let diag = ViewBox::new(50.0, 30.0, 400.0, 300.0);
        let size = Size::new(60.0, 40.0);
        assert_eq!(legend_anchor(LegendLoc::None, diag, size, 0.0, &theme), None);
        assert_eq!(
            legend_anchor(LegendLoc::TopRight, diag, size, 0.0, &theme),
            Some((330.0 - 9.0, 450.0 - 9.0))
        );
        assert_eq!(
            legend_anchor(LegendLoc::Left, diag, size, 20.0, &theme),
            Some((330.0, 50.0 - 9.0 - 20.0 - 8.0 + 1.0))
        );
        assert_eq!(
            quad_legend_anchor(LegendLoc::BottomLeft, diag, size, &theme),
            Some((30.0 + 40.0 + 4.0, 50.0 + 60.0 + 4.0))
        );
    }

    // ==================== Drawing tests ====================

    #[test]
    fn line_entries_are_clipped_samples() {
        let theme = Theme::default();
        let kinds = [line("first"), line("second")];
        let entries: Vec<_> = kinds
            .iter()
            .filter_map(|c| LegendEntry::new(c, &theme, &Color::Rgb(1, 2, 3)))
            .collect();
        let mut rec = Recorder::new();
        let size = Size::new(100.0, 40.0);
        draw_legend(&mut rec, &entries, (200.0, 300.0), size, &theme);

        assert_eq!(rec.texts(), vec!["first", "second"]);
        let clips = rec.count(|p| matches!(p, Primitive::Clip(Some(_))));
        assert_eq!(clips, 2);
        assert_eq!(rec.paths()[0][0], pt(200.0 - 8.0, 186.0 + 14.0 / 3.0));
        assert_eq!(rec.path_colors(), vec![&Color::Rgb(1, 2, 3); 2]);
    }
}
