//! Declarative 2D plotting.
//!
//! Build a [`Diagram`], add components to it, and render it through any [`Drawing`]
//! backend. The bundled [`SvgDrawing`] produces an SVG document.
//!
//! ```
//! use plotru::{Diagram, PolyLine};
//!
//! let mut diagram = Diagram::graph();
//! diagram.add(PolyLine::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0])?);
//! let svg = plotru::to_svg(&diagram)?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), miette::Report>(())
//! ```

pub mod components;
pub mod contour;
pub mod curves;
pub mod diagram;
pub mod errors;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod log;
pub mod numeric;
pub mod render;
pub mod smith;
pub mod style;
pub mod ticks;
pub mod types;

pub use components::{
    ArcShape, BarAlign, Bars, BezierCurve, Bins, CircleShape, ColorbarPos, Component,
    ComponentExt, ComponentKind, Contour, EllipseShape, ErrorBar, FunctionCurve, Histogram,
    Implicit, InfiniteLine, IntegralFill, LineFill, PointMark, PolyLine, Scatter, Segment,
    SmithConstReactance, SmithConstResistance, SplineCurve, Text,
};
pub use diagram::{AxesKind, Diagram};
pub use errors::{ConfigError, GeometryError, PlotError, RenderError};
pub use format::NumberFormat;
pub use layout::{GridLayout, LegendLoc};
pub use render::{Drawing, Recorder, SvgDrawing, SvgOptions, TextMetrics, TextPosition};
pub use smith::SmithGridLevel;
pub use style::{Color, ColorCycle, Dash, MarkerShape, StyleOverride, Theme};
pub use types::{Point, Size, ViewBox, pt};

/// Render a diagram to an SVG document.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn to_svg(diagram: &Diagram) -> Result<String, miette::Report> {
    Ok(diagram.to_svg(SvgOptions::default())?)
}

/// Render every diagram of a grid into one SVG document
pub fn grid_to_svg(grid: &GridLayout) -> Result<String, miette::Report> {
    let size = grid.canvas_size();
    let mut svg = SvgDrawing::new(size.width, size.height, SvgOptions::default());
    grid.render(&mut svg)?;
    Ok(svg.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_simple_graph() {
        let mut diagram = Diagram::graph();
        diagram.add(PolyLine::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());
        let svg = to_svg(&diagram).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn renders_empty_diagrams_of_every_kind() {
        for diagram in [
            Diagram::plain(),
            Diagram::graph(),
            Diagram::quad(),
            Diagram::log(true, true),
            Diagram::polar(),
            Diagram::smith(SmithGridLevel::Coarse),
        ] {
            let kind = diagram.kind();
            assert!(to_svg(&diagram).is_ok(), "{kind:?}");
        }
    }

    #[test]
    fn renders_a_grid() {
        let grid = GridLayout::row([Diagram::graph(), Diagram::polar()]);
        let svg = grid_to_svg(&grid).unwrap();
        assert!(svg.contains("<circle"));
    }
}
