//! Error types with diagnostics using miette
//!
//! Geometry failures are explicit values rather than NaN sentinels, configuration
//! mistakes fail at the call that introduces them, and render errors wrap whatever a
//! component's geometry raised while drawing.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Geometry Errors
// ============================================================================

/// A geometric construction has no solution for the given inputs
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("lines are parallel and do not intersect")]
    #[diagnostic(code(plotru::geometry::parallel_lines))]
    ParallelLines,

    #[error("point is inside the circle; no tangent exists")]
    #[diagnostic(code(plotru::geometry::point_inside_circle))]
    PointInsideCircle,

    #[error("points are collinear; no circle passes through all three")]
    #[diagnostic(code(plotru::geometry::collinear_points))]
    CollinearPoints,

    #[error("curves do not intersect")]
    #[diagnostic(code(plotru::geometry::no_intersection))]
    NoIntersection,

    #[error("no sign change between {lo} and {hi}")]
    #[diagnostic(
        code(plotru::geometry::no_root),
        help("the function must have opposite signs at the two ends of the interval")
    )]
    NoRoot { lo: f64, hi: f64 },

    #[error("need at least {needed} points, got {got}")]
    #[diagnostic(code(plotru::geometry::too_few_points))]
    TooFewPoints { needed: usize, got: usize },

    #[error("spline needs 3n+1 control points, got {got}")]
    #[diagnostic(
        code(plotru::geometry::spline_point_count),
        help("consecutive cubic segments share their end points: 4, 7, 10, ... points")
    )]
    SplinePointCount { got: usize },

    #[error("line coefficients a and b are both zero")]
    #[diagnostic(code(plotru::geometry::degenerate_line))]
    DegenerateLine,
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid diagram, layout or style configuration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown Smith grid `{name}`")]
    #[diagnostic(
        code(plotru::config::unknown_smith_grid),
        help("available grids are {valid}")
    )]
    UnknownSmithGrid { name: String, valid: String },

    #[error("invalid grid specification `{spec}`: {reason}")]
    #[diagnostic(
        code(plotru::config::invalid_grid_spec),
        help("use space-separated sizes such as `1fr 2fr`, `100px`, `25%` or `80`")
    )]
    InvalidGridSpec { spec: String, reason: String },

    #[error("cannot set y (theta) range on a polar diagram")]
    #[diagnostic(
        code(plotru::config::polar_theta_range),
        help("theta always spans 0 to 360 degrees; use `xrange` to limit the radius")
    )]
    PolarThetaRange,

    #[error("invalid color `{spec}`")]
    #[diagnostic(
        code(plotru::config::invalid_color),
        help("use `none`, a color name such as `red`, or hex `#rgb` / `#rrggbb`")
    )]
    InvalidColor { spec: String },

    #[error("unknown marker shape `{name}`")]
    #[diagnostic(
        code(plotru::config::invalid_marker),
        help("available markers are round, square, triangle, triangled, larrow, arrow, +, x, - and |")
    )]
    InvalidMarker { name: String },

    #[error("unknown theme `{name}`")]
    #[diagnostic(code(plotru::config::unknown_theme), help("available themes are {valid}"))]
    UnknownTheme { name: String, valid: String },

    #[error("invalid color fade: {reason}")]
    #[diagnostic(code(plotru::config::invalid_color_fade))]
    InvalidColorFade { reason: String },

    #[error("invalid number format `{spec}`")]
    #[diagnostic(
        code(plotru::config::invalid_number_format),
        help("supported formats are g, .Ng, .Nf, e, .Ne and d")
    )]
    InvalidNumberFormat { spec: String },

    #[error("{what}: length mismatch ({left} vs {right})")]
    #[diagnostic(code(plotru::config::mismatched_lengths))]
    MismatchedLengths {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("{what} needs data")]
    #[diagnostic(code(plotru::config::empty_data))]
    EmptyData { what: &'static str },

    #[error("invalid histogram bins: {reason}")]
    #[diagnostic(
        code(plotru::config::invalid_bins),
        help("give a positive bin count, or a bin range with start < stop and a positive step")
    )]
    InvalidBins { reason: String },

    #[error("grid cell ({row}, {column}) is outside the layout")]
    #[diagnostic(code(plotru::config::grid_cell_out_of_bounds))]
    GridCellOutOfBounds { row: usize, column: usize },

    #[error("invalid canvas size {width} x {height}")]
    #[diagnostic(
        code(plotru::config::invalid_canvas_size),
        help("width and height must be finite and positive")
    )]
    InvalidCanvasSize { width: f64, height: f64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while rendering a diagram
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),

    #[error("canvas viewbox is not finite")]
    #[diagnostic(code(plotru::render::non_finite_viewbox))]
    NonFiniteViewBox,

    #[error("XML serialization error: {message}")]
    #[diagnostic(code(plotru::render::serialize))]
    Serialize { message: String },
}

// ============================================================================
// Umbrella
// ============================================================================

/// Any error raised by the crate
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smith_grid_error_lists_alternatives() {
        let err = ConfigError::UnknownSmithGrid {
            name: "huge".into(),
            valid: "coarse, medium, fine, extrafine".into(),
        };
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("coarse, medium, fine, extrafine"));
        assert_eq!(err.to_string(), "unknown Smith grid `huge`");
    }

    #[test]
    fn render_error_wraps_geometry() {
        let err: RenderError = GeometryError::ParallelLines.into();
        assert_eq!(err.to_string(), "lines are parallel and do not intersect");
        let plot: PlotError = err.into();
        assert!(matches!(
            plot,
            PlotError::Render(RenderError::Geometry(GeometryError::ParallelLines))
        ));
    }
}
