//! Default sizes and settings (all in SVG user units, 1 unit = 1 px)

pub const CANVAS_WIDTH: f64 = 600.0;
pub const CANVAS_HEIGHT: f64 = 400.0;

pub const FONT_SIZE: f64 = 14.0;
pub const STROKE_WIDTH: f64 = 2.0;
pub const EDGE_WIDTH: f64 = 1.0;
pub const MARKER_RADIUS: f64 = 8.0;

pub const FRAME_FILL: &str = "#F6F6F6";
pub const FRAME_EDGE_WIDTH: f64 = 2.0;
pub const FRAME_FONT_SIZE: f64 = 16.0;

pub const GRID_COLOR: &str = "lightgray";
pub const GRID_WIDTH: f64 = 1.0;

pub const TITLE_FONT_SIZE: f64 = 18.0;
pub const AXIS_NAME_FONT_SIZE: f64 = 14.0;

pub const TICK_FONT_SIZE: f64 = 13.0;
pub const TICK_LENGTH: f64 = 9.0;
pub const TICK_WIDTH: f64 = 2.0;
pub const TICK_MARGIN: f64 = 4.0;
pub const MINOR_TICK_LENGTH: f64 = 5.0;
pub const MINOR_TICK_WIDTH: f64 = 1.0;

pub const LEGEND_STROKE_WIDTH: f64 = 1.0;
/// Glyph size of a legend entry
pub const LEGEND_RADIUS: f64 = 40.0;
/// Between legend and frame
pub const LEGEND_MARGIN: f64 = 8.0;
/// Between legend frame and contents
pub const LEGEND_PAD: f64 = 4.0;
pub const LEGEND_FONT_SIZE: f64 = 14.0;
pub const LEGEND_TEXT_MARGIN: f64 = 4.0;
/// Line height as a multiple of the legend font size
pub const LEGEND_LINE_HEIGHT: f64 = 1.2;

/// Frame to canvas edge on polar diagrams
pub const POLAR_PAD: f64 = 10.0;
/// Theta labels to frame on polar diagrams
pub const POLAR_MARGIN: f64 = 4.0;

pub const SMITH_GRID_COLOR: &str = "#dddddd";
pub const SMITH_GRID_WIDTH: f64 = 1.2;
pub const SMITH_GRID_MINOR_COLOR: &str = "#e8e8e8";
pub const SMITH_GRID_MINOR_WIDTH: f64 = 1.0;
pub const SMITH_LABEL_FONT_SIZE: f64 = 10.0;
/// Extra room around the Smith chart circle before grid lines are clipped
pub const SMITH_CLIP_PAD: f64 = 5.0;

/// Fraction of the data range added around plain diagrams
pub const PLAIN_PAD: f64 = 0.05;

pub const POINT_COLOR: &str = "#007a86";
pub const POINT_RADIUS: f64 = 4.0;
pub const POINT_FONT_SIZE: f64 = 12.0;
pub const POINT_TEXT_MARGIN: f64 = 8.0;
pub const POINT_GUIDE_WIDTH: f64 = 1.5;

pub const ERROR_BAR_CAP_RADIUS: f64 = 7.0;
pub const LINE_FILL_OPACITY: f64 = 0.5;
pub const INTEGRAL_FILL_OPACITY: f64 = 0.3;

pub const CONTOUR_FADE: [&str; 2] = ["#007a86", "#ba0c2f"];
pub const COLORBAR_WIDTH: f64 = 20.0;
pub const COLORBAR_MARGIN: f64 = 8.0;

pub const COLOR_CYCLE: [&str; 10] = [
    "#ba0c2f", "#ffc600", "#007a86", "#ed8b00", "#8a387c", "#a8aa19", "#63666a", "#c05131",
    "#d6a461", "#a7a8aa",
];

pub const TAFFY_CYCLE: [&str; 10] = [
    "#00a4bd", "#ff7a59", "#00bda5", "#f2547d", "#6a78d1", "#f5c26b", "#516f90", "#99acc2",
    "#cc3399", "#99cc00",
];

pub const PASTEL_CYCLE: [&str; 10] = [
    "#c6579a", "#ffbe9f", "#f1e6b2", "#b6cfae", "#a7e6d7", "#9adbe8", "#decde7", "#ffa1cb",
    "#9a98b5", "#7589bf",
];

pub const BOLD_CYCLE: [&str; 10] = [
    "red", "orange", "yellow", "#338833", "#00bb00", "blue", "#00eeee", "violet", "purple",
    "silver",
];
