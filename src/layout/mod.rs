//! Placement of the data area within a canvas, and of diagrams within a grid.

pub mod borders;
pub mod grid;

pub use borders::{
    BorderInputs, Borders, diagram_box, equal_aspect, graph_borders, plain_borders, quad_borders,
};
pub use grid::{GridLayout, TrackSize, parse_tracks, resolve_tracks};

/// Where the legend sits relative to the data area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LegendLoc {
    /// Outside, left of the y tick labels
    #[default]
    Left,
    /// Outside, right of the frame
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    None,
}
