//! Several diagrams on one canvas, arranged in rows and columns.
//!
//! Track sizes follow CSS grid notation: `100px` (or a bare `100`) is fixed, `25%` is a
//! share of the space left after gaps, and `1fr` splits whatever remains by weight.

use crate::diagram::Diagram;
use crate::errors::{ConfigError, RenderError};
use crate::log::debug;
use crate::render::{Drawing, TextMetrics};
use crate::types::{Size, ViewBox};

use super::Borders;

/// Size of one grid column or row
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackSize {
    Px(f64),
    Percent(f64),
    Fr(f64),
}

impl TrackSize {
    fn parse(token: &str, spec: &str) -> Result<TrackSize, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidGridSpec {
            spec: spec.to_string(),
            reason: format!("`{token}`: {reason}"),
        };
        let (number, make): (&str, fn(f64) -> TrackSize) = if let Some(n) = token.strip_suffix("fr") {
            (n, TrackSize::Fr)
        } else if let Some(n) = token.strip_suffix('%') {
            (n, TrackSize::Percent)
        } else if let Some(n) = token.strip_suffix("px") {
            (n, TrackSize::Px)
        } else {
            (token, TrackSize::Px)
        };
        let value: f64 = number
            .parse()
            .map_err(|_| invalid("expected a number with an optional fr, % or px unit"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid("size must be a non-negative number"));
        }
        Ok(make(value))
    }
}

/// Parse a whitespace separated track list such as `"1fr 2fr 100px"`
pub fn parse_tracks(spec: &str) -> Result<Vec<TrackSize>, ConfigError> {
    let tracks = spec
        .split_whitespace()
        .map(|token| TrackSize::parse(token, spec))
        .collect::<Result<Vec<_>, _>>()?;
    if tracks.is_empty() {
        return Err(ConfigError::InvalidGridSpec {
            spec: spec.to_string(),
            reason: "no tracks given".to_string(),
        });
    }
    Ok(tracks)
}

/// Device size of each track when `total` is shared between them with `gap` between
/// neighbours
pub fn resolve_tracks(tracks: &[TrackSize], total: f64, gap: f64) -> Vec<f64> {
    let available = total - gap * tracks.len().saturating_sub(1) as f64;
    let fixed: f64 = tracks
        .iter()
        .map(|t| match t {
            TrackSize::Px(px) => *px,
            TrackSize::Percent(pct) => available * pct / 100.0,
            TrackSize::Fr(_) => 0.0,
        })
        .sum();
    let weights: f64 = tracks
        .iter()
        .map(|t| match t {
            TrackSize::Fr(w) => *w,
            _ => 0.0,
        })
        .sum();
    let remainder = (available - fixed).max(0.0);

    let sizes: Vec<f64> = tracks
        .iter()
        .map(|t| match t {
            TrackSize::Px(px) => *px,
            TrackSize::Percent(pct) => available * pct / 100.0,
            TrackSize::Fr(w) if weights > 0.0 => remainder * w / weights,
            TrackSize::Fr(_) => 0.0,
        })
        .collect();
    debug!(total, gap, remainder, tracks = sizes.len(), "resolved grid tracks");
    sizes
}

/// A diagram placed in the grid
#[derive(Debug)]
struct Cell {
    diagram: Diagram,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

impl Cell {
    fn covers(&self, row: usize, column: usize) -> bool {
        (self.row..self.row + self.row_span).contains(&row)
            && (self.column..self.column + self.column_span).contains(&column)
    }
}

/// Diagrams laid out on a grid of tracks
#[derive(Debug)]
pub struct GridLayout {
    columns: Vec<TrackSize>,
    rows: Vec<TrackSize>,
    gap: f64,
    size: Size,
    cells: Vec<Cell>,
}

impl GridLayout {
    /// Empty grid with the given column and row track lists
    pub fn new(columns: &str, rows: &str) -> Result<Self, ConfigError> {
        Ok(GridLayout {
            columns: parse_tracks(columns)?,
            rows: parse_tracks(rows)?,
            gap: 0.0,
            size: Size::new(
                crate::render::defaults::CANVAS_WIDTH,
                crate::render::defaults::CANVAS_HEIGHT,
            ),
            cells: Vec::new(),
        })
    }

    /// Equal-width diagrams side by side
    pub fn row(diagrams: impl IntoIterator<Item = Diagram>) -> Self {
        let diagrams: Vec<Diagram> = diagrams.into_iter().collect();
        let mut grid = GridLayout::with_tracks(vec![TrackSize::Fr(1.0); diagrams.len().max(1)], vec![TrackSize::Fr(1.0)]);
        for diagram in diagrams {
            grid.add(diagram);
        }
        grid
    }

    /// Equal-height diagrams stacked top to bottom
    pub fn column(diagrams: impl IntoIterator<Item = Diagram>) -> Self {
        let diagrams: Vec<Diagram> = diagrams.into_iter().collect();
        let mut grid = GridLayout::with_tracks(vec![TrackSize::Fr(1.0)], vec![TrackSize::Fr(1.0); diagrams.len().max(1)]);
        for diagram in diagrams {
            grid.add(diagram);
        }
        grid
    }

    fn with_tracks(columns: Vec<TrackSize>, rows: Vec<TrackSize>) -> Self {
        GridLayout {
            columns,
            rows,
            gap: 0.0,
            size: Size::new(
                crate::render::defaults::CANVAS_WIDTH,
                crate::render::defaults::CANVAS_HEIGHT,
            ),
            cells: Vec::new(),
        }
    }

    pub fn gap(&mut self, gap: f64) -> &mut Self {
        self.gap = gap.max(0.0);
        self
    }

    pub fn size(&mut self, width: f64, height: f64) -> Result<&mut Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        self.size = Size::new(width, height);
        Ok(self)
    }

    pub fn canvas_size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Place `diagram` in the first free cell, scanning row by row.
    ///
    /// A full grid grows by one `1fr` row.
    pub fn add(&mut self, diagram: Diagram) -> &mut Self {
        let ncols = self.columns.len();
        let slot = (0..)
            .map(|i| (i / ncols, i % ncols))
            .find(|&(row, column)| !self.cells.iter().any(|c| c.covers(row, column)))
            .unwrap_or((self.rows.len(), 0));
        while slot.0 >= self.rows.len() {
            self.rows.push(TrackSize::Fr(1.0));
        }
        self.cells.push(Cell {
            diagram,
            row: slot.0,
            column: slot.1,
            row_span: 1,
            column_span: 1,
        });
        self
    }

    /// Place `diagram` at an explicit cell spanning `row_span` rows and `column_span`
    /// columns
    pub fn add_at(
        &mut self,
        diagram: Diagram,
        row: usize,
        column: usize,
        row_span: usize,
        column_span: usize,
    ) -> Result<&mut Self, ConfigError> {
        let row_span = row_span.max(1);
        let column_span = column_span.max(1);
        if row + row_span > self.rows.len() || column + column_span > self.columns.len() {
            return Err(ConfigError::GridCellOutOfBounds { row, column });
        }
        self.cells.push(Cell {
            diagram,
            row,
            column,
            row_span,
            column_span,
        });
        Ok(self)
    }

    /// Device viewbox of every placed diagram, in insertion order (y up)
    pub fn cell_boxes(&self) -> Vec<ViewBox> {
        let widths = resolve_tracks(&self.columns, self.size.width, self.gap);
        let heights = resolve_tracks(&self.rows, self.size.height, self.gap);
        let offset = |sizes: &[f64], start: usize| -> f64 {
            sizes[..start].iter().sum::<f64>() + self.gap * start as f64
        };
        let extent = |sizes: &[f64], start: usize, span: usize| -> f64 {
            sizes[start..start + span].iter().sum::<f64>() + self.gap * (span - 1) as f64
        };

        self.cells
            .iter()
            .map(|cell| {
                let w = extent(&widths, cell.column, cell.column_span);
                let h = extent(&heights, cell.row, cell.row_span);
                let top = offset(&heights, cell.row);
                ViewBox::new(
                    offset(&widths, cell.column),
                    self.size.height - top - h,
                    w,
                    h,
                )
            })
            .collect()
    }

    /// Borders of each cell after aligning box-framed neighbours: left and right take
    /// the maximum within a column, top and bottom the maximum within a row
    pub fn harmonized_borders<M: TextMetrics + ?Sized>(&self, metrics: &M) -> Vec<Option<Borders>> {
        let own: Vec<Option<Borders>> = self
            .cells
            .iter()
            .map(|c| c.diagram.is_box_framed().then(|| c.diagram.borders(metrics)))
            .collect();

        let mut columns = vec![(0.0f64, 0.0f64); self.columns.len()];
        let mut rows = vec![(0.0f64, 0.0f64); self.rows.len()];
        for (cell, borders) in self.cells.iter().zip(&own) {
            let Some(b) = borders else { continue };
            let col = &mut columns[cell.column];
            *col = (col.0.max(b.left), col.1.max(b.right));
            let row = &mut rows[cell.row];
            *row = (row.0.max(b.top), row.1.max(b.bottom));
        }

        self.cells
            .iter()
            .zip(own)
            .map(|(cell, borders)| {
                borders.map(|_| Borders {
                    left: columns[cell.column].0,
                    right: columns[cell.column].1,
                    top: rows[cell.row].0,
                    bottom: rows[cell.row].1,
                })
            })
            .collect()
    }

    /// Draw every diagram into its cell
    pub fn render(&self, drawing: &mut dyn Drawing) -> Result<(), RenderError> {
        let boxes = self.cell_boxes();
        let borders = self.harmonized_borders(&*drawing);
        for ((cell, vb), borders) in self.cells.iter().zip(boxes).zip(borders) {
            debug!(row = cell.row, column = cell.column, %vb, "rendering grid cell");
            cell.diagram.render_with_borders(drawing, vb, borders)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Track tests ====================

    #[test]
    fn parse_track_units() {
        assert_eq!(
            parse_tracks("1fr 2fr 100px 25% 50").unwrap(),
            vec![
                TrackSize::Fr(1.0),
                TrackSize::Fr(2.0),
                TrackSize::Px(100.0),
                TrackSize::Percent(25.0),
                TrackSize::Px(50.0),
            ]
        );
    }

    #[test]
    fn bad_track_specs() {
        for spec in ["", "   ", "1fr abc", "-3px", "2em", "fr"] {
            assert!(
                matches!(parse_tracks(spec), Err(ConfigError::InvalidGridSpec { .. })),
                "{spec:?}"
            );
        }
    }

    #[test]
    fn resolve_fixed_then_fractions() {
        let tracks = parse_tracks("100px 1fr 3fr").unwrap();
        assert_eq!(resolve_tracks(&tracks, 500.0, 0.0), vec![100.0, 100.0, 300.0]);

        let tracks = parse_tracks("50% 1fr").unwrap();
        assert_eq!(resolve_tracks(&tracks, 410.0, 10.0), vec![200.0, 200.0]);
    }

    #[test]
    fn fractions_clamp_at_zero() {
        let tracks = parse_tracks("400px 1fr").unwrap();
        assert_eq!(resolve_tracks(&tracks, 300.0, 0.0), vec![400.0, 0.0]);
    }

    // ==================== Placement tests ====================

    #[test]
    fn add_fills_row_major_and_grows() {
        let mut grid = GridLayout::new("1fr 1fr", "1fr").unwrap();
        grid.size(400.0, 200.0).unwrap();
        grid.add(Diagram::graph()).add(Diagram::graph()).add(Diagram::graph());
        assert_eq!(grid.len(), 3);
        let boxes = grid.cell_boxes();
        assert_eq!(boxes[0], ViewBox::new(0.0, 100.0, 200.0, 100.0));
        assert_eq!(boxes[1], ViewBox::new(200.0, 100.0, 200.0, 100.0));
        assert_eq!(boxes[2], ViewBox::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn add_at_spans_and_bounds() {
        let mut grid = GridLayout::new("1fr 1fr", "1fr 1fr").unwrap();
        grid.size(400.0, 400.0).unwrap().gap(10.0);
        grid.add_at(Diagram::graph(), 0, 0, 2, 1).unwrap();
        grid.add(Diagram::graph());
        assert_eq!(grid.cell_boxes()[0], ViewBox::new(0.0, 0.0, 195.0, 400.0));
        assert_eq!(grid.cell_boxes()[1], ViewBox::new(205.0, 205.0, 195.0, 195.0));

        let err = grid.add_at(Diagram::graph(), 1, 1, 1, 2).unwrap_err();
        assert_eq!(err, ConfigError::GridCellOutOfBounds { row: 1, column: 1 });
    }

    #[test]
    fn row_and_column_constructors() {
        let row = GridLayout::row([Diagram::graph(), Diagram::graph(), Diagram::graph()]);
        assert_eq!(row.cell_boxes().len(), 3);
        assert_eq!(row.cell_boxes()[2].x, 400.0);
        let column = GridLayout::column([Diagram::graph(), Diagram::graph()]);
        assert_eq!(column.cell_boxes()[0].y, 200.0);
    }
}
