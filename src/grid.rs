//! Tián grid geometry.
//!
//! A sheet is `columns` cells wide and `rows` cells tall, surrounded by a margin
//! one cell wide. Every cell is split into quadrants by a dashed cross, so grid
//! lines fall on every half cell: even lines are the solid cell borders, odd lines
//! the dashed guides.

use crate::colour::{colours, Colour};
use crate::rect::Rect;
use crate::units::*;
use crate::TiangeError;

/// The number of cells on a sheet
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridSpec {
    columns: usize,
    rows: usize,
}

/// The most cells a grid may have along either side
pub const MAX_CELLS_PER_SIDE: usize = 10_000;

impl GridSpec {
    /// Create a grid of `columns` cells per row and `rows` rows per page. Both must
    /// be between 1 and [MAX_CELLS_PER_SIDE]. Takes signed values so that nonsense
    /// coming in from user input is reported rather than wrapped; values that do
    /// not even fit an `i128` are reported as `i128::MAX`.
    pub fn new<C, R>(columns: C, rows: R) -> Result<GridSpec, TiangeError>
    where
        C: TryInto<i128>,
        R: TryInto<i128>,
    {
        let columns: i128 = columns.try_into().unwrap_or(i128::MAX);
        let rows: i128 = rows.try_into().unwrap_or(i128::MAX);
        let side = 1..=MAX_CELLS_PER_SIDE as i128;
        if !side.contains(&columns) || !side.contains(&rows) {
            return Err(TiangeError::InvalidGridSpec { columns, rows });
        }

        Ok(GridSpec {
            columns: columns as usize,
            rows: rows as usize,
        })
    }

    /// Cells per row
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows per page
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cells per page
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec {
            columns: 10,
            rows: 10,
        }
    }
}

/// How a grid line is stroked
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineStyle {
    Solid,
    /// Alternating on / off runs of the given length
    Dashed(Pt),
}

/// A single straight grid line
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub style: LineStyle,
    pub colour: Colour,
}

/// Visual parameters of a sheet. Line widths are fractions of the cell size, so
/// the grid keeps its proportions at any scale.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    /// Side length of one square cell
    pub cell_size: Pt,
    /// Font size glyphs are drawn at
    pub font_size: Pt,
    /// Colour of the grid lines
    pub grid_colour: Colour,
    /// Colour of the glyphs
    pub ink_colour: Colour,
    /// Paper colour
    pub background: Colour,
    /// Width of the vertical cell borders, relative to the cell size
    pub column_border: f32,
    /// Width of the horizontal cell borders, relative to the cell size
    pub row_border: f32,
    /// Width of the dashed cross guides, relative to the cell size
    pub guide: f32,
    /// Length of one dash, relative to the cell size
    pub dash: f32,
}

impl GridStyle {
    /// A style with the default proportions for the given cell size; glyphs take up
    /// five sixths of their cell
    pub fn with_cell_size<P: Into<Pt>>(cell_size: P) -> GridStyle {
        let cell_size: Pt = cell_size.into();
        GridStyle {
            cell_size,
            font_size: cell_size * (100.0 / 120.0),
            grid_colour: colours::RED,
            ink_colour: colours::BLACK,
            background: colours::WHITE,
            column_border: 4.0 / 120.0,
            row_border: 2.0 / 120.0,
            guide: 1.0 / 120.0,
            dash: 4.0 / 120.0,
        }
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        GridStyle::with_cell_size(Mm(15.0))
    }
}

/// The size of a whole sheet, margins included
pub fn sheet_size(grid: &GridSpec, style: &GridStyle) -> (Pt, Pt) {
    (
        style.cell_size * (grid.columns + 2) as f32,
        style.cell_size * (grid.rows + 2) as f32,
    )
}

/// The square occupied by cell (`row`, `column`), rows counted from the top
pub fn cell_rect(grid: &GridSpec, style: &GridStyle, row: usize, column: usize) -> Rect {
    let cell = style.cell_size;
    let x1 = cell * (column + 1) as f32;
    let y2 = cell * (grid.rows + 1 - row) as f32;
    Rect {
        x1,
        y1: y2 - cell,
        x2: x1 + cell,
        y2,
    }
}

/// Every line of the tián grid, vertical lines first, left to right, then
/// horizontal lines top to bottom
pub fn grid_strokes(grid: &GridSpec, style: &GridStyle) -> Vec<Stroke> {
    let cell = style.cell_size;
    let half = cell * 0.5;
    let guide = LineStyle::Dashed(cell * style.dash);

    let left = cell;
    let right = cell * (grid.columns + 1) as f32;
    let top = cell * (grid.rows + 1) as f32;
    let bottom = cell;

    let mut strokes = Vec::with_capacity(2 * (grid.columns + grid.rows) + 2);

    for i in 0..=2 * grid.columns {
        let x = left + half * i as f32;
        let (width, line) = if i % 2 == 0 {
            (cell * style.column_border, LineStyle::Solid)
        } else {
            (cell * style.guide, guide)
        };
        strokes.push(Stroke {
            from: (x, top),
            to: (x, bottom),
            width,
            style: line,
            colour: style.grid_colour,
        });
    }

    for i in 0..=2 * grid.rows {
        let y = top - half * i as f32;
        let (width, line) = if i % 2 == 0 {
            (cell * style.row_border, LineStyle::Solid)
        } else {
            (cell * style.guide, guide)
        };
        strokes.push(Stroke {
            from: (left, y),
            to: (right, y),
            width,
            style: line,
            colour: style.grid_colour,
        });
    }

    strokes
}
