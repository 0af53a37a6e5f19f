//! Maps a linear run of characters onto rows and pages of a grid.
//!
//! Pagination only ever looks at how many characters there are, never at what
//! they are, so it can be computed (and tested) without any rendering attached.
//!
//! # Example
//!
//! ```
//! use tiange::{paginate, GridSpec};
//!
//! let grid = GridSpec::new(10, 10).unwrap();
//! let rows: Vec<_> = paginate(105, grid).collect();
//!
//! // ten full rows fill the first page, the last five characters start the second
//! assert_eq!(rows.len(), 11);
//! assert_eq!((rows[10].page, rows[10].row, rows[10].len()), (1, 0, 5));
//! ```

use crate::grid::GridSpec;
use std::ops::Range;

/// Where one row's worth of characters goes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlacementRecord {
    /// 0-based page the row is on
    pub page: usize,
    /// 0-based row within the page, always less than the grid's row count
    pub row: usize,
    /// Offset of the first character of the row within the stream
    pub start: usize,
    /// Offset one past the last character of the row
    pub end: usize,
}

impl PlacementRecord {
    /// The range of the character stream this row covers
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// How many cells of the row are filled
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this row is the bottom row of its page
    pub fn closes_page(&self, grid: &GridSpec) -> bool {
        (self.row + 1) % grid.rows() == 0
    }
}

/// Iterator over the rows of a paginated stream, see [paginate]
#[derive(Debug, Clone)]
pub struct Placements {
    grid: GridSpec,
    total: usize,
    /// index of the next row to emit, counting across pages
    next_row: usize,
    row_count: usize,
}

impl Iterator for Placements {
    type Item = PlacementRecord;

    fn next(&mut self) -> Option<PlacementRecord> {
        if self.next_row >= self.row_count {
            return None;
        }

        let i = self.next_row;
        self.next_row += 1;

        let columns = self.grid.columns();
        let start = i * columns;
        Some(PlacementRecord {
            page: i / self.grid.rows(),
            row: i % self.grid.rows(),
            start,
            end: (start + columns).min(self.total),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.row_count - self.next_row;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Placements {}

impl std::iter::FusedIterator for Placements {}

/// Splits `total` characters into rows of `grid.columns()` cells and pages of
/// `grid.rows()` rows.
///
/// Every full row is emitted in order; a trailing partial row follows only when
/// `total` is not a multiple of the column count, so no record is ever empty and
/// an empty stream yields nothing. Each call returns a fresh iterator.
pub fn paginate(total: usize, grid: GridSpec) -> Placements {
    let (full_rows, remainder) = (total / grid.columns(), total % grid.columns());
    Placements {
        grid,
        total,
        next_row: 0,
        row_count: full_rows + usize::from(remainder > 0),
    }
}

/// The number of pages a stream of `total` characters fills. A sheet is always
/// produced, so this is never 0.
pub fn page_count(total: usize, grid: GridSpec) -> usize {
    total.div_ceil(grid.cells()).max(1)
}
