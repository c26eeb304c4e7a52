//! Tower footprints: an origin cell plus a length (rows) and width (columns).
//!
//! The same value type carries freshly generated candidates and trimmed
//! results. Fields are private so a `Rectangle` always has sides of at least
//! one cell and a far edge representable as `usize`; fitting against a
//! particular grid is checked by
//! [`Rectangle::fitted`] or [`Rectangle::fits`].

use crate::error::{CoverageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Axis-aligned rectangle of cells.
///
/// Serialize-only: deserializing would bypass the side-length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    origin: Cell,
    length: usize,
    width: usize,
}

impl Rectangle {
    /// Build a rectangle with no bounds attached. Both sides must be `>= 1`
    /// and `origin + (length, width)` must not overflow.
    pub fn new(origin: Cell, length: usize, width: usize) -> Result<Self> {
        if length == 0 || width == 0 {
            return Err(CoverageError::EmptyRectangle { length, width });
        }
        if origin.row.checked_add(length).is_none() || origin.col.checked_add(width).is_none() {
            return Err(CoverageError::ExtentOverflow {
                row: origin.row,
                col: origin.col,
                length,
                width,
            });
        }
        Ok(Self {
            origin,
            length,
            width,
        })
    }

    /// Build a rectangle and check it lies entirely inside a `rows x cols` grid.
    pub fn fitted(
        origin: Cell,
        length: usize,
        width: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        let rect = Self::new(origin, length, width)?;
        if !rect.fits(rows, cols) {
            return Err(CoverageError::OutOfBounds { rect, rows, cols });
        }
        Ok(rect)
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Number of rows spanned.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of columns spanned.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn area(&self) -> usize {
        self.length * self.width
    }

    /// One past the last row.
    pub fn row_end(&self) -> usize {
        self.origin.row + self.length
    }

    /// One past the last column.
    pub fn col_end(&self) -> usize {
        self.origin.col + self.width
    }

    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.row_end() <= rows && self.col_end() <= cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.origin.row..self.row_end()).contains(&cell.row)
            && (self.origin.col..self.col_end()).contains(&cell.col)
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.origin.row < other.row_end()
            && other.origin.row < self.row_end()
            && self.origin.col < other.col_end()
            && other.origin.col < self.col_end()
    }

    /// Every cell of the footprint in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.origin.row..self.row_end())
            .flat_map(move |r| (self.origin.col..self.col_end()).map(move |c| Cell::new(r, c)))
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.length, self.width, self.origin.row, self.origin.col
        )
    }
}
