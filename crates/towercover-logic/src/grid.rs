//! The coverage map.
//!
//! A `Grid` is a fixed `rows x cols` array of counters stored row-major.
//! Committed grids only ever hold `0` (uncovered) or `1` (covered by exactly
//! one tower). Values above one appear only in the additive views produced by
//! [`Grid::overlay`], which are never committed.

use crate::error::{CoverageError, Result};
use crate::maxrect::Patch;
use crate::rect::{Cell, Rectangle};
use serde::{Deserialize, Serialize};

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Reject zero sides and cell counts that overflow `usize`.
    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 || self.rows.checked_mul(self.cols).is_none() {
            return Err(CoverageError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }

    pub fn area(self) -> usize {
        self.rows * self.cols
    }
}

/// 2D coverage counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    dims: Dims,
    cells: Vec<u32>,
}

impl Grid {
    /// An all-zero region of the given size.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let dims = Dims::new(rows, cols).validate()?;
        Ok(Self {
            dims,
            cells: vec![0; dims.area()],
        })
    }

    /// Build from explicit rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let dims = Dims::new(rows.len(), cols).validate()?;
        let mut cells = Vec::with_capacity(dims.area());
        for row in rows {
            if row.len() != cols {
                return Err(CoverageError::ShapeMismatch {
                    expected: dims.area(),
                    got: rows.iter().map(Vec::len).sum(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { dims, cells })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, cell: Cell) -> Option<u32> {
        if cell.row < self.dims.rows && cell.col < self.dims.cols {
            Some(self.cells[self.index(cell)])
        } else {
            None
        }
    }

    /// One row of counters.
    ///
    /// # Panics
    /// If `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[u32] {
        let start = row * self.dims.cols;
        &self.cells[start..start + self.dims.cols]
    }

    pub fn covered_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    pub fn coverage_percent(&self) -> f64 {
        percent(self.covered_cells(), self.area())
    }

    pub fn is_fully_covered(&self) -> bool {
        self.cells.iter().all(|&v| v > 0)
    }

    /// Binary mask under `rect`: `1` where the cell is still uncovered, `0`
    /// where any earlier tower already sits.
    pub fn availability_patch(&self, rect: &Rectangle) -> Result<Patch> {
        self.check_fits(rect)?;
        let mut bits = Vec::with_capacity(rect.area());
        for r in rect.origin().row..rect.row_end() {
            let row = self.row(r);
            bits.extend(
                row[rect.origin().col..rect.col_end()]
                    .iter()
                    .map(|&v| u8::from(v == 0)),
            );
        }
        Patch::new(rect.length(), rect.width(), bits)
    }

    /// Copy of the grid with `rect`'s footprint incremented by one.
    ///
    /// This is the additive "candidate laid on top" view; cells that were
    /// already covered show up as `2` or more. It is never committed.
    pub fn overlay(&self, rect: &Rectangle) -> Result<Grid> {
        self.check_fits(rect)?;
        let mut out = self.clone();
        for cell in rect.cells() {
            let idx = out.index(cell);
            out.cells[idx] = out.cells[idx].saturating_add(1);
        }
        Ok(out)
    }

    /// Mark `trimmed` as covered.
    ///
    /// Every footprint cell must be `0` beforehand; otherwise nothing is
    /// written and an [`CoverageError::InvariantViolation`] naming the first
    /// offending cell (and the value it would have reached) is returned.
    /// `candidate` is carried only for that diagnostic.
    pub fn commit(&mut self, candidate: &Rectangle, trimmed: &Rectangle) -> Result<()> {
        self.check_fits(trimmed)?;
        if let Some(cell) = trimmed.cells().find(|&c| self.cells[self.index(c)] != 0) {
            return Err(CoverageError::InvariantViolation {
                candidate: *candidate,
                trimmed: *trimmed,
                row: cell.row,
                col: cell.col,
                value: self.cells[self.index(cell)].saturating_add(1),
            });
        }
        for r in trimmed.origin().row..trimmed.row_end() {
            let start = self.index(Cell::new(r, trimmed.origin().col));
            self.cells[start..start + trimmed.width()].fill(1);
        }
        Ok(())
    }

    /// First cell (row-major) whose counter exceeds one.
    pub fn first_overlap(&self) -> Option<(Cell, u32)> {
        self.cells
            .iter()
            .position(|&v| v > 1)
            .map(|i| (self.cell_at(i), self.cells[i]))
    }

    /// All cells whose counter exceeds one.
    pub fn overlaps(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 1)
            .map(|(i, _)| self.cell_at(i))
            .collect()
    }

    fn check_fits(&self, rect: &Rectangle) -> Result<()> {
        if rect.fits(self.dims.rows, self.dims.cols) {
            Ok(())
        } else {
            Err(CoverageError::OutOfBounds {
                rect: *rect,
                rows: self.dims.rows,
                cols: self.dims.cols,
            })
        }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.dims.cols + cell.col
    }

    fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.dims.cols, index % self.dims.cols)
    }
}

/// `part / whole * 100`, or `0.0` for an empty whole.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(row: usize, col: usize, length: usize, width: usize) -> Rectangle {
        Rectangle::new(Cell::new(row, col), length, width).unwrap()
    }

    #[test]
    fn test_new_is_all_zero() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.dims(), Dims::new(3, 4));
        assert_eq!(g.area(), 12);
        assert_eq!(g.covered_cells(), 0);
        assert!(!g.is_fully_covered());
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(CoverageError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(Grid::new(4, 0).is_err());
        assert!(Grid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            CoverageError::ShapeMismatch {
                expected: 4,
                got: 3
            }
        );
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_commit_sets_footprint_to_one() {
        let mut g = Grid::new(3, 4).unwrap();
        let r = rect(1, 1, 2, 2);
        g.commit(&r, &r).unwrap();
        assert_eq!(g.row(0), &[0, 0, 0, 0]);
        assert_eq!(g.row(1), &[0, 1, 1, 0]);
        assert_eq!(g.row(2), &[0, 1, 1, 0]);
        assert_eq!(g.covered_cells(), 4);
        assert!(g.first_overlap().is_none());
    }

    #[test]
    fn test_commit_over_coverage_is_rejected_untouched() {
        let mut g = Grid::new(3, 3).unwrap();
        let first = rect(0, 0, 2, 2);
        g.commit(&first, &first).unwrap();
        let before = g.clone();

        let candidate = rect(1, 1, 2, 2);
        let err = g.commit(&candidate, &candidate).unwrap_err();
        assert_eq!(
            err,
            CoverageError::InvariantViolation {
                candidate,
                trimmed: candidate,
                row: 1,
                col: 1,
                value: 2,
            }
        );
        assert_eq!(g, before);
    }

    #[test]
    fn test_commit_out_of_bounds() {
        let mut g = Grid::new(2, 2).unwrap();
        let r = rect(1, 1, 2, 1);
        assert!(matches!(
            g.commit(&r, &r),
            Err(CoverageError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_overlay_is_additive_and_leaves_original() {
        let mut g = Grid::new(2, 3).unwrap();
        let first = rect(0, 0, 1, 2);
        g.commit(&first, &first).unwrap();

        let view = g.overlay(&rect(0, 1, 2, 2)).unwrap();
        assert_eq!(view.row(0), &[1, 2, 1]);
        assert_eq!(view.row(1), &[0, 1, 1]);
        assert_eq!(view.first_overlap(), Some((Cell::new(0, 1), 2)));
        assert_eq!(view.overlaps(), vec![Cell::new(0, 1)]);
        assert_eq!(g.row(0), &[1, 1, 0]);
    }

    #[test]
    fn test_availability_patch_marks_zero_cells() {
        let g = Grid::from_rows(&[vec![1, 0, 0], vec![0, 0, 1], vec![0, 1, 1]]).unwrap();
        let patch = g.availability_patch(&rect(0, 0, 3, 3)).unwrap();
        assert_eq!(patch.row(0), &[0, 1, 1]);
        assert_eq!(patch.row(1), &[1, 1, 0]);
        assert_eq!(patch.row(2), &[1, 0, 0]);

        let sub = g.availability_patch(&rect(1, 0, 1, 2)).unwrap();
        assert_eq!(sub.height(), 1);
        assert_eq!(sub.row(0), &[1, 1]);
    }

    #[test]
    fn test_coverage_percent() {
        let mut g = Grid::new(2, 2).unwrap();
        let r = rect(0, 0, 1, 2);
        g.commit(&r, &r).unwrap();
        assert!((g.coverage_percent() - 50.0).abs() < 1e-9);
        let r = rect(1, 0, 1, 2);
        g.commit(&r, &r).unwrap();
        assert!(g.is_fully_covered());
        assert!((g.coverage_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_get_bounds() {
        let g = Grid::new(2, 2).unwrap();
        assert_eq!(g.get(Cell::new(1, 1)), Some(0));
        assert_eq!(g.get(Cell::new(2, 0)), None);
    }
}
