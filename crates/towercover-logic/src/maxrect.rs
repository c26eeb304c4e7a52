//! Largest all-ones rectangle in a binary patch.
//!
//! Two passes fused into one sweep over the rows:
//!
//! 1. **Column heights.** `heights[j]` counts the consecutive ones ending at
//!    the current row in column `j` (reset to zero on a `0` cell). Only the
//!    current row of the height matrix is kept, so auxiliary space is `O(w)`.
//! 2. **Histogram scan.** Each row of heights is treated as a histogram and
//!    flushed through a monotonic stack of column indices; index `w` acts as
//!    a zero-height sentinel and is never pushed.
//!
//! Total work is `O(h * w)`. The first rectangle of maximal area met in
//! scan order (bottom row ascending, then stack pop order) is kept; later
//! rectangles of equal area do not replace it.
//!
//! ```
//! use towercover_logic::maxrect::{find_maximal_rectangle, Patch};
//!
//! let patch = Patch::from_rows(&[vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]]).unwrap();
//! let found = find_maximal_rectangle(&patch, 0, 0);
//! assert_eq!(found.area, 4);
//! let rect = found.rectangle.unwrap();
//! assert_eq!((rect.origin().row, rect.origin().col), (0, 0));
//! assert_eq!((rect.length(), rect.width()), (2, 2));
//! ```

use crate::error::{CoverageError, Result};
use crate::rect::{Cell, Rectangle};
use serde::Serialize;

/// Binary availability mask (`1` = free, `0` = taken), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    height: usize,
    width: usize,
    bits: Vec<u8>,
}

impl Patch {
    /// Wrap row-major bits. Length must be `height * width` and every value
    /// must be `0` or `1`.
    pub fn new(height: usize, width: usize, bits: Vec<u8>) -> Result<Self> {
        let expected = height
            .checked_mul(width)
            .ok_or(CoverageError::InvalidDimensions {
                rows: height,
                cols: width,
            })?;
        if bits.len() != expected {
            return Err(CoverageError::ShapeMismatch {
                expected,
                got: bits.len(),
            });
        }
        if let Some(i) = bits.iter().position(|&b| b > 1) {
            return Err(CoverageError::NonBinaryPatch {
                row: i / width,
                col: i % width,
                value: bits[i],
            });
        }
        Ok(Self {
            height,
            width,
            bits,
        })
    }

    /// Build from explicit rows of equal length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        let bits: Vec<u8> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|r| r.len() != width) {
            return Err(CoverageError::ShapeMismatch {
                expected: rows.len() * width,
                got: bits.len(),
            });
        }
        Self::new(rows.len(), width, bits)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.bits[row * self.width..(row + 1) * self.width]
    }

    /// True when no cell is free.
    pub fn is_blocked(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }
}

/// Result of a maximal-rectangle search or a trim.
///
/// `area == 0` means "no usable space" and always comes with
/// `rectangle == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaximalRectangle {
    pub area: usize,
    pub rectangle: Option<Rectangle>,
}

impl MaximalRectangle {
    pub const NONE: MaximalRectangle = MaximalRectangle {
        area: 0,
        rectangle: None,
    };

    pub fn is_empty(&self) -> bool {
        self.area == 0
    }
}

/// Best span seen so far, in patch coordinates.
#[derive(Debug, Default, Clone, Copy)]
struct Span {
    area: usize,
    top: usize,
    left: usize,
    length: usize,
    width: usize,
}

/// Find the largest all-ones rectangle in `patch`.
///
/// The returned rectangle's origin is translated by `(row_offset, col_offset)`
/// so callers working on a sub-region get grid coordinates back directly.
pub fn find_maximal_rectangle(
    patch: &Patch,
    row_offset: usize,
    col_offset: usize,
) -> MaximalRectangle {
    let mut heights = vec![0usize; patch.width()];
    let mut stack = Vec::with_capacity(patch.width());
    let mut best = Span::default();

    for i in 0..patch.height() {
        for (h, &bit) in heights.iter_mut().zip(patch.row(i)) {
            *h = if bit == 1 { *h + 1 } else { 0 };
        }
        scan_histogram(&heights, i, &mut stack, &mut best);
    }

    if best.area == 0 {
        return MaximalRectangle::NONE;
    }
    let origin = Cell::new(row_offset + best.top, col_offset + best.left);
    MaximalRectangle {
        area: best.area,
        // length and width are >= 1 whenever area > 0
        rectangle: Rectangle::new(origin, best.length, best.width).ok(),
    }
}

/// Flush one histogram row through the monotonic stack, updating `best` only
/// on a strictly larger area.
fn scan_histogram(heights: &[usize], base_row: usize, stack: &mut Vec<usize>, best: &mut Span) {
    stack.clear();
    for j in 0..=heights.len() {
        let current = heights.get(j).copied().unwrap_or(0);
        while let Some(&top) = stack.last() {
            if heights[top] < current {
                break;
            }
            stack.pop();
            let height = heights[top];
            let width = match stack.last() {
                Some(&prev) => j - prev - 1,
                None => j,
            };
            let area = height * width;
            if area > best.area {
                *best = Span {
                    area,
                    top: base_row + 1 - height,
                    left: j - width,
                    length: height,
                    width,
                };
            }
        }
        if j < heights.len() {
            stack.push(j);
        }
    }
}
