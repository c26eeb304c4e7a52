//! Random tower proposals.

use crate::error::Result;
use crate::grid::Dims;
use crate::rect::{Cell, Rectangle};
use crate::source::UniformSource;

/// Propose a random tower that fits inside `dims`.
///
/// The origin is uniform over all cells; length and width are then uniform
/// over `[1, rows - row]` and `[1, cols - col]`, so the footprint never
/// leaves the grid. Zero-sized dimensions are rejected before any sampling.
pub fn generate_candidate<S>(dims: Dims, source: &mut S) -> Result<Rectangle>
where
    S: UniformSource + ?Sized,
{
    let Dims { rows, cols } = dims.validate()?;
    let row = source.sample_inclusive(0, rows - 1);
    let col = source.sample_inclusive(0, cols - 1);
    let length = source.sample_inclusive(1, rows - row);
    let width = source.sample_inclusive(1, cols - col);
    Rectangle::fitted(Cell::new(row, col), length, width, rows, cols)
}
