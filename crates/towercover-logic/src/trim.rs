//! Cut a candidate down to the largest sub-rectangle of still-free cells.
//!
//! A cell is free iff its grid counter is `0` *before* the candidate is
//! considered. The mask is built from that pre-overlay state directly, so
//! there is no dependence on how many times a cell was previously covered.

use crate::error::Result;
use crate::grid::Grid;
use crate::maxrect::{find_maximal_rectangle, MaximalRectangle};
use crate::rect::Rectangle;

/// Largest free sub-rectangle under `candidate`, in grid coordinates.
///
/// Does not touch `grid`. A zero-area result means the candidate landed
/// entirely on covered cells. `candidate` must fit inside `grid`.
pub fn trim(grid: &Grid, candidate: &Rectangle) -> Result<MaximalRectangle> {
    let patch = grid.availability_patch(candidate)?;
    let origin = candidate.origin();
    Ok(find_maximal_rectangle(&patch, origin.row, origin.col))
}

/// Grid-sized map holding `1` on the trimmed footprint and `0` elsewhere.
pub fn trimmed_coverage(grid: &Grid, candidate: &Rectangle) -> Result<Grid> {
    let trimmed = trim(grid, candidate)?;
    let mut map = Grid::new(grid.rows(), grid.cols())?;
    if let Some(rect) = trimmed.rectangle {
        map.commit(candidate, &rect)?;
    }
    Ok(map)
}
