//! Repeated full-coverage trials.

use crate::coverage::{Budget, CoverageLoop};
use crate::error::{CoverageError, Result};
use crate::grid::Grid;
use crate::observer::NoopObserver;
use crate::source::UniformSource;

/// Tower count of each of `trials` full-coverage runs, each on a fresh
/// `rows x cols` grid.
pub fn tower_counts<S>(
    rows: usize,
    cols: usize,
    trials: usize,
    source: &mut S,
) -> Result<Vec<usize>>
where
    S: UniformSource + ?Sized,
{
    if trials == 0 {
        return Err(CoverageError::ZeroTrials);
    }
    let mut counts = Vec::with_capacity(trials);
    for trial in 0..trials {
        let report = CoverageLoop::new(Grid::new(rows, cols)?)
            .with_observer(NoopObserver)
            .run(Budget::FullCoverage, source)?;
        log::debug!(
            "trial {}/{}: {} towers in {} iterations",
            trial + 1,
            trials,
            report.tower_count(),
            report.iterations
        );
        counts.push(report.tower_count());
    }
    Ok(counts)
}

/// Floored mean number of towers needed to cover a `rows x cols` grid.
pub fn average_towers_needed<S>(
    rows: usize,
    cols: usize,
    trials: usize,
    source: &mut S,
) -> Result<usize>
where
    S: UniformSource + ?Sized,
{
    let counts = tower_counts(rows, cols, trials, source)?;
    Ok(counts.iter().sum::<usize>() / counts.len())
}
