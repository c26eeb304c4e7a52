//! Greedy randomized placement loop.
//!
//! Each iteration proposes a candidate, trims it against the live grid and
//! commits the trimmed rectangle when it is non-empty. Zero-area trims are
//! counted and retried; they are the normal outcome once most of the grid is
//! covered.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use towercover_logic::coverage::{run_full_coverage, Termination};
//! use towercover_logic::grid::Grid;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = run_full_coverage(Grid::new(3, 4).unwrap(), &mut rng, None).unwrap();
//! assert_eq!(report.termination, Termination::FullCoverage);
//! assert_eq!(report.area, 12);
//! ```

use crate::candidate::generate_candidate;
use crate::config::SimulationConfig;
use crate::error::{CoverageError, Result};
use crate::grid::Grid;
use crate::observer::{CoverageObserver, LogObserver};
use crate::rect::Rectangle;
use crate::source::UniformSource;
use crate::trim::trim;
use serde::Serialize;

/// When a run should stop placing towers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Keep going until every cell is covered.
    FullCoverage,
    /// Stop after this many committed towers, or at full coverage if sooner.
    Towers(usize),
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    FullCoverage,
    BudgetExhausted,
    /// The iteration safeguard fired before the budget was met.
    IterationCap,
}

/// Loop tuning knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum loop iterations, discarded candidates included.
    pub iteration_cap: Option<u64>,
}

impl From<&SimulationConfig> for RunOptions {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            iteration_cap: config.iteration_cap,
        }
    }
}

/// Everything a finished run hands back.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Cells covered by the towers committed in this run.
    pub area: usize,
    pub grid: Grid,
    /// Share of the grid covered at the end, `0.0..=100.0`.
    pub percent_covered: f64,
    /// Trimmed towers in commit order.
    pub towers: Vec<Rectangle>,
    pub iterations: u64,
    /// Candidates whose trim came back empty.
    pub discarded: u64,
    pub termination: Termination,
}

impl CoverageReport {
    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    /// False only when the iteration cap stopped the run.
    pub fn converged(&self) -> bool {
        self.termination != Termination::IterationCap
    }
}

/// A configured run over one grid.
pub struct CoverageLoop<O = LogObserver> {
    grid: Grid,
    options: RunOptions,
    observer: O,
}

impl CoverageLoop<LogObserver> {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            options: RunOptions::default(),
            observer: LogObserver,
        }
    }
}

impl<O: CoverageObserver> CoverageLoop<O> {
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the observer. Pass `&mut obs` to keep ownership of it.
    pub fn with_observer<P: CoverageObserver>(self, observer: P) -> CoverageLoop<P> {
        CoverageLoop {
            grid: self.grid,
            options: self.options,
            observer,
        }
    }

    /// Drive the loop to termination.
    ///
    /// The input grid must hold only `0`/`1`; cells already at `1` count as
    /// covered and are never reused. A commit that would land on a covered
    /// cell aborts the run with [`CoverageError::InvariantViolation`].
    pub fn run<S>(mut self, budget: Budget, source: &mut S) -> Result<CoverageReport>
    where
        S: UniformSource + ?Sized,
    {
        if let Some((cell, value)) = self.grid.first_overlap() {
            return Err(CoverageError::OverlappingGrid {
                row: cell.row,
                col: cell.col,
                value,
            });
        }

        let free = self.grid.area() - self.grid.covered_cells();
        let mut towers = Vec::new();
        let mut area = 0usize;
        let mut iterations = 0u64;
        let mut discarded = 0u64;

        let termination = loop {
            if area >= free {
                break Termination::FullCoverage;
            }
            if let Budget::Towers(limit) = budget {
                if towers.len() >= limit {
                    break Termination::BudgetExhausted;
                }
            }
            if self.options.iteration_cap.is_some_and(|cap| iterations >= cap) {
                break Termination::IterationCap;
            }
            iterations += 1;

            let candidate = generate_candidate(self.grid.dims(), source)?;
            self.observer.on_candidate(iterations, &candidate);

            let trimmed = trim(&self.grid, &candidate)?;
            self.observer.on_trim(&candidate, &trimmed);

            let Some(rect) = trimmed.rectangle else {
                discarded += 1;
                self.observer.on_discard(&candidate);
                continue;
            };

            self.grid.commit(&candidate, &rect)?;
            area += rect.area();
            towers.push(rect);
            self.observer.on_commit(towers.len(), &rect, area);
        };

        let percent_covered = self.grid.coverage_percent();
        match termination {
            Termination::IterationCap => log::warn!(
                "iteration cap hit after {} iterations: {} towers, {:.1}% covered",
                iterations,
                towers.len(),
                percent_covered
            ),
            _ => log::info!(
                "{:?} after {} iterations: {} towers, {} discarded, {:.1}% covered",
                termination,
                iterations,
                towers.len(),
                discarded,
                percent_covered
            ),
        }

        Ok(CoverageReport {
            area,
            grid: self.grid,
            percent_covered,
            towers,
            iterations,
            discarded,
            termination,
        })
    }
}

/// Cover the whole grid, logging each step through [`LogObserver`].
pub fn run_full_coverage<S>(
    grid: Grid,
    source: &mut S,
    iteration_cap: Option<u64>,
) -> Result<CoverageReport>
where
    S: UniformSource + ?Sized,
{
    CoverageLoop::new(grid)
        .with_options(RunOptions { iteration_cap })
        .run(Budget::FullCoverage, source)
}

/// Commit up to `tower_count` towers, stopping early at full coverage.
pub fn run_fixed_budget<S>(
    grid: Grid,
    tower_count: usize,
    source: &mut S,
    iteration_cap: Option<u64>,
) -> Result<CoverageReport>
where
    S: UniformSource + ?Sized,
{
    CoverageLoop::new(grid)
        .with_options(RunOptions { iteration_cap })
        .run(Budget::Towers(tower_count), source)
}
