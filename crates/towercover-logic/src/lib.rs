//! Randomized non-overlapping tower coverage of a grid.
//!
//! Random candidate rectangles ("towers") are dropped onto a region one at a
//! time. Each candidate is trimmed to the largest sub-rectangle of cells that
//! are still uncovered, and only that trimmed rectangle is committed. The
//! loop runs until the region is covered or a tower budget is spent.
//!
//! Everything here is pure logic: randomness is injected, logging goes
//! through the `log` facade, and results are plain data.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`candidate`] | Uniformly random in-bounds tower proposals |
//! | [`config`] | Simulation settings and their validation |
//! | [`coverage`] | Greedy placement loop, budgets, run reports |
//! | [`error`] | Crate error type |
//! | [`grid`] | Coverage map, commits, overlays, availability masks |
//! | [`maxrect`] | Largest all-ones rectangle via histogram stack scan |
//! | [`observer`] | Per-step callbacks for the placement loop |
//! | [`rect`] | Cell and rectangle value types |
//! | [`source`] | Injected uniform integer source |
//! | [`stats`] | Repeated trials and tower-count averaging |
//! | [`trim`] | Candidate trimming against existing coverage |

pub mod candidate;
pub mod config;
pub mod coverage;
pub mod error;
pub mod grid;
pub mod maxrect;
pub mod observer;
pub mod rect;
pub mod source;
pub mod stats;
pub mod trim;

pub use candidate::generate_candidate;
pub use config::{validate_config, ConfigError, SimulationConfig};
pub use coverage::{
    run_fixed_budget, run_full_coverage, Budget, CoverageLoop, CoverageReport, RunOptions,
    Termination,
};
pub use error::{CoverageError, Result};
pub use grid::{Dims, Grid};
pub use maxrect::{find_maximal_rectangle, MaximalRectangle, Patch};
pub use observer::{CoverageObserver, LogObserver, NoopObserver};
pub use rect::{Cell, Rectangle};
pub use source::UniformSource;
pub use stats::{average_towers_needed, tower_counts};
pub use trim::{trim, trimmed_coverage};

/// Fresh all-zero region of `rows x cols` cells.
pub fn generate_region(rows: usize, cols: usize) -> Result<Grid> {
    Grid::new(rows, cols)
}
