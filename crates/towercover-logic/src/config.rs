//! Simulation settings.
//!
//! Plain data with serde support so a harness can load it from JSON and
//! override fields. [`validate_config`] reports every problem at once.
//!
//! ```
//! use towercover_logic::config::{validate_config, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     rows: 8,
//!     cols: 8,
//!     seed: Some(42),
//!     ..SimulationConfig::default()
//! };
//! assert!(validate_config(&config).is_empty());
//! ```

use crate::coverage::Budget;
use crate::error::Result;
use crate::grid::Dims;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Seed for the random source (None = OS entropy).
    pub seed: Option<u64>,
    /// Loop iteration safeguard (None = unbounded).
    pub iteration_cap: Option<u64>,
    /// `Some(n)` runs in fixed-budget mode with `n` towers.
    pub tower_budget: Option<usize>,
    /// Trials for tower-count averaging.
    pub trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            seed: None,
            iteration_cap: None,
            tower_budget: None,
            trials: 10,
        }
    }
}

impl SimulationConfig {
    /// Return `self` if [`validate_config`] finds nothing wrong.
    pub fn validated(self) -> Result<Self> {
        let errors = validate_config(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors.into())
        }
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.rows, self.cols)
    }

    pub fn budget(&self) -> Budget {
        match self.tower_budget {
            Some(n) => Budget::Towers(n),
            None => Budget::FullCoverage,
        }
    }

    /// Random source for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows must be at least 1")]
    ZeroRows,
    #[error("cols must be at least 1")]
    ZeroCols,
    #[error("{rows}x{cols} grid is too large")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("iteration_cap of 0 would never run")]
    ZeroIterationCap,
    #[error("trials must be at least 1")]
    ZeroTrials,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimulationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.rows == 0 {
        errors.push(ConfigError::ZeroRows);
    }
    if config.cols == 0 {
        errors.push(ConfigError::ZeroCols);
    }
    if config.rows.checked_mul(config.cols).is_none() {
        errors.push(ConfigError::GridTooLarge {
            rows: config.rows,
            cols: config.cols,
        });
    }
    if config.iteration_cap == Some(0) {
        errors.push(ConfigError::ZeroIterationCap);
    }
    if config.trials == 0 {
        errors.push(ConfigError::ZeroTrials);
    }

    errors
}
