//! Error type shared by every operation in the crate.

use crate::config::ConfigError;
use crate::rect::Rectangle;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoverageError>;

/// Failures surfaced by the coverage engine.
///
/// A trim that finds no free cells is *not* an error; it is reported as a
/// zero-area [`crate::maxrect::MaximalRectangle`] and retried by the loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverageError {
    #[error(
        "invalid dimensions {rows}x{cols}: sides must be positive and the cell count fit in usize"
    )]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("rectangle sides must be at least 1, got length {length}, width {width}")]
    EmptyRectangle { length: usize, width: usize },

    #[error("{length}x{width} rectangle at ({row}, {col}) extends past usize::MAX")]
    ExtentOverflow {
        row: usize,
        col: usize,
        length: usize,
        width: usize,
    },

    #[error("rectangle {rect} does not fit inside a {rows}x{cols} grid")]
    OutOfBounds {
        rect: Rectangle,
        rows: usize,
        cols: usize,
    },

    #[error("patch cell ({row}, {col}) holds {value}, expected 0 or 1")]
    NonBinaryPatch { row: usize, col: usize, value: u8 },

    #[error("shape mismatch: expected {expected} cells, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("averaging needs at least one trial")]
    ZeroTrials,

    #[error(
        "overlap after commit: candidate {candidate}, trimmed {trimmed}, cell ({row}, {col}) = {value}"
    )]
    InvariantViolation {
        candidate: Rectangle,
        trimmed: Rectangle,
        row: usize,
        col: usize,
        value: u32,
    },

    #[error("input grid already overlaps at ({row}, {col}) = {value}")]
    OverlappingGrid { row: usize, col: usize, value: u32 },

    #[error("invalid configuration: {}", format_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ConfigError>> for CoverageError {
    fn from(errors: Vec<ConfigError>) -> Self {
        CoverageError::InvalidConfig(errors)
    }
}
