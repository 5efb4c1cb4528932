//! Error types for Formica operations.
//!
//! Construction and mutation failures are reported as values; nothing in
//! the core panics on bad input.

use crate::cell::CellId;
use crate::direction::Direction;
use thiserror::Error;

/// Result type for Formica operations.
pub type Result<T> = std::result::Result<T, FormicaError>;

/// Errors that can occur while building or mutating an environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormicaError {
    /// Width or height was zero or negative.
    #[error("Invalid grid dimension: {width}x{height} (both must be positive)")]
    InvalidDimension { width: i64, height: i64 },

    /// Requested food total was negative, NaN or infinite.
    #[error("Invalid food total: {0} (must be finite and >= 0)")]
    InvalidFoodTotal(f64),

    /// Cell count is zero or does not fit in memory addressing.
    #[error("Degenerate grid: {width}x{height} has no addressable cells")]
    DegenerateGrid { width: i64, height: i64 },

    /// A directional link has no matching back-link.
    #[error("Broken adjacency: {from} -> {direction} has no matching back-link")]
    BrokenAdjacency { from: String, direction: Direction },

    /// Decay factor outside `[0, 1)`.
    #[error("Invalid decay factor: {0} (must be in [0, 1))")]
    InvalidDecayFactor(f64),

    /// Stimulus definition is malformed.
    #[error("Invalid stimulus: {0}")]
    InvalidStimulus(String),

    /// No stimulus registered under this name.
    #[error("Unknown stimulus: {0}")]
    UnknownStimulus(String),

    /// A stimulus with this name is already registered.
    #[error("Duplicate stimulus: {0}")]
    DuplicateStimulus(String),

    /// An amount was negative or non-finite, or would overflow a level.
    #[error("Invalid amount: {0} (must be finite and >= 0)")]
    InvalidAmount(f64),

    /// Evaporation threshold was NaN or infinite.
    #[error("Invalid threshold: {0} (must be finite)")]
    InvalidThreshold(f64),

    /// Handle does not belong to this lattice.
    #[error("Unknown cell: {0}")]
    UnknownCell(CellId),

    /// Attempted to link a cell to itself.
    #[error("Cannot link cell {0} to itself")]
    SelfLink(CellId),
}

impl FormicaError {
    pub fn invalid_dimension(width: i64, height: i64) -> Self {
        FormicaError::InvalidDimension { width, height }
    }

    pub fn broken_adjacency(from: impl Into<String>, direction: Direction) -> Self {
        FormicaError::BrokenAdjacency {
            from: from.into(),
            direction,
        }
    }

    pub fn invalid_stimulus(reason: impl Into<String>) -> Self {
        FormicaError::InvalidStimulus(reason.into())
    }
}
