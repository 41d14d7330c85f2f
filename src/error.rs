//! Error types.
//!
//! Construction of a [`ProblemInstance`](crate::problem::ProblemInstance)
//! and validation of a [`MowwoConfig`](crate::wwo::MowwoConfig) are the only
//! fallible operations; the search itself cannot fail once both are valid.

use thiserror::Error;

/// Error raised while building a problem instance from raw data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstanceError {
    /// A tensor's shape disagrees with the declared dimensions.
    #[error("shape mismatch for `{field}`: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// More non-fixed supply types than supply types overall.
    #[error("K1 ({k1}) must not exceed K ({k})")]
    NonFixedExceedsTotal { k1: usize, k: usize },

    /// A declared `K2` that is not `K - K1`.
    #[error("K2 ({k2}) must equal K - K1 ({expected})")]
    FixedCountMismatch { k2: usize, expected: usize },

    /// More open military facilities than military facilities.
    #[error("n_open ({n_open}) must not exceed n ({n})")]
    OpenExceedsMilitary { n_open: usize, n: usize },

    /// The cost cap must be a positive finite number.
    #[error("cost cap C must be positive and finite, got {0}")]
    InvalidCostCap(f64),
}

/// Error raised by [`MowwoConfig::validate`](crate::wwo::MowwoConfig::validate).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("max_iterations must be at least 1")]
    NoIterations,

    #[error("local_search_wavelength must be in [0, 1], got {0}")]
    WavelengthOutOfRange(f64),
}
