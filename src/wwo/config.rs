//! MOWWO configuration.
//!
//! [`MowwoConfig`] holds all parameters that control the search loop.

use crate::error::ConfigError;

/// How an oversized population is cut back to `population_size` at the end
/// of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truncation {
    /// Keep the first `population_size` slots in their current order.
    ///
    /// Local-search neighbors are appended after the regular slots, so
    /// this discards all of them regardless of quality.
    #[default]
    Positional,

    /// Rank the whole enlarged pool and keep the best `population_size` by
    /// `(rank, index)`.
    ///
    /// Survivors keep their relative order and stagnation counters;
    /// neighbors that survive start with a counter of 0. Costs one extra
    /// evaluation and sort of the pool in generations where local search
    /// fires.
    Ranked,
}

/// Configuration for the multi-objective water wave optimizer.
///
/// # Defaults
///
/// ```
/// use u_mowwo::wwo::{MowwoConfig, Truncation};
///
/// let config = MowwoConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.neighbors_per_search, 5);
/// assert_eq!(config.stagnation_limit, 10);
/// assert_eq!(config.truncation, Truncation::Positional);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mowwo::wwo::{MowwoConfig, Truncation};
///
/// let config = MowwoConfig::default()
///     .with_population_size(40)
///     .with_max_iterations(500)
///     .with_stagnation_limit(20)
///     .with_truncation(Truncation::Ranked)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MowwoConfig {
    /// Number of population slots `N`.
    pub population_size: usize,

    /// Number of generations. There is no early exit.
    pub max_iterations: usize,

    /// Neighbors generated per front member when local search fires (`KN`).
    pub neighbors_per_search: usize,

    /// A slot whose stagnation counter exceeds this value is reinitialized
    /// (`hmax`).
    pub stagnation_limit: usize,

    /// Wavelength used for local-search neighbors (0.0–1.0).
    pub local_search_wavelength: f64,

    /// Upper bound (inclusive) for entries of randomly generated plans.
    pub initial_value_max: u32,

    /// Truncation policy for the population.
    pub truncation: Truncation,

    /// Whether to evaluate solutions in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way: evaluation draws no random numbers.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for MowwoConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl MowwoConfig {
    /// Parameters of the published reference runs: 10 slots, 100
    /// generations, 5 neighbors, stagnation limit 10.
    pub fn reference() -> Self {
        Self {
            population_size: 10,
            max_iterations: 100,
            neighbors_per_search: 5,
            stagnation_limit: 10,
            local_search_wavelength: 0.1,
            initial_value_max: 2,
            truncation: Truncation::Positional,
            parallel: false,
            seed: None,
        }
    }

    /// Small and short, for smoke tests and interactive use.
    ///
    /// - Population: 8, Iterations: 30, Neighbors: 3, Stagnation limit: 5
    pub fn fast() -> Self {
        Self {
            population_size: 8,
            max_iterations: 30,
            neighbors_per_search: 3,
            stagnation_limit: 5,
            ..Self::reference()
        }
    }

    /// Larger population and horizon, with quality-based truncation so that
    /// local search contributes to the population.
    ///
    /// - Population: 50, Iterations: 500, Neighbors: 5, Stagnation limit: 25
    pub fn thorough() -> Self {
        Self {
            population_size: 50,
            max_iterations: 500,
            stagnation_limit: 25,
            truncation: Truncation::Ranked,
            parallel: true,
            ..Self::reference()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the neighbors per local search (`KN`).
    pub fn with_neighbors_per_search(mut self, n: usize) -> Self {
        self.neighbors_per_search = n;
        self
    }

    /// Sets the stagnation limit (`hmax`).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the local-search wavelength, clamped to `[0, 1]`.
    pub fn with_local_search_wavelength(mut self, wavelength: f64) -> Self {
        self.local_search_wavelength = wavelength.clamp(0.0, 1.0);
        self
    }

    /// Sets the upper bound for random plan entries.
    pub fn with_initial_value_max(mut self, max: u32) -> Self {
        self.initial_value_max = max;
        self
    }

    /// Sets the truncation policy.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !(0.0..=1.0).contains(&self.local_search_wavelength) {
            return Err(ConfigError::WavelengthOutOfRange(
                self.local_search_wavelength,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference() {
        let config = MowwoConfig::default();
        assert_eq!(config, MowwoConfig::reference());
        assert!((config.local_search_wavelength - 0.1).abs() < 1e-15);
        assert_eq!(config.initial_value_max, 2);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MowwoConfig::default()
            .with_population_size(30)
            .with_max_iterations(10)
            .with_neighbors_per_search(2)
            .with_stagnation_limit(3)
            .with_local_search_wavelength(0.25)
            .with_initial_value_max(4)
            .with_truncation(Truncation::Ranked)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.neighbors_per_search, 2);
        assert_eq!(config.stagnation_limit, 3);
        assert!((config.local_search_wavelength - 0.25).abs() < 1e-15);
        assert_eq!(config.initial_value_max, 4);
        assert_eq!(config.truncation, Truncation::Ranked);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_wavelength() {
        let config = MowwoConfig::default().with_local_search_wavelength(1.5);
        assert!((config.local_search_wavelength - 1.0).abs() < 1e-15);
        let config = MowwoConfig::default().with_local_search_wavelength(-0.5);
        assert!(config.local_search_wavelength.abs() < 1e-15);
    }

    #[test]
    fn test_validate_ok() {
        assert!(MowwoConfig::default().validate().is_ok());
        assert!(MowwoConfig::fast().validate().is_ok());
        assert!(MowwoConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = MowwoConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = MowwoConfig::default().with_max_iterations(0);
        assert_eq!(config.validate(), Err(ConfigError::NoIterations));
    }

    #[test]
    fn test_validate_wavelength_field() {
        let mut config = MowwoConfig::default();
        config.local_search_wavelength = 2.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WavelengthOutOfRange(2.0))
        );
        config.local_search_wavelength = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        let fast = MowwoConfig::fast();
        assert_eq!(fast.population_size, 8);
        assert_eq!(fast.max_iterations, 30);
        assert_eq!(fast.truncation, Truncation::Positional);

        let thorough = MowwoConfig::thorough().with_seed(1);
        assert_eq!(thorough.population_size, 50);
        assert_eq!(thorough.truncation, Truncation::Ranked);
        assert_eq!(thorough.seed, Some(1));
    }
}
