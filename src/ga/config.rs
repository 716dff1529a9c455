//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::ConfigError;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.stagnation_limit, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_elite_ratio(0.05)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Generation cap. The loop evaluates at most this many generations.
    pub max_generations: usize,

    /// Fraction of the population copied unchanged into the next
    /// generation (0.0-1.0). The elite count is `floor(size * ratio)`.
    pub elite_ratio: f64,

    /// Probability that a child receives one mutation (0.0-1.0).
    ///
    /// Applied per child, not per gene.
    pub mutation_rate: f64,

    /// Entrants per tournament. Capped at the population size.
    pub tournament_size: usize,

    /// Generations without strict improvement of the best fitness before
    /// stopping. Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Fitness at which a feasible best individual ends the run.
    pub target_fitness: f64,

    /// Whether to evaluate individuals in parallel.
    ///
    /// Only has an effect when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked at the start of each generation, so a run may exceed it by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 500,
            elite_ratio: 0.1,
            mutation_rate: 0.1,
            tournament_size: 5,
            stagnation_limit: 200,
            target_fitness: 90.0,
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the elite ratio, clamped into `[0, 1]`.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped into `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the target fitness, clamped into `[0, 100]`.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = target.clamp(0.0, 100.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of individuals carried over unchanged each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio).floor() as usize
    }

    /// Validates the configuration.
    ///
    /// Builders clamp their inputs, so this mainly guards fields that were
    /// assigned directly or deserialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        check_rate("elite_ratio", self.elite_ratio)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if !(0.0..=100.0).contains(&self.target_fitness) {
            return Err(ConfigError::TargetOutOfRange(self.target_fitness));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check as well.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}
