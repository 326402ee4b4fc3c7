//! GA configuration.

/// Parameters controlling the genetic path optimizer.
///
/// # Defaults
///
/// ```
/// use netroute::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use netroute::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of applying crossover to a selected parent pair
    /// (`0.0`–`1.0`); otherwise the fitter parent is cloned.
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (`0.0`–`1.0`).
    pub mutation_rate: f64,

    /// Fraction of the population preserved unchanged each generation
    /// (`0.0`–`1.0`); at least two elites are always kept.
    pub elite_ratio: f64,

    /// Tournament size for parent selection. Two-way by default.
    pub tournament_size: usize,

    /// Early-exit fitness threshold: once the generation best drops below
    /// this value after [`min_generations`](Self::min_generations), the
    /// loop stops. `None` disables early exit.
    pub early_exit_threshold: Option<f64>,

    /// Minimum generations before the early-exit threshold is consulted.
    pub min_generations: usize,

    /// Whether to evaluate fitness in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_ratio: 0.2,
            tournament_size: 2,
            early_exit_threshold: Some(50.0),
            min_generations: 20,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k.max(1);
        self
    }

    /// Sets the early-exit threshold (`None` to disable).
    pub fn with_early_exit_threshold(mut self, threshold: Option<f64>) -> Self {
        self.early_exit_threshold = threshold;
        self
    }

    /// Sets the minimum generation count before early exit.
    pub fn with_min_generations(mut self, n: usize) -> Self {
        self.min_generations = n;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick feasibility checks: small population, few
    /// generations.
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 100,
            min_generations: 10,
            ..Self::default()
        }
    }

    /// Preset balancing quality and runtime.
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            ..Self::default()
        }
    }

    /// Preset maximizing solution quality at the cost of runtime.
    pub fn quality() -> Self {
        Self {
            population_size: 150,
            max_generations: 800,
            early_exit_threshold: None,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        let elite_count = (self.population_size as f64 * self.elite_ratio) as usize;
        if elite_count >= self.population_size {
            return Err("elite_ratio too high: elites fill entire population".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!((config.elite_ratio - 0.2).abs() < 1e-10);
        assert_eq!(config.tournament_size, 2);
        assert_eq!(config.early_exit_threshold, Some(50.0));
        assert_eq!(config.min_generations, 20);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = GaConfig::fast()
            .with_population_size(40)
            .with_mutation_rate(0.3)
            .with_seed(7);
        assert_eq!(config.population_size, 40);
        assert!((config.mutation_rate - 0.3).abs() < 1e-10);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rates_clamped() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.2)
            .with_elite_ratio(2.0);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.mutation_rate - 0.0).abs() < 1e-10);
        assert!((config.elite_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_tiny_population() {
        assert!(GaConfig::default().with_population_size(1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_full_elitism() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(GaConfig::fast().validate().is_ok());
        assert!(GaConfig::balanced().validate().is_ok());
        assert!(GaConfig::quality().validate().is_ok());
        assert_eq!(GaConfig::quality().early_exit_threshold, None);
    }
}
