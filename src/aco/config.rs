//! ACO configuration.

/// Parameters controlling the ant colony path optimizer.
///
/// # Defaults
///
/// ```
/// use netroute::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.ants, 50);
/// assert_eq!(config.iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use netroute::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(20)
///     .with_evaporation(0.3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AcoConfig {
    /// Number of ants released per iteration.
    pub ants: usize,

    /// Number of colony iterations.
    pub iterations: usize,

    /// Pheromone influence exponent (alpha).
    pub alpha: f64,

    /// Heuristic influence exponent (beta).
    pub beta: f64,

    /// Per-iteration pheromone evaporation rate (`0.0`–`1.0`); each trail
    /// is multiplied by `1 - evaporation` before deposits.
    pub evaporation: f64,

    /// Deposit constant: a successful ant adds `deposit / path_cost` to
    /// every edge of its path.
    pub deposit: f64,

    /// Maximum nodes in an ant's walk before it gives up.
    pub max_path_len: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 50,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation: 0.5,
            deposit: 100.0,
            max_path_len: 50,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the colony size.
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the pheromone influence exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic influence exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation(mut self, rate: f64) -> Self {
        self.evaporation = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the deposit constant.
    pub fn with_deposit(mut self, q: f64) -> Self {
        self.deposit = q;
        self
    }

    /// Sets the walk length cap.
    pub fn with_max_path_len(mut self, n: usize) -> Self {
        self.max_path_len = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick feasibility checks.
    pub fn fast() -> Self {
        Self {
            ants: 15,
            iterations: 30,
            ..Self::default()
        }
    }

    /// Preset balancing quality and runtime.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset maximizing solution quality at the cost of runtime.
    pub fn quality() -> Self {
        Self {
            ants: 100,
            iterations: 300,
            evaporation: 0.3,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.ants == 0 {
            return Err("ants must be at least 1".into());
        }
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if self.max_path_len < 2 {
            return Err("max_path_len must be at least 2".into());
        }
        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err("alpha and beta must be nonnegative".into());
        }
        if self.deposit <= 0.0 {
            return Err("deposit must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.ants, 50);
        assert_eq!(config.iterations, 100);
        assert!((config.alpha - 1.0).abs() < 1e-10);
        assert!((config.beta - 2.0).abs() < 1e-10);
        assert!((config.evaporation - 0.5).abs() < 1e-10);
        assert!((config.deposit - 100.0).abs() < 1e-10);
        assert_eq!(config.max_path_len, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = AcoConfig::fast().with_ants(5).with_beta(3.0).with_seed(1);
        assert_eq!(config.ants, 5);
        assert!((config.beta - 3.0).abs() < 1e-10);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_evaporation_clamped() {
        let config = AcoConfig::default().with_evaporation(1.5);
        assert!((config.evaporation - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_zero_ants() {
        assert!(AcoConfig::default().with_ants(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_walks() {
        assert!(AcoConfig::default().with_max_path_len(1).validate().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(AcoConfig::fast().validate().is_ok());
        assert!(AcoConfig::balanced().validate().is_ok());
        assert!(AcoConfig::quality().validate().is_ok());
    }
}
