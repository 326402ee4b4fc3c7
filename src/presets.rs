//! Per-algorithm strategy bundles.
//!
//! A comparison run weighs edges differently per algorithm family: the
//! uniform exact baseline always ignores attributes, while the weighted
//! exact search and the two metaheuristics each get a configurable
//! [`Strategy`]. The constructors cover the common deployment scenarios.

use crate::weight::Strategy;

/// Strategy assignment for one comparison scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyPreset {
    /// Strategy for the hop-count exact baseline. Always uniform.
    pub exact_uniform: Strategy,
    /// Strategy for the attribute-weighted exact search.
    pub exact_weighted: Strategy,
    /// Strategy for the genetic optimizer.
    pub genetic: Strategy,
    /// Strategy for the ant colony optimizer.
    pub ant_colony: Strategy,
}

impl Default for StrategyPreset {
    fn default() -> Self {
        Self::balanced()
    }
}

impl StrategyPreset {
    fn weighted(strategy: Strategy) -> Self {
        Self {
            exact_uniform: Strategy::Uniform,
            exact_weighted: strategy,
            genetic: strategy,
            ant_colony: strategy,
        }
    }

    /// Latency-sensitive traffic (interactive sessions, voice).
    pub fn latency_optimized() -> Self {
        Self::weighted(Strategy::MinimizeLatency)
    }

    /// Throughput-hungry traffic (streaming, bulk transfer).
    pub fn bandwidth_optimized() -> Self {
        Self::weighted(Strategy::MaximizeBandwidth)
    }

    /// General-purpose load balancing.
    pub fn balanced() -> Self {
        Self::weighted(Strategy::BalanceLoad)
    }

    /// Budget-constrained routing.
    pub fn cost_optimized() -> Self {
        Self::weighted(Strategy::MinimizeCost)
    }

    /// Congestion-aware adaptive weighting.
    pub fn adaptive() -> Self {
        Self::weighted(Strategy::Adaptive)
    }

    /// Different objective per algorithm family.
    pub fn mixed() -> Self {
        Self {
            exact_uniform: Strategy::Uniform,
            exact_weighted: Strategy::BalanceLoad,
            genetic: Strategy::MinimizeLatency,
            ant_colony: Strategy::MaximizeBandwidth,
        }
    }

    /// One-line description of the assignment.
    pub fn describe(&self) -> String {
        format!(
            "Config[Uniform: {}, Weighted: {}, Genetic: {}, Ant Colony: {}]",
            self.exact_uniform.name(),
            self.exact_weighted.name(),
            self.genetic.name(),
            self.ant_colony.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_baseline_everywhere() {
        for preset in [
            StrategyPreset::latency_optimized(),
            StrategyPreset::bandwidth_optimized(),
            StrategyPreset::balanced(),
            StrategyPreset::cost_optimized(),
            StrategyPreset::adaptive(),
            StrategyPreset::mixed(),
        ] {
            assert_eq!(preset.exact_uniform, Strategy::Uniform);
        }
    }

    #[test]
    fn test_default_is_balanced() {
        assert_eq!(StrategyPreset::default(), StrategyPreset::balanced());
    }

    #[test]
    fn test_mixed_assigns_per_family() {
        let preset = StrategyPreset::mixed();
        assert_eq!(preset.exact_weighted, Strategy::BalanceLoad);
        assert_eq!(preset.genetic, Strategy::MinimizeLatency);
        assert_eq!(preset.ant_colony, Strategy::MaximizeBandwidth);
    }

    #[test]
    fn test_describe_lists_all_families() {
        let text = StrategyPreset::latency_optimized().describe();
        assert!(text.contains("Uniform"));
        assert!(text.contains("Min-Latency"));
    }
}
