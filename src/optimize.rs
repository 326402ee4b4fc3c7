//! Common interface over the metaheuristic path optimizers.
//!
//! Exact algorithms implement [`PathFinder`](crate::search::PathFinder)
//! and are stateless per query; the metaheuristics mutate internal RNG and
//! trail state, so they get their own `&mut self` trait here.

use crate::aco::{AcoConfig, AcoRunner};
use crate::ga::{GaConfig, GaRunner};
use crate::graph::{NetworkGraph, NodeId};
use crate::search::PathResult;
use crate::weight::Strategy;

/// A best-effort path optimizer.
///
/// Implementations may return suboptimal paths or fail to find an existing
/// path; the result record always states which.
pub trait Optimizer: Send {
    /// Searches for a low-cost path from `start` to `end`.
    fn optimize(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult;

    /// Human-readable algorithm label, including the weighting strategy.
    fn name(&self) -> String;
}

impl Optimizer for GaRunner {
    fn optimize(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult {
        GaRunner::optimize(self, graph, start, end)
    }

    fn name(&self) -> String {
        GaRunner::name(self)
    }
}

impl Optimizer for AcoRunner {
    fn optimize(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult {
        AcoRunner::optimize(self, graph, start, end)
    }

    fn name(&self) -> String {
        AcoRunner::name(self)
    }
}

/// Selects which metaheuristic a factory call builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    /// Population-based genetic algorithm ([`GaRunner`]).
    Genetic,
    /// Pheromone-trail ant colony ([`AcoRunner`]).
    AntColony,
}

/// Builds an optimizer with its balanced preset configuration.
///
/// # Examples
///
/// ```
/// use netroute::optimize::{create_optimizer, OptimizerKind};
/// use netroute::weight::Strategy;
///
/// let ga = create_optimizer(OptimizerKind::Genetic, Strategy::MinimizeLatency);
/// assert_eq!(ga.name(), "Genetic Algorithm (Min-Latency)");
/// ```
pub fn create_optimizer(kind: OptimizerKind, strategy: Strategy) -> Box<dyn Optimizer> {
    match kind {
        OptimizerKind::Genetic => Box::new(GaRunner::new(GaConfig::balanced(), strategy)),
        OptimizerKind::AntColony => Box::new(AcoRunner::new(AcoConfig::balanced(), strategy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_labels() {
        let ga = create_optimizer(OptimizerKind::Genetic, Strategy::BalanceLoad);
        assert_eq!(ga.name(), "Genetic Algorithm (Balance-Load)");
        let aco = create_optimizer(OptimizerKind::AntColony, Strategy::MinimizeCost);
        assert_eq!(aco.name(), "Ant Colony Optimization (Min-Cost)");
    }

    #[test]
    fn test_factory_optimizers_run() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 1.0);
        g.add_edge_weighted(1, 2, 1.0);

        for kind in [OptimizerKind::Genetic, OptimizerKind::AntColony] {
            let mut optimizer = create_optimizer(kind, Strategy::MinimizeLatency);
            let result = optimizer.optimize(&g, 0, 2);
            assert!(result.success, "{} failed", optimizer.name());
            assert_eq!(result.path, vec![0, 1, 2]);
        }
    }
}
