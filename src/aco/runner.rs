//! Colony loop execution.

use super::config::AcoConfig;
use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::search::PathResult;
use crate::weight::Strategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Initial trail intensity on every edge.
const INITIAL_PHEROMONE: f64 = 1.0;
/// Additive smoothing in the heuristic denominator so zero-cost edges stay
/// finite.
const HEURISTIC_SMOOTHING: f64 = 0.1;

/// Executes the ant colony path optimization.
///
/// The runner owns its pseudo-random generator, seeded from
/// [`AcoConfig::seed`]; seeded runs are reproducible.
///
/// # Examples
///
/// ```
/// use netroute::aco::{AcoConfig, AcoRunner};
/// use netroute::graph::NetworkGraph;
/// use netroute::weight::Strategy;
///
/// let mut g = NetworkGraph::new("g");
/// g.add_edge_weighted(0, 1, 1.0);
/// g.add_edge_weighted(1, 2, 1.0);
/// g.add_edge_weighted(0, 2, 5.0);
///
/// let config = AcoConfig::fast().with_seed(42);
/// let mut runner = AcoRunner::new(config, Strategy::MinimizeLatency);
/// let result = runner.optimize(&g, 0, 2);
/// assert!(result.success);
/// ```
pub struct AcoRunner {
    config: AcoConfig,
    strategy: Strategy,
    rng: StdRng,
}

impl AcoRunner {
    /// Creates a runner.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AcoConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(config: AcoConfig, strategy: Strategy) -> Self {
        config.validate().expect("invalid AcoConfig");
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            config,
            strategy,
            rng,
        }
    }

    /// The label used in results and reports.
    pub fn name(&self) -> String {
        format!("Ant Colony Optimization ({})", self.strategy.name())
    }

    /// Runs the optimization for a single start/end demand.
    pub fn optimize(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult {
        let started = Instant::now();
        let name = self.name();

        if !graph.has_node(start) {
            return PathResult::failed(&name, GraphError::NodeNotFound(start));
        }
        if !graph.has_node(end) {
            return PathResult::failed(&name, GraphError::NodeNotFound(end));
        }
        if start == end {
            return PathResult::found(&name, vec![start], 0.0)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let heuristic = build_heuristic(graph, self.strategy);
        let mut pheromone: HashMap<(NodeId, NodeId), f64> = heuristic
            .keys()
            .map(|&edge| (edge, INITIAL_PHEROMONE))
            .collect();

        let mut best_path: Option<Vec<NodeId>> = None;
        let mut best_cost = f64::INFINITY;

        for iteration in 0..self.config.iterations {
            let mut walks: Vec<(Vec<NodeId>, f64)> = Vec::new();

            for _ in 0..self.config.ants {
                if let Some(path) = self.construct_walk(graph, &pheromone, &heuristic, start, end) {
                    let cost = path_cost(graph, &path, self.strategy);
                    if cost < best_cost {
                        best_cost = cost;
                        best_path = Some(path.clone());
                    }
                    walks.push((path, cost));
                }
            }

            for trail in pheromone.values_mut() {
                *trail *= 1.0 - self.config.evaporation;
            }
            for (path, cost) in &walks {
                let reward = self.config.deposit / cost.max(f64::EPSILON);
                for hop in path.windows(2) {
                    if let Some(trail) = pheromone.get_mut(&(hop[0], hop[1])) {
                        *trail += reward;
                    }
                }
            }

            if iteration % 10 == 0 {
                log::debug!(
                    "aco {start} -> {end}: iteration {iteration}, best={best_cost}, successful ants={}",
                    walks.len()
                );
            }
        }

        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        match best_path {
            Some(path) => {
                log::debug!(
                    "aco {start} -> {end}: done, cost={best_cost}, {} nodes",
                    path.len()
                );
                PathResult::found(&name, path, best_cost).with_time_ms(elapsed)
            }
            None => PathResult::failed(&name, GraphError::PathNotFound { start, end })
                .with_time_ms(elapsed),
        }
    }

    /// Walks one ant from `start`, choosing hops by roulette over
    /// `pheromone^alpha * heuristic^beta` among unvisited neighbors.
    ///
    /// Returns `None` when the ant dead-ends or exceeds the length cap
    /// before reaching `end`.
    fn construct_walk(
        &mut self,
        graph: &NetworkGraph,
        pheromone: &HashMap<(NodeId, NodeId), f64>,
        heuristic: &HashMap<(NodeId, NodeId), f64>,
        start: NodeId,
        end: NodeId,
    ) -> Option<Vec<NodeId>> {
        let mut path = vec![start];
        let mut visited: HashSet<NodeId> = HashSet::from([start]);
        let mut current = start;

        while current != end && path.len() < self.config.max_path_len {
            let mut candidates = graph.neighbors(current);
            candidates.sort_unstable(); // reproducible roulette order
            candidates.retain(|n| !visited.contains(n));
            if candidates.is_empty() {
                return None;
            }

            let attractiveness: Vec<f64> = candidates
                .iter()
                .map(|&n| {
                    let trail = pheromone
                        .get(&(current, n))
                        .copied()
                        .unwrap_or(INITIAL_PHEROMONE);
                    let desirability = heuristic.get(&(current, n)).copied().unwrap_or(1.0);
                    trail.powf(self.config.alpha) * desirability.powf(self.config.beta)
                })
                .collect();

            let total: f64 = attractiveness.iter().sum();
            let next = if total > 0.0 && total.is_finite() {
                let mut spin = self.rng.random_range(0.0..total);
                let mut picked = candidates[candidates.len() - 1];
                for (i, &slice) in attractiveness.iter().enumerate() {
                    if spin < slice {
                        picked = candidates[i];
                        break;
                    }
                    spin -= slice;
                }
                picked
            } else {
                // degenerate weights: fall back to a uniform pick
                candidates[self.rng.random_range(0..candidates.len())]
            };

            path.push(next);
            visited.insert(next);
            current = next;
        }

        (current == end).then_some(path)
    }
}

/// Precomputes the static desirability `1 / (cost + smoothing)` for every
/// edge under the given strategy.
fn build_heuristic(graph: &NetworkGraph, strategy: Strategy) -> HashMap<(NodeId, NodeId), f64> {
    let mut heuristic = HashMap::new();
    for from in graph.node_ids() {
        for to in graph.neighbors(from) {
            let cost = graph.edge_weight(from, to, strategy).unwrap_or(1.0);
            heuristic.insert((from, to), 1.0 / (cost + HEURISTIC_SMOOTHING));
        }
    }
    heuristic
}

fn path_cost(graph: &NetworkGraph, path: &[NodeId], strategy: Strategy) -> f64 {
    path.windows(2)
        .map(|hop| graph.edge_weight(hop[0], hop[1], strategy).unwrap_or(1.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> NetworkGraph {
        let mut g = NetworkGraph::new("triangle");
        g.add_edge_weighted(0, 1, 1.0);
        g.add_edge_weighted(1, 2, 1.0);
        g.add_edge_weighted(0, 2, 5.0);
        g
    }

    fn runner(seed: u64) -> AcoRunner {
        AcoRunner::new(AcoConfig::fast().with_seed(seed), Strategy::MinimizeLatency)
    }

    #[test]
    fn test_converges_on_cheap_path() {
        let g = triangle();
        let result = runner(42).optimize(&g, 0, 2);
        assert!(result.success);
        assert_eq!(result.path, vec![0, 1, 2]);
        assert!((result.total_cost - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_endpoint() {
        let g = triangle();
        let result = runner(1).optimize(&g, 7, 2);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::NodeNotFound(7)));
    }

    #[test]
    fn test_unreachable_target() {
        let mut g = triangle();
        g.add_node(9); // isolated
        let result = runner(1).optimize(&g, 0, 9);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::PathNotFound { start: 0, end: 9 }));
    }

    #[test]
    fn test_start_equals_end() {
        let g = triangle();
        let result = runner(1).optimize(&g, 2, 2);
        assert!(result.success);
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let g = triangle();
        let a = runner(99).optimize(&g, 0, 2);
        let b = runner(99).optimize(&g, 0, 2);
        assert_eq!(a.path, b.path);
        assert_eq!(a.total_cost, b.total_cost);
    }

    #[test]
    fn test_walk_length_cap() {
        // a long chain whose only route exceeds the cap
        let mut g = NetworkGraph::new("chain");
        for i in 0..10 {
            g.add_edge_weighted(i, i + 1, 1.0);
        }
        let config = AcoConfig::fast().with_seed(3).with_max_path_len(5);
        let mut r = AcoRunner::new(config, Strategy::MinimizeLatency);
        let result = r.optimize(&g, 0, 10);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::PathNotFound { start: 0, end: 10 }));
    }

    #[test]
    fn test_heuristic_favors_cheap_edges() {
        let g = triangle();
        let h = build_heuristic(&g, Strategy::MinimizeLatency);
        assert!(h[&(0, 1)] > h[&(0, 2)]);
    }

    #[test]
    fn test_name_includes_strategy() {
        assert_eq!(
            runner(1).name(),
            "Ant Colony Optimization (Min-Latency)"
        );
    }
}
