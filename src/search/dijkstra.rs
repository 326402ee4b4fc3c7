//! Dijkstra's single-source shortest path.

use super::{reconstruct_path, FrontierEntry, IndexedGraph, PathFinder, PathResult, SearchLimits};
use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::weight::Strategy;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Dijkstra with a min-priority frontier keyed by tentative distance.
///
/// Stops as soon as the goal is popped from the frontier or the frontier
/// empties. Requires nonnegative edge weights, which every [`Strategy`]
/// formula guarantees for in-range attributes.
///
/// # Examples
///
/// ```
/// use netroute::graph::NetworkGraph;
/// use netroute::search::{DijkstraFinder, PathFinder};
/// use netroute::weight::Strategy;
///
/// let mut g = NetworkGraph::new("g");
/// g.add_edge_weighted(0, 1, 1.0);
/// g.add_edge_weighted(1, 2, 1.0);
/// g.add_edge_weighted(0, 2, 5.0);
///
/// let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true);
/// let result = finder.find_path(&g, 0, 2);
/// assert_eq!(result.path, vec![0, 1, 2]);
/// assert_eq!(result.total_cost, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct DijkstraFinder {
    strategy: Strategy,
    use_weights: bool,
    limits: SearchLimits,
}

impl DijkstraFinder {
    /// Creates a finder with default [`SearchLimits`].
    pub fn new(strategy: Strategy, use_weights: bool) -> Self {
        Self {
            strategy,
            use_weights,
            limits: SearchLimits::default(),
        }
    }

    /// Overrides the search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl PathFinder for DijkstraFinder {
    fn find_path(&self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult {
        let started = Instant::now();
        let name = self.name();

        if !graph.has_node(start) {
            return PathResult::failed(&name, GraphError::NodeNotFound(start));
        }
        if !graph.has_node(end) {
            return PathResult::failed(&name, GraphError::NodeNotFound(end));
        }
        let nodes = graph.node_count();
        if nodes > self.limits.max_graph_nodes {
            return PathResult::failed(
                &name,
                GraphError::GraphTooLarge {
                    nodes,
                    limit: self.limits.max_graph_nodes,
                },
            );
        }
        if start == end {
            return PathResult::found(&name, vec![start], 0.0)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let indexed = IndexedGraph::build(graph, self.strategy, self.use_weights);
        let n = indexed.len();
        let start_idx = indexed.index_of[&start];
        let end_idx = indexed.index_of[&end];

        let mut dist = vec![f64::INFINITY; n];
        let mut pred = vec![usize::MAX; n];
        let mut settled = vec![false; n];
        let mut frontier = BinaryHeap::new();

        dist[start_idx] = 0.0;
        frontier.push(FrontierEntry {
            priority: 0.0,
            node: start_idx,
        });

        let mut expanded = 0usize;
        let mut reached = false;

        while let Some(FrontierEntry { node: u, .. }) = frontier.pop() {
            if settled[u] {
                continue;
            }
            settled[u] = true;

            // goal test precedes the budget check so a goal reached right
            // at the budget boundary still counts as found
            if u == end_idx {
                reached = true;
                break;
            }

            expanded += 1;
            if expanded > self.limits.max_expansions {
                return PathResult::failed(&name, GraphError::SearchBudgetExceeded { expanded })
                    .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
            }

            for &(v, weight) in &indexed.adjacency[u] {
                let candidate = dist[u] + weight;
                if candidate < dist[v] {
                    dist[v] = candidate;
                    pred[v] = u;
                    frontier.push(FrontierEntry {
                        priority: candidate,
                        node: v,
                    });
                }
            }
        }

        if !reached || dist[end_idx].is_infinite() {
            return PathResult::failed(&name, GraphError::PathNotFound { start, end })
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        match reconstruct_path(&pred, &indexed.ids, start_idx, end_idx) {
            Ok(path) => {
                log::debug!(
                    "dijkstra {start} -> {end}: cost={}, hops={}, expanded={expanded}",
                    dist[end_idx],
                    path.len() - 1
                );
                PathResult::found(&name, path, dist[end_idx])
                    .with_time_ms(started.elapsed().as_secs_f64() * 1000.0)
            }
            Err(e) => PathResult::failed(&name, e)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0),
        }
    }

    fn name(&self) -> String {
        if self.use_weights {
            format!("Dijkstra ({})", self.strategy.name())
        } else {
            "Dijkstra (Uniform)".to_string()
        }
    }
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

    #[test]
    fn test_prefers_cheaper_two_hop_path() {
        let _ = env_logger::builder().is_test(true).try_init();
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true);
        let result = finder.find_path(&triangle(), 0, 2);
        assert!(result.success);
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.total_cost, 2.0);
    }

    #[test]
    fn test_uniform_prefers_fewer_hops() {
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, false);
        let result = finder.find_path(&triangle(), 0, 2);
        assert!(result.success);
        assert_eq!(result.path, vec![0, 2]);
        assert_eq!(result.total_cost, 1.0);
    }

    #[test]
    fn test_missing_endpoint_is_hard_failure() {
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true);
        let result = finder.find_path(&triangle(), 0, 99);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::NodeNotFound(99)));
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_no_path_reports_path_not_found() {
        let mut g = triangle();
        // 2 has no outgoing edges, so 2 -> 0 is unreachable
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true);
        let result = finder.find_path(&g, 2, 0);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::PathNotFound { start: 2, end: 0 }));

        // removing the only bridge breaks a previously reachable pair
        g.remove_edge(1, 2);
        g.remove_edge(0, 2);
        let result = finder.find_path(&g, 0, 2);
        assert_eq!(result.error, Some(GraphError::PathNotFound { start: 0, end: 2 }));
    }

    #[test]
    fn test_self_query_on_isolated_node() {
        let mut g = NetworkGraph::new("single");
        g.add_node(7);
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true);
        let result = finder.find_path(&g, 7, 7);
        assert!(result.success);
        assert_eq!(result.path, vec![7]);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_expansion_budget() {
        let mut g = NetworkGraph::new("chain");
        for i in 0..100 {
            g.add_edge_weighted(i, i + 1, 1.0);
        }
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true)
            .with_limits(SearchLimits::default().with_max_expansions(10));
        let result = finder.find_path(&g, 0, 100);
        assert!(!result.success);
        assert!(matches!(
            result.error,
            Some(GraphError::SearchBudgetExceeded { .. })
        ));
    }

    #[test]
    fn test_goal_at_budget_boundary_is_found() {
        // 10 non-goal expansions exhaust the budget exactly; popping the
        // goal afterwards must still succeed
        let mut g = NetworkGraph::new("chain");
        for i in 0..10 {
            g.add_edge_weighted(i, i + 1, 1.0);
        }
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true)
            .with_limits(SearchLimits::default().with_max_expansions(10));
        let result = finder.find_path(&g, 0, 10);
        assert!(result.success);
        assert_eq!(result.path.len(), 11);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_graph_size_ceiling() {
        let mut g = NetworkGraph::new("big");
        for i in 0..20 {
            g.add_edge_weighted(i, i + 1, 1.0);
        }
        let finder = DijkstraFinder::new(Strategy::MinimizeLatency, true)
            .with_limits(SearchLimits::default().with_max_graph_nodes(5));
        let result = finder.find_path(&g, 0, 3);
        assert!(matches!(result.error, Some(GraphError::GraphTooLarge { .. })));
    }

    #[test]
    fn test_name_encodes_variant() {
        assert_eq!(
            DijkstraFinder::new(Strategy::BalanceLoad, true).name(),
            "Dijkstra (Balance-Load)"
        );
        assert_eq!(
            DijkstraFinder::new(Strategy::BalanceLoad, false).name(),
            "Dijkstra (Uniform)"
        );
    }
}
