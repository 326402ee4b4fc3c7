//! Candidate path representation.

use crate::graph::{NetworkGraph, NodeId};
use crate::weight::Strategy;
use std::collections::HashSet;

/// A candidate path with cached fitness.
///
/// Fitness is the total strategy-weighted cost of the path, or
/// `f64::INFINITY` when the path is invalid (wrong endpoints, missing edge,
/// or a repeated node). The `evaluated` flag avoids recomputation: operators
/// that change the path clear it, and the runner re-evaluates lazily.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    /// Node sequence, expected to run start → end.
    pub path: Vec<NodeId>,
    /// Cached fitness; meaningless until `evaluated` is set.
    pub fitness: f64,
    /// Whether `fitness` reflects the current `path`.
    pub evaluated: bool,
}

impl Chromosome {
    /// Wraps a path with an unevaluated fitness.
    pub fn new(path: Vec<NodeId>) -> Self {
        Self {
            path,
            fitness: f64::INFINITY,
            evaluated: false,
        }
    }

    /// Marks the cached fitness stale after an in-place path edit.
    pub fn invalidate(&mut self) {
        self.evaluated = false;
        self.fitness = f64::INFINITY;
    }

    /// Whether the path is a valid simple path from `start` to `end`:
    /// correct endpoints, every hop an existing edge, no repeated node.
    ///
    /// A single-node path `[x]` is valid only when `start == end == x`.
    pub fn is_valid(&self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> bool {
        match self.path.as_slice() {
            [] => false,
            [only] => *only == start && start == end && graph.has_node(start),
            path => {
                if path[0] != start || *path.last().unwrap() != end {
                    return false;
                }
                let mut seen = HashSet::with_capacity(path.len());
                for &node in path {
                    if !seen.insert(node) {
                        return false;
                    }
                }
                path.windows(2).all(|hop| graph.has_edge(hop[0], hop[1]))
            }
        }
    }

    /// Total strategy-weighted cost along the path.
    ///
    /// A weight lookup failure on an individual hop degrades to the uniform
    /// fallback weight 1.0, matching the exact-search policy; structural
    /// validity is [`is_valid`](Self::is_valid)'s job, not this method's.
    pub fn path_cost(&self, graph: &NetworkGraph, strategy: Strategy) -> f64 {
        self.path
            .windows(2)
            .map(|hop| graph.edge_weight(hop[0], hop[1], strategy).unwrap_or(1.0))
            .sum()
    }

    /// Computes fitness: the path cost when valid, infinity otherwise.
    pub fn evaluate(&self, graph: &NetworkGraph, strategy: Strategy, start: NodeId, end: NodeId) -> f64 {
        if self.is_valid(graph, start, end) {
            self.path_cost(graph, strategy)
        } else {
            f64::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> NetworkGraph {
        let mut g = NetworkGraph::new("line");
        g.add_edge_weighted(0, 1, 2.0);
        g.add_edge_weighted(1, 2, 3.0);
        g
    }

    #[test]
    fn test_valid_simple_path() {
        let g = line();
        let c = Chromosome::new(vec![0, 1, 2]);
        assert!(c.is_valid(&g, 0, 2));
        assert_eq!(c.evaluate(&g, Strategy::MinimizeLatency, 0, 2), 5.0);
    }

    #[test]
    fn test_wrong_endpoints_invalid() {
        let g = line();
        assert!(!Chromosome::new(vec![1, 2]).is_valid(&g, 0, 2));
        assert!(!Chromosome::new(vec![0, 1]).is_valid(&g, 0, 2));
    }

    #[test]
    fn test_missing_edge_invalid() {
        let g = line();
        let c = Chromosome::new(vec![0, 2]);
        assert!(!c.is_valid(&g, 0, 2));
        assert!(c.evaluate(&g, Strategy::MinimizeLatency, 0, 2).is_infinite());
    }

    #[test]
    fn test_repeated_node_invalid() {
        let mut g = line();
        g.add_edge_weighted(2, 1, 1.0);
        g.add_edge_weighted(1, 3, 1.0);
        // 0 -> 1 -> 2 -> 1 -> 3 revisits node 1
        let c = Chromosome::new(vec![0, 1, 2, 1, 3]);
        assert!(!c.is_valid(&g, 0, 3));
    }

    #[test]
    fn test_single_node_path() {
        let mut g = NetworkGraph::new("g");
        g.add_node(5);
        let c = Chromosome::new(vec![5]);
        assert!(c.is_valid(&g, 5, 5));
        assert!(!c.is_valid(&g, 5, 6));
        assert_eq!(c.evaluate(&g, Strategy::Uniform, 5, 5), 0.0);
    }

    #[test]
    fn test_invalidate_clears_cache() {
        let mut c = Chromosome::new(vec![0, 1]);
        c.fitness = 3.0;
        c.evaluated = true;
        c.invalidate();
        assert!(!c.evaluated);
        assert!(c.fitness.is_infinite());
    }
}
