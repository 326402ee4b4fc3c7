//! A* search with pluggable heuristic.

use super::{reconstruct_path, FrontierEntry, IndexedGraph, PathFinder, PathResult, SearchLimits};
use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::weight::Strategy;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Cost-to-go estimate used by [`AStarFinder`].
///
/// Optimality requires an admissible heuristic (never overestimating the
/// true remaining cost). Only [`Heuristic::Zero`] carries that guarantee
/// for arbitrary weighted graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// `h = 0` everywhere. Degenerates to Dijkstra; used for fair
    /// algorithmic comparison. Trivially admissible.
    #[default]
    Zero,

    /// Euclidean distance over a synthetic coordinate assignment
    /// (`x = id`; `y = 10_000 + id mod 1000` for ids >= 1000, else 0).
    ///
    /// Useful when ids encode spatial clusters; admissible only when edge
    /// weights dominate the synthetic distances.
    SyntheticCoordinates,
}

/// A*: identical frontier mechanics to Dijkstra, keyed by `g + h`.
///
/// With the default zero heuristic its results match Dijkstra's costs
/// exactly, which is the configuration the comparison harness uses.
#[derive(Debug, Clone)]
pub struct AStarFinder {
    strategy: Strategy,
    use_weights: bool,
    heuristic: Heuristic,
    limits: SearchLimits,
}

impl AStarFinder {
    /// Creates a finder with the zero heuristic and default limits.
    pub fn new(strategy: Strategy, use_weights: bool) -> Self {
        Self {
            strategy,
            use_weights,
            heuristic: Heuristic::Zero,
            limits: SearchLimits::default(),
        }
    }

    /// Selects the heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Overrides the search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    fn estimate(&self, node: NodeId, goal: NodeId) -> f64 {
        match self.heuristic {
            Heuristic::Zero => 0.0,
            Heuristic::SyntheticCoordinates => {
                let (x1, y1) = synthetic_coords(node);
                let (x2, y2) = synthetic_coords(goal);
                let dx = x1 - x2;
                let dy = y1 - y2;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }
}

/// Synthetic planar embedding: id maps to x; ids >= 1000 get shifted into a
/// second band so large-id clusters sit apart from the small-id band.
fn synthetic_coords(id: NodeId) -> (f64, f64) {
    let x = id as f64;
    let y = if id >= 1000 {
        10_000.0 + (id % 1000) as f64
    } else {
        0.0
    };
    (x, y)
}

impl PathFinder for AStarFinder {
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

        let mut g_score = vec![f64::INFINITY; n];
        let mut pred = vec![usize::MAX; n];
        let mut settled = vec![false; n];
        let mut frontier = BinaryHeap::new();

        g_score[start_idx] = 0.0;
        frontier.push(FrontierEntry {
            priority: self.estimate(start, end),
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
                let candidate = g_score[u] + weight;
                if candidate < g_score[v] {
                    g_score[v] = candidate;
                    pred[v] = u;
                    frontier.push(FrontierEntry {
                        priority: candidate + self.estimate(indexed.ids[v], end),
                        node: v,
                    });
                }
            }
        }

        if !reached || g_score[end_idx].is_infinite() {
            return PathResult::failed(&name, GraphError::PathNotFound { start, end })
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        match reconstruct_path(&pred, &indexed.ids, start_idx, end_idx) {
            Ok(path) => {
                log::debug!(
                    "astar {start} -> {end}: cost={}, hops={}, expanded={expanded}",
                    g_score[end_idx],
                    path.len() - 1
                );
                PathResult::found(&name, path, g_score[end_idx])
                    .with_time_ms(started.elapsed().as_secs_f64() * 1000.0)
            }
            Err(e) => PathResult::failed(&name, e)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0),
        }
    }

    fn name(&self) -> String {
        let base = if self.use_weights {
            format!("A* ({})", self.strategy.name())
        } else {
            "A* (Uniform)".to_string()
        };
        match self.heuristic {
            Heuristic::Zero => base,
            Heuristic::SyntheticCoordinates => format!("{base} + Coord"),
        }
    }
}
