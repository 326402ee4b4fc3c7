//! Exact shortest-path search: Dijkstra and A*.
//!
//! Both algorithms implement [`PathFinder`] and are selected through
//! [`create_path_finder`]. They are deterministic, bounded by a
//! node-expansion budget, and guarded by a graph-size ceiling; see
//! [`SearchLimits`].
//!
//! # Weight fallback
//!
//! Per-hop weights come from
//! [`NetworkGraph::edge_weight`](crate::graph::NetworkGraph::edge_weight)
//! when the finder is weighted, else a constant 1.0. A lookup failure on a
//! specific edge degrades locally to 1.0 instead of aborting the search, so
//! partially specified graphs stay searchable. The fallback is an explicit
//! `match` on the lookup `Result`, keeping the recoverable-vs-fatal
//! distinction visible at the call site.

mod astar;
mod dijkstra;

pub use astar::{AStarFinder, Heuristic};
pub use dijkstra::DijkstraFinder;

use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::weight::Strategy;
use std::collections::HashMap;

/// Outcome of a single path query.
///
/// Self-contained: carries the algorithm label, wall-clock time, and either
/// the node sequence with its total strategy-weighted cost, or a typed
/// error. Callers branch on [`success`](PathResult::success); "no path" is
/// an expected outcome, never a panic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Whether a path was found.
    pub success: bool,
    /// Node sequence from start to end inclusive; empty on failure.
    pub path: Vec<NodeId>,
    /// Sum of per-hop weights along `path`.
    pub total_cost: f64,
    /// Human-readable algorithm label, encoding strategy and variant.
    pub algorithm: String,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: f64,
    /// Failure cause when `success` is false.
    pub error: Option<GraphError>,
}

impl PathResult {
    /// Successful result.
    pub fn found(algorithm: impl Into<String>, path: Vec<NodeId>, total_cost: f64) -> Self {
        Self {
            success: true,
            path,
            total_cost,
            algorithm: algorithm.into(),
            execution_time_ms: 0.0,
            error: None,
        }
    }

    /// Failed result with a typed cause.
    pub fn failed(algorithm: impl Into<String>, error: GraphError) -> Self {
        Self {
            success: false,
            path: Vec::new(),
            total_cost: 0.0,
            algorithm: algorithm.into(),
            execution_time_ms: 0.0,
            error: Some(error),
        }
    }

    /// Sets the measured execution time.
    pub fn with_time_ms(mut self, ms: f64) -> Self {
        self.execution_time_ms = ms;
        self
    }

    /// Number of hops (edges) in the path; 0 on failure or trivial paths.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Cooperative bounds for exact search.
///
/// Exceeding `max_expansions` yields
/// [`GraphError::SearchBudgetExceeded`], distinct from
/// [`GraphError::PathNotFound`]; a graph above `max_graph_nodes` is
/// rejected up front with [`GraphError::GraphTooLarge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum frontier pops before the search gives up.
    pub max_expansions: usize,
    /// Node-count ceiling checked before the search starts.
    pub max_graph_nodes: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 10_000,
            max_graph_nodes: 5_000,
        }
    }
}

impl SearchLimits {
    /// Sets the node-expansion budget.
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = n;
        self
    }

    /// Sets the graph-size ceiling.
    pub fn with_max_graph_nodes(mut self, n: usize) -> Self {
        self.max_graph_nodes = n;
        self
    }
}

/// A shortest-path algorithm over a [`NetworkGraph`].
///
/// Implementations are configured (strategy, weighted/uniform, limits) at
/// construction and are immutable and thread-safe during queries.
pub trait PathFinder: Send + Sync {
    /// Finds a path from `start` to `end`.
    ///
    /// Hard failures (`NodeNotFound`, `GraphTooLarge`) and expected
    /// negatives (`PathNotFound`, `SearchBudgetExceeded`) are all reported
    /// through the result record.
    fn find_path(&self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult;

    /// The label used in results and reports.
    fn name(&self) -> String;
}

/// Exact algorithm selector for [`create_path_finder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAlgorithm {
    /// Dijkstra's single-source shortest path.
    Dijkstra,
    /// A* with a zero heuristic by default (degenerates to Dijkstra).
    AStar,
}

/// Creates a boxed finder for the requested algorithm.
///
/// # Examples
///
/// ```
/// use netroute::graph::NetworkGraph;
/// use netroute::search::{create_path_finder, PathAlgorithm};
/// use netroute::weight::Strategy;
///
/// let mut g = NetworkGraph::new("g");
/// g.add_edge_weighted(0, 1, 1.0);
///
/// let finder = create_path_finder(PathAlgorithm::Dijkstra, Strategy::MinimizeLatency, true);
/// let result = finder.find_path(&g, 0, 1);
/// assert!(result.success);
/// ```
pub fn create_path_finder(
    algorithm: PathAlgorithm,
    strategy: Strategy,
    use_weights: bool,
) -> Box<dyn PathFinder> {
    match algorithm {
        PathAlgorithm::Dijkstra => Box::new(DijkstraFinder::new(strategy, use_weights)),
        PathAlgorithm::AStar => Box::new(AStarFinder::new(strategy, use_weights)),
    }
}

// ---------------------------------------------------------------------------
// Dense-index adjacency snapshot shared by the exact algorithms
// ---------------------------------------------------------------------------

/// Compact adjacency built per query: external ids mapped to dense indices,
/// edges flattened into per-node `(target, weight)` vectors for
/// cache-friendly frontier expansion.
pub(crate) struct IndexedGraph {
    pub ids: Vec<NodeId>,
    pub index_of: HashMap<NodeId, usize>,
    pub adjacency: Vec<Vec<(usize, f64)>>,
}

impl IndexedGraph {
    /// Builds the snapshot, resolving each edge weight under `strategy`
    /// (or 1.0 when `use_weights` is false). Lookup failures degrade to
    /// the uniform fallback weight.
    pub fn build(graph: &NetworkGraph, strategy: Strategy, use_weights: bool) -> Self {
        let ids = graph.node_ids();
        let index_of: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut adjacency = vec![Vec::new(); ids.len()];
        for (u, &u_id) in ids.iter().enumerate() {
            for v_id in graph.neighbors(u_id) {
                let Some(&v) = index_of.get(&v_id) else {
                    continue;
                };
                let weight = if use_weights {
                    match graph.edge_weight(u_id, v_id, strategy) {
                        Ok(w) => w,
                        // recoverable: degrade this hop to uniform weight
                        Err(GraphError::NodeNotFound(_))
                        | Err(GraphError::EdgeNotFound { .. }) => 1.0,
                        Err(e) => {
                            log::warn!(
                                "unexpected weight lookup failure on {u_id} -> {v_id}: {e}"
                            );
                            1.0
                        }
                    }
                } else {
                    1.0
                };
                adjacency[u].push((v, weight));
            }
        }

        Self {
            ids,
            index_of,
            adjacency,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Walks predecessor links from `end` back to `start`.
///
/// `usize::MAX` marks "no predecessor". A chain that self-loops or runs
/// longer than the node count is reported as
/// [`GraphError::PathReconstructionFailed`] instead of looping forever.
pub(crate) fn reconstruct_path(
    predecessors: &[usize],
    ids: &[NodeId],
    start_idx: usize,
    end_idx: usize,
) -> Result<Vec<NodeId>, GraphError> {
    let mut reversed = Vec::new();
    let mut v = end_idx;
    let mut steps = 0usize;

    while v != start_idx {
        let p = predecessors[v];
        if p == usize::MAX || p == v || steps > ids.len() {
            return Err(GraphError::PathReconstructionFailed);
        }
        reversed.push(ids[v]);
        v = p;
        steps += 1;
    }
    reversed.push(ids[start_idx]);
    reversed.reverse();
    Ok(reversed)
}

/// Frontier entry ordered so the binary heap pops the lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrontierEntry {
    pub priority: f64,
    pub node: usize,
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // reversed: BinaryHeap is a max-heap, we want the cheapest entry
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
