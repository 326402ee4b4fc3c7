//! Sampled network metrics and failure simulation.
//!
//! Metric collection samples at most [`METRIC_SAMPLE_LIMIT`] nodes and
//! extrapolates, so it stays cheap on large graphs. Failure simulation
//! never touches the live graph: it removes the node or edge from a
//! snapshot, re-probes connectivity there with uniform Dijkstra, and hands
//! the snapshot back for further what-if analysis.

use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::search::{DijkstraFinder, PathFinder};
use crate::weight::Strategy;

/// Degree sampling cap for metric collection.
pub const METRIC_SAMPLE_LIMIT: usize = 1000;

/// Coarse structural metrics, exact on small graphs and extrapolated from
/// a degree sample on large ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkMetrics {
    /// Exact node count.
    pub node_count: usize,
    /// Edge count, extrapolated when sampled.
    pub edge_count: usize,
    /// Mean out-degree over the sample.
    pub average_degree: f64,
    /// Directed density `edges / (n · (n - 1))`, from the extrapolated
    /// edge count.
    pub density: f64,
    /// Crude diameter bound: `min(10, 2 · max sampled degree)`.
    pub diameter_estimate: f64,
}

/// Collects metrics over the lowest-id sample of nodes.
pub fn collect_metrics(graph: &NetworkGraph) -> NetworkMetrics {
    let node_count = graph.node_count();
    if node_count == 0 {
        return NetworkMetrics {
            node_count: 0,
            edge_count: 0,
            average_degree: 0.0,
            density: 0.0,
            diameter_estimate: 0.0,
        };
    }

    let mut ids = graph.node_ids();
    ids.sort_unstable(); // deterministic sample
    let sample_size = ids.len().min(METRIC_SAMPLE_LIMIT);

    let mut sampled_degree_total = 0usize;
    let mut max_degree = 0usize;
    for &node in ids.iter().take(sample_size) {
        let degree = graph.neighbors(node).len();
        sampled_degree_total += degree;
        max_degree = max_degree.max(degree);
    }

    let scale = node_count as f64 / sample_size as f64;
    let edge_count = (sampled_degree_total as f64 * scale) as usize;
    let density = if node_count > 1 {
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    } else {
        0.0
    };

    let metrics = NetworkMetrics {
        node_count,
        edge_count,
        average_degree: sampled_degree_total as f64 / sample_size as f64,
        density,
        diameter_estimate: (2.0 * max_degree as f64).min(10.0),
    };
    log::debug!(
        "metrics for {}: avg degree={}, density={}",
        graph.info(),
        metrics.average_degree,
        metrics.density
    );
    metrics
}

/// Result of a what-if failure: the mutated snapshot plus a connectivity
/// probe on it.
#[derive(Debug, Clone)]
pub struct FailureOutcome {
    /// Copy of the graph with the failure applied. The live graph is
    /// untouched.
    pub snapshot: NetworkGraph,
    /// Whether the probe route still connects, `None` when no probe was
    /// possible (fewer than two nodes remain).
    pub still_connected: Option<bool>,
}

/// Removes `node` from a snapshot and probes connectivity between the two
/// lowest remaining node ids.
pub fn simulate_node_failure(
    graph: &NetworkGraph,
    node: NodeId,
) -> Result<FailureOutcome, GraphError> {
    if !graph.has_node(node) {
        return Err(GraphError::NodeNotFound(node));
    }

    let mut snapshot = graph.snapshot();
    snapshot.remove_node(node);
    log::debug!(
        "simulated failure of node {node}: {} nodes remain",
        snapshot.node_count()
    );

    let mut ids = snapshot.node_ids();
    ids.sort_unstable();
    let still_connected = match ids.as_slice() {
        [first, second, ..] => Some(probe(&snapshot, *first, *second)),
        _ => None,
    };

    Ok(FailureOutcome {
        snapshot,
        still_connected,
    })
}

/// Removes the edge `from -> to` from a snapshot and probes whether `from`
/// can still reach `to`.
pub fn simulate_edge_failure(
    graph: &NetworkGraph,
    from: NodeId,
    to: NodeId,
) -> Result<FailureOutcome, GraphError> {
    if !graph.has_node(from) {
        return Err(GraphError::NodeNotFound(from));
    }
    if !graph.has_node(to) {
        return Err(GraphError::NodeNotFound(to));
    }

    let mut snapshot = graph.snapshot();
    if !snapshot.remove_edge(from, to) {
        return Err(GraphError::EdgeNotFound { from, to });
    }
    log::debug!("simulated failure of edge {from} -> {to}");

    let still_connected = Some(probe(&snapshot, from, to));
    Ok(FailureOutcome {
        snapshot,
        still_connected,
    })
}

/// Counts how many of the test routes connect, skipping routes whose
/// endpoints are absent. Returns `(successful, attempted)`.
pub fn analyze_connectivity(graph: &NetworkGraph, test_routes: &[(NodeId, NodeId)]) -> (usize, usize) {
    let mut successful = 0;
    let mut attempted = 0;
    for &(start, end) in test_routes {
        if graph.has_node(start) && graph.has_node(end) {
            attempted += 1;
            if probe(graph, start, end) {
                successful += 1;
            }
        }
    }
    (successful, attempted)
}

fn probe(graph: &NetworkGraph, start: NodeId, end: NodeId) -> bool {
    DijkstraFinder::new(Strategy::Uniform, false)
        .find_path(graph, start, end)
        .success
}
