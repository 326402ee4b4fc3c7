//! Network flow solvers.
//!
//! Edges carry an integral capacity derived from the stored scalar weight
//! (the `cost` attribute, truncated) and a per-unit transport cost (the
//! `latency` attribute). Two solvers operate on the shared residual
//! network: FIFO push-relabel for maximum flow and successive shortest
//! augmenting paths for minimum-cost maximum flow.

mod max_flow;
mod min_cost;

use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use std::collections::HashMap;
use std::time::Instant;

/// Outcome of a flow computation.
///
/// Like [`PathResult`](crate::search::PathResult), failures are reported in
/// the record rather than panicking: `success` is false and `error` names
/// the cause.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowResult {
    /// Whether the computation completed.
    pub success: bool,
    /// Total flow pushed from source to sink.
    pub max_flow: i64,
    /// Total transport cost of the flow (zero for plain max-flow).
    pub flow_cost: f64,
    /// Positive flow per directed edge, keyed by `(from, to)`.
    pub flow_per_edge: HashMap<(NodeId, NodeId), i64>,
    /// Label of the algorithm that produced this result.
    pub algorithm: String,
    /// Wall-clock time of the computation.
    pub execution_time_ms: f64,
    /// Failure cause when `success` is false.
    pub error: Option<GraphError>,
}

impl FlowResult {
    fn completed(algorithm: &str, max_flow: i64, flow_cost: f64) -> Self {
        Self {
            success: true,
            max_flow,
            flow_cost,
            flow_per_edge: HashMap::new(),
            algorithm: algorithm.to_string(),
            execution_time_ms: 0.0,
            error: None,
        }
    }

    fn failed(algorithm: &str, error: GraphError) -> Self {
        Self {
            success: false,
            max_flow: 0,
            flow_cost: 0.0,
            flow_per_edge: HashMap::new(),
            algorithm: algorithm.to_string(),
            execution_time_ms: 0.0,
            error: Some(error),
        }
    }

    fn with_edges(mut self, flow_per_edge: HashMap<(NodeId, NodeId), i64>) -> Self {
        self.flow_per_edge = flow_per_edge;
        self
    }

    fn with_time_ms(mut self, ms: f64) -> Self {
        self.execution_time_ms = ms;
        self
    }
}

/// Computes flows over a [`NetworkGraph`].
pub trait FlowSolver: Send + Sync {
    /// Maximum flow from `source` to `sink`.
    fn solve_max_flow(&self, graph: &NetworkGraph, source: NodeId, sink: NodeId) -> FlowResult;

    /// Maximum flow at minimum total transport cost.
    fn solve_min_cost_max_flow(
        &self,
        graph: &NetworkGraph,
        source: NodeId,
        sink: NodeId,
    ) -> FlowResult;
}

/// The default solver pairing push-relabel with successive shortest paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetFlowSolver;

impl NetFlowSolver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }

    fn guard(
        algorithm: &str,
        graph: &NetworkGraph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<(), Box<FlowResult>> {
        if !graph.has_node(source) {
            return Err(Box::new(FlowResult::failed(
                algorithm,
                GraphError::NodeNotFound(source),
            )));
        }
        if !graph.has_node(sink) {
            return Err(Box::new(FlowResult::failed(
                algorithm,
                GraphError::NodeNotFound(sink),
            )));
        }
        Ok(())
    }
}

impl FlowSolver for NetFlowSolver {
    fn solve_max_flow(&self, graph: &NetworkGraph, source: NodeId, sink: NodeId) -> FlowResult {
        let started = Instant::now();
        let algorithm = "Max-Flow (Push-Relabel)";
        if let Err(failure) = Self::guard(algorithm, graph, source, sink) {
            return *failure;
        }
        if source == sink {
            return FlowResult::completed(algorithm, 0, 0.0)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let mut net = ResidualNetwork::build(graph);
        let s = net.index_of[&source];
        let t = net.index_of[&sink];
        let max_flow = max_flow::push_relabel(&mut net, s, t);

        log::debug!("max-flow {source} -> {sink}: value={max_flow}");
        FlowResult::completed(algorithm, max_flow, 0.0)
            .with_edges(net.positive_flows())
            .with_time_ms(started.elapsed().as_secs_f64() * 1000.0)
    }

    fn solve_min_cost_max_flow(
        &self,
        graph: &NetworkGraph,
        source: NodeId,
        sink: NodeId,
    ) -> FlowResult {
        let started = Instant::now();
        let algorithm = "Min-Cost Max-Flow (Successive Shortest Paths)";
        if let Err(failure) = Self::guard(algorithm, graph, source, sink) {
            return *failure;
        }
        if source == sink {
            return FlowResult::completed(algorithm, 0, 0.0)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let mut net = ResidualNetwork::build(graph);
        let s = net.index_of[&source];
        let t = net.index_of[&sink];
        let (max_flow, flow_cost) = min_cost::min_cost_max_flow(&mut net, s, t);

        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        if !flow_cost.is_finite() {
            return FlowResult::failed(
                algorithm,
                GraphError::Internal("non-finite flow cost".to_string()),
            )
            .with_time_ms(elapsed);
        }

        log::debug!("min-cost max-flow {source} -> {sink}: value={max_flow}, cost={flow_cost}");
        FlowResult::completed(algorithm, max_flow, flow_cost)
            .with_edges(net.positive_flows())
            .with_time_ms(elapsed)
    }
}

/// Directed arc in the residual network. Arc `i ^ 1` is its reverse.
#[derive(Debug, Clone)]
pub(crate) struct Arc {
    pub to: usize,
    pub capacity: i64,
    pub cost: f64,
    pub flow: i64,
}

impl Arc {
    pub fn residual(&self) -> i64 {
        self.capacity - self.flow
    }
}

/// Indexed residual network with paired forward/reverse arcs.
///
/// Capacity per graph edge is the stored scalar weight truncated to an
/// integer (fallback 1 when the attributes cannot be read); per-unit cost
/// is the edge latency.
pub(crate) struct ResidualNetwork {
    pub ids: Vec<NodeId>,
    pub index_of: HashMap<NodeId, usize>,
    pub arcs: Vec<Arc>,
    pub outgoing: Vec<Vec<usize>>,
}

impl ResidualNetwork {
    pub fn build(graph: &NetworkGraph) -> Self {
        let mut ids = graph.node_ids();
        ids.sort_unstable();
        let index_of: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut net = Self {
            outgoing: vec![Vec::new(); ids.len()],
            arcs: Vec::new(),
            ids,
            index_of,
        };

        for &from in &net.ids.clone() {
            let u = net.index_of[&from];
            let mut neighbors = graph.neighbors(from);
            neighbors.sort_unstable();
            for to in neighbors {
                let v = net.index_of[&to];
                let (capacity, cost) = match graph.edge_attrs(from, to) {
                    Ok(attrs) => ((attrs.cost.trunc() as i64).max(0), attrs.latency),
                    Err(_) => (1, 1.0),
                };
                net.add_arc(u, v, capacity, cost);
            }
        }
        net
    }

    fn add_arc(&mut self, u: usize, v: usize, capacity: i64, cost: f64) {
        let forward = self.arcs.len();
        self.arcs.push(Arc {
            to: v,
            capacity,
            cost,
            flow: 0,
        });
        self.outgoing[u].push(forward);
        self.arcs.push(Arc {
            to: u,
            capacity: 0,
            cost: -cost,
            flow: 0,
        });
        self.outgoing[v].push(forward + 1);
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Source node of an arc (the target of its paired reverse arc).
    pub fn arc_source(&self, arc: usize) -> usize {
        self.arcs[arc ^ 1].to
    }

    /// Collects positive flow on forward arcs, keyed by original node ids.
    pub fn positive_flows(&self) -> HashMap<(NodeId, NodeId), i64> {
        let mut flows = HashMap::new();
        for (arc_idx, arc) in self.arcs.iter().enumerate() {
            if arc_idx % 2 == 0 && arc.flow > 0 {
                let from = self.ids[self.arc_source(arc_idx)];
                let to = self.ids[arc.to];
                *flows.entry((from, to)).or_insert(0) += arc.flow;
            }
        }
        flows
    }
}
