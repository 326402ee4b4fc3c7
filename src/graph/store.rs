//! The in-memory graph store.

use super::{LinkAttributes, NodeId};
use crate::error::GraphError;
use crate::weight::{composite_weight, Strategy};
use std::collections::{HashMap, HashSet};

/// A named directed graph with multi-attribute edges.
///
/// The node set is tracked independently of adjacency, so nodes without
/// edges are first-class. Mutation goes through `add_*`/`remove_*`; for
/// what-if analysis against a graph shared with in-flight queries, mutate a
/// [`snapshot`](NetworkGraph::snapshot) instead.
///
/// # Examples
///
/// ```
/// use netroute::graph::NetworkGraph;
/// use netroute::weight::Strategy;
///
/// let mut g = NetworkGraph::new("demo");
/// g.add_edge_weighted(0, 1, 2.0);
/// g.add_edge_weighted(1, 2, 3.0);
///
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_weight(0, 1, Strategy::MinimizeLatency).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    name: String,
    nodes: HashSet<NodeId>,
    adjacency: HashMap<NodeId, HashMap<NodeId, LinkAttributes>>,
}

impl NetworkGraph {
    /// Creates an empty graph with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: HashSet::new(),
            adjacency: HashMap::new(),
        }
    }

    /// The graph's name, as given at construction or load time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a node. Idempotent.
    pub fn add_node(&mut self, id: NodeId) {
        self.nodes.insert(id);
        self.adjacency.entry(id).or_default();
    }

    /// Inserts a node if absent. Alias of [`add_node`](Self::add_node),
    /// kept for call sites that want the intent spelled out.
    pub fn ensure_node(&mut self, id: NodeId) {
        self.add_node(id);
    }

    /// Adds a directed edge with full attributes, auto-inserting endpoints.
    ///
    /// An existing edge between the same endpoints is overwritten.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, attrs: LinkAttributes) {
        self.add_node(source);
        self.add_node(target);
        self.adjacency
            .get_mut(&source)
            .expect("source inserted above")
            .insert(target, attrs);
    }

    /// Adds a directed edge from a scalar weight
    /// (see [`LinkAttributes::from_weight`]).
    pub fn add_edge_weighted(&mut self, source: NodeId, target: NodeId, weight: f64) {
        self.add_edge(source, target, LinkAttributes::from_weight(weight));
    }

    /// Removes the edge `from -> to`. Returns `false` if it was absent.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        match self.adjacency.get_mut(&from) {
            Some(targets) => targets.remove(&to).is_some(),
            None => false,
        }
    }

    /// Removes a node together with all incident edges, outgoing and
    /// incoming. Returns `false` if the node was absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.remove(&id) {
            return false;
        }
        self.adjacency.remove(&id);
        for targets in self.adjacency.values_mut() {
            targets.remove(&id);
        }
        true
    }

    /// Whether the node exists in the node set.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Whether the directed edge `from -> to` exists.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|targets| targets.contains_key(&to))
    }

    /// Target ids of all outgoing edges of `id`, in no particular order.
    ///
    /// Empty for absent nodes and for nodes without outgoing edges.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        match self.adjacency.get(&id) {
            Some(targets) => targets.keys().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Attribute record of the edge `from -> to`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `from` is absent,
    /// [`GraphError::EdgeNotFound`] if the edge is absent.
    pub fn edge_attrs(&self, from: NodeId, to: NodeId) -> Result<&LinkAttributes, GraphError> {
        let targets = self
            .adjacency
            .get(&from)
            .ok_or(GraphError::NodeNotFound(from))?;
        targets
            .get(&to)
            .ok_or(GraphError::EdgeNotFound { from, to })
    }

    /// Strategy-selected scalar weight of the edge `from -> to`.
    ///
    /// # Errors
    /// Same as [`edge_attrs`](Self::edge_attrs).
    pub fn edge_weight(
        &self,
        from: NodeId,
        to: NodeId,
        strategy: Strategy,
    ) -> Result<f64, GraphError> {
        Ok(composite_weight(self.edge_attrs(from, to)?, strategy))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum()
    }

    /// All node ids, in no particular order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().copied().collect()
    }

    /// One-line summary: name plus node/edge counts.
    pub fn info(&self) -> String {
        format!(
            "{} (nodes={}, edges={})",
            self.name,
            self.node_count(),
            self.edge_count()
        )
    }

    /// Independent deep copy for destructive what-if simulation.
    ///
    /// Mutating the snapshot never affects this graph, and vice versa.
    pub fn snapshot(&self) -> NetworkGraph {
        self.clone()
    }
}
