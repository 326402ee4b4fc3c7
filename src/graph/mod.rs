//! Graph store: nodes, directed edges, and per-edge link attributes.
//!
//! [`NetworkGraph`] owns a node set and a nested adjacency map
//! `source → target → LinkAttributes`. Nodes exist independently of
//! adjacency (a node may have zero edges), and every node referenced by an
//! edge is auto-inserted into the node set on edge add.
//!
//! Edges are directed; callers model an undirected link as two directed
//! edges. [`NetworkGraph::snapshot`] produces an independent deep copy for
//! destructive what-if simulation so concurrent read-only queries never
//! observe partial mutation.

mod attrs;
mod store;

pub use attrs::LinkAttributes;
pub use store::NetworkGraph;

/// External node identifier.
///
/// Stable across mutation; algorithms map ids to dense indices internally.
pub type NodeId = i64;
