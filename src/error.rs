//! Error taxonomy shared by the search, optimization, and flow layers.
//!
//! Every public operation reports failure through the `error` field of its
//! result record ([`PathResult`](crate::search::PathResult) or
//! [`FlowResult`](crate::flow::FlowResult)) rather than by panicking, so
//! callers branch on `success` and read a typed error.
//!
//! Edge-attribute lookups return [`GraphError`] directly; the search layer
//! matches on [`GraphError::EdgeNotFound`] / [`GraphError::NodeNotFound`]
//! and substitutes a uniform fallback weight, keeping searches alive on
//! partially specified graphs. Endpoint and size checks are hard failures.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors produced by graph lookups, searches, optimizers, and flow solvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphError {
    /// A referenced node is not present in the graph's node set.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// The source node exists but carries no edge to the target.
    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: NodeId, to: NodeId },

    /// Both endpoints exist but no connecting path does.
    #[error("no path from {start} to {end}")]
    PathNotFound { start: NodeId, end: NodeId },

    /// The exact search popped more frontier nodes than its budget allows.
    ///
    /// Distinct from [`GraphError::PathNotFound`]: the path may exist but
    /// was not reachable within the expansion budget.
    #[error("search budget exceeded after {expanded} node expansions")]
    SearchBudgetExceeded { expanded: usize },

    /// The graph exceeds the node-count ceiling for exact search.
    #[error("graph too large for exact search: {nodes} nodes (limit {limit})")]
    GraphTooLarge { nodes: usize, limit: usize },

    /// The predecessor chain from goal to start did not terminate.
    #[error("path reconstruction failed")]
    PathReconstructionFailed,

    /// An unexpected internal fault (numeric or panic at a worker boundary).
    #[error("algorithm internal error: {0}")]
    Internal(String),
}
