//! Multi-attribute network path and flow optimization engine.
//!
//! Provides a directed graph store with per-link quality attributes and a
//! roster of routing algorithms over it:
//!
//! - **Weight model**: composite edge weights under pluggable strategies
//!   (latency, bandwidth, load balance, cost, adaptive) — see [`weight`].
//! - **Exact search**: Dijkstra and A* with expansion budgets and graph
//!   size ceilings — see [`search`].
//! - **Genetic Algorithm (GA)**: population-based best-effort path
//!   optimization with path-repairing operators — see [`ga`].
//! - **Ant Colony Optimization (ACO)**: pheromone-trail construction with
//!   evaporation and quality-proportional deposits — see [`aco`].
//! - **Flow solvers**: push-relabel max-flow and successive-shortest-path
//!   min-cost max-flow — see [`flow`].
//! - **Dispatch**: a fixed worker pool running concurrent path queries
//!   over a shared read-only graph — see [`dispatch`].
//!
//! Around the core: edge-list ingestion ([`io`]), algorithm comparison and
//! export ([`report`]), sampled metrics with what-if failure simulation
//! ([`metrics`]), and per-scenario strategy bundles ([`presets`]).
//!
//! # Design
//!
//! Algorithms never panic across the public boundary: every query returns
//! a result record carrying `success` plus a typed [`error::GraphError`].
//! Metaheuristic runners own their RNG, so seeded runs are reproducible
//! and concurrent runners are independent. What-if analysis mutates
//! snapshots, never the live graph.

pub mod aco;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod ga;
pub mod graph;
pub mod io;
pub mod metrics;
pub mod optimize;
pub mod presets;
pub mod report;
pub mod search;
pub mod weight;
