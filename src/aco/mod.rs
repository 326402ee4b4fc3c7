//! Ant colony optimization path optimizer.
//!
//! A swarm of ants walks the graph from start toward end, choosing each
//! hop probabilistically from pheromone intensity and a cost-derived
//! heuristic. Successful ants deposit pheromone proportional to path
//! quality, evaporation decays stale trails, and over iterations the
//! colony converges on low-cost routes.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: colony size, trail parameters, termination knobs
//! - [`AcoRunner`]: owns the RNG and pheromone state, executes the loop
//!
//! # References
//!
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod runner;

pub use config::AcoConfig;
pub use runner::AcoRunner;
