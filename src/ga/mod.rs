//! Genetic algorithm path optimizer.
//!
//! A population-based, best-effort alternative to exact search: each
//! chromosome is a candidate simple path from start to end with a cached
//! strategy-weighted cost as its fitness (lower is better).
//!
//! The evolutionary loop follows the classic recipe — elitism, two-way
//! tournament selection, single-point crossover with greedy bridging, and
//! three path-repairing mutation operators — with a global best that never
//! regresses across generations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, operator rates, termination knobs
//! - [`GaRunner`]: owns the RNG and executes the loop
//! - [`Chromosome`]: candidate path + cached fitness
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod chromosome;
mod config;
mod runner;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use runner::GaRunner;
