//! Algorithm comparison and result export.
//!
//! Runs the standard algorithm roster over a set of test routes and
//! collects one [`ComparisonRecord`] per algorithm per route. Records
//! render to a fixed-width table for humans or a delimited form (CSV/TSV)
//! for files.

use crate::aco::{AcoConfig, AcoRunner};
use crate::ga::{GaConfig, GaRunner};
use crate::graph::{NetworkGraph, NodeId};
use crate::presets::StrategyPreset;
use crate::search::{AStarFinder, DijkstraFinder, PathFinder, PathResult};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Whether an algorithm guarantees optimality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmCategory {
    /// Optimal under the chosen weighting (Dijkstra, A*).
    Exact,
    /// Best-effort metaheuristic (GA, ACO).
    Heuristic,
}

impl AlgorithmCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Heuristic => "heuristic",
        }
    }
}

/// One algorithm's outcome on one route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRecord {
    /// Algorithm label, including the weighting strategy.
    pub algorithm: String,
    /// Exact or heuristic.
    pub category: AlgorithmCategory,
    /// Whether a path was found.
    pub success: bool,
    /// Total path cost (0 when unsuccessful).
    pub path_cost: f64,
    /// Number of nodes in the path (0 when unsuccessful).
    pub path_length: usize,
    /// Wall-clock time of the query.
    pub execution_time_ms: f64,
}

impl ComparisonRecord {
    /// Builds a record from a path query result.
    pub fn from_result(result: &PathResult, category: AlgorithmCategory) -> Self {
        Self {
            algorithm: result.algorithm.clone(),
            category,
            success: result.success,
            path_cost: if result.success { result.total_cost } else { 0.0 },
            path_length: result.path.len(),
            execution_time_ms: result.execution_time_ms,
        }
    }
}

/// Runs the four exact variants (Dijkstra and A*, uniform and weighted)
/// over every test route.
pub fn compare_exact(
    graph: &NetworkGraph,
    test_routes: &[(NodeId, NodeId)],
    preset: &StrategyPreset,
) -> Vec<ComparisonRecord> {
    let finders: Vec<Box<dyn PathFinder>> = vec![
        Box::new(DijkstraFinder::new(preset.exact_uniform, false)),
        Box::new(DijkstraFinder::new(preset.exact_weighted, true)),
        Box::new(AStarFinder::new(preset.exact_uniform, false)),
        Box::new(AStarFinder::new(preset.exact_weighted, true)),
    ];

    let mut records = Vec::with_capacity(finders.len() * test_routes.len());
    for &(start, end) in test_routes {
        log::debug!("comparing exact algorithms on route {start} -> {end}");
        for finder in &finders {
            let result = finder.find_path(graph, start, end);
            records.push(ComparisonRecord::from_result(
                &result,
                AlgorithmCategory::Exact,
            ));
        }
    }
    records
}

/// Runs the exact roster plus both metaheuristics over every test route.
pub fn compare_all(
    graph: &NetworkGraph,
    test_routes: &[(NodeId, NodeId)],
    preset: &StrategyPreset,
) -> Vec<ComparisonRecord> {
    let mut records = compare_exact(graph, test_routes, preset);

    for &(start, end) in test_routes {
        log::debug!("comparing metaheuristics on route {start} -> {end}");
        let mut ga = GaRunner::new(GaConfig::balanced(), preset.genetic);
        let result = ga.optimize(graph, start, end);
        records.push(ComparisonRecord::from_result(
            &result,
            AlgorithmCategory::Heuristic,
        ));

        let mut aco = AcoRunner::new(AcoConfig::balanced(), preset.ant_colony);
        let result = aco.optimize(graph, start, end);
        records.push(ComparisonRecord::from_result(
            &result,
            AlgorithmCategory::Heuristic,
        ));
    }
    records
}

/// Serializes records with the given separator (`,` for CSV, `\t` for TSV),
/// header included.
pub fn to_delimited(records: &[ComparisonRecord], separator: char) -> String {
    let mut out = String::new();
    let header = ["Algorithm", "Category", "Success", "Cost", "Length", "Time(ms)"];
    let _ = writeln!(out, "{}", header.join(&separator.to_string()));
    for record in records {
        let _ = writeln!(
            out,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            record.algorithm,
            record.category.label(),
            record.success,
            record.path_cost,
            record.path_length,
            record.execution_time_ms,
            sep = separator,
        );
    }
    out
}

/// Renders a fixed-width summary table.
pub fn render_table(records: &[ComparisonRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<42} {:>9} {:>6} {:>12} {:>8} {:>10}",
        "Algorithm", "Category", "Result", "Cost", "Length", "Time(ms)"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));
    for record in records {
        let _ = writeln!(
            out,
            "{:<42} {:>9} {:>6} {:>12.2} {:>8} {:>10.1}",
            record.algorithm,
            record.category.label(),
            if record.success { "OK" } else { "FAIL" },
            record.path_cost,
            record.path_length,
            record.execution_time_ms,
        );
    }
    out
}

/// Writes the delimited form to a file.
pub fn save_results<P: AsRef<Path>>(
    path: P,
    records: &[ComparisonRecord],
    separator: char,
) -> std::io::Result<()> {
    fs::write(&path, to_delimited(records, separator))?;
    log::debug!(
        "saved {} comparison records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}
