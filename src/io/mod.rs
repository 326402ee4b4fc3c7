//! Line-oriented graph ingestion.
//!
//! Accepts the common edge-list format: one `from to [weight]` triple per
//! line, whitespace, tab, or comma delimited. Lines starting with `#`,
//! `%`, or `/` are comments; blank lines are skipped; a UTF-8 BOM on the
//! first line is stripped. Malformed lines are counted, logged, and
//! skipped rather than failing the whole load.

use crate::graph::{NetworkGraph, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Failure to read a graph file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O failure (missing file, permission, read error).
    #[error("failed to read graph: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStats {
    /// Edges successfully added.
    pub edges_loaded: usize,
    /// Malformed lines skipped.
    pub skipped: usize,
    /// Largest node id seen, `None` for an empty file.
    pub max_node_id: Option<NodeId>,
}

/// Loads a graph from an edge-list file.
///
/// The graph is named after the file stem.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<(NetworkGraph, LoadStats), LoadError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    let reader = BufReader::new(File::open(path)?);
    read_graph(reader, &name)
}

/// Reads a graph from any buffered source.
///
/// # Examples
///
/// ```
/// use netroute::io::read_graph;
///
/// let data = "# demo\n0 1 2.5\n1 2\n";
/// let (graph, stats) = read_graph(data.as_bytes(), "demo").unwrap();
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(stats.edges_loaded, 2);
/// ```
pub fn read_graph<R: BufRead>(reader: R, name: &str) -> Result<(NetworkGraph, LoadStats), LoadError> {
    let mut graph = NetworkGraph::new(name);
    let mut stats = LoadStats::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = if line_no == 0 {
            line.trim_start_matches('\u{feff}')
        } else {
            line.as_str()
        };
        let line = line.trim();

        if line.is_empty() || line.starts_with(['#', '%', '/']) {
            continue;
        }

        let normalized = line.replace(['\t', ','], " ");
        match parse_edge(&normalized) {
            Some((from, to, weight)) => {
                graph.add_edge_weighted(from, to, weight);
                stats.edges_loaded += 1;
                let largest = from.max(to);
                stats.max_node_id = Some(stats.max_node_id.map_or(largest, |m| m.max(largest)));
            }
            None => {
                stats.skipped += 1;
                log::warn!("{name}: skipping malformed line {}: {line:?}", line_no + 1);
            }
        }
    }

    log::debug!(
        "{name}: loaded {} edges, skipped {}, {}",
        stats.edges_loaded,
        stats.skipped,
        graph.info()
    );
    Ok((graph, stats))
}

/// Parses `from to [weight]`; extra trailing tokens are ignored.
fn parse_edge(line: &str) -> Option<(NodeId, NodeId, f64)> {
    let mut tokens = line.split_whitespace();
    let from: NodeId = tokens.next()?.parse().ok()?;
    let to: NodeId = tokens.next()?.parse().ok()?;
    let weight = match tokens.next() {
        Some(token) => token.parse().ok()?,
        None => 1.0,
    };
    Some((from, to, weight))
}
