use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use edge_priority_core::{Edge, Graph, GraphError};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: expected `A,B`, found {fields} field(s)", .path.display())]
    MalformedEdge {
        path: PathBuf,
        line: usize,
        fields: usize,
    },
    #[error("{}:{line}: invalid edge", .path.display())]
    InvalidEdge {
        path: PathBuf,
        line: usize,
        #[source]
        source: GraphError,
    },
}

/// What the loader saw while building the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub nodes: usize,
    pub edges: usize,
    /// Edge lines that repeated an earlier pair, in either order.
    pub duplicate_edges: usize,
    /// `A,A` lines, skipped.
    pub self_loops: usize,
    /// Edge endpoints missing from the node file.
    pub foreign_nodes: usize,
    /// True when the node set came from edge endpoints.
    pub derived_nodes: bool,
    pub load_time_ms: f64,
}

/// Edges parsed from one file.
#[derive(Debug, Default)]
pub struct ParsedEdges {
    pub edges: Vec<Edge>,
    pub self_loops: usize,
}

/// Load the node and edge files into a graph.
pub fn load_graph(node_file: &Path, edge_file: &Path) -> Result<(Graph, LoadStats), LoadError> {
    let start = Instant::now();

    let nodes = read_nodes(node_file)?;
    let parsed = read_edges(edge_file)?;

    let derived_nodes = nodes.is_empty();
    if derived_nodes {
        info!("no nodes listed; deriving node set from edge endpoints");
    }

    let edge_lines = parsed.edges.len();
    let graph = Graph::from_parts(nodes, parsed.edges);

    let foreign = graph.foreign_nodes();
    if !foreign.is_empty() {
        warn!(
            "{} edge endpoint(s) missing from the node list, excluded from ranking: {}",
            foreign.len(),
            preview(&foreign, 5)
        );
    }

    let stats = LoadStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        duplicate_edges: edge_lines - graph.edge_count(),
        self_loops: parsed.self_loops,
        foreign_nodes: foreign.len(),
        derived_nodes,
        load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    info!(
        "loaded {} nodes, {} edges ({} duplicate, {} self-loop) in {:.1}ms",
        stats.nodes, stats.edges, stats.duplicate_edges, stats.self_loops, stats.load_time_ms
    );

    Ok((graph, stats))
}

// ---------------------------------------------------------------------------
// Node file
// ---------------------------------------------------------------------------

/// Read a node file. A file that does not exist yields an empty list.
pub fn read_nodes(path: &Path) -> Result<Vec<String>, LoadError> {
    match read_optional(path)? {
        Some(text) => Ok(parse_nodes(&text)),
        None => Ok(Vec::new()),
    }
}

/// One name per line, trimmed. Blank lines and `#` comments are skipped and
/// repeated names collapse.
pub fn parse_nodes(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    content_lines(text)
        .filter(|(_, line)| seen.insert(*line))
        .map(|(_, line)| line.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Edge file
// ---------------------------------------------------------------------------

/// Read an edge file. A file that does not exist yields no edges.
pub fn read_edges(path: &Path) -> Result<ParsedEdges, LoadError> {
    match read_optional(path)? {
        Some(text) => parse_edges(&text, path),
        None => Ok(ParsedEdges::default()),
    }
}

/// One `A,B` pair per line. Duplicates are kept here; the graph collapses
/// them. `A,A` lines are skipped with a warning.
pub fn parse_edges(text: &str, path: &Path) -> Result<ParsedEdges, LoadError> {
    let mut parsed = ParsedEdges::default();

    for (line_no, line) in content_lines(text) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [a, b] = fields.as_slice() else {
            return Err(LoadError::MalformedEdge {
                path: path.to_path_buf(),
                line: line_no,
                fields: fields.len(),
            });
        };

        match Edge::new(*a, *b) {
            Ok(edge) => parsed.edges.push(edge),
            Err(GraphError::SelfLoop(node)) => {
                warn!("{}:{}: skipping self-loop on '{}'", path.display(), line_no, node);
                parsed.self_loops += 1;
            }
            Err(source) => {
                return Err(LoadError::InvalidEdge {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                });
            }
        }
    }

    debug!("{}: parsed {} edge lines", path.display(), parsed.edges.len());
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    if !path.exists() {
        warn!("'{}' does not exist, treating it as empty", path.display());
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Trimmed non-empty, non-comment lines with 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn preview(names: &[&str], limit: usize) -> String {
    let mut shown = names[..names.len().min(limit)].join(", ");
    if names.len() > limit {
        shown.push_str(&format!(", ... ({} more)", names.len() - limit));
    }
    shown
}
