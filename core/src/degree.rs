use serde::Serialize;

use crate::graph::Graph;

/// Current degree of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    pub node: String,
    pub degree: usize,
    /// Neighbors outside the node set, already included in `degree`.
    pub foreign_neighbors: usize,
}

/// Return live nodes ranked by current degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// degree (descending). Ties are broken by name (ascending).
pub fn degree_ranking(graph: &Graph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = graph
        .live_ids()
        .map(|id| DegreeResult {
            node: graph.name_of(id).to_string(),
            degree: graph.degree_of(id),
            foreign_neighbors: graph
                .neighbor_ids(id)
                .filter(|&n| !graph.is_live(n))
                .count(),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.node.cmp(&b.node)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
