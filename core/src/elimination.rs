use log::{debug, trace};
use serde::Serialize;

use crate::graph::{Edge, Graph};
use crate::policy::{EliminationConfig, Selector};

/// One node leaving the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminationStep {
    /// 1-based position in the elimination order.
    pub rank: usize,
    pub node: String,
    /// Live degree at the moment of selection.
    pub degree: usize,
    /// Touch count at the moment of selection (always 0 in lexical mode).
    pub touched: u32,
}

/// Result of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Elimination {
    pub order: Vec<String>,
    pub steps: Vec<EliminationStep>,
}

impl Elimination {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Drives an elimination run one step at a time.
///
/// Each call to `next` selects a node, applies the selector's side effect,
/// removes the node with its edges and yields the step. Iteration ends when
/// the node set is empty, after exactly as many steps as the graph had nodes.
pub struct Eliminator<'g> {
    graph: &'g mut Graph,
    selector: Selector,
    rank: usize,
}

impl<'g> Eliminator<'g> {
    pub fn new(graph: &'g mut Graph, config: EliminationConfig) -> Self {
        let selector = Selector::new(graph, config);
        Self {
            graph,
            selector,
            rank: 0,
        }
    }

    /// Nodes still waiting to be eliminated.
    pub fn remaining(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_done(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }
}

impl Iterator for Eliminator<'_> {
    type Item = EliminationStep;

    fn next(&mut self) -> Option<EliminationStep> {
        let id = self.selector.select(self.graph)?;
        let degree = self.graph.degree_of(id);
        let touched = self.selector.touched(id);

        // Touches read the neighbor list, so they must land before removal.
        self.selector.record_selection(self.graph, id);
        self.graph.remove(id);
        self.rank += 1;

        let step = EliminationStep {
            rank: self.rank,
            node: self.graph.name_of(id).to_string(),
            degree,
            touched,
        };
        trace!(
            "eliminated #{} {} (degree {}, touched {})",
            step.rank,
            step.node,
            step.degree,
            step.touched
        );
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Eliminator<'_> {}

/// Eliminate every node of `graph`, leaving it with an empty node set.
///
/// Edges between foreign nodes are never removed and stay in the graph.
pub fn eliminate(graph: &mut Graph, config: &EliminationConfig) -> Elimination {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let steps: Vec<EliminationStep> = Eliminator::new(graph, *config).collect();
    let order = steps.iter().map(|s| s.node.clone()).collect();

    debug!(
        "eliminated {} nodes ({} edges, {} left dangling) with {:?}",
        node_count,
        edge_count,
        graph.edge_count(),
        config
    );

    Elimination { order, steps }
}

/// Elimination order for a node set and edge set.
///
/// An empty `nodes` derives the node set from the edge endpoints.
pub fn elimination_order<N, S, E>(nodes: N, edges: E, config: &EliminationConfig) -> Vec<String>
where
    N: IntoIterator<Item = S>,
    S: Into<String>,
    E: IntoIterator<Item = Edge>,
{
    let mut graph = Graph::from_parts(nodes, edges);
    eliminate(&mut graph, config).order
}
