use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Internal node identifier, assigned in interning order.
pub type NodeId = u32;

/// Maximum distinct node names a single graph can intern.
pub const MAX_NODES: usize = NodeId::MAX as usize;

/// Errors raised while constructing graph values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge endpoints must be distinct, got '{0}' on both sides")]
    SelfLoop(String),
    #[error("edge endpoint name is empty")]
    MissingEndpoint,
}

/// An undirected edge between two distinct named nodes.
///
/// Endpoints are stored in lexical order, so `A,B` and `B,A` compare and
/// hash as the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: String,
    high: String,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self, GraphError> {
        let (a, b) = (a.into(), b.into());
        if a.is_empty() || b.is_empty() {
            return Err(GraphError::MissingEndpoint);
        }
        match a.cmp(&b) {
            Ordering::Less => Ok(Self { low: a, high: b }),
            Ordering::Greater => Ok(Self { low: b, high: a }),
            Ordering::Equal => Err(GraphError::SelfLoop(a)),
        }
    }

    /// Both endpoints, lexically smaller first.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.low == node || self.high == node
    }
}

/// Whether an interned name belongs to the node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Referenced by an edge but never part of the node set.
    Foreign,
    /// In the node set and not yet removed.
    Live,
    Removed,
}

/// Undirected graph over string-named nodes.
///
/// Names are interned to `NodeId`s. Each node owns the set of its live
/// neighbors, so every edge appears in exactly two adjacency sets. Edges may
/// reference foreign nodes: those are interned so the edge can be stored,
/// but they never count as members of the node set.
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    membership: Vec<Membership>,
    adjacency: Vec<HashSet<NodeId>>,
    live_nodes: usize,
    live_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            index: HashMap::new(),
            membership: Vec::new(),
            adjacency: Vec::new(),
            live_nodes: 0,
            live_edges: 0,
        }
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            names: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            membership: Vec::with_capacity(node_count),
            adjacency: Vec::with_capacity(node_count),
            live_nodes: 0,
            live_edges: 0,
        }
    }

    /// Build a graph from a node set and an edge set.
    ///
    /// When `nodes` is empty the node set is every endpoint named by `edges`.
    /// Otherwise endpoints missing from `nodes` stay foreign.
    pub fn from_parts<N, S, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        let derive_nodes = graph.live_nodes == 0;
        graph.load_edges(edges);

        if derive_nodes {
            for id in 0..graph.names.len() {
                graph.membership[id] = Membership::Live;
            }
            graph.live_nodes = graph.names.len();
        }

        graph
    }

    fn intern(&mut self, name: String) -> NodeId {
        if let Some(&id) = self.index.get(&name) {
            return id;
        }
        assert!(
            self.names.len() < MAX_NODES,
            "edge-priority: exceeded maximum of {} distinct node names",
            MAX_NODES
        );
        let id = self.names.len() as NodeId;
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.membership.push(Membership::Foreign);
        self.adjacency.push(HashSet::new());
        id
    }

    /// Add a node to the node set. Adding a name twice is a no-op.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.intern(name.into());
        if self.membership[id as usize] != Membership::Live {
            self.membership[id as usize] = Membership::Live;
            self.live_nodes += 1;
        }
        id
    }

    /// Add an undirected edge. Returns false if the edge was already present.
    ///
    /// Endpoints that are not in the node set are interned as foreign.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        let (low, high) = edge.endpoints();
        let a = self.intern(low.to_string());
        let b = self.intern(high.to_string());
        let inserted = self.adjacency[a as usize].insert(b);
        if inserted {
            self.adjacency[b as usize].insert(a);
            self.live_edges += 1;
        }
        inserted
    }

    /// Bulk load edges. Returns how many were new.
    pub fn load_edges<I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = Edge>,
    {
        edges
            .into_iter()
            .filter(|edge| self.add_edge(edge))
            .count()
    }

    /// Look up the interned id of a node name (live, removed, or foreign).
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Resolve a NodeId back to its name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    pub(crate) fn name_of(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    pub fn membership(&self, id: NodeId) -> Option<Membership> {
        self.membership.get(id as usize).copied()
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.membership(id) == Some(Membership::Live)
    }

    /// Whether `name` is currently in the node set.
    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some_and(|id| self.is_live(id))
    }

    /// Live edge count of a node in the node set.
    ///
    /// Foreign and removed nodes have no degree. Edges to foreign nodes still
    /// count toward the degree of their live endpoint.
    pub fn degree(&self, name: &str) -> Option<usize> {
        self.id(name)
            .filter(|&id| self.is_live(id))
            .map(|id| self.degree_of(id))
    }

    pub fn degree_of(&self, id: NodeId) -> usize {
        self.adjacency.get(id as usize).map_or(0, |adj| adj.len())
    }

    /// Other endpoint of every live edge touching `name`, in lexical order.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let Some(id) = self.id(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self.neighbor_ids(id).map(|n| self.name_of(n)).collect();
        names.sort_unstable();
        names
    }

    pub fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(id as usize)
            .into_iter()
            .flat_map(|adj| adj.iter().copied())
    }

    /// Remove a node and every edge touching it. Returns false if the node
    /// was not in the node set.
    pub fn remove_node(&mut self, name: &str) -> bool {
        match self.id(name) {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let idx = id as usize;
        self.membership[idx] = Membership::Removed;
        self.live_nodes -= 1;

        let severed = std::mem::take(&mut self.adjacency[idx]);
        for &neighbor in &severed {
            self.adjacency[neighbor as usize].remove(&id);
        }
        self.live_edges -= severed.len();
        true
    }

    /// Ids of every node still in the node set, in interning order.
    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.membership
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Membership::Live)
            .map(|(id, _)| id as NodeId)
    }

    /// Names of every node still in the node set, in lexical order.
    pub fn nodes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.live_ids().map(|id| self.name_of(id)).collect();
        names.sort_unstable();
        names
    }

    /// Names referenced by edges that were never in the node set.
    pub fn foreign_nodes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .membership
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Membership::Foreign)
            .map(|(id, _)| self.names[id].as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn is_empty(&self) -> bool {
        self.live_nodes == 0
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names_mem: usize = self
            .names
            .iter()
            .map(|n| n.capacity() + size_of::<String>())
            .sum();
        let index_mem = self.index.len() * (size_of::<String>() + size_of::<NodeId>() + 16);
        let adjacency_mem: usize = self
            .adjacency
            .iter()
            .map(|adj| size_of::<HashSet<NodeId>>() + adj.capacity() * (size_of::<NodeId>() + 1))
            .sum();
        let membership_mem = self.membership.len() * size_of::<Membership>();

        names_mem + index_mem + adjacency_mem + membership_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: &str, b: &str) -> Edge {
        Edge::new(a, b).unwrap()
    }

    fn make_path(names: &[&str]) -> Graph {
        Graph::from_parts(
            names.iter().copied(),
            names.windows(2).map(|w| edge(w[0], w[1])),
        )
    }

    // --- Edge tests ---

    #[test]
    fn test_edge_reversed_pair_is_same_edge() {
        assert_eq!(edge("A", "B"), edge("B", "A"));
        assert_eq!(edge("B", "A").endpoints(), ("A", "B"));
    }

    #[test]
    fn test_edge_self_loop_rejected() {
        assert_eq!(Edge::new("A", "A"), Err(GraphError::SelfLoop("A".into())));
    }

    #[test]
    fn test_edge_empty_endpoint_rejected() {
        assert_eq!(Edge::new("", "A"), Err(GraphError::MissingEndpoint));
    }

    #[test]
    fn test_edge_contains() {
        let e = edge("X", "Y");
        assert!(e.contains("X"));
        assert!(e.contains("Y"));
        assert!(!e.contains("Z"));
    }

    // --- Construction tests ---

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut g = Graph::new();
        g.add_node("A");
        g.add_node("B");
        assert!(g.add_edge(&edge("A", "B")));
        assert!(!g.add_edge(&edge("B", "A")));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree("A"), Some(1));
    }

    #[test]
    fn test_duplicate_nodes_collapse() {
        let mut g = Graph::new();
        let first = g.add_node("A");
        let second = g.add_node("A");
        assert_eq!(first, second);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_load_edges_counts_new_only() {
        let mut g = Graph::new();
        let added = g.load_edges(vec![edge("A", "B"), edge("B", "A"), edge("B", "C")]);
        assert_eq!(added, 2);
    }

    #[test]
    fn test_from_parts_derives_nodes_from_edges() {
        let g = Graph::from_parts(Vec::<String>::new(), vec![edge("X", "Y"), edge("Y", "Z")]);
        assert_eq!(g.nodes(), vec!["X", "Y", "Z"]);
        assert!(g.foreign_nodes().is_empty());
    }

    #[test]
    fn test_from_parts_keeps_foreign_endpoints_out() {
        let g = Graph::from_parts(["A", "B"], vec![edge("A", "B"), edge("A", "X")]);
        assert_eq!(g.nodes(), vec!["A", "B"]);
        assert_eq!(g.foreign_nodes(), vec!["X"]);
        assert!(!g.contains("X"));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_isolated_node_has_zero_degree() {
        let g = Graph::from_parts(["A", "B", "Lonely"], vec![edge("A", "B")]);
        assert_eq!(g.degree("Lonely"), Some(0));
    }

    // --- Degree and neighbor queries ---

    #[test]
    fn test_degree_path() {
        let g = make_path(&["A", "B", "C"]);
        assert_eq!(g.degree("A"), Some(1));
        assert_eq!(g.degree("B"), Some(2));
        assert_eq!(g.degree("C"), Some(1));
    }

    #[test]
    fn test_degree_unknown_node() {
        let g = make_path(&["A", "B"]);
        assert_eq!(g.degree("nope"), None);
    }

    #[test]
    fn test_foreign_endpoint_excluded_from_degree() {
        let g = Graph::from_parts(["A"], vec![edge("A", "X")]);
        assert_eq!(g.degree("A"), Some(1));
        assert_eq!(g.degree("X"), None);
    }

    #[test]
    fn test_neighbors_sorted() {
        let g = Graph::from_parts(
            ["hub", "c", "a", "b"],
            vec![edge("hub", "c"), edge("hub", "a"), edge("b", "hub")],
        );
        assert_eq!(g.neighbors("hub"), vec!["a", "b", "c"]);
        assert_eq!(g.neighbors("a"), vec!["hub"]);
        assert!(g.neighbors("missing").is_empty());
    }

    // --- Removal ---

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut g = make_path(&["A", "B", "C"]);
        assert!(g.remove_node("B"));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree("A"), Some(0));
        assert_eq!(g.degree("C"), Some(0));
        assert_eq!(g.degree("B"), None);
        assert_eq!(g.membership(g.id("B").unwrap()), Some(Membership::Removed));
    }

    #[test]
    fn test_remove_absent_node_is_noop() {
        let mut g = make_path(&["A", "B"]);
        assert!(!g.remove_node("Z"));
        assert!(g.remove_node("A"));
        assert!(!g.remove_node("A"));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_foreign_node_is_noop() {
        let mut g = Graph::from_parts(["A"], vec![edge("A", "X")]);
        assert!(!g.remove_node("X"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_foreign_only_edges_survive_removal() {
        let mut g = Graph::from_parts(["A"], vec![edge("A", "X"), edge("X", "Y")]);
        assert!(g.remove_node("A"));
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_live_ids_skip_removed_and_foreign() {
        let mut g = Graph::from_parts(["A", "B"], vec![edge("A", "X")]);
        g.remove_node("A");
        let live: Vec<&str> = g.live_ids().map(|id| g.name_of(id)).collect();
        assert_eq!(live, vec!["B"]);
    }

    #[test]
    fn test_name_lookup() {
        let g = make_path(&["A", "B"]);
        let id = g.id("B").unwrap();
        assert_eq!(g.name(id), Some("B"));
        assert_eq!(g.name(999), None);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = make_path(&["A", "B", "C", "D"]);
        assert!(g.memory_usage() > 0);
    }
}
