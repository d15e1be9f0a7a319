use std::cmp::Ordering;

use serde::Serialize;

use crate::graph::{Graph, NodeId};

/// How nodes of equal degree are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Node name only.
    #[default]
    Lexical,
    /// Touch count first, then node name.
    LeastTouched,
}

/// Flags controlling a single elimination run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EliminationConfig {
    /// Reverse every tie-break key: highest name first and, under
    /// `LeastTouched`, most-touched first. Never affects the degree key.
    pub prefer_high: bool,
    pub tie_break: TieBreak,
}

impl EliminationConfig {
    pub fn new(prefer_high: bool, tie_break: TieBreak) -> Self {
        Self {
            prefer_high,
            tie_break,
        }
    }
}

/// Chooses the next node to eliminate.
///
/// The primary key is always the current degree, highest first. Ties fall
/// through to the touch count (least-touched mode only) and then the node
/// name. `prefer_high` flips the direction of both tie-break keys together.
///
/// Touch counts record, per node, how many of its edges were severed by the
/// removal of a neighbor. They only grow over a run.
pub struct Selector {
    config: EliminationConfig,
    touched: Vec<u32>,
}

impl Selector {
    pub fn new(graph: &Graph, config: EliminationConfig) -> Self {
        let touched = match config.tie_break {
            TieBreak::Lexical => Vec::new(),
            TieBreak::LeastTouched => {
                let slots = graph.live_ids().map(|id| id as usize + 1).max().unwrap_or(0);
                vec![0; slots]
            }
        };
        Self { config, touched }
    }

    pub fn config(&self) -> EliminationConfig {
        self.config
    }

    /// Severed-edge count for a node. Always 0 in lexical mode.
    pub fn touched(&self, id: NodeId) -> u32 {
        self.touched.get(id as usize).copied().unwrap_or(0)
    }

    /// Ordering of `a` relative to `b`: `Greater` means `a` is eliminated first.
    pub fn compare(&self, graph: &Graph, a: NodeId, b: NodeId) -> Ordering {
        let by_degree = graph.degree_of(a).cmp(&graph.degree_of(b));

        let by_touch = match self.config.tie_break {
            TieBreak::Lexical => Ordering::Equal,
            TieBreak::LeastTouched => self.touched(b).cmp(&self.touched(a)),
        };
        let by_name = graph.name_of(b).cmp(graph.name_of(a));
        let tie = by_touch.then(by_name);

        by_degree.then(if self.config.prefer_high {
            tie.reverse()
        } else {
            tie
        })
    }

    /// The node to eliminate next, or None once the node set is empty.
    ///
    /// Names are unique, so the comparison is a total order over live nodes
    /// and the result never depends on iteration order.
    pub fn select(&self, graph: &Graph) -> Option<NodeId> {
        graph
            .live_ids()
            .max_by(|&a, &b| self.compare(graph, a, b))
    }

    /// Apply the side effect of choosing `id`, before it leaves the graph.
    ///
    /// In least-touched mode every live neighbor gains one touch.
    pub fn record_selection(&mut self, graph: &Graph, id: NodeId) {
        if self.config.tie_break != TieBreak::LeastTouched {
            return;
        }
        for neighbor in graph.neighbor_ids(id) {
            if !graph.is_live(neighbor) {
                continue;
            }
            let slot = neighbor as usize;
            if slot >= self.touched.len() {
                self.touched.resize(slot + 1, 0);
            }
            self.touched[slot] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::from_parts(
            nodes.iter().copied(),
            edges.iter().map(|&(a, b)| Edge::new(a, b).unwrap()),
        )
    }

    fn selected(selector: &Selector, g: &Graph) -> String {
        let id = selector.select(g).unwrap();
        g.name(id).unwrap().to_string()
    }

    const LOW: EliminationConfig = EliminationConfig {
        prefer_high: false,
        tie_break: TieBreak::Lexical,
    };
    const HIGH: EliminationConfig = EliminationConfig {
        prefer_high: true,
        tie_break: TieBreak::Lexical,
    };
    const TOUCH_LOW: EliminationConfig = EliminationConfig {
        prefer_high: false,
        tie_break: TieBreak::LeastTouched,
    };
    const TOUCH_HIGH: EliminationConfig = EliminationConfig {
        prefer_high: true,
        tie_break: TieBreak::LeastTouched,
    };

    // --- Degree priority ---

    #[test]
    fn test_highest_degree_wins() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        assert_eq!(selected(&Selector::new(&g, LOW), &g), "B");
        assert_eq!(selected(&Selector::new(&g, HIGH), &g), "B");
    }

    #[test]
    fn test_lexical_tie_low() {
        let g = graph(&["C", "A", "B"], &[]);
        assert_eq!(selected(&Selector::new(&g, LOW), &g), "A");
    }

    #[test]
    fn test_lexical_tie_high() {
        let g = graph(&["C", "A", "B"], &[]);
        assert_eq!(selected(&Selector::new(&g, HIGH), &g), "C");
    }

    #[test]
    fn test_lexical_order_is_bytewise() {
        // Uppercase sorts before lowercase, "10" before "9".
        let g = graph(&["b", "B", "9", "10"], &[]);
        assert_eq!(selected(&Selector::new(&g, LOW), &g), "10");
        assert_eq!(selected(&Selector::new(&g, HIGH), &g), "b");
    }

    #[test]
    fn test_empty_graph_selects_nothing() {
        let g = Graph::new();
        assert!(Selector::new(&g, LOW).select(&g).is_none());
    }

    #[test]
    fn test_select_does_not_mutate() {
        let g = graph(&["A", "B"], &[("A", "B")]);
        let selector = Selector::new(&g, TOUCH_LOW);
        let first = selector.select(&g);
        assert_eq!(first, selector.select(&g));
        assert_eq!(g.node_count(), 2);
        assert_eq!(selector.touched(g.id("B").unwrap()), 0);
    }

    #[test]
    fn test_foreign_edge_counts_for_member_endpoint() {
        // B's edge to foreign X lifts it above A.
        let g = graph(&["A", "B"], &[("B", "X"), ("A", "B")]);
        let selector = Selector::new(&g, LOW);
        assert_eq!(selected(&selector, &g), "B");
    }

    #[test]
    fn test_foreign_node_never_selected() {
        let g = graph(&["A"], &[("X", "Y"), ("X", "Z"), ("A", "X")]);
        assert_eq!(selected(&Selector::new(&g, LOW), &g), "A");
    }

    // --- Least touched ---

    #[test]
    fn test_record_selection_touches_live_neighbors() {
        let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("A", "X")]);
        let mut selector = Selector::new(&g, TOUCH_LOW);
        let a = g.id("A").unwrap();
        selector.record_selection(&g, a);
        assert_eq!(selector.touched(g.id("B").unwrap()), 1);
        assert_eq!(selector.touched(g.id("C").unwrap()), 1);
        assert_eq!(selector.touched(g.id("D").unwrap()), 0);
        assert_eq!(selector.touched(g.id("X").unwrap()), 0);
    }

    #[test]
    fn test_record_selection_noop_in_lexical_mode() {
        let g = graph(&["A", "B"], &[("A", "B")]);
        let mut selector = Selector::new(&g, LOW);
        selector.record_selection(&g, g.id("A").unwrap());
        assert_eq!(selector.touched(g.id("B").unwrap()), 0);
    }

    #[test]
    fn test_least_touched_prefers_fewer_touches() {
        // Removing P touches A only; every node then has degree 1.
        let mut g = graph(&["A", "B", "C", "D", "P"], &[("P", "A"), ("B", "C"), ("A", "D")]);
        let mut selector = Selector::new(&g, TOUCH_LOW);
        let p = g.id("P").unwrap();
        selector.record_selection(&g, p);
        g.remove(p);

        assert_eq!(selected(&selector, &g), "B");
    }

    #[test]
    fn test_least_touched_high_prefers_more_touches() {
        let mut g = graph(&["A", "B", "C", "D", "P"], &[("P", "A"), ("A", "C"), ("B", "D")]);
        let mut selector = Selector::new(&g, TOUCH_HIGH);
        let p = g.id("P").unwrap();
        selector.record_selection(&g, p);
        g.remove(p);

        // A and B tie on degree; A was touched once so it goes first even
        // though high-name ordering alone would pick D.
        assert_eq!(selected(&selector, &g), "A");
    }

    #[test]
    fn test_touch_never_outranks_degree() {
        let mut g = graph(&["A", "B", "C", "P"], &[("P", "A"), ("A", "B"), ("A", "C")]);
        let mut selector = Selector::new(&g, TOUCH_LOW);
        let p = g.id("P").unwrap();
        selector.record_selection(&g, p);
        g.remove(p);

        assert_eq!(selector.touched(g.id("A").unwrap()), 1);
        assert_eq!(selected(&selector, &g), "A");
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let g = graph(&["A", "B", "C"], &[("A", "B")]);
        let selector = Selector::new(&g, LOW);
        let (a, c) = (g.id("A").unwrap(), g.id("C").unwrap());
        assert_eq!(selector.compare(&g, a, c), Ordering::Greater);
        assert_eq!(selector.compare(&g, c, a), Ordering::Less);
        assert_eq!(selector.compare(&g, a, a), Ordering::Equal);
    }
}
