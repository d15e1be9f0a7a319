//! edge-priority-core: greedy degree-based node elimination.
//!
//! Repeatedly removes the node with the most remaining edges from an
//! undirected graph until none remain, producing a deterministic ranking of
//! structural centrality. Ties are broken lexically or by how often a node
//! has already lost an edge to a removed neighbor.
//! No I/O here: loading, output and timing live in the CLI crate.

mod degree;
mod elimination;
mod graph;
mod policy;

pub use degree::{degree_ranking, DegreeResult};
pub use elimination::{eliminate, elimination_order, Elimination, EliminationStep, Eliminator};
pub use graph::{Edge, Graph, GraphError, Membership, NodeId, MAX_NODES};
pub use policy::{EliminationConfig, Selector, TieBreak};
