use edge_priority_core::{eliminate, Edge, EliminationConfig, Graph, TieBreak};
use std::time::Instant;

/// A named graph shape the benchmark can build at any size.
struct Workload {
    mode: &'static str,
    title: &'static str,
    build: fn(u64) -> Graph,
}

const WORKLOADS: &[Workload] = &[
    Workload {
        mode: "tree",
        title: "Ternary tree (uniform internal degree)",
        build: build_tree,
    },
    Workload {
        mode: "hubs",
        title: "Degree-weighted attachment (few large hubs)",
        build: build_hubs,
    },
    Workload {
        mode: "rings",
        title: "Equal rings (every node degree 2)",
        build: build_rings,
    },
];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: edge-priority-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all    Every workload below (default)");
        for w in WORKLOADS {
            println!("  {:<6} {}", w.mode, w.title);
        }
        println!();
        println!("Default node_count: 5000. Each step scans every remaining node.");
        return;
    }

    let selected: Vec<&Workload> = WORKLOADS
        .iter()
        .filter(|w| mode == "all" || w.mode == mode)
        .collect();
    if selected.is_empty() {
        eprintln!("Unknown mode: {}. Use --help for options.", mode);
        return;
    }

    println!("edge-priority-bench");
    println!("===================");
    println!();

    for workload in selected {
        run(workload, node_count);
    }
}

fn run(workload: &Workload, node_count: u64) {
    let graph = (workload.build)(node_count);
    println!("--- {} ---", workload.title);
    println!(
        "{} nodes, {} edges, ~{:.1}MB",
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();
    println!(
        "{:<14} {:>5} {:>10} {:>12}  first removed",
        "tie-break", "high", "elapsed", "steps/s"
    );

    for tie_break in [TieBreak::Lexical, TieBreak::LeastTouched] {
        for prefer_high in [false, true] {
            // Each run consumes its graph.
            let mut graph = (workload.build)(node_count);
            let start = Instant::now();
            let result = eliminate(&mut graph, &EliminationConfig::new(prefer_high, tie_break));
            let secs = start.elapsed().as_secs_f64();

            let head: Vec<String> = result
                .steps
                .iter()
                .take(4)
                .map(|s| format!("{}({})", s.node, s.degree))
                .collect();
            println!(
                "{:<14} {:>5} {:>8.1}ms {:>12.0}  {}",
                format!("{:?}", tie_break),
                prefer_high,
                secs * 1000.0,
                result.len() as f64 / secs.max(f64::EPSILON),
                head.join(" ")
            );
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Workloads
// ---------------------------------------------------------------------------

/// xorshift64*: deterministic across runs and platforms.
struct Xorshift(u64);

impl Xorshift {
    fn below(&mut self, bound: u64) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D) % bound
    }
}

/// Zero-padded so lexical order matches numeric order.
fn name(id: u64) -> String {
    format!("v{:07}", id)
}

fn link(graph: &mut Graph, a: u64, b: u64) {
    if let Ok(edge) = Edge::new(name(a), name(b)) {
        graph.add_edge(&edge);
    }
}

/// Complete ternary tree in heap layout: node `i` hangs off `(i - 1) / 3`.
///
/// Internal nodes below the root have degree 4 and leaves degree 1, so most
/// selection is decided by the tie-break.
fn build_tree(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    for id in 0..node_count {
        graph.add_node(name(id));
        if id > 0 {
            link(&mut graph, (id - 1) / 3, id);
        }
    }
    graph
}

/// Each new node links to 3 existing nodes picked in proportion to degree,
/// by sampling a uniformly random endpoint of all edges so far.
fn build_hubs(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = Xorshift(0x9E37_79B9_7F4A_7C15);
    let mut endpoints: Vec<u64> = Vec::new();

    for id in 0..node_count {
        graph.add_node(name(id));
        if id == 0 {
            continue;
        }
        for _ in 0..3 {
            let target = if endpoints.is_empty() {
                0
            } else {
                endpoints[rng.below(endpoints.len() as u64) as usize]
            };
            if target != id {
                link(&mut graph, id, target);
                endpoints.extend([id, target]);
            }
        }
    }
    graph
}

/// Disjoint rings of 8 nodes. Ring nodes start at degree 2, so the order
/// is driven entirely by the tie-break and by degrees dropping as rings open.
fn build_rings(node_count: u64) -> Graph {
    const RING: u64 = 8;
    let mut graph = Graph::with_capacity(node_count as usize);
    for id in 0..node_count {
        graph.add_node(name(id));
    }
    for base in (0..node_count).step_by(RING as usize) {
        let len = RING.min(node_count - base);
        if len < 3 {
            continue;
        }
        for offset in 0..len {
            link(&mut graph, base + offset, base + (offset + 1) % len);
        }
    }
    graph
}
