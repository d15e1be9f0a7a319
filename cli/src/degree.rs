use anyhow::Context;
use edge_priority_core::{degree_ranking, DegreeResult};
use serde::Serialize;

use crate::app::{GlobalOptions, InputArgs};
use crate::load::{self, LoadStats};
use crate::output::{print_output, Align, TabWriter};

#[derive(Debug, Serialize)]
pub struct DegreeReport {
    pub load: LoadStats,
    pub nodes: Vec<DegreeResult>,
}

pub fn run(input: &InputArgs, top_n: usize, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (graph, stats) = load::load_graph(&input.node_file, &input.edge_file)
        .context("failed to load graph")?;

    let report = DegreeReport {
        nodes: degree_ranking(&graph, top_n),
        load: stats,
    };

    print_output(&report, opts, |r| {
        println!(
            "{} nodes, {} edges (showing {})",
            r.load.nodes,
            r.load.edges,
            r.nodes.len()
        );
        println!();

        let mut table = TabWriter::new(vec![
            ("node", Align::Left),
            ("degree", Align::Right),
            ("foreign", Align::Right),
        ]);
        for d in &r.nodes {
            table.row(vec![
                d.node.clone(),
                d.degree.to_string(),
                d.foreign_neighbors.to_string(),
            ]);
        }
        table.print();
    })
}
