use std::time::Instant;

use anyhow::Context;
use edge_priority_core::{eliminate, EliminationStep};
use log::info;
use serde::Serialize;

use crate::app::GlobalOptions;
use crate::config::Config;
use crate::load::{self, LoadStats};
use crate::output::{grouped_lines, print_output, write_order, Align, TabWriter};

#[derive(Debug, Serialize)]
pub struct RankReport<'a> {
    pub config: &'a Config,
    pub load: LoadStats,
    pub order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<EliminationStep>>,
    /// Foreign-only edges still present after every node was removed.
    pub dangling_edges: usize,
    pub elapsed_ms: f64,
}

pub fn run(config: &Config, opts: &GlobalOptions) -> anyhow::Result<()> {
    let (mut graph, stats) = load::load_graph(&config.node_file, &config.edge_file)
        .context("failed to load graph")?;

    info!(
        "ranking {} nodes (high={}, tie-break={:?})",
        stats.nodes, config.prefer_high, config.tie_break
    );
    let start = Instant::now();
    let elimination = eliminate(&mut graph, &config.elimination());
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!("eliminated {} nodes in {:.1}ms", elimination.len(), elapsed_ms);

    if let Some(path) = &config.output {
        write_order(path, &elimination.order)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!("wrote order to {}", path.display());
    }

    let report = RankReport {
        config,
        load: stats,
        order: elimination.order,
        steps: config.show_steps.then_some(elimination.steps),
        dangling_edges: graph.edge_count(),
        elapsed_ms,
    };

    print_output(&report, opts, |r| display(r, config.per_line))
}

fn display(report: &RankReport<'_>, per_line: usize) {
    for line in grouped_lines(&report.order, per_line) {
        println!("{line}");
    }

    if let Some(steps) = &report.steps {
        println!();
        let mut table = TabWriter::new(vec![
            ("rank", Align::Right),
            ("node", Align::Left),
            ("degree", Align::Right),
            ("touched", Align::Right),
        ]);
        for step in steps {
            table.row(vec![
                step.rank.to_string(),
                step.node.clone(),
                step.degree.to_string(),
                step.touched.to_string(),
            ]);
        }
        table.print();
    }
}
