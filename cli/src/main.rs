//! edge-priority: rank graph nodes by greedy highest-degree elimination.
//!
//! Reads a node list and an edge list from text files, runs the
//! elimination from edge-priority-core, and prints the order grouped per
//! line, as a step table, or as JSON.

mod app;
mod config;
mod degree;
mod load;
mod output;
mod rank;

use clap::Parser;

use crate::app::{Cli, Command};
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Info on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Rank {
            input,
            high,
            tie_break,
            per_line,
            output,
            steps,
        } => {
            let config = Config {
                output: output.clone(),
                prefer_high: *high,
                tie_break: (*tie_break).into(),
                per_line: *per_line,
                show_steps: *steps,
                ..Config::new(input.node_file.clone(), input.edge_file.clone())
            }
            .validate()?;
            rank::run(&config, &cli.global)
        }
        Command::Degrees { input, top } => degree::run(input, *top, &cli.global),
    }
}
