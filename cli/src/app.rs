use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use edge_priority_core::TieBreak;

use crate::config::DEFAULT_PER_LINE;

/// edge-priority - rank graph nodes by greedy highest-degree elimination
#[derive(Debug, Parser)]
#[command(name = "edge-priority", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// The two input files every command reads.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Node list, one name per line. If the file does not exist, nodes are
    /// taken from the edge endpoints.
    #[arg(value_name = "NODE_FILE")]
    pub node_file: PathBuf,

    /// Edge list, one `A,B` pair per line (.txt or .csv).
    #[arg(value_name = "EDGE_FILE")]
    pub edge_file: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Eliminate nodes highest-degree first and print the order.
    Rank {
        #[command(flatten)]
        input: InputArgs,

        /// Break degree ties toward the highest name (and most touches).
        /// Accepts a bare flag or --high=true / --high=false.
        #[arg(
            long,
            action = ArgAction::Set,
            num_args = 0..=1,
            require_equals = true,
            default_value = "false",
            default_missing_value = "true",
            value_parser = BoolishValueParser::new(),
            value_name = "BOOL"
        )]
        high: bool,

        /// Secondary key used when degrees tie.
        #[arg(long, value_enum, default_value_t = TieBreakArg::Lexical)]
        tie_break: TieBreakArg,

        /// Number of names per output line.
        #[arg(short = 'n', long, default_value_t = DEFAULT_PER_LINE)]
        per_line: usize,

        /// Also write the order to this file, one name per line.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print degree and touch count for every step.
        #[arg(long)]
        steps: bool,
    },

    /// Show current node degrees without eliminating anything.
    Degrees {
        #[command(flatten)]
        input: InputArgs,

        /// Number of nodes to show (0 for all).
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Node name only.
    Lexical,
    /// Fewest edges already lost to removed neighbors, then node name.
    LeastTouched,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Lexical => TieBreak::Lexical,
            TieBreakArg::LeastTouched => TieBreak::LeastTouched,
        }
    }
}
