use std::path::{Path, PathBuf};

use edge_priority_core::{EliminationConfig, TieBreak};
use serde::Serialize;
use thiserror::Error;

/// Names per output line when `--per-line` is not given.
pub const DEFAULT_PER_LINE: usize = 10;

/// Upper bound for `--per-line`.
pub const MAX_PER_LINE: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("per-line display count must be between 1 and {max}, got {0}", max = MAX_PER_LINE)]
    PerLineOutOfRange(usize),
    #[error("output path '{}' is a directory", .0.display())]
    OutputIsDirectory(PathBuf),
    #[error("output path '{}' would overwrite an input file", .0.display())]
    OutputIsInput(PathBuf),
}

/// Everything a `rank` run needs, passed explicitly to the command and the
/// output writers.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub node_file: PathBuf,
    pub edge_file: PathBuf,
    pub output: Option<PathBuf>,
    pub prefer_high: bool,
    pub tie_break: TieBreak,
    pub per_line: usize,
    pub show_steps: bool,
}

impl Config {
    pub fn new(node_file: PathBuf, edge_file: PathBuf) -> Self {
        Self {
            node_file,
            edge_file,
            output: None,
            prefer_high: false,
            tie_break: TieBreak::Lexical,
            per_line: DEFAULT_PER_LINE,
            show_steps: false,
        }
    }

    /// Check ranges and path conflicts.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.per_line == 0 || self.per_line > MAX_PER_LINE {
            return Err(ConfigError::PerLineOutOfRange(self.per_line));
        }
        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(ConfigError::OutputIsDirectory(output.clone()));
            }
            if same_path(output, &self.node_file) || same_path(output, &self.edge_file) {
                return Err(ConfigError::OutputIsInput(output.clone()));
            }
        }
        Ok(self)
    }

    pub fn elimination(&self) -> EliminationConfig {
        EliminationConfig::new(self.prefer_high, self.tie_break)
    }
}

/// Whether two paths name the same file once `.`, `..` and symlinks are
/// resolved. A path whose parent directory does not exist only matches
/// itself literally.
fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Canonical form of `path`. The file may be missing; its parent may not.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(name))
}
