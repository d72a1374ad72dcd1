use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected simulation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("a {width}x{height} grid has room for {cells} cells, need at least {required}")]
    GridTooSmall {
        width: u16,
        height: u16,
        cells: usize,
        required: usize,
    },

    #[error("exploration rate must lie in [0, 1], got {0}")]
    ExplorationRate(f64),

    #[error("auto-grow interval must be at least 1 tick")]
    AutoGrowInterval,

    #[error("speed must be a finite, non-negative number of seconds, got {0}")]
    Speed(f64),
}

/// Internal simulation failures. None of these are reachable from a
/// well-formed run; they signal a broken invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("no empty cell left to place a fruit")]
    NoEmptyCell,
}

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to parse config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
