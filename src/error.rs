//! Error types for startup and level loading.
//!
//! Only configuration problems surface as errors.  Missing assets, degenerate
//! ray maths and out-of-grid lookups are handled inline by the systems that
//! meet them and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid level index {index} ({available} level(s) available)")]
    InvalidLevelIndex { index: usize, available: usize },

    #[error("level grid is empty")]
    EmptyGrid,

    #[error("level grid is not rectangular: row {row} has {actual} cells, expected {expected}")]
    NonRectangularGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("border cell ({col}, {row}) must be a wall")]
    OpenBorder { col: usize, row: usize },

    #[error("unknown tile code {code} at ({col}, {row})")]
    UnknownTile { code: u8, col: usize, row: usize },

    #[error("unknown sprite kind code {0}")]
    UnknownSpriteKind(u8),

    #[error("sprite {index} starts with zero health")]
    ZeroSpriteHealth { index: usize },

    #[error("player spawn ({x:.2}, {y:.2}) is inside a blocking cell")]
    SpawnInWall { x: f64, y: f64 },

    #[error("invalid config value for `{name}`: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
