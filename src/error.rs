//! Error types for maze construction, configuration and the game loop.

use thiserror::Error;

use crate::sim::WorldError;

/// Errors raised while building a maze or loading its configuration.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The grid must have at least one row and one column.
    #[error("invalid grid dimensions {rows}x{columns}: both must be at least 1")]
    InvalidGridDimensions { rows: usize, columns: usize },

    /// Generation was asked to start outside the grid.
    #[error("start cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    InvalidStartCell {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading the configuration file or player input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `MazeConfig`.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The built-in physics world rejected a call.
    #[error(transparent)]
    World(#[from] WorldError),
}
