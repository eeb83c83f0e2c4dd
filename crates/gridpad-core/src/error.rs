//! Error types for Gridpad core.

use gridpad_engine::engine::MatrixError;
use thiserror::Error;

/// Errors that can occur while editing or persisting a grid
#[derive(Error, Debug)]
pub enum GridpadError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("No focused cell")]
    NoFocusedCell,

    #[error("Grid is {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GridpadError>;
