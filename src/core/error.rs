//! Error types for palmpaint

use thiserror::Error;

/// Which history stack an undo/redo request drew from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cell ({row}, {col}) is outside the grid")]
    OutOfRange { row: usize, col: usize },

    #[error("Nothing to {0}")]
    EmptyHistory(HistoryDirection),

    #[error("Malformed pixel key {0:?}, expected \"row,col\"")]
    MalformedKey(String),

    #[error("Invalid grid dimensions: nx={nx}, ny={ny}, res={res}")]
    InvalidDimensions { nx: usize, ny: usize, res: f64 },

    #[error("Value {value} at ({row}, {col}) does not fit channel {channel}")]
    ChannelOverflow {
        channel: &'static str,
        row: usize,
        col: usize,
        value: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project error: {0}")]
    Project(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}
