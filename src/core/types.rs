//! Core type aliases and shared value types

use serde::{Deserialize, Serialize};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// In-memory sentinel meaning "attribute not set"
pub const UNSET: i32 = -127;

/// Height sentinel as stored in a pixel record
pub const UNSET_HEIGHT: f64 = -127.0;

/// Integer grid position. Row 0 is the top row of the painted grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Geo-reference of the grid's lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    /// Latitude in degrees north
    pub latitude: f64,
    /// Longitude in degrees east
    pub longitude: f64,
    /// Projected x (m)
    pub x: f64,
    /// Projected y (m)
    pub y: f64,
    /// Grid rotation in degrees
    pub rotation_angle: f64,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            latitude: 52.50965,
            longitude: 13.3139,
            x: 3455249.0,
            y: 5424815.0,
            rotation_angle: 0.0,
        }
    }
}
