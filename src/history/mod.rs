//! Undo/redo history of full pixel snapshots.
//!
//! Each snapshot is a deep copy of the pixel mapping, so memory grows by
//! roughly `cells * size_of::<Pixel>()` per recorded action. Both stacks are
//! unbounded; long sessions on large grids should watch
//! [`HistoryManager::approximate_bytes`].

use crate::core::error::{Error, HistoryDirection};
use crate::core::types::{CellCoord, Result};
use crate::grid::{Grid, Pixel, PixelMap};

/// Immutable copy of a grid's pixels. Extent and resolution are not captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pixels: PixelMap,
}

impl Snapshot {
    pub fn capture(grid: &Grid) -> Self {
        Self {
            pixels: grid.pixels().clone(),
        }
    }

    pub fn pixels(&self) -> &PixelMap {
        &self.pixels
    }

    pub fn cell_count(&self) -> usize {
        self.pixels.len()
    }

    /// Rough heap footprint in bytes
    pub fn approximate_bytes(&self) -> usize {
        self.pixels.len() * (std::mem::size_of::<CellCoord>() + std::mem::size_of::<Pixel>())
    }

    fn into_pixels(self) -> PixelMap {
        self.pixels
    }
}

/// Undo and redo stacks
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the grid's current pixels. Call once per user action, before mutating.
    ///
    /// The redo stack is left alone, so redo history survives new actions.
    pub fn snapshot(&mut self, grid: &Grid) {
        self.undo_stack.push(Snapshot::capture(grid));
        log::debug!(
            "History snapshot ({} undo, {} redo)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
    }

    /// Restore the most recent snapshot, moving the current pixels onto the redo stack
    pub fn undo(&mut self, grid: &mut Grid) -> Result<()> {
        let snapshot = self
            .undo_stack
            .pop()
            .ok_or(Error::EmptyHistory(HistoryDirection::Undo))?;
        self.redo_stack.push(Snapshot::capture(grid));
        grid.replace_pixels(snapshot.into_pixels());
        Ok(())
    }

    /// Re-apply the most recently undone state
    pub fn redo(&mut self, grid: &mut Grid) -> Result<()> {
        let snapshot = self
            .redo_stack
            .pop()
            .ok_or(Error::EmptyHistory(HistoryDirection::Redo))?;
        self.undo_stack.push(Snapshot::capture(grid));
        grid.replace_pixels(snapshot.into_pixels());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Rough memory held by both stacks in bytes
    pub fn approximate_bytes(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(Snapshot::approximate_bytes)
            .sum()
    }
}
