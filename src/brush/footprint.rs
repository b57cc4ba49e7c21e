//! Brush footprint: which cells one tool application touches

use crate::core::types::CellCoord;

/// A brush placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub center: CellCoord,
    /// Brush size in cells, expected odd
    pub size: u32,
}

impl Brush {
    pub fn new(center: CellCoord, size: u32) -> Self {
        Self { center, size }
    }

    /// Cells covered on an `nx` x `ny` grid
    pub fn cells(&self, nx: usize, ny: usize) -> Vec<CellCoord> {
        affected_cells(self.center.row, self.center.col, self.size, nx, ny)
    }
}

/// Cells affected by a brush of `size` centered on `(center_row, center_col)`.
///
/// Candidates span `±size/2` around the center, but the distance cut-off is
/// the full `size`, so in practice every in-bounds candidate of the square
/// window is kept for sizes up to 9. Returned in row-major order, no duplicates.
pub fn affected_cells(
    center_row: usize,
    center_col: usize,
    size: u32,
    nx: usize,
    ny: usize,
) -> Vec<CellCoord> {
    let half = (size / 2) as usize;
    let limit = size as f64;

    // Clip the candidate window to the grid before visiting it
    let rows = center_row.saturating_sub(half)..=center_row.saturating_add(half).min(ny.saturating_sub(1));
    let cols = center_col.saturating_sub(half)..=center_col.saturating_add(half).min(nx.saturating_sub(1));
    if nx == 0 || ny == 0 || rows.is_empty() || cols.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::with_capacity((rows.end() - rows.start() + 1) * (cols.end() - cols.start() + 1));
    for row in rows {
        let dr = row as f64 - center_row as f64;
        for col in cols.clone() {
            let dc = col as f64 - center_col as f64;
            if (dr * dr + dc * dc).sqrt() <= limit {
                cells.push(CellCoord::new(row, col));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_one_is_center_only() {
        let cells = affected_cells(2, 3, 1, 8, 8);
        assert_eq!(cells, vec![CellCoord::new(2, 3)]);
    }

    #[test]
    fn test_size_three_full_window() {
        let cells = affected_cells(4, 4, 3, 10, 10);
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.first(), Some(&CellCoord::new(3, 3)));
        assert_eq!(cells.last(), Some(&CellCoord::new(5, 5)));
    }

    #[test]
    fn test_corners_kept_for_large_brush() {
        // Corner offset (4, 4) is ~5.66 from center, within the full size of 9
        let cells = affected_cells(10, 10, 9, 30, 30);
        assert_eq!(cells.len(), 81);
        assert!(cells.contains(&CellCoord::new(6, 6)));
        assert!(cells.contains(&CellCoord::new(14, 14)));
    }

    #[test]
    fn test_clipped_at_grid_edge() {
        let cells = affected_cells(0, 0, 3, 4, 4);
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_center_outside_grid() {
        assert!(affected_cells(10, 10, 1, 4, 4).is_empty());
        // A neighbour of an off-grid center can still land inside
        assert_eq!(affected_cells(4, 3, 3, 4, 4), vec![CellCoord::new(3, 2), CellCoord::new(3, 3)]);
    }

    #[test]
    fn test_huge_size_on_small_grid() {
        let cells = affected_cells(0, 0, u32::MAX, 4, 4);
        assert_eq!(cells.len(), 16);
        assert!(affected_cells(usize::MAX, usize::MAX, u32::MAX, 3, 2).is_empty());
        assert!(affected_cells(0, 0, 3, 0, 0).is_empty());
    }

    #[test]
    fn test_even_size_window() {
        // size 2: window ±1, distance limit 2 keeps all 9
        assert_eq!(affected_cells(5, 5, 2, 10, 10).len(), 9);
    }

    #[test]
    fn test_brush_struct() {
        let brush = Brush::new(CellCoord::new(1, 1), 3);
        assert_eq!(brush.cells(3, 3).len(), 9);
    }
}
