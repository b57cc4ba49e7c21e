//! Grid store: the pixel mapping plus its scalar metadata

use std::collections::BTreeMap;

use crate::core::error::Error;
use crate::core::types::{CellCoord, Origin, Result};
use crate::tool::Classification;
use super::pixel::Pixel;

/// Pixel records keyed by cell, iterated in row-major order
pub type PixelMap = BTreeMap<CellCoord, Pixel>;

/// A land-use grid.
///
/// The mapping normally holds exactly the `nx * ny` cells of the extent, but
/// project loads may insert cells outside it; those are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    res: f64,
    origin: Origin,
    pixels: PixelMap,
}

impl Grid {
    /// Create an `nx` x `ny` grid of bare-soil cells with cell size `res` meters
    pub fn new(nx: usize, ny: usize, res: f64) -> Result<Self> {
        if nx == 0 || ny == 0 || !(res > 0.0) {
            return Err(Error::InvalidDimensions { nx, ny, res });
        }

        let mut pixels = PixelMap::new();
        for row in 0..ny {
            for col in 0..nx {
                pixels.insert(CellCoord::new(row, col), Pixel::BASELINE);
            }
        }

        Ok(Self {
            nx,
            ny,
            res,
            origin: Origin::default(),
            pixels,
        })
    }

    /// Assemble a grid from decoded parts. Dimensions are not checked; callers validate them.
    pub(crate) fn from_parts(nx: usize, ny: usize, res: f64, pixels: PixelMap) -> Self {
        Self {
            nx,
            ny,
            res,
            origin: Origin::default(),
            pixels,
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell size in meters (dx = dy)
    pub fn res(&self) -> f64 {
        self.res
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn pixels(&self) -> &PixelMap {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut PixelMap {
        &mut self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.pixels.contains_key(&coord)
    }

    /// True if the cell lies within `nx` x `ny`
    pub fn in_extent(&self, coord: CellCoord) -> bool {
        coord.row < self.ny && coord.col < self.nx
    }

    /// Get the pixel at a cell
    pub fn get(&self, row: usize, col: usize) -> Result<&Pixel> {
        self.pixels
            .get(&CellCoord::new(row, col))
            .ok_or(Error::OutOfRange { row, col })
    }

    /// Overwrite one cell's classification. The write is rejected for unknown cells.
    pub fn apply(&mut self, row: usize, col: usize, classification: &Classification) -> Result<()> {
        let pixel = self
            .pixels
            .get_mut(&CellCoord::new(row, col))
            .ok_or(Error::OutOfRange { row, col })?;
        pixel.apply(classification);
        Ok(())
    }

    /// Apply a classification to every cell, returning the number of cells written
    pub fn fill(&mut self, classification: &Classification) -> usize {
        for pixel in self.pixels.values_mut() {
            pixel.apply(classification);
        }
        self.pixels.len()
    }

    /// Replace extent, resolution and pixels wholesale. The origin is kept.
    pub fn replace(&mut self, nx: usize, ny: usize, res: f64, pixels: PixelMap) {
        self.nx = nx;
        self.ny = ny;
        self.res = res;
        self.pixels = pixels;
    }

    /// Swap in a new pixel mapping, returning the previous one
    pub fn replace_pixels(&mut self, pixels: PixelMap) -> PixelMap {
        std::mem::replace(&mut self.pixels, pixels)
    }

    /// Update extent metadata without touching pixels
    pub(crate) fn set_extent(&mut self, nx: usize, ny: usize, res: f64) {
        self.nx = nx;
        self.ny = ny;
        self.res = res;
    }

    /// Cell-center position in meters from the grid origin
    pub fn cell_center_m(&self, row: usize, col: usize) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.res,
            (row as f64 + 0.5) * self.res,
        )
    }

    /// Domain extent in meters (x, y)
    pub fn domain_size_m(&self) -> (f64, f64) {
        (self.nx as f64 * self.res, self.ny as f64 * self.res)
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Pixel)> {
        self.pixels.iter().map(|(coord, pixel)| (*coord, pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UNSET;
    use crate::tool::{BuildingParams, Tool};

    #[test]
    fn test_new_grid_is_baseline() {
        let grid = Grid::new(4, 3, 2.0).unwrap();
        assert_eq!(grid.pixel_count(), 12);
        for (_, pixel) in grid.iter() {
            assert_eq!(*pixel, Pixel::BASELINE);
        }
        assert_eq!(grid.domain_size_m(), (8.0, 6.0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(Grid::new(0, 4, 1.0), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Grid::new(4, 4, 0.0), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Grid::new(4, 4, f64::NAN), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_get_out_of_range() {
        let grid = Grid::new(2, 2, 1.0).unwrap();
        assert!(grid.get(1, 1).is_ok());
        assert!(matches!(grid.get(2, 0), Err(Error::OutOfRange { row: 2, col: 0 })));
    }

    #[test]
    fn test_apply_rejects_unknown_cell() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let water = Tool::Water.classification(&BuildingParams::default());
        let before = grid.clone();

        assert!(matches!(grid.apply(5, 5, &water), Err(Error::OutOfRange { .. })));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_apply_writes_full_tuple() {
        let mut grid = Grid::new(3, 3, 1.0).unwrap();
        let building = BuildingParams { id: 4, height: 12.0, kind: 3 };
        grid.apply(1, 1, &Tool::Building.classification(&building)).unwrap();
        grid.apply(1, 1, &Tool::Pavement.classification(&building)).unwrap();

        let pixel = grid.get(1, 1).unwrap();
        assert_eq!(pixel.pavement_type, 1);
        assert_eq!(pixel.building_id, UNSET);
        assert_eq!(pixel.building_height, -127.0);
        assert_eq!(pixel.active_category_count(), 1);
    }

    #[test]
    fn test_fill() {
        let mut grid = Grid::new(3, 2, 1.0).unwrap();
        let written = grid.fill(&Tool::Water.classification(&BuildingParams::default()));
        assert_eq!(written, 6);
        assert!(grid.iter().all(|(_, p)| p.water_type == 1 && p.soil_type == UNSET));
    }

    #[test]
    fn test_from_parts_keeps_loaded_pixels() {
        let mut pixels = PixelMap::new();
        pixels.insert(CellCoord::new(0, 0), Pixel::UNSET);
        let grid = Grid::from_parts(1, 1, 2.0, pixels);
        assert_eq!(grid.pixel_count(), 1);
        assert_eq!(*grid.get(0, 0).unwrap(), Pixel::UNSET);
        assert_eq!(grid.origin(), Origin::default());
    }

    #[test]
    fn test_cell_center() {
        let grid = Grid::new(4, 4, 2.0).unwrap();
        assert_eq!(grid.cell_center_m(0, 0), (1.0, 1.0));
        assert_eq!(grid.cell_center_m(1, 3), (7.0, 3.0));
    }
}
