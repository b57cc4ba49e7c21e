//! Paint session: one grid, its history and the current tool selection

use crate::core::config::EditorConfig;
use crate::core::error::Error;
use crate::core::types::{CellCoord, Origin, Result};
use crate::grid::Grid;
use crate::history::HistoryManager;
use crate::tool::{BuildingParams, Tool, ToolContext};
use super::footprint::affected_cells;

/// Drives tool applications against a grid.
///
/// A stroke starts with [`begin_stroke`](Self::begin_stroke), which records
/// one history snapshot, and continues with
/// [`continue_stroke`](Self::continue_stroke) for each drag position.
#[derive(Debug, Clone)]
pub struct PaintSession {
    grid: Grid,
    history: HistoryManager,
    context: ToolContext,
}

impl PaintSession {
    /// Create a session over an existing grid
    pub fn new(grid: Grid) -> Self {
        let context = ToolContext::new(
            Tool::default(),
            1,
            BuildingParams::for_resolution(grid.res()),
        );
        Self {
            grid,
            history: HistoryManager::new(),
            context,
        }
    }

    /// Create a session with a fresh grid sized from the config
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        let grid = Grid::new(config.grid.nx, config.grid.ny, config.grid.res)?
            .with_origin(config.origin);
        let context = ToolContext::new(Tool::default(), config.brush_size, config.building_params());
        Ok(Self {
            grid,
            history: HistoryManager::new(),
            context,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Select the active tool
    pub fn set_tool(&mut self, tool: Tool) -> &mut Self {
        self.context.tool = tool;
        self
    }

    /// Set brush size (clamped to an odd size)
    pub fn set_brush_size(&mut self, size: u32) -> &mut Self {
        self.context.set_brush_size(size);
        self
    }

    /// Set the parameters used by subsequent building strokes
    pub fn set_building(&mut self, building: BuildingParams) -> &mut Self {
        self.context.building = building;
        self
    }

    pub fn set_origin(&mut self, origin: Origin) -> &mut Self {
        self.grid.set_origin(origin);
        self
    }

    /// Start a stroke: snapshot, then paint at `center`. Returns cells written.
    pub fn begin_stroke(&mut self, center: CellCoord) -> usize {
        self.history.snapshot(&self.grid);
        self.paint_at(center)
    }

    /// Paint at another point of the current stroke without a new snapshot
    pub fn continue_stroke(&mut self, center: CellCoord) -> usize {
        self.paint_at(center)
    }

    /// Paint a whole stroke through `points` as one undoable action
    pub fn stroke(&mut self, points: &[CellCoord]) -> usize {
        let Some((first, rest)) = points.split_first() else {
            return 0;
        };
        let mut written = self.begin_stroke(*first);
        for point in rest {
            written += self.continue_stroke(*point);
        }
        written
    }

    /// Apply the active tool to every cell as one undoable action
    pub fn fill(&mut self) -> usize {
        self.history.snapshot(&self.grid);
        let classification = self.context.classification();
        let written = self.grid.fill(&classification);
        log::debug!("Filled {} cells with {}", written, self.context.tool);
        written
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.grid)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.grid)
    }

    /// Swap in a loaded grid. History is kept, matching the editor's load behavior.
    pub fn replace_grid(&mut self, grid: Grid) -> Grid {
        std::mem::replace(&mut self.grid, grid)
    }

    /// Mutable grid access for loaders that merge into the current grid
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn paint_at(&mut self, center: CellCoord) -> usize {
        let classification = self.context.classification();
        let cells = affected_cells(
            center.row,
            center.col,
            self.context.brush_size(),
            self.grid.nx(),
            self.grid.ny(),
        );

        let mut written = 0;
        for cell in cells {
            match self.grid.apply(cell.row, cell.col, &classification) {
                Ok(()) => written += 1,
                Err(Error::OutOfRange { row, col }) => {
                    log::debug!("Skipping missing cell ({}, {})", row, col);
                }
                Err(e) => log::warn!("Paint failed at {}: {}", cell, e),
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::HistoryDirection;
    use crate::core::types::UNSET;
    use crate::grid::Pixel;

    #[test]
    fn test_water_scenario() {
        let mut session = PaintSession::new(Grid::new(4, 4, 2.0).unwrap());
        session.set_tool(Tool::Water).set_brush_size(1);

        let written = session.begin_stroke(CellCoord::new(1, 1));
        assert_eq!(written, 1);

        for (coord, pixel) in session.grid().iter() {
            if coord == CellCoord::new(1, 1) {
                assert_eq!(pixel.water_type, 1);
                assert_eq!(pixel.soil_type, UNSET);
                assert_eq!(pixel.vegetation_type, UNSET);
                assert_eq!(pixel.pavement_type, UNSET);
                assert_eq!(pixel.building_id, UNSET);
            } else {
                assert_eq!(*pixel, Pixel::BASELINE);
            }
        }
    }

    #[test]
    fn test_stroke_is_one_undo_step() {
        let mut session = PaintSession::new(Grid::new(8, 8, 1.0).unwrap());
        session.set_tool(Tool::Pavement);

        let written = session.stroke(&[
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
        ]);
        assert_eq!(written, 3);
        assert_eq!(session.history().undo_len(), 1);

        session.undo().unwrap();
        assert!(session.grid().iter().all(|(_, p)| *p == Pixel::BASELINE));
        assert!(matches!(
            session.undo(),
            Err(Error::EmptyHistory(HistoryDirection::Undo))
        ));
    }

    #[test]
    fn test_building_params_carry_forward() {
        let mut session = PaintSession::new(Grid::new(5, 5, 2.0).unwrap());
        session
            .set_tool(Tool::Building)
            .set_building(BuildingParams { id: 9, height: 30.0, kind: 3 });

        session.begin_stroke(CellCoord::new(0, 0));
        session.begin_stroke(CellCoord::new(4, 4));

        for cell in [(0, 0), (4, 4)] {
            let pixel = session.grid().get(cell.0, cell.1).unwrap();
            assert_eq!(pixel.building_id, 9);
            assert_eq!(pixel.building_height, 30.0);
            assert_eq!(pixel.building_type, 3);
        }
    }

    #[test]
    fn test_fill_and_undo() {
        let mut session = PaintSession::new(Grid::new(3, 3, 1.0).unwrap());
        session.set_tool(Tool::Vegetation);
        assert_eq!(session.fill(), 9);
        assert!(session.grid().iter().all(|(_, p)| p.vegetation_type == 3));

        session.undo().unwrap();
        session.redo().unwrap();
        assert!(session.grid().iter().all(|(_, p)| p.vegetation_type == 3));
    }

    #[test]
    fn test_brush_clipped_at_edge() {
        let mut session = PaintSession::new(Grid::new(4, 4, 1.0).unwrap());
        session.set_tool(Tool::Water).set_brush_size(3);
        assert_eq!(session.begin_stroke(CellCoord::new(0, 0)), 4);
    }

    #[test]
    fn test_from_config() {
        let config = EditorConfig::default();
        let session = PaintSession::from_config(&config).unwrap();
        assert_eq!(session.grid().nx(), 16);
        assert_eq!(session.context().building.height, 4.0);
        assert_eq!(session.grid().origin(), config.origin);
    }

    #[test]
    fn test_empty_stroke() {
        let mut session = PaintSession::new(Grid::new(2, 2, 1.0).unwrap());
        assert_eq!(session.stroke(&[]), 0);
        assert!(!session.history().can_undo());
    }
}
