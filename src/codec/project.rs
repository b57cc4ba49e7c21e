//! JSON project file mirroring the in-memory grid.
//!
//! Pixels are keyed by `"row,col"` strings. Every record field is optional on
//! load: present fields overwrite the matching cell, absent ones keep the
//! cell's current value (or the sentinel for newly inserted cells).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{CellCoord, Result};
use crate::grid::{DisplayColor, Grid, Pixel};

/// One pixel as stored in a project file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetation_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pavement_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<DisplayColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<DisplayColor>,
}

impl PixelRecord {
    /// Overwrite the fields of `pixel` that this record carries
    pub fn merge_into(&self, pixel: &mut Pixel) {
        if let Some(v) = self.vegetation_type {
            pixel.vegetation_type = v;
        }
        if let Some(v) = self.soil_type {
            pixel.soil_type = v;
        }
        if let Some(v) = self.pavement_type {
            pixel.pavement_type = v;
        }
        if let Some(v) = self.water_type {
            pixel.water_type = v;
        }
        if let Some(v) = self.building_id {
            pixel.building_id = v;
        }
        if let Some(v) = self.building_height {
            pixel.building_height = v;
        }
        if let Some(v) = self.building_type {
            pixel.building_type = v;
        }
        if let Some(v) = self.color {
            pixel.color = v;
        }
        if let Some(v) = self.outline {
            pixel.outline = v;
        }
    }

    /// A new pixel from this record, unset where fields are absent
    pub fn to_pixel(&self) -> Pixel {
        let mut pixel = Pixel::UNSET;
        self.merge_into(&mut pixel);
        pixel
    }
}

impl From<&Pixel> for PixelRecord {
    fn from(pixel: &Pixel) -> Self {
        Self {
            vegetation_type: Some(pixel.vegetation_type),
            soil_type: Some(pixel.soil_type),
            pavement_type: Some(pixel.pavement_type),
            water_type: Some(pixel.water_type),
            building_id: Some(pixel.building_id),
            building_height: Some(pixel.building_height),
            building_type: Some(pixel.building_type),
            color: Some(pixel.color),
            outline: Some(pixel.outline),
        }
    }
}

/// Project file contents
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ny: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res: Option<f64>,
    #[serde(default)]
    pub pixels: BTreeMap<String, PixelRecord>,
}

impl ProjectFile {
    /// Snapshot a grid into project form
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            nx: Some(grid.nx()),
            ny: Some(grid.ny()),
            res: Some(grid.res()),
            pixels: grid
                .iter()
                .map(|(coord, pixel)| (coord.to_string(), PixelRecord::from(pixel)))
                .collect(),
        }
    }

    /// Parse every pixel key, failing on the first malformed one
    pub fn parsed_pixels(&self) -> Result<Vec<(CellCoord, &PixelRecord)>> {
        self.pixels
            .iter()
            .map(|(key, record)| Ok((parse_key(key)?, record)))
            .collect()
    }
}

/// What a project load changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    /// Existing cells updated in place
    pub updated: usize,
    /// Cells added to the mapping
    pub inserted: usize,
}

/// Parse a `"row,col"` key
pub fn parse_key(key: &str) -> Result<CellCoord> {
    let malformed = || Error::MalformedKey(key.to_string());
    let (row, col) = key.split_once(',').ok_or_else(malformed)?;
    let row = row.trim().parse().map_err(|_| malformed())?;
    let col = col.trim().parse().map_err(|_| malformed())?;
    Ok(CellCoord::new(row, col))
}

/// Serialize a grid to pretty-printed project JSON
pub fn to_json(grid: &Grid) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ProjectFile::from_grid(grid))?)
}

/// Merge a parsed project into `grid`.
///
/// Keys and dimensions are checked before anything is written, so a failed
/// merge leaves the grid untouched.
pub fn merge(grid: &mut Grid, project: &ProjectFile) -> Result<MergeSummary> {
    let cells = project.parsed_pixels()?;

    let nx = project.nx.unwrap_or(grid.nx());
    let ny = project.ny.unwrap_or(grid.ny());
    let res = project.res.unwrap_or(grid.res());
    if nx == 0 || ny == 0 || !(res > 0.0) {
        return Err(Error::InvalidDimensions { nx, ny, res });
    }

    grid.set_extent(nx, ny, res);

    let mut summary = MergeSummary::default();
    let pixels = grid.pixels_mut();
    for (coord, record) in cells {
        match pixels.get_mut(&coord) {
            Some(pixel) => {
                record.merge_into(pixel);
                summary.updated += 1;
            }
            None => {
                pixels.insert(coord, record.to_pixel());
                summary.inserted += 1;
            }
        }
    }

    if summary.inserted > 0 {
        log::debug!("Project load inserted {} new cells", summary.inserted);
    }
    Ok(summary)
}

/// Parse project JSON and merge it into `grid`
pub fn apply_json(grid: &mut Grid, json: &str) -> Result<MergeSummary> {
    let project: ProjectFile = serde_json::from_str(json)?;
    merge(grid, &project)
}

/// Write a grid as a project file
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(grid)?)?;
    log::info!("Project saved to {}", path.display());
    Ok(())
}

/// Merge a project file into an existing grid
pub fn load_into(grid: &mut Grid, path: impl AsRef<Path>) -> Result<MergeSummary> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let summary = apply_json(grid, &json)?;
    log::info!(
        "Project loaded from {} ({} updated, {} inserted)",
        path.display(),
        summary.updated,
        summary.inserted
    );
    Ok(summary)
}

/// Load a project file into a fresh baseline grid.
///
/// A file without `nx`/`ny` is sized from its largest keys; without `res`
/// the resolution defaults to 1 m.
pub fn load(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let project: ProjectFile = serde_json::from_str(&json)?;

    let cells = project.parsed_pixels()?;
    let nx = project
        .nx
        .unwrap_or_else(|| cells.iter().map(|(c, _)| c.col + 1).max().unwrap_or(0));
    let ny = project
        .ny
        .unwrap_or_else(|| cells.iter().map(|(c, _)| c.row + 1).max().unwrap_or(0));
    let res = project.res.unwrap_or(1.0);

    let mut grid = Grid::new(nx, ny, res)?;
    merge(&mut grid, &project)?;
    log::info!("Project loaded from {} ({}x{})", path.display(), nx, ny);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UNSET;
    use crate::tool::{BuildingParams, Tool};
    use tempfile::TempDir;

    #[test]
    fn test_json_shape() {
        let mut grid = Grid::new(2, 1, 3.0).unwrap();
        grid.apply(0, 1, &Tool::Water.classification(&BuildingParams::default())).unwrap();

        let value: serde_json::Value = serde_json::from_str(&to_json(&grid).unwrap()).unwrap();
        assert_eq!(value["nx"], 2);
        assert_eq!(value["ny"], 1);
        assert_eq!(value["res"], 3.0);
        assert_eq!(value["pixels"]["0,1"]["water_type"], 1);
        assert_eq!(value["pixels"]["0,1"]["color"], "blue");
        assert_eq!(value["pixels"]["0,0"]["soil_type"], 1);
        assert_eq!(value["pixels"]["0,0"]["outline"], "white");
    }

    #[test]
    fn test_roundtrip_through_merge() {
        let mut source = Grid::new(3, 3, 2.0).unwrap();
        let building = BuildingParams { id: 5, height: 9.5, kind: 1 };
        source.apply(2, 2, &Tool::Building.classification(&building)).unwrap();
        source.apply(0, 0, &Tool::Vegetation.classification(&building)).unwrap();

        let mut target = Grid::new(3, 3, 2.0).unwrap();
        let summary = apply_json(&mut target, &to_json(&source).unwrap()).unwrap();
        assert_eq!(summary, MergeSummary { updated: 9, inserted: 0 });
        assert_eq!(target.pixels(), source.pixels());
    }

    #[test]
    fn test_partial_record_merges_field_wise() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let json = r#"{ "pixels": { "1,1": { "water_type": 4, "color": "gray" } } }"#;
        apply_json(&mut grid, json).unwrap();

        let pixel = grid.get(1, 1).unwrap();
        assert_eq!(pixel.water_type, 4);
        // untouched fields keep their baseline values
        assert_eq!(pixel.soil_type, 1);
        assert_eq!(pixel.color, DisplayColor::Grey);
        assert_eq!((grid.nx(), grid.ny(), grid.res()), (2, 2, 1.0));
    }

    #[test]
    fn test_unmatched_key_inserted() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let json = r#"{ "nx": 3, "ny": 2, "pixels": { "0,2": { "pavement_type": 1 } } }"#;
        let summary = apply_json(&mut grid, json).unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(grid.nx(), 3);
        let pixel = grid.get(0, 2).unwrap();
        assert_eq!(pixel.pavement_type, 1);
        assert_eq!(pixel.soil_type, UNSET);
        assert_eq!(pixel.building_height, -127.0);
    }

    #[test]
    fn test_malformed_key_leaves_grid_untouched() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        let before = grid.clone();
        let json = r#"{ "nx": 5, "pixels": { "0,0": { "water_type": 1 }, "zz": { "water_type": 1 } } }"#;

        let result = apply_json(&mut grid, json);
        assert!(matches!(result, Err(Error::MalformedKey(key)) if key == "zz"));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("3,4").unwrap(), CellCoord::new(3, 4));
        assert_eq!(parse_key(" 3, 4").unwrap(), CellCoord::new(3, 4));
        assert!(parse_key("3").is_err());
        assert!(parse_key("-1,0").is_err());
        assert!(parse_key("1,2,3").is_err());
    }

    #[test]
    fn test_syntax_error() {
        let mut grid = Grid::new(1, 1, 1.0).unwrap();
        assert!(matches!(apply_json(&mut grid, "{ nope"), Err(Error::Project(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("project.json");

        let mut grid = Grid::new(4, 3, 2.5).unwrap();
        grid.fill(&Tool::Pavement.classification(&BuildingParams::default()));
        save(&grid, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!((loaded.nx(), loaded.ny(), loaded.res()), (4, 3, 2.5));
        assert_eq!(loaded.pixels(), grid.pixels());

        let mut other = Grid::new(4, 3, 2.5).unwrap();
        let summary = load_into(&mut other, &path).unwrap();
        assert_eq!(summary.updated, 12);
    }

    #[test]
    fn test_load_sizes_from_keys() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("project.json");
        std::fs::write(&path, r#"{ "pixels": { "1,3": { "water_type": 1 } } }"#).unwrap();

        let grid = load(&path).unwrap();
        assert_eq!((grid.nx(), grid.ny(), grid.res()), (4, 2, 1.0));
        assert_eq!(grid.get(1, 3).unwrap().water_type, 1);
        assert_eq!(*grid.get(0, 0).unwrap(), Pixel::BASELINE);
    }
}
