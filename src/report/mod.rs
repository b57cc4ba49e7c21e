//! Domain report: land-use shares, PALM namelist values and building statistics

use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::core::types::{Origin, Result};
use crate::grid::{Grid, Pixel};

const RULE: &str = "===============";

/// Land-use bucket a cell is counted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandUse {
    Vegetation,
    Pavement,
    Soil,
    Water,
    Building,
}

impl LandUse {
    pub const ALL: [LandUse; 5] = [
        LandUse::Vegetation,
        LandUse::Pavement,
        LandUse::Soil,
        LandUse::Water,
        LandUse::Building,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LandUse::Vegetation => "Vegetation",
            LandUse::Pavement => "Pavement",
            LandUse::Soil => "Soil",
            LandUse::Water => "Water",
            LandUse::Building => "Building",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// First matching bucket in report priority, None if the cell fits none
    pub fn of(pixel: &Pixel) -> Option<LandUse> {
        if pixel.vegetation_type > 1 {
            Some(LandUse::Vegetation)
        } else if pixel.pavement_type > 0 {
            Some(LandUse::Pavement)
        } else if pixel.soil_type == 1 {
            Some(LandUse::Soil)
        } else if pixel.water_type > 0 {
            Some(LandUse::Water)
        } else if pixel.building_id > 0 {
            Some(LandUse::Building)
        } else {
            None
        }
    }
}

/// Height statistics over cells with a real building height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingStats {
    pub max_height: f64,
    pub min_height: f64,
    pub mean_height: f64,
    pub unique_ids: usize,
}

/// Heights equal to either sentinel carry no building
fn is_valid_height(height: f64) -> bool {
    height != -127.0 && height != -9999.0
}

impl BuildingStats {
    fn collect(grid: &Grid) -> Option<Self> {
        let mut heights = Vec::new();
        let mut ids = std::collections::BTreeSet::new();
        for (_, pixel) in grid.iter() {
            if is_valid_height(pixel.building_height) {
                heights.push(pixel.building_height);
                ids.insert(pixel.building_id);
            }
        }
        if heights.is_empty() {
            return None;
        }

        let max_height = heights.iter().copied().fold(f64::MIN, f64::max);
        let min_height = heights.iter().copied().fold(f64::MAX, f64::min);
        let mean_height = heights.iter().sum::<f64>() / heights.len() as f64;
        Some(Self {
            max_height,
            min_height,
            mean_height,
            unique_ids: ids.len(),
        })
    }
}

/// Summary of a grid for the PALM setup
#[derive(Debug, Clone, PartialEq)]
pub struct DomainReport {
    pub total_cells: usize,
    counts: [usize; 5],
    pub nx: usize,
    pub ny: usize,
    /// Grid width in meters
    pub res: f64,
    pub origin: Origin,
    /// None when no cell counts as a building
    pub buildings: Option<BuildingStats>,
}

/// Build the report for a grid
pub fn generate(grid: &Grid) -> DomainReport {
    let mut counts = [0usize; 5];
    for (_, pixel) in grid.iter() {
        if let Some(bucket) = LandUse::of(pixel) {
            counts[bucket.index()] += 1;
        }
    }

    let buildings = if counts[LandUse::Building.index()] > 0 {
        BuildingStats::collect(grid)
    } else {
        None
    };

    DomainReport {
        total_cells: grid.pixel_count(),
        counts,
        nx: grid.nx(),
        ny: grid.ny(),
        res: grid.res(),
        origin: grid.origin(),
        buildings,
    }
}

impl DomainReport {
    pub fn count(&self, land_use: LandUse) -> usize {
        self.counts[land_use.index()]
    }

    /// Share of all cells in percent. Zero for an empty grid.
    pub fn percentage(&self, land_use: LandUse) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.count(land_use) as f64 / self.total_cells as f64 * 100.0
    }

    /// Domain extent in meters (x, y)
    pub fn domain_size_m(&self) -> (f64, f64) {
        (self.nx as f64 * self.res, self.ny as f64 * self.res)
    }

    /// PALM namelist `nx`, `ny` (last grid index)
    pub fn namelist_extent(&self) -> (usize, usize) {
        (self.nx.saturating_sub(1), self.ny.saturating_sub(1))
    }

    /// Plain-text report with a generation footer
    pub fn to_text(&self, generated: NaiveDateTime) -> String {
        ReportText {
            report: self,
            generated,
        }
        .to_string()
    }

    /// Write the report to `path`, stamped with the local time
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_text(chrono::Local::now().naive_local());
        std::fs::write(path, text)?;
        log::info!("Report saved to {}", path.display());
        Ok(())
    }
}

/// Text rendering of a report at a given time
struct ReportText<'a> {
    report: &'a DomainReport,
    generated: NaiveDateTime,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let (size_x, size_y) = report.domain_size_m();
        let (namelist_nx, namelist_ny) = report.namelist_extent();

        let domain = [
            ("Number of 2D Grid Cells", int_value(report.total_cells)),
            ("Domain size x (m)", float_value(size_x)),
            ("Domain size y (m)", float_value(size_y)),
            ("Grid width (m)", float_value(report.res)),
            ("Number of Gridpoints x", int_value(report.nx)),
            ("Number of Gridpoints y", int_value(report.ny)),
        ];
        let geo = [
            ("Lat", float_value(report.origin.latitude)),
            ("Lon", float_value(report.origin.longitude)),
            ("Projected x (m)", float_value(report.origin.x)),
            ("Projected y (m)", float_value(report.origin.y)),
        ];
        let building: Vec<(&str, String)> = match &report.buildings {
            Some(stats) => vec![
                ("Maximum Building Height (m)", float_value(stats.max_height)),
                ("Minimum Building Height (m)", float_value(stats.min_height)),
                ("Average Building Height (m)", float_value(stats.mean_height)),
                ("Unique building IDs", int_value(stats.unique_ids)),
            ],
            None => vec![("Buildings Detected", "No buildings detected".to_string())],
        };

        let width = LandUse::ALL
            .iter()
            .map(|l| l.label())
            .chain(domain.iter().map(|(k, _)| *k))
            .chain(geo.iter().map(|(k, _)| *k))
            .chain(building.iter().map(|(k, _)| *k))
            .map(str::len)
            .max()
            .unwrap_or(0);

        writeln!(f, "Domain Report\n{}", RULE)?;
        for land_use in LandUse::ALL {
            writeln!(f, "{:<width$}  {:6.2}%", land_use.label(), report.percentage(land_use))?;
        }

        writeln!(f, "\nNamelist Parameter\n{}", RULE)?;
        writeln!(f, "nx: {}\nny: {}\nnz: \n", namelist_nx, namelist_ny)?;
        writeln!(f, "dx: {}\ndy: {}\ndz: \n", report.res, report.res)?;

        writeln!(f, "Domain Info\n{}", RULE)?;
        for (key, value) in &domain {
            writeln!(f, "{:<width$}  {}", key, value)?;
        }
        writeln!(f)?;
        for (key, value) in &geo {
            writeln!(f, "{:<width$}  {}", key, value)?;
        }

        writeln!(f, "\nBuilding Information\n{}", RULE)?;
        for (key, value) in &building {
            writeln!(f, "{:<width$}  {}", key, value)?;
        }
        if report.count(LandUse::Building) > 0 {
            writeln!(f, "\nBuildings detected (please switch on USM Namelist in PALM p3d)")?;
        }

        writeln!(f, "\nReport generated on {}", self.generated.format("%d-%m-%Y %H:%M:%S"))
    }
}

fn int_value(value: usize) -> String {
    format!("{:>10}", value)
}

fn float_value(value: f64) -> String {
    format!("{:>10.2}", value)
}
