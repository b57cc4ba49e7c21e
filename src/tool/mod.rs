//! Land-use tools and the attribute tuples they write.
//!
//! Each tool maps to one complete classification tuple. Writing the whole
//! tuple (unrelated categories reset to the sentinel) is what keeps at most
//! one of vegetation, pavement, water and building active per cell.

use serde::{Deserialize, Serialize};

use crate::core::types::{UNSET, UNSET_HEIGHT};
use crate::grid::DisplayColor;

/// Largest brush size offered to the user
pub const MAX_BRUSH_SIZE: u32 = 9;

/// Land-use painting tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Vegetation,
    Pavement,
    BareSoil,
    Water,
    Building,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Vegetation,
        Tool::Pavement,
        Tool::BareSoil,
        Tool::Water,
        Tool::Building,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Vegetation => "vegetation",
            Tool::Pavement => "pavement",
            Tool::BareSoil => "bare soil",
            Tool::Water => "water",
            Tool::Building => "building",
        }
    }

    /// The tuple this tool writes. Only the building tool reads `building`.
    pub fn classification(self, building: &BuildingParams) -> Classification {
        match self {
            Tool::Vegetation => Classification {
                vegetation_type: 3,
                soil_type: 3,
                color: DisplayColor::Green,
                ..Classification::UNSET
            },
            Tool::Pavement => Classification {
                pavement_type: 1,
                soil_type: 1,
                color: DisplayColor::Grey,
                ..Classification::UNSET
            },
            Tool::BareSoil => Classification {
                vegetation_type: 1,
                soil_type: 1,
                color: DisplayColor::Brown,
                ..Classification::UNSET
            },
            Tool::Water => Classification {
                water_type: 1,
                color: DisplayColor::Blue,
                ..Classification::UNSET
            },
            Tool::Building => Classification {
                building_id: building.id,
                building_height: building.height,
                building_type: building.kind,
                color: DisplayColor::Black,
                ..Classification::UNSET
            },
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vegetation" => Ok(Tool::Vegetation),
            "pavement" => Ok(Tool::Pavement),
            "soil" | "bare soil" | "bare-soil" | "bare_soil" => Ok(Tool::BareSoil),
            "water" => Ok(Tool::Water),
            "building" => Ok(Tool::Building),
            other => Err(format!(
                "unknown tool '{}', expected one of: vegetation, pavement, soil, water, building",
                other
            )),
        }
    }
}

/// Parameters written by the building tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingParams {
    pub id: i32,
    /// Meters
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: i32,
}

impl BuildingParams {
    /// Defaults for a grid of the given resolution: one storey of grid width
    pub fn for_resolution(res: f64) -> Self {
        Self { id: 1, height: res, kind: 2 }
    }
}

impl Default for BuildingParams {
    fn default() -> Self {
        Self::for_resolution(1.0)
    }
}

/// Complete classification tuple plus derived display color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub vegetation_type: i32,
    pub soil_type: i32,
    pub pavement_type: i32,
    pub water_type: i32,
    pub building_id: i32,
    pub building_height: f64,
    pub building_type: i32,
    pub color: DisplayColor,
}

impl Classification {
    /// Every field at its sentinel
    pub const UNSET: Classification = Classification {
        vegetation_type: UNSET,
        soil_type: UNSET,
        pavement_type: UNSET,
        water_type: UNSET,
        building_id: UNSET,
        building_height: UNSET_HEIGHT,
        building_type: UNSET,
        color: DisplayColor::White,
    };
}

/// Current tool selection, brush size and building parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    pub tool: Tool,
    brush_size: u32,
    pub building: BuildingParams,
}

impl ToolContext {
    pub fn new(tool: Tool, brush_size: u32, building: BuildingParams) -> Self {
        let mut context = Self {
            tool,
            brush_size: 1,
            building,
        };
        context.set_brush_size(brush_size);
        context
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Clamp to `1..=MAX_BRUSH_SIZE` and round even sizes down to odd,
    /// keeping the brush window symmetric
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        let size = size.clamp(1, MAX_BRUSH_SIZE);
        self.brush_size = if size % 2 == 0 { size - 1 } else { size };
        self.brush_size
    }

    /// The tuple the active tool writes
    pub fn classification(&self) -> Classification {
        self.tool.classification(&self.building)
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(Tool::default(), 1, BuildingParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Pixel;

    #[test]
    fn test_every_tool_keeps_categories_exclusive() {
        let building = BuildingParams { id: 7, height: 20.0, kind: 4 };
        for tool in Tool::ALL {
            let mut pixel = Pixel::BASELINE;
            pixel.apply(&tool.classification(&building));
            assert!(
                pixel.active_category_count() <= 1,
                "{} left {} categories active",
                tool,
                pixel.active_category_count()
            );
        }
    }

    #[test]
    fn test_tool_sequence_keeps_categories_exclusive() {
        let building = BuildingParams::default();
        let mut pixel = Pixel::BASELINE;
        for first in Tool::ALL {
            for second in Tool::ALL {
                pixel.apply(&first.classification(&building));
                pixel.apply(&second.classification(&building));
                assert!(pixel.active_category_count() <= 1);
                assert_eq!(pixel.classification(), second.classification(&building));
            }
        }
    }

    #[test]
    fn test_building_uses_params() {
        let building = BuildingParams { id: 3, height: 15.5, kind: 6 };
        let c = Tool::Building.classification(&building);
        assert_eq!(c.building_id, 3);
        assert_eq!(c.building_height, 15.5);
        assert_eq!(c.building_type, 6);
        assert_eq!(c.soil_type, UNSET);
        assert_eq!(c.color, DisplayColor::Black);
    }

    #[test]
    fn test_water_tuple() {
        let c = Tool::Water.classification(&BuildingParams::default());
        assert_eq!(c.water_type, 1);
        assert_eq!(c.vegetation_type, UNSET);
        assert_eq!(c.soil_type, UNSET);
        assert_eq!(c.pavement_type, UNSET);
        assert_eq!(c.building_id, UNSET);
    }

    #[test]
    fn test_brush_size_clamped_to_odd() {
        let mut context = ToolContext::default();
        assert_eq!(context.set_brush_size(0), 1);
        assert_eq!(context.set_brush_size(4), 3);
        assert_eq!(context.set_brush_size(5), 5);
        assert_eq!(context.set_brush_size(10), 9);
        assert_eq!(context.set_brush_size(100), 9);
    }

    #[test]
    fn test_parse_tool() {
        assert_eq!("Water".parse::<Tool>().unwrap(), Tool::Water);
        assert_eq!("bare soil".parse::<Tool>().unwrap(), Tool::BareSoil);
        assert_eq!("soil".parse::<Tool>().unwrap(), Tool::BareSoil);
        assert!("lava".parse::<Tool>().is_err());
    }

    #[test]
    fn test_building_params_serde_names() {
        let params: BuildingParams = serde_json::from_str(r#"{"id": 2, "height": 9.0, "type": 5}"#).unwrap();
        assert_eq!(params, BuildingParams { id: 2, height: 9.0, kind: 5 });
    }
}
