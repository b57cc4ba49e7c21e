//! Pixel record and display colors

use serde::{Deserialize, Serialize};

use crate::core::types::{UNSET, UNSET_HEIGHT};
use crate::tool::Classification;

/// Display color of a painted cell. Presentation only, never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Green,
    #[serde(alias = "gray")]
    Grey,
    Brown,
    Blue,
    Black,
    White,
}

impl DisplayColor {
    /// RGB888 value used for previews
    pub fn rgb(self) -> [u8; 3] {
        match self {
            DisplayColor::Green => [0, 128, 0],
            DisplayColor::Grey => [128, 128, 128],
            DisplayColor::Brown => [165, 42, 42],
            DisplayColor::Blue => [0, 0, 255],
            DisplayColor::Black => [0, 0, 0],
            DisplayColor::White => [255, 255, 255],
        }
    }
}

/// One grid cell's land-use attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub vegetation_type: i32,
    pub soil_type: i32,
    pub pavement_type: i32,
    pub water_type: i32,
    pub building_id: i32,
    /// Meters
    pub building_height: f64,
    pub building_type: i32,
    pub color: DisplayColor,
    pub outline: DisplayColor,
}

impl Pixel {
    /// Bare-soil baseline every new cell starts from
    pub const BASELINE: Pixel = Pixel {
        vegetation_type: UNSET,
        soil_type: 1,
        pavement_type: UNSET,
        water_type: UNSET,
        building_id: UNSET,
        building_height: UNSET_HEIGHT,
        building_type: UNSET,
        color: DisplayColor::Brown,
        outline: DisplayColor::White,
    };

    /// A record with every classification field unset
    pub const UNSET: Pixel = Pixel {
        vegetation_type: UNSET,
        soil_type: UNSET,
        pavement_type: UNSET,
        water_type: UNSET,
        building_id: UNSET,
        building_height: UNSET_HEIGHT,
        building_type: UNSET,
        color: DisplayColor::White,
        outline: DisplayColor::White,
    };

    /// Overwrite every classification field and the color. Outline is untouched.
    pub fn apply(&mut self, classification: &Classification) {
        self.vegetation_type = classification.vegetation_type;
        self.soil_type = classification.soil_type;
        self.pavement_type = classification.pavement_type;
        self.water_type = classification.water_type;
        self.building_id = classification.building_id;
        self.building_height = classification.building_height;
        self.building_type = classification.building_type;
        self.color = classification.color;
    }

    /// Current classification fields as a patch
    pub fn classification(&self) -> Classification {
        Classification {
            vegetation_type: self.vegetation_type,
            soil_type: self.soil_type,
            pavement_type: self.pavement_type,
            water_type: self.water_type,
            building_id: self.building_id,
            building_height: self.building_height,
            building_type: self.building_type,
            color: self.color,
        }
    }

    pub fn vegetation_active(&self) -> bool {
        self.vegetation_type != UNSET
    }

    pub fn pavement_active(&self) -> bool {
        self.pavement_type != UNSET
    }

    pub fn water_active(&self) -> bool {
        self.water_type != UNSET
    }

    pub fn building_active(&self) -> bool {
        self.building_id != UNSET
    }

    /// Number of mutually exclusive categories currently active (0 means bare soil)
    pub fn active_category_count(&self) -> usize {
        [
            self.vegetation_active(),
            self.pavement_active(),
            self.water_active(),
            self.building_active(),
        ]
        .iter()
        .filter(|&&active| active)
        .count()
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BASELINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_bare_soil() {
        let pixel = Pixel::default();
        assert_eq!(pixel.soil_type, 1);
        assert_eq!(pixel.active_category_count(), 0);
        assert_eq!(pixel.color, DisplayColor::Brown);
    }

    #[test]
    fn test_apply_keeps_outline() {
        let mut pixel = Pixel::default();
        let patch = Classification {
            color: DisplayColor::Blue,
            water_type: 1,
            soil_type: UNSET,
            ..Pixel::UNSET.classification()
        };
        pixel.apply(&patch);
        assert_eq!(pixel.water_type, 1);
        assert_eq!(pixel.soil_type, UNSET);
        assert_eq!(pixel.color, DisplayColor::Blue);
        assert_eq!(pixel.outline, DisplayColor::White);
    }

    #[test]
    fn test_gray_alias() {
        let color: DisplayColor = serde_json::from_str("\"gray\"").unwrap();
        assert_eq!(color, DisplayColor::Grey);
        assert_eq!(serde_json::to_string(&DisplayColor::Grey).unwrap(), "\"grey\"");
    }
}
