//! Plant and Irrigation Factor Tables
//!
//! Per-m² annual sequestration, oxygen output, water demand and planting
//! cost for each planting style, conservative literature values. Water and
//! cost are ranges; calculations use the midpoint.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// kg CO₂ emitted per km driven by an average car
pub const CO2_KG_PER_KM_DRIVEN: f64 = 0.404;
/// kg CO₂ absorbed by one tree per year
pub const CO2_KG_PER_TREE_YEAR: f64 = 21.77;
/// L O₂ consumed by one person per year
pub const O2_L_PER_PERSON_YEAR: f64 = 230_000.0;

/// Planting style of a green space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlantType {
    ShadeTree,
    GrassTurf,
    DecorativePlants,
    DesertPlants,
}

/// Inclusive range, per m² per year unless noted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Environmental and cost factors of one planting style
#[derive(Debug, Clone, Copy)]
pub struct PlantFactors {
    /// kg CO₂ per m² per year
    pub co2: f64,
    /// L O₂ per m² per year
    pub o2: f64,
    /// L water per m² per year
    pub water: Range,
    /// USD per m² planted
    pub cost: Range,
    pub description: &'static str,
}

const SHADE_TREE: PlantFactors = PlantFactors {
    co2: 1.0,
    o2: 36_500.0,
    water: Range { min: 200.0, max: 600.0 },
    cost: Range { min: 5.0, max: 30.0 },
    description: "Urban canopy trees with high CO₂ sequestration",
};

const GRASS_TURF: PlantFactors = PlantFactors {
    co2: 0.05,
    o2: 1_800.0,
    water: Range { min: 800.0, max: 1100.0 },
    cost: Range { min: 2.0, max: 10.0 },
    description: "Lawn grass suitable for hot/dry climate",
};

const DECORATIVE_PLANTS: PlantFactors = PlantFactors {
    co2: 0.08,
    o2: 900.0,
    water: Range { min: 200.0, max: 500.0 },
    cost: Range { min: 3.0, max: 15.0 },
    description: "Ornamental plants and shrubs",
};

const DESERT_PLANTS: PlantFactors = PlantFactors {
    // midpoint of 0.02-0.05
    co2: 0.035,
    o2: 350.0,
    water: Range { min: 50.0, max: 250.0 },
    cost: Range { min: 1.0, max: 6.0 },
    description: "Native xerophytes with minimal water needs",
};

impl PlantType {
    pub const ALL: [PlantType; 4] = [
        PlantType::ShadeTree,
        PlantType::GrassTurf,
        PlantType::DecorativePlants,
        PlantType::DesertPlants,
    ];

    pub fn factors(self) -> &'static PlantFactors {
        match self {
            PlantType::ShadeTree => &SHADE_TREE,
            PlantType::GrassTurf => &GRASS_TURF,
            PlantType::DecorativePlants => &DECORATIVE_PLANTS,
            PlantType::DesertPlants => &DESERT_PLANTS,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PlantType::ShadeTree => "ShadeTree",
            PlantType::GrassTurf => "GrassTurf",
            PlantType::DecorativePlants => "DecorativePlants",
            PlantType::DesertPlants => "DesertPlants",
        }
    }
}

impl FromStr for PlantType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlantType::ALL
            .into_iter()
            .find(|plant| plant.key() == s.trim())
            .ok_or_else(|| EngineError::InvalidPlantType(s.to_string()))
    }
}

impl TryFrom<String> for PlantType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlantType> for String {
    fn from(plant: PlantType) -> Self {
        plant.key().to_string()
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Irrigation source; non-potable sources cut effective water demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WaterSource {
    DrinkingWater,
    TreatedWater,
    Rainwater,
}

impl WaterSource {
    pub const ALL: [WaterSource; 3] = [
        WaterSource::DrinkingWater,
        WaterSource::TreatedWater,
        WaterSource::Rainwater,
    ];

    /// Multiplier applied to water consumption
    pub fn efficiency_factor(self) -> f64 {
        match self {
            WaterSource::DrinkingWater => 1.0,
            WaterSource::TreatedWater => 0.8,
            WaterSource::Rainwater => 0.6,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            WaterSource::DrinkingWater => "DrinkingWater",
            WaterSource::TreatedWater => "TreatedWater",
            WaterSource::Rainwater => "Rainwater",
        }
    }
}

impl FromStr for WaterSource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaterSource::ALL
            .into_iter()
            .find(|source| source.key() == s.trim())
            .ok_or_else(|| EngineError::InvalidWaterSource(s.to_string()))
    }
}

impl TryFrom<String> for WaterSource {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WaterSource> for String {
    fn from(source: WaterSource) -> Self {
        source.key().to_string()
    }
}

impl fmt::Display for WaterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoints() {
        assert_eq!(PlantType::ShadeTree.factors().water.midpoint(), 400.0);
        assert_eq!(PlantType::GrassTurf.factors().water.midpoint(), 950.0);
        assert_eq!(PlantType::DesertPlants.factors().cost.midpoint(), 3.5);
    }

    #[test]
    fn test_parse_keys() {
        for plant in PlantType::ALL {
            assert_eq!(plant.key().parse::<PlantType>().unwrap(), plant);
        }
        assert_eq!("Rainwater".parse::<WaterSource>().unwrap(), WaterSource::Rainwater);
    }

    #[test]
    fn test_unknown_plant_type_is_rejected() {
        let err = "Cactus".parse::<PlantType>().unwrap_err();
        assert_eq!(err, EngineError::InvalidPlantType("Cactus".to_string()));
    }

    #[test]
    fn test_serde_rejects_unknown_source() {
        let ok: WaterSource = serde_json::from_str("\"TreatedWater\"").unwrap();
        assert_eq!(ok, WaterSource::TreatedWater);
        assert!(serde_json::from_str::<WaterSource>("\"Seawater\"").is_err());
    }
}
