//! Water quality standards, index weights and WQI classification.
//!
//! Thresholds follow WHO/EPA drinking and irrigation guidance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PH_MIN: f64 = 6.5;
pub const PH_MAX: f64 = 8.5;
/// Minimum dissolved oxygen (mg/L)
pub const DO_MIN: f64 = 5.0;
/// Maximum turbidity (NTU)
pub const TURBIDITY_MAX: f64 = 5.0;
/// Maximum nitrate (mg/L)
pub const NITRATE_MAX: f64 = 50.0;
/// Maximum biochemical oxygen demand (mg/L)
pub const BOD_MAX: f64 = 3.0;

/// Weights of the five sub-indices in the WQI
#[derive(Debug, Clone, Copy)]
pub struct ParameterWeights {
    pub dissolved_oxygen: f64,
    pub ph: f64,
    pub tds: f64,
    pub turbidity: f64,
    pub nitrate: f64,
}

pub const PARAMETER_WEIGHTS: ParameterWeights = ParameterWeights {
    dissolved_oxygen: 0.30,
    ph: 0.20,
    tds: 0.20,
    turbidity: 0.15,
    nitrate: 0.15,
};

impl ParameterWeights {
    pub fn total(&self) -> f64 {
        self.dissolved_oxygen + self.ph + self.tds + self.turbidity + self.nitrate
    }
}

/// Intended use of the water; sets the TDS limit
///
/// Deserialises through [`WaterSector::from_key_or_default`], so any string is
/// accepted and unknown keys land on the fallback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WaterSector {
    Domestic,
    Agriculture,
    /// Fallback for unrecognised sector keys
    #[default]
    Industrial,
}

impl WaterSector {
    /// Total dissolved solids limit (mg/L)
    pub fn tds_standard(self) -> f64 {
        match self {
            WaterSector::Domestic => 500.0,
            WaterSector::Agriculture | WaterSector::Industrial => 2000.0,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            WaterSector::Domestic => "domestic",
            WaterSector::Agriculture => "agriculture",
            WaterSector::Industrial => "industrial",
        }
    }

    /// Parse a sector key, falling back to [`WaterSector::Industrial`]
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown water sector '{}', using industrial TDS standard", key);
            WaterSector::default()
        })
    }
}

impl FromStr for WaterSector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "domestic" => Ok(WaterSector::Domestic),
            "agriculture" => Ok(WaterSector::Agriculture),
            "industrial" => Ok(WaterSector::Industrial),
            other => Err(format!("unknown water sector '{}'", other)),
        }
    }
}

impl From<String> for WaterSector {
    fn from(key: String) -> Self {
        WaterSector::from_key_or_default(&key)
    }
}

impl From<WaterSector> for String {
    fn from(sector: WaterSector) -> Self {
        sector.key().to_string()
    }
}

impl fmt::Display for WaterSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// WQI quality class (lower WQI is better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WqiStatus {
    Excellent,
    Good,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Unsuitable,
}

/// Upper bounds (inclusive) of each class, checked in order
const WQI_CLASSES: [(f64, WqiStatus); 4] = [
    (25.0, WqiStatus::Excellent),
    (50.0, WqiStatus::Good),
    (75.0, WqiStatus::Poor),
    (100.0, WqiStatus::VeryPoor),
];

impl WqiStatus {
    /// Classify an unrounded WQI: [0,25], (25,50], (50,75], (75,100], above 100
    pub fn classify(wqi: f64) -> Self {
        WQI_CLASSES
            .iter()
            .find(|(upper, _)| wqi <= *upper)
            .map(|(_, status)| *status)
            .unwrap_or(WqiStatus::Unsuitable)
    }

    pub fn label(self) -> &'static str {
        match self {
            WqiStatus::Excellent => "Excellent",
            WqiStatus::Good => "Good",
            WqiStatus::Poor => "Poor",
            WqiStatus::VeryPoor => "Very Poor",
            WqiStatus::Unsuitable => "Unsuitable",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WqiStatus::Excellent => "Water is of excellent quality",
            WqiStatus::Good => "Water is generally safe for use",
            WqiStatus::Poor => "Water requires treatment",
            WqiStatus::VeryPoor => "Water is highly polluted",
            WqiStatus::Unsuitable => "Water is unsuitable for use",
        }
    }
}

impl fmt::Display for WqiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
