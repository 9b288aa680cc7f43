//! WATER QUALITY INDEX (WQI)
//!
//! Each reading is expressed as a percentage of its standard (sub-index) and
//! the five sub-indices are blended with fixed weights. Lower is better.
//! Dissolved oxygen is inverted (standard ÷ measured) because more oxygen is
//! better. Sub-indices are NOT clamped: a badly out-of-range reading can push
//! the WQI above 100, which classifies as Unsuitable.
//!
//! BOD only drives treatment recommendations; it has no weight in the WQI.

pub mod batch;
pub mod standards;

pub use batch::{
    load_monitoring_points, process_water_quality_data, read_monitoring_points, BatchReport,
    BatchSummary, LocationStats, MonitoringPoint, PointResult,
};
pub use standards::{WaterSector, WqiStatus, PARAMETER_WEIGHTS};

use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use standards::{BOD_MAX, DO_MIN, NITRATE_MAX, PH_MAX, PH_MIN, TURBIDITY_MAX};

/// Laboratory or field readings for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterInput {
    #[serde(rename = "pH")]
    pub ph: f64,
    /// mg/L
    pub dissolved_oxygen: f64,
    /// Total dissolved solids (mg/L)
    #[serde(rename = "TDS")]
    pub tds: f64,
    /// NTU
    pub turbidity: f64,
    /// mg/L
    pub nitrate: f64,
    /// Biochemical oxygen demand (mg/L)
    #[serde(rename = "BOD")]
    pub bod: f64,
    #[serde(rename = "sectorType")]
    pub sector: WaterSector,
}

/// Per-parameter sub-indices (% of standard)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubIndices {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub dissolved_oxygen: f64,
    #[serde(rename = "TDS")]
    pub tds: f64,
    pub turbidity: f64,
    pub nitrate: f64,
}

/// A reading with its sub-index and the standard it was compared against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterReading {
    pub value: f64,
    /// `None` for parameters outside the index (BOD)
    pub index: Option<f64>,
    pub standard: String,
}

/// Reading table shown on the water dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterTable {
    #[serde(rename = "pH")]
    pub ph: ParameterReading,
    pub dissolved_oxygen: ParameterReading,
    #[serde(rename = "TDS")]
    pub tds: ParameterReading,
    pub turbidity: ParameterReading,
    pub nitrate: ParameterReading,
    #[serde(rename = "BOD")]
    pub bod: ParameterReading,
}

/// Result of a WQI evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterResult {
    pub wqi: f64,
    pub status: WqiStatus,
    pub description: String,
    pub sub_indices: SubIndices,
    pub recommendations: Vec<String>,
    pub parameters: ParameterTable,
}

/// Calculate the weighted Water Quality Index for one sample
pub fn calculate_wqi(input: &WaterInput) -> WaterResult {
    let tds_standard = input.sector.tds_standard();

    let sub_indices = SubIndices {
        ph: (input.ph / PH_MAX) * 100.0,
        dissolved_oxygen: (DO_MIN / input.dissolved_oxygen) * 100.0,
        tds: (input.tds / tds_standard) * 100.0,
        turbidity: (input.turbidity / TURBIDITY_MAX) * 100.0,
        nitrate: (input.nitrate / NITRATE_MAX) * 100.0,
    };

    let weights = PARAMETER_WEIGHTS;
    let wqi = (sub_indices.dissolved_oxygen * weights.dissolved_oxygen
        + sub_indices.ph * weights.ph
        + sub_indices.tds * weights.tds
        + sub_indices.turbidity * weights.turbidity
        + sub_indices.nitrate * weights.nitrate)
        / weights.total();

    let status = WqiStatus::classify(wqi);
    let recommendations = generate_recommendations(input, tds_standard);

    tracing::debug!(
        "WQI {:.1} ({}) for {} sample, {} recommendation(s)",
        wqi,
        status,
        input.sector,
        recommendations.len()
    );

    WaterResult {
        wqi,
        status,
        description: status.description().to_string(),
        sub_indices,
        recommendations,
        parameters: parameter_table(input, &sub_indices, tds_standard),
    }
}

/// Treatment advice from raw readings compared to absolute standards
fn generate_recommendations(input: &WaterInput, tds_standard: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if input.ph < PH_MIN {
        recommendations.push("pH is too low (acidic). Consider adding alkaline treatment or lime.".to_string());
    } else if input.ph > PH_MAX {
        recommendations.push("pH is too high (alkaline). Consider acidification treatment.".to_string());
    }

    if input.dissolved_oxygen < DO_MIN {
        recommendations.push(
            "Dissolved oxygen is below required level. Aeration or oxygenation is needed.".to_string(),
        );
    }

    if input.tds > tds_standard {
        recommendations.push(format!(
            "Total dissolved solids exceed {} standards. Reverse osmosis or distillation recommended.",
            input.sector
        ));
    }

    if input.turbidity > TURBIDITY_MAX {
        recommendations.push("Turbidity is high. Filtration and sedimentation treatment required.".to_string());
    }

    if input.nitrate > NITRATE_MAX {
        recommendations.push("Nitrate levels are high. Ion exchange or biological treatment needed.".to_string());
    }

    if input.bod > BOD_MAX {
        recommendations.push(
            "Biological oxygen demand is high. Biological treatment or disinfection required.".to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Water quality is within acceptable standards. Regular monitoring recommended.".to_string(),
        );
    }

    recommendations
}

fn parameter_table(input: &WaterInput, q: &SubIndices, tds_standard: f64) -> ParameterTable {
    let reading = |value: f64, index: Option<f64>, standard: String| ParameterReading {
        value,
        index,
        standard,
    };

    ParameterTable {
        ph: reading(input.ph, Some(q.ph), format!("{}-{}", PH_MIN, PH_MAX)),
        dissolved_oxygen: reading(
            input.dissolved_oxygen,
            Some(q.dissolved_oxygen),
            format!("≥{} mg/L", DO_MIN),
        ),
        tds: reading(input.tds, Some(q.tds), format!("≤{} mg/L", tds_standard)),
        turbidity: reading(input.turbidity, Some(q.turbidity), format!("≤{} NTU", TURBIDITY_MAX)),
        nitrate: reading(input.nitrate, Some(q.nitrate), format!("≤{} mg/L", NITRATE_MAX)),
        bod: reading(input.bod, None, format!("≤{} mg/L", BOD_MAX)),
    }
}

impl SubIndices {
    fn rounded(&self) -> Self {
        Self {
            ph: round_to(self.ph, 1),
            dissolved_oxygen: round_to(self.dissolved_oxygen, 1),
            tds: round_to(self.tds, 1),
            turbidity: round_to(self.turbidity, 1),
            nitrate: round_to(self.nitrate, 1),
        }
    }
}

impl ParameterReading {
    fn rounded(&self) -> Self {
        Self {
            value: self.value,
            index: self.index.map(|idx| round_to(idx, 1)),
            standard: self.standard.clone(),
        }
    }
}

impl WaterResult {
    /// Copy with WQI and indices rounded to 0.1 (status is kept from the exact WQI)
    pub fn rounded(&self) -> Self {
        let p = &self.parameters;
        Self {
            wqi: round_to(self.wqi, 1),
            status: self.status,
            description: self.description.clone(),
            sub_indices: self.sub_indices.rounded(),
            recommendations: self.recommendations.clone(),
            parameters: ParameterTable {
                ph: p.ph.rounded(),
                dissolved_oxygen: p.dissolved_oxygen.rounded(),
                tds: p.tds.rounded(),
                turbidity: p.turbidity.rounded(),
                nitrate: p.nitrate.rounded(),
                bod: p.bod.rounded(),
            },
        }
    }
}
