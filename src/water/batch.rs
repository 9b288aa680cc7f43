//! Batch WQI processing for multiple monitoring points
//!
//! Evaluates every uploaded sample, then summarises per location and across
//! the whole upload. Samples are independent, so evaluation runs on the rayon
//! pool; output keeps upload order.
//!
//! CSV uploads use the column names of the single-sample form:
//!   location, pH, dissolvedOxygen, TDS, turbidity, nitrate, BOD, sectorType
//! plus an optional `date` column (YYYY-MM-DD).

use super::{calculate_wqi, WaterInput, WaterResult, WaterSector, WqiStatus};
use crate::utils::round_to;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One uploaded sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPoint {
    pub location: String,
    pub date: Option<String>,
    #[serde(flatten)]
    pub reading: WaterInput,
}

/// Evaluation of one sample (figures rounded as displayed and aggregated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub location: String,
    pub date: String,
    #[serde(flatten)]
    pub result: WaterResult,
}

/// WQI statistics for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationStats {
    pub location: String,
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Upload-wide summary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_points: usize,
    #[serde(rename = "averageWQI")]
    pub average_wqi: f64,
    pub excellent_count: usize,
    pub good_count: usize,
    pub poor_count: usize,
    pub very_poor_count: usize,
    pub unsuitable_count: usize,
}

/// Full batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<PointResult>,
    /// Sorted by location name
    pub location_stats: Vec<LocationStats>,
    pub summary: BatchSummary,
}

/// Evaluate all monitoring points and aggregate per location
///
/// `today` is used as the sample date when a point has none.
pub fn process_water_quality_data(points: &[MonitoringPoint], today: NaiveDate) -> BatchReport {
    let default_date = today.format("%Y-%m-%d").to_string();

    let results: Vec<PointResult> = points
        .par_iter()
        .map(|point| PointResult {
            location: point.location.clone(),
            date: point.date.clone().unwrap_or_else(|| default_date.clone()),
            result: calculate_wqi(&point.reading).rounded(),
        })
        .collect();

    let location_stats = location_stats(&results);
    let summary = summarize(&results);

    tracing::info!(
        "Processed {} monitoring points across {} locations (average WQI {:.1})",
        summary.total_points,
        location_stats.len(),
        summary.average_wqi
    );

    BatchReport {
        results,
        location_stats,
        summary,
    }
}

fn location_stats(results: &[PointResult]) -> Vec<LocationStats> {
    let mut by_location: FxHashMap<&str, Vec<f64>> = FxHashMap::default();
    for result in results {
        by_location
            .entry(result.location.as_str())
            .or_default()
            .push(result.result.wqi);
    }

    let mut stats: Vec<LocationStats> = by_location
        .into_iter()
        .map(|(location, values)| {
            let sum: f64 = values.iter().sum();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            LocationStats {
                location: location.to_string(),
                count: values.len(),
                average: round_to(sum / values.len() as f64, 1),
                min: round_to(min, 1),
                max: round_to(max, 1),
            }
        })
        .collect();

    stats.sort_by(|a, b| a.location.cmp(&b.location));
    stats
}

fn summarize(results: &[PointResult]) -> BatchSummary {
    let count = |status: WqiStatus| results.iter().filter(|r| r.result.status == status).count();

    let average_wqi = if results.is_empty() {
        0.0
    } else {
        round_to(results.iter().map(|r| r.result.wqi).sum::<f64>() / results.len() as f64, 1)
    };

    BatchSummary {
        total_points: results.len(),
        average_wqi,
        excellent_count: count(WqiStatus::Excellent),
        good_count: count(WqiStatus::Good),
        poor_count: count(WqiStatus::Poor),
        very_poor_count: count(WqiStatus::VeryPoor),
        unsuitable_count: count(WqiStatus::Unsuitable),
    }
}

// ============================================================================
// CSV INGESTION
// ============================================================================

/// Load monitoring points from a CSV file
pub fn load_monitoring_points(path: &Path) -> Result<Vec<MonitoringPoint>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open monitoring data: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to parse monitoring data: {:?}", path))?;

    points_from_frame(&df)
}

/// Parse monitoring points from in-memory CSV bytes
pub fn read_monitoring_points(csv: &[u8]) -> Result<Vec<MonitoringPoint>> {
    let cursor = std::io::Cursor::new(csv.to_vec());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
        .context("Failed to parse monitoring data")?;

    points_from_frame(&df)
}

fn points_from_frame(df: &DataFrame) -> Result<Vec<MonitoringPoint>> {
    let locations = string_column(df, "location")?;
    let sectors = string_column(df, "sectorType")?;
    let ph = float_column(df, "pH")?;
    let dissolved_oxygen = float_column(df, "dissolvedOxygen")?;
    let tds = float_column(df, "TDS")?;
    let turbidity = float_column(df, "turbidity")?;
    let nitrate = float_column(df, "nitrate")?;
    let bod = float_column(df, "BOD")?;
    let dates = if df.column("date").is_ok() {
        string_column(df, "date")?
    } else {
        vec![None; df.height()]
    };

    let mut points = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let value = |values: &[Option<f64>], name: &str| {
            values[row].with_context(|| format!("Row {}: missing value for column '{}'", row + 1, name))
        };

        let location = locations[row]
            .clone()
            .with_context(|| format!("Row {}: missing value for column 'location'", row + 1))?;
        let sector = sectors[row]
            .as_deref()
            .map(WaterSector::from_key_or_default)
            .unwrap_or_default();

        points.push(MonitoringPoint {
            location,
            date: dates[row].clone().filter(|d| !d.trim().is_empty()),
            reading: WaterInput {
                ph: value(&ph, "pH")?,
                dissolved_oxygen: value(&dissolved_oxygen, "dissolvedOxygen")?,
                tds: value(&tds, "TDS")?,
                turbidity: value(&turbidity, "turbidity")?,
                nitrate: value(&nitrate, "nitrate")?,
                bod: value(&bod, "BOD")?,
                sector,
            },
        });
    }

    tracing::debug!("Parsed {} monitoring points", points.len());
    Ok(points)
}

/// Numeric column; empty cells stay `None`, unparsable text is an error
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let raw = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?;
    let values: Vec<Option<f64>> = raw
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?
        .f64()?
        .into_iter()
        .collect();

    // Text columns cast non-strictly: a filled cell that became null did not parse
    if raw.dtype() == &DataType::String {
        for (row, (text, value)) in raw.str()?.into_iter().zip(&values).enumerate() {
            if let (Some(text), None) = (text, value) {
                if !text.trim().is_empty() {
                    bail!("Row {}: value '{}' in column '{}' is not numeric", row + 1, text, name);
                }
            }
        }
    }

    Ok(values)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::String)?;
    let values = col.str()?.into_iter().map(|opt| opt.map(str::to_string)).collect();
    Ok(values)
}
