//! CSV export of yearly production series
//!
//! Produces the `Year,AnnualProduction(kWh)` report offered under
//! "Export Report" on the dashboards.

use crate::utils::round_half_up;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Header of the year column
pub const YEAR_COLUMN: &str = "Year";
/// Header of the production column
pub const PRODUCTION_COLUMN: &str = "AnnualProduction(kWh)";

/// A yearly entry of a production projection
pub trait YearlyProduction {
    /// Year as stored in the series (1-based projection year or calendar year)
    fn year(&self) -> u32;
    /// Production for that year (kWh)
    fn production_kwh(&self) -> f64;
}

/// Build the export table
///
/// With `base_year`, a 1-based projection year `n` is labelled
/// `base_year + n - 1`; without it the series' own year is used.
pub fn production_frame<T: YearlyProduction>(series: &[T], base_year: Option<u32>) -> Result<DataFrame> {
    let years: Vec<i64> = series
        .iter()
        .map(|entry| match base_year {
            Some(base) => base as i64 + entry.year() as i64 - 1,
            None => entry.year() as i64,
        })
        .collect();
    let production: Vec<i64> = series
        .iter()
        .map(|entry| round_half_up(entry.production_kwh()) as i64)
        .collect();

    let df = df! {
        YEAR_COLUMN => years,
        PRODUCTION_COLUMN => production,
    }?;

    Ok(df)
}

/// Render a production series as CSV text (header row + one row per year)
pub fn production_csv<T: YearlyProduction>(series: &[T], base_year: Option<u32>) -> Result<String> {
    let mut df = production_frame(series, base_year)?;

    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write production CSV")?;

    String::from_utf8(buf).context("Production CSV is not valid UTF-8")
}

/// Write a production series to a CSV file
pub fn write_production_csv<T: YearlyProduction>(
    series: &[T],
    base_year: Option<u32>,
    path: &Path,
) -> Result<()> {
    let mut df = production_frame(series, base_year)?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create export file: {:?}", path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    tracing::info!("Exported {} yearly rows to {:?}", series.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u32, f64);

    impl YearlyProduction for Row {
        fn year(&self) -> u32 {
            self.0
        }
        fn production_kwh(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_header_and_rows() {
        let series = vec![Row(1, 8640.0), Row(2, 8553.6), Row(3, 8468.06)];
        let csv = production_csv(&series, None).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Year,AnnualProduction(kWh)");
        assert_eq!(lines[1], "1,8640");
        assert_eq!(lines[2], "2,8554");
        assert_eq!(lines[3], "3,8468");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_base_year_labels() {
        let series = vec![Row(1, 100.0), Row(2, 99.0)];
        let csv = production_csv(&series, Some(2025)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[1], "2025,100");
        assert_eq!(lines[2], "2026,99");
    }
}
