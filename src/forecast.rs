//! SOLAR FORECAST SIMULATOR
//!
//! A panel-level production model, coarser than the tariff-based estimate in
//! [`crate::solar`]. Starts from 4.5 peak-sun-hours per kW per day, scaled by
//! panel technology, site irradiance, mounting and grid connection, then
//! spreads the daily yield over hours, months and a 25-year horizon.

use crate::export::YearlyProduction;
use crate::utils::{round_half_up, round_to};
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::RangeInclusive;

/// Peak-sun-hour equivalent for a reference kW (kWh/kW/day)
pub const BASE_DAILY_YIELD: f64 = 4.5;
/// Annual panel degradation in the forecast model
pub const FORECAST_DEGRADATION: f64 = 0.005;
/// Starting electricity price (EGP/kWh)
pub const BASE_ELECTRICITY_COST: f64 = 1.5;
/// Yearly electricity price inflation
pub const ELECTRICITY_INFLATION: f64 = 0.03;
pub const CO2_KG_PER_KWH: f64 = 0.5;
pub const FORECAST_YEARS: u32 = 25;
pub const DEFAULT_BASE_YEAR: u32 = 2025;
/// Accepted first calendar years of a projection
pub const BASE_YEAR_RANGE: RangeInclusive<u32> = 1900..=9999;
/// File name offered for the yearly production export
pub const EXPORT_FILE_NAME: &str = "solar_yearly_production.csv";

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    #[default]
    Monocrystalline,
    Polycrystalline,
    Bifacial,
}

impl PanelType {
    pub fn efficiency_factor(self) -> f64 {
        match self {
            PanelType::Monocrystalline => 1.0,
            PanelType::Polycrystalline => 0.9,
            PanelType::Bifacial => 1.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationType {
    #[default]
    Rooftop,
    GroundMounted,
}

impl InstallationType {
    pub fn factor(self) -> f64 {
        match self {
            InstallationType::Rooftop => 1.0,
            InstallationType::GroundMounted => 1.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridConnection {
    #[default]
    Grid,
    OffGrid,
}

impl GridConnection {
    pub fn factor(self) -> f64 {
        match self {
            GridConnection::Grid => 1.0,
            GridConnection::OffGrid => 0.85,
        }
    }
}

/// Relative irradiance of a free-text site description
///
/// Matches the first known city named in the text; anything else is 1.0.
pub fn irradiance_factor(location: &str) -> f64 {
    if location.contains("Cairo") {
        1.0
    } else if location.contains("Alexandria") {
        0.95
    } else if location.contains("Aswan") {
        1.1
    } else {
        1.0
    }
}

/// Simulator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastParameters {
    pub location: String,
    /// Rated power per panel (W)
    #[serde(rename = "panelSize")]
    pub panel_size_w: f64,
    pub panel_count: u32,
    /// Up-front investment (EGP)
    pub investment: f64,
    pub grid_connection: GridConnection,
    pub panel_type: PanelType,
    pub installation_type: InstallationType,
    /// Calendar year of the first projected year
    #[serde(deserialize_with = "deserialize_base_year")]
    pub base_year: u32,
}

/// Whether `year` can start a projection
pub fn is_valid_base_year(year: u32) -> bool {
    BASE_YEAR_RANGE.contains(&year)
}

fn deserialize_base_year<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let year = u32::deserialize(deserializer)?;
    if is_valid_base_year(year) {
        Ok(year)
    } else {
        Err(serde::de::Error::custom(format!(
            "baseYear {} outside {}..={}",
            year,
            BASE_YEAR_RANGE.start(),
            BASE_YEAR_RANGE.end()
        )))
    }
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            location: "Cairo, Egypt".to_string(),
            panel_size_w: 330.0,
            panel_count: 100,
            investment: 500_000.0,
            grid_connection: GridConnection::Grid,
            panel_type: PanelType::Monocrystalline,
            installation_type: InstallationType::Rooftop,
            base_year: DEFAULT_BASE_YEAR,
        }
    }
}

impl ForecastParameters {
    /// Installed capacity (kW)
    pub fn capacity_kw(&self) -> f64 {
        self.panel_size_w * self.panel_count as f64 / 1000.0
    }

    /// First calendar year of the projection; out-of-range years use the default
    pub fn first_year(&self) -> u32 {
        if is_valid_base_year(self.base_year) {
            self.base_year
        } else {
            tracing::warn!(
                "Base year {} outside {}..={}, using {}",
                self.base_year,
                BASE_YEAR_RANGE.start(),
                BASE_YEAR_RANGE.end(),
                DEFAULT_BASE_YEAR
            );
            DEFAULT_BASE_YEAR
        }
    }

    /// Daily yield per installed kW after all site factors (kWh/kW/day)
    pub fn daily_yield_per_kw(&self) -> f64 {
        BASE_DAILY_YIELD
            * self.panel_type.efficiency_factor()
            * irradiance_factor(&self.location)
            * self.installation_type.factor()
            * self.grid_connection.factor()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyProduction {
    pub hour: u32,
    /// kWh, 0.01 resolution
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProduction {
    pub month: String,
    /// Whole kWh
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastYear {
    /// Calendar year
    pub year: u32,
    /// Whole kWh
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTrend {
    pub year: u32,
    /// EGP/kWh
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationPoint {
    pub year: u32,
    /// % of initial panel efficiency
    pub efficiency: f64,
}

/// Full simulator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub daily_production: Vec<HourlyProduction>,
    pub monthly_production: Vec<MonthlyProduction>,
    pub yearly_production: Vec<ForecastYear>,
    pub cost_trends: Vec<CostTrend>,
    pub degradation: Vec<DegradationPoint>,
    /// First-year production (kWh)
    pub total_production: f64,
    pub average_daily_production: f64,
    /// Highest hourly production on a typical day (kWh)
    pub peak_production: f64,
    /// kg CO₂ avoided in the first year
    pub co2_reduction: f64,
    /// Simple payback in years; `None` when the system saves nothing
    pub roi: Option<f64>,
}

/// Run the forecast model
pub fn simulate(params: &ForecastParameters) -> ForecastResult {
    let capacity = params.capacity_kw();
    let daily_yield = params.daily_yield_per_kw();
    let first_year = params.first_year();

    let daily_production: Vec<HourlyProduction> = (0..24)
        .map(|hour| {
            let production = if (6..=18).contains(&hour) {
                let hour_factor = 1.0 - (hour as f64 - 12.0).abs() / 6.0;
                capacity * daily_yield * hour_factor * hour_factor
            } else {
                0.0
            };
            HourlyProduction {
                hour,
                production: round_to(production, 2),
            }
        })
        .collect();

    let monthly_production: Vec<MonthlyProduction> = MONTH_NAMES
        .iter()
        .zip(DAYS_IN_MONTH)
        .enumerate()
        .map(|(index, (month, days))| MonthlyProduction {
            month: month.to_string(),
            production: round_half_up(capacity * daily_yield * seasonal_factor(index) * days as f64),
        })
        .collect();

    let total_production: f64 = monthly_production.iter().map(|m| m.production).sum();

    let yearly_production = (0..FORECAST_YEARS)
        .map(|i| ForecastYear {
            year: first_year + i,
            production: round_half_up(total_production * (1.0 - FORECAST_DEGRADATION).powi(i as i32)),
        })
        .collect();

    let cost_trends = (0..FORECAST_YEARS)
        .map(|i| CostTrend {
            year: first_year + i,
            cost: round_to(BASE_ELECTRICITY_COST * (1.0 + ELECTRICITY_INFLATION).powi(i as i32), 2),
        })
        .collect();

    let degradation = (0..FORECAST_YEARS)
        .map(|i| DegradationPoint {
            year: first_year + i,
            efficiency: round_to(100.0 * (1.0 - FORECAST_DEGRADATION).powi(i as i32), 2),
        })
        .collect();

    let peak_production = daily_production
        .iter()
        .map(|h| h.production)
        .fold(0.0, f64::max);

    let annual_savings = total_production * BASE_ELECTRICITY_COST;
    let roi = (annual_savings > 0.0).then(|| round_to(params.investment / annual_savings, 1));

    tracing::debug!(
        "Forecast: {:.1} kW at '{}', {:.2} kWh/kW/day, {:.0} kWh in year one",
        capacity,
        params.location,
        daily_yield,
        total_production
    );

    ForecastResult {
        daily_production,
        monthly_production,
        yearly_production,
        cost_trends,
        degradation,
        total_production,
        average_daily_production: round_half_up(total_production / 365.0),
        peak_production,
        co2_reduction: round_half_up(total_production * CO2_KG_PER_KWH),
        roi,
    }
}

/// Summer months (May-Sep) 1.2, winter months (Nov-Feb) 0.8
fn seasonal_factor(month_index: usize) -> f64 {
    match month_index {
        4..=8 => 1.2,
        0 | 1 | 10 | 11 => 0.8,
        _ => 1.0,
    }
}

impl YearlyProduction for ForecastYear {
    fn year(&self) -> u32 {
        self.year
    }

    fn production_kwh(&self) -> f64 {
        self.production
    }
}

// ============================================================================
// SIMULATED LOADING
// ============================================================================

/// Progress indicator shown while a simulation "runs"
///
/// Advances 5 points per step and stops at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationProgress {
    percent: u8,
}

impl SimulationProgress {
    pub const STEP: u8 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    /// Advance one step; returns the new percentage
    pub fn advance(&mut self) -> u8 {
        self.percent = (self.percent + Self::STEP).min(100);
        self.percent
    }

    pub fn finish(&mut self) {
        self.percent = 100;
    }

    pub fn stage(&self) -> &'static str {
        match self.percent {
            0..=29 => "Analyzing location data...",
            30..=59 => "Calculating solar production...",
            60..=89 => "Generating financial projections...",
            _ => "Finalizing results...",
        }
    }
}

impl Iterator for SimulationProgress {
    type Item = (u8, &'static str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_complete() {
            return None;
        }
        self.advance();
        Some((self.percent, self.stage()))
    }
}
