//! SOLAR ENERGY ECONOMICS
//!
//! Sizes a rooftop PV system from monthly consumption and a desired coverage
//! share, prices it for the customer's sector, and projects savings over a
//! 25-year panel life.
//!
//! Savings and the post-solar bill are two independent figures:
//!   - annual savings value every produced kWh at the blended tariff of the
//!     pre-solar consumption
//!   - the new bill re-tariffs the remaining consumption, which lands in lower
//!     bands of a progressive schedule
//! so `current_bill - new_bill` generally differs from `annual_savings`.

pub mod lookup_tables;
pub mod tariff;

pub use lookup_tables::{Governorate, Location, SolarSector, DEFAULT_PRODUCTION_FACTOR};
pub use tariff::{tiered_cost, weighted_tariff, TariffBand, TariffSchedule};

use crate::export::YearlyProduction;
use crate::utils::{round_half_up, round_to};
use serde::{Deserialize, Serialize};

/// Roof area needed per installed kWp (m²)
pub const AREA_PER_KWP_M2: f64 = 7.0;
/// Grid emission factor (kg CO₂ per kWh)
pub const GRID_CO2_KG_PER_KWH: f64 = 0.5;
/// CO₂ absorbed by one tree per year (kg)
pub const CO2_KG_PER_TREE: f64 = 22.0;
/// Annual panel output loss
pub const DEGRADATION_RATE: f64 = 0.01;
/// Length of the financial projection (years)
pub const PROJECTION_YEARS: u32 = 25;

/// Validated input for a solar estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarInput {
    /// Monthly electricity consumption (kWh, > 0)
    pub monthly_consumption_kwh: f64,
    /// Roof area available for panels (m², > 0)
    pub available_area_m2: f64,
    /// Share of annual consumption to cover with solar (0-100)
    pub coverage_percent: f64,
    pub location: Location,
    pub sector: SolarSector,
}

/// One year of the 25-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarYear {
    /// 1-based projection year
    pub year: u32,
    /// Production after degradation (kWh)
    pub production: f64,
    /// Savings net of maintenance (EGP)
    pub savings: f64,
    pub cumulative_savings: f64,
    /// CO₂ avoided this year (t)
    pub co2_saved: f64,
}

/// Result of a solar estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarResult {
    pub annual_consumption_kwh: f64,
    pub target_production_kwh: f64,
    pub system_size_kwp: f64,
    pub required_area: f64,
    pub available_area: f64,
    /// Advisory: available roof is smaller than the required area
    pub area_warning: bool,
    pub installation_cost: f64,
    pub annual_production: f64,
    /// Annual bill before solar (EGP)
    pub current_bill: f64,
    /// Annual bill for the consumption solar does not cover (EGP)
    pub new_bill: f64,
    pub annual_savings: f64,
    pub annual_maintenance_cost: f64,
    pub net_savings: f64,
    pub payback_years: f64,
    /// 25-year return on investment (%)
    pub roi: f64,
    pub co2_saving_tons: f64,
    pub trees_equivalent: f64,
    pub production_factor: f64,
    pub solar_coverage_percent: f64,
    /// Blended EGP/kWh on the pre-solar consumption
    pub weighted_tariff: f64,
    pub yearly_data: Vec<SolarYear>,
}

/// Calculate solar system size, economics and 25-year projection
pub fn calculate_solar(input: &SolarInput) -> SolarResult {
    let monthly_consumption = input.monthly_consumption_kwh;
    let sector = input.sector;

    let annual_consumption = monthly_consumption * 12.0;
    let target_production = annual_consumption * (input.coverage_percent / 100.0);
    let production_factor = input.location.production_factor();
    let system_size_kwp = target_production / production_factor;
    let required_area = system_size_kwp * AREA_PER_KWP_M2;
    let area_warning = input.available_area_m2 < required_area;
    let installation_cost = system_size_kwp * sector.cost_per_kwp();
    let annual_production = system_size_kwp * production_factor;

    let tariff = weighted_tariff(sector, monthly_consumption);
    let current_bill = monthly_consumption * tariff * 12.0;
    let annual_savings = annual_production * tariff;
    let annual_maintenance_cost = installation_cost * sector.maintenance_factor();
    let net_savings = annual_savings - annual_maintenance_cost;

    let remaining_monthly = (annual_consumption - annual_production).max(0.0) / 12.0;
    let new_tariff = if remaining_monthly > 0.0 {
        weighted_tariff(sector, remaining_monthly)
    } else {
        0.0
    };
    let new_bill = remaining_monthly * new_tariff * 12.0;

    let payback_years = installation_cost / net_savings;
    let total_net_savings = net_savings * PROJECTION_YEARS as f64;
    let roi = ((total_net_savings - installation_cost) / installation_cost) * 100.0;
    let co2_saving_tons = annual_production * GRID_CO2_KG_PER_KWH / 1000.0;
    let trees_equivalent = co2_saving_tons * 1000.0 / CO2_KG_PER_TREE;

    if area_warning {
        tracing::debug!(
            "Roof too small: {:.1} m² available, {:.1} m² required",
            input.available_area_m2,
            required_area
        );
    }

    let yearly_data = project_years(annual_production, tariff, annual_maintenance_cost);

    tracing::debug!(
        "Solar estimate: {:.2} kWp at {} ({}), tariff {:.3} EGP/kWh, payback {:.1} yr",
        system_size_kwp,
        input.location,
        sector,
        tariff,
        payback_years
    );

    SolarResult {
        annual_consumption_kwh: annual_consumption,
        target_production_kwh: target_production,
        system_size_kwp,
        required_area,
        available_area: input.available_area_m2,
        area_warning,
        installation_cost,
        annual_production,
        current_bill,
        new_bill,
        annual_savings,
        annual_maintenance_cost,
        net_savings,
        payback_years,
        roi,
        co2_saving_tons,
        trees_equivalent,
        production_factor,
        solar_coverage_percent: input.coverage_percent,
        weighted_tariff: tariff,
        yearly_data,
    }
}

/// Degrade production by 1%/year and accumulate net savings
fn project_years(annual_production: f64, tariff: f64, maintenance_cost: f64) -> Vec<SolarYear> {
    let mut yearly = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_savings = 0.0;
    let mut production = annual_production;

    for year in 1..=PROJECTION_YEARS {
        let savings = production * tariff - maintenance_cost;
        cumulative_savings += savings;

        yearly.push(SolarYear {
            year,
            production,
            savings,
            cumulative_savings,
            co2_saved: production * GRID_CO2_KG_PER_KWH / 1000.0,
        });

        production *= 1.0 - DEGRADATION_RATE;
    }

    yearly
}

impl SolarYear {
    /// Copy rounded for display (kWh and EGP whole, CO₂ to 0.1 t)
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            production: round_half_up(self.production),
            savings: round_half_up(self.savings),
            cumulative_savings: round_half_up(self.cumulative_savings),
            co2_saved: round_to(self.co2_saved, 1),
        }
    }
}

impl SolarResult {
    /// Copy rounded the way the solar dashboard displays it
    pub fn rounded(&self) -> Self {
        Self {
            annual_consumption_kwh: round_half_up(self.annual_consumption_kwh),
            target_production_kwh: round_half_up(self.target_production_kwh),
            system_size_kwp: round_to(self.system_size_kwp, 2),
            required_area: round_to(self.required_area, 1),
            available_area: self.available_area,
            area_warning: self.area_warning,
            installation_cost: round_half_up(self.installation_cost),
            annual_production: round_half_up(self.annual_production),
            current_bill: round_half_up(self.current_bill),
            new_bill: round_half_up(self.new_bill),
            annual_savings: round_half_up(self.annual_savings),
            annual_maintenance_cost: round_half_up(self.annual_maintenance_cost),
            net_savings: round_half_up(self.net_savings),
            payback_years: round_to(self.payback_years, 1),
            roi: round_to(self.roi, 1),
            co2_saving_tons: round_to(self.co2_saving_tons, 2),
            trees_equivalent: round_half_up(self.trees_equivalent),
            production_factor: self.production_factor,
            solar_coverage_percent: self.solar_coverage_percent,
            weighted_tariff: round_to(self.weighted_tariff, 2),
            yearly_data: self.yearly_data.iter().map(SolarYear::rounded).collect(),
        }
    }
}

impl YearlyProduction for SolarYear {
    fn year(&self) -> u32 {
        self.year
    }

    fn production_kwh(&self) -> f64 {
        self.production
    }
}
