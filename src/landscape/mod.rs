//! LANDSCAPE ENVIRONMENTAL IMPACT
//!
//! Estimates what a planted area gives back (CO₂ sequestration, oxygen) and
//! what it costs (irrigation water, planting and upkeep), condensed into a
//! 0-100 environmental score.
//!
//! Score weights: CO₂ 45%, O₂ 25%, water efficiency 30%. Each component is
//! normalised per m² against the best planting style in the factor table.

pub mod factors;
pub mod recommendations;

pub use factors::{
    PlantFactors, PlantType, Range, WaterSource, CO2_KG_PER_KM_DRIVEN, CO2_KG_PER_TREE_YEAR,
    O2_L_PER_PERSON_YEAR,
};
pub use recommendations::generate_recommendations;

use crate::error::EngineError;
use crate::utils::{normalize_value, round_half_up, round_to};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annual maintenance as a share of planting cost
pub const MAINTENANCE_RATE: f64 = 0.15;
/// Highest per-m² water demand in the factor table (turf, L/yr)
pub const MAX_WATER_USE_PER_M2: f64 = 1100.0;
/// Yearly sequestration growth of young trees
pub const TREE_MATURITY_RATE: f64 = 0.05;
/// Years until trees reach full canopy
pub const TREE_MATURITY_YEARS: u32 = 10;
pub const PROJECTION_YEARS: u32 = 25;

const CO2_NORM_MAX_PER_M2: f64 = 1.2;
const O2_NORM_MAX_PER_M2: f64 = 40_000.0;

/// Validated input for a landscape estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeInput {
    /// Planted area (m², > 0)
    #[serde(rename = "area")]
    pub area_m2: f64,
    pub plant_type: PlantType,
    pub water_source: WaterSource,
    /// Planting cost override (USD/m²); ignored unless positive
    #[serde(default)]
    pub cost_per_m2: Option<f64>,
    /// Years of upkeep in the total cost; absent or 0 means 1
    #[serde(default)]
    pub maintenance_years: Option<u32>,
}

impl LandscapeInput {
    /// Build an input from form keys, rejecting unknown plant types or sources
    pub fn from_keys(
        area_m2: f64,
        plant_type: &str,
        water_source: &str,
        cost_per_m2: Option<f64>,
        maintenance_years: Option<u32>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            area_m2,
            plant_type: plant_type.parse()?,
            water_source: water_source.parse()?,
            cost_per_m2,
            maintenance_years,
        })
    }

    /// Cost per m² in effect: a positive override, else the range midpoint
    pub fn effective_cost_per_m2(&self) -> f64 {
        self.cost_per_m2
            .filter(|cost| cost.is_finite() && *cost > 0.0)
            .unwrap_or_else(|| self.plant_type.factors().cost.midpoint())
    }

    pub fn effective_maintenance_years(&self) -> u32 {
        self.maintenance_years.filter(|years| *years > 0).unwrap_or(1)
    }
}

/// Environmental score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl ScoreCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            ScoreCategory::Excellent
        } else if score >= 60.0 {
            ScoreCategory::Good
        } else if score >= 40.0 {
            ScoreCategory::Moderate
        } else {
            ScoreCategory::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Poor => "Poor",
            ScoreCategory::Moderate => "Moderate",
            ScoreCategory::Good => "Good",
            ScoreCategory::Excellent => "Excellent",
        }
    }

    /// Dashboard badge colour
    pub fn color(self) -> &'static str {
        match self {
            ScoreCategory::Poor => "#ef4444",
            ScoreCategory::Moderate => "#f59e0b",
            ScoreCategory::Good => "#3b82f6",
            ScoreCategory::Excellent => "#10b981",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everyday equivalents of the annual benefit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalencies {
    pub car_km_equivalent: f64,
    pub trees_equivalent: f64,
    pub people_o2_equivalent: f64,
}

/// Factors the estimate was computed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorsUsed {
    pub co2_factor_per_m2: f64,
    pub o2_factor_per_m2: f64,
    pub water_use_per_m2: f64,
    pub cost_per_m2: f64,
}

/// One year of the 25-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeYear {
    pub year: u32,
    /// kg CO₂ sequestered this year
    pub co2_reduction: f64,
    #[serde(rename = "cumulativeCO2")]
    pub cumulative_co2: f64,
    /// L O₂ produced this year
    pub o2_production: f64,
    /// L water used this year
    pub water_use: f64,
}

/// Result of a landscape estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeResult {
    pub area_m2: f64,
    pub plant_type: PlantType,
    pub plant_description: String,
    pub water_source: WaterSource,
    #[serde(rename = "co2ReductionKgPerYear")]
    pub co2_reduction_kg_per_year: f64,
    #[serde(rename = "co2ReductionTonsPerYear")]
    pub co2_reduction_tons_per_year: f64,
    #[serde(rename = "o2ProductionLPerYear")]
    pub o2_production_l_per_year: f64,
    #[serde(rename = "o2ProductionM3PerYear")]
    pub o2_production_m3_per_year: f64,
    #[serde(rename = "waterConsumptionLPerYear")]
    pub water_consumption_l_per_year: f64,
    #[serde(rename = "waterConsumptionM3PerYear")]
    pub water_consumption_m3_per_year: f64,
    pub planting_cost: f64,
    pub annual_maintenance_cost: f64,
    pub total_cost: f64,
    pub maintenance_years: u32,
    /// 0-100, already rounded to 0.1
    pub env_score: f64,
    pub score_category: ScoreCategory,
    pub equivalencies: Equivalencies,
    pub recommendations: Vec<String>,
    pub yearly_data: Vec<LandscapeYear>,
    pub factors: FactorsUsed,
}

/// Calculate environmental benefit, water use, cost and 25-year projection
pub fn calculate_landscape(input: &LandscapeInput) -> LandscapeResult {
    let area = input.area_m2;
    let plant = input.plant_type.factors();

    let co2_kg = area * plant.co2;
    let o2_l = area * plant.o2;

    let water_use_per_m2 = plant.water.midpoint();
    let water_l = area * water_use_per_m2 * input.water_source.efficiency_factor();
    let water_efficiency = (1.0 - water_use_per_m2 / MAX_WATER_USE_PER_M2).clamp(0.0, 1.0);

    let cost_per_m2 = input.effective_cost_per_m2();
    let maintenance_years = input.effective_maintenance_years();
    let planting_cost = area * cost_per_m2;
    let annual_maintenance_cost = planting_cost * MAINTENANCE_RATE;
    let total_cost = planting_cost + annual_maintenance_cost * maintenance_years as f64;

    let env_score = environmental_score(co2_kg, o2_l, water_efficiency, area);
    let score_category = ScoreCategory::from_score(env_score);

    tracing::debug!(
        "Landscape estimate: {:.1} m² of {} on {}, score {:.1} ({})",
        area,
        input.plant_type,
        input.water_source,
        env_score,
        score_category
    );

    LandscapeResult {
        area_m2: area,
        plant_type: input.plant_type,
        plant_description: plant.description.to_string(),
        water_source: input.water_source,
        co2_reduction_kg_per_year: co2_kg,
        co2_reduction_tons_per_year: co2_kg / 1000.0,
        o2_production_l_per_year: o2_l,
        o2_production_m3_per_year: o2_l / 1000.0,
        water_consumption_l_per_year: water_l,
        water_consumption_m3_per_year: water_l / 1000.0,
        planting_cost,
        annual_maintenance_cost,
        total_cost,
        maintenance_years,
        env_score,
        score_category,
        equivalencies: Equivalencies {
            car_km_equivalent: co2_kg / CO2_KG_PER_KM_DRIVEN,
            trees_equivalent: co2_kg / CO2_KG_PER_TREE_YEAR,
            people_o2_equivalent: o2_l / O2_L_PER_PERSON_YEAR,
        },
        recommendations: generate_recommendations(input.plant_type, input.water_source, water_l, area),
        yearly_data: project_years(input.plant_type, co2_kg, o2_l, water_l),
        factors: FactorsUsed {
            co2_factor_per_m2: plant.co2,
            o2_factor_per_m2: plant.o2,
            water_use_per_m2,
            cost_per_m2,
        },
    }
}

/// Weighted 0-100 score, rounded to 0.1
fn environmental_score(co2_kg: f64, o2_l: f64, water_efficiency: f64, area: f64) -> f64 {
    let co2 = normalize_value(co2_kg / area, 0.0, CO2_NORM_MAX_PER_M2);
    let o2 = normalize_value(o2_l / area, 0.0, O2_NORM_MAX_PER_M2);

    let score = (co2 * 0.45 + o2 * 0.25 + water_efficiency * 0.30) * 100.0;
    round_to(score.clamp(0.0, 100.0), 1)
}

/// Trees grow 5%/year until maturity, then plateau; other plantings are flat
fn project_years(plant_type: PlantType, co2_kg: f64, o2_l: f64, water_l: f64) -> Vec<LandscapeYear> {
    let mut yearly = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut annual_co2 = co2_kg;
    let mut annual_o2 = o2_l;
    let mut cumulative_co2 = 0.0;

    for year in 1..=PROJECTION_YEARS {
        if plant_type == PlantType::ShadeTree && year <= TREE_MATURITY_YEARS {
            annual_co2 *= 1.0 + TREE_MATURITY_RATE;
            annual_o2 *= 1.0 + TREE_MATURITY_RATE;
        }
        cumulative_co2 += annual_co2;

        yearly.push(LandscapeYear {
            year,
            co2_reduction: annual_co2,
            cumulative_co2,
            o2_production: annual_o2,
            water_use: water_l,
        });
    }

    yearly
}

impl LandscapeYear {
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            co2_reduction: round_to(self.co2_reduction, 1),
            cumulative_co2: round_to(self.cumulative_co2, 1),
            o2_production: round_half_up(self.o2_production),
            water_use: round_half_up(self.water_use),
        }
    }
}

impl LandscapeResult {
    /// Copy rounded the way the landscape dashboard displays it
    pub fn rounded(&self) -> Self {
        Self {
            area_m2: round_to(self.area_m2, 1),
            plant_type: self.plant_type,
            plant_description: self.plant_description.clone(),
            water_source: self.water_source,
            co2_reduction_kg_per_year: round_to(self.co2_reduction_kg_per_year, 1),
            co2_reduction_tons_per_year: round_to(self.co2_reduction_tons_per_year, 2),
            o2_production_l_per_year: round_half_up(self.o2_production_l_per_year),
            o2_production_m3_per_year: round_to(self.o2_production_m3_per_year, 1),
            water_consumption_l_per_year: round_half_up(self.water_consumption_l_per_year),
            water_consumption_m3_per_year: round_to(self.water_consumption_m3_per_year, 1),
            planting_cost: round_half_up(self.planting_cost),
            annual_maintenance_cost: round_half_up(self.annual_maintenance_cost),
            total_cost: round_half_up(self.total_cost),
            maintenance_years: self.maintenance_years,
            env_score: self.env_score,
            score_category: self.score_category,
            equivalencies: Equivalencies {
                car_km_equivalent: round_half_up(self.equivalencies.car_km_equivalent),
                trees_equivalent: round_to(self.equivalencies.trees_equivalent, 1),
                people_o2_equivalent: round_to(self.equivalencies.people_o2_equivalent, 1),
            },
            recommendations: self.recommendations.clone(),
            yearly_data: self.yearly_data.iter().map(LandscapeYear::rounded).collect(),
            factors: FactorsUsed {
                water_use_per_m2: round_half_up(self.factors.water_use_per_m2),
                cost_per_m2: round_to(self.factors.cost_per_m2, 2),
                ..self.factors.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(plant_type: PlantType, water_source: WaterSource, area_m2: f64) -> LandscapeInput {
        LandscapeInput {
            area_m2,
            plant_type,
            water_source,
            cost_per_m2: None,
            maintenance_years: None,
        }
    }

    #[test]
    fn test_shade_tree_benefits() {
        let result = calculate_landscape(&input(PlantType::ShadeTree, WaterSource::TreatedWater, 200.0));

        assert_eq!(result.co2_reduction_kg_per_year, 200.0);
        assert_relative_eq!(result.co2_reduction_tons_per_year, 0.2, epsilon = 1e-12);
        assert_eq!(result.o2_production_l_per_year, 7_300_000.0);
        assert_relative_eq!(result.water_consumption_l_per_year, 200.0 * 400.0 * 0.8, epsilon = 1e-9);
        assert_relative_eq!(result.equivalencies.car_km_equivalent, 200.0 / 0.404, epsilon = 1e-9);
        assert_relative_eq!(result.equivalencies.trees_equivalent, 200.0 / 21.77, epsilon = 1e-9);
        assert_relative_eq!(result.equivalencies.people_o2_equivalent, 7_300_000.0 / 230_000.0, epsilon = 1e-9);
        assert_eq!(result.plant_description, "Urban canopy trees with high CO₂ sequestration");
    }

    #[test]
    fn test_env_scores_per_plant_type() {
        let score = |plant| calculate_landscape(&input(plant, WaterSource::DrinkingWater, 100.0));

        let trees = score(PlantType::ShadeTree);
        assert_eq!(trees.env_score, 79.4);
        assert_eq!(trees.score_category, ScoreCategory::Excellent);

        let turf = score(PlantType::GrassTurf);
        assert_eq!(turf.env_score, 7.1);
        assert_eq!(turf.score_category, ScoreCategory::Poor);

        assert_eq!(score(PlantType::DesertPlants).env_score, 27.4);
        assert_eq!(score(PlantType::DecorativePlants).env_score, 24.0);
    }

    #[test]
    fn test_score_ignores_water_source() {
        let drinking = calculate_landscape(&input(PlantType::DesertPlants, WaterSource::DrinkingWater, 80.0));
        let rain = calculate_landscape(&input(PlantType::DesertPlants, WaterSource::Rainwater, 80.0));
        assert_eq!(drinking.env_score, rain.env_score);
        assert!(rain.water_consumption_l_per_year < drinking.water_consumption_l_per_year);
    }

    #[test]
    fn test_score_categories() {
        assert_eq!(ScoreCategory::from_score(75.0), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::from_score(74.9), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(60.0), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(40.0), ScoreCategory::Moderate);
        assert_eq!(ScoreCategory::from_score(39.9), ScoreCategory::Poor);
    }

    #[test]
    fn test_costs_with_defaults() {
        let result = calculate_landscape(&input(PlantType::GrassTurf, WaterSource::Rainwater, 100.0));
        // midpoint of 2-10 USD/m²
        assert_eq!(result.factors.cost_per_m2, 6.0);
        assert_eq!(result.planting_cost, 600.0);
        assert_relative_eq!(result.annual_maintenance_cost, 90.0, epsilon = 1e-9);
        assert_eq!(result.maintenance_years, 1);
        assert_relative_eq!(result.total_cost, 690.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cost_override_and_years() {
        let mut plan = input(PlantType::GrassTurf, WaterSource::Rainwater, 100.0);
        plan.cost_per_m2 = Some(8.0);
        plan.maintenance_years = Some(5);
        let result = calculate_landscape(&plan);
        assert_eq!(result.planting_cost, 800.0);
        assert_relative_eq!(result.total_cost, 800.0 + 120.0 * 5.0, epsilon = 1e-9);

        plan.cost_per_m2 = Some(0.0);
        plan.maintenance_years = Some(0);
        let result = calculate_landscape(&plan);
        assert_eq!(result.factors.cost_per_m2, 6.0);
        assert_eq!(result.maintenance_years, 1);
    }

    #[test]
    fn test_shade_tree_growth_plateaus() {
        let result = calculate_landscape(&input(PlantType::ShadeTree, WaterSource::Rainwater, 100.0));
        let years = &result.yearly_data;

        assert_eq!(years.len(), 25);
        assert_relative_eq!(years[0].co2_reduction, 105.0, epsilon = 1e-9);
        assert_relative_eq!(years[9].co2_reduction, years[0].co2_reduction * 1.05f64.powi(9), epsilon = 1e-9);
        assert_eq!(years[10].co2_reduction, years[9].co2_reduction);
        assert_eq!(years[24].co2_reduction, years[9].co2_reduction);

        let total: f64 = years.iter().map(|y| y.co2_reduction).sum();
        assert_relative_eq!(years[24].cumulative_co2, total, epsilon = 1e-9);
    }

    #[test]
    fn test_turf_projection_is_flat() {
        let result = calculate_landscape(&input(PlantType::GrassTurf, WaterSource::DrinkingWater, 120.0));
        let first = &result.yearly_data[0];
        assert!(result.yearly_data.iter().all(|y| y.co2_reduction == first.co2_reduction));
        assert!(result.yearly_data.iter().all(|y| y.water_use == result.water_consumption_l_per_year));
        assert_relative_eq!(result.yearly_data[24].cumulative_co2, 25.0 * 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_keys_rejects_unknown_plant() {
        let err = LandscapeInput::from_keys(100.0, "Bamboo", "Rainwater", None, None).unwrap_err();
        assert_eq!(err, EngineError::InvalidPlantType("Bamboo".to_string()));
        assert!(LandscapeInput::from_keys(100.0, "ShadeTree", "Rainwater", None, None).is_ok());
    }

    #[test]
    fn test_deserialize_form_payload() {
        let json = r#"{"area": 250, "plantType": "DesertPlants", "waterSource": "Rainwater", "maintenanceYears": 3}"#;
        let plan: LandscapeInput = serde_json::from_str(json).unwrap();
        assert_eq!(plan.plant_type, PlantType::DesertPlants);
        assert_eq!(plan.cost_per_m2, None);

        let bad = r#"{"area": 250, "plantType": "Moss", "waterSource": "Rainwater"}"#;
        assert!(serde_json::from_str::<LandscapeInput>(bad).is_err());
    }

    #[test]
    fn test_rounded() {
        let rounded = calculate_landscape(&input(PlantType::DesertPlants, WaterSource::TreatedWater, 340.0)).rounded();
        assert_eq!(rounded.co2_reduction_kg_per_year, 11.9);
        assert_eq!(rounded.co2_reduction_tons_per_year, 0.01);
        assert_eq!(rounded.water_consumption_l_per_year, 40_800.0);
        assert_eq!(rounded.factors.cost_per_m2, 3.5);
    }
}
