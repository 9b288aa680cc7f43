//! UrbanEco Estimation Engine
//!
//! Deterministic what-if calculators for urban sustainability projects in
//! Egyptian cities:
//! - `solar/`: PV sizing, tiered tariffs, payback and 25-year projection
//! - `water/`: Water Quality Index, classification and batch monitoring
//! - `landscape/`: CO₂/O₂ benefit, irrigation, cost and environmental score
//!
//! Around the calculators:
//! - `validation`: analysis form checks and dispatch to one calculator
//! - `forecast`: panel-level solar forecast simulator
//! - `game`: City Builder challenge rules
//! - `export` / `formatters`: CSV, JSON and Markdown output
//!
//! Every calculator is a pure function of its input record.

pub mod config;
pub mod error;
pub mod export;
pub mod forecast;
pub mod formatters;
pub mod game;
pub mod landscape;
pub mod solar;
pub mod utils;
pub mod validation;
pub mod water;

// Re-export commonly used types
pub use config::{OutputFormat, RunConfig};
pub use error::EngineError;
pub use export::{production_csv, write_production_csv, YearlyProduction};
pub use forecast::{simulate, ForecastParameters, ForecastResult, SimulationProgress};
pub use formatters::{JsonFormatter, MarkdownFormatter};
pub use game::CityBuilder;
pub use landscape::{calculate_landscape, LandscapeInput, LandscapeResult, PlantType, WaterSource};
pub use solar::{calculate_solar, weighted_tariff, Location, SolarInput, SolarResult, SolarSector};
pub use validation::{submit, AnalysisForm, AnalysisOutcome, SubmitError, ValidationErrors};
pub use water::{calculate_wqi, process_water_quality_data, WaterInput, WaterResult, WaterSector, WqiStatus};
