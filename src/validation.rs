//! Analysis form validation and dispatch
//!
//! The analysis form collects raw text for every domain at once. Validation
//! checks only the fields of the chosen objective, then the form is parsed
//! into the typed input of exactly one calculator.

use crate::error::EngineError;
use crate::landscape::{calculate_landscape, LandscapeInput, LandscapeResult};
use crate::solar::{calculate_solar, Location, SolarInput, SolarResult, SolarSector};
use crate::water::{calculate_wqi, WaterInput, WaterResult, WaterSector};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_COVERAGE_PERCENT: f64 = 60.0;
pub const DEFAULT_MAINTENANCE_YEARS: u32 = 10;

pub const NOTICE_EMPTY: &str =
    "No data yet, share a few details to unlock your personalized dashboard.";
pub const NOTICE_INCOMPLETE: &str =
    "Almost there, complete the highlighted fields to reveal your insights.";
pub const NOTICE_NOT_READY: &str = "There is nothing to analyze. Please enter your details to begin.";

const WATER_NUMERIC_FIELDS: [&str; 6] = ["turbidity", "pH", "dissolvedOxygen", "TDS", "nitrate", "BOD"];

/// What the user wants analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Solar,
    Water,
    Landscape,
    /// Offered on the form but has no calculator yet
    Waste,
}

impl Objective {
    pub fn key(self) -> &'static str {
        match self {
            Objective::Solar => "solar",
            Objective::Water => "water",
            Objective::Landscape => "landscape",
            Objective::Waste => "waste",
        }
    }
}

impl FromStr for Objective {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solar" => Ok(Objective::Solar),
            "water" => Ok(Objective::Water),
            "landscape" => Ok(Objective::Landscape),
            "waste" => Ok(Objective::Waste),
            other => Err(EngineError::InvalidObjective(other.to_string())),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw analysis form state
///
/// Text fields accept JSON strings or numbers; missing fields are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisForm {
    #[serde(deserialize_with = "text")]
    pub objective: String,
    #[serde(deserialize_with = "text")]
    pub bill_amount: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub sector_type: String,
    /// Monthly consumption (kWh)
    #[serde(deserialize_with = "text")]
    pub consumption: String,
    /// Available roof area (m²)
    #[serde(deserialize_with = "text")]
    pub space: String,
    pub coverage: f64,

    #[serde(rename = "area_m2", deserialize_with = "text")]
    pub area_m2: String,
    #[serde(deserialize_with = "text")]
    pub plant_type: String,
    #[serde(deserialize_with = "text")]
    pub water_source: String,
    #[serde(rename = "cost_per_m2", deserialize_with = "text")]
    pub cost_per_m2: String,
    #[serde(rename = "maintenance_years")]
    pub maintenance_years: u32,

    #[serde(deserialize_with = "text")]
    pub turbidity: String,
    #[serde(rename = "pH", deserialize_with = "text")]
    pub ph: String,
    #[serde(deserialize_with = "text")]
    pub dissolved_oxygen: String,
    #[serde(rename = "TDS", deserialize_with = "text")]
    pub tds: String,
    #[serde(rename = "BOD", deserialize_with = "text")]
    pub bod: String,
    #[serde(deserialize_with = "text")]
    pub nitrate: String,
}

impl Default for AnalysisForm {
    fn default() -> Self {
        Self {
            objective: String::new(),
            bill_amount: String::new(),
            location: String::new(),
            sector_type: String::new(),
            consumption: String::new(),
            space: String::new(),
            coverage: DEFAULT_COVERAGE_PERCENT,
            area_m2: String::new(),
            plant_type: String::new(),
            water_source: String::new(),
            cost_per_m2: String::new(),
            maintenance_years: DEFAULT_MAINTENANCE_YEARS,
            turbidity: String::new(),
            ph: String::new(),
            dissolved_oxygen: String::new(),
            tds: String::new(),
            bod: String::new(),
            nitrate: String::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(f64),
    Null(()),
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawText::deserialize(deserializer)? {
        RawText::Text(s) => s,
        RawText::Number(n) => n.to_string(),
        RawText::Null(()) => String::new(),
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parse a strictly positive, finite number
fn positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field messages of a rejected form, in form order
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{notice}")]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
    /// Banner shown above the form
    pub notice: String,
}

impl ValidationErrors {
    /// Message for a field, if it was rejected
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Why a submission produced no results
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Typed input for exactly one calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objective", rename_all = "lowercase")]
pub enum AnalysisRequest {
    Solar { input: SolarInput },
    Water { location: String, input: WaterInput },
    Landscape { location: String, input: LandscapeInput },
}

/// Results of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objective", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Solar { location: String, sector: SolarSector, result: SolarResult },
    Water { location: String, sector: WaterSector, result: WaterResult },
    Landscape { location: String, result: LandscapeResult },
}

impl AnalysisOutcome {
    pub fn objective(&self) -> Objective {
        match self {
            AnalysisOutcome::Solar { .. } => Objective::Solar,
            AnalysisOutcome::Water { .. } => Objective::Water,
            AnalysisOutcome::Landscape { .. } => Objective::Landscape,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            AnalysisOutcome::Solar { location, .. }
            | AnalysisOutcome::Water { location, .. }
            | AnalysisOutcome::Landscape { location, .. } => location,
        }
    }
}

impl AnalysisForm {
    /// The chosen objective; `None` when nothing was chosen
    pub fn objective(&self) -> Result<Option<Objective>, EngineError> {
        if is_blank(&self.objective) {
            return Ok(None);
        }
        self.objective.parse().map(Some)
    }

    /// True when no objective and no field has been filled in
    fn is_untouched(&self) -> bool {
        let fields = [
            &self.bill_amount,
            &self.location,
            &self.sector_type,
            &self.consumption,
            &self.space,
            &self.area_m2,
            &self.plant_type,
            &self.water_source,
            &self.cost_per_m2,
            &self.turbidity,
            &self.ph,
            &self.dissolved_oxygen,
            &self.tds,
            &self.bod,
            &self.nitrate,
        ];
        is_blank(&self.objective) && fields.iter().all(|f| is_blank(f))
    }

    fn water_field(&self, name: &str) -> &str {
        match name {
            "turbidity" => &self.turbidity,
            "pH" => &self.ph,
            "dissolvedOxygen" => &self.dissolved_oxygen,
            "TDS" => &self.tds,
            "nitrate" => &self.nitrate,
            "BOD" => &self.bod,
            _ => "",
        }
    }

    /// Check the fields required by the chosen objective
    ///
    /// Unknown objective keys are not a validation concern; see [`submit`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut fields = Vec::new();
        let mut reject = |field: &str, message: &str| {
            fields.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        let objective = self.objective().ok().flatten();
        match objective {
            None if is_blank(&self.objective) => {
                reject("objective", "Choose a path to begin your story.");
            }
            None => {}
            Some(Objective::Solar) => {
                if is_blank(&self.location) {
                    reject("location", "Where in Egypt is your site located?");
                }
                if is_blank(&self.sector_type) {
                    reject("sectorType", "What kind of place is it?");
                }
                if positive(&self.consumption).is_none() {
                    reject("consumption", "Tell us your monthly consumption (kWh).");
                }
                if positive(&self.space).is_none() {
                    reject("space", "How much roof can host your solar? (m²)");
                }
            }
            Some(Objective::Water) => {
                if is_blank(&self.location) {
                    reject("location", "Where are we testing water?");
                }
                if is_blank(&self.sector_type) {
                    reject("sectorType", "Which sector best fits your use?");
                }
                for name in WATER_NUMERIC_FIELDS {
                    if number(self.water_field(name)).is_none() {
                        reject(name, "Add a value so the index makes sense.");
                    }
                }
            }
            Some(Objective::Landscape) => {
                if is_blank(&self.location) {
                    reject("location", "Where will your green space live?");
                }
                if positive(&self.area_m2).is_none() {
                    reject("area_m2", "How large is the area (m²)?");
                }
                if is_blank(&self.plant_type) {
                    reject("plantType", "Choose your planting style.");
                }
                if is_blank(&self.water_source) {
                    reject("waterSource", "Choose a water source to plan sustainably.");
                }
            }
            Some(Objective::Waste) => {
                reject(
                    "objective",
                    "This path is not ready yet. Pick Solar, Water, or Landscape.",
                );
            }
        }

        if fields.is_empty() {
            return Ok(());
        }

        let notice = if objective == Some(Objective::Waste) {
            NOTICE_NOT_READY
        } else if self.is_untouched() {
            NOTICE_EMPTY
        } else {
            NOTICE_INCOMPLETE
        };

        Err(ValidationErrors {
            fields,
            notice: notice.to_string(),
        })
    }

    /// Validate and parse into a typed calculator input
    pub fn to_request(&self) -> Result<AnalysisRequest, SubmitError> {
        let objective = self.objective()?;
        self.validate()?;

        // validate() has rejected every other case
        let request = match objective {
            Some(Objective::Solar) => AnalysisRequest::Solar {
                input: SolarInput {
                    monthly_consumption_kwh: positive(&self.consumption).unwrap_or_default(),
                    available_area_m2: positive(&self.space).unwrap_or_default(),
                    coverage_percent: self.coverage,
                    location: Location::parse(&self.location),
                    sector: SolarSector::from_key_or_default(&self.sector_type),
                },
            },
            Some(Objective::Water) => AnalysisRequest::Water {
                location: self.location.trim().to_string(),
                input: WaterInput {
                    ph: number(&self.ph).unwrap_or_default(),
                    dissolved_oxygen: number(&self.dissolved_oxygen).unwrap_or_default(),
                    tds: number(&self.tds).unwrap_or_default(),
                    turbidity: number(&self.turbidity).unwrap_or_default(),
                    nitrate: number(&self.nitrate).unwrap_or_default(),
                    bod: number(&self.bod).unwrap_or_default(),
                    sector: WaterSector::from_key_or_default(&self.sector_type),
                },
            },
            Some(Objective::Landscape) => AnalysisRequest::Landscape {
                location: self.location.trim().to_string(),
                input: LandscapeInput::from_keys(
                    positive(&self.area_m2).unwrap_or_default(),
                    &self.plant_type,
                    &self.water_source,
                    positive(&self.cost_per_m2),
                    Some(self.maintenance_years),
                )?,
            },
            Some(Objective::Waste) | None => {
                return Err(EngineError::InvalidObjective(self.objective.clone()).into())
            }
        };

        Ok(request)
    }
}

impl AnalysisRequest {
    /// Run the calculator for this request
    pub fn run(&self) -> AnalysisOutcome {
        match self {
            AnalysisRequest::Solar { input } => AnalysisOutcome::Solar {
                location: input.location.name().to_string(),
                sector: input.sector,
                result: calculate_solar(input),
            },
            AnalysisRequest::Water { location, input } => AnalysisOutcome::Water {
                location: location.clone(),
                sector: input.sector,
                result: calculate_wqi(input),
            },
            AnalysisRequest::Landscape { location, input } => AnalysisOutcome::Landscape {
                location: location.clone(),
                result: calculate_landscape(input),
            },
        }
    }
}

/// Validate a form and run the chosen calculation
///
/// The calculator is never invoked when validation fails.
pub fn submit(form: &AnalysisForm) -> Result<AnalysisOutcome, SubmitError> {
    let request = form.to_request()?;
    let outcome = request.run();
    tracing::info!("Analysis complete: {} at {}", outcome.objective(), outcome.location());
    Ok(outcome)
}
