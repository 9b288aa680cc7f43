//! Error types for the estimation engine.

use thiserror::Error;

/// Errors raised when an enumerated selection cannot be resolved.
///
/// These are the only failures the calculators themselves know about; missing
/// or non-positive form fields are reported earlier by
/// [`crate::validation::ValidationErrors`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Plant type key is not one of the four landscape categories.
    #[error("Invalid plant type selected: '{0}'")]
    InvalidPlantType(String),

    /// Water source key is not one of the three irrigation sources.
    #[error("Invalid water source selected: '{0}'")]
    InvalidWaterSource(String),

    /// Analysis objective key is unknown.
    #[error("Unknown analysis objective: '{0}'")]
    InvalidObjective(String),
}
