//! Utility modules shared by the calculators
//!
//! - Normalization: range clamping and display rounding

pub mod normalization;

// Re-export commonly used helpers
pub use normalization::{normalize_value, round_half_up, round_to};
