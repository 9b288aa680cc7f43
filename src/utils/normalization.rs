//! Normalization Utilities
//!
//! Range normalization used by the landscape environmental score and the
//! decimal rounding applied when results are shown on a dashboard.

/// Normalize a value into [0, 1] against an expected range.
///
/// Values outside the range are clamped, so a per-m² figure above the expected
/// maximum still contributes exactly 1.0.
pub fn normalize_value(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Round to the nearest whole number, halves toward +∞ (-12.5 → -12).
///
/// Dashboard figures follow this rule, not `f64::round` (half away from zero).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places, halves toward +∞.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}
