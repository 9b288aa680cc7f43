//! Runtime configuration from environment variables
//!
//! - `URBANECO_FORMAT`: `markdown` (default) or `json`
//! - `URBANECO_BASE_YEAR`: first calendar year of exported series (default 2025)
//! - `URBANECO_LOADING_DELAY_MS`: pause per simulated progress step (default 0)

use crate::forecast::{is_valid_base_year, BASE_YEAR_RANGE, DEFAULT_BASE_YEAR};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const FORMAT_VAR: &str = "URBANECO_FORMAT";
pub const BASE_YEAR_VAR: &str = "URBANECO_BASE_YEAR";
pub const LOADING_DELAY_VAR: &str = "URBANECO_LOADING_DELAY_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => f.write_str("markdown"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub format: OutputFormat,
    pub base_year: u32,
    pub loading_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            base_year: DEFAULT_BASE_YEAR,
            loading_delay: Duration::ZERO,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let format = match lookup(FORMAT_VAR) {
            Some(raw) => raw.parse::<OutputFormat>().unwrap_or_else(|err| {
                tracing::warn!("{}: {}, using {}", FORMAT_VAR, err, defaults.format);
                defaults.format
            }),
            None => defaults.format,
        };

        let base_year = match lookup(BASE_YEAR_VAR).and_then(|v| v.trim().parse::<u32>().ok()) {
            Some(year) if is_valid_base_year(year) => year,
            Some(year) => {
                tracing::warn!(
                    "{}: {} outside {}..={}, using {}",
                    BASE_YEAR_VAR,
                    year,
                    BASE_YEAR_RANGE.start(),
                    BASE_YEAR_RANGE.end(),
                    defaults.base_year
                );
                defaults.base_year
            }
            None => defaults.base_year,
        };

        let loading_delay = lookup(LOADING_DELAY_VAR)
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.loading_delay);

        Self {
            format,
            base_year,
            loading_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn config(vars: &[(&str, &str)]) -> RunConfig {
        let env: FxHashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), RunConfig::default());
        assert_eq!(RunConfig::default().base_year, 2025);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (FORMAT_VAR, "JSON"),
            (BASE_YEAR_VAR, "2030"),
            (LOADING_DELAY_VAR, "150"),
        ]);
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.base_year, 2030);
        assert_eq!(cfg.loading_delay, Duration::from_millis(150));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[(FORMAT_VAR, "yaml"), (BASE_YEAR_VAR, "soon")]);
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn test_base_year_outside_calendar_range_falls_back() {
        assert_eq!(config(&[(BASE_YEAR_VAR, "4294967290")]).base_year, 2025);
        assert_eq!(config(&[(BASE_YEAR_VAR, "1899")]).base_year, 2025);
        assert_eq!(config(&[(BASE_YEAR_VAR, "9999")]).base_year, 9999);
    }
}
