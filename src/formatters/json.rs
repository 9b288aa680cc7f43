use serde::Serialize;

/// JSON formatter for analysis outcomes and reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format as pretty-printed JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }

    /// Format as compact JSON (no whitespace)
    pub fn format_compact<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{submit, AnalysisForm};

    fn water_outcome() -> crate::validation::AnalysisOutcome {
        let form = AnalysisForm {
            objective: "water".into(),
            location: "Aswan".into(),
            sector_type: "domestic".into(),
            ph: "7.2".into(),
            dissolved_oxygen: "6.5".into(),
            tds: "350".into(),
            turbidity: "2.5".into(),
            nitrate: "12".into(),
            bod: "3.1".into(),
            ..AnalysisForm::default()
        };
        submit(&form).unwrap()
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&water_outcome()).unwrap();

        assert!(json.contains("\"objective\": \"water\""));
        assert!(json.contains("\"location\": \"Aswan\""));
        assert!(json.contains("\"status\": \"Poor\""));
        assert!(json.contains("\"subIndices\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&water_outcome()).unwrap();

        // Compact format should have no newlines (except potentially in strings)
        assert!(!json.contains("\n  "));
    }
}
