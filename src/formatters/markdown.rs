use crate::forecast::ForecastResult;
use crate::landscape::LandscapeResult;
use crate::solar::{SolarResult, SolarSector};
use crate::utils::round_half_up;
use crate::validation::AnalysisOutcome;
use crate::water::{BatchReport, WaterResult, WaterSector};

/// Markdown formatter for dashboards
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format an analysis outcome as a markdown dashboard
    pub fn format(outcome: &AnalysisOutcome) -> String {
        let mut md = String::with_capacity(2048);

        match outcome {
            AnalysisOutcome::Solar { location, sector, result } => {
                Self::format_solar(&mut md, location, *sector, &result.rounded())
            }
            AnalysisOutcome::Water { location, sector, result } => {
                Self::format_water(&mut md, location, *sector, &result.rounded())
            }
            AnalysisOutcome::Landscape { location, result } => {
                Self::format_landscape(&mut md, location, &result.rounded())
            }
        }

        md
    }

    fn format_solar(md: &mut String, location: &str, sector: SolarSector, r: &SolarResult) {
        md.push_str(&format!("# Solar Potential - {} ({})\n\n", location, sector));

        md.push_str("## System\n\n");
        md.push_str(&format!("- **System size:** {} kWp\n", r.system_size_kwp));
        md.push_str(&format!(
            "- **Roof area:** {} m² required, {} m² available\n",
            r.required_area, r.available_area
        ));
        if r.area_warning {
            md.push_str("- ⚠️ Available roof area is smaller than required\n");
        }
        md.push_str(&format!(
            "- **Annual production:** {} kWh ({}% of consumption)\n\n",
            thousands(r.annual_production),
            r.solar_coverage_percent
        ));

        md.push_str("## Economics\n\n");
        md.push_str(&format!("- **Installation cost:** EGP {}\n", thousands(r.installation_cost)));
        md.push_str(&format!(
            "- **Annual bill:** EGP {} → EGP {}\n",
            thousands(r.current_bill),
            thousands(r.new_bill)
        ));
        md.push_str(&format!(
            "- **Annual savings:** EGP {} (net EGP {} after maintenance)\n",
            thousands(r.annual_savings),
            thousands(r.net_savings)
        ));
        md.push_str(&format!("- **Payback:** {} years\n", r.payback_years));
        md.push_str(&format!("- **25-year ROI:** {}%\n", r.roi));
        md.push_str(&format!("- **Weighted tariff:** {} EGP/kWh\n\n", r.weighted_tariff));

        md.push_str("## Environment\n\n");
        md.push_str(&format!(
            "🌍 {} t CO₂ avoided per year, like {} trees\n\n",
            r.co2_saving_tons,
            thousands(r.trees_equivalent)
        ));

        md.push_str("## 25-Year Projection\n\n");
        md.push_str("| Year | Production (kWh) | Savings (EGP) | Cumulative (EGP) |\n");
        md.push_str("|------|------------------|---------------|------------------|\n");
        for year in r.yearly_data.iter().filter(|y| y.year == 1 || y.year % 5 == 0) {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                year.year,
                thousands(year.production),
                thousands(year.savings),
                thousands(year.cumulative_savings)
            ));
        }
        md.push('\n');
    }

    fn format_water(md: &mut String, location: &str, sector: WaterSector, r: &WaterResult) {
        md.push_str(&format!("# Water Quality - {} ({})\n\n", location, sector));
        md.push_str(&format!("**WQI:** {} - {}\n\n", r.wqi, r.status));
        md.push_str(&format!("{}\n\n", r.description));

        md.push_str("## Parameters\n\n");
        md.push_str("| Parameter | Value | Index | Standard |\n");
        md.push_str("|-----------|-------|-------|----------|\n");
        let p = &r.parameters;
        let rows = [
            ("pH", &p.ph),
            ("Dissolved oxygen", &p.dissolved_oxygen),
            ("TDS", &p.tds),
            ("Turbidity", &p.turbidity),
            ("Nitrate", &p.nitrate),
            ("BOD", &p.bod),
        ];
        for (name, reading) in rows {
            let index = reading
                .index
                .map(|q| q.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                name, reading.value, index, reading.standard
            ));
        }
        md.push('\n');

        Self::format_recommendations(md, &r.recommendations);
    }

    fn format_landscape(md: &mut String, location: &str, r: &LandscapeResult) {
        md.push_str(&format!("# Green Space - {}\n\n", location));
        md.push_str(&format!(
            "**Environmental Score:** {}/100 - {}\n\n",
            r.env_score, r.score_category
        ));
        md.push_str(&format!(
            "{} m² of {} ({}) irrigated with {}\n\n",
            r.area_m2, r.plant_type, r.plant_description, r.water_source
        ));

        md.push_str("## Annual Impact\n\n");
        md.push_str(&format!(
            "- **CO₂ sequestered:** {} kg ({} t)\n",
            r.co2_reduction_kg_per_year, r.co2_reduction_tons_per_year
        ));
        md.push_str(&format!(
            "- **O₂ produced:** {} L ({} m³)\n",
            thousands(r.o2_production_l_per_year),
            r.o2_production_m3_per_year
        ));
        md.push_str(&format!(
            "- **Water used:** {} L ({} m³)\n\n",
            thousands(r.water_consumption_l_per_year),
            r.water_consumption_m3_per_year
        ));

        md.push_str("## Equivalent To\n\n");
        md.push_str(&format!(
            "- 🚗 {} km not driven\n",
            thousands(r.equivalencies.car_km_equivalent)
        ));
        md.push_str(&format!("- 🌳 {} mature trees\n", r.equivalencies.trees_equivalent));
        md.push_str(&format!(
            "- 🫁 oxygen for {} people\n\n",
            r.equivalencies.people_o2_equivalent
        ));

        md.push_str("## Costs\n\n");
        md.push_str(&format!(
            "- **Planting:** USD {} ({} USD/m²)\n",
            thousands(r.planting_cost),
            r.factors.cost_per_m2
        ));
        md.push_str(&format!(
            "- **Maintenance:** USD {} per year\n",
            thousands(r.annual_maintenance_cost)
        ));
        md.push_str(&format!(
            "- **Total over {} years:** USD {}\n\n",
            r.maintenance_years,
            thousands(r.total_cost)
        ));

        if let Some(last) = r.yearly_data.last() {
            md.push_str(&format!(
                "After {} years: {} kg CO₂ sequestered in total\n\n",
                last.year,
                thousands(last.cumulative_co2)
            ));
        }

        Self::format_recommendations(md, &r.recommendations);
    }

    fn format_recommendations(md: &mut String, recommendations: &[String]) {
        if recommendations.is_empty() {
            return;
        }
        md.push_str("## Recommendations\n\n");
        for rec in recommendations {
            md.push_str(&format!("- {}\n", rec));
        }
        md.push('\n');
    }

    /// Format a batch water report
    pub fn format_batch(report: &BatchReport) -> String {
        let mut md = String::with_capacity(1024);
        let s = &report.summary;

        md.push_str("# Water Monitoring Summary\n\n");
        md.push_str(&format!(
            "**{} points**, average WQI {}\n\n",
            s.total_points, s.average_wqi
        ));
        md.push_str(&format!(
            "Excellent {} · Good {} · Poor {} · Very Poor {} · Unsuitable {}\n\n",
            s.excellent_count, s.good_count, s.poor_count, s.very_poor_count, s.unsuitable_count
        ));

        if !report.location_stats.is_empty() {
            md.push_str("## By Location\n\n");
            md.push_str("| Location | Samples | Average | Min | Max |\n");
            md.push_str("|----------|---------|---------|-----|-----|\n");
            for stats in &report.location_stats {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    stats.location, stats.count, stats.average, stats.min, stats.max
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Format a forecast simulation
    pub fn format_forecast(result: &ForecastResult) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str("# Solar Forecast\n\n");
        md.push_str(&format!(
            "- **Annual production:** {} kWh\n",
            thousands(result.total_production)
        ));
        md.push_str(&format!(
            "- **Average daily:** {} kWh (peak hour {} kWh)\n",
            thousands(result.average_daily_production),
            result.peak_production
        ));
        md.push_str(&format!(
            "- **CO₂ reduction:** {} kg per year\n",
            thousands(result.co2_reduction)
        ));
        match result.roi {
            Some(years) => md.push_str(&format!("- **Payback:** {} years\n\n", years)),
            None => md.push_str("- **Payback:** n/a\n\n"),
        }

        md.push_str("## Monthly Production\n\n");
        md.push_str("| Month | kWh |\n");
        md.push_str("|-------|-----|\n");
        for month in &result.monthly_production {
            md.push_str(&format!("| {} | {} |\n", month.month, thousands(month.production)));
        }
        md.push('\n');

        md
    }
}

/// Whole-number rendering with thousands separators
fn thousands(value: f64) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::{calculate_landscape, LandscapeInput, PlantType, WaterSource};
    use crate::water::{process_water_quality_data, MonitoringPoint, WaterInput};
    use chrono::NaiveDate;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(54_568.42), "54,568");
        assert_eq!(thousands(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn test_format_landscape() {
        let input = LandscapeInput {
            area_m2: 600.0,
            plant_type: PlantType::ShadeTree,
            water_source: WaterSource::DrinkingWater,
            cost_per_m2: None,
            maintenance_years: Some(10),
        };
        let outcome = AnalysisOutcome::Landscape {
            location: "Giza".to_string(),
            result: calculate_landscape(&input),
        };
        let md = MarkdownFormatter::format(&outcome);

        assert!(md.starts_with("# Green Space - Giza\n"));
        assert!(md.contains("**Environmental Score:** 79.4/100 - Excellent"));
        assert!(md.contains("- **Total over 10 years:** USD"));
        assert!(md.contains("## Recommendations"));
        assert!(md.contains("mixed planting approach"));
    }

    #[test]
    fn test_format_batch() {
        let points = vec![MonitoringPoint {
            location: "Luxor".to_string(),
            date: None,
            reading: WaterInput {
                ph: 7.0,
                dissolved_oxygen: 8.0,
                tds: 100.0,
                turbidity: 1.0,
                nitrate: 5.0,
                bod: 1.0,
                sector: WaterSector::Domestic,
            },
        }];
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let md = MarkdownFormatter::format_batch(&process_water_quality_data(&points, today));

        assert!(md.contains("**1 points**"));
        assert!(md.contains("| Luxor | 1 |"));
    }
}
