//! Calculator Integration Tests
//!
//! Exercise the public API end to end: form submission, the three
//! calculators, batch monitoring, forecast and CSV export.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use urbaneco_engine::export::production_csv;
use urbaneco_engine::forecast::{simulate, ForecastParameters};
use urbaneco_engine::landscape::{calculate_landscape, LandscapeInput, PlantType, WaterSource};
use urbaneco_engine::solar::{
    calculate_solar, weighted_tariff, Governorate, Location, SolarInput, SolarSector,
};
use urbaneco_engine::water::{
    calculate_wqi, process_water_quality_data, read_monitoring_points, WaterInput, WaterSector,
    WqiStatus,
};
use urbaneco_engine::{submit, AnalysisForm, AnalysisOutcome, EngineError, MarkdownFormatter, SubmitError};

fn cairo_household() -> SolarInput {
    SolarInput {
        monthly_consumption_kwh: 1200.0,
        available_area_m2: 150.0,
        coverage_percent: 60.0,
        location: Location::Governorate(Governorate::Cairo),
        sector: SolarSector::Residential,
    }
}

fn nile_sample() -> WaterInput {
    WaterInput {
        ph: 7.2,
        dissolved_oxygen: 6.5,
        tds: 350.0,
        turbidity: 2.5,
        nitrate: 12.0,
        bod: 3.1,
        sector: WaterSector::Domestic,
    }
}

fn plan(plant_type: PlantType) -> LandscapeInput {
    LandscapeInput {
        area_m2: 100.0,
        plant_type,
        water_source: WaterSource::TreatedWater,
        cost_per_m2: None,
        maintenance_years: None,
    }
}

// ============================================================================
// SOLAR
// ============================================================================

#[test]
fn solar_cairo_household_end_to_end() {
    let result = calculate_solar(&cairo_household());

    assert_eq!(result.annual_consumption_kwh, 14_400.0);
    assert_eq!(result.target_production_kwh, 8_640.0);
    assert_eq!(result.system_size_kwp, 8640.0 / 1900.0);
    assert_eq!(result.required_area, result.system_size_kwp * 7.0);
    assert!(!result.area_warning);

    let rounded = result.rounded();
    assert_eq!(rounded.system_size_kwp, 4.55);
    assert_eq!(rounded.required_area, 31.8);
    assert_relative_eq!(result.installation_cost, 54_600.0, max_relative = 0.001);
}

#[test]
fn solar_sizing_identities_hold_for_other_sites() {
    let input = SolarInput {
        monthly_consumption_kwh: 730.0,
        available_area_m2: 12.0,
        coverage_percent: 85.0,
        location: Location::parse("Siwa Oasis"),
        sector: SolarSector::Commercial,
    };
    let result = calculate_solar(&input);

    assert_eq!(result.production_factor, 1900.0);
    assert_eq!(result.system_size_kwp, (730.0 * 12.0 * 85.0 / 100.0) / 1900.0);
    assert_eq!(result.required_area, result.system_size_kwp * 7.0);
    assert!(result.area_warning);
}

#[test]
fn residential_tariff_bands() {
    assert_eq!(weighted_tariff(SolarSector::Residential, 50.0), 0.68);
    assert_relative_eq!(
        weighted_tariff(SolarSector::Residential, 100.0),
        (50.0 * 0.68 + 50.0 * 0.78) / 100.0,
        epsilon = 1e-12
    );
}

#[test]
fn industrial_tariff_is_flat() {
    for consumption in [1.0, 50.0, 999.0, 25_000.0] {
        assert_eq!(weighted_tariff(SolarSector::Industrial, consumption), 1.70);
    }
}

#[test]
fn solar_series_degrades_one_percent_per_year() {
    let result = calculate_solar(&cairo_household());
    let series = &result.yearly_data;

    assert_eq!(series.len(), 25);
    for (i, year) in series.iter().enumerate() {
        assert_eq!(year.year, i as u32 + 1);
        assert_relative_eq!(
            year.production,
            series[0].production * 0.99f64.powi(i as i32),
            max_relative = 1e-12
        );
    }
}

// ============================================================================
// WATER
// ============================================================================

#[test]
fn water_domestic_sample_end_to_end() {
    let result = calculate_wqi(&nile_sample());
    let q = &result.sub_indices;

    assert_relative_eq!(q.ph, 7.2 / 8.5 * 100.0, epsilon = 1e-9);
    assert_relative_eq!(q.dissolved_oxygen, 5.0 / 6.5 * 100.0, epsilon = 1e-9);
    assert_relative_eq!(q.tds, 70.0, epsilon = 1e-9);
    assert_relative_eq!(q.turbidity, 50.0, epsilon = 1e-9);
    assert_relative_eq!(q.nitrate, 24.0, epsilon = 1e-9);

    assert_eq!(result.rounded().wqi, 65.1);
    assert_eq!(result.status, WqiStatus::Poor);
    // BOD 3.1 is the only reading over its limit
    assert_eq!(result.recommendations.len(), 1);
}

#[test]
fn wqi_classification_boundaries() {
    assert_eq!(WqiStatus::classify(25.0), WqiStatus::Excellent);
    assert_eq!(WqiStatus::classify(26.0), WqiStatus::Good);
    assert_eq!(WqiStatus::classify(100.0), WqiStatus::VeryPoor);
    assert_eq!(WqiStatus::classify(100.01), WqiStatus::Unsuitable);
}

#[test]
fn wqi_is_pure() {
    let sample = nile_sample();
    assert_eq!(calculate_wqi(&sample), calculate_wqi(&sample));
}

#[test]
fn batch_from_csv() {
    let csv = b"location,pH,dissolvedOxygen,TDS,turbidity,nitrate,BOD,sectorType
Cairo,7.2,6.5,350,2.5,12,3.1,domestic
Cairo,7.0,8.0,100,1,5,1,domestic
Aswan,9.2,3.0,2500,12,80,6,agriculture
";
    let points = read_monitoring_points(csv).expect("valid CSV");
    let today = NaiveDate::from_ymd_opt(2025, 5, 20).expect("valid date");
    let report = process_water_quality_data(&points, today);

    assert_eq!(report.summary.total_points, 3);
    assert_eq!(report.results[0].date, "2025-05-20");
    assert_eq!(report.results[0].result.wqi, 65.1);
    assert_eq!(report.location_stats[0].location, "Aswan");
    assert_eq!(report.location_stats[1].count, 2);
    assert_eq!(report.summary.unsuitable_count, 1);
}

// ============================================================================
// LANDSCAPE
// ============================================================================

#[test]
fn shade_tree_grows_until_year_ten() {
    let result = calculate_landscape(&plan(PlantType::ShadeTree));
    let years = &result.yearly_data;

    assert_eq!(years.len(), 25);
    assert_relative_eq!(
        years[9].co2_reduction,
        years[0].co2_reduction * 1.05f64.powi(9),
        max_relative = 1e-12
    );
    assert_eq!(years[10].co2_reduction, years[9].co2_reduction);

    let rounded: Vec<f64> = result.rounded().yearly_data.iter().map(|y| y.co2_reduction).collect();
    assert_eq!(rounded[0], 105.0);
    assert_eq!(rounded[9], 162.9);
}

#[test]
fn grass_turf_is_flat() {
    let result = calculate_landscape(&plan(PlantType::GrassTurf));
    let first = result.yearly_data[0].co2_reduction;
    assert!(result.yearly_data.iter().all(|y| y.co2_reduction == first));
}

#[test]
fn unknown_plant_type_fails() {
    let err = "Bamboo".parse::<PlantType>().unwrap_err();
    assert_eq!(err, EngineError::InvalidPlantType("Bamboo".to_string()));
}

// ============================================================================
// FORM SUBMISSION AND OUTPUT
// ============================================================================

#[test]
fn submit_form_json_and_render() {
    let json = r#"{
        "objective": "landscape",
        "location": "Alexandria",
        "area_m2": "750",
        "plantType": "DesertPlants",
        "waterSource": "DrinkingWater",
        "cost_per_m2": "",
        "maintenance_years": 5
    }"#;
    let form: AnalysisForm = serde_json::from_str(json).expect("form JSON");
    let outcome = submit(&form).expect("valid form");

    let AnalysisOutcome::Landscape { result, .. } = &outcome else {
        panic!("expected landscape outcome");
    };
    assert_eq!(result.maintenance_years, 5);
    assert_relative_eq!(result.planting_cost, 750.0 * 3.5, epsilon = 1e-9);
    assert_eq!(result.recommendations.len(), 5);

    let md = MarkdownFormatter::format(&outcome);
    assert!(md.contains("# Green Space - Alexandria"));
}

#[test]
fn validation_blocks_calculation() {
    let form = AnalysisForm {
        objective: "solar".into(),
        location: "Cairo".into(),
        ..AnalysisForm::default()
    };
    match submit(&form) {
        Err(SubmitError::Validation(errors)) => {
            assert_eq!(errors.get("sectorType"), Some("What kind of place is it?"));
            assert_eq!(errors.len(), 3);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

// ============================================================================
// EXPORT
// ============================================================================

#[test]
fn solar_export_uses_calendar_years() {
    let result = calculate_solar(&cairo_household());
    let csv = production_csv(&result.yearly_data, Some(2025)).expect("csv export");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0], "Year,AnnualProduction(kWh)");
    assert_eq!(lines[1], "2025,8640");
    assert!(lines[25].starts_with("2049,"));
}

#[test]
fn forecast_export_matches_yearly_series() {
    let result = simulate(&ForecastParameters::default());
    let csv = production_csv(&result.yearly_production, None).expect("csv export");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 26);
    assert_eq!(
        lines[1],
        format!("2025,{}", result.yearly_production[0].production as i64)
    );
}
