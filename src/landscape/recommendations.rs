//! Landscape planting advice

use super::factors::{PlantType, WaterSource};

/// Annual consumption above which turf gets a replacement hint (L)
const TURF_WATER_WARNING_L: f64 = 90_000.0;
/// Area above which mixed planting is suggested (m²)
const LARGE_AREA_M2: f64 = 500.0;

/// Generate advice for a planting plan; the last two entries are always
/// the general irrigation practices.
pub fn generate_recommendations(
    plant_type: PlantType,
    water_source: WaterSource,
    water_consumption_l: f64,
    area_m2: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if water_source == WaterSource::DrinkingWater {
        recommendations.push(
            "Consider switching to treated water or rainwater harvesting to conserve drinking water."
                .to_string(),
        );
    }

    match plant_type {
        PlantType::GrassTurf if water_consumption_l > TURF_WATER_WARNING_L => {
            recommendations.push(
                "Grass turf requires significant water. Consider replacing portions with desert plants to reduce water consumption."
                    .to_string(),
            );
        }
        PlantType::ShadeTree => {
            recommendations.push(
                "Space trees 5-8 meters apart for optimal canopy development and CO₂ sequestration."
                    .to_string(),
            );
        }
        PlantType::DesertPlants => {
            recommendations.push(
                "Excellent choice for water conservation. Use drip irrigation and mulch to maximize efficiency."
                    .to_string(),
            );
        }
        _ => {}
    }

    if area_m2 > LARGE_AREA_M2 {
        recommendations.push(
            "For large areas, consider a mixed planting approach combining trees, shrubs, and ground cover for optimal environmental benefits."
                .to_string(),
        );
    }

    recommendations.push(
        "Install soil moisture sensors to optimize irrigation scheduling and reduce water waste."
            .to_string(),
    );
    recommendations.push(
        "Apply organic mulch (5-10 cm depth) to reduce evaporation and maintain soil moisture."
            .to_string(),
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_plan_gets_best_practices_only() {
        let recs = generate_recommendations(PlantType::DecorativePlants, WaterSource::Rainwater, 1000.0, 50.0);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("soil moisture sensors"));
        assert!(recs[1].contains("organic mulch"));
    }

    #[test]
    fn test_thirsty_turf_on_drinking_water() {
        let recs = generate_recommendations(PlantType::GrassTurf, WaterSource::DrinkingWater, 95_000.0, 100.0);
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("rainwater harvesting"));
        assert!(recs[1].starts_with("Grass turf requires significant water"));
    }

    #[test]
    fn test_turf_threshold_is_strict() {
        let recs = generate_recommendations(PlantType::GrassTurf, WaterSource::TreatedWater, 90_000.0, 100.0);
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_large_tree_plan() {
        let recs = generate_recommendations(PlantType::ShadeTree, WaterSource::TreatedWater, 0.0, 501.0);
        assert!(recs[0].starts_with("Space trees 5-8 meters apart"));
        assert!(recs[1].starts_with("For large areas"));
        assert_eq!(recs.len(), 4);
    }
}
