//! Criterion benchmarks for the estimation calculators.
//!
//! Run with: cargo bench --bench calculators

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use urbaneco_engine::landscape::{calculate_landscape, LandscapeInput, PlantType, WaterSource};
use urbaneco_engine::solar::{calculate_solar, Governorate, Location, SolarInput, SolarSector};
use urbaneco_engine::water::{calculate_wqi, process_water_quality_data, MonitoringPoint, WaterInput, WaterSector};

fn sample_reading(tds: f64) -> WaterInput {
    WaterInput {
        ph: 7.2,
        dissolved_oxygen: 6.5,
        tds,
        turbidity: 2.5,
        nitrate: 12.0,
        bod: 3.1,
        sector: WaterSector::Domestic,
    }
}

fn bench_single_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_calculation");

    let solar = SolarInput {
        monthly_consumption_kwh: 1200.0,
        available_area_m2: 150.0,
        coverage_percent: 60.0,
        location: Location::Governorate(Governorate::Cairo),
        sector: SolarSector::Residential,
    };
    group.bench_function("solar", |b| b.iter(|| black_box(calculate_solar(black_box(&solar)))));

    let water = sample_reading(350.0);
    group.bench_function("wqi", |b| b.iter(|| black_box(calculate_wqi(black_box(&water)))));

    let landscape = LandscapeInput {
        area_m2: 600.0,
        plant_type: PlantType::ShadeTree,
        water_source: WaterSource::TreatedWater,
        cost_per_m2: None,
        maintenance_years: Some(10),
    };
    group.bench_function("landscape", |b| {
        b.iter(|| black_box(calculate_landscape(black_box(&landscape))))
    });

    group.finish();
}

fn bench_water_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("water_batch");
    group.sample_size(20);

    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    let points: Vec<MonitoringPoint> = (0..10_000)
        .map(|i| MonitoringPoint {
            location: format!("Station {}", i % 50),
            date: None,
            reading: sample_reading(100.0 + (i % 900) as f64),
        })
        .collect();

    group.bench_function("10k_points", |b| {
        b.iter(|| black_box(process_water_quality_data(black_box(&points), today)))
    });

    group.finish();
}

criterion_group!(benches, bench_single_calculations, bench_water_batch);
criterion_main!(benches);
