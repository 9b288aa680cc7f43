//! Tiered Electricity Tariffs
//!
//! Residential and commercial customers are billed progressively: monthly
//! consumption fills each band in order before spilling into the next, and
//! every band has its own per-kWh rate. Industrial customers pay a flat rate.
//!
//! The weighted tariff is the blended EGP/kWh rate a customer actually pays
//! at a given monthly consumption (total charge ÷ consumption).

use super::lookup_tables::SolarSector;

/// A single billing band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffBand {
    /// Band width in kWh/month (`f64::INFINITY` for the open top band)
    pub width_kwh: f64,
    /// Rate in EGP per kWh
    pub rate: f64,
}

/// Billing schedule for a sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TariffSchedule {
    Tiered(&'static [TariffBand]),
    Flat(f64),
}

static RESIDENTIAL_BANDS: &[TariffBand] = &[
    TariffBand { width_kwh: 50.0, rate: 0.68 },
    TariffBand { width_kwh: 50.0, rate: 0.78 },
    TariffBand { width_kwh: 100.0, rate: 0.95 },
    TariffBand { width_kwh: 150.0, rate: 1.55 },
    TariffBand { width_kwh: 300.0, rate: 1.95 },
    TariffBand { width_kwh: 350.0, rate: 2.10 },
    TariffBand { width_kwh: f64::INFINITY, rate: 2.23 },
];

static COMMERCIAL_BANDS: &[TariffBand] = &[
    TariffBand { width_kwh: 100.0, rate: 0.65 },
    TariffBand { width_kwh: 150.0, rate: 1.36 },
    TariffBand { width_kwh: 350.0, rate: 1.50 },
    TariffBand { width_kwh: 400.0, rate: 1.65 },
    TariffBand { width_kwh: f64::INFINITY, rate: 1.80 },
];

/// Flat industrial rate (EGP/kWh)
pub const INDUSTRIAL_RATE: f64 = 1.70;

impl SolarSector {
    /// Billing schedule applied to this sector
    pub fn schedule(self) -> TariffSchedule {
        match self {
            SolarSector::Residential => TariffSchedule::Tiered(RESIDENTIAL_BANDS),
            SolarSector::Commercial => TariffSchedule::Tiered(COMMERCIAL_BANDS),
            SolarSector::Industrial => TariffSchedule::Flat(INDUSTRIAL_RATE),
        }
    }
}

/// Total monthly charge (EGP) for a given consumption
pub fn tiered_cost(sector: SolarSector, monthly_consumption: f64) -> f64 {
    match sector.schedule() {
        TariffSchedule::Flat(rate) => monthly_consumption * rate,
        TariffSchedule::Tiered(bands) => {
            let mut total_cost = 0.0;
            let mut remaining = monthly_consumption;

            for band in bands {
                if remaining <= 0.0 {
                    break;
                }
                let used = remaining.min(band.width_kwh);
                total_cost += used * band.rate;
                remaining -= used;
            }

            total_cost
        }
    }
}

/// Weighted average rate (EGP/kWh) at a given monthly consumption
///
/// Flat schedules return their rate directly. Tiered schedules return
/// `tiered_cost / consumption`, which is NaN for zero consumption; callers
/// guard that case.
pub fn weighted_tariff(sector: SolarSector, monthly_consumption: f64) -> f64 {
    match sector.schedule() {
        TariffSchedule::Flat(rate) => rate,
        TariffSchedule::Tiered(_) => tiered_cost(sector, monthly_consumption) / monthly_consumption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_band_only() {
        assert_relative_eq!(weighted_tariff(SolarSector::Residential, 50.0), 0.68, epsilon = 1e-12);
        assert_relative_eq!(weighted_tariff(SolarSector::Residential, 20.0), 0.68, epsilon = 1e-12);
    }

    #[test]
    fn test_spill_into_second_band() {
        let expected = (50.0 * 0.68 + 50.0 * 0.78) / 100.0;
        assert_relative_eq!(weighted_tariff(SolarSector::Residential, 100.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_residential_top_band() {
        // 1000 kWh fills the six bounded bands exactly; 200 kWh spill into 2.23
        let cost = tiered_cost(SolarSector::Residential, 1200.0);
        assert_relative_eq!(cost, 2166.5, epsilon = 1e-9);
        assert_relative_eq!(weighted_tariff(SolarSector::Residential, 1200.0), 2166.5 / 1200.0, epsilon = 1e-12);
    }

    #[test]
    fn test_commercial_bands() {
        let cost = tiered_cost(SolarSector::Commercial, 1100.0);
        let expected = 100.0 * 0.65 + 150.0 * 1.36 + 350.0 * 1.50 + 400.0 * 1.65 + 100.0 * 1.80;
        assert_relative_eq!(cost, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_industrial_flat() {
        for consumption in [1.0, 75.0, 480.0, 12_345.6] {
            assert_eq!(weighted_tariff(SolarSector::Industrial, consumption), 1.70);
        }
        assert_relative_eq!(tiered_cost(SolarSector::Industrial, 100.0), 170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weighted_tariff_is_monotonic_for_residential() {
        let mut previous = 0.0;
        for consumption in (1..=40).map(|i| i as f64 * 50.0) {
            let rate = weighted_tariff(SolarSector::Residential, consumption);
            assert!(rate >= previous, "rate fell at {} kWh", consumption);
            previous = rate;
        }
    }
}
