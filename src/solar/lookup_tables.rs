//! Solar Lookup Tables
//!
//! Annual production factors per Egyptian governorate and per-sector
//! installation economics.
//!
//! Production factors are specific yields in kWh per installed kWp per year.
//! Sites outside the table use [`DEFAULT_PRODUCTION_FACTOR`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Specific yield used for any site not listed in [`GOVERNORATES`].
pub const DEFAULT_PRODUCTION_FACTOR: f64 = 1900.0;

/// Egyptian governorate with a tabulated solar production factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Governorate {
    Cairo,
    Giza,
    Alexandria,
    Aswan,
    Luxor,
    Qena,
    Sohag,
    Assiut,
    Minya,
    BeniSuef,
    Fayoum,
    RedSea,
    Matrouh,
    NorthSinai,
    SouthSinai,
    NewValley,
    Ismailia,
    Suez,
    PortSaid,
    Damietta,
    Dakahlia,
    Gharbia,
    Monufia,
    Qalyubia,
    Sharqia,
    KafrElSheikh,
    Beheira,
}

/// A governorate row: display name and specific yield (kWh/kWp/yr)
#[derive(Debug, Clone, Copy)]
pub struct ProductionFactor {
    pub governorate: Governorate,
    pub name: &'static str,
    pub kwh_per_kwp: f64,
}

// ============================================================================
// EMBEDDED PRODUCTION FACTORS
// ============================================================================

pub static GOVERNORATES: &[ProductionFactor] = &[
    ProductionFactor { governorate: Governorate::Cairo, name: "Cairo", kwh_per_kwp: 1900.0 },
    ProductionFactor { governorate: Governorate::Giza, name: "Giza", kwh_per_kwp: 1900.0 },
    ProductionFactor { governorate: Governorate::Alexandria, name: "Alexandria", kwh_per_kwp: 1800.0 },
    ProductionFactor { governorate: Governorate::Aswan, name: "Aswan", kwh_per_kwp: 2200.0 },
    ProductionFactor { governorate: Governorate::Luxor, name: "Luxor", kwh_per_kwp: 2150.0 },
    ProductionFactor { governorate: Governorate::Qena, name: "Qena", kwh_per_kwp: 2100.0 },
    ProductionFactor { governorate: Governorate::Sohag, name: "Sohag", kwh_per_kwp: 2050.0 },
    ProductionFactor { governorate: Governorate::Assiut, name: "Assiut", kwh_per_kwp: 2000.0 },
    ProductionFactor { governorate: Governorate::Minya, name: "Minya", kwh_per_kwp: 1975.0 },
    ProductionFactor { governorate: Governorate::BeniSuef, name: "Beni Suef", kwh_per_kwp: 1950.0 },
    ProductionFactor { governorate: Governorate::Fayoum, name: "Fayoum", kwh_per_kwp: 1930.0 },
    ProductionFactor { governorate: Governorate::RedSea, name: "Red Sea", kwh_per_kwp: 2150.0 },
    ProductionFactor { governorate: Governorate::Matrouh, name: "Matrouh", kwh_per_kwp: 1850.0 },
    ProductionFactor { governorate: Governorate::NorthSinai, name: "North Sinai", kwh_per_kwp: 2000.0 },
    ProductionFactor { governorate: Governorate::SouthSinai, name: "South Sinai", kwh_per_kwp: 2200.0 },
    ProductionFactor { governorate: Governorate::NewValley, name: "New Valley", kwh_per_kwp: 2250.0 },
    ProductionFactor { governorate: Governorate::Ismailia, name: "Ismailia", kwh_per_kwp: 1925.0 },
    ProductionFactor { governorate: Governorate::Suez, name: "Suez", kwh_per_kwp: 1950.0 },
    ProductionFactor { governorate: Governorate::PortSaid, name: "Port Said", kwh_per_kwp: 1800.0 },
    ProductionFactor { governorate: Governorate::Damietta, name: "Damietta", kwh_per_kwp: 1800.0 },
    ProductionFactor { governorate: Governorate::Dakahlia, name: "Dakahlia", kwh_per_kwp: 1825.0 },
    ProductionFactor { governorate: Governorate::Gharbia, name: "Gharbia", kwh_per_kwp: 1850.0 },
    ProductionFactor { governorate: Governorate::Monufia, name: "Monufia", kwh_per_kwp: 1850.0 },
    ProductionFactor { governorate: Governorate::Qalyubia, name: "Qalyubia", kwh_per_kwp: 1900.0 },
    ProductionFactor { governorate: Governorate::Sharqia, name: "Sharqia", kwh_per_kwp: 1850.0 },
    ProductionFactor { governorate: Governorate::KafrElSheikh, name: "Kafr El Sheikh", kwh_per_kwp: 1800.0 },
    ProductionFactor { governorate: Governorate::Beheira, name: "Beheira", kwh_per_kwp: 1800.0 },
];

impl Governorate {
    fn row(self) -> &'static ProductionFactor {
        // Table is total over the enum; the index lookup cannot miss.
        &GOVERNORATES[self as usize]
    }

    /// Display name as used in the site selector ("Beni Suef", "Red Sea", ...)
    pub fn name(self) -> &'static str {
        self.row().name
    }

    /// Specific yield in kWh/kWp/yr
    pub fn production_factor(self) -> f64 {
        self.row().kwh_per_kwp
    }

    /// Look up a governorate by its display name (exact match)
    pub fn from_name(name: &str) -> Option<Self> {
        GOVERNORATES
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.governorate)
    }
}

/// Site location for a solar estimate
///
/// Unlisted sites are kept by name and resolve to the default specific yield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    Governorate(Governorate),
    Other(String),
}

impl Location {
    /// Resolve a site name; never fails
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match Governorate::from_name(trimmed) {
            Some(gov) => Location::Governorate(gov),
            None => {
                tracing::warn!(
                    "No production factor for '{}', using default {}",
                    trimmed,
                    DEFAULT_PRODUCTION_FACTOR
                );
                Location::Other(trimmed.to_string())
            }
        }
    }

    /// Specific yield for this site (kWh/kWp/yr)
    pub fn production_factor(&self) -> f64 {
        match self {
            Location::Governorate(gov) => gov.production_factor(),
            Location::Other(_) => DEFAULT_PRODUCTION_FACTOR,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Location::Governorate(gov) => gov.name(),
            Location::Other(name) => name,
        }
    }
}

impl From<Governorate> for Location {
    fn from(gov: Governorate) -> Self {
        Location::Governorate(gov)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Location::parse(&name)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.name().to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Customer sector for tariffs and installation economics
///
/// Deserialises through [`SolarSector::from_key_or_default`], so any string is
/// accepted and unknown keys land on the fallback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SolarSector {
    Residential,
    Commercial,
    /// Fallback tier for unrecognised sector keys
    #[default]
    Industrial,
}

impl SolarSector {
    /// Installation cost per kWp (EGP)
    pub fn cost_per_kwp(self) -> f64 {
        match self {
            SolarSector::Residential => 12_000.0,
            SolarSector::Commercial => 13_000.0,
            SolarSector::Industrial => 14_000.0,
        }
    }

    /// Annual maintenance cost as a fraction of installation cost
    pub fn maintenance_factor(self) -> f64 {
        match self {
            SolarSector::Residential => 0.02,
            SolarSector::Commercial => 0.03,
            SolarSector::Industrial => 0.04,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SolarSector::Residential => "residential",
            SolarSector::Commercial => "commercial",
            SolarSector::Industrial => "industrial",
        }
    }

    /// Parse a sector key, falling back to [`SolarSector::Industrial`]
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown solar sector '{}', using industrial tier", key);
            SolarSector::default()
        })
    }
}

impl FromStr for SolarSector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Ok(SolarSector::Residential),
            "commercial" => Ok(SolarSector::Commercial),
            "industrial" => Ok(SolarSector::Industrial),
            other => Err(format!("unknown solar sector '{}'", other)),
        }
    }
}

impl From<String> for SolarSector {
    fn from(key: String) -> Self {
        SolarSector::from_key_or_default(&key)
    }
}

impl From<SolarSector> for String {
    fn from(sector: SolarSector) -> Self {
        sector.key().to_string()
    }
}

impl fmt::Display for SolarSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (idx, row) in GOVERNORATES.iter().enumerate() {
            assert_eq!(row.governorate as usize, idx, "row {} out of order", row.name);
        }
        assert_eq!(GOVERNORATES.len(), 27);
    }

    #[test]
    fn test_known_locations() {
        assert_eq!(Location::parse("Cairo").production_factor(), 1900.0);
        assert_eq!(Location::parse("Aswan").production_factor(), 2200.0);
        assert_eq!(Location::parse("New Valley").production_factor(), 2250.0);
        assert_eq!(
            Location::parse(" Kafr El Sheikh "),
            Location::Governorate(Governorate::KafrElSheikh)
        );
    }

    #[test]
    fn test_unknown_location_uses_default() {
        let loc = Location::parse("Atlantis");
        assert_eq!(loc, Location::Other("Atlantis".to_string()));
        assert_eq!(loc.production_factor(), DEFAULT_PRODUCTION_FACTOR);
    }

    #[test]
    fn test_unlisted_site_factor_is_plain_lookup() {
        let loc = Location::Other("Siwa".to_string());
        let factors: Vec<f64> = (0..1000).map(|_| loc.production_factor()).collect();
        assert!(factors.iter().all(|&f| f == DEFAULT_PRODUCTION_FACTOR));
    }

    #[test]
    fn test_sector_fallback() {
        assert_eq!(SolarSector::from_key_or_default("Residential"), SolarSector::Residential);
        assert_eq!(SolarSector::from_key_or_default("farm"), SolarSector::Industrial);
        assert_eq!(SolarSector::Industrial.cost_per_kwp(), 14_000.0);
        assert_eq!(SolarSector::Commercial.maintenance_factor(), 0.03);
    }

    #[test]
    fn test_location_serde_round_trip_by_name() {
        let json = serde_json::to_string(&Location::Governorate(Governorate::PortSaid)).unwrap();
        assert_eq!(json, "\"Port Said\"");
        let loc: Location = serde_json::from_str("\"Somewhere\"").unwrap();
        assert_eq!(loc.production_factor(), 1900.0);
    }

    #[test]
    fn test_sector_json_uses_fallback() {
        let sector: SolarSector = serde_json::from_str("\"Residential\"").unwrap();
        assert_eq!(sector, SolarSector::Residential);
        let sector: SolarSector = serde_json::from_str("\"farm\"").unwrap();
        assert_eq!(sector, SolarSector::Industrial);
        assert_eq!(serde_json::to_string(&SolarSector::Commercial).unwrap(), "\"commercial\"");
    }
}
