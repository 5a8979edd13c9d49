//! Geo-Demographics
//!
//! Turns an impact coordinate into a population picture: ocean/land test,
//! density tier, nearest reference city, and casualty estimates over three
//! nested damage zones.
//!
//! # Classification Chain
//!
//! | Step | Source | Result |
//! |------|--------|--------|
//! | 1 | Land mask | `ocean`, density 0 |
//! | 2 | Place attributes (external lookup) | megacity / place-type / country density |
//! | 3 | City proximity | tier by (distance, city population) |
//! | 4 | Catch-all | `unknown`, density 50 |
//!
//! The classifier itself is pure. Place attributes are fetched by the
//! caller through a [`PlaceLookup`] and handed in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod casualty;
pub mod classifier;
pub mod landmask;
pub mod lookup;
#[cfg(feature = "nominatim")]
pub mod nominatim;
pub mod population;
pub mod registry;

pub use casualty::{AdditionalEffects, CasualtyModel, CasualtyReport, DamageZone, ZoneReport, ZoneSpec};
pub use classifier::{ClassificationStep, RegionClassifier};
pub use landmask::{MacroRegion, OceanMask};
pub use lookup::{FixedLookup, LookupConfig, LookupError, NoLookup, PlaceAttributes, PlaceLookup};
#[cfg(feature = "nominatim")]
pub use nominatim::NominatimClient;
pub use population::PopulationEstimator;
pub use registry::{City, CityRegistry, DensityTable, PlaceDensityRules};

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.000000000;

#[derive(Error, Debug)]
pub enum DemographicsError {
    #[error("Non-finite input: {0}")]
    NonFinite(&'static str),
}

pub type Result<T> = std::result::Result<T, DemographicsError>;

/// Region tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    Ocean,
    UrbanMajor,
    UrbanLarge,
    UrbanMedium,
    UrbanSmall,
    Suburban,
    RuralPopulated,
    RuralSparse,
    Agricultural,
    Coastal,
    Mountain,
    Desert,
    Arctic,
    Unknown,
}

impl RegionType {
    pub const ALL: [RegionType; 14] = [
        RegionType::Ocean,
        RegionType::UrbanMajor,
        RegionType::UrbanLarge,
        RegionType::UrbanMedium,
        RegionType::UrbanSmall,
        RegionType::Suburban,
        RegionType::RuralPopulated,
        RegionType::RuralSparse,
        RegionType::Agricultural,
        RegionType::Coastal,
        RegionType::Mountain,
        RegionType::Desert,
        RegionType::Arctic,
        RegionType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Ocean => "ocean",
            RegionType::UrbanMajor => "urban_major",
            RegionType::UrbanLarge => "urban_large",
            RegionType::UrbanMedium => "urban_medium",
            RegionType::UrbanSmall => "urban_small",
            RegionType::Suburban => "suburban",
            RegionType::RuralPopulated => "rural_populated",
            RegionType::RuralSparse => "rural_sparse",
            RegionType::Agricultural => "agricultural",
            RegionType::Coastal => "coastal",
            RegionType::Mountain => "mountain",
            RegionType::Desert => "desert",
            RegionType::Arctic => "arctic",
            RegionType::Unknown => "unknown",
        }
    }

    pub fn is_urban(&self) -> bool {
        matches!(
            self,
            RegionType::UrbanMajor
                | RegionType::UrbanLarge
                | RegionType::UrbanMedium
                | RegionType::UrbanSmall
        )
    }
}

impl std::fmt::Display for RegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    LocalEstimation,
    ExternalLookup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCity {
    pub name: String,
    pub distance_km: f64,
    /// Unknown when the city came from a place lookup
    pub population: Option<u64>,
}

/// Summary of the place record an external classification was based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub display_name: String,
    pub place_type: String,
    pub osm_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionClassification {
    pub region_type: RegionType,
    /// People per km², always 0 for ocean
    pub density_per_km2: f64,
    pub nearest_city: Option<NearestCity>,
    pub country: String,
    pub estimated_population_50km: u64,
    pub data_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceSummary>,
}

/// Great-circle distance in km (haversine)
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
