//! Casualty Model
//!
//! Three nested damage zones around the impact point, each split into
//! concentric rings with distance-decayed mortality.
//!
//! | Zone | Outer radius | Applied mortality | Reported mortality |
//! |------|--------------|-------------------|--------------------|
//! | immediate | crater × 0.5 | 0.85 | 0.95 |
//! | severe | crater × 2 | 0.45 | 0.60 |
//! | moderate | crater × 4 | 0.08 | 0.15 |
//!
//! Per ring:
//!
//! ```text
//! rings       = max(3, floor(R))
//! ring_pop    = zone_pop · (ring_area / (π·R²))
//! decay       = max(0.1, 1 − 0.5 · avg_dist / R)
//! casualties  = floor(ring_pop · mortality · decay · energy_factor)
//! energy_factor = clamp(E_MT / 100, 0.1, 1.0)
//! ```
//!
//! Ocean impacts add a tsunami term keyed on yield.

use crate::classifier::RegionClassifier;
use crate::lookup::PlaceAttributes;
use crate::population::PopulationEstimator;
use crate::{DemographicsError, RegionClassification, RegionType, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info, warn};

/// Craters narrower than this (km) cause no modeled casualties
pub const MIN_CRATER_KM: f64 = 0.01;

/// Ring count ceiling for very large zones
pub const MAX_RINGS: usize = 10_000;

/// People per km² of crater² used when the model degrades
const FALLBACK_CASUALTIES_PER_KM2: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageZone {
    Immediate,
    Severe,
    Moderate,
}

/// Zone geometry and mortality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub zone: DamageZone,
    /// Outer radius as a multiple of crater diameter
    pub radius_factor: f64,
    /// Mortality applied in the ring integration
    pub base_mortality: f64,
    /// Mortality shown in reports
    pub reported_mortality: f64,
}

impl ZoneSpec {
    pub fn defaults() -> [ZoneSpec; 3] {
        [
            ZoneSpec {
                zone: DamageZone::Immediate,
                radius_factor: 0.5,
                base_mortality: 0.85,
                reported_mortality: 0.95,
            },
            ZoneSpec {
                zone: DamageZone::Severe,
                radius_factor: 2.0,
                base_mortality: 0.45,
                reported_mortality: 0.60,
            },
            ZoneSpec {
                zone: DamageZone::Moderate,
                radius_factor: 4.0,
                base_mortality: 0.08,
                reported_mortality: 0.15,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReport {
    pub zone: DamageZone,
    pub radius_km: f64,
    /// Net population (excludes inner zones)
    pub population: u64,
    pub casualties: u64,
    pub mortality_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalEffects {
    pub tsunami_risk: bool,
    pub wildfire_risk: bool,
    pub infrastructure_damage: bool,
}

impl AdditionalEffects {
    pub fn for_region(region: RegionType) -> Self {
        Self {
            tsunami_risk: region == RegionType::Ocean,
            wildfire_risk: matches!(region, RegionType::RuralPopulated | RegionType::Agricultural),
            infrastructure_damage: matches!(region, RegionType::UrbanMajor | RegionType::UrbanLarge),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualtyReport {
    pub total_casualties: u64,
    pub total_affected_population: u64,
    pub zones: Vec<ZoneReport>,
    pub tsunami_casualties: u64,
    pub energy_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionClassification>,
    pub additional_effects: AdditionalEffects,
    /// Set when the crude fallback replaced the ring model
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CasualtyReport {
    fn sub_threshold(region: Option<RegionClassification>) -> Self {
        let additional_effects = region
            .as_ref()
            .map(|r| AdditionalEffects::for_region(r.region_type))
            .unwrap_or_default();
        Self {
            total_casualties: 0,
            total_affected_population: 0,
            zones: Vec::new(),
            tsunami_casualties: 0,
            energy_factor: 0.0,
            region,
            additional_effects,
            degraded: false,
            error: None,
            note: Some("Impact too small to cause significant casualties".to_string()),
        }
    }

    fn fallback(crater_diameter_km: f64, region: Option<RegionClassification>, error: String) -> Self {
        let crude = crater_diameter_km.powi(2) * FALLBACK_CASUALTIES_PER_KM2;
        let additional_effects = region
            .as_ref()
            .map(|r| AdditionalEffects::for_region(r.region_type))
            .unwrap_or_default();
        Self {
            total_casualties: if crude.is_finite() { crude as u64 } else { 0 },
            total_affected_population: 0,
            zones: Vec::new(),
            tsunami_casualties: 0,
            energy_factor: 0.0,
            region,
            additional_effects,
            degraded: true,
            error: Some(error),
            note: None,
        }
    }

    pub fn zone(&self, zone: DamageZone) -> Option<&ZoneReport> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// `clamp(E_MT / 100, 0.1, 1.0)`
pub fn energy_factor(energy_mt: f64) -> f64 {
    (energy_mt / 100.0).clamp(0.1, 1.0)
}

/// Extra deaths from an ocean impact's tsunami
pub fn tsunami_casualties(energy_mt: f64) -> u64 {
    if !(energy_mt >= 50.0) {
        return 0;
    }
    let per_megaton = if energy_mt < 500.0 {
        100.0
    } else if energy_mt < 2000.0 {
        150.0
    } else {
        200.0
    };
    let casualties = energy_mt * per_megaton;
    if casualties.is_finite() {
        casualties as u64
    } else {
        0
    }
}

/// Ring-subdivided casualties for one zone
pub fn ring_casualties(radius_km: f64, population: f64, base_mortality: f64, energy_factor: f64) -> u64 {
    if !(population > 0.0) || !(radius_km > 0.0) {
        return 0;
    }

    let num_rings = (radius_km.floor() as usize).clamp(3, MAX_RINGS);
    let total_area = PI * radius_km.powi(2);
    let mut total = 0u64;

    for ring in 0..num_rings {
        let inner = (ring as f64 / num_rings as f64) * radius_km;
        let outer = ((ring + 1) as f64 / num_rings as f64) * radius_km;

        let ring_area = PI * (outer.powi(2) - inner.powi(2));
        let ring_population = population * (ring_area / total_area);

        let avg_distance = (inner + outer) / 2.0;
        let distance_factor = (1.0 - (avg_distance / radius_km) * 0.5).max(0.1);

        let mortality = base_mortality * distance_factor * energy_factor;
        total += (ring_population * mortality) as u64;
    }

    total
}

#[derive(Debug, Clone)]
pub struct CasualtyModel {
    classifier: RegionClassifier,
    zones: [ZoneSpec; 3],
    estimator: PopulationEstimator,
}

impl Default for CasualtyModel {
    fn default() -> Self {
        Self::new(RegionClassifier::default())
    }
}

impl CasualtyModel {
    pub fn new(classifier: RegionClassifier) -> Self {
        Self {
            classifier,
            zones: ZoneSpec::defaults(),
            estimator: PopulationEstimator,
        }
    }

    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    /// Casualties at a point, classified from local data
    pub fn estimate_casualties(
        &self,
        lat: f64,
        lon: f64,
        crater_diameter_km: f64,
        energy_mt: f64,
    ) -> CasualtyReport {
        self.estimate_with_place(lat, lon, crater_diameter_km, energy_mt, None)
    }

    pub fn estimate_with_place(
        &self,
        lat: f64,
        lon: f64,
        crater_diameter_km: f64,
        energy_mt: f64,
        place: Option<&PlaceAttributes>,
    ) -> CasualtyReport {
        if crater_diameter_km < MIN_CRATER_KM {
            return CasualtyReport::sub_threshold(None);
        }
        let region = self.classifier.classify_with_place(lat, lon, place);
        self.estimate_for_region(lat, lon, region, crater_diameter_km, energy_mt)
    }

    /// Casualties for an already classified region; never fails
    pub fn estimate_for_region(
        &self,
        lat: f64,
        lon: f64,
        region: RegionClassification,
        crater_diameter_km: f64,
        energy_mt: f64,
    ) -> CasualtyReport {
        if crater_diameter_km < MIN_CRATER_KM {
            return CasualtyReport::sub_threshold(Some(region));
        }
        match self.try_estimate(lat, lon, &region, crater_diameter_km, energy_mt) {
            Ok(report) => report,
            Err(e) => {
                warn!("Casualty model degraded to fallback: {}", e);
                CasualtyReport::fallback(crater_diameter_km, Some(region), e.to_string())
            }
        }
    }

    pub fn try_estimate(
        &self,
        lat: f64,
        lon: f64,
        region: &RegionClassification,
        crater_diameter_km: f64,
        energy_mt: f64,
    ) -> Result<CasualtyReport> {
        if !crater_diameter_km.is_finite() {
            return Err(DemographicsError::NonFinite("crater_diameter_km"));
        }
        if !energy_mt.is_finite() {
            return Err(DemographicsError::NonFinite("energy_mt"));
        }
        let density = region.density_per_km2;
        if !density.is_finite() {
            return Err(DemographicsError::NonFinite("density_per_km2"));
        }

        let factor = energy_factor(energy_mt);
        let mut zones = Vec::with_capacity(self.zones.len());
        let mut inner_population = 0.0;
        let mut cumulative = 0.0;
        let mut total_casualties = 0u64;

        for spec in &self.zones {
            let radius_km = crater_diameter_km * spec.radius_factor;
            cumulative = self.estimator.estimate(lat, lon, radius_km, density);
            let net_population = cumulative - inner_population;
            let casualties = ring_casualties(radius_km, net_population, spec.base_mortality, factor);

            debug!(
                "Zone {:?}: r={:.2} km, pop={:.0}, casualties={}",
                spec.zone, radius_km, net_population, casualties
            );

            total_casualties += casualties;
            zones.push(ZoneReport {
                zone: spec.zone,
                radius_km,
                population: net_population.max(0.0) as u64,
                casualties,
                mortality_rate: spec.reported_mortality,
            });
            inner_population = cumulative;
        }

        let tsunami = if region.region_type == RegionType::Ocean {
            tsunami_casualties(energy_mt)
        } else {
            0
        };
        total_casualties += tsunami;

        info!(
            "Casualties: {} ({} from tsunami) in {} at {:.0}/km²",
            total_casualties, tsunami, region.region_type, density
        );

        Ok(CasualtyReport {
            total_casualties,
            total_affected_population: cumulative as u64,
            zones,
            tsunami_casualties: tsunami,
            energy_factor: factor,
            region: Some(region.clone()),
            additional_effects: AdditionalEffects::for_region(region.region_type),
            degraded: false,
            error: None,
            note: None,
        })
    }
}
