//! Impact orchestration
//!
//! Physics → region → casualties → economics, merged into one report.
//! The engine holds only immutable reference data; every call is a pure
//! function of its inputs.

use crate::config::EngineConfig;
use crate::economics::EconomicTable;
use geo_demographics::landmask::macro_region;
use geo_demographics::{
    CasualtyModel, CasualtyReport, PlaceAttributes, RegionClassification, RegionType,
};
use impact_physics::{
    AsteroidProperties, AtmosphericEffects, CraterLaw, DestructionLevel, ImpactLocation,
    ImpactPhysics, TerrainType,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructionSummary {
    pub level: DestructionLevel,
    pub severity: u8,
    pub label: String,
}

impl From<DestructionLevel> for DestructionSummary {
    fn from(level: DestructionLevel) -> Self {
        Self {
            level,
            severity: level.severity(),
            label: level.label().to_string(),
        }
    }
}

/// Consolidated impact result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub asteroid: AsteroidProperties,
    pub location: ImpactLocation,
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    pub crater_depth_km: f64,
    pub crater_law: CraterLaw,
    pub seismic_magnitude: f64,
    pub affected_area_km2: f64,
    pub casualties_estimate: u64,
    pub economic_damage_usd: f64,
    pub atmospheric_effects: AtmosphericEffects,
    pub tsunami_risk: bool,
    pub destruction: DestructionSummary,
    pub macro_region: String,
    pub region: RegionClassification,
    pub casualties: CasualtyReport,
}

/// Terrain implied by a region tier
pub fn terrain_for_region(region: RegionType) -> TerrainType {
    match region {
        RegionType::Ocean => TerrainType::Ocean,
        RegionType::Desert => TerrainType::Desert,
        r if r.is_urban() => TerrainType::Urban,
        _ => TerrainType::Land,
    }
}

#[derive(Debug, Clone)]
pub struct ImpactEngine {
    physics: ImpactPhysics,
    casualties: CasualtyModel,
    economics: EconomicTable,
}

impl Default for ImpactEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ImpactEngine {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            physics: ImpactPhysics::new(config.crater_law),
            casualties: CasualtyModel::new(config.classifier()),
            economics: config.economics.clone(),
        }
    }

    pub fn is_ocean(&self, lat: f64, lon: f64) -> bool {
        self.casualties.classifier().is_ocean(lat, lon)
    }

    /// Region classification from local data
    pub fn classify_region(&self, lat: f64, lon: f64) -> RegionClassification {
        self.casualties.classifier().classify(lat, lon)
    }

    pub fn classify_with_place(
        &self,
        lat: f64,
        lon: f64,
        place: Option<&PlaceAttributes>,
    ) -> RegionClassification {
        self.casualties.classifier().classify_with_place(lat, lon, place)
    }

    /// Full impact report using local classification only
    pub fn simulate_impact(&self, asteroid: &AsteroidProperties, lat: f64, lon: f64) -> ImpactReport {
        self.simulate_with_place(asteroid, lat, lon, None)
    }

    pub fn simulate_with_place(
        &self,
        asteroid: &AsteroidProperties,
        lat: f64,
        lon: f64,
        place: Option<&PlaceAttributes>,
    ) -> ImpactReport {
        let region = self.classify_with_place(lat, lon, place);
        let location = ImpactLocation::new(lat, lon, terrain_for_region(region.region_type));
        let outcome = self.physics.simulate(asteroid, &location);

        let mut casualties = self.casualties.estimate_for_region(
            lat,
            lon,
            region.clone(),
            outcome.crater_diameter_km,
            outcome.energy_megatons,
        );
        casualties.region = None;

        let economic_damage_usd = self
            .economics
            .damage(outcome.affected_area_km2, region.region_type);
        let destruction = DestructionLevel::from_energy(outcome.energy_megatons);

        info!(
            "Impact at ({:.4}, {:.4}): {:.2} MT, crater {:.2} km, {} casualties, ${:.3e} damage",
            lat,
            lon,
            outcome.energy_megatons,
            outcome.crater_diameter_km,
            casualties.total_casualties,
            economic_damage_usd
        );

        ImpactReport {
            asteroid: *asteroid,
            location,
            mass_kg: outcome.mass_kg,
            energy_joules: outcome.energy_joules,
            energy_megatons: outcome.energy_megatons,
            crater_diameter_km: outcome.crater_diameter_km,
            crater_depth_km: outcome.crater_depth_km,
            crater_law: outcome.crater_law,
            seismic_magnitude: outcome.seismic_magnitude,
            affected_area_km2: outcome.affected_area_km2,
            casualties_estimate: casualties.total_casualties,
            economic_damage_usd,
            atmospheric_effects: outcome.atmospheric_effects,
            tsunami_risk: outcome.tsunami_risk,
            destruction: destruction.into(),
            macro_region: macro_region(lat, lon).label().to_string(),
            region,
            casualties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_physics::Composition;

    fn reference_asteroid() -> AsteroidProperties {
        AsteroidProperties::new(1.0, 30.0, 45.0, Composition::Rocky)
    }

    #[test]
    fn test_terrain_mapping() {
        assert_eq!(terrain_for_region(RegionType::Ocean), TerrainType::Ocean);
        assert_eq!(terrain_for_region(RegionType::UrbanSmall), TerrainType::Urban);
        assert_eq!(terrain_for_region(RegionType::Desert), TerrainType::Desert);
        assert_eq!(terrain_for_region(RegionType::Unknown), TerrainType::Land);
    }

    #[test]
    fn test_reference_scenario_over_tokyo() {
        let engine = ImpactEngine::default();
        let report = engine.simulate_impact(&reference_asteroid(), 35.6762, 139.6503);

        assert!(report.energy_megatons > 1000.0, "energy: {}", report.energy_megatons);
        assert!(report.crater_diameter_km > 1.0);
        assert!(report.casualties_estimate > 0);
        assert!(!report.tsunami_risk);
        assert_eq!(report.region.region_type, RegionType::UrbanMajor);
        assert_eq!(report.location.terrain, TerrainType::Urban);
        assert_eq!(report.macro_region, "Asia/Oceania");
        assert!(report.casualties.region.is_none());
    }

    #[test]
    fn test_economic_damage_uses_region_multiplier() {
        let engine = ImpactEngine::default();
        let report = engine.simulate_impact(&reference_asteroid(), 35.6762, 139.6503);
        assert!((report.economic_damage_usd - report.affected_area_km2 * 1e10).abs() < 1.0);
    }

    #[test]
    fn test_ocean_impact_tsunami() {
        let engine = ImpactEngine::default();
        let report = engine.simulate_impact(&reference_asteroid(), 0.0, -150.0);
        assert!(report.tsunami_risk);
        assert_eq!(report.region.region_type, RegionType::Ocean);
        assert_eq!(report.casualties_estimate, report.casualties.tsunami_casualties);
        assert!(report.casualties_estimate > 0);
    }

    #[test]
    fn test_velocity_scaled_engine() {
        let config = EngineConfig {
            crater_law: CraterLaw::VelocityScaled,
            ..EngineConfig::default()
        };
        let engine = ImpactEngine::from_config(&config);
        let report = engine.simulate_impact(&reference_asteroid(), 35.6762, 139.6503);
        assert_eq!(report.crater_law, CraterLaw::VelocityScaled);
        // 1.8 · 1000 m · (30/12)^0.78 ≈ 3.68 km
        assert!((report.crater_diameter_km - 3.68).abs() < 0.05, "crater: {}", report.crater_diameter_km);
    }

    #[test]
    fn test_place_attributes_flow_into_report() {
        let engine = ImpactEngine::default();
        let place = PlaceAttributes {
            display_name: "Lyon, France".to_string(),
            place_type: "city".to_string(),
            city: Some("Lyon".to_string()),
            country: Some("France".to_string()),
            ..PlaceAttributes::default()
        };
        let report = engine.simulate_with_place(&reference_asteroid(), 45.764, 4.8357, Some(&place));
        assert_eq!(report.region.region_type, RegionType::UrbanLarge);
        assert_eq!(report.region.density_per_km2, 1500.0);
        assert_eq!(report.region.country, "France");
    }

    #[test]
    fn test_tiny_impactor_has_no_casualties() {
        let engine = ImpactEngine::default();
        let pebble = AsteroidProperties::new(0.00005, 11.0, 45.0, Composition::Rocky);
        let report = engine.simulate_impact(&pebble, 35.6762, 139.6503);
        assert_eq!(report.casualties_estimate, 0);
        assert!(report.casualties.note.is_some());
    }
}
