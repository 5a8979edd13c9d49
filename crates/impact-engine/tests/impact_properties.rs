use geo_demographics::{
    CasualtyModel, DataSource, LookupError, PlaceAttributes, PlaceLookup, PopulationEstimator,
    RegionType,
};
use impact_engine::{ImpactEngine, ImpactService};
use impact_physics::{AsteroidProperties, Composition};
use proptest::prelude::*;
use std::time::Duration;

const TOKYO: (f64, f64) = (35.6762, 139.6503);
const MID_PACIFIC: (f64, f64) = (0.0, -150.0);

fn rocky(diameter_km: f64, velocity_km_s: f64) -> AsteroidProperties {
    AsteroidProperties::new(diameter_km, velocity_km_s, 45.0, Composition::Rocky)
}

#[test]
fn test_mid_pacific_classifies_as_ocean() {
    let region = ImpactEngine::default().classify_region(MID_PACIFIC.0, MID_PACIFIC.1);
    assert_eq!(region.region_type, RegionType::Ocean);
    assert_eq!(region.density_per_km2, 0.0);
}

#[test]
fn test_tokyo_without_lookup_is_urban_major() {
    let region = ImpactEngine::default().classify_region(TOKYO.0, TOKYO.1);
    assert_eq!(region.region_type, RegionType::UrbanMajor);
    assert_eq!(region.density_per_km2, 10000.0);
    assert_eq!(region.data_source, DataSource::LocalEstimation);
}

#[test]
fn test_sub_threshold_crater_has_no_casualties() {
    let model = CasualtyModel::default();
    for (lat, lon) in [TOKYO, MID_PACIFIC, (51.5074, -0.1278), (62.0, 100.0)] {
        let report = model.estimate_casualties(lat, lon, 0.005, 5000.0);
        assert_eq!(report.total_casualties, 0, "at {}, {}", lat, lon);
    }
}

#[test]
fn test_simulation_is_idempotent() {
    let engine = ImpactEngine::default();
    let asteroid = rocky(0.8, 22.0);
    let a = engine.simulate_impact(&asteroid, TOKYO.0, TOKYO.1);
    let b = engine.simulate_impact(&asteroid, TOKYO.0, TOKYO.1);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_velocity_increases_energy_and_casualties() {
    let engine = ImpactEngine::default();
    let reports: Vec<_> = [20.0, 25.0, 30.0]
        .iter()
        .map(|v| engine.simulate_impact(&rocky(1.0, *v), TOKYO.0, TOKYO.1))
        .collect();

    for pair in reports.windows(2) {
        assert!(pair[1].energy_joules > pair[0].energy_joules);
        assert!(
            pair[1].casualties_estimate > pair[0].casualties_estimate,
            "{} vs {}",
            pair[1].casualties_estimate,
            pair[0].casualties_estimate
        );
    }
}

#[test]
fn test_zone_populations_round_trip() {
    let model = CasualtyModel::default();
    let crater_km = 3.7;
    let report = model.estimate_casualties(TOKYO.0, TOKYO.1, crater_km, 800.0);

    let zone_sum: f64 = report.zones.iter().map(|z| z.population as f64).sum();
    let single_shot = PopulationEstimator.estimate(TOKYO.0, TOKYO.1, crater_km * 4.0, 10000.0);
    assert!(
        (zone_sum - single_shot).abs() <= report.zones.len() as f64,
        "zones {} vs disc {}",
        zone_sum,
        single_shot
    );
}

#[test]
fn test_reference_scenario() {
    let report = ImpactEngine::default().simulate_impact(&rocky(1.0, 30.0), TOKYO.0, TOKYO.1);
    assert!(report.energy_megatons > 1000.0);
    assert!(report.crater_diameter_km > 1.0);
    assert!(report.casualties_estimate > 0);
    assert!(!report.tsunami_risk);
    assert!(report.economic_damage_usd > 0.0);
    assert!(report.atmospheric_effects.dust_cloud_height_km > 0.0);
}

#[test]
fn test_casualties_follow_tier_ladder() {
    let engine = ImpactEngine::default();
    let asteroid = rocky(0.3, 18.0);
    let points = [
        TOKYO,
        // ~78 km north of Los Angeles
        (34.75, -118.2437),
        // ~147 km west of Sydney
        (-33.8688, 149.6),
        // ~300 km north of Tokyo
        (38.4, 139.6503),
        (62.0, 100.0),
        MID_PACIFIC,
    ];
    let zone_casualties: Vec<(RegionType, u64)> = points
        .iter()
        .map(|(lat, lon)| {
            let r = engine.simulate_impact(&asteroid, *lat, *lon);
            (
                r.region.region_type,
                r.casualties_estimate - r.casualties.tsunami_casualties,
            )
        })
        .collect();

    let tiers: Vec<RegionType> = zone_casualties.iter().map(|c| c.0).collect();
    assert_eq!(
        tiers,
        vec![
            RegionType::UrbanMajor,
            RegionType::UrbanMedium,
            RegionType::Suburban,
            RegionType::RuralPopulated,
            RegionType::RuralSparse,
            RegionType::Ocean,
        ]
    );
    assert!(
        zone_casualties.windows(2).all(|w| w[0].1 >= w[1].1),
        "{:?}",
        zone_casualties
    );
    assert_eq!(zone_casualties.last().map(|c| c.1), Some(0));
}

struct SlowLookup;

impl PlaceLookup for SlowLookup {
    async fn reverse(&self, _lat: f64, _lon: f64) -> Result<PlaceAttributes, LookupError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(PlaceAttributes {
            place_type: "city".to_string(),
            city: Some("Nowhere".to_string()),
            ..PlaceAttributes::default()
        })
    }
}

struct FailingLookup;

impl PlaceLookup for FailingLookup {
    async fn reverse(&self, _lat: f64, _lon: f64) -> Result<PlaceAttributes, LookupError> {
        Err(LookupError::RequestFailed("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_slow_lookup_times_out_to_local() {
    let service = ImpactService::new(ImpactEngine::default(), SlowLookup, Duration::from_millis(50));
    let region = service.classify_region(TOKYO.0, TOKYO.1).await;
    assert_eq!(region.data_source, DataSource::LocalEstimation);
    assert_eq!(region.region_type, RegionType::UrbanMajor);
}

#[tokio::test]
async fn test_failing_lookup_report_matches_offline_report() {
    let service = ImpactService::new(ImpactEngine::default(), FailingLookup, Duration::from_secs(5));
    let asteroid = rocky(1.0, 30.0);
    let online = service.simulate_impact(&asteroid, TOKYO.0, TOKYO.1).await;
    let offline = ImpactEngine::default().simulate_impact(&asteroid, TOKYO.0, TOKYO.1);
    assert_eq!(online, offline);
}

proptest! {
    #[test]
    fn test_no_negative_quantities(
        diameter in 0.0f64..20.0,
        velocity in 0.0f64..72.0,
        angle in 0.0f64..=90.0,
        lat in -89.0f64..89.0,
        lon in -179.0f64..179.0,
    ) {
        let engine = ImpactEngine::default();
        let asteroid = AsteroidProperties::new(diameter, velocity, angle, Composition::Rocky);
        let report = engine.simulate_impact(&asteroid, lat, lon);

        prop_assert!(report.energy_joules >= 0.0);
        prop_assert!(report.crater_diameter_km >= 0.0);
        prop_assert!(report.affected_area_km2 >= 0.0);
        prop_assert!(report.economic_damage_usd >= 0.0);
        prop_assert!(report.region.density_per_km2 >= 0.0);
        prop_assert!(!report.casualties.degraded);
        if report.region.region_type == RegionType::Ocean {
            prop_assert_eq!(report.region.density_per_km2, 0.0);
        }
    }
}
