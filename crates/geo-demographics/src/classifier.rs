//! Region classification
//!
//! An ordered chain of steps; the first step that produces a
//! classification wins. Non-finite coordinates, or a chain where no step
//! applies, end in the catch-all (`unknown`, 50/km²).

use crate::landmask::{estimate_country, OceanMask};
use crate::lookup::PlaceAttributes;
use crate::population::PopulationEstimator;
use crate::registry::{
    default_proximity_tiers, proximity_region, CityRegistry, DensityTable, PlaceDensityRules,
    ProximityTier,
};
use crate::{DataSource, NearestCity, PlaceSummary, RegionClassification, RegionType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Radius for the `estimated_population_50km` summary
pub const SUMMARY_RADIUS_KM: f64 = 50.0;

/// Density of the catch-all classification (people/km²)
pub const FALLBACK_DENSITY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStep {
    /// Land mask; ocean points stop here
    Ocean,
    /// Place attributes from an external lookup, when supplied
    Place,
    /// Nearest registry city and the proximity tier ladder
    CityProximity,
}

pub fn default_steps() -> Vec<ClassificationStep> {
    vec![
        ClassificationStep::Ocean,
        ClassificationStep::Place,
        ClassificationStep::CityProximity,
    ]
}

#[derive(Debug, Clone)]
pub struct RegionClassifier {
    mask: OceanMask,
    cities: CityRegistry,
    densities: DensityTable,
    place_rules: PlaceDensityRules,
    tiers: Vec<ProximityTier>,
    steps: Vec<ClassificationStep>,
    estimator: PopulationEstimator,
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::new(
            OceanMask::default(),
            CityRegistry::with_defaults(),
            DensityTable::with_defaults(),
            PlaceDensityRules::with_defaults(),
        )
    }
}

impl RegionClassifier {
    pub fn new(
        mask: OceanMask,
        cities: CityRegistry,
        densities: DensityTable,
        place_rules: PlaceDensityRules,
    ) -> Self {
        Self {
            mask,
            cities,
            densities,
            place_rules,
            tiers: default_proximity_tiers(),
            steps: default_steps(),
            estimator: PopulationEstimator,
        }
    }

    pub fn with_steps(mut self, steps: Vec<ClassificationStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn is_ocean(&self, lat: f64, lon: f64) -> bool {
        self.mask.is_ocean(lat, lon)
    }

    /// Classify from local data only
    pub fn classify(&self, lat: f64, lon: f64) -> RegionClassification {
        self.classify_with_place(lat, lon, None)
    }

    /// Classify, using place attributes when the chain reaches the place step
    pub fn classify_with_place(
        &self,
        lat: f64,
        lon: f64,
        place: Option<&PlaceAttributes>,
    ) -> RegionClassification {
        if !lat.is_finite() || !lon.is_finite() {
            debug!("Non-finite coordinate ({}, {}), using fallback", lat, lon);
            return self.fallback(lat, lon);
        }

        for step in &self.steps {
            let result = match step {
                ClassificationStep::Ocean => self.ocean_step(lat, lon),
                ClassificationStep::Place => place.map(|p| self.place_step(lat, lon, p)),
                ClassificationStep::CityProximity => Some(self.proximity_step(lat, lon)),
            };
            if let Some(classification) = result {
                info!(
                    "Classified ({:.4}, {:.4}) as {} via {:?} ({:.0}/km²)",
                    lat, lon, classification.region_type, step, classification.density_per_km2
                );
                return classification;
            }
        }

        self.fallback(lat, lon)
    }

    fn ocean_step(&self, lat: f64, lon: f64) -> Option<RegionClassification> {
        if !self.mask.is_ocean(lat, lon) {
            return None;
        }
        Some(RegionClassification {
            region_type: RegionType::Ocean,
            density_per_km2: 0.0,
            nearest_city: None,
            country: "Ocean".to_string(),
            estimated_population_50km: 0,
            data_source: DataSource::LocalEstimation,
            place: None,
        })
    }

    fn place_step(&self, lat: f64, lon: f64, place: &PlaceAttributes) -> RegionClassification {
        let density = self.place_rules.density_for(place).max(0.0);
        let region_type = self.place_rules.region_for(place);

        RegionClassification {
            region_type,
            density_per_km2: density,
            nearest_city: Some(NearestCity {
                name: place.locality().to_string(),
                distance_km: 0.0,
                population: None,
            }),
            country: place
                .country
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            estimated_population_50km: self.summary_population(lat, lon, density),
            data_source: DataSource::ExternalLookup,
            place: Some(PlaceSummary {
                display_name: place.display_name.clone(),
                place_type: place.place_type.clone(),
                osm_type: place.osm_type.clone(),
            }),
        }
    }

    fn proximity_step(&self, lat: f64, lon: f64) -> RegionClassification {
        let nearest = self.cities.nearest(lat, lon);
        let region_type = match nearest {
            Some((city, distance)) => proximity_region(&self.tiers, distance, city.population),
            None => RegionType::RuralSparse,
        };
        let density = self.densities.density(region_type);

        if let Some((city, distance)) = nearest {
            debug!("Nearest city: {} at {:.1} km", city.name, distance);
        }

        RegionClassification {
            region_type,
            density_per_km2: density,
            nearest_city: nearest.map(|(city, distance)| NearestCity {
                name: city.name.clone(),
                distance_km: distance,
                population: Some(city.population),
            }),
            country: estimate_country(lat, lon).to_string(),
            estimated_population_50km: self.summary_population(lat, lon, density),
            data_source: DataSource::LocalEstimation,
            place: None,
        }
    }

    fn fallback(&self, lat: f64, lon: f64) -> RegionClassification {
        RegionClassification {
            region_type: RegionType::Unknown,
            density_per_km2: FALLBACK_DENSITY,
            nearest_city: None,
            country: "Unknown".to_string(),
            estimated_population_50km: self.summary_population(lat, lon, FALLBACK_DENSITY),
            data_source: DataSource::LocalEstimation,
            place: None,
        }
    }

    fn summary_population(&self, lat: f64, lon: f64, density: f64) -> u64 {
        self.estimator
            .estimate(lat, lon, SUMMARY_RADIUS_KM, density) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo_place() -> PlaceAttributes {
        PlaceAttributes {
            display_name: "Chiyoda, Tokyo, Japan".to_string(),
            place_type: "city".to_string(),
            osm_type: Some("relation".to_string()),
            city: Some("Tokyo".to_string()),
            country: Some("Japan".to_string()),
            ..PlaceAttributes::default()
        }
    }

    #[test]
    fn test_mid_pacific_is_ocean() {
        let c = RegionClassifier::default().classify(0.0, -150.0);
        assert_eq!(c.region_type, RegionType::Ocean);
        assert_eq!(c.density_per_km2, 0.0);
        assert_eq!(c.country, "Ocean");
        assert_eq!(c.estimated_population_50km, 0);
    }

    #[test]
    fn test_tokyo_local_is_urban_major() {
        let c = RegionClassifier::default().classify(35.6762, 139.6503);
        assert_eq!(c.region_type, RegionType::UrbanMajor);
        assert_eq!(c.density_per_km2, 10000.0);
        assert_eq!(c.data_source, DataSource::LocalEstimation);
        let city = c.nearest_city.unwrap();
        assert_eq!(city.name, "tokyo");
        assert!(city.distance_km < 1.0);
        assert_eq!(city.population, Some(37_400_000));
    }

    #[test]
    fn test_ocean_skips_place() {
        let classifier = RegionClassifier::default();
        let c = classifier.classify_with_place(0.0, -150.0, Some(&tokyo_place()));
        assert_eq!(c.region_type, RegionType::Ocean);
    }

    #[test]
    fn test_place_attributes_win_over_proximity() {
        let c = RegionClassifier::default().classify_with_place(35.6762, 139.6503, Some(&tokyo_place()));
        assert_eq!(c.data_source, DataSource::ExternalLookup);
        assert_eq!(c.region_type, RegionType::UrbanMajor);
        // "tokyo" megacity override
        assert_eq!(c.density_per_km2, 15000.0);
        assert_eq!(c.country, "Japan");
        let city = c.nearest_city.unwrap();
        assert_eq!(city.name, "Tokyo");
        assert_eq!(city.distance_km, 0.0);
        assert_eq!(city.population, None);
        assert_eq!(c.place.unwrap().place_type, "city");
    }

    #[test]
    fn test_remote_land_is_rural_sparse() {
        // Central Siberia, far from every registry city
        let c = RegionClassifier::default().classify(62.0, 100.0);
        assert_eq!(c.region_type, RegionType::RuralSparse);
        assert_eq!(c.density_per_km2, 25.0);
        assert_eq!(c.country, "Other");
    }

    #[test]
    fn test_empty_registry_is_rural_sparse() {
        let classifier = RegionClassifier::new(
            OceanMask::Continental,
            CityRegistry::empty(),
            DensityTable::with_defaults(),
            PlaceDensityRules::with_defaults(),
        );
        let c = classifier.classify(35.6762, 139.6503);
        assert_eq!(c.region_type, RegionType::RuralSparse);
        assert!(c.nearest_city.is_none());
    }

    #[test]
    fn test_non_finite_falls_back() {
        let c = RegionClassifier::default().classify(f64::NAN, 10.0);
        assert_eq!(c.region_type, RegionType::Unknown);
        assert_eq!(c.density_per_km2, FALLBACK_DENSITY);
        assert_eq!(c.country, "Unknown");
    }

    #[test]
    fn test_empty_chain_falls_back() {
        let c = RegionClassifier::default()
            .with_steps(Vec::new())
            .classify(35.6762, 139.6503);
        assert_eq!(c.region_type, RegionType::Unknown);
    }

    #[test]
    fn test_summary_population_matches_estimator() {
        let c = RegionClassifier::default().classify(35.6762, 139.6503);
        let expected = PopulationEstimator.estimate(35.6762, 139.6503, 50.0, 10000.0) as u64;
        assert_eq!(c.estimated_population_50km, expected);
    }

    #[test]
    fn test_basin_mask_classifier() {
        let classifier = RegionClassifier::new(
            OceanMask::Basin,
            CityRegistry::with_defaults(),
            DensityTable::with_defaults(),
            PlaceDensityRules::with_defaults(),
        );
        assert_eq!(classifier.classify(40.0, -25.0).region_type, RegionType::Ocean);
        assert_ne!(
            RegionClassifier::default().classify(40.0, -25.0).region_type,
            RegionType::Ocean
        );
    }
}
