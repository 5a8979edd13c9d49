//! Reference data: city registry, tier densities and place-attribute rules.
//!
//! All tables are plain serde values. They are built once (defaults or a
//! config file) and injected into the classifier; nothing here is global.

use crate::{haversine_km, lookup::PlaceAttributes, RegionType};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A reference city for proximity classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    /// Core density (people/km²)
    pub density: f64,
}

/// Fixed registry of major world cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CityRegistry {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn empty() -> Self {
        Self { cities: Vec::new() }
    }

    /// The sixteen built-in megacities
    pub fn with_defaults() -> Self {
        const DEFAULTS: &[(&str, f64, f64, u64, f64)] = &[
            ("tokyo", 35.6762, 139.6503, 37_400_000, 15000.0),
            ("delhi", 28.7041, 77.1025, 30_290_000, 11000.0),
            ("shanghai", 31.2304, 121.4737, 27_058_000, 7700.0),
            ("dhaka", 23.8103, 90.4125, 21_005_000, 23000.0),
            ("mumbai", 19.0760, 72.8777, 20_411_000, 32000.0),
            ("beijing", 39.9042, 116.4074, 20_035_000, 1300.0),
            ("new_york", 40.7128, -74.0060, 18_804_000, 11000.0),
            ("mexico_city", 19.4326, -99.1332, 21_782_000, 9600.0),
            ("sao_paulo", -23.5505, -46.6333, 22_043_000, 8000.0),
            ("los_angeles", 34.0522, -118.2437, 12_458_000, 3200.0),
            ("london", 51.5074, -0.1278, 9_304_000, 5700.0),
            ("paris", 48.8566, 2.3522, 11_017_000, 8900.0),
            ("moscow", 55.7558, 37.6176, 12_506_000, 5000.0),
            ("cairo", 30.0444, 31.2357, 20_484_000, 15000.0),
            ("lagos", 6.5244, 3.3792, 14_368_000, 18000.0),
            ("sydney", -33.8688, 151.2093, 5_312_000, 2100.0),
        ];

        let cities = DEFAULTS
            .iter()
            .map(|&(name, latitude, longitude, population, density)| City {
                name: name.to_string(),
                latitude,
                longitude,
                population,
                density,
            })
            .collect();
        Self { cities }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Nearest city and its distance; the first entry wins a tie
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<(&City, f64)> {
        let mut best: Option<(&City, f64)> = None;
        for city in &self.cities {
            let distance = haversine_km(lat, lon, city.latitude, city.longitude);
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((city, distance)),
            }
        }
        best
    }
}

/// Density per region tier (people/km²)
///
/// Deserialized entries override the built-in tiers; tiers left out keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DensityTable {
    densities: BTreeMap<RegionType, f64>,
}

impl<'de> Deserialize<'de> for DensityTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let overrides = BTreeMap::<RegionType, f64>::deserialize(deserializer)?;
        let mut table = Self::with_defaults();
        table.densities.extend(overrides);
        Ok(table)
    }
}

impl Default for DensityTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DensityTable {
    /// Density used for a tier missing from the table
    pub const FALLBACK_DENSITY: f64 = 50.0;

    pub fn with_defaults() -> Self {
        let densities = [
            (RegionType::UrbanMajor, 10000.0),
            (RegionType::UrbanLarge, 5000.0),
            (RegionType::UrbanMedium, 2500.0),
            (RegionType::UrbanSmall, 1000.0),
            (RegionType::Suburban, 500.0),
            (RegionType::RuralPopulated, 100.0),
            (RegionType::RuralSparse, 25.0),
            (RegionType::Agricultural, 150.0),
            (RegionType::Coastal, 300.0),
            (RegionType::Mountain, 10.0),
            (RegionType::Desert, 1.0),
            (RegionType::Ocean, 0.0),
            (RegionType::Arctic, 0.1),
        ]
        .into_iter()
        .collect();
        Self { densities }
    }

    pub fn set(&mut self, region: RegionType, density: f64) {
        self.densities.insert(region, density);
    }

    /// Ocean is pinned to zero whatever the table says
    pub fn density(&self, region: RegionType) -> f64 {
        if region == RegionType::Ocean {
            return 0.0;
        }
        self.densities
            .get(&region)
            .copied()
            .unwrap_or(Self::FALLBACK_DENSITY)
    }
}

/// One row of the city-proximity tier ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityTier {
    /// Strict upper bound on distance to the nearest city
    pub max_distance_km: f64,
    /// Strict lower bound on that city's population, if any
    #[serde(default)]
    pub min_population: Option<u64>,
    pub region: RegionType,
}

pub fn default_proximity_tiers() -> Vec<ProximityTier> {
    let tier = |max_distance_km, min_population, region| ProximityTier {
        max_distance_km,
        min_population,
        region,
    };
    vec![
        tier(25.0, Some(20_000_000), RegionType::UrbanMajor),
        tier(50.0, Some(10_000_000), RegionType::UrbanLarge),
        tier(100.0, Some(5_000_000), RegionType::UrbanMedium),
        tier(200.0, Some(1_000_000), RegionType::Suburban),
        tier(500.0, None, RegionType::RuralPopulated),
    ]
}

/// First matching tier, `rural_sparse` otherwise
pub fn proximity_region(tiers: &[ProximityTier], distance_km: f64, population: u64) -> RegionType {
    tiers
        .iter()
        .find(|t| {
            distance_km < t.max_distance_km && t.min_population.map_or(true, |p| population > p)
        })
        .map(|t| t.region)
        .unwrap_or(RegionType::RuralSparse)
}

/// Density for a set of countries, optionally narrowed by state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDensity {
    pub countries: Vec<String>,
    /// Substrings of the state name; empty means any state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    pub density: f64,
}

impl CountryDensity {
    fn new(countries: &[&str], density: f64) -> Self {
        Self {
            countries: countries.iter().map(|s| s.to_string()).collect(),
            states: Vec::new(),
            density,
        }
    }

    fn with_states(mut self, states: &[&str]) -> Self {
        self.states = states.iter().map(|s| s.to_string()).collect();
        self
    }

    fn matches(&self, country: &str, state: &str) -> bool {
        self.countries.iter().any(|c| c == country)
            && (self.states.is_empty() || self.states.iter().any(|s| state.contains(s.as_str())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MegacityDensity {
    pub name: String,
    pub density: f64,
}

/// Density rules for a group of place types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceBucket {
    pub place_types: Vec<String>,
    #[serde(default)]
    pub country_rules: Vec<CountryDensity>,
    pub default_density: f64,
}

impl PlaceBucket {
    fn new(place_types: &[&str], country_rules: Vec<CountryDensity>, default_density: f64) -> Self {
        Self {
            place_types: place_types.iter().map(|s| s.to_string()).collect(),
            country_rules,
            default_density,
        }
    }
}

/// Rules turning place attributes into a density and a region tier
///
/// Matching is on lowercased names: megacity substring of the city name
/// first, then the place-type bucket, then the country default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDensityRules {
    pub megacities: Vec<MegacityDensity>,
    pub buckets: Vec<PlaceBucket>,
    pub country_defaults: Vec<CountryDensity>,
    pub fallback_density: f64,
    /// City/town names that mark an `urban_major` place
    pub major_city_names: Vec<String>,
}

impl Default for PlaceDensityRules {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PlaceDensityRules {
    pub fn with_defaults() -> Self {
        const MEGACITIES: &[(&str, f64)] = &[
            ("new york", 28000.0),
            ("manhattan", 74000.0),
            ("brooklyn", 15000.0),
            ("tokyo", 15000.0),
            ("mumbai", 32000.0),
            ("delhi", 29000.0),
            ("shanghai", 7700.0),
            ("london", 5700.0),
            ("paris", 8900.0),
            ("mexico city", 9600.0),
            ("são paulo", 8000.0),
            ("cairo", 15000.0),
            ("lagos", 18000.0),
            ("dhaka", 23000.0),
            ("beijing", 1300.0),
            ("los angeles", 3200.0),
            ("chicago", 4600.0),
            ("houston", 1400.0),
        ];
        const US: &[&str] = &["united states", "usa"];
        const DENSE_ASIA: &[&str] = &["india", "bangladesh", "china"];
        const NEW_WORLD: &[&str] = &["united states", "canada", "australia"];

        let buckets = vec![
            PlaceBucket::new(
                &["city", "town"],
                vec![
                    CountryDensity::new(US, 2500.0).with_states(&["new york", "california"]),
                    CountryDensity::new(US, 800.0),
                    CountryDensity::new(&["japan", "south korea", "singapore"], 8000.0),
                    CountryDensity::new(DENSE_ASIA, 12000.0),
                    CountryDensity::new(&["germany", "netherlands", "belgium"], 3500.0),
                ],
                1500.0,
            ),
            PlaceBucket::new(
                &["village", "hamlet"],
                vec![CountryDensity::new(DENSE_ASIA, 500.0)],
                50.0,
            ),
            PlaceBucket::new(
                &["suburb", "neighbourhood"],
                vec![CountryDensity::new(NEW_WORLD, 800.0)],
                1200.0,
            ),
            PlaceBucket::new(&["industrial", "commercial"], Vec::new(), 300.0),
            PlaceBucket::new(&["farmland", "forest", "natural", "water"], Vec::new(), 2.0),
        ];

        let country_defaults = vec![
            CountryDensity::new(&["monaco", "singapore", "hong kong"], 20000.0),
            CountryDensity::new(&["bangladesh", "south korea", "taiwan"], 1200.0),
            CountryDensity::new(&["india", "china", "japan", "philippines"], 400.0),
            CountryDensity::new(NEW_WORLD, 35.0),
        ];

        Self {
            megacities: MEGACITIES
                .iter()
                .map(|&(name, density)| MegacityDensity {
                    name: name.to_string(),
                    density,
                })
                .collect(),
            buckets,
            country_defaults,
            fallback_density: 150.0,
            major_city_names: ["new york", "tokyo", "london", "paris", "mumbai", "beijing"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn density_for(&self, place: &PlaceAttributes) -> f64 {
        let city = lowercase(place.city.as_deref());
        let state = lowercase(place.state.as_deref());
        let country = lowercase(place.country.as_deref());
        let place_type = place.place_type.to_lowercase();

        if let Some(mega) = self
            .megacities
            .iter()
            .find(|m| city.contains(m.name.as_str()))
        {
            return mega.density;
        }

        if let Some(bucket) = self
            .buckets
            .iter()
            .find(|b| b.place_types.iter().any(|t| *t == place_type))
        {
            return bucket
                .country_rules
                .iter()
                .find(|r| r.matches(&country, &state))
                .map(|r| r.density)
                .unwrap_or(bucket.default_density);
        }

        self.country_defaults
            .iter()
            .find(|r| r.matches(&country, &state))
            .map(|r| r.density)
            .unwrap_or(self.fallback_density)
    }

    pub fn region_for(&self, place: &PlaceAttributes) -> RegionType {
        let city = non_empty(place.city.as_deref());
        let town = non_empty(place.town.as_deref());

        if let Some(name) = city.or(town) {
            let name = name.to_lowercase();
            if self
                .major_city_names
                .iter()
                .any(|m| name.contains(m.as_str()))
            {
                RegionType::UrbanMajor
            } else if city.is_some() {
                RegionType::UrbanLarge
            } else {
                RegionType::UrbanMedium
            }
        } else if non_empty(place.village.as_deref()).is_some()
            || non_empty(place.hamlet.as_deref()).is_some()
        {
            RegionType::RuralPopulated
        } else if non_empty(place.suburb.as_deref()).is_some() {
            RegionType::Suburban
        } else {
            RegionType::RuralSparse
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn lowercase(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(place_type: &str, country: &str) -> PlaceAttributes {
        PlaceAttributes {
            place_type: place_type.to_string(),
            country: Some(country.to_string()),
            ..PlaceAttributes::default()
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = CityRegistry::with_defaults();
        assert_eq!(registry.len(), 16);
        assert_eq!(registry.get("tokyo").map(|c| c.population), Some(37_400_000));
    }

    #[test]
    fn test_nearest_city() {
        let registry = CityRegistry::with_defaults();
        let (city, distance) = registry.nearest(48.9, 2.4).unwrap();
        assert_eq!(city.name, "paris");
        assert!(distance < 10.0, "distance: {}", distance);
        assert!(CityRegistry::empty().nearest(0.0, 0.0).is_none());
    }

    #[test]
    fn test_density_table_ocean_pinned() {
        let mut table = DensityTable::with_defaults();
        table.set(RegionType::Ocean, 99.0);
        assert_eq!(table.density(RegionType::Ocean), 0.0);
        assert_eq!(table.density(RegionType::UrbanMajor), 10000.0);
        assert_eq!(table.density(RegionType::Unknown), DensityTable::FALLBACK_DENSITY);
    }

    #[test]
    fn test_density_json_keeps_unlisted_tiers() {
        let table: DensityTable = serde_json::from_str(r#"{"urban_major": 12000.0}"#).unwrap();
        assert_eq!(table.density(RegionType::UrbanMajor), 12000.0);
        assert_eq!(table.density(RegionType::Suburban), 500.0);
        assert_eq!(table.density(RegionType::RuralSparse), 25.0);
    }

    #[test]
    fn test_proximity_tiers() {
        let tiers = default_proximity_tiers();
        assert_eq!(proximity_region(&tiers, 10.0, 37_400_000), RegionType::UrbanMajor);
        // Big city but too far for the top tier
        assert_eq!(proximity_region(&tiers, 30.0, 37_400_000), RegionType::UrbanLarge);
        // Close but under 20M falls through to the next tier it satisfies
        assert_eq!(proximity_region(&tiers, 10.0, 12_000_000), RegionType::UrbanLarge);
        assert_eq!(proximity_region(&tiers, 150.0, 5_312_000), RegionType::Suburban);
        assert_eq!(proximity_region(&tiers, 450.0, 1), RegionType::RuralPopulated);
        assert_eq!(proximity_region(&tiers, 500.0, 37_400_000), RegionType::RuralSparse);
    }

    #[test]
    fn test_megacity_density_override() {
        let rules = PlaceDensityRules::with_defaults();
        let mut attrs = place("city", "United States");
        attrs.city = Some("Manhattan".to_string());
        assert_eq!(rules.density_for(&attrs), 74000.0);
    }

    #[test]
    fn test_us_state_rule() {
        let rules = PlaceDensityRules::with_defaults();
        let mut attrs = place("town", "United States");
        attrs.state = Some("California".to_string());
        assert_eq!(rules.density_for(&attrs), 2500.0);
        attrs.state = Some("Ohio".to_string());
        assert_eq!(rules.density_for(&attrs), 800.0);
    }

    #[test]
    fn test_bucket_and_country_defaults() {
        let rules = PlaceDensityRules::with_defaults();
        assert_eq!(rules.density_for(&place("village", "India")), 500.0);
        assert_eq!(rules.density_for(&place("hamlet", "France")), 50.0);
        assert_eq!(rules.density_for(&place("suburb", "Canada")), 800.0);
        assert_eq!(rules.density_for(&place("industrial", "Brazil")), 300.0);
        assert_eq!(rules.density_for(&place("water", "Japan")), 2.0);
        assert_eq!(rules.density_for(&place("administrative", "Monaco")), 20000.0);
        assert_eq!(rules.density_for(&place("administrative", "Australia")), 35.0);
        assert_eq!(rules.density_for(&place("administrative", "Peru")), 150.0);
    }

    #[test]
    fn test_region_from_address() {
        let rules = PlaceDensityRules::with_defaults();
        let mut attrs = PlaceAttributes::default();
        assert_eq!(rules.region_for(&attrs), RegionType::RuralSparse);

        attrs.suburb = Some("Shibuya".to_string());
        assert_eq!(rules.region_for(&attrs), RegionType::Suburban);

        attrs.village = Some("Hallstatt".to_string());
        assert_eq!(rules.region_for(&attrs), RegionType::RuralPopulated);

        attrs.town = Some("Bath".to_string());
        assert_eq!(rules.region_for(&attrs), RegionType::UrbanMedium);

        attrs.city = Some("Lyon".to_string());
        assert_eq!(rules.region_for(&attrs), RegionType::UrbanLarge);

        attrs.city = Some("Greater London".to_string());
        assert_eq!(rules.region_for(&attrs), RegionType::UrbanMajor);
    }

    #[test]
    fn test_rules_deserialize_partial() {
        let rules: PlaceDensityRules =
            serde_json::from_str(r#"{"fallback_density": 99.0}"#).unwrap();
        assert_eq!(rules.fallback_density, 99.0);
        assert_eq!(rules.megacities.len(), 18);
    }
}
