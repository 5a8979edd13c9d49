//! Economic multiplier table
//!
//! USD per km² of affected area, keyed by region tier.
//!
//! | Region | USD/km² |
//! |--------|---------|
//! | urban_major | 1e10 |
//! | urban_large | 5e9 |
//! | urban_medium | 2.5e9 |
//! | urban_small | 1e9 |
//! | suburban | 5e8 |
//! | coastal | 4e8 |
//! | agricultural | 2e8 |
//! | rural_populated | 1.5e8 |
//! | rural_sparse, unknown | 1e8 |
//! | mountain | 7.5e7 |
//! | desert, arctic, ocean | 5e7 |

use geo_demographics::RegionType;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Deserialized entries are layered over the defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EconomicTable {
    usd_per_km2: BTreeMap<RegionType, f64>,
}

impl<'de> Deserialize<'de> for EconomicTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = BTreeMap::<RegionType, f64>::deserialize(deserializer)?;
        let mut table = Self::with_defaults();
        table.usd_per_km2.extend(overrides);
        Ok(table)
    }
}

impl Default for EconomicTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EconomicTable {
    /// Multiplier for a tier missing from the table
    pub const FALLBACK_USD_PER_KM2: f64 = 1e8;

    pub fn with_defaults() -> Self {
        let usd_per_km2 = [
            (RegionType::UrbanMajor, 1e10),
            (RegionType::UrbanLarge, 5e9),
            (RegionType::UrbanMedium, 2.5e9),
            (RegionType::UrbanSmall, 1e9),
            (RegionType::Suburban, 5e8),
            (RegionType::Coastal, 4e8),
            (RegionType::Agricultural, 2e8),
            (RegionType::RuralPopulated, 1.5e8),
            (RegionType::RuralSparse, 1e8),
            (RegionType::Unknown, 1e8),
            (RegionType::Mountain, 7.5e7),
            (RegionType::Desert, 5e7),
            (RegionType::Arctic, 5e7),
            (RegionType::Ocean, 5e7),
        ]
        .into_iter()
        .collect();
        Self { usd_per_km2 }
    }

    pub fn set(&mut self, region: RegionType, usd_per_km2: f64) {
        self.usd_per_km2.insert(region, usd_per_km2);
    }

    pub fn multiplier(&self, region: RegionType) -> f64 {
        self.usd_per_km2
            .get(&region)
            .copied()
            .unwrap_or(Self::FALLBACK_USD_PER_KM2)
    }

    /// `affected_area × multiplier`, never negative
    pub fn damage(&self, affected_area_km2: f64, region: RegionType) -> f64 {
        let damage = affected_area_km2 * self.multiplier(region);
        if damage.is_finite() {
            damage.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_ocean_to_major_urban() {
        let table = EconomicTable::with_defaults();
        assert_eq!(table.multiplier(RegionType::Ocean), 5e7);
        assert_eq!(table.multiplier(RegionType::UrbanMajor), 1e10);
        for region in RegionType::ALL {
            let m = table.multiplier(region);
            assert!((5e7..=1e10).contains(&m), "{}: {}", region, m);
        }
    }

    #[test]
    fn test_damage() {
        let table = EconomicTable::with_defaults();
        assert_eq!(table.damage(10.0, RegionType::Suburban), 5e9);
        assert_eq!(table.damage(-1.0, RegionType::Suburban), 0.0);
        assert_eq!(table.damage(f64::NAN, RegionType::Suburban), 0.0);
    }

    #[test]
    fn test_json_override() {
        let table: EconomicTable = serde_json::from_str(r#"{"ocean": 1.0e7}"#).unwrap();
        assert_eq!(table.multiplier(RegionType::Ocean), 1e7);
        assert_eq!(table.multiplier(RegionType::UrbanMajor), 1e10);
        assert_eq!(table.multiplier(RegionType::Suburban), 5e8);
    }
}
