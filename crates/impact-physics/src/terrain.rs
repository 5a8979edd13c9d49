//! Terrain baseline tables
//!
//! Flat per-terrain constants for the physics-only path, where no region
//! classification is available.
//!
//! | Terrain | Density (/km²) | Mortality | Value (USD/km²) |
//! |---------|----------------|-----------|-----------------|
//! | ocean   | 0              | 0.1       | 1e6             |
//! | land    | 50             | 0.2       | 1e8             |
//! | urban   | 1000           | 0.3       | 1e10            |
//! | desert  | 1              | 0.2       | 1e5             |
//! | forest  | 10             | 0.2       | 1e7             |

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Ocean,
    #[default]
    Land,
    Urban,
    Desert,
    Forest,
}

impl TerrainType {
    pub fn population_density(&self) -> f64 {
        match self {
            TerrainType::Ocean => 0.0,
            TerrainType::Land => 50.0,
            TerrainType::Urban => 1000.0,
            TerrainType::Desert => 1.0,
            TerrainType::Forest => 10.0,
        }
    }

    pub fn mortality_rate(&self) -> f64 {
        match self {
            TerrainType::Ocean => 0.1,
            TerrainType::Urban => 0.3,
            _ => 0.2,
        }
    }

    pub fn economic_value_per_km2(&self) -> f64 {
        match self {
            TerrainType::Ocean => 1e6,
            TerrainType::Land => 1e8,
            TerrainType::Urban => 1e10,
            TerrainType::Desert => 1e5,
            TerrainType::Forest => 1e7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainBaseline {
    pub terrain: TerrainType,
    pub casualties_estimate: u64,
    pub economic_damage_usd: f64,
}

impl TerrainBaseline {
    pub fn estimate(affected_area_km2: f64, terrain: TerrainType) -> Self {
        let area = if affected_area_km2.is_finite() {
            affected_area_km2.max(0.0)
        } else {
            0.0
        };
        let exposed = area * terrain.population_density();
        Self {
            terrain,
            casualties_estimate: (exposed * terrain.mortality_rate()) as u64,
            economic_damage_usd: area * terrain.economic_value_per_km2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urban_baseline() {
        let b = TerrainBaseline::estimate(100.0, TerrainType::Urban);
        assert_eq!(b.casualties_estimate, 30_000);
        assert_eq!(b.economic_damage_usd, 1e12);
    }

    #[test]
    fn test_ocean_has_no_casualties() {
        let b = TerrainBaseline::estimate(1e6, TerrainType::Ocean);
        assert_eq!(b.casualties_estimate, 0);
    }

    #[test]
    fn test_negative_area_clamped() {
        let b = TerrainBaseline::estimate(-5.0, TerrainType::Land);
        assert_eq!(b.casualties_estimate, 0);
        assert_eq!(b.economic_damage_usd, 0.0);
    }
}
