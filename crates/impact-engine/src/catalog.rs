//! NEO reference catalog
//!
//! Built-in records for well-known near-Earth objects plus two scenario
//! asteroids. A live feed client would produce the same `NeoRecord` shape.
//!
//! # Risk Level
//!
//! | Factor | +3 | +2 | +1 |
//! |--------|----|----|----|
//! | Mean diameter (km) | > 1 | > 0.5 | > 0.1 |
//! | Velocity (km/s) | > 20 | > 15 | > 10 |
//! | Miss distance (AU) | < 0.05 | < 0.1 | < 0.2 |
//! | Potentially hazardous | | +2 | |
//!
//! Score ≥ 7 is HIGH, ≥ 4 MEDIUM, otherwise LOW.

use crate::{EngineError, Result};
use chrono::NaiveDate;
use impact_physics::{AsteroidProperties, Composition};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kilometers per astronomical unit
pub const KM_PER_AU: f64 = 149_597_870.700000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    pub velocity_km_s: f64,
    pub miss_distance_km: f64,
    pub is_hazardous: bool,
    #[serde(default)]
    pub close_approach_date: Option<NaiveDate>,
    #[serde(default)]
    pub absolute_magnitude: Option<f64>,
    #[serde(default)]
    pub impact_probability: Option<f64>,
    /// Externally assigned risk; overrides the computed score
    #[serde(default)]
    pub assessed_risk: Option<RiskLevel>,
}

impl NeoRecord {
    pub fn mean_diameter_km(&self) -> f64 {
        (self.diameter_min_km + self.diameter_max_km) / 2.0
    }

    pub fn miss_distance_au(&self) -> f64 {
        self.miss_distance_km / KM_PER_AU
    }

    pub fn risk_score(&self) -> u8 {
        let diameter = self.mean_diameter_km();
        let size = if diameter > 1.0 {
            3
        } else if diameter > 0.5 {
            2
        } else if diameter > 0.1 {
            1
        } else {
            0
        };

        let velocity = if self.velocity_km_s > 20.0 {
            3
        } else if self.velocity_km_s > 15.0 {
            2
        } else if self.velocity_km_s > 10.0 {
            1
        } else {
            0
        };

        let au = self.miss_distance_au();
        let proximity = if au < 0.05 {
            3
        } else if au < 0.1 {
            2
        } else if au < 0.2 {
            1
        } else {
            0
        };

        let hazard = if self.is_hazardous { 2 } else { 0 };
        size + velocity + proximity + hazard
    }

    pub fn computed_risk(&self) -> RiskLevel {
        match self.risk_score() {
            s if s >= 7 => RiskLevel::High,
            s if s >= 4 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.assessed_risk.unwrap_or_else(|| self.computed_risk())
    }

    /// Rocky impactor with the mean diameter and catalog velocity
    pub fn to_asteroid(&self, angle_deg: f64) -> AsteroidProperties {
        AsteroidProperties::new(
            self.mean_diameter_km(),
            self.velocity_km_s,
            angle_deg,
            Composition::Rocky,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeoCatalog {
    records: Vec<NeoRecord>,
}

impl Default for NeoCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl NeoCatalog {
    pub fn new(records: Vec<NeoRecord>) -> Self {
        Self { records }
    }

    pub fn with_defaults() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        let historical = |id: &str, name: &str, dmin, dmax, v, miss, when, h| NeoRecord {
            id: id.to_string(),
            name: name.to_string(),
            diameter_min_km: dmin,
            diameter_max_km: dmax,
            velocity_km_s: v,
            miss_distance_km: miss,
            is_hazardous: true,
            close_approach_date: when,
            absolute_magnitude: Some(h),
            impact_probability: None,
            assessed_risk: None,
        };
        let scenario = |id: &str, name: &str, d, v, miss, risk, p| NeoRecord {
            id: id.to_string(),
            name: name.to_string(),
            diameter_min_km: d,
            diameter_max_km: d,
            velocity_km_s: v,
            miss_distance_km: miss,
            is_hazardous: false,
            close_approach_date: None,
            absolute_magnitude: None,
            impact_probability: Some(p),
            assessed_risk: Some(risk),
        };

        Self {
            records: vec![
                scenario("2025-IMPACT", "Impactador-2025", 1.2, 18.5, 7.5e6, RiskLevel::High, 0.15),
                scenario("2023-BU", "Apophis-like", 0.34, 12.8, 1.5e7, RiskLevel::Medium, 0.003),
                historical("99942", "99942 Apophis", 0.325, 0.375, 7.42, 31000.0, date(2029, 4, 13), 19.7),
                historical("101955", "101955 Bennu", 0.492, 0.565, 11.16, 480000.0, date(2182, 9, 25), 20.9),
                historical("1036", "1036 Ganymed", 31.7, 35.1, 13.63, 56e6, date(2024, 10, 13), 9.45),
                historical("4179", "4179 Toutatis", 2.5, 5.4, 11.02, 18e6, date(2004, 9, 29), 15.3),
                historical("2022_AP7", "2022 AP7", 1.1, 2.3, 8.15, 4.2e6, date(2022, 1, 7), 15.6),
            ],
        }
    }

    pub fn records(&self) -> &[NeoRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Result<&NeoRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::UnknownAsteroid(id.to_string()))
    }

    /// HIGH/MEDIUM or hazardous records, riskiest and closest first
    pub fn threats(&self) -> Vec<&NeoRecord> {
        let mut threats: Vec<&NeoRecord> = self
            .records
            .iter()
            .filter(|r| r.risk_level() >= RiskLevel::Medium || r.is_hazardous)
            .collect();
        threats.sort_by(|a, b| {
            b.risk_level().cmp(&a.risk_level()).then_with(|| {
                a.miss_distance_km
                    .partial_cmp(&b.miss_distance_km)
                    .unwrap_or(Ordering::Equal)
            })
        });
        threats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let catalog = NeoCatalog::with_defaults();
        assert_eq!(catalog.records().len(), 7);
        let apophis = catalog.get("99942").unwrap();
        assert_eq!(apophis.close_approach_date, NaiveDate::from_ymd_opt(2029, 4, 13));
        assert!((apophis.mean_diameter_km() - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_id() {
        let err = NeoCatalog::with_defaults().get("nope").unwrap_err();
        assert!(matches!(err, EngineError::UnknownAsteroid(ref id) if id == "nope"));
    }

    #[test]
    fn test_computed_risk_levels() {
        let catalog = NeoCatalog::with_defaults();
        let risk = |id: &str| catalog.get(id).unwrap().computed_risk();
        // Apophis: 1 (size) + 0 (velocity) + 3 (distance) + 2 (hazard) = 6
        assert_eq!(risk("99942"), RiskLevel::Medium);
        assert_eq!(risk("101955"), RiskLevel::High);
        assert_eq!(risk("1036"), RiskLevel::Medium);
        assert_eq!(risk("4179"), RiskLevel::High);
        assert_eq!(risk("2022_AP7"), RiskLevel::High);
        assert_eq!(risk("2025-IMPACT"), RiskLevel::High);
    }

    #[test]
    fn test_assessed_risk_overrides() {
        let catalog = NeoCatalog::with_defaults();
        let bu = catalog.get("2023-BU").unwrap();
        assert_eq!(bu.computed_risk(), RiskLevel::Low);
        assert_eq!(bu.risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn test_threat_ordering() {
        let catalog = NeoCatalog::with_defaults();
        let threats = catalog.threats();
        assert_eq!(threats.len(), 7);
        assert_eq!(threats[0].id, "101955");
        assert!(threats
            .windows(2)
            .all(|w| w[0].risk_level() >= w[1].risk_level()));
    }

    #[test]
    fn test_to_asteroid() {
        let toutatis = NeoCatalog::with_defaults().get("4179").unwrap().to_asteroid(45.0);
        assert!((toutatis.diameter_km - 3.95).abs() < 1e-9);
        assert_eq!(toutatis.composition, Composition::Rocky);
        assert_eq!(toutatis.velocity_km_s, 11.02);
    }

    #[test]
    fn test_risk_level_serde() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }
}
