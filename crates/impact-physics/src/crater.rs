//! Crater scaling laws
//!
//! Two empirical laws are kept side by side and chosen per engine:
//!
//! | Law | Formula (diameter, m) | Inputs |
//! |-----|-----------------------|--------|
//! | `SchmidtHousen` | 1.8·(E/(ρt·g))^0.22·(ρp/ρt)^0.33 | energy, composition density |
//! | `VelocityScaled` | 1.8·(D·1000)·(v/12)^0.78 | diameter, velocity |
//!
//! The Schmidt-Housen projectile density is the composition's typical
//! density, not an explicit override on the asteroid.

use crate::AsteroidProperties;
use serde::{Deserialize, Serialize};

/// Depth-to-diameter ratio for simple craters
pub const DEPTH_RATIO: f64 = 0.100000000;

/// Reference velocity for the velocity-scaled law (km/s)
const REFERENCE_VELOCITY_KM_S: f64 = 12.000000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CraterLaw {
    /// Energy-based scaling against target density and gravity
    #[default]
    SchmidtHousen,
    /// Diameter times a velocity power law
    VelocityScaled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterDimensions {
    pub diameter_km: f64,
    pub depth_km: f64,
}

impl CraterDimensions {
    fn from_diameter_m(diameter_m: f64) -> Self {
        let diameter_km = if diameter_m.is_finite() {
            diameter_m.max(0.0) / 1000.0
        } else {
            0.0
        };
        Self {
            diameter_km,
            depth_km: diameter_km * DEPTH_RATIO,
        }
    }
}

impl CraterLaw {
    pub fn dimensions(
        &self,
        energy_joules: f64,
        asteroid: &AsteroidProperties,
        target_density: f64,
        gravity: f64,
    ) -> CraterDimensions {
        let diameter_m = match self {
            CraterLaw::SchmidtHousen => schmidt_housen_diameter_m(
                energy_joules,
                asteroid.composition.default_density(),
                target_density,
                gravity,
            ),
            CraterLaw::VelocityScaled => {
                velocity_scaled_diameter_m(asteroid.diameter_km, asteroid.velocity_km_s)
            }
        };
        CraterDimensions::from_diameter_m(diameter_m)
    }
}

/// Schmidt-Housen style crater diameter in meters
pub fn schmidt_housen_diameter_m(
    energy_joules: f64,
    projectile_density: f64,
    target_density: f64,
    gravity: f64,
) -> f64 {
    if !(energy_joules > 0.0) || !(target_density > 0.0) || !(gravity > 0.0) {
        return 0.0;
    }
    let scaled_energy = energy_joules / (target_density * gravity);
    let density_ratio = (projectile_density / target_density).max(0.0);
    1.8 * scaled_energy.powf(0.22) * density_ratio.powf(0.33)
}

/// Velocity-scaled crater diameter in meters
pub fn velocity_scaled_diameter_m(diameter_km: f64, velocity_km_s: f64) -> f64 {
    if !(diameter_km > 0.0) || !(velocity_km_s > 0.0) {
        return 0.0;
    }
    1.8 * (diameter_km * 1000.0) * (velocity_km_s / REFERENCE_VELOCITY_KM_S).powf(0.78)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Composition;

    #[test]
    fn test_schmidt_housen_reference_value() {
        // 1 km rocky at 30 km/s, 45°: E ≈ 2.945e20 J
        let d = schmidt_housen_diameter_m(2.945e20, 2500.0, 2500.0, 9.81);
        assert!(d > 5500.0 && d < 7000.0, "crater: {} m", d);
    }

    #[test]
    fn test_velocity_scaled_at_reference_velocity() {
        // v = 12 km/s gives exactly 1.8 × diameter
        let d = velocity_scaled_diameter_m(1.0, 12.0);
        assert!((d - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_laws_are_distinct() {
        let asteroid = AsteroidProperties::new(1.0, 30.0, 45.0, Composition::Rocky);
        let energy = 2.945e20;
        let sh = CraterLaw::SchmidtHousen.dimensions(energy, &asteroid, 2500.0, 9.81);
        let vs = CraterLaw::VelocityScaled.dimensions(energy, &asteroid, 2500.0, 9.81);
        assert!((sh.diameter_km - vs.diameter_km).abs() > 0.1);
        assert!((vs.depth_km - vs.diameter_km * DEPTH_RATIO).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_density_does_not_change_schmidt_housen_ratio() {
        let asteroid = AsteroidProperties::new(1.0, 20.0, 45.0, Composition::Icy);
        let heavy = asteroid.with_density(5000.0);
        let a = CraterLaw::SchmidtHousen.dimensions(1e20, &asteroid, 2500.0, 9.81);
        let b = CraterLaw::SchmidtHousen.dimensions(1e20, &heavy, 2500.0, 9.81);
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(schmidt_housen_diameter_m(0.0, 2500.0, 2500.0, 9.81), 0.0);
        assert_eq!(schmidt_housen_diameter_m(f64::NAN, 2500.0, 2500.0, 9.81), 0.0);
        assert_eq!(velocity_scaled_diameter_m(-1.0, 20.0), 0.0);
        assert_eq!(velocity_scaled_diameter_m(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_serde_names() {
        let law: CraterLaw = serde_json::from_str("\"velocity_scaled\"").unwrap();
        assert_eq!(law, CraterLaw::VelocityScaled);
    }
}
