//! Asteroid Impact Physics
//!
//! Empirical scaling laws that turn an asteroid's physical properties into
//! impact energy, crater geometry, seismic magnitude and atmospheric effects.
//!
//! # Energy Chain
//!
//! ```text
//! m = ρ · (4/3)·π·r³
//! E = ½ · m · (v · sin θ)²
//! E_MT = E / (4.184e9 · 1e6)
//! ```
//!
//! | Quantity | Formula | Unit |
//! |----------|---------|------|
//! | Crater (Schmidt-Housen) | 1.8·(E/(ρt·g))^0.22·(ρp/ρt)^0.33 | m |
//! | Crater (velocity scaled) | 1.8·D·(v/12)^0.78 | m |
//! | Depth | 0.1·D_crater | km |
//! | Seismic | (2/3)·log10(E) − 6.0, floored at 0 | Richter |
//! | Affected area | π·(D_crater·(1 + log10(max(1, E_MT)))/2)² | km² |
//!
//! These are approximations for exploration, not peer-reviewed impact models.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

pub mod atmosphere;
pub mod crater;
pub mod severity;
pub mod terrain;

pub use atmosphere::AtmosphericEffects;
pub use crater::{CraterDimensions, CraterLaw};
pub use severity::DestructionLevel;
pub use terrain::{TerrainBaseline, TerrainType};

/// Standard gravity at Earth's surface (m/s²)
pub const EARTH_GRAVITY: f64 = 9.81;

/// Joules per ton of TNT
pub const TNT_JOULES_PER_TON: f64 = 4.184e9;

/// Joules per megaton of TNT
pub const JOULES_PER_MEGATON: f64 = TNT_JOULES_PER_TON * 1e6;

/// Mean crustal density used as the crater target (kg/m³)
pub const TARGET_DENSITY: f64 = 2500.0;

#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("Unknown composition: {0}")]
    UnknownComposition(String),
    #[error("Invalid asteroid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Bulk composition of the impactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    #[default]
    Rocky,
    Metallic,
    Icy,
}

impl Composition {
    /// Typical bulk density (kg/m³)
    pub fn default_density(&self) -> f64 {
        match self {
            Composition::Rocky => 2500.0,
            Composition::Metallic => 7800.0,
            Composition::Icy => 900.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Composition::Rocky => "rocky",
            Composition::Metallic => "metallic",
            Composition::Icy => "icy",
        }
    }
}

impl std::str::FromStr for Composition {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rocky" | "stony" => Ok(Composition::Rocky),
            "metallic" | "iron" => Ok(Composition::Metallic),
            "icy" | "cometary" => Ok(Composition::Icy),
            other => Err(PhysicsError::UnknownComposition(other.to_string())),
        }
    }
}

/// Physical properties of an impactor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidProperties {
    /// Diameter in km
    pub diameter_km: f64,
    /// Bulk density in kg/m³; composition default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    /// Impact velocity in km/s
    pub velocity_km_s: f64,
    /// Impact angle from horizontal in degrees (0-90)
    pub angle_deg: f64,
    #[serde(default)]
    pub composition: Composition,
}

impl AsteroidProperties {
    pub fn new(diameter_km: f64, velocity_km_s: f64, angle_deg: f64, composition: Composition) -> Self {
        Self {
            diameter_km,
            density_kg_m3: None,
            velocity_km_s,
            angle_deg,
            composition,
        }
    }

    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = Some(density_kg_m3);
        self
    }

    /// Effective bulk density (explicit value, else composition default)
    pub fn bulk_density(&self) -> f64 {
        match self.density_kg_m3 {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => self.composition.default_density(),
        }
    }

    /// Reject parameters outside their physical ranges
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("diameter_km", self.diameter_km, self.diameter_km > 0.0),
            ("velocity_km_s", self.velocity_km_s, self.velocity_km_s > 0.0),
            (
                "angle_deg",
                self.angle_deg,
                (0.0..=90.0).contains(&self.angle_deg),
            ),
        ];
        for (name, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(PhysicsError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Impact point on the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub terrain: TerrainType,
    /// Meters above sea level (stored, not used by any formula)
    #[serde(default)]
    pub elevation_m: f64,
}

impl ImpactLocation {
    pub fn new(latitude: f64, longitude: f64, terrain: TerrainType) -> Self {
        Self {
            latitude,
            longitude,
            terrain,
            elevation_m: 0.0,
        }
    }
}

/// Physics-only result of an impact simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsOutcome {
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    pub crater_depth_km: f64,
    pub seismic_magnitude: f64,
    pub affected_area_km2: f64,
    pub atmospheric_effects: AtmosphericEffects,
    pub tsunami_risk: bool,
    pub crater_law: CraterLaw,
}

/// Empirical impact physics with a selectable crater law
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactPhysics {
    pub gravity: f64,
    pub target_density: f64,
    pub crater_law: CraterLaw,
}

impl Default for ImpactPhysics {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            target_density: TARGET_DENSITY,
            crater_law: CraterLaw::default(),
        }
    }
}

impl ImpactPhysics {
    pub fn new(crater_law: CraterLaw) -> Self {
        Self {
            crater_law,
            ..Self::default()
        }
    }

    /// Mass of a spherical impactor (kg)
    pub fn mass(&self, asteroid: &AsteroidProperties) -> f64 {
        let radius_m = non_negative(asteroid.diameter_km) * 1000.0 / 2.0;
        let volume_m3 = (4.0 / 3.0) * PI * radius_m.powi(3);
        volume_m3 * asteroid.bulk_density()
    }

    /// Kinetic energy (J) using only the velocity component along sin(angle)
    pub fn kinetic_energy(&self, asteroid: &AsteroidProperties) -> f64 {
        let velocity_ms = non_negative(asteroid.velocity_km_s) * 1000.0;
        let angle_factor = non_finite_to_zero(asteroid.angle_deg.to_radians().sin());
        let effective_velocity = velocity_ms * angle_factor;
        0.5 * self.mass(asteroid) * effective_velocity.powi(2)
    }

    /// Crater diameter and depth under the configured law
    pub fn crater_dimensions(&self, energy_joules: f64, asteroid: &AsteroidProperties) -> CraterDimensions {
        self.crater_law
            .dimensions(energy_joules, asteroid, self.target_density, self.gravity)
    }

    /// Richter-like magnitude: (2/3)·log10(E) − 6.0, never negative
    pub fn seismic_magnitude(&self, energy_joules: f64) -> f64 {
        if energy_joules > 0.0 && energy_joules.is_finite() {
            ((2.0 / 3.0) * energy_joules.log10() - 6.0).max(0.0)
        } else {
            0.0
        }
    }

    /// Area inside the extended destruction radius (km²)
    pub fn affected_area(&self, crater_diameter_km: f64, energy_mt: f64) -> f64 {
        let destruction_radius = crater_diameter_km * (1.0 + energy_mt.max(1.0).log10());
        PI * (destruction_radius / 2.0).powi(2)
    }

    /// Only ocean impacts with a crater wider than 1 km raise a tsunami
    pub fn tsunami_risk(&self, terrain: TerrainType, crater_diameter_km: f64) -> bool {
        terrain == TerrainType::Ocean && crater_diameter_km > 1.0
    }

    pub fn simulate(&self, asteroid: &AsteroidProperties, location: &ImpactLocation) -> PhysicsOutcome {
        let mass_kg = self.mass(asteroid);
        let energy_joules = self.kinetic_energy(asteroid);
        let energy_megatons = energy_joules / JOULES_PER_MEGATON;

        let crater = self.crater_dimensions(energy_joules, asteroid);
        let seismic_magnitude = self.seismic_magnitude(energy_joules);
        let affected_area_km2 = self.affected_area(crater.diameter_km, energy_megatons);
        let tsunami_risk = self.tsunami_risk(location.terrain, crater.diameter_km);
        let atmospheric_effects = AtmosphericEffects::from_energy(energy_megatons);

        debug!(
            "Physics: m={:.3e} kg, E={:.3e} J ({:.2} MT), crater={:.3} km ({:?}), M={:.2}",
            mass_kg, energy_joules, energy_megatons, crater.diameter_km, self.crater_law, seismic_magnitude
        );

        PhysicsOutcome {
            mass_kg,
            energy_joules,
            energy_megatons,
            crater_diameter_km: crater.diameter_km,
            crater_depth_km: crater.depth_km,
            seismic_magnitude,
            affected_area_km2,
            atmospheric_effects,
            tsunami_risk,
            crater_law: self.crater_law,
        }
    }
}

/// Physics plus the terrain-table baseline for a quick estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickImpact {
    pub physics: PhysicsOutcome,
    pub baseline: TerrainBaseline,
}

/// Simulate a typical rocky impactor (2500 kg/m³, 45°) on a given terrain
pub fn quick_simulation(
    diameter_km: f64,
    velocity_km_s: f64,
    latitude: f64,
    longitude: f64,
    terrain: TerrainType,
) -> QuickImpact {
    let asteroid = AsteroidProperties::new(diameter_km, velocity_km_s, 45.0, Composition::Rocky)
        .with_density(2500.0);
    let location = ImpactLocation::new(latitude, longitude, terrain);

    let physics = ImpactPhysics::default().simulate(&asteroid, &location);
    let baseline = TerrainBaseline::estimate(physics.affected_area_km2, terrain);

    QuickImpact { physics, baseline }
}

fn non_negative(value: f64) -> f64 {
    non_finite_to_zero(value).max(0.0)
}

fn non_finite_to_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
