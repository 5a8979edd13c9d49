//! Atmospheric side effects of large impacts.
//!
//! Every field stays zero at or below 100 MT. Above it each field is a
//! capped linear function of the yield.

use serde::{Deserialize, Serialize};

/// Yield above which atmospheric effects are modeled (MT)
pub const ATMOSPHERIC_THRESHOLD_MT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AtmosphericEffects {
    pub dust_cloud_height_km: f64,
    pub dust_duration_days: f64,
    pub global_cooling_celsius: f64,
    pub ozone_depletion_percent: f64,
}

impl AtmosphericEffects {
    pub fn from_energy(energy_mt: f64) -> Self {
        if !(energy_mt > ATMOSPHERIC_THRESHOLD_MT) {
            return Self::default();
        }
        Self {
            dust_cloud_height_km: (energy_mt / 1000.0 * 10.0).min(50.0),
            dust_duration_days: (energy_mt / 100.0).min(365.0),
            global_cooling_celsius: (energy_mt / 10000.0).min(5.0),
            ozone_depletion_percent: (energy_mt / 1000.0).min(10.0),
        }
    }
}
