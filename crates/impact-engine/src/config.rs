//! Engine configuration
//!
//! JSON file; every field is optional and falls back to the built-in
//! tables.
//!
//! ```json
//! {
//!   "crater_law": "velocity_scaled",
//!   "ocean_mask": "basin",
//!   "lookup": { "enabled": false, "timeout_sec": 3 }
//! }
//! ```

use crate::economics::EconomicTable;
use crate::Result;
use geo_demographics::{
    CityRegistry, DensityTable, LookupConfig, OceanMask, PlaceDensityRules, RegionClassifier,
};
use impact_physics::CraterLaw;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub crater_law: CraterLaw,
    pub ocean_mask: OceanMask,
    pub lookup: LookupConfig,
    pub cities: CityRegistry,
    pub densities: DensityTable,
    pub place_rules: PlaceDensityRules,
    pub economics: EconomicTable,
}

impl EngineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded config from {:?} ({} cities, {:?}, {:?})",
            path,
            config.cities.len(),
            config.crater_law,
            config.ocean_mask
        );
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn classifier(&self) -> RegionClassifier {
        RegionClassifier::new(
            self.ocean_mask,
            self.cities.clone(),
            self.densities.clone(),
            self.place_rules.clone(),
        )
    }
}
