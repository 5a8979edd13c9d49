//! Async shell around the pure engine
//!
//! Owns the place lookup and its timeout. A failed or slow lookup is
//! logged and dropped; the engine then classifies from local data. Ocean
//! points never trigger a lookup.

use crate::config::EngineConfig;
use crate::orchestrator::{ImpactEngine, ImpactReport};
use crate::Result;
use geo_demographics::{LookupConfig, LookupError, PlaceAttributes, PlaceLookup, RegionClassification};
use impact_physics::AsteroidProperties;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(feature = "nominatim")]
use geo_demographics::NominatimClient;

/// Lookup chosen from configuration
pub enum ConfiguredLookup {
    Disabled,
    #[cfg(feature = "nominatim")]
    Nominatim(NominatimClient),
}

impl ConfiguredLookup {
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(ConfiguredLookup::Disabled);
        }
        #[cfg(feature = "nominatim")]
        {
            Ok(ConfiguredLookup::Nominatim(NominatimClient::new(config.clone())?))
        }
        #[cfg(not(feature = "nominatim"))]
        {
            warn!("Place lookup enabled but built without the nominatim feature");
            Ok(ConfiguredLookup::Disabled)
        }
    }
}

impl PlaceLookup for ConfiguredLookup {
    async fn reverse(&self, lat: f64, lon: f64) -> std::result::Result<PlaceAttributes, LookupError> {
        match self {
            ConfiguredLookup::Disabled => Err(LookupError::Unavailable),
            #[cfg(feature = "nominatim")]
            ConfiguredLookup::Nominatim(client) => client.reverse(lat, lon).await,
        }
    }
}

pub struct ImpactService<L: PlaceLookup> {
    engine: ImpactEngine,
    lookup: L,
    timeout: Duration,
}

impl ImpactService<ConfiguredLookup> {
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(
            ImpactEngine::from_config(config),
            ConfiguredLookup::from_config(&config.lookup)?,
            Duration::from_secs(config.lookup.timeout_sec),
        ))
    }
}

impl<L: PlaceLookup> ImpactService<L> {
    pub fn new(engine: ImpactEngine, lookup: L, timeout: Duration) -> Self {
        Self {
            engine,
            lookup,
            timeout,
        }
    }

    pub fn engine(&self) -> &ImpactEngine {
        &self.engine
    }

    /// Place attributes for a land point, or `None` on any failure
    pub async fn fetch_place(&self, lat: f64, lon: f64) -> Option<PlaceAttributes> {
        if !lat.is_finite() || !lon.is_finite() || self.engine.is_ocean(lat, lon) {
            return None;
        }

        match tokio::time::timeout(self.timeout, self.lookup.reverse(lat, lon)).await {
            Ok(Ok(place)) => {
                debug!("Place lookup for ({:.4}, {:.4}): {}", lat, lon, place.display_name);
                Some(place)
            }
            Ok(Err(LookupError::Unavailable)) => None,
            Ok(Err(e)) => {
                warn!("Place lookup failed for ({:.4}, {:.4}): {}", lat, lon, e);
                None
            }
            Err(_) => {
                warn!(
                    "Place lookup for ({:.4}, {:.4}) timed out after {:?}",
                    lat, lon, self.timeout
                );
                None
            }
        }
    }

    pub async fn classify_region(&self, lat: f64, lon: f64) -> RegionClassification {
        let place = self.fetch_place(lat, lon).await;
        self.engine.classify_with_place(lat, lon, place.as_ref())
    }

    pub async fn simulate_impact(&self, asteroid: &AsteroidProperties, lat: f64, lon: f64) -> ImpactReport {
        let place = self.fetch_place(lat, lon).await;
        self.engine.simulate_with_place(asteroid, lat, lon, place.as_ref())
    }
}
