//! Reverse place lookup collaborator.
//!
//! The classifier never calls a lookup itself. An async shell awaits
//! [`PlaceLookup::reverse`] under a timeout and hands the attributes in.

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Lookup timed out after {0}s")]
    Timeout(u64),
    #[error("Lookup unavailable")]
    Unavailable,
}

/// Reverse lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Query the external service at all
    pub enabled: bool,
    /// Base URL of a Nominatim-compatible service
    pub endpoint: String,
    pub user_agent: String,
    /// Request timeout in seconds (default: 5)
    pub timeout_sec: u64,
    /// Nominatim zoom level (10 = city)
    pub zoom: u8,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "MeteorMadness-ImpactSim/0.1".to_string(),
            timeout_sec: 5,
            zoom: 10,
        }
    }
}

/// Place metadata returned by a reverse lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceAttributes {
    pub display_name: String,
    /// e.g. city, town, village, suburb, farmland
    pub place_type: String,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl PlaceAttributes {
    /// City, else town, else village, else "Unknown"
    pub fn locality(&self) -> &str {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }
}

/// Reverse geocoding source
pub trait PlaceLookup: Send + Sync {
    fn reverse(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<PlaceAttributes, LookupError>> + Send;
}

/// Lookup that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl PlaceLookup for NoLookup {
    async fn reverse(&self, _lat: f64, _lon: f64) -> Result<PlaceAttributes, LookupError> {
        Err(LookupError::Unavailable)
    }
}

/// Lookup returning the same attributes for every coordinate
#[derive(Debug, Clone)]
pub struct FixedLookup {
    attributes: PlaceAttributes,
}

impl FixedLookup {
    pub fn new(attributes: PlaceAttributes) -> Self {
        Self { attributes }
    }
}

impl PlaceLookup for FixedLookup {
    async fn reverse(&self, _lat: f64, _lon: f64) -> Result<PlaceAttributes, LookupError> {
        Ok(self.attributes.clone())
    }
}
