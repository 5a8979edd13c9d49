//! OpenStreetMap Nominatim reverse lookup
//!
//! Free, no API key; requires an identifying User-Agent.
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = NominatimClient::new(LookupConfig::default())?;
//! let place = client.reverse(35.6762, 139.6503).await?;
//! ```

use crate::lookup::{LookupConfig, LookupError, PlaceAttributes, PlaceLookup};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Nominatim `/reverse` response
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    display_name: String,
    #[serde(default, rename = "type")]
    place_type: Option<String>,
    #[serde(default)]
    osm_type: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
    /// Present when Nominatim could not geocode the point
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl From<NominatimResponse> for PlaceAttributes {
    fn from(r: NominatimResponse) -> Self {
        PlaceAttributes {
            display_name: r.display_name,
            place_type: r.place_type.unwrap_or_else(|| "unknown".to_string()),
            osm_type: r.osm_type,
            city: r.address.city,
            town: r.address.town,
            village: r.address.village,
            hamlet: r.address.hamlet,
            suburb: r.address.suburb,
            state: r.address.state,
            country: r.address.country,
        }
    }
}

/// Nominatim reverse geocoding client
pub struct NominatimClient {
    config: LookupConfig,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.config.endpoint.trim_end_matches('/'))
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<PlaceAttributes, LookupError> {
        let zoom = self.config.zoom.to_string();
        let lat_s = format!("{:.6}", lat);
        let lon_s = format!("{:.6}", lon);

        let response = self
            .client
            .get(self.reverse_url())
            .query(&[
                ("format", "json"),
                ("lat", lat_s.as_str()),
                ("lon", lon_s.as_str()),
                ("zoom", zoom.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout(self.config.timeout_sec)
                } else {
                    LookupError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(LookupError::ApiError(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let data: NominatimResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ParseError(e.to_string()))?;

        if let Some(err) = data.error {
            return Err(LookupError::ApiError(err));
        }

        debug!("Nominatim: {} ({:?})", data.display_name, data.place_type);
        Ok(data.into())
    }
}

impl PlaceLookup for NominatimClient {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<PlaceAttributes, LookupError> {
        self.fetch(lat, lon).await
    }
}
