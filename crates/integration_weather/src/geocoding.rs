//! Open-Meteo geocoding client
//!
//! Resolves free-text place names to coordinates using the
//! [Open-Meteo geocoding API](https://open-meteo.com/en/docs/geocoding-api).
//! Only the best match is requested and returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GeocodingError;
use crate::models::geocoding::{Place, SearchResponse};

/// Configuration for the geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
        }
    }
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Best match for `name`, with names localized to `language`
    async fn search(&self, name: &str, language: &str) -> Result<Place, GeocodingError>;
}

/// Open-Meteo geocoding client
#[derive(Debug)]
pub struct OpenMeteoGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, language: &str) -> Result<Place, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::PlaceNotFound(
                "Place name must not be empty".to_string(),
            ));
        }

        let url = format!("{}/search", self.config.base_url);
        let params = [
            ("name", name),
            ("count", "1"),
            ("language", language),
            ("format", "json"),
        ];

        debug!(%name, "Geocoding place");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let place = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| GeocodingError::PlaceNotFound(name.to_string()))?;

        debug!(%name, lat = %place.latitude, lon = %place.longitude, "Geocoded place");
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeocodingConfig::default();
        assert_eq!(config.base_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[tokio::test]
    async fn empty_name_fails_without_request() {
        let config = GeocodingConfig {
            // Unroutable: any request would fail with a connection error
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeocodingConfig::default()
        };
        let client = OpenMeteoGeocodingClient::new(&config).expect("client");
        let result = client.search("   ", "en").await;
        assert!(matches!(result, Err(GeocodingError::PlaceNotFound(_))));
    }

    #[test]
    fn error_display() {
        let err = GeocodingError::PlaceNotFound("Atlantis".to_string());
        assert_eq!(err.to_string(), "Place not found: Atlantis");
        assert!(GeocodingError::Timeout.to_string().contains("timed out"));
    }
}
