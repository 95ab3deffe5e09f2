//! Open-Meteo forecast client
//!
//! HTTP client for the key-less Open-Meteo forecast API. One request returns
//! the instantaneous `current_weather`, daily aggregates and hourly values.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::WeatherError;
use crate::models::open_meteo::ForecastResponse;

/// Most days the forecast endpoint is asked for
pub const MAX_FORECAST_DAYS: u8 = 14;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,sunrise,sunset";
const HOURLY_FIELDS: &str = "apparent_temperature,temperature_2m,weathercode";

/// Open-Meteo client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-14, default: 14)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    MAX_FORECAST_DAYS
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Client for the Open-Meteo forecast endpoint
#[async_trait]
pub trait OpenMeteoApi: Send + Sync {
    /// Fetch current weather, daily aggregates and hourly values in one call
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub const fn config(&self) -> &OpenMeteoConfig {
        &self.config
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Query parameters for a forecast request
    fn forecast_params(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        let days = self.config.forecast_days.clamp(1, MAX_FORECAST_DAYS);
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("timezone", "UTC".to_string()),
            ("forecast_days", days.to_string()),
            ("wind_speed_unit", "ms".to_string()),
        ]
    }
}

#[async_trait]
impl OpenMeteoApi for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching Open-Meteo forecast");

        let response = self
            .client
            .get(&url)
            .query(&self.forecast_params(latitude, longitude))
            .send()
            .await
            .map_err(|e| WeatherError::from_send(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::from_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn config_defaults() {
        let config = OpenMeteoConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.forecast_days, 14);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: OpenMeteoConfig =
            serde_json::from_str(r#"{"forecast_days":7}"#).expect("should deserialize");
        assert_eq!(config.forecast_days, 7);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn validate_coordinates() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn forecast_params() {
        let client = OpenMeteoClient::new(OpenMeteoConfig::default()).expect("client creation should succeed");
        let params = client.forecast_params(35.68, 139.76);

        assert_eq!(param(&params, "latitude"), Some("35.68"));
        assert_eq!(param(&params, "longitude"), Some("139.76"));
        assert_eq!(param(&params, "current_weather"), Some("true"));
        assert_eq!(param(&params, "daily"), Some(DAILY_FIELDS));
        assert_eq!(param(&params, "hourly"), Some(HOURLY_FIELDS));
        assert_eq!(param(&params, "timezone"), Some("UTC"));
        assert_eq!(param(&params, "forecast_days"), Some("14"));
        assert_eq!(param(&params, "wind_speed_unit"), Some("ms"));
    }

    #[test]
    fn forecast_days_are_clamped() {
        let config = OpenMeteoConfig {
            forecast_days: 20,
            ..OpenMeteoConfig::default()
        };
        let client = OpenMeteoClient::new(config).expect("client creation should succeed");
        assert_eq!(param(&client.forecast_params(0.0, 0.0), "forecast_days"), Some("14"));

        let config = OpenMeteoConfig {
            forecast_days: 0,
            ..OpenMeteoConfig::default()
        };
        let client = OpenMeteoClient::new(config).expect("client creation should succeed");
        assert_eq!(param(&client.forecast_params(0.0, 0.0), "forecast_days"), Some("1"));
    }
}
