//! OpenWeatherMap client
//!
//! Key-based provider with its own place-name lookup. Requests ask for
//! metric units so temperatures arrive in Celsius and wind speed in m/s.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::WeatherError;
use crate::models::open_weather::{CurrentResponse, ForecastResponse};

/// How a request identifies the place
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    /// Free-text city name (`q=`)
    Name(String),
    /// Coordinates (`lat=`/`lon=`)
    Coordinates { latitude: f64, longitude: f64 },
}

impl PlaceQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Name(name) => vec![("q", name.clone())],
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }
}

/// OpenWeatherMap client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent as `appid`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Client for the OpenWeatherMap current and forecast endpoints
#[async_trait]
pub trait OpenWeatherApi: Send + Sync {
    /// Current conditions (`/weather`)
    async fn current(
        &self,
        place: &PlaceQuery,
        language: &str,
    ) -> Result<CurrentResponse, WeatherError>;

    /// 5 day / 3 hour forecast (`/forecast`)
    async fn forecast(
        &self,
        place: &PlaceQuery,
        language: &str,
    ) -> Result<ForecastResponse, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client
    ///
    /// A missing API key is not an error here; every request fails with
    /// [`WeatherError::MissingApiKey`] before touching the network instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        if !config.has_api_key() {
            warn!("OpenWeatherMap client created without an API key");
        }

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    fn query_params(
        place: &PlaceQuery,
        language: &str,
        api_key: &str,
    ) -> Vec<(&'static str, String)> {
        let mut params = place.params();
        params.push(("units", "metric".to_string()));
        params.push(("lang", language.to_string()));
        params.push(("appid", api_key.to_string()));
        params
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        place: &PlaceQuery,
        language: &str,
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{endpoint}", self.config.base_url);
        debug!(url = %url, ?place, "Fetching OpenWeatherMap data");

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(place, language, api_key))
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

impl OpenWeatherConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[async_trait]
impl OpenWeatherApi for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(
        &self,
        place: &PlaceQuery,
        language: &str,
    ) -> Result<CurrentResponse, WeatherError> {
        self.get("weather", place, language).await
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        place: &PlaceQuery,
        language: &str,
    ) -> Result<ForecastResponse, WeatherError> {
        self.get("forecast", place, language).await
    }
}
