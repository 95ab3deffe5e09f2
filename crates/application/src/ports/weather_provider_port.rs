//! Weather provider port
//!
//! One capability interface for every upstream weather source. Adapters
//! translate their provider's native schema into the provider-neutral raw
//! payloads defined here; the normalizer never needs to know which provider
//! produced them.

use async_trait::async_trait;
use domain::{ConditionCode, Locale, Location};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// What a provider is asked about
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderTarget {
    /// A geocoded location (required by coordinate-based providers)
    Coordinates(Location),
    /// A free-text place name (for providers that geocode themselves)
    PlaceName(String),
}

impl ProviderTarget {
    /// Human-readable label for logs
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Coordinates(location) => location.to_string(),
            Self::PlaceName(name) => name.clone(),
        }
    }
}

/// Time information as delivered by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawTimestamp {
    /// Seconds since epoch
    Unix(i64),
    /// Date and time of day without offset, interpreted as UTC
    /// (e.g. `2024-01-15T12:00` or `2024-01-15 12:00:00`)
    DateTime(String),
    /// Calendar date only (e.g. `2024-01-15`)
    Date(String),
    /// Provider supplied no time at all
    #[default]
    Missing,
}

/// One provider observation or forecast period, all fields optional
///
/// Temperatures must already be Celsius and wind speed m/s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObservation {
    pub timestamp: RawTimestamp,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<u16>,
    pub visibility: Option<u32>,
    pub cloud_cover: Option<u8>,
    pub condition_code: Option<ConditionCode>,
}

/// Raw current conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCurrentPayload {
    pub observation: RawObservation,
    pub sunrise: RawTimestamp,
    pub sunset: RawTimestamp,
    /// Place as reported by the provider itself, if it reports one
    pub location: Option<Location>,
}

/// Raw forecast periods, in provider order and granularity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForecastPayload {
    pub entries: Vec<RawObservation>,
    /// Place as reported by the provider itself, if it reports one
    pub location: Option<Location>,
}

/// Port for weather data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Whether the provider needs a geocoded location instead of a place name
    fn requires_coordinates(&self) -> bool;

    /// Fetch current conditions
    async fn fetch_current(
        &self,
        target: &ProviderTarget,
        locale: Locale,
    ) -> Result<RawCurrentPayload, ApplicationError>;

    /// Fetch the multi-day forecast
    async fn fetch_forecast(
        &self,
        target: &ProviderTarget,
        locale: Locale,
    ) -> Result<RawForecastPayload, ApplicationError>;
}

/// Run `fetch_current` and `fetch_forecast` concurrently
///
/// Both futures are polled to completion; a failure or delay in one never
/// cancels the other, and each result is returned independently.
pub async fn fetch_both(
    provider: &dyn WeatherProviderPort,
    target: &ProviderTarget,
    locale: Locale,
) -> (
    Result<RawCurrentPayload, ApplicationError>,
    Result<RawForecastPayload, ApplicationError>,
) {
    tokio::join!(
        provider.fetch_current(target, locale),
        provider.fetch_forecast(target, locale)
    )
}
