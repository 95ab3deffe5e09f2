//! Weather fetch orchestration
//!
//! Resolves the location once, fetches current conditions and the forecast
//! concurrently, and normalizes both into a [`WeatherReport`]. Either fetch
//! failing fails the whole request; callers never see partial data.

use std::fmt;
use std::sync::Arc;

use domain::{IconKey, Locale, Location, MAX_FORECAST_DAYS, WeatherReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::condition_translator::{DEFAULT_ICON_BASE_URL, resolve_icon_url_with_base};
use super::normalizer::{Clock, Normalizer, SystemClock};
use crate::error::{ApplicationError, WeatherFetchError};
use crate::ports::{GeocodingPort, ProviderTarget, WeatherProviderPort, fetch_both};
use crate::request_context::{RequestTicket, Tracked};

/// Configuration for the weather service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherServiceConfig {
    /// Locale used when the caller does not pick one
    #[serde(default)]
    pub default_locale: Locale,

    /// Number of forecast days kept (capped at 14)
    #[serde(default = "default_max_forecast_days")]
    pub max_forecast_days: usize,

    /// Base URL for condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
}

const fn default_max_forecast_days() -> usize {
    MAX_FORECAST_DAYS
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            max_forecast_days: default_max_forecast_days(),
            icon_base_url: default_icon_base_url(),
        }
    }
}

/// Orchestrates geocoding, provider fetches and normalization
pub struct WeatherService {
    provider: Arc<dyn WeatherProviderPort>,
    geocoder: Arc<dyn GeocodingPort>,
    normalizer: Normalizer,
    config: WeatherServiceConfig,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service over the selected provider and geocoder
    pub fn new(
        provider: Arc<dyn WeatherProviderPort>,
        geocoder: Arc<dyn GeocodingPort>,
        config: WeatherServiceConfig,
    ) -> Self {
        let normalizer =
            Normalizer::new(Arc::new(SystemClock)).with_max_forecast_days(config.max_forecast_days);
        Self {
            provider,
            geocoder,
            normalizer,
            config,
        }
    }

    /// Replace the clock used for missing provider timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.normalizer =
            Normalizer::new(clock).with_max_forecast_days(self.config.max_forecast_days);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &WeatherServiceConfig {
        &self.config
    }

    /// Name of the selected provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Icon URL under the configured base
    #[must_use]
    pub fn icon_url(&self, icon: IconKey) -> String {
        resolve_icon_url_with_base(&self.config.icon_base_url, icon)
    }

    /// Current conditions and daily forecast for a city
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn get_weather_and_forecast(
        &self,
        city: &str,
        locale: Locale,
    ) -> Result<WeatherReport, WeatherFetchError> {
        self.fetch_city(city, locale)
            .await
            .map_err(|e| Self::fail(e, locale))
    }

    /// Current conditions and daily forecast for raw coordinates, no geocoding
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn get_weather_and_forecast_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
        locale: Locale,
    ) -> Result<WeatherReport, WeatherFetchError> {
        let location = Location::from_coordinates(latitude, longitude)
            .map_err(|e| Self::fail(ApplicationError::from(e), locale))?;

        self.fetch_target(ProviderTarget::Coordinates(location.clone()), None, location, locale)
            .await
            .map_err(|e| Self::fail(e, locale))
    }

    /// Run the request described by `ticket`, tagging the result with it
    ///
    /// Consumers hold a [`crate::RequestSequencer`] and drop results whose
    /// ticket has been superseded.
    #[instrument(skip(self, ticket), fields(request_id = %ticket.request_id(), sequence = ticket.sequence()))]
    pub async fn fetch_for(
        &self,
        ticket: RequestTicket,
    ) -> Tracked<Result<WeatherReport, WeatherFetchError>> {
        let value = self
            .get_weather_and_forecast(ticket.city(), ticket.locale())
            .await;
        Tracked { ticket, value }
    }

    async fn fetch_city(
        &self,
        city: &str,
        locale: Locale,
    ) -> Result<WeatherReport, ApplicationError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ApplicationError::NotFound("empty city name".to_string()));
        }

        if self.provider.requires_coordinates() {
            let location = self.geocoder.resolve(city, locale).await?;
            debug!(location = %location, "Geocoded city");
            let target = ProviderTarget::Coordinates(location.clone());
            self.fetch_target(target, Some(location), Location::unresolved(city), locale)
                .await
        } else {
            let target = ProviderTarget::PlaceName(city.to_string());
            self.fetch_target(target, None, Location::unresolved(city), locale)
                .await
        }
    }

    /// Fetch both halves concurrently and normalize
    ///
    /// The report's location is the geocoded one, else the one the provider
    /// reports, else `fallback`.
    async fn fetch_target(
        &self,
        target: ProviderTarget,
        geocoded: Option<Location>,
        fallback: Location,
        locale: Locale,
    ) -> Result<WeatherReport, ApplicationError> {
        let (current, forecast) = fetch_both(self.provider.as_ref(), &target, locale).await;

        let (current, forecast) = match (current, forecast) {
            (Ok(current), Ok(forecast)) => (current, forecast),
            (Err(current_err), Err(forecast_err)) => {
                return Err(Self::more_specific(current_err, forecast_err));
            },
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
        };

        let location = geocoded
            .or_else(|| current.location.clone())
            .or_else(|| forecast.location.clone())
            .unwrap_or(fallback);

        let snapshot = self
            .normalizer
            .normalize_current(&current, location.clone(), locale);
        let forecast = self
            .normalizer
            .normalize_forecast(&forecast, &location, locale);

        debug!(
            location = %location,
            forecast_days = forecast.len(),
            condition = %snapshot.condition,
            "Weather fetched"
        );

        Ok(WeatherReport::new(snapshot, forecast))
    }

    /// Pick the error to report when both fetches fail
    ///
    /// A provider-supplied message wins, then `NotFound`, then the
    /// current-conditions error. The other one is logged.
    fn more_specific(current: ApplicationError, forecast: ApplicationError) -> ApplicationError {
        let rank = |e: &ApplicationError| match e {
            _ if e.provider_message().is_some() => 2,
            ApplicationError::NotFound(_) => 1,
            _ => 0,
        };
        let (kept, dropped) = if rank(&forecast) > rank(&current) {
            (forecast, current)
        } else {
            (current, forecast)
        };
        warn!(error = %dropped, "Both fetches failed, reporting the other error");
        kept
    }

    fn fail(error: ApplicationError, locale: Locale) -> WeatherFetchError {
        warn!(error = %error, "Weather request failed");
        WeatherFetchError::new(error, locale)
    }
}
