//! Service construction from configuration

use std::sync::Arc;

use application::ports::{GeocodingPort, WeatherProviderPort};
use application::{ApplicationError, WeatherService};
use tracing::info;

use crate::adapters::{GeocodingAdapter, OpenMeteoAdapter, OpenWeatherAdapter};
use crate::config::{AppConfig, ProviderKind};

/// Build the adapter for the configured provider
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if the HTTP client cannot be
/// created.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn WeatherProviderPort>, ApplicationError> {
    let provider: Arc<dyn WeatherProviderPort> = match config.provider.kind {
        ProviderKind::OpenMeteo => Arc::new(OpenMeteoAdapter::with_config(
            config.open_meteo.to_client_config(),
        )?),
        ProviderKind::OpenWeather => Arc::new(OpenWeatherAdapter::with_config(
            config.open_weather.to_client_config(),
        )?),
    };
    Ok(provider)
}

/// Build the geocoder
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if the HTTP client cannot be
/// created.
pub fn build_geocoder(config: &AppConfig) -> Result<Arc<dyn GeocodingPort>, ApplicationError> {
    Ok(Arc::new(GeocodingAdapter::with_config(
        &config.open_meteo.to_geocoding_config(),
    )?))
}

/// Build a ready-to-use weather service
///
/// A missing OpenWeatherMap key is not an error here; requests fail with
/// `MissingCredentials` instead.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or an HTTP client
/// cannot be created.
pub fn build_weather_service(config: &AppConfig) -> Result<WeatherService, ApplicationError> {
    config
        .validate()
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

    let provider = build_provider(config)?;
    let geocoder = build_geocoder(config)?;

    info!(
        provider = provider.name(),
        locale = %config.service.default_locale,
        "Weather service ready"
    );
    Ok(WeatherService::new(provider, geocoder, config.service.clone()))
}
