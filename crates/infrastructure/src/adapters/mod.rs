//! Infrastructure adapters
//!
//! Adapters connect application ports to the HTTP clients in
//! `integration_weather`.

mod geocoding_adapter;
mod open_meteo_adapter;
mod open_weather_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use open_meteo_adapter::OpenMeteoAdapter;
pub use open_weather_adapter::OpenWeatherAdapter;

use application::error::ApplicationError;
use domain::DomainError;
use integration_weather::WeatherError;

/// Map weather client errors to application errors
pub(crate) fn map_weather_error(error: WeatherError) -> ApplicationError {
    match error {
        WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
            ApplicationError::Transport(e)
        },
        WeatherError::Timeout => ApplicationError::Transport("Request timed out".to_string()),
        WeatherError::RateLimitExceeded => {
            ApplicationError::upstream(Some(429), "Rate limit exceeded")
        },
        WeatherError::Http {
            status,
            message: Some(message),
        } => ApplicationError::upstream_with_message(Some(status), message),
        WeatherError::Http {
            status,
            message: None,
        } => ApplicationError::upstream(Some(status), format!("HTTP {status}")),
        WeatherError::ParseError(e) => {
            ApplicationError::upstream(None, format!("Unreadable response: {e}"))
        },
        WeatherError::MissingApiKey => ApplicationError::MissingCredentials(
            "OpenWeatherMap API key is not configured".to_string(),
        ),
        WeatherError::InvalidCoordinates => {
            ApplicationError::Domain(DomainError::ValidationError(error.to_string()))
        },
    }
}

/// Compass bearing in whole degrees, `0..360`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn degrees(value: f64) -> u16 {
    (value.rem_euclid(360.0).round() as u16) % 360
}
