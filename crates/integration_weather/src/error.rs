//! Error types for the weather and geocoding clients

use reqwest::StatusCode;
use thiserror::Error;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Non-success HTTP status
    #[error("HTTP {status}{}", message_suffix(.message.as_deref()))]
    Http {
        status: u16,
        /// `message` field of the provider's error body, if any
        message: Option<String>,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Key-based provider called without an API key
    #[error("No API key configured")]
    MissingApiKey,

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

impl WeatherError {
    /// Map a send failure
    pub(crate) fn from_send(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::RequestFailed(error.to_string())
        }
    }

    /// Map a non-success status and its (possibly empty) body
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimitExceeded;
        }
        Self::Http {
            status: status.as_u16(),
            message: error_message(body),
        }
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RateLimitExceeded => Some(429),
            _ => None,
        }
    }
}

fn message_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

/// Extract the `message` field from a JSON error body
///
/// Both `{"cod":"404","message":"city not found"}` and Open-Meteo's
/// `{"error":true,"reason":"..."}` shapes are understood.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "reason"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string)
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP client could not be built or the connection failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Place name could not be resolved
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}
