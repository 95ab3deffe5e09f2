//! Application-level errors

use domain::{DomainError, Locale};
use thiserror::Error;

use crate::messages::{FailureMessage, failure_message};

/// Errors raised by geocoders and provider adapters
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Place name resolved to no geocoding result
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key-based provider used without an API key
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Network-level failure (timeout, DNS, connection refused, non-2xx on lookups)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with an error status or an unusable body
    #[error("Upstream error: {detail}")]
    Upstream {
        /// HTTP status, when the failure came with one
        status: Option<u16>,
        /// Message taken from the provider's error body, if any
        provider_message: Option<String>,
        /// Diagnostic detail
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Upstream failure without a provider message
    pub fn upstream(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            provider_message: None,
            detail: detail.into(),
        }
    }

    /// Upstream failure carrying the provider's own message
    pub fn upstream_with_message(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Upstream {
            status,
            detail: message.clone(),
            provider_message: Some(message),
        }
    }

    /// The provider-supplied message, when there is one
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Upstream {
                provider_message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Failure of a combined current + forecast request
///
/// `message` is safe to show to users in the requested locale; the original
/// error is kept as the source for diagnostics.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct WeatherFetchError {
    message: String,
    #[source]
    source: ApplicationError,
}

impl WeatherFetchError {
    /// Wrap an error, choosing the most specific user-facing message
    #[must_use]
    pub fn new(source: ApplicationError, locale: Locale) -> Self {
        let message = match (&source, source.provider_message()) {
            (_, Some(provider)) => provider.to_string(),
            (ApplicationError::NotFound(_), None) => {
                failure_message(FailureMessage::CityNotFound, locale).to_string()
            },
            _ => failure_message(FailureMessage::Generic, locale).to_string(),
        };
        Self { message, source }
    }

    /// User-facing message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error that caused the failure
    #[must_use]
    pub const fn cause(&self) -> &ApplicationError {
        &self.source
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.source, ApplicationError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_only_for_upstream() {
        let err = ApplicationError::upstream_with_message(Some(404), "city not found");
        assert_eq!(err.provider_message(), Some("city not found"));

        let err = ApplicationError::upstream(Some(500), "HTTP 500");
        assert_eq!(err.provider_message(), None);

        let err = ApplicationError::Transport("timeout".into());
        assert_eq!(err.provider_message(), None);
    }

    #[test]
    fn blank_provider_message_is_ignored() {
        let err = ApplicationError::upstream_with_message(Some(400), "  ");
        assert_eq!(err.provider_message(), None);
    }

    #[test]
    fn fetch_error_prefers_provider_message() {
        let err = WeatherFetchError::new(
            ApplicationError::upstream_with_message(Some(401), "Invalid API key"),
            Locale::Fa,
        );
        assert_eq!(err.message(), "Invalid API key");
        assert!(matches!(err.cause(), ApplicationError::Upstream { .. }));
    }

    #[test]
    fn fetch_error_localizes_not_found() {
        let err = WeatherFetchError::new(ApplicationError::NotFound("Atlantis".into()), Locale::En);
        assert_eq!(err.message(), "City not found. Please try another search.");
        assert!(err.is_not_found());
    }

    #[test]
    fn fetch_error_generic_message() {
        let err = WeatherFetchError::new(ApplicationError::Transport("reset".into()), Locale::En);
        assert_eq!(err.message(), "Failed to load weather data. Please try again.");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn fetch_error_keeps_source() {
        use std::error::Error as _;
        let err = WeatherFetchError::new(ApplicationError::Transport("reset".into()), Locale::En);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Transport error: reset"));
    }
}
