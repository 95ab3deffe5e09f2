//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: provider selection, Open-Meteo, OpenWeatherMap
//! - `telemetry`: log level and format
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. optional `config.toml` (or an explicit path)
//! 3. `WEATHER_`-prefixed environment variables, sections separated by
//!    `__` (e.g. `WEATHER_PROVIDER__KIND=open_weather`,
//!    `WEATHER_OPEN_WEATHER__API_KEY=...`)

mod integrations;
mod telemetry;

use std::path::Path;

use application::WeatherServiceConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use domain::MAX_FORECAST_DAYS;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use integrations::{OpenMeteoAppConfig, OpenWeatherAppConfig, ProviderAppConfig, ProviderKind};
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WEATHER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: ProviderAppConfig,

    /// Open-Meteo forecast and geocoding configuration
    #[serde(default)]
    pub open_meteo: OpenMeteoAppConfig,

    /// OpenWeatherMap configuration
    #[serde(default)]
    pub open_weather: OpenWeatherAppConfig,

    /// Weather service configuration
    #[serde(default)]
    pub service: WeatherServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from environment and an optional explicit file
    ///
    /// An explicit path must exist; without one, `config.toml` in the
    /// working directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        Self::build(
            config::Config::builder()
                .add_source(file)
                .add_source(environment(None)),
        )
    }

    /// Parse configuration from a TOML document, without environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or the result is invalid.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::build(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        if config.provider.kind == ProviderKind::OpenWeather && !config.open_weather.has_api_key() {
            warn!("OpenWeatherMap selected without an API key; requests will fail");
        }
        debug!(provider = %config.provider.kind, "Configuration loaded");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Message(msg));

        if !(1..=MAX_FORECAST_DAYS).contains(&usize::from(self.open_meteo.forecast_days)) {
            return invalid(format!(
                "open_meteo.forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.open_meteo.forecast_days
            ));
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&self.service.max_forecast_days) {
            return invalid(format!(
                "service.max_forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.service.max_forecast_days
            ));
        }
        for (key, timeout) in [
            ("open_meteo.timeout_secs", self.open_meteo.timeout_secs),
            ("open_weather.timeout_secs", self.open_weather.timeout_secs),
        ] {
            if timeout == 0 {
                return invalid(format!("{key} must be greater than 0"));
            }
        }
        for (key, url) in [
            ("open_meteo.base_url", &self.open_meteo.base_url),
            ("open_meteo.geocoding_base_url", &self.open_meteo.geocoding_base_url),
            ("open_weather.base_url", &self.open_weather.base_url),
            ("service.icon_base_url", &self.service.icon_base_url),
        ] {
            if url.trim().is_empty() {
                return invalid(format!("{key} must not be empty"));
            }
        }
        Ok(())
    }
}

/// `WEATHER_SECTION__KEY` environment source
///
/// `vars` replaces the process environment, for tests.
fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

#[cfg(test)]
mod tests {
    use domain::Locale;
    use secrecy::ExposeSecret;

    use super::*;

    fn from_env(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::build(config::Config::builder().add_source(environment(Some(map))))
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.kind, ProviderKind::OpenMeteo);
        assert_eq!(config.service.default_locale, Locale::En);
        assert!(config.open_weather.api_key.is_none());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.provider.kind, ProviderKind::OpenMeteo);
        assert_eq!(config.open_meteo.forecast_days, 14);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn toml_sections() {
        let config = AppConfig::from_toml(
            r#"
            [provider]
            kind = "open_weather"

            [open_weather]
            api_key = "abc123"
            timeout_secs = 5

            [service]
            default_locale = "fa"
            icon_base_url = "https://icons.example.com/wn/"

            [telemetry]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::OpenWeather);
        assert_eq!(
            config
                .open_weather
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            Some("abc123".to_string())
        );
        assert_eq!(config.open_weather.timeout_secs, 5);
        assert_eq!(config.service.default_locale, Locale::Fa);
        assert_eq!(config.service.max_forecast_days, 14);
        assert!(config.telemetry.json);
    }

    #[test]
    fn environment_overrides() {
        let config = from_env(&[
            ("WEATHER_PROVIDER__KIND", "open_weather"),
            ("WEATHER_OPEN_WEATHER__API_KEY", "from-env"),
            ("WEATHER_OPEN_METEO__FORECAST_DAYS", "7"),
        ])
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::OpenWeather);
        assert!(config.open_weather.has_api_key());
        assert_eq!(config.open_meteo.forecast_days, 7);
    }

    #[test]
    fn unrelated_environment_is_ignored() {
        let config = from_env(&[("PATH", "/usr/bin"), ("OTHER_PROVIDER__KIND", "x")]).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::OpenMeteo);
    }

    #[test]
    fn forecast_days_out_of_range_is_rejected() {
        let err = AppConfig::from_toml("[open_meteo]\nforecast_days = 16").unwrap_err();
        assert!(err.to_string().contains("forecast_days"));

        let err = AppConfig::from_toml("[open_meteo]\nforecast_days = 0").unwrap_err();
        assert!(err.to_string().contains("forecast_days"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_toml("[open_weather]\ntimeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("open_weather.timeout_secs"));
    }

    #[test]
    fn blank_url_is_rejected() {
        let err = AppConfig::from_toml("[open_meteo]\nbase_url = \"  \"").unwrap_err();
        assert!(err.to_string().contains("open_meteo.base_url"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(AppConfig::from_toml("[provider]\nkind = \"darksky\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/weather.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn debug_never_shows_key() {
        let config = AppConfig::from_toml("[open_weather]\napi_key = \"hunter2\"").unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
