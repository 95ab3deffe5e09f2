//! Provider configurations: selection, Open-Meteo, OpenWeatherMap.

use std::fmt;
use std::str::FromStr;

use integration_weather::{GeocodingConfig, OpenMeteoConfig, OpenWeatherConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Provider Selection
// ==============================

/// Weather provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Key-less Open-Meteo (geocode, then fetch by coordinates)
    #[default]
    OpenMeteo,
    /// Key-based OpenWeatherMap (fetch by place name)
    OpenWeather,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenMeteo => write!(f, "open-meteo"),
            Self::OpenWeather => write!(f, "open-weather"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "open_meteo" | "openmeteo" => Ok(Self::OpenMeteo),
            "open_weather" | "openweather" | "openweathermap" => Ok(Self::OpenWeather),
            _ => Err(format!(
                "Invalid provider: {s}. Use 'open-meteo' or 'open-weather'"
            )),
        }
    }
}

/// Provider section
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProviderAppConfig {
    /// Which provider serves weather requests
    #[serde(default)]
    pub kind: ProviderKind,
}

// ==============================
// Open-Meteo Configuration
// ==============================

/// Open-Meteo forecast and geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoAppConfig {
    /// Forecast API base URL
    #[serde(default = "default_open_meteo_base_url")]
    pub base_url: String,

    /// Geocoding API base URL
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_open_meteo_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days requested (1-14)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_open_meteo_base_url() -> String {
    OpenMeteoConfig::default().base_url
}

fn default_geocoding_base_url() -> String {
    GeocodingConfig::default().base_url
}

fn default_open_meteo_timeout() -> u64 {
    OpenMeteoConfig::default().timeout_secs
}

fn default_forecast_days() -> u8 {
    OpenMeteoConfig::default().forecast_days
}

impl Default for OpenMeteoAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_open_meteo_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            timeout_secs: default_open_meteo_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl OpenMeteoAppConfig {
    /// Convert to `integration_weather`'s `OpenMeteoConfig`
    #[must_use]
    pub fn to_client_config(&self) -> OpenMeteoConfig {
        OpenMeteoConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            forecast_days: self.forecast_days,
        }
    }

    /// Convert to `integration_weather`'s `GeocodingConfig`
    ///
    /// The geocoder shares the forecast request timeout.
    #[must_use]
    pub fn to_geocoding_config(&self) -> GeocodingConfig {
        GeocodingConfig {
            base_url: self.geocoding_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// OpenWeatherMap Configuration
// ==============================

/// OpenWeatherMap configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherAppConfig {
    /// API base URL
    #[serde(default = "default_open_weather_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_open_weather_timeout")]
    pub timeout_secs: u64,
}

impl fmt::Debug for OpenWeatherAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_open_weather_base_url() -> String {
    OpenWeatherConfig::default().base_url
}

fn default_open_weather_timeout() -> u64 {
    OpenWeatherConfig::default().timeout_secs
}

impl Default for OpenWeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_open_weather_base_url(),
            api_key: None,
            timeout_secs: default_open_weather_timeout(),
        }
    }
}

impl OpenWeatherAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_weather`'s `OpenWeatherConfig`
    #[must_use]
    pub fn to_client_config(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_default_is_open_meteo() {
        assert_eq!(ProviderKind::default(), ProviderKind::OpenMeteo);
    }

    #[test]
    fn provider_kind_from_str_accepts_both_spellings() {
        assert_eq!(
            "open-meteo".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenMeteo
        );
        assert_eq!(
            "open_weather".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenWeather
        );
        assert_eq!(
            "OpenWeatherMap".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenWeather
        );
        assert!("darksky".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn provider_kind_serialize() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::OpenWeather).unwrap(),
            "\"open_weather\""
        );
        assert_eq!(ProviderKind::OpenMeteo.to_string(), "open-meteo");
    }

    #[test]
    fn open_meteo_defaults_match_client() {
        let config = OpenMeteoAppConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.forecast_days, 14);

        let geocoding = config.to_geocoding_config();
        assert_eq!(geocoding.base_url, config.geocoding_base_url);
        assert_eq!(geocoding.timeout_secs, config.timeout_secs);
    }

    #[test]
    fn open_weather_debug_redacts_key() {
        let config = OpenWeatherAppConfig {
            api_key: Some(SecretString::from("super-secret-key".to_string())),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn open_weather_key_is_not_serialized() {
        let config = OpenWeatherAppConfig {
            api_key: Some(SecretString::from("super-secret-key".to_string())),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn blank_key_is_not_a_key() {
        let config = OpenWeatherAppConfig {
            api_key: Some(SecretString::from("   ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert!(!OpenWeatherAppConfig::default().has_api_key());
    }

    #[test]
    fn open_weather_client_config_exposes_key() {
        let config = OpenWeatherAppConfig {
            api_key: Some(SecretString::from("abc123".to_string())),
            ..Default::default()
        };
        let client = config.to_client_config();
        assert_eq!(client.api_key.as_deref(), Some("abc123"));
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }
}
