//! Weather and geocoding integrations
//!
//! HTTP clients for the upstream services the weather core talks to:
//! - Open-Meteo forecast API (<https://open-meteo.com>), key-less
//! - OpenWeatherMap current/forecast API, key-based
//! - Open-Meteo geocoding API for place name resolution

mod error;
pub mod geocoding;
pub mod models;
pub mod open_meteo;
pub mod open_weather;

pub use error::{GeocodingError, WeatherError, error_message};
pub use geocoding::{GeocodingClient, GeocodingConfig, OpenMeteoGeocodingClient};
pub use open_meteo::{OpenMeteoApi, OpenMeteoClient, OpenMeteoConfig};
pub use open_weather::{OpenWeatherApi, OpenWeatherClient, OpenWeatherConfig, PlaceQuery};
