//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the weather and geocoding
//! HTTP clients, loads configuration and sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{
    AppConfig, OpenMeteoAppConfig, OpenWeatherAppConfig, ProviderAppConfig, ProviderKind,
    TelemetryAppConfig,
};
pub use telemetry::{TelemetryError, init_tracing};
pub use wiring::{build_geocoder, build_provider, build_weather_service};
