//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod weather_provider_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use weather_provider_port::MockWeatherProviderPort;
pub use weather_provider_port::{
    ProviderTarget, RawCurrentPayload, RawForecastPayload, RawObservation, RawTimestamp,
    WeatherProviderPort, fetch_both,
};
