//! OpenWeatherMap adapter - Implements `WeatherProviderPort` using integration_weather
//!
//! The key-based provider resolves place names itself and reports the place
//! it matched, which becomes the report's location.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    ProviderTarget, RawCurrentPayload, RawForecastPayload, RawObservation, RawTimestamp,
    WeatherProviderPort,
};
use async_trait::async_trait;
use domain::{ConditionCode, Locale, Location};
use integration_weather::models::open_weather::{
    Clouds, Condition, CurrentResponse, ForecastItem, ForecastResponse, MainReadings, Wind,
};
use integration_weather::{OpenWeatherApi, OpenWeatherClient, OpenWeatherConfig, PlaceQuery};
use tracing::{debug, instrument, warn};

use super::{degrees, map_weather_error};

/// Adapter for the OpenWeatherMap API
pub struct OpenWeatherAdapter {
    client: Arc<dyn OpenWeatherApi>,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("client", &"OpenWeatherApi")
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn OpenWeatherApi>) -> Self {
        Self { client }
    }

    fn place_query(target: &ProviderTarget) -> PlaceQuery {
        match target {
            ProviderTarget::PlaceName(name) => PlaceQuery::Name(name.clone()),
            ProviderTarget::Coordinates(location) => PlaceQuery::Coordinates {
                latitude: location.latitude(),
                longitude: location.longitude(),
            },
        }
    }

    fn current_payload(response: &CurrentResponse) -> RawCurrentPayload {
        let sys = response.sys.clone().unwrap_or_default();

        let location = match (&response.name, response.coord) {
            (Some(name), Some(coord)) if !name.trim().is_empty() => place(
                name,
                sys.country.as_deref(),
                coord.lat,
                coord.lon,
                response.id,
            ),
            _ => None,
        };

        RawCurrentPayload {
            observation: observation(
                RawTimestamp::Unix(response.dt),
                &response.main,
                response.wind,
                response.clouds,
                response.visibility,
                &response.weather,
            ),
            sunrise: sys.sunrise.map_or(RawTimestamp::Missing, RawTimestamp::Unix),
            sunset: sys.sunset.map_or(RawTimestamp::Missing, RawTimestamp::Unix),
            location,
        }
    }

    fn forecast_payload(response: &ForecastResponse) -> RawForecastPayload {
        let location = response.city.as_ref().and_then(|city| {
            let name = city.name.as_deref()?;
            let coord = city.coord?;
            place(name, city.country.as_deref(), coord.lat, coord.lon, city.id)
        });

        RawForecastPayload {
            entries: response.list.iter().map(forecast_observation).collect(),
            location,
        }
    }
}

/// A period is dated by its `dt_txt` calendar text when present
fn forecast_observation(item: &ForecastItem) -> RawObservation {
    let timestamp = item
        .dt_txt
        .clone()
        .map_or(RawTimestamp::Unix(item.dt), RawTimestamp::DateTime);
    observation(
        timestamp,
        &item.main,
        item.wind,
        item.clouds,
        item.visibility,
        &item.weather,
    )
}

fn observation(
    timestamp: RawTimestamp,
    main: &MainReadings,
    wind: Option<Wind>,
    clouds: Option<Clouds>,
    visibility: Option<u32>,
    weather: &[Condition],
) -> RawObservation {
    let wind = wind.unwrap_or_default();
    RawObservation {
        timestamp,
        temperature: main.temp,
        feels_like: main.feels_like,
        temperature_min: main.temp_min,
        temperature_max: main.temp_max,
        pressure: main.pressure,
        humidity: main.humidity,
        wind_speed: wind.speed,
        wind_direction: wind.deg.map(degrees),
        visibility,
        cloud_cover: clouds.and_then(|c| c.all),
        condition_code: weather.first().map(|w| ConditionCode::OpenWeather(w.id)),
    }
}

fn place(
    name: &str,
    country: Option<&str>,
    latitude: f64,
    longitude: f64,
    id: Option<u64>,
) -> Option<Location> {
    Location::new(
        name,
        country.unwrap_or_default(),
        latitude,
        longitude,
        id.unwrap_or_default(),
    )
    .inspect_err(|e| warn!(error = %e, "Ignoring place reported by OpenWeatherMap"))
    .ok()
}

#[async_trait]
impl WeatherProviderPort for OpenWeatherAdapter {
    fn name(&self) -> &'static str {
        "open-weather"
    }

    fn requires_coordinates(&self) -> bool {
        false
    }

    #[instrument(skip(self), fields(target = %target.label()))]
    async fn fetch_current(
        &self,
        target: &ProviderTarget,
        locale: Locale,
    ) -> Result<RawCurrentPayload, ApplicationError> {
        let response = self
            .client
            .current(&Self::place_query(target), locale.code())
            .await
            .map_err(map_weather_error)?;

        let payload = Self::current_payload(&response);
        debug!(code = ?payload.observation.condition_code, "Fetched current weather");
        Ok(payload)
    }

    #[instrument(skip(self), fields(target = %target.label()))]
    async fn fetch_forecast(
        &self,
        target: &ProviderTarget,
        locale: Locale,
    ) -> Result<RawForecastPayload, ApplicationError> {
        let response = self
            .client
            .forecast(&Self::place_query(target), locale.code())
            .await
            .map_err(map_weather_error)?;

        let payload = Self::forecast_payload(&response);
        debug!(periods = payload.entries.len(), "Fetched forecast");
        Ok(payload)
    }
}
