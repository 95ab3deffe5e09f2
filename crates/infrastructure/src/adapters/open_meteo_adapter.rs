//! Open-Meteo adapter - Implements `WeatherProviderPort` using integration_weather
//!
//! The key-less provider needs coordinates. Current conditions are the
//! instantaneous `current_weather` block combined with the first daily
//! aggregate; the forecast is one raw entry per daily row.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    ProviderTarget, RawCurrentPayload, RawForecastPayload, RawObservation, RawTimestamp,
    WeatherProviderPort,
};
use async_trait::async_trait;
use domain::{ConditionCode, Locale};
use integration_weather::models::open_meteo::{DailySeries, ForecastResponse};
use integration_weather::{OpenMeteoApi, OpenMeteoClient, OpenMeteoConfig};
use tracing::{debug, instrument};

use super::{degrees, map_weather_error};

/// WMO code assumed when neither the daily nor the current block has one
const FALLBACK_WMO_CODE: u16 = 0;

/// Adapter for the Open-Meteo forecast API
pub struct OpenMeteoAdapter {
    client: Arc<dyn OpenMeteoApi>,
}

impl std::fmt::Debug for OpenMeteoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMeteoAdapter")
            .field("client", &"OpenMeteoApi")
            .finish()
    }
}

impl OpenMeteoAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: OpenMeteoConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn OpenMeteoApi>) -> Self {
        Self { client }
    }

    async fn fetch(&self, target: &ProviderTarget) -> Result<ForecastResponse, ApplicationError> {
        let ProviderTarget::Coordinates(location) = target else {
            return Err(ApplicationError::Internal(format!(
                "Open-Meteo needs coordinates, got place name '{}'",
                target.label()
            )));
        };

        self.client
            .forecast(location.latitude(), location.longitude())
            .await
            .map_err(map_weather_error)
    }

    /// Current conditions from the forecast response
    ///
    /// Bounds and condition come from day 0 (falling back to the current
    /// block, then WMO 0). Feels-like is the hourly apparent temperature
    /// whose timestamp equals `current_weather.time` exactly.
    fn current_payload(response: &ForecastResponse) -> Result<RawCurrentPayload, ApplicationError> {
        let current = response.current_weather.as_ref().ok_or_else(|| {
            ApplicationError::upstream(None, "No current_weather block in Open-Meteo response")
        })?;
        let empty = DailySeries::default();
        let daily = response.daily.as_ref().unwrap_or(&empty);

        let code = daily
            .code_at(0)
            .or(current.weathercode)
            .unwrap_or(FALLBACK_WMO_CODE);

        let feels_like = current.time.as_deref().and_then(|time| {
            response
                .hourly
                .as_ref()
                .and_then(|hourly| hourly.apparent_temperature_at(time))
        });

        let observation = RawObservation {
            timestamp: current
                .time
                .clone()
                .map_or(RawTimestamp::Missing, RawTimestamp::DateTime),
            temperature: Some(current.temperature),
            feels_like,
            temperature_min: daily.min_at(0).or(Some(current.temperature)),
            temperature_max: daily.max_at(0).or(Some(current.temperature)),
            wind_speed: current.windspeed,
            wind_direction: current.winddirection.map(degrees),
            condition_code: Some(ConditionCode::Wmo(code)),
            ..RawObservation::default()
        };

        Ok(RawCurrentPayload {
            observation,
            sunrise: datetime_or_missing(daily.sunrise_at(0)),
            sunset: datetime_or_missing(daily.sunset_at(0)),
            location: None,
        })
    }

    /// One date-stamped entry per daily row, bounds only
    fn forecast_payload(response: &ForecastResponse) -> RawForecastPayload {
        let entries = response
            .daily
            .as_ref()
            .map(|daily| {
                daily
                    .time
                    .iter()
                    .enumerate()
                    .map(|(i, date)| RawObservation {
                        timestamp: RawTimestamp::Date(date.clone()),
                        temperature_min: daily.min_at(i),
                        temperature_max: daily.max_at(i),
                        condition_code: daily.code_at(i).map(ConditionCode::Wmo),
                        ..RawObservation::default()
                    })
                    .collect()
            })
            .unwrap_or_default();

        RawForecastPayload {
            entries,
            location: None,
        }
    }
}

fn datetime_or_missing(value: Option<&str>) -> RawTimestamp {
    value.map_or(RawTimestamp::Missing, |v| RawTimestamp::DateTime(v.to_string()))
}

#[async_trait]
impl WeatherProviderPort for OpenMeteoAdapter {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    fn requires_coordinates(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(target = %target.label()))]
    async fn fetch_current(
        &self,
        target: &ProviderTarget,
        _locale: Locale,
    ) -> Result<RawCurrentPayload, ApplicationError> {
        let response = self.fetch(target).await?;
        let payload = Self::current_payload(&response)?;
        debug!(code = ?payload.observation.condition_code, "Fetched current weather");
        Ok(payload)
    }

    #[instrument(skip(self), fields(target = %target.label()))]
    async fn fetch_forecast(
        &self,
        target: &ProviderTarget,
        _locale: Locale,
    ) -> Result<RawForecastPayload, ApplicationError> {
        let response = self.fetch(target).await?;
        let payload = Self::forecast_payload(&response);
        debug!(days = payload.entries.len(), "Fetched forecast");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain::Location;
    use integration_weather::WeatherError;

    use super::*;

    /// Fake client returning a canned response and recording coordinates
    #[derive(Default)]
    struct FakeClient {
        body: String,
        calls: Mutex<Vec<(f64, f64)>>,
    }

    #[async_trait]
    impl OpenMeteoApi for FakeClient {
        async fn forecast(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> Result<ForecastResponse, WeatherError> {
            self.calls.lock().unwrap().push((latitude, longitude));
            serde_json::from_str(&self.body).map_err(|e| WeatherError::ParseError(e.to_string()))
        }
    }

    fn tokyo_response() -> String {
        serde_json::json!({
            "latitude": 35.7,
            "longitude": 139.69,
            "current_weather": {
                "time": "2024-01-15T09:00",
                "temperature": 18.0,
                "windspeed": 3.4,
                "winddirection": 220.0,
                "weathercode": 3
            },
            "daily": {
                "time": ["2024-01-15", "2024-01-16"],
                "temperature_2m_max": [21.0, 30.0],
                "temperature_2m_min": [12.0, 20.0],
                "weathercode": [1, 61],
                "sunrise": ["2024-01-14T21:49", "2024-01-15T21:49"],
                "sunset": ["2024-01-15T07:58", "2024-01-16T07:59"]
            },
            "hourly": {
                "time": ["2024-01-15T08:00", "2024-01-15T09:00"],
                "apparent_temperature": [15.0, 17.2],
                "temperature_2m": [16.0, 18.0],
                "weathercode": [1, 1]
            }
        })
        .to_string()
    }

    fn response(body: &str) -> ForecastResponse {
        serde_json::from_str(body).unwrap()
    }

    fn tokyo() -> Location {
        Location::new("Tokyo", "Japan", 35.68, 139.76, 1_850_147).unwrap()
    }

    #[test]
    fn current_uses_day_zero_and_exact_hourly_match() {
        let payload = OpenMeteoAdapter::current_payload(&response(&tokyo_response())).unwrap();
        let obs = payload.observation;

        assert_eq!(obs.temperature, Some(18.0));
        assert_eq!(obs.feels_like, Some(17.2));
        assert_eq!(obs.temperature_min, Some(12.0));
        assert_eq!(obs.temperature_max, Some(21.0));
        assert_eq!(obs.condition_code, Some(ConditionCode::Wmo(1)));
        assert_eq!(obs.wind_speed, Some(3.4));
        assert_eq!(obs.wind_direction, Some(220));
        assert_eq!(obs.timestamp, RawTimestamp::DateTime("2024-01-15T09:00".into()));
        assert_eq!(payload.sunrise, RawTimestamp::DateTime("2024-01-14T21:49".into()));
        assert_eq!(obs.pressure, None);
        assert_eq!(obs.visibility, None);
    }

    #[test]
    fn feels_like_absent_without_exact_match() {
        let mut body: serde_json::Value = serde_json::from_str(&tokyo_response()).unwrap();
        body["current_weather"]["time"] = serde_json::json!("2024-01-15T09:15");
        let payload = OpenMeteoAdapter::current_payload(&response(&body.to_string())).unwrap();
        assert_eq!(payload.observation.feels_like, None);
    }

    #[test]
    fn code_falls_back_to_current_then_zero() {
        let mut body: serde_json::Value = serde_json::from_str(&tokyo_response()).unwrap();
        body.as_object_mut().unwrap().remove("daily");
        let payload = OpenMeteoAdapter::current_payload(&response(&body.to_string())).unwrap();
        assert_eq!(payload.observation.condition_code, Some(ConditionCode::Wmo(3)));
        assert_eq!(payload.observation.temperature_min, Some(18.0));
        assert_eq!(payload.sunrise, RawTimestamp::Missing);

        body["current_weather"]
            .as_object_mut()
            .unwrap()
            .remove("weathercode");
        let payload = OpenMeteoAdapter::current_payload(&response(&body.to_string())).unwrap();
        assert_eq!(payload.observation.condition_code, Some(ConditionCode::Wmo(0)));
    }

    #[test]
    fn missing_current_block_is_upstream_error() {
        let body = r#"{"latitude":1.0,"longitude":2.0}"#;
        let err = OpenMeteoAdapter::current_payload(&response(body)).unwrap_err();
        assert!(matches!(err, ApplicationError::Upstream { status: None, .. }));
    }

    #[test]
    fn forecast_is_one_entry_per_day() {
        let payload = OpenMeteoAdapter::forecast_payload(&response(&tokyo_response()));
        assert_eq!(payload.entries.len(), 2);

        let second = &payload.entries[1];
        assert_eq!(second.timestamp, RawTimestamp::Date("2024-01-16".into()));
        assert_eq!(second.temperature, None);
        assert_eq!(second.temperature_min, Some(20.0));
        assert_eq!(second.temperature_max, Some(30.0));
        assert_eq!(second.condition_code, Some(ConditionCode::Wmo(61)));
    }

    #[tokio::test]
    async fn fetch_uses_location_coordinates() {
        let client = Arc::new(FakeClient {
            body: tokyo_response(),
            ..FakeClient::default()
        });
        let adapter = OpenMeteoAdapter::with_client(client.clone());

        let target = ProviderTarget::Coordinates(tokyo());
        let payload = adapter.fetch_current(&target, Locale::En).await.unwrap();

        assert_eq!(payload.observation.temperature, Some(18.0));
        assert_eq!(*client.calls.lock().unwrap(), vec![(35.68, 139.76)]);
    }

    #[tokio::test]
    async fn place_name_target_is_rejected() {
        let client = Arc::new(FakeClient {
            body: tokyo_response(),
            ..FakeClient::default()
        });
        let adapter = OpenMeteoAdapter::with_client(client.clone());

        let target = ProviderTarget::PlaceName("Tokyo".into());
        let err = adapter.fetch_forecast(&target, Locale::En).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Internal(_)));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn adapter_metadata() {
        let adapter = OpenMeteoAdapter::with_config(OpenMeteoConfig::default()).unwrap();
        assert_eq!(adapter.name(), "open-meteo");
        assert!(adapter.requires_coordinates());
        assert!(format!("{adapter:?}").contains("OpenMeteoAdapter"));
    }
}
