//! Geocoding adapter - Implements `GeocodingPort` using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{Locale, Location};
use integration_weather::{
    GeocodingClient, GeocodingConfig, GeocodingError, OpenMeteoGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter resolving place names through the Open-Meteo geocoding API
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    /// Map geocoding errors to application errors
    fn map_error(error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::PlaceNotFound(name) => ApplicationError::NotFound(name),
            GeocodingError::Timeout => {
                ApplicationError::Transport("Geocoding request timed out".to_string())
            },
            GeocodingError::ConnectionFailed(e) | GeocodingError::RequestFailed(e) => {
                ApplicationError::Transport(e)
            },
            GeocodingError::ParseError(e) => {
                ApplicationError::upstream(None, format!("Unreadable geocoding response: {e}"))
            },
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn resolve(
        &self,
        place_name: &str,
        locale: Locale,
    ) -> Result<Location, ApplicationError> {
        let place = self
            .client
            .search(place_name, locale.code())
            .await
            .map_err(Self::map_error)?;

        let location = Location::new(
            place.name,
            place.country.unwrap_or_default(),
            place.latitude,
            place.longitude,
            place.id.unwrap_or_default(),
        )
        .map_err(|e| ApplicationError::upstream(None, format!("Malformed geocoding result: {e}")))?;

        debug!(location = %location, "Resolved place name");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use integration_weather::models::geocoding::Place;

    use super::*;

    /// Fake client returning a canned result and recording the language
    struct FakeClient {
        result: Mutex<Option<Result<Place, GeocodingError>>>,
        languages: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn returning(result: Result<Place, GeocodingError>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                languages: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GeocodingClient for FakeClient {
        async fn search(&self, _name: &str, language: &str) -> Result<Place, GeocodingError> {
            self.languages.lock().unwrap().push(language.to_string());
            self.result.lock().unwrap().take().unwrap()
        }
    }

    fn tokyo() -> Place {
        Place {
            id: Some(1_850_147),
            name: "Tokyo".to_string(),
            country: Some("Japan".to_string()),
            latitude: 35.6895,
            longitude: 139.69171,
        }
    }

    #[tokio::test]
    async fn resolves_first_result() {
        let client = FakeClient::returning(Ok(tokyo()));
        let adapter = GeocodingAdapter::with_client(client.clone());

        let location = adapter.resolve("Tokyo", Locale::Fa).await.unwrap();

        assert_eq!(location.name(), "Tokyo");
        assert_eq!(location.country(), "Japan");
        assert_eq!(location.id(), 1_850_147);
        assert!((location.latitude() - 35.6895).abs() < 1e-9);
        assert_eq!(client.languages.lock().unwrap().as_slice(), ["fa"]);
    }

    #[tokio::test]
    async fn missing_country_and_id_default() {
        let place = Place {
            id: None,
            country: None,
            ..tokyo()
        };
        let adapter = GeocodingAdapter::with_client(FakeClient::returning(Ok(place)));

        let location = adapter.resolve("Tokyo", Locale::En).await.unwrap();
        assert_eq!(location.country(), "");
        assert_eq!(location.id(), 0);
    }

    #[tokio::test]
    async fn place_not_found_maps_to_not_found() {
        let adapter = GeocodingAdapter::with_client(FakeClient::returning(Err(
            GeocodingError::PlaceNotFound("Nonexistentville".to_string()),
        )));

        let err = adapter
            .resolve("Nonexistentville", Locale::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn request_failures_map_to_transport() {
        for error in [
            GeocodingError::Timeout,
            GeocodingError::RequestFailed("HTTP 500".to_string()),
            GeocodingError::ConnectionFailed("refused".to_string()),
        ] {
            let adapter = GeocodingAdapter::with_client(FakeClient::returning(Err(error)));
            let err = adapter.resolve("Tokyo", Locale::En).await.unwrap_err();
            assert!(matches!(err, ApplicationError::Transport(_)));
        }
    }

    #[tokio::test]
    async fn unparseable_body_maps_to_upstream() {
        let adapter = GeocodingAdapter::with_client(FakeClient::returning(Err(
            GeocodingError::ParseError("expected value".to_string()),
        )));

        let err = adapter.resolve("Tokyo", Locale::En).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Upstream { .. }));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_upstream() {
        let place = Place {
            latitude: 123.0,
            ..tokyo()
        };
        let adapter = GeocodingAdapter::with_client(FakeClient::returning(Ok(place)));

        let err = adapter.resolve("Tokyo", Locale::En).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Upstream { status: None, .. }));
    }
}
