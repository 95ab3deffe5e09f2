//! Geocoded location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A canonical place record produced by a geocoding lookup
///
/// Immutable and request-scoped: one is created per geocode call and shared
/// by the current-weather and forecast fetches of the same request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name of the place
    name: String,
    /// Country name (may be empty when the provider does not report it)
    country: String,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Provider-assigned place identifier (0 when unknown)
    id: u64,
}

impl Location {
    /// Create a new location with coordinate validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180].
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        id: u64,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
            id,
        })
    }

    /// Location for a bare coordinate pair, named `"{lat},{lon}"`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` for out-of-range values.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        Self::new(format!("{latitude},{longitude}"), "", latitude, longitude, 0)
    }

    /// Placeholder for a place known only by the name that was queried
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            id: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}, {}", self.name, self.country)
        }
    }
}
