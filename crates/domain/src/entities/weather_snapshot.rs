//! Current conditions for one location

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Location, NormalizedCondition};

/// Visibility reported when the provider does not measure it (metres)
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// Convert seconds since the epoch to a UTC datetime
#[must_use]
pub fn unix_to_datetime(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Current ("today") weather for one location
///
/// Temperatures are Celsius, wind speed m/s, pressure hPa.
/// `temperature_min_c <= temperature_c <= temperature_max_c` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    /// Observation time (seconds since epoch)
    pub observed_at_unix: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    /// Pressure in hPa (0 when the provider does not report it)
    pub pressure: f64,
    /// Relative humidity in percent (0 when the provider does not report it)
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction_deg: u16,
    pub visibility_m: u32,
    pub cloud_cover_pct: u8,
    pub condition: NormalizedCondition,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}

impl WeatherSnapshot {
    /// Observation time as a datetime
    #[must_use]
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_datetime(self.observed_at_unix)
    }

    /// Whether the min/max bounds bracket the point temperature
    #[must_use]
    pub fn bounds_consistent(&self) -> bool {
        self.temperature_min_c <= self.temperature_c && self.temperature_c <= self.temperature_max_c
    }

    /// Short one-line summary, e.g. `Tokyo, Japan: Mainly clear 18°C (feels like 17°C)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} {:.0}°C (feels like {:.0}°C)",
            self.location, self.condition, self.temperature_c, self.feels_like_c
        )
    }
}
