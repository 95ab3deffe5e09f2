//! Multi-day forecast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weather_snapshot::unix_to_datetime;
use crate::value_objects::{Location, NormalizedCondition};

/// Upper bound on the number of days in a forecast series
pub const MAX_FORECAST_DAYS: usize = 14;

/// One forecast period (one calendar day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub location: Location,
    /// Start of the period (seconds since epoch)
    pub observed_at_unix: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub pressure: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction_deg: u16,
    pub visibility_m: u32,
    pub cloud_cover_pct: u8,
    pub condition: NormalizedCondition,
}

impl ForecastEntry {
    #[must_use]
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_datetime(self.observed_at_unix)
    }

    /// Short summary, e.g. `Rain 25°C (20°C/30°C)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} {:.0}°C ({:.0}°C/{:.0}°C)",
            self.condition, self.temperature_c, self.temperature_min_c, self.temperature_max_c
        )
    }
}

/// Ordered daily forecast for one location
///
/// Entries are sorted by ascending `observed_at_unix`, one per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub location: Location,
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Today's entry
    #[must_use]
    pub fn today(&self) -> Option<&ForecastEntry> {
        self.entries.first()
    }

    /// Whether entries are strictly ascending in time
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].observed_at_unix < pair[1].observed_at_unix)
    }
}
