//! Normalization of raw provider payloads
//!
//! Turns [`RawCurrentPayload`] / [`RawForecastPayload`] into the domain's
//! [`WeatherSnapshot`] and [`ForecastSeries`]. Normalization does no I/O; the
//! only impure input is the injected [`Clock`], consulted when a provider
//! omits a timestamp or sends one that cannot be parsed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use domain::{
    DEFAULT_VISIBILITY_M, ForecastEntry, ForecastSeries, Locale, Location, MAX_FORECAST_DAYS,
    NormalizedCondition, WeatherSnapshot,
};
use tracing::warn;

use super::condition_translator::translate;
use crate::ports::{RawCurrentPayload, RawForecastPayload, RawObservation, RawTimestamp};

/// Hour of day preferred when collapsing sub-daily forecast periods
const PREFERRED_HOUR: u32 = 12;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Source of the current time
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for deterministic normalization
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Converts raw provider payloads into domain entities
#[derive(Debug, Clone)]
pub struct Normalizer {
    clock: Arc<dyn Clock>,
    max_forecast_days: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Normalizer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            max_forecast_days: MAX_FORECAST_DAYS,
        }
    }

    /// Limit the number of forecast days (never above 14)
    #[must_use]
    pub fn with_max_forecast_days(mut self, days: usize) -> Self {
        self.max_forecast_days = days.min(MAX_FORECAST_DAYS);
        self
    }

    #[must_use]
    pub const fn max_forecast_days(&self) -> usize {
        self.max_forecast_days
    }

    /// Build the current-conditions snapshot
    pub fn normalize_current(
        &self,
        raw: &RawCurrentPayload,
        location: Location,
        locale: Locale,
    ) -> WeatherSnapshot {
        let fields = self.observation_fields(&raw.observation, locale);

        WeatherSnapshot {
            location,
            observed_at_unix: fields.observed_at.timestamp(),
            temperature_c: fields.temperature,
            feels_like_c: fields.feels_like,
            temperature_min_c: fields.temperature_min,
            temperature_max_c: fields.temperature_max,
            pressure: fields.pressure,
            humidity: fields.humidity,
            wind_speed: fields.wind_speed,
            wind_direction_deg: fields.wind_direction,
            visibility_m: fields.visibility,
            cloud_cover_pct: fields.cloud_cover,
            condition: fields.condition,
            sunrise_unix: self.resolve_timestamp(&raw.sunrise).timestamp(),
            sunset_unix: self.resolve_timestamp(&raw.sunset).timestamp(),
        }
    }

    /// Build the daily forecast series
    ///
    /// Sub-daily periods are collapsed to one entry per calendar date (see
    /// [`select_daily_entries`]), sorted ascending and capped.
    pub fn normalize_forecast(
        &self,
        raw: &RawForecastPayload,
        location: &Location,
        locale: Locale,
    ) -> ForecastSeries {
        let now = self.clock.now();
        let entries = select_daily_entries(&raw.entries, now, self.max_forecast_days)
            .into_iter()
            .map(|observation| {
                let fields = self.observation_fields(observation, locale);
                ForecastEntry {
                    location: location.clone(),
                    observed_at_unix: fields.observed_at.timestamp(),
                    temperature_c: fields.temperature,
                    feels_like_c: fields.feels_like,
                    temperature_min_c: fields.temperature_min,
                    temperature_max_c: fields.temperature_max,
                    pressure: fields.pressure,
                    humidity: fields.humidity,
                    wind_speed: fields.wind_speed,
                    wind_direction_deg: fields.wind_direction,
                    visibility_m: fields.visibility,
                    cloud_cover_pct: fields.cloud_cover,
                    condition: fields.condition,
                }
            })
            .collect();

        ForecastSeries {
            location: location.clone(),
            entries,
        }
    }

    fn resolve_timestamp(&self, timestamp: &RawTimestamp) -> DateTime<Utc> {
        parse_timestamp(timestamp).unwrap_or_else(|| {
            if *timestamp != RawTimestamp::Missing {
                warn!(?timestamp, "Unparseable provider timestamp, using current time");
            }
            self.clock.now()
        })
    }

    fn observation_fields(&self, raw: &RawObservation, locale: Locale) -> ObservationFields {
        let (temperature, temperature_min, temperature_max) = resolve_temperatures(raw);

        ObservationFields {
            observed_at: self.resolve_timestamp(&raw.timestamp),
            temperature,
            feels_like: raw.feels_like.unwrap_or(temperature),
            temperature_min,
            temperature_max,
            pressure: raw.pressure.unwrap_or(0.0),
            humidity: raw.humidity.map_or(0, |h| h.min(100)),
            wind_speed: raw.wind_speed.unwrap_or(0.0),
            wind_direction: raw.wind_direction.map_or(0, |d| d % 360),
            visibility: raw.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            cloud_cover: raw.cloud_cover.map_or(0, |c| c.min(100)),
            condition: raw
                .condition_code
                .map_or_else(NormalizedCondition::unknown, |code| translate(code, locale)),
        }
    }
}

/// Fields shared by snapshots and forecast entries
struct ObservationFields {
    observed_at: DateTime<Utc>,
    temperature: f64,
    feels_like: f64,
    temperature_min: f64,
    temperature_max: f64,
    pressure: f64,
    humidity: u8,
    wind_speed: f64,
    wind_direction: u16,
    visibility: u32,
    cloud_cover: u8,
    condition: NormalizedCondition,
}

/// Point temperature and bounds, with `min <= temperature <= max`
///
/// A missing point temperature is the mean of the bounds (or whichever bound
/// exists). Bounds that do not bracket the point temperature are widened.
fn resolve_temperatures(raw: &RawObservation) -> (f64, f64, f64) {
    let temperature = raw
        .temperature
        .or(match (raw.temperature_min, raw.temperature_max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (min, max) => min.or(max),
        })
        .unwrap_or(0.0);

    let min = raw.temperature_min.map_or(temperature, |m| m.min(temperature));
    let max = raw.temperature_max.map_or(temperature, |m| m.max(temperature));
    (temperature, min, max)
}

/// Parse a provider timestamp; `None` when missing or unparseable
pub fn parse_timestamp(timestamp: &RawTimestamp) -> Option<DateTime<Utc>> {
    match timestamp {
        RawTimestamp::Unix(seconds) => DateTime::from_timestamp(*seconds, 0),
        RawTimestamp::DateTime(text) => parse_datetime(text).or_else(|| parse_date(text)),
        RawTimestamp::Date(text) => parse_date(text).or_else(|| parse_datetime(text)),
        RawTimestamp::Missing => None,
    }
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_naive_datetime(text).map(|naive| naive.and_utc())
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    parse_naive_date(text).map(|naive| naive.and_utc())
}

fn parse_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn parse_naive_date(text: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Date and time of day as the provider wrote them, ignoring any offset
fn provider_local(timestamp: &RawTimestamp) -> Option<NaiveDateTime> {
    match timestamp {
        RawTimestamp::Unix(seconds) => {
            DateTime::from_timestamp(*seconds, 0).map(|dt| dt.naive_utc())
        },
        RawTimestamp::DateTime(text) | RawTimestamp::Date(text) => {
            let text = text.trim();
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
                .or_else(|| parse_naive_datetime(text))
                .or_else(|| parse_naive_date(text))
        },
        RawTimestamp::Missing => None,
    }
}

/// Collapse forecast periods to one per calendar date
///
/// Entries are grouped by their calendar date as written by the provider
/// (an offset, if any, is not applied), in input order. The first entry of a
/// date is kept unless a later entry of the same date falls at 12:00, which
/// replaces it. At most `limit` dates are returned, ascending. Entries with a
/// missing or unparseable timestamp are dated `now`.
pub fn select_daily_entries(
    entries: &[RawObservation],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&RawObservation> {
    let mut by_date: BTreeMap<NaiveDate, &RawObservation> = BTreeMap::new();

    for entry in entries {
        let at = provider_local(&entry.timestamp).unwrap_or_else(|| now.naive_utc());
        let date = at.date();
        if at.hour() == PREFERRED_HOUR || !by_date.contains_key(&date) {
            by_date.insert(date, entry);
        }
    }

    by_date.into_values().take(limit).collect()
}
