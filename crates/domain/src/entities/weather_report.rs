//! Combined current + forecast result

use serde::{Deserialize, Serialize};

use super::{ForecastSeries, WeatherSnapshot};

/// Current conditions together with the forecast for the same request
///
/// Only ever built once both halves are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub forecast: ForecastSeries,
}

impl WeatherReport {
    #[must_use]
    pub const fn new(snapshot: WeatherSnapshot, forecast: ForecastSeries) -> Self {
        Self { snapshot, forecast }
    }
}
