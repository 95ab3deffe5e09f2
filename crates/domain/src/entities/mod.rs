//! Entities - the normalized weather schema handed to consumers

mod forecast;
mod weather_report;
mod weather_snapshot;

pub use forecast::{ForecastEntry, ForecastSeries, MAX_FORECAST_DAYS};
pub use weather_report::WeatherReport;
pub use weather_snapshot::{DEFAULT_VISIBILITY_M, WeatherSnapshot, unix_to_datetime};
