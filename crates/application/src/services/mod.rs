//! Application services - Use case implementations

pub mod condition_translator;
pub mod normalizer;
mod weather_service;

pub use condition_translator::{
    ConditionCatalog, DEFAULT_ICON_BASE_URL, resolve_icon_url, resolve_icon_url_with_base,
    translate,
};
pub use normalizer::{
    Clock, FixedClock, Normalizer, SystemClock, parse_timestamp, select_daily_entries,
};
pub use weather_service::{WeatherService, WeatherServiceConfig};
