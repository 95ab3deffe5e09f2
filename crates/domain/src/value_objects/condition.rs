//! Weather condition value objects
//!
//! Provider condition codes go in, a provider-independent
//! [`NormalizedCondition`] comes out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-specific identifier of a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "provider", content = "code", rename_all = "snake_case")]
pub enum ConditionCode {
    /// WMO weather interpretation code (Open-Meteo)
    Wmo(u16),
    /// OpenWeatherMap condition id
    OpenWeather(u16),
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wmo(code) => write!(f, "wmo:{code}"),
            Self::OpenWeather(code) => write!(f, "owm:{code}"),
        }
    }
}

/// Icon identifier shared by every provider
///
/// Serialized as the icon code used in icon URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKey {
    #[serde(rename = "01d")]
    ClearSky,
    #[serde(rename = "02d")]
    FewClouds,
    #[serde(rename = "03d")]
    ScatteredClouds,
    #[serde(rename = "04d")]
    BrokenClouds,
    #[serde(rename = "09d")]
    ShowerRain,
    #[serde(rename = "10d")]
    Rain,
    #[serde(rename = "11d")]
    Thunderstorm,
    #[serde(rename = "13d")]
    Snow,
    #[serde(rename = "50d")]
    Mist,
}

impl IconKey {
    /// Every icon key
    pub const ALL: [Self; 9] = [
        Self::ClearSky,
        Self::FewClouds,
        Self::ScatteredClouds,
        Self::BrokenClouds,
        Self::ShowerRain,
        Self::Rain,
        Self::Thunderstorm,
        Self::Snow,
        Self::Mist,
    ];

    /// Icon used for conditions no table knows about
    pub const GENERIC_CLOUD: Self = Self::ScatteredClouds;

    /// Icon code, e.g. `"01d"`
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ClearSky => "01d",
            Self::FewClouds => "02d",
            Self::ScatteredClouds => "03d",
            Self::BrokenClouds => "04d",
            Self::ShowerRain => "09d",
            Self::Rain => "10d",
            Self::Thunderstorm => "11d",
            Self::Snow => "13d",
            Self::Mist => "50d",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Provider-independent weather condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCondition {
    /// Icon to display
    pub icon_key: IconKey,
    /// Short category in the base language (e.g. "Mainly clear")
    pub main_category: String,
    /// Description in the requested locale
    pub description: String,
}

impl NormalizedCondition {
    /// Category reported for codes missing from every table
    pub const UNKNOWN_CATEGORY: &'static str = "Unknown";

    /// The fallback condition for unrecognized codes
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            icon_key: IconKey::GENERIC_CLOUD,
            main_category: Self::UNKNOWN_CATEGORY.to_string(),
            description: Self::UNKNOWN_CATEGORY.to_string(),
        }
    }

    /// Whether this is the fallback condition
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.main_category == Self::UNKNOWN_CATEGORY
    }
}

impl fmt::Display for NormalizedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
