//! Display locale value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Language used for condition descriptions and user-facing messages
///
/// English is the base language: every lookup table has an English entry,
/// other locales fall back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (base)
    #[default]
    En,
    /// Farsi
    Fa,
}

impl Locale {
    /// All supported locales
    pub const ALL: [Self; 2] = [Self::En, Self::Fa];

    /// ISO 639-1 code, as sent to upstream `language`/`lang` parameters
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fa => "fa",
        }
    }

    /// Whether this is the base language of the lookup tables
    #[must_use]
    pub const fn is_base(&self) -> bool {
        matches!(self, Self::En)
    }

    /// Lenient parse of a language tag such as `fa-IR`; unknown tags map to English
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" => Ok(Self::En),
            "fa" => Ok(Self::Fa),
            _ => Err(DomainError::UnsupportedLocale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primary_subtag() {
        assert_eq!("en".parse::<Locale>().ok(), Some(Locale::En));
        assert_eq!("en-US".parse::<Locale>().ok(), Some(Locale::En));
        assert_eq!("fa_IR".parse::<Locale>().ok(), Some(Locale::Fa));
        assert_eq!("FA".parse::<Locale>().ok(), Some(Locale::Fa));
    }

    #[test]
    fn rejects_unknown_tags() {
        assert!("de".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn from_tag_falls_back_to_english() {
        assert_eq!(Locale::from_tag("de-DE"), Locale::En);
        assert_eq!(Locale::from_tag("fa"), Locale::Fa);
    }

    #[test]
    fn base_locale() {
        assert!(Locale::En.is_base());
        assert!(!Locale::Fa.is_base());
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Locale::Fa.to_string(), "fa");
        assert_eq!(Locale::En.code(), "en");
    }
}
