//! Localized user-facing failure messages

use domain::Locale;

/// Failure texts shown to users when a weather request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMessage {
    /// Anything that is not a geocoding miss
    Generic,
    /// The city could not be geocoded
    CityNotFound,
}

/// Text for a failure in the given locale
#[must_use]
pub const fn failure_message(kind: FailureMessage, locale: Locale) -> &'static str {
    match (kind, locale) {
        (FailureMessage::Generic, Locale::En) => "Failed to load weather data. Please try again.",
        (FailureMessage::Generic, Locale::Fa) => "خطا در بارگذاری اطلاعات. لطفا دوباره تلاش کنید.",
        (FailureMessage::CityNotFound, Locale::En) => "City not found. Please try another search.",
        (FailureMessage::CityNotFound, Locale::Fa) => "شهر یافت نشد. لطفا دوباره جستجو کنید.",
    }
}
