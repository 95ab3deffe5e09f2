//! Weather code translation
//!
//! Maps provider condition codes to [`NormalizedCondition`]s. The tables are
//! immutable and built once on first use. Descriptions for locales other than
//! English come from a secondary table keyed by `(code, locale)`; a missing
//! entry falls back to the English text. Codes missing from the primary table
//! translate to [`NormalizedCondition::unknown`].

use std::collections::HashMap;
use std::sync::LazyLock;

use domain::{ConditionCode, IconKey, Locale, NormalizedCondition};

/// Default base for icon URLs
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy)]
struct ConditionInfo {
    icon: IconKey,
    main: &'static str,
    description: &'static str,
}

const fn info(icon: IconKey, main: &'static str, description: &'static str) -> ConditionInfo {
    ConditionInfo {
        icon,
        main,
        description,
    }
}

/// WMO weather interpretation codes as reported by Open-Meteo
const WMO_CONDITIONS: &[(u16, ConditionInfo)] = &[
    (0, info(IconKey::ClearSky, "Clear", "Clear sky")),
    (1, info(IconKey::FewClouds, "Mainly clear", "Mainly clear")),
    (2, info(IconKey::ScatteredClouds, "Partly cloudy", "Partly cloudy")),
    (3, info(IconKey::BrokenClouds, "Overcast", "Overcast")),
    (45, info(IconKey::Mist, "Fog", "Fog")),
    (48, info(IconKey::Mist, "Depositing rime fog", "Depositing rime fog")),
    (51, info(IconKey::ShowerRain, "Drizzle", "Light drizzle")),
    (53, info(IconKey::ShowerRain, "Drizzle", "Moderate drizzle")),
    (55, info(IconKey::ShowerRain, "Drizzle", "Dense drizzle")),
    (56, info(IconKey::Snow, "Freezing Drizzle", "Freezing drizzle")),
    (57, info(IconKey::Snow, "Freezing Drizzle", "Dense freezing drizzle")),
    (61, info(IconKey::Rain, "Rain", "Slight rain")),
    (63, info(IconKey::Rain, "Rain", "Moderate rain")),
    (65, info(IconKey::Rain, "Rain", "Heavy rain")),
    (66, info(IconKey::Snow, "Freezing Rain", "Light freezing rain")),
    (67, info(IconKey::Snow, "Freezing Rain", "Heavy freezing rain")),
    (71, info(IconKey::Snow, "Snow", "Slight snow fall")),
    (73, info(IconKey::Snow, "Snow", "Moderate snow fall")),
    (75, info(IconKey::Snow, "Snow", "Heavy snow fall")),
    (77, info(IconKey::Snow, "Snow grains", "Snow grains")),
    (80, info(IconKey::ShowerRain, "Rain showers", "Slight rain showers")),
    (81, info(IconKey::ShowerRain, "Rain showers", "Moderate rain showers")),
    (82, info(IconKey::ShowerRain, "Rain showers", "Violent rain showers")),
    (85, info(IconKey::Snow, "Snow showers", "Slight snow showers")),
    (86, info(IconKey::Snow, "Snow showers", "Heavy snow showers")),
    (95, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm")),
    (96, info(IconKey::Thunderstorm, "Thunderstorm with hail", "Thunderstorm with slight hail")),
    (99, info(IconKey::Thunderstorm, "Thunderstorm with hail", "Thunderstorm with heavy hail")),
];

/// OpenWeatherMap condition ids
const OPEN_WEATHER_CONDITIONS: &[(u16, ConditionInfo)] = &[
    (200, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with light rain")),
    (201, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with rain")),
    (202, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with heavy rain")),
    (210, info(IconKey::Thunderstorm, "Thunderstorm", "Light thunderstorm")),
    (211, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm")),
    (212, info(IconKey::Thunderstorm, "Thunderstorm", "Heavy thunderstorm")),
    (221, info(IconKey::Thunderstorm, "Thunderstorm", "Ragged thunderstorm")),
    (230, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with light drizzle")),
    (231, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with drizzle")),
    (232, info(IconKey::Thunderstorm, "Thunderstorm", "Thunderstorm with heavy drizzle")),
    (300, info(IconKey::ShowerRain, "Drizzle", "Light intensity drizzle")),
    (301, info(IconKey::ShowerRain, "Drizzle", "Drizzle")),
    (302, info(IconKey::ShowerRain, "Drizzle", "Heavy intensity drizzle")),
    (310, info(IconKey::ShowerRain, "Drizzle", "Light intensity drizzle rain")),
    (311, info(IconKey::ShowerRain, "Drizzle", "Drizzle rain")),
    (312, info(IconKey::ShowerRain, "Drizzle", "Heavy intensity drizzle rain")),
    (313, info(IconKey::ShowerRain, "Drizzle", "Shower rain and drizzle")),
    (314, info(IconKey::ShowerRain, "Drizzle", "Heavy shower rain and drizzle")),
    (321, info(IconKey::ShowerRain, "Drizzle", "Shower drizzle")),
    (500, info(IconKey::Rain, "Rain", "Light rain")),
    (501, info(IconKey::Rain, "Rain", "Moderate rain")),
    (502, info(IconKey::Rain, "Rain", "Heavy intensity rain")),
    (503, info(IconKey::Rain, "Rain", "Very heavy rain")),
    (504, info(IconKey::Rain, "Rain", "Extreme rain")),
    (511, info(IconKey::Snow, "Rain", "Freezing rain")),
    (520, info(IconKey::ShowerRain, "Rain", "Light intensity shower rain")),
    (521, info(IconKey::ShowerRain, "Rain", "Shower rain")),
    (522, info(IconKey::ShowerRain, "Rain", "Heavy intensity shower rain")),
    (531, info(IconKey::ShowerRain, "Rain", "Ragged shower rain")),
    (600, info(IconKey::Snow, "Snow", "Light snow")),
    (601, info(IconKey::Snow, "Snow", "Snow")),
    (602, info(IconKey::Snow, "Snow", "Heavy snow")),
    (611, info(IconKey::Snow, "Snow", "Sleet")),
    (612, info(IconKey::Snow, "Snow", "Light shower sleet")),
    (613, info(IconKey::Snow, "Snow", "Shower sleet")),
    (615, info(IconKey::Snow, "Snow", "Light rain and snow")),
    (616, info(IconKey::Snow, "Snow", "Rain and snow")),
    (620, info(IconKey::Snow, "Snow", "Light shower snow")),
    (621, info(IconKey::Snow, "Snow", "Shower snow")),
    (622, info(IconKey::Snow, "Snow", "Heavy shower snow")),
    (701, info(IconKey::Mist, "Mist", "Mist")),
    (711, info(IconKey::Mist, "Smoke", "Smoke")),
    (721, info(IconKey::Mist, "Haze", "Haze")),
    (731, info(IconKey::Mist, "Dust", "Sand/dust whirls")),
    (741, info(IconKey::Mist, "Fog", "Fog")),
    (751, info(IconKey::Mist, "Sand", "Sand")),
    (761, info(IconKey::Mist, "Dust", "Dust")),
    (762, info(IconKey::Mist, "Ash", "Volcanic ash")),
    (771, info(IconKey::Mist, "Squall", "Squalls")),
    (781, info(IconKey::Mist, "Tornado", "Tornado")),
    (800, info(IconKey::ClearSky, "Clear", "Clear sky")),
    (801, info(IconKey::FewClouds, "Clouds", "Few clouds")),
    (802, info(IconKey::ScatteredClouds, "Clouds", "Scattered clouds")),
    (803, info(IconKey::BrokenClouds, "Clouds", "Broken clouds")),
    (804, info(IconKey::BrokenClouds, "Clouds", "Overcast clouds")),
];

const WMO_FARSI: &[(u16, &str)] = &[
    (0, "آسمان صاف"),
    (1, "نیمه‌آسمان صاف"),
    (2, "کمی ابری"),
    (3, "پوشیده از ابر"),
    (45, "مه"),
    (48, "مه همراه با یخ"),
    (51, "نم نم باران"),
    (53, "باران نم نم"),
    (55, "باران شدید"),
    (56, "نم نم یخبندان"),
    (57, "یخبندان شدید"),
    (61, "باران خفیف"),
    (63, "باران متوسط"),
    (65, "باران سنگین"),
    (66, "باران یخی خفیف"),
    (67, "باران یخی سنگین"),
    (71, "برف خفیف"),
    (73, "برف متوسط"),
    (75, "برف سنگین"),
    (77, "ذرات برف"),
    (80, "رگبار خفیف"),
    (81, "رگبار متوسط"),
    (82, "رگبار شدید"),
    (85, "بارش برف خفیف"),
    (86, "بارش برف سنگین"),
    (95, "طوفان همراه با رعد و برق"),
    (96, "طوفان با تگرگ خفیف"),
    (99, "طوفان با تگرگ شدید"),
];

const OPEN_WEATHER_FARSI: &[(u16, &str)] = &[
    (211, "طوفان همراه با رعد و برق"),
    (300, "نم نم باران"),
    (500, "باران خفیف"),
    (501, "باران متوسط"),
    (502, "باران شدید"),
    (521, "رگبار"),
    (600, "برف خفیف"),
    (601, "برف"),
    (602, "برف سنگین"),
    (701, "مه رقیق"),
    (721, "غبار"),
    (741, "مه"),
    (800, "آسمان صاف"),
    (801, "کمی ابری"),
    (802, "ابرهای پراکنده"),
    (803, "نیمه ابری"),
    (804, "پوشیده از ابر"),
];

/// Immutable condition lookup tables
#[derive(Debug)]
pub struct ConditionCatalog {
    conditions: HashMap<ConditionCode, ConditionInfo>,
    localized: HashMap<(ConditionCode, Locale), &'static str>,
}

static CATALOG: LazyLock<ConditionCatalog> = LazyLock::new(ConditionCatalog::build);

impl ConditionCatalog {
    fn build() -> Self {
        let conditions = WMO_CONDITIONS
            .iter()
            .map(|&(code, info)| (ConditionCode::Wmo(code), info))
            .chain(
                OPEN_WEATHER_CONDITIONS
                    .iter()
                    .map(|&(code, info)| (ConditionCode::OpenWeather(code), info)),
            )
            .collect();

        let localized = WMO_FARSI
            .iter()
            .map(|&(code, text)| ((ConditionCode::Wmo(code), Locale::Fa), text))
            .chain(
                OPEN_WEATHER_FARSI
                    .iter()
                    .map(|&(code, text)| ((ConditionCode::OpenWeather(code), Locale::Fa), text)),
            )
            .collect();

        Self {
            conditions,
            localized,
        }
    }

    /// The process-wide catalog
    pub fn global() -> &'static Self {
        &CATALOG
    }

    /// Whether the primary table knows `code`
    #[must_use]
    pub fn contains(&self, code: ConditionCode) -> bool {
        self.conditions.contains_key(&code)
    }

    /// Translate a provider code; never fails
    #[must_use]
    pub fn translate(&self, code: ConditionCode, locale: Locale) -> NormalizedCondition {
        let Some(info) = self.conditions.get(&code) else {
            return NormalizedCondition::unknown();
        };

        let description = if locale.is_base() {
            info.description
        } else {
            self.localized
                .get(&(code, locale))
                .copied()
                .unwrap_or(info.description)
        };

        NormalizedCondition {
            icon_key: info.icon,
            main_category: info.main.to_string(),
            description: description.to_string(),
        }
    }
}

/// Translate a provider code with the global catalog
#[must_use]
pub fn translate(code: ConditionCode, locale: Locale) -> NormalizedCondition {
    ConditionCatalog::global().translate(code, locale)
}

/// URL of the icon image for `icon`
#[must_use]
pub fn resolve_icon_url(icon: IconKey) -> String {
    resolve_icon_url_with_base(DEFAULT_ICON_BASE_URL, icon)
}

/// URL of the icon image for `icon` under a custom base
#[must_use]
pub fn resolve_icon_url_with_base(base: &str, icon: IconKey) -> String {
    format!("{}/{}@4x.png", base.trim_end_matches('/'), icon.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wmo_clear_codes() {
        let clear = translate(ConditionCode::Wmo(0), Locale::En);
        assert_eq!(clear.icon_key, IconKey::ClearSky);
        assert_eq!(clear.main_category, "Clear");
        assert_eq!(clear.description, "Clear sky");

        let mainly = translate(ConditionCode::Wmo(1), Locale::En);
        assert_eq!(mainly.icon_key, IconKey::FewClouds);
        assert_eq!(mainly.main_category, "Mainly clear");
    }

    #[test]
    fn wmo_precipitation_codes() {
        assert_eq!(translate(ConditionCode::Wmo(61), Locale::En).icon_key, IconKey::Rain);
        assert_eq!(translate(ConditionCode::Wmo(80), Locale::En).icon_key, IconKey::ShowerRain);
        assert_eq!(translate(ConditionCode::Wmo(75), Locale::En).icon_key, IconKey::Snow);
        assert_eq!(
            translate(ConditionCode::Wmo(99), Locale::En).main_category,
            "Thunderstorm with hail"
        );
    }

    #[test]
    fn open_weather_codes() {
        let clouds = translate(ConditionCode::OpenWeather(803), Locale::En);
        assert_eq!(clouds.icon_key, IconKey::BrokenClouds);
        assert_eq!(clouds.main_category, "Clouds");
        assert_eq!(clouds.description, "Broken clouds");

        let fog = translate(ConditionCode::OpenWeather(741), Locale::En);
        assert_eq!(fog.icon_key, IconKey::Mist);
    }

    #[test]
    fn farsi_description_for_wmo() {
        let rain = translate(ConditionCode::Wmo(63), Locale::Fa);
        assert_eq!(rain.description, "باران متوسط");
        assert_eq!(rain.main_category, "Rain");
    }

    #[test]
    fn farsi_falls_back_to_english() {
        assert!(!CATALOG.localized.contains_key(&(ConditionCode::OpenWeather(762), Locale::Fa)));
        let ash = translate(ConditionCode::OpenWeather(762), Locale::Fa);
        assert_eq!(ash.description, "Volcanic ash");
    }

    #[test]
    fn unknown_code_falls_back() {
        for code in [ConditionCode::Wmo(4), ConditionCode::OpenWeather(999)] {
            for locale in Locale::ALL {
                let condition = translate(code, locale);
                assert_eq!(condition, NormalizedCondition::unknown());
            }
        }
    }

    #[test]
    fn wmo_and_open_weather_namespaces_are_separate() {
        // 800 is a valid OpenWeatherMap id but not a WMO code
        assert!(translate(ConditionCode::Wmo(800), Locale::En).is_unknown());
        assert!(!translate(ConditionCode::OpenWeather(800), Locale::En).is_unknown());
    }

    #[test]
    fn every_wmo_code_has_farsi_text() {
        for &(code, _) in WMO_CONDITIONS {
            assert!(
                CATALOG.localized.contains_key(&(ConditionCode::Wmo(code), Locale::Fa)),
                "missing Farsi text for WMO {code}"
            );
        }
    }

    #[test]
    fn localized_table_only_references_known_codes() {
        for (code, _) in CATALOG.localized.keys() {
            assert!(CATALOG.contains(*code), "orphan localized entry {code}");
        }
    }

    #[test]
    fn icon_url_template() {
        assert_eq!(
            resolve_icon_url(IconKey::ClearSky),
            "https://openweathermap.org/img/wn/01d@4x.png"
        );
        assert_eq!(
            resolve_icon_url_with_base("http://localhost/icons/", IconKey::Mist),
            "http://localhost/icons/50d@4x.png"
        );
    }

    #[test]
    fn icon_url_total_and_distinct() {
        let mut urls: Vec<String> = IconKey::ALL.into_iter().map(resolve_icon_url).collect();
        assert!(urls.iter().all(|u| u.starts_with("https://") && u.ends_with("@4x.png")));
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), IconKey::ALL.len());
    }

    #[test]
    fn fallback_icon_resolves() {
        let url = resolve_icon_url(NormalizedCondition::unknown().icon_key);
        assert_eq!(url, "https://openweathermap.org/img/wn/03d@4x.png");
    }

    proptest! {
        #[test]
        fn translate_is_total(code in any::<u16>(), owm in any::<bool>(), fa in any::<bool>()) {
            let code = if owm { ConditionCode::OpenWeather(code) } else { ConditionCode::Wmo(code) };
            let locale = if fa { Locale::Fa } else { Locale::En };
            let condition = translate(code, locale);
            prop_assert!(!condition.main_category.is_empty());
            prop_assert!(!condition.description.is_empty());
            prop_assert!(resolve_icon_url(condition.icon_key).ends_with("@4x.png"));
        }

        #[test]
        fn translate_is_deterministic(code in any::<u16>()) {
            let a = translate(ConditionCode::Wmo(code), Locale::En);
            let b = translate(ConditionCode::Wmo(code), Locale::En);
            prop_assert_eq!(a, b);
        }
    }
}
