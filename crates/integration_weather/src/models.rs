//! Wire models for the upstream APIs
//!
//! Fields the providers may omit are `Option` or `#[serde(default)]` so a
//! sparse response still decodes; interpretation happens in the adapters.

/// Open-Meteo forecast API (`/v1/forecast`)
pub mod open_meteo {
    use serde::Deserialize;

    /// Response to a forecast request
    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastResponse {
        pub latitude: f64,
        pub longitude: f64,
        #[serde(default)]
        pub current_weather: Option<CurrentWeather>,
        #[serde(default)]
        pub daily: Option<DailySeries>,
        #[serde(default)]
        pub hourly: Option<HourlySeries>,
    }

    /// `current_weather` block
    #[derive(Debug, Clone, Deserialize)]
    pub struct CurrentWeather {
        pub temperature: f64,
        #[serde(default)]
        pub windspeed: Option<f64>,
        #[serde(default)]
        pub winddirection: Option<f64>,
        #[serde(default)]
        pub weathercode: Option<u16>,
        /// e.g. `2024-01-15T12:00`
        #[serde(default)]
        pub time: Option<String>,
    }

    /// Column-oriented daily aggregates
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default)]
    pub struct DailySeries {
        pub time: Vec<String>,
        pub temperature_2m_max: Vec<Option<f64>>,
        pub temperature_2m_min: Vec<Option<f64>>,
        pub weathercode: Vec<Option<u16>>,
        pub sunrise: Vec<Option<String>>,
        pub sunset: Vec<Option<String>>,
    }

    /// Column-oriented hourly values
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default)]
    pub struct HourlySeries {
        pub time: Vec<String>,
        pub apparent_temperature: Vec<Option<f64>>,
        pub temperature_2m: Vec<Option<f64>>,
        pub weathercode: Vec<Option<u16>>,
    }

    impl DailySeries {
        /// Maximum temperature of day `index`
        #[must_use]
        pub fn max_at(&self, index: usize) -> Option<f64> {
            self.temperature_2m_max.get(index).copied().flatten()
        }

        /// Minimum temperature of day `index`
        #[must_use]
        pub fn min_at(&self, index: usize) -> Option<f64> {
            self.temperature_2m_min.get(index).copied().flatten()
        }

        #[must_use]
        pub fn code_at(&self, index: usize) -> Option<u16> {
            self.weathercode.get(index).copied().flatten()
        }

        #[must_use]
        pub fn sunrise_at(&self, index: usize) -> Option<&str> {
            self.sunrise.get(index).and_then(Option::as_deref)
        }

        #[must_use]
        pub fn sunset_at(&self, index: usize) -> Option<&str> {
            self.sunset.get(index).and_then(Option::as_deref)
        }
    }

    impl HourlySeries {
        /// Apparent temperature of the hour whose time string equals `time`
        #[must_use]
        pub fn apparent_temperature_at(&self, time: &str) -> Option<f64> {
            let index = self.time.iter().position(|t| t == time)?;
            self.apparent_temperature.get(index).copied().flatten()
        }
    }
}

/// OpenWeatherMap API (`/data/2.5/weather`, `/data/2.5/forecast`)
pub mod open_weather {
    use serde::Deserialize;

    /// Response to `/weather`
    #[derive(Debug, Clone, Deserialize)]
    pub struct CurrentResponse {
        #[serde(default)]
        pub coord: Option<Coord>,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub main: MainReadings,
        #[serde(default)]
        pub visibility: Option<u32>,
        #[serde(default)]
        pub wind: Option<Wind>,
        #[serde(default)]
        pub clouds: Option<Clouds>,
        pub dt: i64,
        #[serde(default)]
        pub sys: Option<Sys>,
        #[serde(default)]
        pub id: Option<u64>,
        #[serde(default)]
        pub name: Option<String>,
    }

    /// Response to `/forecast` (3-hourly periods)
    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastItem>,
        #[serde(default)]
        pub city: Option<City>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainReadings,
        #[serde(default)]
        pub weather: Vec<Condition>,
        #[serde(default)]
        pub clouds: Option<Clouds>,
        #[serde(default)]
        pub wind: Option<Wind>,
        #[serde(default)]
        pub visibility: Option<u32>,
        /// Provider-local `YYYY-MM-DD HH:MM:SS`
        #[serde(default)]
        pub dt_txt: Option<String>,
    }

    #[derive(Debug, Clone, Copy, Deserialize)]
    pub struct Coord {
        pub lon: f64,
        pub lat: f64,
    }

    /// One entry of the `weather` array
    #[derive(Debug, Clone, Deserialize)]
    pub struct Condition {
        pub id: u16,
        #[serde(default)]
        pub main: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub icon: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MainReadings {
        pub temp: Option<f64>,
        #[serde(default)]
        pub feels_like: Option<f64>,
        #[serde(default)]
        pub temp_min: Option<f64>,
        #[serde(default)]
        pub temp_max: Option<f64>,
        #[serde(default)]
        pub pressure: Option<f64>,
        #[serde(default)]
        pub humidity: Option<u8>,
    }

    #[derive(Debug, Clone, Copy, Default, Deserialize)]
    #[serde(default)]
    pub struct Wind {
        pub speed: Option<f64>,
        pub deg: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, Default, Deserialize)]
    #[serde(default)]
    pub struct Clouds {
        pub all: Option<u8>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default)]
    pub struct Sys {
        pub country: Option<String>,
        pub sunrise: Option<i64>,
        pub sunset: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct City {
        #[serde(default)]
        pub id: Option<u64>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub country: Option<String>,
        #[serde(default)]
        pub coord: Option<Coord>,
        #[serde(default)]
        pub sunrise: Option<i64>,
        #[serde(default)]
        pub sunset: Option<i64>,
    }
}

/// Open-Meteo geocoding API (`/v1/search`)
pub mod geocoding {
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct SearchResponse {
        /// Absent entirely when nothing matched
        #[serde(default)]
        pub results: Option<Vec<Place>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Place {
        #[serde(default)]
        pub id: Option<u64>,
        pub name: String,
        #[serde(default)]
        pub country: Option<String>,
        pub latitude: f64,
        pub longitude: f64,
    }
}
