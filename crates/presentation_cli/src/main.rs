//! Weather CLI
//!
//! Command-line front end for the weather core: fetches current conditions
//! and the daily forecast, or translates a single condition code.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use application::{WeatherService, resolve_icon_url_with_base, translate};
use clap::{Parser, Subcommand};
use domain::{ConditionCode, Locale, WeatherReport};
use infrastructure::{AppConfig, ProviderKind, build_weather_service, init_tracing};
use serde::Serialize;
use tracing::debug;

/// Weather CLI
#[derive(Debug, Parser)]
#[command(name = "weather-cli")]
#[command(author, version, about = "Current weather and daily forecast", long_about = None)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print a plain-text summary instead of JSON
    #[arg(short, long, global = true)]
    summary: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Current conditions and forecast for a city
    Weather {
        /// City name, e.g. "Tokyo"
        city: String,

        /// Language for descriptions and messages (en, fa)
        #[arg(short, long)]
        lang: Option<Locale>,

        /// Override the configured provider (open-meteo, open-weather)
        #[arg(short, long)]
        provider: Option<ProviderKind>,
    },

    /// Current conditions and forecast for coordinates, without geocoding
    Coords {
        /// Latitude (-90 to 90)
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude (-180 to 180)
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Language for descriptions and messages (en, fa)
        #[arg(short, long)]
        lang: Option<Locale>,

        /// Override the configured provider (open-meteo, open-weather)
        #[arg(short, long)]
        provider: Option<ProviderKind>,
    },

    /// Normalized condition and icon URL for a provider condition code
    ///
    /// Codes are WMO codes for open-meteo and condition ids for open-weather.
    Icon {
        /// Provider condition code, e.g. 61 or 803
        code: u16,

        /// Language for the description (en, fa)
        #[arg(short, long)]
        lang: Option<Locale>,

        /// Code family (open-meteo, open-weather)
        #[arg(short, long)]
        provider: Option<ProviderKind>,
    },
}

/// JSON printed for weather requests
#[derive(Debug, Serialize)]
struct WeatherOutput<'a> {
    provider: &'static str,
    locale: Locale,
    icon_url: String,
    #[serde(flatten)]
    report: &'a WeatherReport,
}

/// Determine log filter override from verbosity count
///
/// Without `-v` the configured level applies.
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Condition code of the given provider family
const fn condition_code(provider: ProviderKind, code: u16) -> ConditionCode {
    match provider {
        ProviderKind::OpenMeteo => ConditionCode::Wmo(code),
        ProviderKind::OpenWeather => ConditionCode::OpenWeather(code),
    }
}

fn service_for(
    config: &AppConfig,
    provider: Option<ProviderKind>,
) -> anyhow::Result<WeatherService> {
    let mut config = config.clone();
    if let Some(kind) = provider {
        config.provider.kind = kind;
    }
    build_weather_service(&config).context("Failed to build weather service")
}

/// One line for the current conditions, then one per forecast day
fn summary_lines(report: &WeatherReport) -> Vec<String> {
    let snapshot = &report.snapshot;
    let mut lines = vec![snapshot.summary()];
    if let Some(observed) = snapshot.observed_at() {
        lines.push(format!("Observed {}", observed.format("%Y-%m-%d %H:%M UTC")));
    }
    lines.extend(report.forecast.entries.iter().map(|entry| {
        let day = entry
            .observed_at()
            .map_or_else(|| "----------".to_string(), |d| d.format("%Y-%m-%d").to_string());
        format!("{day}  {}", entry.summary())
    }));
    lines
}

fn print_report(
    service: &WeatherService,
    locale: Locale,
    report: &WeatherReport,
    summary: bool,
) -> anyhow::Result<()> {
    if summary {
        for line in summary_lines(report) {
            println!("{line}");
        }
        return Ok(());
    }

    let output = WeatherOutput {
        provider: service.provider_name(),
        locale,
        icon_url: service.icon_url(report.snapshot.condition.icon_key),
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.telemetry, log_filter_from_verbosity(cli.verbose))?;
    debug!(?cli, "Parsed arguments");

    match cli.command {
        Commands::Weather {
            city,
            lang,
            provider,
        } => {
            let service = service_for(&config, provider)?;
            let locale = lang.unwrap_or(service.config().default_locale);
            let report = service.get_weather_and_forecast(&city, locale).await?;
            print_report(&service, locale, &report, cli.summary)?;
        },

        Commands::Coords {
            latitude,
            longitude,
            lang,
            provider,
        } => {
            let service = service_for(&config, provider)?;
            let locale = lang.unwrap_or(service.config().default_locale);
            let report = service
                .get_weather_and_forecast_by_coords(latitude, longitude, locale)
                .await?;
            print_report(&service, locale, &report, cli.summary)?;
        },

        Commands::Icon {
            code,
            lang,
            provider,
        } => {
            let kind = provider.unwrap_or(config.provider.kind);
            let locale = lang.unwrap_or(config.service.default_locale);
            let condition = translate(condition_code(kind, code), locale);
            let output = serde_json::json!({
                "code": condition_code(kind, code),
                "condition": condition,
                "icon_url": resolve_icon_url_with_base(&config.service.icon_base_url, condition.icon_key),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        },
    }

    Ok(())
}
