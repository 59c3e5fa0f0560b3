//! Command line and environment configuration

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::action::Action;
use crate::api::DEFAULT_ENDPOINT;
use crate::geolocation::{DEFAULT_IP_ENDPOINT, GeolocationMode};
use crate::state::Coordinates;

/// Weather card - current weather for a city or your location
#[derive(Parser, Debug)]
#[command(name = "weather-card")]
#[command(about = "Current weather for a city or your location, in the terminal")]
pub struct Cli {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// City to search for on startup
    #[arg(long, short)]
    pub city: Option<String>,

    /// Current-weather endpoint
    #[arg(long, env = "OPENWEATHER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// How "use my location" finds the device position
    #[arg(long, value_enum, default_value = "ip")]
    pub geolocation: GeolocationMode,

    /// Fixed latitude for "use my location" (needs --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Fixed longitude for "use my location" (needs --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, env = "WEATHER_CARD_LOG")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing OpenWeatherMap API key (pass --api-key or set OPENWEATHER_API_KEY)")]
    MissingApiKey,
    #[error("invalid coordinates {lat}, {lon}: latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

/// API credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where "use my location" gets its answer from
#[derive(Clone, Debug, PartialEq)]
pub enum GeolocationSource {
    Disabled,
    Ip { endpoint: String },
    Fixed(Coordinates),
}

/// Validated runtime configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: ApiKey,
    pub endpoint: String,
    pub geolocation: GeolocationSource,
    pub initial_city: Option<String>,
    pub log_file: PathBuf,
}

impl Config {
    /// Validate parsed arguments. The debug flags are left to the caller.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ApiKey::new)
            .ok_or(ConfigError::MissingApiKey)?;

        let geolocation = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    return Err(ConfigError::InvalidCoordinates { lat, lon });
                }
                GeolocationSource::Fixed(Coordinates { lat, lon })
            }
            _ => match cli.geolocation {
                GeolocationMode::Off => GeolocationSource::Disabled,
                GeolocationMode::Ip => GeolocationSource::Ip {
                    endpoint: DEFAULT_IP_ENDPOINT.to_string(),
                },
            },
        };

        let initial_city = cli
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string);

        let log_file = cli
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("weather-card.log"));

        Ok(Self {
            api_key,
            endpoint: cli.endpoint.clone(),
            geolocation,
            initial_city,
            log_file,
        })
    }
}

impl Config {
    /// `--city` searches on startup, unless the state came from a saved
    /// debug snapshot.
    pub fn startup_action(&self, fresh_state: bool) -> Option<Action> {
        match (&self.initial_city, fresh_state) {
            (Some(_), true) => Some(Action::SearchSubmit),
            _ => None,
        }
    }
}
