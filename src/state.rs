//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Base URL for OpenWeatherMap condition icons.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Spinner timing while a request or location lookup is outstanding.
pub const SPINNER_TICK_MS: u64 = 100;
pub const HEADER_ANIM_CYCLE_TICKS: u32 = 20;

/// A point on the globe, in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What a weather request is parameterized by
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherQuery {
    /// Free-text city name, already trimmed
    City(String),
    /// Device (or configured) position
    Coordinates(Coordinates),
}

/// The subset of the current-weather response that gets rendered.
///
/// Every field is optional; anything missing is not shown.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub name: Option<String>,
    pub country: Option<String>,
    /// Degrees Celsius (metric units are always requested)
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub description: Option<String>,
    /// OpenWeatherMap icon id, e.g. `01d`
    pub icon: Option<String>,
    /// Relative humidity, percent
    pub humidity: Option<f64>,
    /// Metres per second
    pub wind_speed: Option<f64>,
}

impl WeatherSnapshot {
    /// `"Pune, IN"`, or just the name when the country code is absent.
    pub fn place(&self) -> Option<String> {
        match (&self.name, &self.country) {
            (Some(name), Some(country)) if !country.is_empty() => {
                Some(format!("{}, {}", name, country))
            }
            (Some(name), _) => Some(name.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }

    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_deref()
            .map(|icon| format!("{}/{}@2x.png", ICON_BASE_URL, icon))
    }
}

/// Round half-up the way the display expects (`30.5 -> 31`, `-2.5 -> -2`).
///
/// Going through `i64` folds `-0` into `0`.
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_celsius(value: f64) -> String {
    format!("{}°C", round_display(value))
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Input ---
    /// City name as typed; never cleared by a search
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    // --- Outcome ---
    /// Request outcome: Empty (idle) → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Outcome", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Generation of the live request; results tagged with anything else are stale
    #[debug(section = "Weather", label = "Generation")]
    pub request_seq: u64,

    /// Last request issued, re-run by refresh
    #[debug(section = "Weather", label = "Last query", debug_fmt)]
    pub last_query: Option<WeatherQuery>,

    // --- Location ---
    /// Whether a geolocation provider is configured
    #[debug(section = "Location", label = "Available")]
    pub geolocation_available: bool,

    /// A position lookup is outstanding
    #[debug(section = "Location", label = "Locating")]
    pub locating: bool,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(geolocation_available: bool) -> Self {
        Self {
            query: String::new(),
            weather: DataResource::Empty,
            request_seq: 0,
            last_query: None,
            geolocation_available,
            locating: false,
            tick_count: 0,
        }
    }

    /// Pre-fill the query box, e.g. from `--city`.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    /// Anything outstanding that should keep the spinner running
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.locating
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.request_seq
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true)
    }
}
