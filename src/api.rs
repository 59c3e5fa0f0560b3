//! OpenWeatherMap current-weather client

use serde::Deserialize;

use crate::config::ApiKey;
use crate::state::{WeatherQuery, WeatherSnapshot};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found";
pub const LOCATION_WEATHER_MESSAGE: &str = "Unable to fetch weather for location";
pub const FETCH_FALLBACK_MESSAGE: &str = "Error fetching weather";

// ============================================================================
// Errors
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Any non-2xx status; the body is not inspected
    #[error("weather service responded with {status}")]
    Upstream { status: reqwest::StatusCode },
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Request URLs carry the key, so they never make it into messages.
    fn transport(err: reqwest::Error) -> Self {
        ApiError::Transport(err.without_url())
    }

    /// The text shown to the user when `query` fails with this error.
    pub fn user_message(&self, query: &WeatherQuery) -> String {
        match self {
            ApiError::Upstream { .. } => match query {
                WeatherQuery::City(_) => CITY_NOT_FOUND_MESSAGE.to_string(),
                WeatherQuery::Coordinates(_) => LOCATION_WEATHER_MESSAGE.to_string(),
            },
            other => message_or_fallback(other.to_string()),
        }
    }
}

/// Blank error text is replaced by the generic fetch failure message.
fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FETCH_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

// ============================================================================
// Response schema (only what gets rendered)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentWeatherResponse {
    name: Option<String>,
    sys: Option<SysBlock>,
    weather: Option<Vec<ConditionBlock>>,
    main: Option<MainBlock>,
    wind: Option<WindBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SysBlock {
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConditionBlock {
    icon: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MainBlock {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WindBlock {
    speed: Option<f64>,
}

impl From<CurrentWeatherResponse> for WeatherSnapshot {
    fn from(response: CurrentWeatherResponse) -> Self {
        let condition = response
            .weather
            .and_then(|conditions| conditions.into_iter().next())
            .unwrap_or_default();
        let main = response.main.unwrap_or_default();
        WeatherSnapshot {
            name: response.name,
            country: response.sys.and_then(|sys| sys.country),
            temperature: main.temp,
            feels_like: main.feels_like,
            description: condition.description,
            icon: condition.icon,
            humidity: main.humidity,
            wind_speed: response.wind.and_then(|wind| wind.speed),
        }
    }
}

/// Parse a current-weather response body.
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, ApiError> {
    let response: CurrentWeatherResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl WeatherClient {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Full request URL, metric units always.
    pub fn request_url(&self, query: &WeatherQuery) -> String {
        let key = urlencoding::encode(self.api_key.expose());
        match query {
            WeatherQuery::City(city) => format!(
                "{}?q={}&appid={}&units=metric",
                self.endpoint,
                urlencoding::encode(city),
                key
            ),
            WeatherQuery::Coordinates(coords) => format!(
                "{}?lat={}&lon={}&appid={}&units=metric",
                self.endpoint, coords.lat, coords.lon, key
            ),
        }
    }

    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, ?query, "requesting current weather");

        let response = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Upstream { status });
        }

        let body = response.text().await.map_err(ApiError::transport)?;
        parse_snapshot(&body)
    }
}
