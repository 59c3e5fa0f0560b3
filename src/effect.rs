//! Effects - side effects declared by the reducer
//!
//! The flow functions below are what the runtime spawns for each effect.
//! They always settle into exactly one result action, so the outcome can
//! never stay stuck in `Loading`.

use crate::action::Action;
use crate::api::WeatherClient;
use crate::geolocation::Geolocator;
use crate::state::WeatherQuery;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current weather for a city or a position
    FetchWeather { seq: u64, query: WeatherQuery },
    /// Look up the device position
    Locate { seq: u64 },
}

/// Run a weather request and turn the result into its settling action.
pub async fn fetch_weather(client: &WeatherClient, seq: u64, query: WeatherQuery) -> Action {
    match client.fetch(&query).await {
        Ok(snapshot) => {
            tracing::info!(seq, place = ?snapshot.place(), "weather loaded");
            Action::WeatherDidLoad { seq, snapshot }
        }
        Err(err) => {
            tracing::warn!(seq, error = %err, "weather request failed");
            Action::WeatherDidError {
                seq,
                message: err.user_message(&query),
            }
        }
    }
}

/// Ask the geolocation provider for the current position.
///
/// A missing provider settles as a failed lookup.
pub async fn locate(geolocator: Option<&dyn Geolocator>, seq: u64) -> Action {
    let Some(geolocator) = geolocator else {
        tracing::warn!(seq, "locate requested without a geolocation provider");
        return Action::LocateDidFail { seq };
    };
    match geolocator.current_position().await {
        Ok(coords) => {
            tracing::info!(seq, lat = coords.lat, lon = coords.lon, "position resolved");
            Action::LocateDidResolve { seq, coords }
        }
        Err(err) => {
            tracing::warn!(seq, error = %err, "position lookup failed");
            Action::LocateDidFail { seq }
        }
    }
}
