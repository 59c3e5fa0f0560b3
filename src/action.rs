//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Coordinates, WeatherSnapshot};

/// Application actions with automatic category inference
///
/// Async results carry the request generation (`seq`) they were started under.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// Query text changed (replaced verbatim)
    QueryChange(String),

    // ===== Search category =====
    /// Submit the current query as a city search
    SearchSubmit,

    // ===== Locate category =====
    /// Look up the device position, then fetch weather for it
    LocateRequest,

    /// Result: position obtained
    LocateDidResolve { seq: u64, coords: Coordinates },

    /// Result: position lookup denied or failed
    LocateDidFail { seq: u64 },

    // ===== Weather category =====
    /// Re-run the last issued request
    WeatherRefresh,

    /// Result: snapshot loaded
    WeatherDidLoad { seq: u64, snapshot: WeatherSnapshot },

    /// Result: request failed, message is user-facing
    WeatherDidError { seq: u64, message: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement etc.)
    Render,

    /// Spinner / header animation tick
    Tick,

    /// Exit the application
    Quit,
}
