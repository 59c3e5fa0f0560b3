//! Weather card - current weather for a city or your location
//!
//! The library holds the state machine, API client and views; the binary
//! wires them to the terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod conditions;
pub mod config;
pub mod effect;
pub mod geolocation;
pub mod logging;
pub mod reducer;
pub mod state;
