//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, WeatherQuery};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation not supported by browser";
pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Unable to retrieve your location";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Input =====
        Action::QueryChange(query) => {
            state.query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let city = state.query.trim();
            if city.is_empty() {
                fail_locally(state, EMPTY_QUERY_MESSAGE);
                return DispatchResult::changed();
            }
            let query = WeatherQuery::City(city.to_string());
            start_request(state, query)
        }

        // ===== Location =====
        Action::LocateRequest => {
            if !state.geolocation_available {
                fail_locally(state, GEOLOCATION_UNSUPPORTED_MESSAGE);
                return DispatchResult::changed();
            }
            state.request_seq += 1;
            state.locating = true;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::Locate {
                seq: state.request_seq,
            })
        }

        Action::LocateDidResolve { seq, coords } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            start_request(state, WeatherQuery::Coordinates(coords))
        }

        Action::LocateDidFail { seq } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.locating = false;
            state.weather = DataResource::Failed(LOCATION_UNAVAILABLE_MESSAGE.into());
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::WeatherRefresh => match state.last_query.clone() {
            Some(query) => start_request(state, query),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { seq, snapshot } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(snapshot);
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, message } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Enter `Loading` for a fresh generation and ask for the fetch.
fn start_request(state: &mut AppState, query: WeatherQuery) -> DispatchResult<Effect> {
    state.request_seq += 1;
    state.locating = false;
    state.weather = DataResource::Loading;
    state.last_query = Some(query.clone());
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchWeather {
        seq: state.request_seq,
        query,
    })
}

/// A failure decided without any I/O. Bumping the generation keeps an
/// in-flight result from overwriting it.
fn fail_locally(state: &mut AppState, message: &str) {
    state.request_seq += 1;
    state.locating = false;
    state.weather = DataResource::Failed(message.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Coordinates, WeatherSnapshot};

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            name: Some(name.into()),
            temperature: Some(21.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_change_is_verbatim() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::QueryChange("  Pune ".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.query, "  Pune ");
    }

    #[test]
    fn test_submit_trims_and_fetches() {
        let mut state = AppState::default().with_query("  Pune ");
        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(result.changed);
        assert!(state.is_loading());
        assert_eq!(state.query, "  Pune ", "query survives the search");
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(
            &result.effects[0],
            Effect::FetchWeather { seq: 1, query: WeatherQuery::City(city) } if city == "Pune"
        ));
    }

    #[test]
    fn test_submit_whitespace_fails_without_effect() {
        let mut state = AppState::default().with_query(" \t ");
        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.weather.error(), Some(EMPTY_QUERY_MESSAGE));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_locate_without_geolocation() {
        let mut state = AppState::new(false);
        let result = reducer(&mut state, Action::LocateRequest);

        assert!(result.effects.is_empty());
        assert!(!state.locating);
        assert_eq!(state.weather.error(), Some(GEOLOCATION_UNSUPPORTED_MESSAGE));
    }

    #[test]
    fn test_locate_then_fetch_by_coordinates() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LocateRequest);
        assert!(state.locating);
        assert!(matches!(result.effects[0], Effect::Locate { seq: 1 }));

        let coords = Coordinates {
            lat: 18.52,
            lon: 73.86,
        };
        let result = reducer(&mut state, Action::LocateDidResolve { seq: 1, coords });

        assert!(!state.locating);
        assert!(state.is_loading());
        assert!(matches!(
            &result.effects[0],
            Effect::FetchWeather { seq: 2, query: WeatherQuery::Coordinates(c) } if *c == coords
        ));
    }

    #[test]
    fn test_locate_failure_message() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LocateRequest);
        reducer(&mut state, Action::LocateDidFail { seq: 1 });

        assert!(!state.locating);
        assert_eq!(state.weather.error(), Some(LOCATION_UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut state = AppState::default().with_query("Pune");
        reducer(&mut state, Action::SearchSubmit);
        state.query = "Oslo".into();
        reducer(&mut state, Action::SearchSubmit);

        // The Pune response settles after the Oslo request started
        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                snapshot: snapshot("Pune"),
            },
        );
        assert!(!result.changed);
        assert!(state.is_loading());

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 2,
                snapshot: snapshot("Oslo"),
            },
        );
        assert_eq!(
            state.weather.data().and_then(|s| s.name.as_deref()),
            Some("Oslo")
        );
    }

    #[test]
    fn test_validation_error_supersedes_in_flight_request() {
        let mut state = AppState::default().with_query("Pune");
        reducer(&mut state, Action::SearchSubmit);
        state.query.clear();
        reducer(&mut state, Action::SearchSubmit);

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                snapshot: snapshot("Pune"),
            },
        );
        assert!(!result.changed);
        assert_eq!(state.weather.error(), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_refresh_reissues_last_query() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::WeatherRefresh);
        assert!(!result.changed);

        state.query = "Pune".into();
        reducer(&mut state, Action::SearchSubmit);
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                snapshot: snapshot("Pune"),
            },
        );
        state.query = "something else".into();

        let result = reducer(&mut state, Action::WeatherRefresh);
        assert!(state.is_loading());
        assert!(matches!(
            &result.effects[0],
            Effect::FetchWeather { seq: 2, query: WeatherQuery::City(city) } if city == "Pune"
        ));
    }

    #[test]
    fn test_tick_only_while_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.locating = true;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);

        state.locating = false;
        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 2);
    }
}
