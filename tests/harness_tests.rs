//! Store, component and render flows on EffectStoreTestHarness

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{EventKind, NumericComponentId};
use weather_card::{
    action::Action,
    components::{Component, Shell, ShellProps, WeatherPanel, WeatherPanelProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Coordinates, WeatherQuery, WeatherSnapshot},
};

fn mock_snapshot(name: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        name: Some(name.into()),
        country: Some("IN".into()),
        temperature: Some(30.2),
        description: Some("clear sky".into()),
        ..Default::default()
    }
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_search_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default().with_query("Pune"), reducer);

    harness.dispatch_collect(Action::SearchSubmit);
    harness.assert_state(|s| s.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { seq: 1, query: WeatherQuery::City(c) } if c == "Pune"),
    );

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        snapshot: mock_snapshot("Pune"),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1);
    assert_eq!(changed, 1);
    harness.assert_state(|s| !s.is_loading());
    harness.assert_state(|s| s.weather.data().and_then(|w| w.name.as_deref()) == Some("Pune"));
}

#[test]
fn test_loading_clears_on_every_settlement() {
    let settlements = [
        Action::WeatherDidLoad {
            seq: 1,
            snapshot: mock_snapshot("Pune"),
        },
        Action::WeatherDidError {
            seq: 1,
            message: "City not found".into(),
        },
        Action::WeatherDidError {
            seq: 1,
            message: "error decoding response body".into(),
        },
    ];

    for settlement in settlements {
        let mut harness =
            EffectStoreTestHarness::new(AppState::default().with_query("Pune"), reducer);
        harness.dispatch_collect(Action::SearchSubmit);
        harness.assert_state(|s| s.is_loading());

        harness.complete_action(settlement);
        harness.process_emitted();
        harness.assert_state(|s| !s.is_loading());
    }
}

#[test]
fn test_location_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocateRequest);
    harness.assert_state(|s| s.locating);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::Locate { seq: 1 }));

    let coords = Coordinates {
        lat: 18.52,
        lon: 73.86,
    };
    harness.complete_action(Action::LocateDidResolve { seq: 1, coords });
    harness.process_emitted();

    harness.assert_state(|s| !s.locating && s.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchWeather { seq: 2, query: WeatherQuery::Coordinates(c) } if c.lat == 18.52)
    });

    harness.complete_action(Action::WeatherDidError {
        seq: 2,
        message: "Unable to fetch weather for location".into(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.weather.error() == Some("Unable to fetch weather for location"));
}

#[test]
fn test_superseded_responses_are_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default().with_query("Pune"), reducer);

    harness.dispatch_collect(Action::SearchSubmit);
    harness.dispatch_collect(Action::QueryChange("Oslo".into()));
    harness.dispatch_collect(Action::SearchSubmit);

    // Oslo settles first, the older Pune response last
    harness.complete_action(Action::WeatherDidLoad {
        seq: 2,
        snapshot: mock_snapshot("Oslo"),
    });
    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        snapshot: mock_snapshot("Pune"),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "only the current generation applies");
    harness.assert_state(|s| s.weather.data().and_then(|w| w.name.as_deref()) == Some("Oslo"));
}

#[test]
fn test_query_survives_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::QueryChange("Pu".into()),
        Action::QueryChange("Pune".into()),
        Action::SearchSubmit,
    ]);
    assert_eq!(results, vec![true, true, true]);

    harness.complete_action(Action::WeatherDidError {
        seq: 1,
        message: "City not found".into(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.query == "Pune");
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_triggers_search() {
    let state = AppState::default().with_query("Pune");
    let mut harness = EffectStoreTestHarness::new(state.clone(), reducer);
    let mut component = WeatherPanel::new();

    let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let actions: Vec<_> = component
        .handle_event(
            &enter,
            WeatherPanelProps {
                state: &state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    actions.assert_first(Action::SearchSubmit);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.is_loading());
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchWeather { .. }));
}

#[test]
fn test_keyboard_typing_updates_query() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherPanel::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("x", |state, event| {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.query == "x");
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_follows_outcome() {
    let mut harness = EffectStoreTestHarness::new(AppState::default().with_query("Pune"), reducer);
    let mut shell = Shell::new();

    harness.dispatch_collect(Action::SearchSubmit);
    let loading = harness.render_plain(60, 24, |frame, area, state| {
        shell.render(
            frame,
            area,
            ShellProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(loading.contains("Loading..."), "{}", loading);

    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        snapshot: mock_snapshot("Pune"),
    });
    harness.process_emitted();
    let loaded = harness.render_plain(60, 24, |frame, area, state| {
        shell.render(
            frame,
            area,
            ShellProps {
                state,
                is_focused: true,
            },
        );
    });
    assert!(!loaded.contains("Loading..."));
    assert!(loaded.contains("Pune, IN"), "{}", loaded);
}

// ============================================================================
// Effect Assertions Tests
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.drain_effects().effects_empty();

    // Refresh before any request does nothing
    harness.dispatch_collect(Action::WeatherRefresh);
    harness.drain_effects().effects_empty();

    harness.dispatch_collect(Action::QueryChange("Pune".into()));
    harness.dispatch_collect(Action::SearchSubmit);
    harness.drain_effects().effects_count(1);

    harness.dispatch_collect(Action::WeatherRefresh);
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_all_match(|e| matches!(e, Effect::FetchWeather { seq: 2, .. }));
    effects.effects_none_match(|e| matches!(e, Effect::Locate { .. }));
}
