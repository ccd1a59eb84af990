//! Store + effect flow tests using EffectStoreTestHarness
//!
//! Async fetches are simulated by queueing their result actions.

use cityweather::{
    action::Action,
    api::{FetchError, parse_weather},
    components::{AppView, AppViewProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AppState, PanelId},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

const CLOUDS_BODY: &str = r#"{
    "weather": [{"main": "Clouds", "icon": "02d"}],
    "main": {"temp": 70, "temp_max": 75, "temp_min": 65},
    "wind": {"speed": 5},
    "name": "Palo Alto"
}"#;

#[test]
fn test_fetch_flow_loads_record() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.panel.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { panel: PanelId(0), code } if code == "94303"),
    );

    let record = parse_weather(CLOUDS_BODY).unwrap();
    harness.complete_action(Action::WeatherDidLoad {
        panel: PanelId(0),
        record,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| {
        let record = s.panel.weather().data().unwrap();
        record.condition_name == "Clouds"
            && record.location_name == "Palo Alto"
            && record.temp_current == 70.0
            && record.temp_max == 75.0
            && record.temp_min == 65.0
            && record.wind_speed == 5.0
            && record.icon_url().contains("02d")
    });
}

#[test]
fn test_stale_response_not_applied() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.dispatch_collect(Action::PlaceSelect(1));

    let effects = harness.drain_effects();
    effects.effects_count(2);

    // Index 0's response arrives after the switch
    harness.complete_action(Action::WeatherDidLoad {
        panel: PanelId(0),
        record: parse_weather(CLOUDS_BODY).unwrap(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (0, 1));

    harness.assert_state(|s| s.selected == 1);
    harness.assert_state(|s| s.panel.code() == "94088");
    harness.assert_state(|s| s.panel.is_loading());
    harness.assert_state(|s| s.panel.id() == PanelId(1));
}

#[test]
fn test_stale_error_not_applied() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.dispatch_collect(Action::PlaceNext);

    harness.complete_action(Action::WeatherDidError {
        panel: PanelId(0),
        error: FetchError::Network("timed out".into()),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.panel.is_loading());
}

#[test]
fn test_restored_snapshot_refetches() {
    let mut in_flight = AppState::default();
    let started = reducer(&mut in_flight, Action::WeatherFetch);
    assert_eq!(started.effects.len(), 1);

    let json = serde_json::to_string(&in_flight).unwrap();
    let restored: AppState = serde_json::from_str(&json).unwrap();

    let mut harness = EffectStoreTestHarness::new(restored, reducer);
    harness.assert_state(|s| s.panel.is_loading());
    let results = harness.dispatch_all([Action::WeatherFetch]);
    assert_eq!(results, vec![true]);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { panel: PanelId(0), code } if code == "94303"),
    );
}

#[test]
fn test_partial_snapshot_gets_matching_panel() {
    let mut state: AppState = serde_json::from_str(r#"{"selected": 3}"#).unwrap();
    state.reconcile_panel();

    let mut harness = EffectStoreTestHarness::new(state, reducer);
    harness.assert_state(|s| s.panel.place_index() == s.selected);
    harness.dispatch_collect(Action::WeatherFetch);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchWeather { code, .. } if code == "96803"));
}

#[test]
fn test_network_failure_shows_error() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.complete_action(Action::WeatherDidError {
        panel: PanelId(0),
        error: FetchError::Network("connection refused".into()),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.panel.weather().is_failed());
    harness.assert_state(|s| {
        s.panel.weather().error() == Some("request failed: connection refused")
    });
}

#[test]
fn test_reselect_after_failure_is_noop() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.complete_action(Action::WeatherDidError {
        panel: PanelId(0),
        error: FetchError::HttpStatus { status: 500 },
    });
    harness.process_emitted();
    harness.drain_effects();

    let results = harness.dispatch_all([Action::PlaceSelect(0), Action::WeatherFetch]);
    assert_eq!(results, vec![false, false]);
    harness.drain_effects().effects_empty();
}

#[test]
fn test_selection_cycle_results() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::PlaceNext,
        Action::PlaceNext,
        Action::PlacePrev,
        Action::PlaceSelect(1),
    ]);

    // The last select targets the already-selected index
    assert_eq!(results, vec![true, true, true, false]);
    harness.assert_state(|s| s.selected == 1);

    let effects = harness.drain_effects();
    effects.effects_count(3);
    effects.effects_all_match(|e| matches!(e, Effect::FetchWeather { .. }));
}

#[test]
fn test_keyboard_selects_and_fetches() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut view = AppView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("3", |state, event| {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::PlaceSelect(2));

    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.panel.code() == "95062");
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchWeather { code, .. } if code == "95062"));
}

#[test]
fn test_render_after_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut view = AppView::new();

    harness.dispatch_collect(Action::WeatherFetch);
    harness.complete_action(Action::WeatherDidLoad {
        panel: PanelId(0),
        record: parse_weather(CLOUDS_BODY).unwrap(),
    });
    harness.process_emitted();

    let output = harness.render_plain(80, 24, |frame, area, state| {
        let props = AppViewProps {
            state,
            is_focused: true,
        };
        view.render(frame, area, props);
    });

    assert!(output.contains("Clouds in Palo Alto"), "output:\n{}", output);
    assert!(output.contains("Current: 70°F"), "output:\n{}", output);
    assert!(output.contains("Wind Speed: 5 mi/hr"), "output:\n{}", output);
}
