//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, PanelId};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Place actions =====
        Action::PlaceSelect(index) => select_place(state, index),

        Action::PlaceNext => {
            let len = state.places.len();
            if len < 2 {
                return DispatchResult::unchanged();
            }
            select_place(state, (state.selected + 1) % len)
        }

        Action::PlacePrev => {
            let len = state.places.len();
            if len < 2 {
                return DispatchResult::unchanged();
            }
            select_place(state, (state.selected + len - 1) % len)
        }

        // ===== Weather actions =====
        Action::WeatherFetch => match state.panel.start_fetch() {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { panel, record } => {
            if !is_live(state, panel) {
                return DispatchResult::unchanged();
            }
            if state.panel.apply_loaded(record) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::WeatherDidError { panel, error } => {
            if !is_live(state, panel) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(code = state.panel.code(), %error, "weather fetch failed");
            if state.panel.apply_failed(error.to_string()) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.panel.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Same index keeps the live panel; anything out of range is ignored.
fn select_place(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if index == state.selected || index >= state.places.len() {
        return DispatchResult::unchanged();
    }

    let effect = state.select(index);
    if let Some(place) = state.selected_place() {
        tracing::info!(index, place = %place.name, code = %place.code, "place selected");
    }

    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

fn is_live(state: &AppState, panel: PanelId) -> bool {
    if state.panel.id() == panel {
        return true;
    }
    tracing::debug!(
        stale = panel.0,
        live = state.panel.id().0,
        "dropping result for a discarded panel"
    );
    false
}
