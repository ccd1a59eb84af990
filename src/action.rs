//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::state::{PanelId, WeatherRecord};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Place category =====
    /// Select the place at this catalog index
    PlaceSelect(usize),

    /// Select the next place (wraps)
    PlaceNext,

    /// Select the previous place (wraps)
    PlacePrev,

    // ===== Weather category =====
    /// Intent: start the live panel's fetch if it has not started yet
    WeatherFetch,

    /// Result: fetch for `panel` succeeded
    WeatherDidLoad {
        panel: PanelId,
        record: WeatherRecord,
    },

    /// Result: fetch for `panel` failed
    WeatherDidError { panel: PanelId, error: FetchError },

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
