//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::api::ICON_BASE_URL;
use crate::catalog::{Place, PlaceCatalog};
use crate::effect::Effect;

/// Normalized weather snapshot for one location at fetch time
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherRecord {
    pub condition_name: String,
    pub location_name: String,
    pub icon_id: String,
    pub description: Option<String>,
    pub temp_current: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub wind_speed: f64,
}

impl WeatherRecord {
    pub fn icon_url(&self) -> String {
        format!("{}/{}.png", ICON_BASE_URL, self.icon_id)
    }
}

/// Measurement system requested from the provider
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
    Standard,
}

impl UnitSystem {
    pub fn query_value(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
            UnitSystem::Standard => "standard",
        }
    }

    pub fn format_temp(&self, value: f64) -> String {
        match self {
            UnitSystem::Imperial => format!("{}°F", value),
            UnitSystem::Metric => format!("{}°C", value),
            UnitSystem::Standard => format!("{} K", value),
        }
    }

    pub fn format_speed(&self, value: f64) -> String {
        match self {
            UnitSystem::Imperial => format!("{} mi/hr", value),
            UnitSystem::Metric | UnitSystem::Standard => format!("{} m/s", value),
        }
    }
}

/// Identity of one weather panel instance
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    JsonSchema,
)]
pub struct PanelId(pub u64);

impl PanelId {
    pub fn next(self) -> Self {
        PanelId(self.0.wrapping_add(1))
    }
}

/// Weather for exactly one location code.
///
/// A panel never changes its code. Showing another place means building a
/// new panel with a fresh [`PanelId`]; results tagged with an older id are
/// dropped by the reducer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherPanel {
    id: PanelId,
    place_index: usize,
    code: String,
    /// Runtime-only; a restored panel that is still loading fetches again
    #[serde(skip)]
    fetch_started: bool,
    weather: DataResource<WeatherRecord>,
}

impl WeatherPanel {
    pub fn new(id: PanelId, place_index: usize, place: &Place) -> Self {
        Self {
            id,
            place_index,
            code: place.code.clone(),
            fetch_started: false,
            weather: DataResource::Loading,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn place_index(&self) -> usize {
        self.place_index
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fetch_started(&self) -> bool {
        self.fetch_started
    }

    pub fn weather(&self) -> &DataResource<WeatherRecord> {
        &self.weather
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    /// The fetch effect for this panel; only the first call while loading
    /// yields one.
    pub fn start_fetch(&mut self) -> Option<Effect> {
        if self.fetch_started || !self.weather.is_loading() {
            return None;
        }
        self.fetch_started = true;
        Some(Effect::FetchWeather {
            panel: self.id,
            code: self.code.clone(),
        })
    }

    /// Returns false if the panel had already settled
    pub fn apply_loaded(&mut self, record: WeatherRecord) -> bool {
        if !self.weather.is_loading() {
            return false;
        }
        self.weather = DataResource::Loaded(record);
        true
    }

    /// Returns false if the panel had already settled
    pub fn apply_failed(&mut self, message: String) -> bool {
        if !self.weather.is_loading() {
            return false;
        }
        self.weather = DataResource::Failed(message);
        true
    }
}

/// Spinner frame interval while a panel is loading
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Places", label = "Catalog", debug_fmt)]
    pub places: PlaceCatalog,

    /// Always a valid index into `places`
    #[debug(section = "Places", label = "Selected")]
    pub selected: usize,

    /// The one live panel, keyed to `selected`
    #[debug(section = "Weather", label = "Panel", debug_fmt)]
    pub panel: WeatherPanel,

    #[debug(section = "Weather", label = "Units", debug_fmt)]
    pub units: UnitSystem,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Build state showing `selected`; returns `None` if the index is out
    /// of range for the catalog.
    pub fn new(places: PlaceCatalog, selected: usize, units: UnitSystem) -> Option<Self> {
        let place = places.get(selected)?;
        let panel = WeatherPanel::new(PanelId::default(), selected, place);
        Some(Self {
            places,
            selected,
            panel,
            units,
            tick_count: 0,
        })
    }

    pub fn selected_place(&self) -> Option<&Place> {
        self.places.get(self.selected)
    }

    /// Rebuild the panel when it does not show `selected`, as after loading
    /// a partial snapshot. An out-of-range `selected` falls back to 0.
    /// Returns true if the panel was replaced.
    pub fn reconcile_panel(&mut self) -> bool {
        if self.selected >= self.places.len() {
            self.selected = 0;
        }
        let Some(place) = self.places.get(self.selected) else {
            return false;
        };
        if self.panel.place_index() == self.selected && self.panel.code() == place.code {
            return false;
        }

        let id = self.panel.id().next();
        self.panel = WeatherPanel::new(id, self.selected, place);
        self.tick_count = 0;
        true
    }

    /// Replace the live panel with a new one for `index`
    pub fn select(&mut self, index: usize) -> Option<Effect> {
        let place = self.places.get(index)?;
        let id = self.panel.id().next();
        self.selected = index;
        self.panel = WeatherPanel::new(id, index, place);
        self.tick_count = 0;
        self.panel.start_fetch()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlaceCatalog::builtin(), 0, UnitSystem::default())
            .expect("builtin catalog is not empty")
    }
}
