pub mod app_view;
pub mod place_selector;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_view::{AppView, AppViewProps};
pub use place_selector::{PlaceButton, PlaceSelector, PlaceSelectorProps, render_buttons};
pub use weather_panel::{ERROR_ICON, WeatherPanelView, WeatherPanelViewProps};
