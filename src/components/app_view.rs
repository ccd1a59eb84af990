use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, PlaceSelector, PlaceSelectorProps, WeatherPanelView, WeatherPanelViewProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for AppView - read-only view of state
pub struct AppViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Selector row on top, the live weather panel below
#[derive(Default)]
pub struct AppView {
    selector: PlaceSelector,
}

impl AppView {
    pub fn new() -> Self {
        Self::default()
    }

    fn selector_props<'a>(state: &'a AppState, is_focused: bool) -> PlaceSelectorProps<'a> {
        PlaceSelectorProps {
            places: &state.places,
            selected: state.selected,
            is_focused,
            on_select: Action::PlaceSelect,
        }
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return vec![Action::Quit];
            }
        }

        self.selector
            .handle_event(event, Self::selector_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: AppViewProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Place buttons
            Constraint::Min(1),    // Weather panel
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        self.selector.render(
            frame,
            chunks[0],
            Self::selector_props(state, props.is_focused),
        );

        let mut panel = WeatherPanelView;
        panel.render(
            frame,
            chunks[1],
            WeatherPanelViewProps {
                panel: &state.panel,
                place: state.selected_place(),
                units: state.units,
                tick_count: state.tick_count,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("1-9", "place"),
                    StatusBarHint::new("←/→", "switch"),
                    StatusBarHint::new("click", "select"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
