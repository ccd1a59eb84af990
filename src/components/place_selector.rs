use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::catalog::PlaceCatalog;

/// One clickable place control
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceButton<'a> {
    pub index: usize,
    pub label: &'a str,
    pub is_selected: bool,
    action: Action,
}

impl PlaceButton<'_> {
    /// The action this button dispatches when pressed
    pub fn activate(&self) -> Action {
        self.action.clone()
    }

    fn width(&self) -> u16 {
        self.label.chars().count() as u16 + 4
    }
}

/// One button per place, in catalog order
pub fn render_buttons(
    places: &PlaceCatalog,
    selected: usize,
    on_select: fn(usize) -> Action,
) -> Vec<PlaceButton<'_>> {
    places
        .iter()
        .enumerate()
        .map(|(index, place)| PlaceButton {
            index,
            label: &place.name,
            is_selected: index == selected,
            action: on_select(index),
        })
        .collect()
}

pub struct PlaceSelectorProps<'a> {
    pub places: &'a PlaceCatalog,
    pub selected: usize,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

/// Row of place buttons.
#[derive(Default)]
pub struct PlaceSelector {
    /// Button areas from the last render, for mouse hit testing
    button_areas: Vec<Rect>,
}

impl PlaceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit(&self, column: u16, row: u16) -> Option<usize> {
        self.button_areas.iter().position(|area| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        })
    }
}

impl Component<Action> for PlaceSelector {
    type Props<'a> = PlaceSelectorProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let buttons = render_buttons(props.places, props.selected, props.on_select);
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    buttons.get(index).map(PlaceButton::activate)
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::PlaceNext),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Some(Action::PlacePrev),
                _ => None,
            },
            EventKind::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .hit(mouse.column, mouse.row)
                    .and_then(|index| buttons.get(index))
                    .map(PlaceButton::activate),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let buttons = render_buttons(props.places, props.selected, props.on_select);
        let chunks = Layout::horizontal(buttons.iter().map(|b| Constraint::Length(b.width())))
            .spacing(1)
            .flex(Flex::Center)
            .split(area);

        for (button, chunk) in buttons.iter().zip(chunks.iter()) {
            let (text_style, border_style) = if button.is_selected {
                (
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Cyan),
                )
            } else {
                (
                    Style::default().fg(Color::Gray),
                    Style::default().fg(Color::DarkGray),
                )
            };
            let widget = Paragraph::new(Line::styled(button.label, text_style).centered())
                .block(Block::bordered().border_style(border_style));
            frame.render_widget(widget, *chunk);
        }

        self.button_areas = chunks.to_vec();
    }
}
