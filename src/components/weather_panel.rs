use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::catalog::Place;
use crate::state::{SPINNER_FRAMES, UnitSystem, WeatherPanel, WeatherRecord};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Rows for the FIGlet location name (terminus is 6 tall).
const HEADER_CAP: u16 = 6;

pub struct WeatherPanelView;

pub struct WeatherPanelViewProps<'a> {
    pub panel: &'a WeatherPanel,
    pub place: Option<&'a Place>,
    pub units: UnitSystem,
    pub tick_count: u32,
}

impl Component<Action> for WeatherPanelView {
    type Props<'a> = WeatherPanelViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.panel.weather() {
            DataResource::Loaded(record) => render_loaded(frame, area, record, props.units),
            DataResource::Failed(error) => render_error(frame, area, &props, error),
            DataResource::Loading | DataResource::Empty => render_loading(frame, area, &props),
        }
    }
}

fn place_label(props: &WeatherPanelViewProps<'_>) -> String {
    match props.place {
        Some(place) => format!("{} ({})", place.name, place.code),
        None => props.panel.code().to_string(),
    }
}

fn render_loading(frame: &mut Frame, area: Rect, props: &WeatherPanelViewProps<'_>) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let spinner = SPINNER_FRAMES[props.tick_count as usize % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::styled(" Loading", Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);

    let target = Line::from(Span::styled(
        place_label(props),
        Style::default().fg(Color::DarkGray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(target), chunks[1]);
}

fn render_loaded(frame: &mut Frame, area: Rect, record: &WeatherRecord, units: UnitSystem) {
    let chunks = Layout::vertical([
        Constraint::Max(HEADER_CAP), // FIGlet location
        Constraint::Length(1),       // blank
        Constraint::Length(1),       // condition
        Constraint::Length(1),       // icon url
        Constraint::Length(1),       // blank
        Constraint::Length(1),       // current
        Constraint::Length(1),       // high
        Constraint::Length(1),       // low
        Constraint::Length(1),       // wind
    ])
    .flex(Flex::Center)
    .split(area);

    if chunks[0].height > 0 {
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(to_celsius(record.temp_current, units)));
        frame.render_widget(ArtBox::new(&renderer, &record.location_name), chunks[0]);
    }

    let mut spans = vec![
        Span::raw(icon_glyph(&record.icon_id)),
        Span::raw(" "),
        Span::styled(record.condition_name.clone(), Style::default().bold()),
        Span::raw(format!(" in {}", record.location_name)),
    ];
    if let Some(description) = &record.description {
        spans.push(Span::styled(
            format!(" ({description})"),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).centered(), chunks[2]);

    let icon = Line::from(Span::styled(
        record.icon_url(),
        Style::default().fg(Color::DarkGray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(icon), chunks[3]);

    let rows = [
        ("Current", units.format_temp(record.temp_current)),
        ("High", units.format_temp(record.temp_max)),
        ("Low", units.format_temp(record.temp_min)),
        ("Wind Speed", units.format_speed(record.wind_speed)),
    ];
    for ((label, value), chunk) in rows.into_iter().zip(chunks[5..].iter()) {
        let line = Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), *chunk);
    }
}

fn render_error(frame: &mut Frame, area: Rect, props: &WeatherPanelViewProps<'_>, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // target
    ])
    .flex(Flex::Center)
    .split(area);

    let title = Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold()));
    let message = Line::from(Span::styled(
        error.to_string(),
        Style::default().fg(Color::Rgb(200, 100, 100)),
    ));
    let target = Line::from(Span::styled(
        format!("No weather for {}", place_label(props)),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(ERROR_ICON).centered(), chunks[0]);
    frame.render_widget(Paragraph::new(title).centered(), chunks[1]);
    frame.render_widget(Paragraph::new(message).centered(), chunks[2]);
    frame.render_widget(Paragraph::new(target).centered(), chunks[4]);
}

// ============================================================================
// Helpers
// ============================================================================

/// Terminal stand-in for the provider's icon image
pub fn icon_glyph(icon_id: &str) -> &'static str {
    let night = icon_id.ends_with('n');
    match icon_id.get(..2) {
        Some("01") if night => "\u{1f319}",
        Some("01") => "\u{2600}\u{fe0f}",
        Some("02") => "\u{26c5}",
        Some("03") | Some("04") => "\u{2601}\u{fe0f}",
        Some("09") | Some("10") => "\u{1f327}\u{fe0f}",
        Some("11") => "\u{26c8}\u{fe0f}",
        Some("13") => "\u{2744}\u{fe0f}",
        Some("50") => "\u{1f32b}\u{fe0f}",
        _ => "\u{2753}",
    }
}

fn to_celsius(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => (value - 32.0) * 5.0 / 9.0,
        UnitSystem::Metric => value,
        UnitSystem::Standard => value - 273.15,
    }
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PanelId;
    use tui_dispatch::testing::*;

    fn palo_alto() -> Place {
        Place::new("Palo Alto", "94303")
    }

    fn render(panel: &WeatherPanel, place: &Place) -> String {
        let mut harness = RenderHarness::new(70, 20);
        let mut view = WeatherPanelView;
        harness.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                WeatherPanelViewProps {
                    panel,
                    place: Some(place),
                    units: UnitSystem::Imperial,
                    tick_count: 0,
                },
            );
        })
    }

    #[test]
    fn test_loading_placeholder() {
        let place = palo_alto();
        let panel = WeatherPanel::new(PanelId(0), 0, &place);
        let output = render(&panel, &place);
        assert!(output.contains("Loading"));
        assert!(output.contains("Palo Alto (94303)"));
    }

    #[test]
    fn test_error_state() {
        let place = palo_alto();
        let mut panel = WeatherPanel::new(PanelId(0), 0, &place);
        panel.apply_failed("provider returned HTTP 500".into());
        let output = render(&panel, &place);
        assert!(output.contains("Error"));
        assert!(output.contains("provider returned HTTP 500"));
    }

    #[test]
    fn test_icon_glyph() {
        assert_eq!(icon_glyph("02d"), "\u{26c5}");
        assert_eq!(icon_glyph("01n"), "\u{1f319}");
        assert_eq!(icon_glyph(""), "\u{2753}");
    }

    #[test]
    fn test_to_celsius() {
        assert_eq!(to_celsius(32.0, UnitSystem::Imperial), 0.0);
        assert_eq!(to_celsius(21.5, UnitSystem::Metric), 21.5);
    }
}
