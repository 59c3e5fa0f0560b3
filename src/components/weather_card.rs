use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::conditions::condition_for;
use crate::state::{AppState, WeatherSnapshot, format_celsius, round_display};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
pub const SPINNERS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the request outcome: hint, spinner, error, or the snapshot.
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let lines = match CardView::from_state(state) {
            CardView::Locating => busy_lines(state.tick_count, "Locating..."),
            CardView::Loading => busy_lines(state.tick_count, "Loading..."),
            CardView::Error(message) => error_lines(message),
            CardView::Ready(snapshot) => snapshot_lines(snapshot),
            CardView::Idle => idle_lines(state.geolocation_available),
        };

        let [content] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).centered(), content);
    }
}

// ============================================================================
// Views
// ============================================================================

enum CardView<'a> {
    Locating,
    Loading,
    Error(&'a str),
    Ready(&'a WeatherSnapshot),
    Idle,
}

impl<'a> CardView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if state.locating {
            return CardView::Locating;
        }
        match &state.weather {
            DataResource::Loading => CardView::Loading,
            DataResource::Failed(error) => CardView::Error(error),
            DataResource::Loaded(snapshot) => CardView::Ready(snapshot),
            DataResource::Empty => CardView::Idle,
        }
    }
}

fn busy_lines(tick_count: u32, label: &'static str) -> Vec<Line<'static>> {
    let frame = SPINNERS[tick_count as usize % SPINNERS.len()];
    vec![Line::from(vec![
        Span::styled(frame, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ])]
}

fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(ERROR_ICON),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Rgb(220, 100, 100)).bold(),
        )),
    ]
}

fn idle_lines(geolocation_available: bool) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Cyan).bold();
    let mut lines = vec![Line::from(vec![
        Span::styled("Type a city and press ", dim),
        Span::styled("Enter", key),
    ])];
    if geolocation_available {
        lines.push(Line::from(vec![
            Span::styled("or press ", dim),
            Span::styled("F2", key),
            Span::styled(" to use your location", dim),
        ]));
    }
    lines
}

fn snapshot_lines(snapshot: &WeatherSnapshot) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let condition = condition_for(snapshot.icon.as_deref());

    let mut lines = Vec::new();
    if let Some(place) = snapshot.place() {
        lines.push(Line::from(Span::styled(
            place,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    let mut headline = vec![Span::raw(condition.emoji())];
    if let Some(temp) = snapshot.temperature {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(
            format_celsius(temp),
            Style::default().fg(temperature_color(temp)).bold(),
        ));
    }
    lines.push(Line::from(headline));

    if let Some(description) = &snapshot.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(condition.color()),
        )));
    }
    lines.push(Line::default());

    if let Some(feels_like) = snapshot.feels_like {
        lines.push(detail("Feels like: ", format_celsius(feels_like), label, value));
    }
    if let Some(humidity) = snapshot.humidity {
        lines.push(detail("Humidity: ", format!("{}%", humidity), label, value));
    }
    if let Some(speed) = snapshot.wind_speed {
        lines.push(detail(
            "Wind: ",
            format!("{} m/s", round_display(speed)),
            label,
            value,
        ));
    }
    if let Some(url) = snapshot.icon_url() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            url,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn detail(name: &'static str, text: String, label: Style, value: Style) -> Line<'static> {
    Line::from(vec![Span::styled(name, label), Span::styled(text, value)])
}

fn temperature_color(celsius: f64) -> Color {
    match celsius {
        t if t < 0.0 => Color::Rgb(150, 200, 255),
        t if t < 15.0 => Color::Rgb(100, 180, 255),
        t if t < 25.0 => Color::Rgb(100, 200, 150),
        t if t < 35.0 => Color::Rgb(255, 180, 80),
        _ => Color::Rgb(255, 80, 70),
    }
}
