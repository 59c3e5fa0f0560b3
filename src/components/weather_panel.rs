use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::search_form::FORM_HEIGHT;
use super::{Component, SearchForm, SearchFormProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherPanel - read-only view of state
pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search form, outcome card and key hints
#[derive(Default)]
pub struct WeatherPanel {
    form: SearchForm,
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState, is_focused: bool) -> SearchFormProps<'a> {
        SearchFormProps {
            query: &state.query,
            is_focused,
            geolocation_available: state.geolocation_available,
            on_query_change: Action::QueryChange,
        }
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::F(5) => return vec![Action::WeatherRefresh],
                KeyCode::Char('r') if ctrl => return vec![Action::WeatherRefresh],
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if ctrl => return vec![Action::Quit],
                _ => {}
            }
        }

        self.form
            .handle_event(event, Self::form_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherPanelProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(FORM_HEIGHT), // Search form
            Constraint::Min(1),              // Outcome
            Constraint::Length(1),           // Help bar
        ])
        .split(area);

        self.form.render(
            frame,
            chunks[0],
            Self::form_props(props.state, props.is_focused),
        );

        let mut card = WeatherCard;
        card.render(frame, chunks[1], WeatherCardProps { state: props.state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "search"),
                    StatusBarHint::new("F2", "my location"),
                    StatusBarHint::new("F5", "refresh"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
