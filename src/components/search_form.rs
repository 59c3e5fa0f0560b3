use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter city (e.g. Mumbai)";

/// Rows: input (3) + action hints (1)
pub const FORM_HEIGHT: u16 = 4;

/// City input with its two actions: search, and use my location.
pub struct SearchForm {
    input: TextInput,
}

pub struct SearchFormProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    /// Dim the location action when there is no provider
    pub geolocation_available: bool,
    pub on_query_change: fn(String) -> Action,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style(bg: Option<Color>) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg,
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl Component<Action> for SearchForm {
    type Props<'a> = SearchFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Enter => return vec![Action::SearchSubmit],
            KeyCode::F(2) => return vec![Action::LocateRequest],
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::LocateRequest];
            }
            _ => {}
        }

        // Everything else edits the query
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(None),
            on_change: props.on_query_change,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Actions
        ])
        .split(area);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(Some(Color::Rgb(50, 50, 60))),
            on_change: props.on_query_change,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let key_style = Style::default().fg(Color::Cyan).bold();
        let label_style = Style::default().fg(Color::Gray);
        let locate_style = if props.geolocation_available {
            label_style
        } else {
            Style::default().fg(Color::DarkGray).crossed_out()
        };
        let actions = Line::from(vec![
            Span::styled("Enter", key_style),
            Span::styled(" Search   ", label_style),
            Span::styled("F2", key_style),
            Span::styled(" Use my location", locate_style),
        ])
        .centered();
        frame.render_widget(Paragraph::new(actions), chunks[1]);
    }
}
