use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;

use super::app_header::HEADER_HEIGHT;
use super::{AppHeader, AppHeaderProps, Component, WeatherPanel, WeatherPanelProps};
use crate::action::Action;
use crate::state::AppState;

/// Outermost view: header on top, the panel does everything else.
#[derive(Default)]
pub struct Shell {
    panel: WeatherPanel,
}

pub struct ShellProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Shell {
    type Props<'a> = ShellProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.panel
            .handle_event(
                event,
                WeatherPanelProps {
                    state: props.state,
                    is_focused: props.is_focused,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
        ])
        .split(area);

        let mut header = AppHeader;
        header.render(
            frame,
            chunks[0],
            AppHeaderProps {
                temperature: props.state.weather.data().and_then(|s| s.temperature),
                is_animating: props.state.is_busy(),
                tick_count: props.state.tick_count,
            },
        );

        self.panel.render(
            frame,
            chunks[1],
            WeatherPanelProps {
                state: props.state,
                is_focused: props.is_focused,
            },
        );
    }
}
