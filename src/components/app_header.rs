use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::HEADER_ANIM_CYCLE_TICKS;

pub const APP_TITLE: &str = "Weather App";
pub const TAGLINE: &str = "Current conditions from OpenWeatherMap";

/// Rows the header wants: FIGlet title plus the tagline.
pub const HEADER_HEIGHT: u16 = 7;

/// Static title; only the gradient reacts to state.
pub struct AppHeader;

pub struct AppHeaderProps {
    /// Temperature of the snapshot on screen, if any
    pub temperature: Option<f64>,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Title colours by temperature band: (upper bound °C, cold end, warm end).
const TEMPERATURE_BANDS: [(f64, (u8, u8, u8), (u8, u8, u8)); 4] = [
    (0.0, (150, 200, 255), (200, 230, 255)),
    (15.0, (100, 180, 255), (150, 220, 200)),
    (25.0, (100, 200, 150), (255, 220, 100)),
    (35.0, (255, 180, 80), (255, 120, 80)),
];
const HOT: ((u8, u8, u8), (u8, u8, u8)) = ((255, 100, 80), (255, 60, 60));
const NO_READING: ((u8, u8, u8), (u8, u8, u8)) = ((120, 170, 230), (210, 225, 245));

/// Stops sampled across the title; enough for the wave to look smooth.
const GRADIENT_SAMPLES: usize = 6;

fn rgb((r, g, b): (u8, u8, u8)) -> ArtColor {
    ArtColor::rgb(r, g, b)
}

fn title_colors(temperature: Option<f64>) -> (ArtColor, ArtColor) {
    let (cold, warm) = match temperature {
        None => NO_READING,
        Some(t) => TEMPERATURE_BANDS
            .iter()
            .find(|(upper, _, _)| t < *upper)
            .map(|&(_, cold, warm)| (cold, warm))
            .unwrap_or(HOT),
    };
    (rgb(cold), rgb(warm))
}

/// Triangle wave over [0, 1): 0 at the ends, 1 in the middle.
fn wave(x: f32) -> f32 {
    1.0 - (2.0 * x.rem_euclid(1.0) - 1.0).abs()
}

/// Gradient that runs cold -> warm -> cold, offset by `phase` so it slides.
fn title_fill((cold, warm): (ArtColor, ArtColor), phase: f32) -> Fill {
    let last = (GRADIENT_SAMPLES - 1) as f32;
    let stops = (0..GRADIENT_SAMPLES)
        .map(|i| {
            let pos = i as f32 / last;
            let color = cold.interpolate(warm, wave(pos * 0.5 + phase));
            artbox::ColorStop::new(pos, color)
        })
        .collect();
    Fill::Linear(LinearGradient::new(0.0, stops))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = HEADER_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for AppHeader {
    type Props<'a> = AppHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title
            Constraint::Length(1), // Tagline
        ])
        .split(area);

        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill(title_colors(props.temperature), phase));
        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), chunks[0]);

        let tagline = Line::from(vec![Span::styled(
            TAGLINE,
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(tagline), chunks[1]);
    }
}
