//! Condition categories derived from OpenWeatherMap icon ids
//!
//! Icon ids look like `01d` / `10n`: two digits for the condition group,
//! then `d` or `n` for day or night.

use ratatui::style::Color;

/// Weather condition categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    ClearNight,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Map an OpenWeatherMap icon id to a condition
    pub fn from_icon(icon: &str) -> Self {
        let night = icon.ends_with('n');
        match icon.get(..2) {
            Some("01") if night => WeatherCondition::ClearNight,
            Some("01") => WeatherCondition::ClearSky,
            Some("02") => WeatherCondition::PartlyCloudy,
            Some("03") | Some("04") => WeatherCondition::Cloudy,
            Some("09") => WeatherCondition::Drizzle,
            Some("10") => WeatherCondition::Rain,
            Some("11") => WeatherCondition::Thunderstorm,
            Some("13") => WeatherCondition::Snow,
            Some("50") => WeatherCondition::Fog,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "\u{2600}\u{fe0f}",
            WeatherCondition::ClearNight => "\u{1f319}",
            WeatherCondition::PartlyCloudy => "\u{26c5}",
            WeatherCondition::Cloudy | WeatherCondition::Unknown => "\u{2601}\u{fe0f}",
            WeatherCondition::Fog => "\u{1f32b}\u{fe0f}",
            WeatherCondition::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f327}\u{fe0f}",
            WeatherCondition::Snow => "\u{2744}\u{fe0f}",
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
        }
    }

    /// Accent used for the description line
    pub fn color(self) -> Color {
        match self {
            WeatherCondition::ClearSky => Color::Yellow,
            WeatherCondition::ClearNight => Color::LightBlue,
            WeatherCondition::PartlyCloudy => Color::LightYellow,
            WeatherCondition::Cloudy | WeatherCondition::Fog => Color::Gray,
            WeatherCondition::Drizzle | WeatherCondition::Rain => Color::Cyan,
            WeatherCondition::Snow => Color::White,
            WeatherCondition::Thunderstorm => Color::Magenta,
            WeatherCondition::Unknown => Color::Gray,
        }
    }
}

/// Condition for an optional icon id; a missing id is `Unknown`.
pub fn condition_for(icon: Option<&str>) -> WeatherCondition {
    icon.map_or(WeatherCondition::Unknown, WeatherCondition::from_icon)
}
