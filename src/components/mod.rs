pub mod app_header;
pub mod search_form;
pub mod shell;
pub mod weather_card;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_header::{APP_TITLE, AppHeader, AppHeaderProps, TAGLINE};
pub use search_form::{PLACEHOLDER, SearchForm, SearchFormProps};
pub use shell::{Shell, ShellProps};
pub use weather_card::{ERROR_ICON, SPINNERS, WeatherCard, WeatherCardProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
