pub mod screen;
pub mod search_bar;
pub mod weather_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use screen::{WeatherScreen, WeatherScreenProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_card::{condition_emoji, WeatherCard, WeatherCardProps};
