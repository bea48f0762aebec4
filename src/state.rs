//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config;

/// Current conditions for one city, as parsed from the provider response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: Option<u8>,
    pub wind_speed_mps: Option<f64>,
    pub feels_like_c: Option<f64>,
}

/// Spinner timing for the status line.
pub const SPINNER_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Window title from settings
    #[debug(section = "App", label = "Title")]
    pub title: String,

    /// Last successful reading; a failed search never clears it
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub reading: Option<WeatherReading>,

    /// Whether a search cycle is in flight
    #[debug(section = "Weather", label = "Loading")]
    pub loading: bool,

    /// Error line shown under the search bar
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<String>,

    // --- UI internals (skipped) ---
    /// Live text in the search bar
    #[debug(skip)]
    pub query: String,

    /// Spinner frame counter, advances only while loading
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with the given title and nothing fetched yet
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reading: None,
            loading: false,
            error: None,
            query: String::new(),
            tick_count: 0,
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(config::DEFAULT_APP_TITLE)
    }
}
