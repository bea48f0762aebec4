//! Actions - every event the reducer can observe

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Search bar text changed
    SearchQueryChange(String),

    /// Submit the city in the search bar (starts a search cycle)
    SearchSubmit(String),

    // ===== Weather category =====
    /// Result: provider returned a reading
    WeatherDidLoad(WeatherReading),

    /// Result: weather unavailable for the requested city
    WeatherDidError(String),

    // ===== UI category =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
