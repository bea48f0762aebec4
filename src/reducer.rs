//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// User-facing text for the single failure outcome of a search.
pub fn unavailable_message(city: &str) -> String {
    format!("No se pudo obtener el clima de '{city}'.")
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            state.query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(city) => {
            let city = city.trim().to_string();
            state.loading = true;
            state.error = None;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather { city })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(reading) => {
            state.reading = Some(reading);
            state.error = None;
            state.loading = false;
            DispatchResult::changed()
        }

        Action::WeatherDidError(city) => {
            // The previous reading stays on screen; only the error line appears.
            state.error = Some(unavailable_message(&city));
            state.loading = false;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
