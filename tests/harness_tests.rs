//! Full search-cycle tests using EffectStoreTestHarness
//!
//! These tests walk the loading -> fetch -> render-or-error -> idle sequence
//! the way the runtime drives it, with the fetch completion simulated.

use clima::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{AppState, WeatherReading},
};
use tui_dispatch::testing::*;

/// Helper to create mock weather data
fn mock_reading() -> WeatherReading {
    WeatherReading {
        city: "London".into(),
        temperature_c: 15.0,
        condition: "Cloudy".into(),
        humidity_pct: Some(72),
        wind_speed_mps: Some(4.1),
        feels_like_c: Some(13.5),
    }
}

// ============================================================================
// Search cycle
// ============================================================================

#[test]
fn test_successful_search_cycle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Loading is false before the first search.
    harness.assert_state(|s| !s.loading);

    // Submit - loading goes up, the fetch effect is declared
    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.assert_state(|s| s.loading);
    harness.assert_state(|s| s.error.is_none());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { city } if city == "London"));

    // Simulate async completion
    harness.complete_action(Action::WeatherDidLoad(mock_reading()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    // Display reflects exactly the response fields; error hidden; loading down.
    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.error.is_none());
    harness.assert_state(|s| s.reading.as_ref().map(|r| r.temperature_c) == Some(15.0));
    harness.assert_state(|s| s.reading.as_ref().map(|r| r.condition.as_str()) == Some("Cloudy"));
}

#[test]
fn test_failed_search_cycle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Nowhereville".into()));
    harness.assert_state(|s| s.loading);

    // Simulate the provider answering 404
    harness.complete_action(Action::WeatherDidError("Nowhereville".into()));
    harness.process_emitted();

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| {
        s.error.as_deref() == Some("No se pudo obtener el clima de 'Nowhereville'.")
    });
}

#[test]
fn test_failed_search_keeps_previous_reading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // First search succeeds
    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.complete_action(Action::WeatherDidLoad(mock_reading()));
    harness.process_emitted();
    harness.assert_state(|s| s.reading.is_some());

    // Second search fails - the card keeps showing London
    harness.dispatch_collect(Action::SearchSubmit("Nowhereville".into()));
    harness.complete_action(Action::WeatherDidError("Nowhereville".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.reading.as_ref().map(|r| r.city.as_str()) == Some("London"));
    harness.assert_state(|s| s.error.is_some());
}

#[test]
fn test_new_reading_replaces_previous() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.complete_action(Action::WeatherDidLoad(mock_reading()));
    harness.process_emitted();

    let madrid = WeatherReading {
        city: "Madrid".into(),
        temperature_c: 31.0,
        condition: "cielo despejado".into(),
        humidity_pct: Some(20),
        wind_speed_mps: Some(1.2),
        feels_like_c: Some(30.0),
    };
    harness.dispatch_collect(Action::SearchSubmit("Madrid".into()));
    harness.complete_action(Action::WeatherDidLoad(madrid));
    harness.process_emitted();

    harness.assert_state(|s| s.reading.as_ref().map(|r| r.city.as_str()) == Some("Madrid"));
    harness.assert_state(|s| s.error.is_none());
}

#[test]
fn test_loading_spans_exactly_one_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.assert_state(|s| !s.loading);

    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.assert_state(|s| s.loading);

    harness.complete_action(Action::WeatherDidLoad(mock_reading()));
    harness.process_emitted();
    harness.assert_state(|s| !s.loading);

    // Error path ends the same way
    harness.dispatch_collect(Action::SearchSubmit("Nowhereville".into()));
    harness.assert_state(|s| s.loading);
    harness.complete_action(Action::WeatherDidError("Nowhereville".into()));
    harness.process_emitted();
    harness.assert_state(|s| !s.loading);
}

#[test]
fn test_empty_submit_still_runs_a_cycle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // An empty (whitespace) submit is not a crash; the client will reject it
    // and the cycle ends in the unavailable outcome.
    harness.dispatch_collect(Action::SearchSubmit("   ".into()));
    harness.assert_state(|s| s.loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { city } if city.is_empty()));

    harness.complete_action(Action::WeatherDidError(String::new()));
    harness.process_emitted();

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.error.is_some());
}

#[test]
fn test_resubmit_clears_error() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Nowhereville".into()));
    harness.complete_action(Action::WeatherDidError("Nowhereville".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.error.is_some());

    // The next submit clears the error line before fetching.
    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.assert_state(|s| s.error.is_none());
    harness.assert_state(|s| s.loading);
}

// ============================================================================
// Query editing
// ============================================================================

#[test]
fn test_query_change_does_not_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchQueryChange("Lon".into()));
    harness.assert_state(|s| s.query == "Lon");
    harness.assert_state(|s| !s.loading);

    let effects = harness.drain_effects();
    effects.effects_empty();
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Dispatch multiple edits at once
    let results = harness.dispatch_all([
        Action::SearchQueryChange("L".into()),
        Action::SearchQueryChange("Lo".into()),
        Action::SearchQueryChange("Lon".into()),
    ]);

    assert_eq!(results, vec![true, true, true]);
    harness.assert_state(|s| s.query == "Lon");
}

// ============================================================================
// Spinner ticks
// ============================================================================

#[test]
fn test_tick_only_renders_while_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([Action::Tick, Action::Tick]);
    assert_eq!(results, vec![false, false]);

    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    let results = harness.dispatch_all([Action::Tick, Action::Tick]);
    assert_eq!(results, vec![true, true]);
    harness.assert_state(|s| s.tick_count == 2);
}
