//! State Sync Controller
//!
//! Fire-and-forget operations against the controller API. Each operation
//! spawns its own request and applies the response to the display on
//! success; a failed request applies nothing and only logs to the console,
//! so the display keeps the last successfully applied values.
//!
//! There is no cancellation and no de-duplication of in-flight requests:
//! overlapping responses apply in arrival order.

use leptos::*;

use crate::api::{self, SetPointAction};
use crate::state::global::GlobalState;
use crate::state::history::{ChartSeries, MAX_CHART_POINTS};

/// Background refresh period for the temperature and controller state
pub const POLL_INTERVAL_MS: u32 = 60_000;

/// Decrement the set point by the controller's step.
pub fn decrease_set_point(state: GlobalState) {
    adjust_set_point(state, SetPointAction::Down);
}

/// Disable set-point control entirely.
pub fn disable_set_point(state: GlobalState) {
    adjust_set_point(state, SetPointAction::Off);
}

/// Increment the set point by the controller's step.
pub fn increase_set_point(state: GlobalState) {
    adjust_set_point(state, SetPointAction::Up);
}

/// Send a parameterless set-point action and reconcile from the response.
///
/// The temperature refresh is fired immediately, without waiting on the
/// action's outcome; a stale reading gets replaced either way.
pub fn adjust_set_point(state: GlobalState, action: SetPointAction) {
    let state_for_action = state.clone();
    spawn_local(async move {
        match api::post_set_point_action(action).await {
            Ok(new_state) => state_for_action.apply_controller_state(&new_state),
            Err(e) => log_request_failure(action.endpoint(), &e),
        }
    });

    refresh_temperature(state);
}

/// Set an absolute set point.
///
/// The requested value is written to the display before the round-trip
/// completes; the authoritative response overwrites it on success.
pub fn set_set_point(state: GlobalState, value: f64) {
    state.display.update(|d| d.apply_pending_set_point(value));

    spawn_local(async move {
        match api::post_set_point(value).await {
            Ok(new_state) => state.apply_controller_state(&new_state),
            Err(e) => log_request_failure("setpt-set", &e),
        }
    });
}

/// Fetch the latest controller state and reconcile the display.
pub fn refresh_controller_state(state: GlobalState) {
    spawn_local(async move {
        match api::fetch_controller_state().await {
            Ok(new_state) => state.apply_controller_state(&new_state),
            Err(e) => log_request_failure("states/latest", &e),
        }
    });
}

/// Fetch the latest temperature reading and update the display.
pub fn refresh_temperature(state: GlobalState) {
    spawn_local(async move {
        match api::fetch_latest_sample().await {
            Ok(reading) => state.apply_temperature(reading.temp),
            Err(e) => log_request_failure("samples/latest", &e),
        }
    });
}

/// Fetch sample and state history for the given window and assemble the
/// chart series.
pub fn refresh_history(state: GlobalState, hours: f64) {
    state.loading.set(true);

    spawn_local(async move {
        let samples = match api::fetch_samples(hours).await {
            Ok(samples) => samples,
            Err(e) => {
                log_request_failure("samples", &e);
                state.loading.set(false);
                return;
            }
        };
        let states = match api::fetch_states(hours).await {
            Ok(states) => states,
            Err(e) => {
                log_request_failure("states", &e);
                state.loading.set(false);
                return;
            }
        };

        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);
        state.history.set(Some(series));
        state.loading.set(false);
    });
}

/// Start the background poll that keeps the display fresh between user
/// actions. The interval runs for the lifetime of the page.
pub fn start_polling(state: GlobalState) {
    gloo_timers::callback::Interval::new(POLL_INTERVAL_MS, move || {
        refresh_temperature(state.clone());
        refresh_controller_state(state.clone());
    })
    .forget();
}

fn log_request_failure(endpoint: &str, error: &str) {
    web_sys::console::warn_1(&format!("{}: {}", endpoint, error).into());
}
