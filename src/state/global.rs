//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::state::history::ChartSeries;

/// Placeholder shown before the first successful fetch
pub const PLACEHOLDER: &str = "—";

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// The three text displays (set point, temperature, heating state)
    pub display: RwSignal<DisplayState>,
    /// Latest controller state as returned by the API
    pub controller: RwSignal<Option<ControllerState>>,
    /// Assembled history series for the chart
    pub history: RwSignal<Option<ChartSeries>>,
    /// Chart window in hours
    pub window_hours: RwSignal<f64>,
    /// Last successful refresh timestamp (epoch ms)
    pub last_refresh: RwSignal<Option<i64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
}

/// Controller state from the API
///
/// Returned by every set-point action and by `GET /states/latest`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ControllerState {
    pub set_point: f64,
    pub set_point_enabled: bool,
    pub heat_on: bool,
}

impl ControllerState {
    /// Text for the set-point display: one decimal place while the
    /// set point is enabled, the literal "Off" otherwise.
    pub fn set_point_label(&self) -> String {
        if self.set_point_enabled {
            format!("{:.1}", self.set_point)
        } else {
            "Off".to_string()
        }
    }

    /// Text for the heating-state display.
    pub fn heat_label(&self) -> &'static str {
        if self.heat_on {
            "On"
        } else {
            "Off"
        }
    }
}

/// Latest temperature reading from the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Reading {
    pub temp: f64,
}

/// The three on-screen text displays.
///
/// Every response that carries controller state goes through
/// [`DisplayState::apply_controller_state`]; a failed request applies
/// nothing and the previous values stay on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub set_point: String,
    pub temperature: String,
    pub heat: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            set_point: PLACEHOLDER.to_string(),
            temperature: PLACEHOLDER.to_string(),
            heat: PLACEHOLDER.to_string(),
        }
    }
}

impl DisplayState {
    /// Reconcile the set-point and heating displays from an
    /// authoritative controller state.
    pub fn apply_controller_state(&mut self, state: &ControllerState) {
        self.set_point = state.set_point_label();
        self.heat = state.heat_label().to_string();
    }

    /// Write the latest temperature reading, two decimal places.
    pub fn apply_temperature(&mut self, temp: f64) {
        self.temperature = format!("{:.2}", temp);
    }

    /// Optimistic set-point write, before the request round-trip
    /// completes. The authoritative response overwrites this.
    pub fn apply_pending_set_point(&mut self, value: f64) {
        self.set_point = format!("{:.1}", value);
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        display: create_rw_signal(DisplayState::default()),
        controller: create_rw_signal(None),
        history: create_rw_signal(None),
        window_hours: create_rw_signal(crate::api::get_window_hours()),
        last_refresh: create_rw_signal(None),
        loading: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    /// Apply a controller state to the display and remember it.
    pub fn apply_controller_state(&self, state: &ControllerState) {
        self.display.update(|d| d.apply_controller_state(state));
        self.controller.set(Some(state.clone()));
    }

    /// Apply a temperature reading to the display.
    pub fn apply_temperature(&self, temp: f64) {
        self.display.update(|d| d.apply_temperature(temp));
        self.last_refresh
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(set_point: f64, enabled: bool, heat_on: bool) -> ControllerState {
        ControllerState {
            set_point,
            set_point_enabled: enabled,
            heat_on,
        }
    }

    #[test]
    fn test_set_point_label_enabled() {
        assert_eq!(state(68.5, true, false).set_point_label(), "68.5");
        assert_eq!(state(72.0, true, true).set_point_label(), "72.0");
    }

    #[test]
    fn test_set_point_label_disabled() {
        assert_eq!(state(68.5, false, false).set_point_label(), "Off");
    }

    #[test]
    fn test_heat_label() {
        assert_eq!(state(70.0, true, true).heat_label(), "On");
        assert_eq!(state(70.0, true, false).heat_label(), "Off");
    }

    #[test]
    fn test_apply_controller_state() {
        let mut display = DisplayState::default();
        display.apply_controller_state(&state(68.5, true, false));
        assert_eq!(display.set_point, "68.5");
        assert_eq!(display.heat, "Off");
        // temperature display is untouched by state reconciliation
        assert_eq!(display.temperature, PLACEHOLDER);
    }

    #[test]
    fn test_apply_controller_state_disabled() {
        let mut display = DisplayState::default();
        display.apply_controller_state(&state(68.5, false, false));
        assert_eq!(display.set_point, "Off");
    }

    #[test]
    fn test_apply_temperature() {
        let mut display = DisplayState::default();
        display.apply_temperature(67.456);
        assert_eq!(display.temperature, "67.46");
        display.apply_temperature(70.0);
        assert_eq!(display.temperature, "70.00");
    }

    #[test]
    fn test_optimistic_write_then_reconcile() {
        let mut display = DisplayState::default();
        display.apply_pending_set_point(72.0);
        assert_eq!(display.set_point, "72.0");

        // authoritative response always overwrites the optimistic value
        display.apply_controller_state(&state(72.0, true, true));
        assert_eq!(display.set_point, "72.0");
        assert_eq!(display.heat, "On");
    }

    #[test]
    fn test_controller_state_json() {
        let parsed: ControllerState =
            serde_json::from_str(r#"{"set_point": 68.5, "set_point_enabled": true, "heat_on": false}"#)
                .unwrap();
        assert_eq!(parsed, state(68.5, true, false));
    }
}
