//! HTTP API Client
//!
//! Functions for communicating with the therm controller REST API.

use gloo_net::http::Request;

use crate::state::global::{ControllerState, Reading};
use crate::state::history::{SamplePoint, StatePoint};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Default chart window in hours
pub const DEFAULT_WINDOW_HOURS: f64 = 12.0;

const API_URL_KEY: &str = "therm_api_url";
const WINDOW_HOURS_KEY: &str = "therm_chart_hours";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = read_storage(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    write_storage(API_URL_KEY, url);
}

/// Get the preferred chart window from local storage or use default
pub fn get_window_hours() -> f64 {
    read_storage(WINDOW_HOURS_KEY)
        .and_then(|h| h.parse().ok())
        .filter(|h| *h > 0.0)
        .unwrap_or(DEFAULT_WINDOW_HOURS)
}

/// Set the preferred chart window in local storage
pub fn set_window_hours(hours: f64) {
    write_storage(WINDOW_HOURS_KEY, &hours.to_string());
}

/// Normalize a base URL: remove trailing slash
fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn read_storage(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

fn write_storage(key: &str, value: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

// ============ Set-point actions ============

/// Parameterless set-point actions, each bound to a fixed endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetPointAction {
    Down,
    Off,
    Up,
}

impl SetPointAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SetPointAction::Down => "setpt-down",
            SetPointAction::Off => "setpt-off",
            SetPointAction::Up => "setpt-up",
        }
    }
}

// ============ API Functions ============

/// Send a parameterless set-point action, returning the new controller state
pub async fn post_set_point_action(action: SetPointAction) -> Result<ControllerState, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/{}", api_base, action.endpoint()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Set an absolute set point, returning the new controller state
pub async fn post_set_point(value: f64) -> Result<ControllerState, String> {
    #[derive(serde::Serialize)]
    struct SetPointRequest {
        set_point: f64,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/setpt-set", api_base))
        .json(&SetPointRequest { set_point: value })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the latest controller state without mutating anything
pub async fn fetch_controller_state() -> Result<ControllerState, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/states/latest", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the latest temperature reading
pub async fn fetch_latest_sample() -> Result<Reading, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/samples/latest", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch sample history for the last `hours`
pub async fn fetch_samples(hours: f64) -> Result<Vec<SamplePoint>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/samples?hours={}", api_base, hours))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch controller state history for the last `hours`
pub async fn fetch_states(hours: f64) -> Result<Vec<StatePoint>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/states?hours={}", api_base, hours))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:5000/"), "http://localhost:5000");
        assert_eq!(normalize_base("http://localhost:5000"), "http://localhost:5000");
    }

    #[test]
    fn test_action_endpoints() {
        assert_eq!(SetPointAction::Down.endpoint(), "setpt-down");
        assert_eq!(SetPointAction::Off.endpoint(), "setpt-off");
        assert_eq!(SetPointAction::Up.endpoint(), "setpt-up");
    }
}
