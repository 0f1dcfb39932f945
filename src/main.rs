//! Therm Dashboard
//!
//! Home thermostat dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Live temperature, set point, and heating state
//! - Set-point adjustment (step, disable, absolute)
//! - History chart of temperature against set-point bands
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the thermostat controller over its
//! JSON API; the display always reflects the last fetched values.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
