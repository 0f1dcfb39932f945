//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod set_point_controls;
pub mod status_card;

pub use chart::HistoryChart;
pub use loading::Loading;
pub use nav::Nav;
pub use set_point_controls::SetPointControls;
pub use status_card::{HeatStatusCard, StatusCard};
