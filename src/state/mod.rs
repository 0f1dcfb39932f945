//! State Management
//!
//! Global application state, display reconciliation, and history assembly.

pub mod global;
pub mod history;
pub mod sync;

pub use global::{provide_global_state, ControllerState, DisplayState, GlobalState, Reading};
pub use history::{ChartSeries, SamplePoint, StatePoint};
