//! HTTP API
//!
//! Client for the therm controller REST API.

pub mod client;

pub use client::*;
