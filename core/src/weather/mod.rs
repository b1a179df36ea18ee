//! Remote weather data client
//!
//! This module provides:
//! - **Model**: the parsed weather payload and its derived readings
//! - **Client**: the process-scoped service that polls the remote endpoint,
//!   tracks in-flight requests for safe teardown, and exposes formatted
//!   getters over the last good report
//!
//! Fetch failures never disturb the last good report; they are surfaced on
//! an event channel that listeners are free to ignore.

mod client;
mod error;
mod model;

pub use client::{WeatherClient, WeatherEvent};
pub use error::WeatherError;
pub use model::WeatherReport;
