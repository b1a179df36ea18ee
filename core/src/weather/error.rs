//! Error types for weather fetches

use thiserror::Error;

/// Failure modes of a single fetch attempt.
///
/// Cloneable so the same value can be broadcast to every listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Credential or location missing; no network call was made
    #[error("weather credential or location not configured")]
    NotConfigured,

    /// The request never produced a usable response
    #[error("weather request failed: {0}")]
    Transport(String),

    /// The response body was not the expected payload
    #[error("failed to parse weather response: {0}")]
    Parse(String),
}
