//! Validation error types.

use thiserror::Error;

/// Reasons a workout could not be added to the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Workout type was empty or whitespace
    #[error("Workout type is required")]
    EmptyType,
    /// Duration text was not an integer
    #[error("Invalid duration '{0}'. Enter whole minutes.")]
    InvalidDuration(String),
    /// Duration parsed but was zero or negative
    #[error("Duration must be greater than zero (got {0})")]
    NonPositiveDuration(i64),
    /// Intensity was not Low, Medium or High
    #[error("{0}")]
    InvalidIntensity(String),
}
