//! Workout log store.
//!
//! The log is an in-memory, append-only collection that validates each new
//! entry, keeps entries in date order and exposes derived views:
//!
//! - [`WorkoutLog::filtered_view`] for display, memoized by [`ViewCache`]
//! - [`WorkoutLog::summary`] and [`WorkoutLog::popular`] for reporting

mod error;
mod store;
mod view;

pub use error::ValidationError;
pub use store::WorkoutLog;
pub use view::{LogSummary, PopularWorkout, ViewCache, DEFAULT_POPULAR_LIMIT};
