//! Todu Workout Core Library
//!
//! Workout log store and remote workout sync client shared by Todu Workout
//! applications.

pub mod log;
pub mod models;
pub mod sync;

pub use log::{LogSummary, PopularWorkout, ValidationError, ViewCache, WorkoutLog};
pub use models::{Intensity, ProgressUpdate, RemoteWorkout, WorkoutEntry};
pub use sync::{normalize_error, SyncConfig, SyncStatus, TransportError, WorkoutSyncClient};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
