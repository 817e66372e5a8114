//! Sync module for the remote workout API.
//!
//! The client tracks a single remote workout:
//! 1. `GET {base_url}/workouts` replaces the held workout
//! 2. `PUT {base_url}/workouts/{id}` with `{"progress": n}` updates progress,
//!    then the held copy is patched locally
//! 3. Failures are normalized into `error_message`; nothing is returned

mod client;
mod config;
mod error;

pub use client::{SyncStatus, WorkoutSyncClient};
pub use config::{SyncConfig, DEFAULT_TIMEOUT};
pub use error::{normalize_error, TransportError, FALLBACK_ERROR_MESSAGE};
