//! HTTP client for the remote "current workout" resource.
//!
//! Operations never return errors. Their outcome is published through
//! [`SyncStatus`], which the caller reads after the future resolves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

use super::config::SyncConfig;
use super::error::{normalize_error, ErrorBody, TransportError};
use crate::models::{ProgressUpdate, RemoteWorkout};

/// Snapshot of the client's shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncStatus {
    pub current_workout: Option<RemoteWorkout>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// `GET /workouts` answers with either one workout or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkoutPayload {
    Single(RemoteWorkout),
    List(Vec<RemoteWorkout>),
}

impl WorkoutPayload {
    fn into_current(self) -> Option<RemoteWorkout> {
        match self {
            WorkoutPayload::Single(workout) => Some(workout),
            WorkoutPayload::List(workouts) => workouts.into_iter().next(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    status: SyncStatus,
    /// Sequence number of the most recently started operation
    latest: u64,
    /// Sequence number of the most recently started load
    latest_load: u64,
    load_in_flight: bool,
    /// Progress updates that succeeded while the latest load was in flight
    pending: Vec<PendingPatch>,
}

#[derive(Debug, Clone, Copy)]
struct PendingPatch {
    id: u64,
    progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Load,
    Update,
}

/// Sync client for the workout API.
///
/// Every operation takes a sequence number when it starts. `is_loading` and
/// `error_message` follow the most recently started operation. The held
/// workout follows the most recently started load: an older load's body is
/// dropped, and progress updates that succeed while a load is in flight are
/// re-applied on top of its body.
#[derive(Debug)]
pub struct WorkoutSyncClient {
    http: reqwest::Client,
    config: SyncConfig,
    inner: Mutex<Inner>,
    activated: AtomicBool,
}

impl WorkoutSyncClient {
    /// Creates a new sync client. No request is made until [`activate`].
    ///
    /// [`activate`]: WorkoutSyncClient::activate
    pub fn new(config: SyncConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("todu-workout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            inner: Mutex::new(Inner::default()),
            activated: AtomicBool::new(false),
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Loads the workout the first time it is called; later calls do nothing.
    pub async fn activate(&self) {
        if self.activated.swap(true, Ordering::SeqCst) {
            return;
        }
        self.load_workout().await;
    }

    /// Replaces the current workout with the server's copy.
    pub async fn load_workout(&self) {
        let seq = self.begin(Operation::Load);
        tracing::debug!(seq, url = %self.config.workouts_url(), "Loading workout");

        let result = self.fetch_workout().await;
        if let Err(e) = &result {
            tracing::warn!(seq, "Failed to load workout: {}", e);
        }
        self.finish_load(seq, result);
    }

    /// Sends a progress update and patches the held workout on success.
    ///
    /// The workout is not refetched, so other fields changed on the server
    /// show up only after the next [`load_workout`].
    ///
    /// [`load_workout`]: WorkoutSyncClient::load_workout
    pub async fn update_progress(&self, id: u64, progress: f64) {
        let seq = self.begin(Operation::Update);
        tracing::debug!(seq, id, progress, "Updating workout progress");

        let result = self.put_progress(id, progress).await;
        if let Err(e) = &result {
            tracing::warn!(seq, id, "Failed to update workout progress: {}", e);
        }
        self.finish_update(seq, PendingPatch { id, progress }, result);
    }

    pub fn status(&self) -> SyncStatus {
        self.lock().status.clone()
    }

    pub fn current_workout(&self) -> Option<RemoteWorkout> {
        self.lock().status.current_workout.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().status.is_loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock().status.error_message.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Recover from poisoning; the state holds plain data
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, operation: Operation) -> u64 {
        let mut inner = self.lock();
        inner.latest += 1;
        if operation == Operation::Load {
            inner.latest_load = inner.latest;
            inner.load_in_flight = true;
            inner.pending.clear();
        }
        inner.status.is_loading = true;
        inner.status.error_message = None;
        inner.latest
    }

    fn finish_load(&self, seq: u64, result: Result<Option<RemoteWorkout>, TransportError>) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let is_latest = inner.latest == seq;

        if inner.latest_load != seq {
            tracing::debug!(seq, latest_load = inner.latest_load, "Discarding stale workout");
        } else {
            inner.load_in_flight = false;
            match result {
                Ok(workout) => {
                    inner.status.current_workout = workout;
                    for patch in inner.pending.drain(..) {
                        apply_patch(&mut inner.status.current_workout, patch);
                    }
                }
                Err(e) => {
                    inner.pending.clear();
                    if is_latest {
                        inner.status.error_message = Some(normalize_error(&e));
                    }
                }
            }
        }

        if is_latest {
            inner.status.is_loading = false;
        }
    }

    fn finish_update(&self, seq: u64, patch: PendingPatch, result: Result<(), TransportError>) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let is_latest = inner.latest == seq;

        match result {
            Ok(()) => {
                apply_patch(&mut inner.status.current_workout, patch);
                if inner.load_in_flight {
                    inner.pending.push(patch);
                }
            }
            Err(e) => {
                if is_latest {
                    inner.status.error_message = Some(normalize_error(&e));
                } else {
                    tracing::debug!(seq, latest = inner.latest, "Discarding stale error");
                }
            }
        }

        if is_latest {
            inner.status.is_loading = false;
        }
    }

    async fn fetch_workout(&self) -> Result<Option<RemoteWorkout>, TransportError> {
        let response = self
            .http
            .get(self.config.workouts_url())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let body = check_status(response).await?;
        let payload: WorkoutPayload =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(payload.into_current())
    }

    async fn put_progress(&self, id: u64, progress: f64) -> Result<(), TransportError> {
        let response = self
            .http
            .put(self.config.workout_url(id))
            .json(&ProgressUpdate { progress })
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

fn apply_patch(workout: &mut Option<RemoteWorkout>, patch: PendingPatch) {
    if let Some(workout) = workout.as_mut() {
        if workout.id == patch.id {
            workout.progress = patch.progress;
        }
    }
}

/// Returns the body of a 2xx response, or a `Status` error carrying the
/// server's `message` field.
async fn check_status(response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body),
        })
    }
}
