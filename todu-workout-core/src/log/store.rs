//! In-memory workout log.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::error::ValidationError;
use crate::models::{Intensity, WorkoutEntry};

/// Ordered, append-only collection of workout entries.
///
/// Entries are kept sorted ascending by date. Every successful append bumps
/// the store revision and publishes it to subscribers.
#[derive(Debug)]
pub struct WorkoutLog {
    entries: Vec<WorkoutEntry>,
    next_id: u64,
    revision: watch::Sender<u64>,
}

impl Default for WorkoutLog {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutLog {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: Vec::new(),
            next_id: 1,
            revision,
        }
    }

    /// Validates and appends a workout timestamped now.
    pub fn add_entry(
        &mut self,
        workout_type: &str,
        duration_text: &str,
        intensity: Option<&str>,
    ) -> Result<WorkoutEntry, ValidationError> {
        self.add_entry_at(workout_type, duration_text, intensity, Utc::now())
    }

    /// Validates and appends a workout with an explicit timestamp.
    ///
    /// On failure the store is left untouched and no notification is sent.
    pub fn add_entry_at(
        &mut self,
        workout_type: &str,
        duration_text: &str,
        intensity: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<WorkoutEntry, ValidationError> {
        let workout_type = workout_type.trim();
        if workout_type.is_empty() {
            return Err(ValidationError::EmptyType);
        }
        let duration = parse_duration(duration_text)?;
        let intensity = match intensity {
            Some(text) => {
                Intensity::parse_optional(text).map_err(ValidationError::InvalidIntensity)?
            }
            None => None,
        };

        let entry = WorkoutEntry::new(
            self.next_id,
            workout_type.to_string(),
            duration,
            intensity,
            date,
        );
        self.next_id += 1;

        self.entries.push(entry.clone());
        // Stable: equal timestamps keep insertion order
        self.entries.sort_by_key(|e| e.date);

        let revision = self.revision() + 1;
        self.revision.send_replace(revision);
        tracing::debug!(id = entry.id, revision, "Workout added");

        Ok(entry)
    }

    /// Entries in date-ascending order, optionally restricted to one type.
    ///
    /// An empty filter is the same as no filter. Matching is exact.
    pub fn filtered_view(&self, type_filter: Option<&str>) -> Vec<WorkoutEntry> {
        match type_filter.filter(|t| !t.is_empty()) {
            Some(wanted) => self
                .entries
                .iter()
                .filter(|e| e.workout_type == wanted)
                .cloned()
                .collect(),
            None => self.entries.clone(),
        }
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful appends so far.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receives the new revision each time the collection changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

fn parse_duration(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidDuration(trimmed.to_string()))?;
    if minutes <= 0 {
        return Err(ValidationError::NonPositiveDuration(minutes));
    }
    u32::try_from(minutes).map_err(|_| ValidationError::InvalidDuration(trimmed.to_string()))
}
