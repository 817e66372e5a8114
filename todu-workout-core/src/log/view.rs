//! Derived, read-only views over a [`WorkoutLog`].

use serde::Serialize;
use std::collections::HashMap;

use super::store::WorkoutLog;
use crate::models::{Intensity, WorkoutEntry};

/// Default number of rows returned by [`WorkoutLog::popular`].
pub const DEFAULT_POPULAR_LIMIT: usize = 3;

/// Descriptive statistics over logged durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSummary {
    pub count: usize,
    pub total_minutes: u64,
    pub average_minutes: f64,
    pub shortest_minutes: Option<u32>,
    pub longest_minutes: Option<u32>,
}

/// How often a type/intensity combination was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularWorkout {
    pub workout_type: String,
    pub intensity: Option<Intensity>,
    pub frequency: usize,
}

impl WorkoutLog {
    pub fn summary(&self) -> LogSummary {
        let entries = self.entries();
        let total_minutes: u64 = entries.iter().map(|e| u64::from(e.duration)).sum();
        let average_minutes = if entries.is_empty() {
            0.0
        } else {
            total_minutes as f64 / entries.len() as f64
        };

        LogSummary {
            count: entries.len(),
            total_minutes,
            average_minutes,
            shortest_minutes: entries.iter().map(|e| e.duration).min(),
            longest_minutes: entries.iter().map(|e| e.duration).max(),
        }
    }

    /// Most frequent (type, intensity) pairs, most frequent first.
    ///
    /// Ties are ordered by which pair appears first in the log.
    pub fn popular(&self, limit: usize) -> Vec<PopularWorkout> {
        let mut order: Vec<(&str, Option<Intensity>)> = Vec::new();
        let mut counts: HashMap<(&str, Option<Intensity>), usize> = HashMap::new();

        for entry in self.entries() {
            let key = (entry.workout_type.as_str(), entry.intensity);
            let count = counts.entry(key).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }

        let mut ranked: Vec<PopularWorkout> = order
            .into_iter()
            .map(|key| PopularWorkout {
                workout_type: key.0.to_string(),
                intensity: key.1,
                frequency: counts[&key],
            })
            .collect();
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(limit);
        ranked
    }

    /// Sorted, de-duplicated workout types.
    pub fn distinct_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .entries()
            .iter()
            .map(|e| e.workout_type.clone())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}

/// Memoizes [`WorkoutLog::filtered_view`] on (revision, filter).
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, String)>,
    view: Vec<WorkoutEntry>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, log: &WorkoutLog, type_filter: Option<&str>) -> &[WorkoutEntry] {
        let key = (log.revision(), type_filter.unwrap_or_default().to_string());
        if self.key.as_ref() != Some(&key) {
            self.view = log.filtered_view(type_filter);
            self.key = Some(key);
        }
        &self.view
    }

    /// True if a lookup with these arguments would be served from cache.
    #[cfg(test)]
    pub(crate) fn is_fresh(&self, log: &WorkoutLog, type_filter: Option<&str>) -> bool {
        match &self.key {
            Some((revision, filter)) => {
                *revision == log.revision() && filter == type_filter.unwrap_or_default()
            }
            None => false,
        }
    }
}
