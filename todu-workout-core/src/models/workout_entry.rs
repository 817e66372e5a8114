use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::intensity::Intensity;

/// A single logged workout.
///
/// Entries are only built by [`crate::WorkoutLog`] after validation, so every
/// entry has a non-empty type and a positive duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Minutes
    pub duration: u32,
    pub intensity: Option<Intensity>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: DateTime<Utc>,
}

impl WorkoutEntry {
    pub(crate) fn new(
        id: u64,
        workout_type: String,
        duration: u32,
        intensity: Option<Intensity>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            workout_type,
            duration,
            intensity,
            date,
        }
    }

    /// Fixed-width RFC 3339 timestamp, sortable as plain text.
    pub fn date_string(&self) -> String {
        format_timestamp(&self.date)
    }
}

pub(crate) fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(date))
}

impl fmt::Display for WorkoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} - {} min",
            self.id,
            self.date.format("%Y-%m-%d %H:%M"),
            self.workout_type,
            self.duration
        )?;
        if let Some(intensity) = &self.intensity {
            write!(f, " ({})", intensity)?;
        }
        Ok(())
    }
}
