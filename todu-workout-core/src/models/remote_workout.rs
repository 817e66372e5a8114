use serde::{Deserialize, Serialize};
use std::fmt;

/// The workout resource served by the remote workout API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorkout {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub personalized_recommendations: Vec<String>,
}

/// Body of `PUT /workouts/{id}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressUpdate {
    pub progress: f64,
}

impl fmt::Display for RemoteWorkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workout: {} (#{})", self.name, self.id)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Progress: {}%", self.progress)?;
        writeln!(
            f,
            "Completed: {}",
            if self.completed { "yes" } else { "no" }
        )?;

        if !self.personalized_recommendations.is_empty() {
            writeln!(f, "\nRecommendations:")?;
            for rec in &self.personalized_recommendations {
                writeln!(f, "  - {}", rec)?;
            }
        }

        Ok(())
    }
}
