mod intensity;
mod remote_workout;
mod workout_entry;

pub use intensity::Intensity;
pub use remote_workout::{ProgressUpdate, RemoteWorkout};
pub use workout_entry::WorkoutEntry;
