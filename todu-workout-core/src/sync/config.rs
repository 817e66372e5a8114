use std::time::Duration;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the workout API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Base URL, e.g. "http://localhost:3000" (no trailing slash)
    pub base_url: String,
    pub timeout: Duration,
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn workouts_url(&self) -> String {
        format!("{}/workouts", self.base_url)
    }

    pub(crate) fn workout_url(&self, id: u64) -> String {
        format!("{}/workouts/{}", self.base_url, id)
    }
}
