use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};

use todu_workout_core::{RemoteWorkout, WorkoutSyncClient};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct RemoteCommand {
    #[command(subcommand)]
    pub command: RemoteSubcommand,
}

#[derive(Subcommand)]
pub enum RemoteSubcommand {
    /// Show the current workout from the workout API
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update progress of a remote workout
    Progress {
        /// Workout ID
        id: u64,

        /// New progress value
        progress: f64,
    },
}

impl RemoteCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let stdout = io::stdout();
        self.execute(config, &mut stdout.lock()).await
    }

    async fn execute<W: Write>(
        &self,
        config: &Config,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let client = WorkoutSyncClient::new(config.sync_config())?;
        tracing::debug!(base_url = client.base_url(), "Connecting to workout API");

        // Initial load, as on first activation
        client.activate().await;

        match &self.command {
            RemoteSubcommand::Show { format } => {
                if let Some(message) = client.error_message() {
                    return Err(message.into());
                }

                match (client.current_workout(), format) {
                    (None, _) => writeln!(out, "No current workout.")?,
                    (Some(workout), OutputFormat::Json) => {
                        writeln!(out, "{}", serde_json::to_string_pretty(&workout)?)?;
                    }
                    (Some(workout), OutputFormat::Text) => write!(out, "{}", workout)?,
                }
                Ok(())
            }

            RemoteSubcommand::Progress { id, progress } => {
                client.update_progress(*id, *progress).await;
                if let Some(message) = client.error_message() {
                    return Err(message.into());
                }

                writeln!(out, "Updated workout #{} progress to {}%", id, progress)?;
                if let Some(workout) = client.current_workout().filter(|w| w.id == *id) {
                    writeln!(out)?;
                    write_summary(out, &workout)?;
                }
                Ok(())
            }
        }
    }
}

fn write_summary<W: Write>(out: &mut W, workout: &RemoteWorkout) -> io::Result<()> {
    writeln!(out, "  Name: {}", workout.name)?;
    writeln!(out, "  Progress: {}%", workout.progress)?;
    writeln!(
        out,
        "  Completed: {}",
        if workout.completed { "yes" } else { "no" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, ConfigValue};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        Config {
            api_url: ConfigValue::new(server.uri(), ConfigSource::File),
            request_timeout_secs: ConfigValue::new(5, ConfigSource::Default),
            config_file: None,
        }
    }

    async fn mount_workout(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "Leg Day",
                "completed": false,
                "progress": 50,
                "personalizedRecommendations": ["Stretch hamstrings"]
            })))
            .mount(server)
            .await;
    }

    async fn execute(command: RemoteSubcommand, config: &Config) -> (String, Option<String>) {
        let mut out = Vec::new();
        let result = RemoteCommand { command }.execute(config, &mut out).await;
        (
            String::from_utf8(out).unwrap(),
            result.err().map(|e| e.to_string()),
        )
    }

    #[tokio::test]
    async fn test_show_text() {
        let server = MockServer::start().await;
        mount_workout(&server).await;

        let format = OutputFormat::Text;
        let (output, err) = execute(RemoteSubcommand::Show { format }, &config_for(&server)).await;

        assert_eq!(err, None);
        assert!(output.starts_with("Workout: Leg Day (#1)"));
        assert!(output.contains("Progress: 50%"));
        assert!(output.contains("  - Stretch hamstrings"));
    }

    #[tokio::test]
    async fn test_show_json() {
        let server = MockServer::start().await;
        mount_workout(&server).await;

        let format = OutputFormat::Json;
        let (output, err) = execute(RemoteSubcommand::Show { format }, &config_for(&server)).await;

        assert_eq!(err, None);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["personalizedRecommendations"][0], "Stretch hamstrings");
    }

    #[tokio::test]
    async fn test_show_without_workout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let format = OutputFormat::Text;
        let (output, err) = execute(RemoteSubcommand::Show { format }, &config_for(&server)).await;

        assert_eq!(err, None);
        assert_eq!(output, "No current workout.\n");
    }

    #[tokio::test]
    async fn test_show_propagates_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workouts"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
            .mount(&server)
            .await;

        let format = OutputFormat::Text;
        let (output, err) = execute(RemoteSubcommand::Show { format }, &config_for(&server)).await;

        assert_eq!(err.as_deref(), Some("Not found"));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_progress_prints_summary() {
        let server = MockServer::start().await;
        mount_workout(&server).await;
        Mock::given(method("PUT"))
            .and(path("/workouts/1"))
            .and(body_json(json!({"progress": 75.0})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let command = RemoteSubcommand::Progress { id: 1, progress: 75.0 };
        let (output, err) = execute(command, &config_for(&server)).await;

        assert_eq!(err, None);
        assert!(output.starts_with("Updated workout #1 progress to 75%"));
        assert!(output.contains("  Name: Leg Day"));
        assert!(output.contains("  Progress: 75%"));
        assert!(output.contains("  Completed: no"));
    }

    #[tokio::test]
    async fn test_progress_other_workout_skips_summary() {
        let server = MockServer::start().await;
        mount_workout(&server).await;
        Mock::given(method("PUT"))
            .and(path("/workouts/2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let command = RemoteSubcommand::Progress { id: 2, progress: 10.0 };
        let (output, err) = execute(command, &config_for(&server)).await;

        assert_eq!(err, None);
        assert_eq!(output, "Updated workout #2 progress to 10%\n");
    }

    #[tokio::test]
    async fn test_progress_propagates_failure() {
        let server = MockServer::start().await;
        mount_workout(&server).await;
        Mock::given(method("PUT"))
            .and(path("/workouts/1"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"message": "Workout already completed"})),
            )
            .mount(&server)
            .await;

        let command = RemoteSubcommand::Progress { id: 1, progress: 75.0 };
        let (output, err) = execute(command, &config_for(&server)).await;

        assert_eq!(err.as_deref(), Some("Workout already completed"));
        assert!(output.is_empty());
    }
}
