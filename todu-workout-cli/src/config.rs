use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use todu_workout_core::sync::DEFAULT_TIMEOUT;
use todu_workout_core::SyncConfig;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the workout API
    pub api_url: ConfigValue<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut request_timeout_secs =
            ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(secs) = file_config.request_timeout_secs {
                request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("WORKOUT_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(secs) = std::env::var("WORKOUT_REQUEST_TIMEOUT_SECS") {
            let parsed = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "WORKOUT_REQUEST_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            request_timeout_secs = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            api_url,
            request_timeout_secs,
            config_file,
        })
    }

    /// Connection settings for the sync client.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(self.api_url.value.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs.value))
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/workout/
    /// - macOS: ~/Library/Application Support/workout/
    /// - Windows: %APPDATA%/workout/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("workout")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue { name: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, "http://localhost:3000");
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.request_timeout_secs.value, 30);
        assert_eq!(config.request_timeout_secs.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: https://api.example.com/").unwrap();
        writeln!(file, "request_timeout_secs: 5").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_url.value, "https://api.example.com/");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.request_timeout_secs.value, 5);
        assert_eq!(config.request_timeout_secs.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "request_timeout_secs: 10").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.request_timeout_secs.value, 10);
    }

    #[test]
    fn test_sync_config_conversion() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: https://api.example.com/").unwrap();
        writeln!(file, "request_timeout_secs: 5").unwrap();

        let sync = Config::load(Some(config_path)).unwrap().sync_config();
        assert_eq!(sync.base_url, "https://api.example.com");
        assert_eq!(sync.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_timeout_matches_client() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let sync = Config::load(Some(config_path)).unwrap().sync_config();
        assert_eq!(sync.timeout, DEFAULT_TIMEOUT);
        assert_eq!(sync.timeout, SyncConfig::new(DEFAULT_API_URL).timeout);
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: http://fromfile").unwrap();

        std::env::set_var("WORKOUT_API_URL", "http://fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, "http://fromenv");
        assert_eq!(config.api_url.source, ConfigSource::Environment);

        std::env::remove_var("WORKOUT_API_URL");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
