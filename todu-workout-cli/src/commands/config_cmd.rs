use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG_FILE: &str = r#"# workout configuration

# Base URL of the workout API
api_url: http://localhost:3000

# Per-request timeout in seconds
# request_timeout_secs: 30
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("api_url: {}", config.api_url.value);
                        println!("  source: {}", config.api_url.source);
                        println!();

                        println!(
                            "request_timeout_secs: {}",
                            config.request_timeout_secs.value
                        );
                        println!("  source: {}", config.request_timeout_secs.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'workout config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG_FILE.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
