//! Configuration loading utilities

use crate::Config;
use recap_common::Result as RecapResult;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for recap_common::RecapError {
    fn from(err: ConfigError) -> Self {
        recap_common::RecapError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from environment variables and well-known files
    pub fn load() -> RecapResult<Config> {
        let config = if let Ok(config_path) = env::var("RECAP_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("recap.yaml").exists() {
            Self::load_config("recap.yaml")?
        } else if Path::new("recap.yml").exists() {
            Self::load_config("recap.yml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RecapResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(root) = env::var("RECAP_DATA_ROOT") {
            config.data.root = root;
        }

        if let Ok(output) = env::var("RECAP_OUTPUT") {
            config.data.output = Some(output);
        }

        if let Ok(year) = env::var("RECAP_YEAR") {
            config.report.year = year.parse().map_err(|e| ConfigError::EnvParseError {
                var: "RECAP_YEAR".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(top_shows) = env::var("RECAP_TOP_SHOWS") {
            config.report.top_shows =
                top_shows.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "RECAP_TOP_SHOWS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(min_duration) = env::var("RECAP_MIN_DURATION_SECS") {
            config.report.min_duration_secs =
                min_duration.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "RECAP_MIN_DURATION_SECS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(level) = env::var("RECAP_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
