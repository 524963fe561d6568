//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Export location and output destination
    #[validate(nested)]
    pub data: DataConfig,

    /// Report parameters (target year, thresholds, limits)
    #[validate(nested)]
    pub report: ReportConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingSettings,
}

/// Export location and output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Directory searched for the viewing-history export
    #[validate(length(min = 1, message = "Data root cannot be empty"))]
    #[validate(custom(
        function = crate::validation::validate_file_path,
        message = "Data root contains invalid path characters"
    ))]
    pub root: String,

    /// Output path for the stats snapshot; defaults to
    /// `recap_stats.json` under the data root when unset
    pub output: Option<String>,
}

/// Report parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// Target calendar year; only records starting in this year count
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,

    /// Number of shows kept in the top list
    #[validate(range(min = 1, max = 50, message = "Top show limit must be between 1 and 50"))]
    pub top_shows: usize,

    /// Views shorter than this count as previews and are dropped
    #[validate(range(min = 1, max = 3600, message = "Minimum duration must be between 1 and 3600 seconds"))]
    pub min_duration_secs: u64,

    /// Same-show episodes on one day needed to count as a binge session
    #[validate(range(min = 2, max = 20, message = "Binge threshold must be between 2 and 20 episodes"))]
    pub binge_threshold: u32,

    /// Gap between one record's end and the next record's start below which
    /// both belong to the same viewing session
    #[validate(range(min = 1, max = 240, message = "Session gap must be between 1 and 240 minutes"))]
    pub session_gap_mins: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = crate::validation::validate_log_level,
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: "data".to_string(),
            output: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            year: 2025,
            top_shows: 10,
            min_duration_secs: 60,
            binge_threshold: 4,
            session_gap_mins: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.report.year, 2025);
        assert_eq!(config.report.top_shows, 10);
        assert_eq!(config.report.min_duration_secs, 60);
        assert_eq!(config.data.root, "data");
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let mut config = Config::default();
        config.report.year = 1985;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_empty_data_root_rejected() {
        let mut config = Config::default();
        config.data.root = String::new();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_zero_top_shows_rejected() {
        let mut config = Config::default();
        config.report.top_shows = 0;
        assert!(config.validate_all().is_err());
    }
}
