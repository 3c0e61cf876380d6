use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::DateTimeParser;

pub const DEFAULT_INPUT: &str = "RunLog.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_STOP_MARKER: &str = "Stopped";

/// Root configuration passed into the pipeline.
///
/// Every field has a default, so an empty `.runlog.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLogConfig {
    /// Run log to analyze
    pub input: PathBuf,

    /// Directory receiving CSV and HTML reports
    pub output_dir: PathBuf,

    /// Status value that marks a stopped run (compared trimmed, case-insensitive)
    pub stop_marker: String,

    /// Source column names
    pub columns: ColumnNames,

    /// Extra timestamp layouts tried before the built-in ones
    pub datetime_formats: Vec<String>,
}

impl Default for RunLogConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            stop_marker: DEFAULT_STOP_MARKER.to_string(),
            columns: ColumnNames::default(),
            datetime_formats: Vec::new(),
        }
    }
}

impl RunLogConfig {
    pub fn datetime_parser(&self) -> DateTimeParser {
        DateTimeParser::with_formats(self.datetime_formats.iter().cloned())
    }
}

/// Names of the columns read from the run log. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub status: String,
    pub user: String,
    pub test_name: String,
    pub test_datetime: String,
    pub part_number: String,
    pub stage_serial: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            status: "Aborted".to_string(),
            user: "User Name".to_string(),
            test_name: "Test Name".to_string(),
            test_datetime: "Test Date Time".to_string(),
            part_number: "Part Number".to_string(),
            stage_serial: "Stage Serial Number".to_string(),
        }
    }
}

impl ColumnNames {
    /// Required columns in the order they are reported when missing.
    pub fn required(&self) -> [&str; 6] {
        [
            self.status.as_str(),
            self.user.as_str(),
            self.test_name.as_str(),
            self.test_datetime.as_str(),
            self.part_number.as_str(),
            self.stage_serial.as_str(),
        ]
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub stop_marker: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: RunLogConfig) -> RunLogConfig {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(stop_marker) = self.stop_marker {
            config.stop_marker = stop_marker;
        }
        config
    }
}
