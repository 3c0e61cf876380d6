//! Error types for run log analysis.
//!
//! Library operations return [`RunLogError`]. The binary wraps these in
//! `anyhow` at the top-level boundary, where any failure is printed once and
//! turned into a non-zero exit status.
//!
//! Timestamp parse failures are deliberately absent from this taxonomy: an
//! unparseable cell becomes a missing value and is filtered out downstream.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, analyzing, or writing run log reports.
#[derive(Debug, Error)]
pub enum RunLogError {
    /// The input run log does not exist.
    #[error("Run log not found at: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A single expected column is absent from the table.
    #[error("Missing expected column: {column}")]
    MissingColumn { column: String },

    /// One or more required columns are absent. Every missing name is listed.
    #[error("Missing expected columns: {}", format_column_list(.columns))]
    MissingColumns { columns: Vec<String> },

    /// A configuration file exists but could not be read or parsed.
    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Delimited file read or write failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Chart specification serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RunLogError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the user can fix this error by changing the input or config.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::MissingColumn { .. }
                | Self::MissingColumns { .. }
                | Self::Config { .. }
        )
    }
}

fn format_column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

pub type Result<T> = std::result::Result<T, RunLogError>;
