//! Stop event extraction.
//!
//! Turns the raw run log into the ordered stop event collection: rows whose
//! status matches the stop marker, projected to the report fields, with a
//! parsed timestamp and a normalized user name.

use crate::config::{ColumnNames, RunLogConfig};
use crate::core::{Cell, DateTimeParser, RunTable, StopEvent};
use crate::errors::{Result, RunLogError};

/// Selects and normalizes stop events from a run log table.
#[derive(Debug, Clone)]
pub struct StopFilter {
    columns: ColumnNames,
    /// Lowercased stop marker
    stop_marker: String,
    parser: DateTimeParser,
}

impl StopFilter {
    pub fn new(columns: ColumnNames, stop_marker: impl Into<String>, parser: DateTimeParser) -> Self {
        Self {
            columns,
            stop_marker: stop_marker.into().trim().to_lowercase(),
            parser,
        }
    }

    pub fn from_config(config: &RunLogConfig) -> Self {
        Self::new(
            config.columns.clone(),
            config.stop_marker.clone(),
            config.datetime_parser(),
        )
    }

    /// Whether a raw status value marks a stopped run.
    pub fn is_stop(&self, status: &str) -> bool {
        status.trim().to_lowercase() == self.stop_marker
    }

    /// Extract stop events, sorted ascending by timestamp.
    ///
    /// Rows whose timestamp cannot be parsed are dropped. Ties keep their
    /// source order.
    pub fn apply(&self, mut table: RunTable) -> Result<Vec<StopEvent>> {
        let missing = table.missing_columns(&self.columns.required());
        if !missing.is_empty() {
            return Err(RunLogError::missing_columns(missing));
        }

        let status_idx = table.require_column(&self.columns.status)?;
        let total = table.len();
        table.retain_rows(|row| self.is_stop(row[status_idx].as_text()));
        let matched = table.len();

        table.normalize_datetime(&self.columns.test_datetime, &self.parser)?;

        let user_idx = table.require_column(&self.columns.user)?;
        let test_idx = table.require_column(&self.columns.test_name)?;
        let time_idx = table.require_column(&self.columns.test_datetime)?;
        let part_idx = table.require_column(&self.columns.part_number)?;
        let stage_idx = table.require_column(&self.columns.stage_serial)?;

        let mut events: Vec<StopEvent> = table
            .rows()
            .iter()
            .filter_map(|row| {
                let test_datetime = row[time_idx].as_timestamp()?;
                Some(StopEvent {
                    user_name: normalize_user_name(&row[user_idx]),
                    test_name: row[test_idx].as_text().to_string(),
                    test_datetime,
                    part_number: row[part_idx].as_text().to_string(),
                    stage_serial: row[stage_idx].as_text().to_string(),
                })
            })
            .collect();

        events.sort_by_key(|e| e.test_datetime);

        log::info!(
            "Found {} stop event(s) in {} row(s) ({} dropped for unparseable timestamps)",
            events.len(),
            total,
            matched - events.len()
        );
        Ok(events)
    }
}

fn normalize_user_name(cell: &Cell) -> String {
    cell.as_text().trim().to_lowercase()
}

/// Extract stop events using the configured columns and marker.
pub fn filter_stops(table: RunTable, config: &RunLogConfig) -> Result<Vec<StopEvent>> {
    StopFilter::from_config(config).apply(table)
}
