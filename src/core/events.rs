use super::timestamp::serde_format;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An aborted test run, projected to the fields the reports use.
///
/// Field order matches the `stopped_events.csv` column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEvent {
    pub user_name: String,
    pub test_name: String,
    #[serde(with = "serde_format")]
    pub test_datetime: NaiveDateTime,
    pub part_number: String,
    pub stage_serial: String,
}

impl StopEvent {
    pub fn field(&self, field: StopField) -> &str {
        match field {
            StopField::User => &self.user_name,
            StopField::Test => &self.test_name,
            StopField::Part => &self.part_number,
            StopField::Stage => &self.stage_serial,
        }
    }

    /// Key that defines sequence membership.
    pub fn test_stage_key(&self) -> (&str, &str) {
        (&self.test_name, &self.stage_serial)
    }
}

/// Categorical stop event fields that reports group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopField {
    User,
    Test,
    Part,
    Stage,
}

impl StopField {
    pub const ALL: [StopField; 4] = [
        StopField::User,
        StopField::Test,
        StopField::Part,
        StopField::Stage,
    ];

    /// Output column name of this field.
    pub fn column_name(self) -> &'static str {
        match self {
            StopField::User => "user_name",
            StopField::Test => "test_name",
            StopField::Part => "part_number",
            StopField::Stage => "stage_serial",
        }
    }
}

impl std::fmt::Display for StopField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// A stop event with its position in a (test, stage) sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedStop {
    pub event: StopEvent,
    /// 1-based, assigned in (test, stage, time) scan order
    pub sequence_id: u32,
    /// 1-based position within the sequence
    pub sequence_index: u32,
}

/// One row of `consecutive_stops_sequences.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub sequence_id: u32,
    #[serde(with = "serde_format")]
    pub start_time: NaiveDateTime,
    #[serde(with = "serde_format")]
    pub end_time: NaiveDateTime,
    pub num_stops: u32,
    pub user_name: String,
    pub test_name: String,
    pub part_number: String,
    pub stage_serial: String,
}
