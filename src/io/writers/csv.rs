//! Delimited report files.
//!
//! Files always start with a header row, even when there are no records, so
//! an empty run still produces a well-formed table.

use crate::core::{SequenceSummary, StopEvent};
use crate::errors::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

pub const STOP_EVENT_COLUMNS: [&str; 5] = [
    "user_name",
    "test_name",
    "test_datetime",
    "part_number",
    "stage_serial",
];

pub const SEQUENCE_COLUMNS: [&str; 8] = [
    "sequence_id",
    "start_time",
    "end_time",
    "num_stops",
    "user_name",
    "test_name",
    "part_number",
    "stage_serial",
];

/// Serialize `records` under an explicit header row.
pub fn write_records<W, T>(writer: W, headers: &[&str], records: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(headers)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Deserialize every record of a headered table.
pub fn read_records<R, T>(reader: R) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

/// Write `stopped_events.csv`, replacing any existing file.
pub fn write_stop_events(path: &Path, events: &[StopEvent]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records(file, &STOP_EVENT_COLUMNS, events)?;
    log::debug!("Wrote {} stop event(s) to {}", events.len(), path.display());
    Ok(())
}

/// Write `consecutive_stops_sequences.csv`, replacing any existing file.
pub fn write_sequence_summaries(path: &Path, summaries: &[SequenceSummary]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records(file, &SEQUENCE_COLUMNS, summaries)?;
    log::debug!("Wrote {} sequence(s) to {}", summaries.len(), path.display());
    Ok(())
}

pub fn read_stop_events(path: &Path) -> Result<Vec<StopEvent>> {
    read_records(std::fs::File::open(path)?)
}

pub fn read_sequence_summaries(path: &Path) -> Result<Vec<SequenceSummary>> {
    read_records(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn event(user: &str, part: &str) -> StopEvent {
        StopEvent {
            user_name: user.to_string(),
            test_name: "Flatness, Axis X".to_string(),
            test_datetime: NaiveDate::from_ymd_opt(2024, 2, 3)
                .unwrap()
                .and_hms_opt(4, 5, 6)
                .unwrap(),
            part_number: part.to_string(),
            stage_serial: "S-100".to_string(),
        }
    }

    #[test]
    fn test_empty_collection_writes_header_only() {
        let mut buf = Vec::new();
        write_records::<_, StopEvent>(&mut buf, &STOP_EVENT_COLUMNS, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "user_name,test_name,test_datetime,part_number,stage_serial\n"
        );
    }

    #[test]
    fn test_stop_events_are_quoted_and_formatted() {
        let mut buf = Vec::new();
        write_records(&mut buf, &STOP_EVENT_COLUMNS, &[event("alice", "")]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            indoc! {r#"
                user_name,test_name,test_datetime,part_number,stage_serial
                alice,"Flatness, Axis X",2024-02-03 04:05:06,,S-100
            "#}
        );
    }

    #[test]
    fn test_written_events_read_back() {
        let events = vec![event("alice", "P1"), event("bob", "")];
        let mut buf = Vec::new();
        write_records(&mut buf, &STOP_EVENT_COLUMNS, &events).unwrap();

        let back: Vec<StopEvent> = read_records(buf.as_slice()).unwrap();
        assert_eq!(back, events);
    }
}
