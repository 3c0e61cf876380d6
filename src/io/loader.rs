//! Run log loading.

use crate::core::{Cell, RunTable};
use crate::errors::{Result, RunLogError};
use std::io::Read;
use std::path::Path;

/// Read a delimited run log into a [`RunTable`].
///
/// Every cell is kept as text; numeric-looking values are not reinterpreted,
/// so identifiers such as `00123` survive unchanged. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_run_log(path: &Path) -> Result<RunTable> {
    if !path.exists() {
        return Err(RunLogError::not_found(path));
    }

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let table = read_table(reader)?;

    log::info!(
        "Loaded {} row(s) with {} column(s) from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Parse a run log from any reader. Used for in-memory fixtures.
pub fn read_run_log_from<R: Read>(input: R) -> Result<RunTable> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_table(reader)
}

fn read_table<R: Read>(mut reader: csv::Reader<R>) -> Result<RunTable> {
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let mut table = RunTable::new(headers);

    for record in reader.byte_records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| Cell::from_raw(&String::from_utf8_lossy(field)))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}
