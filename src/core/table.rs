//! In-memory run log table.
//!
//! The loader keeps every column of the source file so that nothing is lost
//! before the stop filter runs. Cells start out as text; a column can be
//! normalized to timestamps in place.

use super::timestamp::DateTimeParser;
use crate::errors::{Result, RunLogError};
use chrono::NaiveDateTime;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Missing,
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Build a text cell; empty input becomes [`Cell::Missing`].
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text view of the cell. Missing cells read as the empty string.
    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

/// Run log rows with named columns, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RunTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with missing cells and extra
    /// cells beyond the header are dropped.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| RunLogError::missing_column(name))
    }

    /// Names from `required` that this table lacks, in the order given.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect()
    }

    /// Keep only rows matching `predicate`, preserving order.
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|row| predicate(row.as_slice()));
    }

    /// Convert a column to timestamps in place. Cells that cannot be parsed
    /// become missing; no rows are removed.
    pub fn normalize_datetime(&mut self, column: &str, parser: &DateTimeParser) -> Result<()> {
        let idx = self.require_column(column)?;
        let mut unparsed = 0usize;

        for row in &mut self.rows {
            let normalized = match &row[idx] {
                Cell::Timestamp(ts) => Cell::Timestamp(*ts),
                Cell::Text(raw) => match parser.parse(raw) {
                    Some(ts) => Cell::Timestamp(ts),
                    None => {
                        unparsed += 1;
                        Cell::Missing
                    }
                },
                Cell::Missing => Cell::Missing,
            };
            row[idx] = normalized;
        }

        if unparsed > 0 {
            log::debug!(
                "{} value(s) in column '{}' could not be parsed as timestamps",
                unparsed,
                column
            );
        }
        Ok(())
    }
}
