//! Permissive timestamp parsing.
//!
//! Run logs are exported by several generations of test station software, so
//! the `Test Date Time` column mixes ISO-style and US-style layouts. Parsing
//! never fails loudly: anything that matches none of the known layouts is
//! reported as `None` and treated as a missing value by the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Date-time layouts tried after RFC 3339, in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Layout used when timestamps are written back out.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses timestamp cells using user-supplied layouts first, then the
/// built-in list.
#[derive(Debug, Clone, Default)]
pub struct DateTimeParser {
    custom_formats: Vec<String>,
}

impl DateTimeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            custom_formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a raw cell. Surrounding whitespace is ignored; empty input and
    /// unrecognized layouts yield `None`.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.custom_formats
            .iter()
            .find_map(|fmt| parse_with_format(trimmed, fmt))
            .or_else(|| parse_builtin(trimmed))
    }
}

fn parse_with_format(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, fmt)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_builtin(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|fmt| {
                NaiveDate::parse_from_str(value, fmt)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
        })
}

/// Render a timestamp for output files. Sub-second precision is only shown
/// when present.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format(OUTPUT_FORMAT).to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

/// Serde adapter writing timestamps with [`format_timestamp`] and reading
/// them back with the permissive parser.
pub mod serde_format {
    use super::{format_timestamp, DateTimeParser};
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTimeParser::new()
            .parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
    }
}
