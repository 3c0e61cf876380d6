//! Core data types shared by the loader, analysis passes, and writers.

pub mod events;
pub mod table;
pub mod timestamp;

pub use events::{SequenceSummary, SequencedStop, StopEvent, StopField};
pub use table::{Cell, RunTable};
pub use timestamp::{format_timestamp, DateTimeParser};
