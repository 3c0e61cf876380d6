//! Pure analysis passes over stop events.
//!
//! Nothing here performs I/O. The orchestrator in `commands::analyze` feeds
//! these functions and hands their output to the writers.

pub mod aggregate;
pub mod sequences;
pub mod stops;

pub use aggregate::{count_by, stage_breakdown, CategoryCount, StageBreakdown};
pub use sequences::{analyze_sequences, assign_sequences, summarize_sequences, SequenceAnalysis};
pub use stops::{filter_stops, StopFilter};
