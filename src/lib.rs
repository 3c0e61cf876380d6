// Export modules for library usage
pub mod analysis;
pub mod charts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    Cell, DateTimeParser, RunTable, SequenceSummary, SequencedStop, StopEvent, StopField,
};

pub use crate::analysis::{
    analyze_sequences, assign_sequences, count_by, filter_stops, stage_breakdown,
    summarize_sequences, CategoryCount, SequenceAnalysis, StageBreakdown, StopFilter,
};

pub use crate::commands::analyze::{run_analysis, AnalysisReport};
pub use crate::config::{ColumnNames, ConfigOverrides, RunLogConfig};
pub use crate::errors::RunLogError;
pub use crate::io::read_run_log;
