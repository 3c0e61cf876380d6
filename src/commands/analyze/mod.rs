//! Analyze command module.
//!
//! - **orchestrator.rs**: Shell - runs the stages in order, writes files
//! - **report.rs**: Paths and counts handed back to the caller

pub mod orchestrator;
mod report;

pub use orchestrator::{
    load_stop_events, run_analysis, save_chart, SEQUENCES_FILE, STOP_EVENTS_FILE,
};
pub use report::AnalysisReport;
