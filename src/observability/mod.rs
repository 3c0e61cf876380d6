//! Crash context for the reporting pipeline.
//!
//! Install the panic hook at startup, then mark phases as the pipeline runs:
//!
//! ```ignore
//! use runlog_analyzer::observability::{install_panic_hook, set_phase, PipelinePhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(PipelinePhase::Loading);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_file, set_phase, ContextGuard,
    PipelineContext, PipelinePhase,
};
pub use panic_hook::install_panic_hook;
