//! Thread-local pipeline context for crash reports.
//!
//! The pipeline is single-threaded, so a thread-local slot is enough to
//! record which phase and which file were active when something went wrong.
//! Context guards use RAII for automatic restoration on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<PipelineContext> = const { RefCell::new(PipelineContext::new()) };
}

/// Snapshot of what the pipeline was doing.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub phase: Option<PipelinePhase>,
    /// File being read or written
    pub current_file: Option<PathBuf>,
}

impl PipelineContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
        }
    }
}

/// Pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Loading,
    Filtering,
    WritingStopEvents,
    RenderingCharts,
    SequenceAnalysis,
    WritingSequences,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Filtering => write!(f, "filtering"),
            Self::WritingStopEvents => write!(f, "writing_stop_events"),
            Self::RenderingCharts => write!(f, "rendering_charts"),
            Self::SequenceAnalysis => write!(f, "sequence_analysis"),
            Self::WritingSequences => write!(f, "writing_sequences"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: PipelineContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Enter a pipeline phase until the returned guard drops.
#[must_use]
pub fn set_phase(phase: PipelinePhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Record the file being processed until the returned guard drops.
#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn get_current_context() -> PipelineContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = PipelineContext::new();
    });
}
