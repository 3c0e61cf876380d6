//! Orchestrator for the analyze command.
//!
//! Thin I/O composition over the pure passes in `crate::analysis` and
//! `crate::charts`. Stages run strictly in order and the first error aborts
//! everything after it; files already written stay on disk.

use super::report::AnalysisReport;
use crate::analysis::{self, SequenceAnalysis};
use crate::charts::{self, ChartSpec};
use crate::config::RunLogConfig;
use crate::core::{StopEvent, StopField};
use crate::errors::Result;
use crate::io::writers::{self, HtmlChartWriter};
use crate::io::{self, read_run_log};
use crate::observability::{set_current_file, set_phase, PipelinePhase};
use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const STOP_EVENTS_FILE: &str = "stopped_events.csv";
pub const SEQUENCES_FILE: &str = "consecutive_stops_sequences.csv";

/// Run the full pipeline for one invocation.
pub fn run_analysis(config: &RunLogConfig) -> Result<AnalysisReport> {
    let generated_at = Local::now().naive_local();

    let events = load_stop_events(config)?;
    let stop_events_csv = save_stop_events(&config.output_dir, &events)?;

    let category_charts = if events.is_empty() {
        log::info!("No stop events; skipping category charts");
        Vec::new()
    } else {
        render_category_charts(&config.output_dir, &events, generated_at)?
    };

    let sequences = {
        let _phase = set_phase(PipelinePhase::SequenceAnalysis);
        analysis::analyze_sequences(&events)
    };
    let sequences_csv = save_sequences(&config.output_dir, &sequences)?;
    let histogram = render_histogram(&config.output_dir, &sequences, generated_at)?;

    Ok(AnalysisReport {
        stop_events_csv,
        category_charts,
        sequences_csv,
        histogram,
        stop_count: events.len(),
        sequence_count: sequences.summaries.len(),
        longest_sequence: sequences.max_length(),
    })
}

/// Load the run log and extract its stop events.
pub fn load_stop_events(config: &RunLogConfig) -> Result<Vec<StopEvent>> {
    let table = {
        let _phase = set_phase(PipelinePhase::Loading);
        let _file = set_current_file(&config.input);
        read_run_log(&config.input)?
    };

    let _phase = set_phase(PipelinePhase::Filtering);
    analysis::filter_stops(table, config)
}

fn save_stop_events(output_dir: &Path, events: &[StopEvent]) -> Result<PathBuf> {
    let _phase = set_phase(PipelinePhase::WritingStopEvents);
    io::ensure_dir(output_dir)?;
    let path = output_dir.join(STOP_EVENTS_FILE);
    let _file = set_current_file(&path);
    writers::write_stop_events(&path, events)?;
    Ok(path)
}

fn render_category_charts(
    output_dir: &Path,
    events: &[StopEvent],
    generated_at: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    let _phase = set_phase(PipelinePhase::RenderingCharts);

    let mut specs: Vec<ChartSpec> = [StopField::User, StopField::Test, StopField::Part]
        .into_iter()
        .map(|field| charts::category_bar_chart(field, &analysis::count_by(events, field)))
        .collect();
    specs.push(charts::stage_bar_chart(&analysis::stage_breakdown(events)));

    specs
        .iter()
        .map(|spec| save_chart(output_dir, spec, generated_at))
        .collect()
}

fn save_sequences(output_dir: &Path, sequences: &SequenceAnalysis) -> Result<PathBuf> {
    let _phase = set_phase(PipelinePhase::WritingSequences);
    io::ensure_dir(output_dir)?;
    let path = output_dir.join(SEQUENCES_FILE);
    let _file = set_current_file(&path);
    writers::write_sequence_summaries(&path, &sequences.summaries)?;
    Ok(path)
}

fn render_histogram(
    output_dir: &Path,
    sequences: &SequenceAnalysis,
    generated_at: NaiveDateTime,
) -> Result<Option<PathBuf>> {
    let _phase = set_phase(PipelinePhase::RenderingCharts);
    match charts::sequence_histogram(&sequences.summaries) {
        Some(spec) => save_chart(output_dir, &spec, generated_at).map(Some),
        None => {
            log::info!("No sequences; skipping histogram");
            Ok(None)
        }
    }
}

/// Write one chart document into `output_dir`, replacing any existing file.
pub fn save_chart(
    output_dir: &Path,
    spec: &ChartSpec,
    generated_at: NaiveDateTime,
) -> Result<PathBuf> {
    io::ensure_dir(output_dir)?;
    let path = output_dir.join(spec.filename);
    let _file = set_current_file(&path);

    let file = File::create(&path)?;
    HtmlChartWriter::new(BufWriter::new(file))
        .with_timestamp(generated_at)
        .write_chart(spec)?;
    log::debug!("Rendered '{}' to {}", spec.title, path.display());
    Ok(path)
}
