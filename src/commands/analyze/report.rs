use std::path::PathBuf;

/// Paths and counts produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub stop_events_csv: PathBuf,
    /// User, test, part, and stage charts; empty when there were no stops
    pub category_charts: Vec<PathBuf>,
    pub sequences_csv: PathBuf,
    pub histogram: Option<PathBuf>,
    pub stop_count: usize,
    pub sequence_count: usize,
    pub longest_sequence: u32,
}

impl AnalysisReport {
    /// Console lines announcing every written file, in pipeline order.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Stopped events saved to: {}",
            self.stop_events_csv.display()
        )];
        lines.extend(
            self.category_charts
                .iter()
                .map(|path| format!("HTML saved: {}", path.display())),
        );
        lines.push(format!(
            "Sequences (Test, Stage) saved to: {}",
            self.sequences_csv.display()
        ));
        if let Some(path) = &self.histogram {
            lines.push(format!("HTML saved: {}", path.display()));
        }
        lines
    }

    /// Every file written, in pipeline order.
    pub fn output_paths(&self) -> Vec<&PathBuf> {
        let mut paths = vec![&self.stop_events_csv];
        paths.extend(self.category_charts.iter());
        paths.push(&self.sequences_csv);
        paths.extend(self.histogram.iter());
        paths
    }
}
