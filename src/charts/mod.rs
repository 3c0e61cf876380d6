//! Plotly figure specifications for the stop reports.
//!
//! Builders here are pure: they turn aggregation output into a
//! [`ChartSpec`] holding the figure JSON. Rendering to a document happens in
//! `io::writers::html`.

use crate::analysis::{CategoryCount, StageBreakdown};
use crate::core::{SequenceSummary, StopField};
use serde_json::{json, Value};

const BAR_HEIGHT: u32 = 700;
const HISTOGRAM_HEIGHT: u32 = 500;

/// A chart ready to render: output file name, document title, and the
/// plotly figure (`data` + `layout`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub filename: &'static str,
    pub title: &'static str,
    pub figure: Value,
}

/// Fixed per-field chart metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryChart {
    pub filename: &'static str,
    pub title: &'static str,
    pub category_label: &'static str,
}

impl CategoryChart {
    pub fn for_field(field: StopField) -> Self {
        match field {
            StopField::User => Self {
                filename: "stops_per_user.html",
                title: "Stops per User",
                category_label: "User",
            },
            StopField::Test => Self {
                filename: "stops_per_test.html",
                title: "Stops per Test Name",
                category_label: "Test Name",
            },
            StopField::Part => Self {
                filename: "stops_per_part.html",
                title: "Stops per Part Number",
                category_label: "Part Number",
            },
            StopField::Stage => Self {
                filename: "stops_per_stage.html",
                title: "Stops per Stage Serial Number",
                category_label: "Stage Serial Number",
            },
        }
    }
}

pub const HISTOGRAM_FILENAME: &str = "consecutive_stops_hist.html";
pub const HISTOGRAM_TITLE: &str = "Stops per (Test Name, Stage Serial) Sequence";

fn margin() -> Value {
    json!({ "l": 60, "r": 20, "t": 60, "b": 60 })
}

fn bar_layout(title: &str, category_label: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": "Stops" } },
        // Largest bar on top
        "yaxis": {
            "title": { "text": category_label },
            "type": "category",
            "categoryorder": "total ascending",
        },
        "margin": margin(),
        "height": BAR_HEIGHT,
    })
}

/// Horizontal bar chart of stop counts for one field.
pub fn category_bar_chart(field: StopField, counts: &[CategoryCount]) -> ChartSpec {
    let meta = CategoryChart::for_field(field);
    let categories: Vec<&str> = counts.iter().map(|c| c.category.as_str()).collect();
    let values: Vec<usize> = counts.iter().map(|c| c.count).collect();

    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": values,
        "y": categories,
        "text": values,
        "textposition": "auto",
        "hovertemplate": format!("{}=%{{y}}<br>Stops=%{{x}}<extra></extra>", meta.category_label),
    });

    ChartSpec {
        filename: meta.filename,
        title: meta.title,
        figure: json!({ "data": [trace], "layout": bar_layout(meta.title, meta.category_label) }),
    }
}

/// Stage bar chart whose hover shows the users and parts seen per stage.
pub fn stage_bar_chart(stages: &[StageBreakdown]) -> ChartSpec {
    let meta = CategoryChart::for_field(StopField::Stage);
    let categories: Vec<&str> = stages.iter().map(|s| s.stage_serial.as_str()).collect();
    let values: Vec<usize> = stages.iter().map(|s| s.count).collect();
    let hover: Vec<Vec<String>> = stages.iter().map(|s| vec![s.hover_text()]).collect();

    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": values,
        "y": categories,
        "text": values,
        "textposition": "auto",
        "customdata": hover,
        "hovertemplate": "%{customdata[0]}<extra></extra>",
    });

    ChartSpec {
        filename: meta.filename,
        title: meta.title,
        figure: json!({ "data": [trace], "layout": bar_layout(meta.title, meta.category_label) }),
    }
}

/// Histogram of sequence lengths with one bin per possible length.
///
/// Returns `None` when there are no sequences.
pub fn sequence_histogram(summaries: &[SequenceSummary]) -> Option<ChartSpec> {
    let max_length = summaries.iter().map(|s| s.num_stops).max()?;
    let lengths: Vec<u32> = summaries.iter().map(|s| s.num_stops).collect();

    let trace = json!({
        "type": "histogram",
        "x": lengths,
        "nbinsx": max_length,
        "hovertemplate": "Stops in Sequence=%{x}<br>count=%{y}<extra></extra>",
    });
    let layout = json!({
        "title": { "text": HISTOGRAM_TITLE },
        "xaxis": { "title": { "text": "Stops in Sequence" } },
        "yaxis": { "title": { "text": "Count of Sequences" } },
        "margin": margin(),
        "height": HISTOGRAM_HEIGHT,
    });

    Some(ChartSpec {
        filename: HISTOGRAM_FILENAME,
        title: HISTOGRAM_TITLE,
        figure: json!({ "data": [trace], "layout": layout }),
    })
}
