use crate::charts::ChartSpec;
use crate::errors::Result;
use chrono::{Local, NaiveDateTime};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::io::Write;

/// Renders a [`ChartSpec`] into a standalone HTML document that loads
/// plotly.js from its CDN.
pub struct HtmlChartWriter<W: Write> {
    writer: W,
    template: &'static str,
    generated_at: NaiveDateTime,
}

impl<W: Write> HtmlChartWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            template: include_str!("templates/chart.html"),
            generated_at: Local::now().naive_local(),
        }
    }

    /// Fix the footer timestamp, for reproducible output.
    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn write_chart(&mut self, chart: &ChartSpec) -> Result<()> {
        let html = self.render_html(chart)?;
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn render_html(&self, chart: &ChartSpec) -> Result<String> {
        let figure_json = serde_json::to_string(&chart.figure)?;

        let html = self
            .template
            .replace("{{{TITLE}}}", &encode_text(chart.title))
            .replace(
                "{{{FIGURE_JSON}}}",
                &encode_double_quoted_attribute(&figure_json),
            )
            .replace(
                "{{{TIMESTAMP}}}",
                &self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            );

        Ok(html)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
