pub mod csv;
pub mod html;

pub use self::csv::{
    read_sequence_summaries, read_stop_events, write_sequence_summaries, write_stop_events,
    SEQUENCE_COLUMNS, STOP_EVENT_COLUMNS,
};
pub use html::HtmlChartWriter;
