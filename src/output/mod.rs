//! Report rendering and delivery.
//!
//! A [`Formatter`] turns one [`WindOutput`] into a single line of text and a
//! [`TextSink`] delivers it. The JSON formatter is the station's wire format;
//! text and CSV are for people and spreadsheets.

mod csv;
mod json;
mod report;
mod sink;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::report::WindReport;
pub use self::sink::{MemorySink, TextSink, WriterSink};
pub use self::text::TextFormatter;

/// Selectable report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{"ws_ms":<mean>}` wire format
    Json,
    /// Human-readable line, optionally with raw and voltage detail
    Text,
    /// Timestamped CSV rows after a one-line header
    Csv,
}

/// One smoothed report and the sample that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindOutput {
    /// Smoothed wind speed in m/s
    pub mean: f32,
    /// Unsmoothed speed of the latest sample in m/s
    pub reading: f32,
    /// Latest raw ADC reading
    pub raw: u16,
    /// Voltage of the latest raw reading
    pub voltage: f32,
    /// Number of readings behind `mean`
    pub samples: usize,
}

/// Renders one report as a single line, without the trailing newline
pub trait Formatter: Send {
    fn format(&self, output: &WindOutput) -> String;

    /// Line written once before the first report, if the format has one
    fn header(&self) -> Option<&'static str> {
        None
    }
}

/// Build the formatter for `format`. `verbose` only affects text output.
pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Current UTC time with millisecond precision, e.g. `2024-05-01T12:00:00.250Z`
pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Round to two decimals with halves away from zero. `{:.2}` alone would
/// send an exact 0.125 as 0.12.
pub(crate) fn round_hundredths(value: f32) -> f64 {
    (f64::from(value) * 100.0).round() / 100.0
}
