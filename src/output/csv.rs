use super::{Formatter, WindOutput, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &WindOutput) -> String {
        format!(
            "{},{:.2},{:.2},{},{:.3},{}",
            iso8601_timestamp(),
            output.mean,
            output.reading,
            output.raw,
            output.voltage,
            output.samples
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,ws_ms,reading_ms,raw,voltage,samples")
    }
}
