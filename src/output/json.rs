use super::{Formatter, WindOutput, round_hundredths};

/// Wire format: `{"ws_ms":3.46}`, two decimals, no whitespace.
/// Halves round away from zero, so 0.125 is sent as 0.13.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &WindOutput) -> String {
        format!(r#"{{"ws_ms":{:.2}}}"#, round_hundredths(output.mean))
    }
}
