use super::{Formatter, WindOutput};
use crate::constants::SMOOTHING_DEPTH;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &WindOutput) -> String {
        if self.verbose {
            format!(
                "Wind: {:>6.2} m/s (last: {:>6.2} m/s) [raw: {:>4}, {:.3} V, window: {}/{}]",
                output.mean,
                output.reading,
                output.raw,
                output.voltage,
                output.samples,
                SMOOTHING_DEPTH
            )
        } else {
            format!("Wind: {:>6.2} m/s", output.mean)
        }
    }
}
