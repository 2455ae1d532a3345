use crate::config::StationConfig;
use crate::error::Result;
use crate::output::{Formatter, TextSink, WindOutput};
use crate::sensor::{AnalogSource, TransferFunction};
use crate::signal_processing::WindAverage;

/// Sample → convert → smooth pipeline
///
/// Owns all mutable station state. One call to [`step`](Self::step) is one
/// reporting iteration; scheduling is left to the caller.
pub struct WindProcessor {
    transfer: TransferFunction,
    average: WindAverage,
}

impl WindProcessor {
    pub fn new(config: &StationConfig) -> Self {
        Self::with_state(
            TransferFunction::new(&config.adc, &config.sensor),
            WindAverage::new(),
        )
    }

    /// Build from an explicit transfer function and pre-filled buffer
    pub fn with_state(transfer: TransferFunction, average: WindAverage) -> Self {
        Self { transfer, average }
    }

    /// Convert one raw reading, push it into the average and return the
    /// updated report
    pub fn process_raw(&mut self, raw: u16) -> WindOutput {
        let voltage = self.transfer.raw_to_voltage(raw);
        let reading = self.transfer.voltage_to_speed(voltage);

        self.average.push(reading);
        // Never empty after a push.
        let mean = self.average.mean().unwrap_or(reading);

        WindOutput {
            mean,
            reading,
            raw,
            voltage,
            samples: self.average.len(),
        }
    }

    /// Run one full iteration against the given collaborators
    ///
    /// # Returns
    /// The emitted report, or `None` when the source is exhausted (nothing
    /// is written in that case)
    pub fn step<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        formatter: &dyn Formatter,
    ) -> Result<Option<WindOutput>>
    where
        S: AnalogSource + ?Sized,
        K: TextSink + ?Sized,
    {
        let Some(raw) = source.read_raw()? else {
            return Ok(None);
        };

        let output = self.process_raw(raw);
        log::trace!(
            "raw {} -> {:.3} V -> {:.3} m/s",
            raw,
            output.voltage,
            output.reading
        );

        sink.write_line(&formatter.format(&output))?;
        Ok(Some(output))
    }

    pub fn transfer(&self) -> &TransferFunction {
        &self.transfer
    }

    pub fn average(&self) -> &WindAverage {
        &self.average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{JsonFormatter, MemorySink};
    use crate::sensor::ScriptedSource;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_raw_reports_zero() {
        let mut processor = WindProcessor::new(&StationConfig::default());
        let mut source = ScriptedSource::new([0]);
        let mut sink = MemorySink::new();

        let output = processor
            .step(&mut source, &mut sink, &JsonFormatter)
            .unwrap()
            .unwrap();

        assert_eq!(output.voltage, 0.0);
        assert_eq!(output.reading, 0.0);
        assert_eq!(output.mean, 0.0);
        assert_eq!(sink.lines(), &[r#"{"ws_ms":0.00}"#.to_string()]);
    }

    #[test]
    fn test_exhausted_source_writes_nothing() {
        let mut processor = WindProcessor::new(&StationConfig::default());
        let mut source = ScriptedSource::new(Vec::<u16>::new());
        let mut sink = MemorySink::new();

        let output = processor.step(&mut source, &mut sink, &JsonFormatter).unwrap();
        assert!(output.is_none());
        assert!(sink.lines().is_empty());
        assert!(processor.average().is_empty());
    }

    #[test]
    fn test_mean_tracks_window() {
        let mut processor = WindProcessor::new(&StationConfig::default());

        // raw 1023 -> ~93.15 m/s, raw 0 -> 0 m/s
        let first = processor.process_raw(1023);
        assert_abs_diff_eq!(first.mean, 93.15, epsilon = 1e-3);
        assert_eq!(first.samples, 1);

        let second = processor.process_raw(0);
        assert_abs_diff_eq!(second.mean, 93.15 / 2.0, epsilon = 1e-3);
        assert_eq!(second.reading, 0.0);
        assert_eq!(second.samples, 2);
    }

    #[test]
    fn test_injected_state() {
        let mut average = WindAverage::new();
        for _ in 0..9 {
            average.push(10.0);
        }
        let mut processor = WindProcessor::with_state(TransferFunction::default(), average);

        let output = processor.process_raw(0);
        assert_eq!(output.samples, 10);
        assert_abs_diff_eq!(output.mean, 9.0, epsilon = 1e-5);
    }
}
