use std::time::Duration;

use crossbeam_channel::tick;

use crate::constants::OUTPUT_PERIOD_MS;
use crate::error::Result;
use crate::output::{Formatter, TextSink};
use crate::processing::WindProcessor;
use crate::sensor::AnalogSource;

/// Drives [`WindProcessor::step`] at a fixed period
///
/// The first report is produced immediately; each following one waits for
/// the next tick of a `crossbeam_channel::tick` timer. Ticks are scheduled
/// from a fixed start, so time spent sampling and writing does not
/// accumulate as drift.
#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    max_reports: Option<usize>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            max_reports: None,
        }
    }

    /// Stop after `count` reports
    pub fn with_limit(mut self, count: usize) -> Self {
        self.max_reports = Some(count);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until the source is exhausted or the report limit is reached
    ///
    /// # Returns
    /// Number of reports written
    pub fn run<S, K>(
        &self,
        processor: &mut WindProcessor,
        source: &mut S,
        sink: &mut K,
        formatter: &dyn Formatter,
    ) -> Result<usize>
    where
        S: AnalogSource + ?Sized,
        K: TextSink + ?Sized,
    {
        if self.max_reports == Some(0) {
            return Ok(0);
        }

        let ticker = tick(self.period);

        if let Some(header) = formatter.header() {
            sink.write_line(header)?;
        }

        let mut reports = 0;
        loop {
            match processor.step(source, sink, formatter)? {
                Some(output) => {
                    reports += 1;
                    log::debug!(
                        "report {}: mean {:.2} m/s over {} samples",
                        reports,
                        output.mean,
                        output.samples
                    );
                }
                None => {
                    log::info!("Analog source exhausted after {} reports", reports);
                    break;
                }
            }

            if self.max_reports.is_some_and(|max| reports >= max) {
                log::info!("Report limit of {} reached", reports);
                break;
            }

            if ticker.recv().is_err() {
                break;
            }
        }

        Ok(reports)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(OUTPUT_PERIOD_MS))
    }
}
