use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::{Result, WindError};

/// Blocking reader for one analog channel
///
/// `Ok(None)` means the source is exhausted. A hardware ADC never ends; host
/// sources (files, pipes, scripted sequences) do.
pub trait AnalogSource {
    fn read_raw(&mut self) -> Result<Option<u16>>;
}

/// Replays a fixed sequence of raw readings
pub struct ScriptedSource {
    samples: VecDeque<u16>,
    repeat: bool,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = u16>>(samples: I) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            repeat: false,
        }
    }

    /// Loop the sequence forever instead of ending after the last reading
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl AnalogSource for ScriptedSource {
    fn read_raw(&mut self) -> Result<Option<u16>> {
        let next = self.samples.pop_front();
        if self.repeat {
            if let Some(raw) = next {
                self.samples.push_back(raw);
            }
        }
        Ok(next)
    }
}

/// Reads one decimal raw reading per line, e.g. from an ADC bridge on stdin
///
/// Blank lines are skipped. Non-numeric lines and readings above `max_raw`
/// break the source contract and are returned as errors.
pub struct LineSource<R> {
    reader: R,
    max_raw: u16,
    line_number: usize,
    line: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, max_raw: u16) -> Self {
        Self {
            reader,
            max_raw,
            line_number: 0,
            line: String::new(),
        }
    }
}

impl<R: BufRead> AnalogSource for LineSource<R> {
    fn read_raw(&mut self) -> Result<Option<u16>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            let raw: u16 = text.parse().map_err(|_| WindError::InvalidSample {
                line: self.line_number,
                value: text.to_string(),
            })?;
            if raw > self.max_raw {
                return Err(WindError::SampleOutOfRange {
                    raw,
                    max: self.max_raw,
                });
            }

            log::trace!("line {}: raw {}", self.line_number, raw);
            return Ok(Some(raw));
        }
    }
}
