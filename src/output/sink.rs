use std::io::Write;

use crate::error::Result;

/// Line-oriented text transport for reports
pub trait TextSink {
    /// Write `text` followed by a newline
    fn write_line(&mut self, text: &str) -> Result<()>;
}

/// Writes lines to any byte stream: stdout, a file, or a serial tty device
///
/// Each line is flushed immediately so a reader on the other end of the
/// link sees it without waiting for a buffer to fill.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TextSink for WriterSink<W> {
    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every written line in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TextSink for MemorySink {
    fn write_line(&mut self, text: &str) -> Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line(r#"{"ws_ms":1.00}"#).unwrap();
        sink.write_line(r#"{"ws_ms":2.00}"#).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "{\"ws_ms\":1.00}\n{\"ws_ms\":2.00}\n");
    }

    #[test]
    fn test_memory_sink_captures() {
        let mut sink = MemorySink::new();
        sink.write_line("a").unwrap();
        sink.write_line("b").unwrap();
        assert_eq!(sink.lines(), &["a".to_string(), "b".to_string()]);
    }
}
