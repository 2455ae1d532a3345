use serde::{Deserialize, Serialize};

use crate::error::{Result, WindError};

/// Decoded report line as received by a host on the serial link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReport {
    pub ws_ms: f32,
}

impl WindReport {
    /// Decode one `{"ws_ms":<value>}` line. Surrounding whitespace and the
    /// line terminator are ignored.
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(WindError::Decode("empty line".into()));
        }
        serde_json::from_str(line).map_err(|e| WindError::Decode(e.to_string()))
    }

    /// Value rounded to the two decimals of the wire format
    pub fn rounded(&self) -> f32 {
        (self.ws_ms * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_line() {
        let report = WindReport::parse_line("{\"ws_ms\":3.46}\r\n").unwrap();
        assert!((report.ws_ms - 3.46).abs() < 1e-6);
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let report = WindReport::parse_line(r#"  { "ws_ms": 1.57 } "#).unwrap();
        assert!((report.ws_ms - 1.57).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        for line in ["", "   ", "garbage", r#"{"ws_ms":"#, r#"{"speed":1.0}"#, r#"{"ws_ms":"x"}"#] {
            assert!(
                matches!(WindReport::parse_line(line), Err(WindError::Decode(_))),
                "line {:?} should not decode",
                line
            );
        }
    }

    #[test]
    fn test_rounded() {
        let report = WindReport { ws_ms: 1.5749 };
        assert!((report.rounded() - 1.57).abs() < 1e-6);
    }
}
