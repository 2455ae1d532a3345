//! Configuration for the wind-speed station.
//!
//! Every default equals the fixed datasheet constant in [`crate::constants`].
//! A TOML file may override any subset of the values for a different sensor
//! variant; missing keys keep their defaults:
//!
//! ```toml
//! [adc]
//! reference = { external = 3.3 }
//!
//! [sensor]
//! v_offset = 0.4
//! ```
//!
//! The report period and smoothing depth are not configurable.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{ADC_MAX, BAUD_RATE, V_OFFSET, V_RANGE, VREF, WS_MAX};
use crate::error::{Result, WindError};

/// ADC reference voltage selection
///
/// Selected once at startup, before the first sample is taken.
///
/// # Parsing formats
/// - `default` - the board's default reference (5.0 V)
/// - `3.3` or `3.3v` - an external reference of the given voltage
///
/// # Example
/// ```
/// use windspeed::config::ReferenceVoltage;
///
/// let reference: ReferenceVoltage = "3.3v".parse().unwrap();
/// assert!((reference.volts() - 3.3).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceVoltage {
    /// Default reference, `VREF`
    #[default]
    Default,
    /// External reference pin driven at the given voltage
    External(f32),
}

impl ReferenceVoltage {
    /// Reference level in volts
    pub fn volts(&self) -> f32 {
        match self {
            ReferenceVoltage::Default => VREF,
            ReferenceVoltage::External(v) => *v,
        }
    }
}

impl fmt::Display for ReferenceVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceVoltage::Default => write!(f, "default ({:.2}V)", VREF),
            ReferenceVoltage::External(v) => write!(f, "external ({:.2}V)", v),
        }
    }
}

impl FromStr for ReferenceVoltage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("default") {
            return Ok(ReferenceVoltage::Default);
        }

        let num = s
            .strip_suffix('v')
            .or_else(|| s.strip_suffix('V'))
            .unwrap_or(s);

        let volts: f32 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid reference voltage: {}", s))?;
        if !volts.is_finite() || volts <= 0.0 {
            return Err("reference voltage must be a positive finite number".to_string());
        }
        Ok(ReferenceVoltage::External(volts))
    }
}

/// System-wide station configuration
///
/// Use `StationConfig::default()` for the datasheet values.
///
/// # Example
/// ```
/// use windspeed::config::StationConfig;
///
/// let config = StationConfig::default();
/// assert_eq!(config.adc.max_raw, 1023);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Analog input configuration
    pub adc: AdcConfig,
    /// Sensor transfer function
    pub sensor: SensorConfig,
    /// Report transport configuration
    pub serial: SerialConfig,
}

/// Analog input configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdcConfig {
    /// Reference voltage the converter measures against
    pub reference: ReferenceVoltage,
    /// Largest raw reading the converter produces
    pub max_raw: u16,
}

/// Linear sensor transfer function parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Output voltage at 0 m/s
    pub v_offset: f32,
    /// Output swing in volts from 0 m/s to `ws_max`
    pub v_range: f32,
    /// Wind speed in m/s at the top of the output swing
    pub ws_max: f32,
}

/// Report transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Link rate of the serial transport. Informational on hosts where the
    /// device is configured externally (e.g. `stty`).
    pub baud_rate: u32,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            reference: ReferenceVoltage::Default,
            max_raw: ADC_MAX,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            v_offset: V_OFFSET,
            v_range: V_RANGE,
            ws_max: WS_MAX,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: BAUD_RATE,
        }
    }
}

impl StationConfig {
    /// Parse a TOML document, filling missing keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| WindError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Reject values that would make the transfer function undefined or
    /// break its `speed >= 0` guarantee
    pub fn validate(&self) -> Result<()> {
        if self.adc.max_raw == 0 {
            return Err(WindError::Config("adc.max_raw must be positive".into()));
        }
        check_positive("adc.reference", self.adc.reference.volts())?;
        check_positive("sensor.v_range", self.sensor.v_range)?;
        check_positive("sensor.ws_max", self.sensor.ws_max)?;
        if !self.sensor.v_offset.is_finite() || self.sensor.v_offset < 0.0 {
            return Err(WindError::Config(
                "sensor.v_offset must be a finite, non-negative voltage".into(),
            ));
        }
        if self.serial.baud_rate == 0 {
            return Err(WindError::Config("serial.baud_rate must be positive".into()));
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WindError::Config(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_default() {
        let reference: ReferenceVoltage = "default".parse().unwrap();
        assert_eq!(reference, ReferenceVoltage::Default);
        assert!((reference.volts() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_reference_external() {
        let reference: ReferenceVoltage = "3.3".parse().unwrap();
        assert_eq!(reference, ReferenceVoltage::External(3.3));

        let reference: ReferenceVoltage = "2.56V".parse().unwrap();
        assert_eq!(reference, ReferenceVoltage::External(2.56));
    }

    #[test]
    fn test_reference_invalid() {
        assert!("abc".parse::<ReferenceVoltage>().is_err());
        assert!("-1v".parse::<ReferenceVoltage>().is_err());
        assert!("0".parse::<ReferenceVoltage>().is_err());
        assert!("nan".parse::<ReferenceVoltage>().is_err());
        assert!("inf".parse::<ReferenceVoltage>().is_err());
        assert!("-inf V".parse::<ReferenceVoltage>().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_reference() {
        let mut config = StationConfig::default();
        config.adc.reference = ReferenceVoltage::External(f32::NAN);
        assert!(matches!(config.validate(), Err(WindError::Config(_))));

        config.adc.reference = ReferenceVoltage::External(f32::INFINITY);
        assert!(matches!(config.validate(), Err(WindError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_sensor() {
        let err = StationConfig::from_toml_str("[sensor]\nws_max = -32.4\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));

        let err = StationConfig::from_toml_str("[sensor]\nv_offset = -0.1\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));

        let err = StationConfig::from_toml_str("[sensor]\nv_range = nan\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));

        let err = StationConfig::from_toml_str("[sensor]\nws_max = inf\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));
    }

    #[test]
    fn test_defaults_match_datasheet() {
        let config = StationConfig::default();
        assert_eq!(config.adc.reference, ReferenceVoltage::Default);
        assert_eq!(config.adc.max_raw, 1023);
        assert_eq!(config.sensor.v_offset, 0.4);
        assert_eq!(config.sensor.v_range, 1.6);
        assert_eq!(config.sensor.ws_max, 32.4);
        assert_eq!(config.serial.baud_rate, 115_200);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StationConfig::from_toml_str(
            r#"
            [adc]
            reference = { external = 3.3 }

            [sensor]
            ws_max = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.adc.reference, ReferenceVoltage::External(3.3));
        assert_eq!(config.adc.max_raw, 1023);
        assert_eq!(config.sensor.ws_max, 30.0);
        assert_eq!(config.sensor.v_offset, 0.4);
    }

    #[test]
    fn test_toml_rejects_bad_values() {
        let err = StationConfig::from_toml_str("[sensor]\nv_range = 0.0\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));

        let err = StationConfig::from_toml_str("[adc]\nmax_raw = 0\n").unwrap_err();
        assert!(matches!(err, WindError::Config(_)));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = StationConfig::from_toml_str("").unwrap();
        assert_eq!(config.adc.max_raw, 1023);
    }
}
