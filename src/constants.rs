//! Fixed station constants
//!
//! Sensor transfer-function values come from the anemometer datasheet: the
//! output swings linearly from 0.4 V at 0 m/s to 2.0 V at 32.4 m/s.

/// ADC reference voltage in volts (default reference).
pub const VREF: f32 = 5.0;

/// Largest raw ADC reading (10-bit converter).
pub const ADC_MAX: u16 = 1023;

/// Sensor output voltage at 0 m/s.
pub const V_OFFSET: f32 = 0.4;

/// Sensor output swing in volts between 0 m/s and `WS_MAX`.
pub const V_RANGE: f32 = 1.6;

/// Wind speed in m/s at the top of the sensor's rated output swing.
pub const WS_MAX: f32 = 32.4;

/// Number of readings averaged by the smoothing buffer.
pub const SMOOTHING_DEPTH: usize = 10;

/// Interval between reports in milliseconds (1 Hz output).
pub const OUTPUT_PERIOD_MS: u64 = 1000;

/// Serial link rate used by the reporting transport.
pub const BAUD_RATE: u32 = 115_200;
