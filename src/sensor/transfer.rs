use crate::config::{AdcConfig, SensorConfig};

/// Linear anemometer transfer function
///
/// Maps a raw ADC reading to a voltage and then to wind speed in m/s:
///
/// ```text
/// v     = raw * vref / adc_max
/// speed = max(0, (v - v_offset) / v_range * ws_max)
/// ```
///
/// Readings below the sensor's zero-wind voltage are floored at 0.0. There is
/// no upper clamp: a reading above the rated output swing produces a speed
/// above `ws_max` (raw 1023 gives about 93.15 m/s with the default sensor).
///
/// Because the ADC quantizes in steps of `vref / adc_max` (about 4.9 mV), the
/// zero-wind voltage 0.4 V falls between raw 81 (0.3959 V, clamped to 0.0)
/// and raw 82 (0.4008 V, about 0.0158 m/s). No raw value maps to exactly 0 m/s
/// through the unclamped branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunction {
    vref: f32,
    adc_max: u16,
    v_offset: f32,
    v_range: f32,
    ws_max: f32,
}

impl TransferFunction {
    pub fn new(adc: &AdcConfig, sensor: &SensorConfig) -> Self {
        Self {
            vref: adc.reference.volts(),
            adc_max: adc.max_raw,
            v_offset: sensor.v_offset,
            v_range: sensor.v_range,
            ws_max: sensor.ws_max,
        }
    }

    /// Largest raw reading accepted by [`convert`](Self::convert)
    pub fn adc_max(&self) -> u16 {
        self.adc_max
    }

    pub fn raw_to_voltage(&self, raw: u16) -> f32 {
        raw as f32 * self.vref / self.adc_max as f32
    }

    pub fn voltage_to_speed(&self, voltage: f32) -> f32 {
        let speed = (voltage - self.v_offset) / self.v_range * self.ws_max;
        if speed < 0.0 { 0.0 } else { speed }
    }

    /// Convert a raw reading in `[0, adc_max]` to wind speed in m/s
    pub fn convert(&self, raw: u16) -> f32 {
        self.voltage_to_speed(self.raw_to_voltage(raw))
    }

    /// Sensor output voltage for a given wind speed (inverse of
    /// [`voltage_to_speed`](Self::voltage_to_speed) above zero)
    pub fn speed_to_voltage(&self, speed: f32) -> f32 {
        self.v_offset + speed / self.ws_max * self.v_range
    }

    /// Quantize a voltage the way the ADC would, saturating at both rails
    pub fn voltage_to_raw(&self, voltage: f32) -> u16 {
        let raw = (voltage / self.vref * self.adc_max as f32).round();
        raw.clamp(0.0, self.adc_max as f32) as u16
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::new(&AdcConfig::default(), &SensorConfig::default())
    }
}

/// Convert a raw reading with the datasheet transfer function
pub fn convert(raw: u16) -> f32 {
    TransferFunction::default().convert(raw)
}
