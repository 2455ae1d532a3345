use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::noise::{NoiseConfig, create_rng};
use super::wind::WindProfile;
use crate::error::Result;
use crate::sensor::{AnalogSource, TransferFunction};

/// Noisy anemometer feeding a simulated ADC
///
/// Each read evaluates the wind profile at the next sample index, maps it
/// through the inverse transfer function, adds Gaussian voltage noise and
/// quantizes the result to `[0, adc_max]`. The source never ends.
pub struct SimulatedSensor {
    transfer: TransferFunction,
    profile: WindProfile,
    normal: Normal<f32>,
    rng: ChaCha8Rng,
    index: usize,
}

impl SimulatedSensor {
    pub fn new(transfer: TransferFunction, profile: WindProfile, noise: &NoiseConfig) -> Result<Self> {
        Ok(Self {
            transfer,
            profile,
            normal: noise.distribution()?,
            rng: create_rng(noise.seed),
            index: 0,
        })
    }

    /// Next raw reading
    pub fn sample(&mut self) -> u16 {
        let speed = self.profile.speed_at(self.index);
        self.index += 1;

        let voltage = self.transfer.speed_to_voltage(speed) + self.normal.sample(&mut self.rng);
        self.transfer.voltage_to_raw(voltage)
    }
}

impl AnalogSource for SimulatedSensor {
    fn read_raw(&mut self) -> Result<Option<u16>> {
        Ok(Some(self.sample()))
    }
}

/// Draw `count` readings from a fresh simulated sensor
pub fn generate_raw_samples(
    transfer: TransferFunction,
    profile: WindProfile,
    noise: &NoiseConfig,
    count: usize,
) -> Result<Vec<u16>> {
    let mut sensor = SimulatedSensor::new(transfer, profile, noise)?;
    Ok((0..count).map(|_| sensor.sample()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noiseless_sensor_round_trips_speed() {
        let tf = TransferFunction::default();
        let raws = generate_raw_samples(tf, WindProfile::steady(10.0), &NoiseConfig::new(0.0), 5)
            .unwrap();
        for raw in raws {
            // one ADC step is ~0.1 m/s
            assert!((tf.convert(raw) - 10.0).abs() < 0.1);
        }
    }

    #[test]
    fn test_seeded_sensor_reproducible() {
        let tf = TransferFunction::default();
        let noise = NoiseConfig::new(0.02).with_seed(7);
        let a = generate_raw_samples(tf, WindProfile::steady(4.0), &noise, 50).unwrap();
        let b = generate_raw_samples(tf, WindProfile::steady(4.0), &noise, 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_readings_stay_in_adc_range() {
        let tf = TransferFunction::default();
        let noise = NoiseConfig::new(2.0).with_seed(3);
        let raws = generate_raw_samples(tf, WindProfile::steady(0.0), &noise, 200).unwrap();
        assert!(raws.iter().all(|&r| r <= tf.adc_max()));
        assert!(raws.contains(&0));
    }
}
