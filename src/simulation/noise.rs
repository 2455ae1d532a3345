use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, WindError};

/// Additive Gaussian noise on the sensor output voltage
#[derive(Clone, Debug, Default)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    /// Standard deviation in volts
    pub voltage_std: f32,
}

impl NoiseConfig {
    pub fn new(voltage_std: f32) -> Self {
        Self {
            seed: None,
            voltage_std,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn distribution(&self) -> Result<Normal<f32>> {
        if !self.voltage_std.is_finite() || self.voltage_std < 0.0 {
            return Err(WindError::Config(format!(
                "voltage noise must be a finite, non-negative deviation, got {}",
                self.voltage_std
            )));
        }
        Normal::new(0.0, self.voltage_std)
            .map_err(|e| WindError::Config(format!("invalid voltage noise: {}", e)))
    }
}

pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Add noise to a run of voltages in place
pub fn apply_noise(voltages: &mut [f32], config: &NoiseConfig) -> Result<()> {
    let normal = config.distribution()?;
    let mut rng = create_rng(config.seed);
    for v in voltages.iter_mut() {
        *v += normal.sample(&mut rng);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_noise_reproducible() {
        let config = NoiseConfig::new(0.05).with_seed(42);
        let mut a = vec![1.0; 64];
        let mut b = vec![1.0; 64];
        apply_noise(&mut a, &config).unwrap();
        apply_noise(&mut b, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().any(|&v| v != 1.0));
    }

    #[test]
    fn test_zero_noise_is_identity() {
        let config = NoiseConfig::new(0.0).with_seed(1);
        let mut v = vec![0.5; 16];
        apply_noise(&mut v, &config).unwrap();
        assert!(v.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn test_negative_noise_rejected() {
        let config = NoiseConfig::new(-1.0);
        assert!(matches!(config.distribution(), Err(WindError::Config(_))));

        let mut v = vec![0.5; 4];
        assert!(apply_noise(&mut v, &config).is_err());
        assert!(v.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn test_non_finite_noise_rejected() {
        assert!(NoiseConfig::new(f32::NAN).distribution().is_err());
        assert!(NoiseConfig::new(f32::INFINITY).distribution().is_err());
    }
}
