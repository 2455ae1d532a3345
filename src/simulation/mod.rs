mod noise;
mod sensor;
mod wind;

pub use noise::{NoiseConfig, apply_noise};
pub use sensor::{SimulatedSensor, generate_raw_samples};
pub use wind::{WindProfile, generate_wind_profile};
