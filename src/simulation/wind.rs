use std::f32::consts::PI;

/// Synthetic wind: steady mean speed with a sinusoidal gust component
#[derive(Clone, Debug)]
pub struct WindProfile {
    /// Mean wind speed in m/s
    pub mean_ms: f32,
    /// Gust amplitude in m/s
    pub gust_ms: f32,
    /// Gust period in samples
    pub gust_period: f32,
}

impl WindProfile {
    pub fn steady(mean_ms: f32) -> Self {
        Self {
            mean_ms,
            gust_ms: 0.0,
            gust_period: 30.0,
        }
    }

    pub fn with_gusts(mut self, gust_ms: f32, gust_period: f32) -> Self {
        self.gust_ms = gust_ms;
        self.gust_period = gust_period;
        self
    }

    /// True wind speed at sample `index`, never below calm
    pub fn speed_at(&self, index: usize) -> f32 {
        let phase = 2.0 * PI * index as f32 / self.gust_period.max(1.0);
        (self.mean_ms + self.gust_ms * phase.sin()).max(0.0)
    }
}

/// Sample the profile at `count` consecutive indices
pub fn generate_wind_profile(profile: &WindProfile, count: usize) -> Vec<f32> {
    (0..count).map(|i| profile.speed_at(i)).collect()
}
