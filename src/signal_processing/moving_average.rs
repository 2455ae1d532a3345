use crate::constants::SMOOTHING_DEPTH;

/// Fixed-depth moving average over the most recent wind readings
///
/// Stores up to `N` readings in a circular array. Once full, each push
/// overwrites the oldest reading. Memory and averaging cost stay O(N)
/// regardless of how long the station runs.
///
/// During warm-up (fewer than `N` pushes) the mean is taken over the readings
/// pushed so far, not over a zero-padded window.
#[derive(Debug, Clone)]
pub struct SmoothingBuffer<const N: usize> {
    values: [f32; N],
    /// Next slot to write; always the oldest reading once the buffer is full
    index: usize,
    count: usize,
}

/// Smoothing buffer at the station's reporting depth
pub type WindAverage = SmoothingBuffer<SMOOTHING_DEPTH>;

impl<const N: usize> SmoothingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        assert!(N > 0, "smoothing depth must be positive");
        Self {
            values: [0.0; N],
            index: 0,
            count: 0,
        }
    }

    /// Add a reading, evicting the oldest once `N` readings are stored
    ///
    /// # Arguments
    /// * `reading` - Converted wind speed in m/s
    pub fn push(&mut self, reading: f32) {
        self.values[self.index] = reading;
        self.index = (self.index + 1) % N;

        if self.count < N {
            self.count += 1;
        }
    }

    /// Arithmetic mean of the stored readings
    ///
    /// # Returns
    /// `None` before the first push, otherwise the mean of the
    /// `min(pushes, N)` most recent readings
    pub fn mean(&self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }
        Some(self.readings().sum::<f32>() / self.count as f32)
    }

    /// Stored readings, oldest first
    pub fn readings(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.count < N { 0 } else { self.index };
        (0..self.count).map(move |i| self.values[(start + i) % N])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SmoothingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
