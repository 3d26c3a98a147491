use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Category, DataPoint, PointMetadata};

pub const DEFAULT_CATEGORIES: [&str; 3] = ["metric-a", "metric-b", "metric-c"];
pub const DEFAULT_TICK_INTERVAL_MS: i64 = 100;

const BASELINE: f64 = 100.0;
const SINE_AMPLITUDE: f64 = 50.0;
const SINE_FREQUENCY: f64 = 0.001;
const NOISE_HALF_WIDTH: f64 = 5.0;

/// Anything that can produce one point for a given timestamp.
pub trait PointSource {
    fn next_point(&mut self, timestamp_ms: i64) -> DataPoint;
}

impl<F> PointSource for F
where
    F: FnMut(i64) -> DataPoint,
{
    fn next_point(&mut self, timestamp_ms: i64) -> DataPoint {
        self(timestamp_ms)
    }
}

/// Noisy sine wave over a fixed category set.
#[derive(Debug, Clone)]
pub struct SineWaveGenerator {
    categories: Vec<Category>,
    rng: StdRng,
}

impl Default for SineWaveGenerator {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl SineWaveGenerator {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| Category::new(c)).collect(),
            rng,
        }
    }

    /// Replaces the category set; an empty list keeps the current one.
    #[must_use]
    pub fn with_categories<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        if !categories.is_empty() {
            self.categories = categories;
        }
        self
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Backfills `count` points spaced one tick apart and ending at `end_time_ms`.
    ///
    /// Categories rotate round-robin so every category is evenly represented.
    pub fn generate_initial(&mut self, count: usize, end_time_ms: i64) -> Vec<DataPoint> {
        (0..count)
            .map(|i| {
                let steps_back = (count - i - 1) as i64;
                let timestamp = end_time_ms - steps_back * DEFAULT_TICK_INTERVAL_MS;
                let category = self.categories[i % self.categories.len()].clone();
                let value = self.sample_value(timestamp);
                DataPoint {
                    timestamp,
                    value,
                    category,
                    metadata: PointMetadata::Sequence(i as u64),
                }
            })
            .collect()
    }

    fn sample_value(&mut self, timestamp_ms: i64) -> f64 {
        let sine = SINE_AMPLITUDE * (timestamp_ms as f64 * SINE_FREQUENCY).sin();
        let noise = self.rng.gen_range(-NOISE_HALF_WIDTH..NOISE_HALF_WIDTH);
        (BASELINE + sine + noise).max(0.0)
    }
}

impl PointSource for SineWaveGenerator {
    fn next_point(&mut self, timestamp_ms: i64) -> DataPoint {
        let index = self.rng.gen_range(0..self.categories.len());
        let category = self.categories[index].clone();
        DataPoint {
            timestamp: timestamp_ms,
            value: self.sample_value(timestamp_ms),
            category,
            metadata: PointMetadata::Live,
        }
    }
}
