use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::floor_to_interval;
use crate::core::{Category, DataPoint, PointMetadata};
use crate::pipeline::Aggregation;

/// Per-category values of one bucket, sorted by category.
pub type BucketValues = SmallVec<[(Category, f64); 4]>;

/// One time bucket of an aggregated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBucket {
    pub timestamp: i64,
    pub values: BucketValues,
}

impl AggregatedBucket {
    #[must_use]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name.as_str() == category)
            .map(|(_, value)| *value)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.values.iter().map(|(name, _)| name)
    }
}

/// Buckets ordered by timestamp ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub mode: Aggregation,
    pub buckets: Vec<AggregatedBucket>,
}

impl AggregatedSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn bucket(&self, timestamp: i64) -> Option<&AggregatedBucket> {
        self.buckets
            .binary_search_by_key(&timestamp, |bucket| bucket.timestamp)
            .ok()
            .map(|index| &self.buckets[index])
    }

    /// Flattens buckets into points, bucket by bucket then category by category.
    #[must_use]
    pub fn to_points(&self) -> Vec<DataPoint> {
        self.buckets
            .iter()
            .flat_map(|bucket| {
                bucket.values.iter().map(|(category, value)| DataPoint {
                    timestamp: bucket.timestamp,
                    value: *value,
                    category: category.clone(),
                    metadata: PointMetadata::None,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(self) -> f64 {
        self.sum / f64::from(self.count)
    }
}

/// Groups points into time buckets according to `mode`.
///
/// `Raw` groups by exact timestamp and keeps the last arriving value for a
/// duplicated `(timestamp, category)`. Bucketed modes average every value of a
/// category inside `floor(t / interval) * interval`. Categories absent from a
/// bucket are omitted, never zero-filled.
#[must_use]
pub fn aggregate_points(points: &[DataPoint], mode: Aggregation) -> AggregatedSeries {
    let buckets = match mode.interval_ms() {
        None => aggregate_raw(points),
        Some(interval_ms) => aggregate_bucketed(points, interval_ms),
    };
    AggregatedSeries { mode, buckets }
}

fn aggregate_raw(points: &[DataPoint]) -> Vec<AggregatedBucket> {
    let mut grouped: BTreeMap<i64, BTreeMap<&Category, f64>> = BTreeMap::new();
    for point in points {
        grouped
            .entry(point.timestamp)
            .or_default()
            .insert(&point.category, point.value);
    }

    grouped
        .into_iter()
        .map(|(timestamp, values)| AggregatedBucket {
            timestamp,
            values: values
                .into_iter()
                .map(|(category, value)| (category.clone(), value))
                .collect(),
        })
        .collect()
}

fn aggregate_bucketed(points: &[DataPoint], interval_ms: i64) -> Vec<AggregatedBucket> {
    let mut grouped: BTreeMap<i64, BTreeMap<&Category, MeanAccumulator>> = BTreeMap::new();
    for point in points {
        let bucket = floor_to_interval(point.timestamp, interval_ms);
        grouped
            .entry(bucket)
            .or_default()
            .entry(&point.category)
            .or_default()
            .push(point.value);
    }

    grouped
        .into_iter()
        .map(|(timestamp, values)| AggregatedBucket {
            timestamp,
            values: values
                .into_iter()
                .map(|(category, acc)| (category.clone(), acc.mean()))
                .collect(),
        })
        .collect()
}
