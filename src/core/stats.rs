use serde::{Deserialize, Serialize};

/// Summary statistics over a value slice.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

/// Single-pass min/max/mean. An empty slice reports all zeros.
#[must_use]
pub fn calculate_stats(values: &[f64]) -> DataStats {
    let Some(&first) = values.first() else {
        return DataStats::default();
    };

    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    for &value in values {
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }

    DataStats {
        min,
        max,
        avg: sum / values.len() as f64,
        count: values.len(),
    }
}

/// Min/max of an iterator, `None` when empty.
pub fn value_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |bounds, value| match bounds {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
