use indexmap::IndexSet;

use crate::core::{Category, DataPoint};
use crate::pipeline::TimeRange;

/// Keeps points of a selected category whose timestamp lies in `range`.
///
/// Output is a stable subsequence of `points`. An empty selection yields an
/// empty result.
#[must_use]
pub fn filter_points(
    points: &[DataPoint],
    selected: &IndexSet<Category>,
    range: TimeRange,
) -> Vec<DataPoint> {
    if selected.is_empty() {
        return Vec::new();
    }

    points
        .iter()
        .filter(|point| range.contains(point.timestamp) && selected.contains(&point.category))
        .cloned()
        .collect()
}

/// Returns points whose timestamp falls inside an inclusive window.
///
/// Reversed bounds are swapped rather than rejected.
#[must_use]
pub fn points_in_time_window(points: &[DataPoint], start: i64, end: i64) -> Vec<DataPoint> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .filter(|point| point.timestamp >= min_t && point.timestamp <= max_t)
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn unique_categories(points: &[DataPoint]) -> IndexSet<Category> {
    points.iter().map(|point| point.category.clone()).collect()
}
