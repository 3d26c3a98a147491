use indexmap::IndexSet;
use proptest::prelude::*;
use streamchart::core::{Category, DataPoint};
use streamchart::pipeline::{TimeRange, filter_points};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

proptest! {
    #[test]
    fn filter_output_is_exactly_the_qualifying_subsequence(
        raw in proptest::collection::vec((-1_000i64..1_000, 0usize..4), 0..128),
        mask in proptest::collection::vec(any::<bool>(), 4),
        start in -1_200i64..1_200,
        span in 1i64..1_000,
    ) {
        let points: Vec<DataPoint> = raw
            .iter()
            .map(|&(timestamp, name)| DataPoint::new(timestamp, 1.0, NAMES[name]))
            .collect();
        let selected: IndexSet<Category> = NAMES
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| Category::new(name))
            .collect();
        let range = TimeRange::new(start, start + span).expect("range");

        let filtered = filter_points(&points, &selected, range);
        let expected: Vec<DataPoint> = points
            .iter()
            .filter(|p| {
                p.timestamp >= start
                    && p.timestamp <= start + span
                    && selected.contains(p.category.as_str())
            })
            .cloned()
            .collect();

        prop_assert_eq!(filtered, expected);
    }
}
