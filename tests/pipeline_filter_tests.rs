use indexmap::IndexSet;
use streamchart::ChartError;
use streamchart::core::{Category, DataPoint};
use streamchart::pipeline::{TimeRange, filter_points, points_in_time_window, unique_categories};

fn selection(names: &[&str]) -> IndexSet<Category> {
    names.iter().map(|name| Category::new(name)).collect()
}

fn sample_points() -> Vec<DataPoint> {
    vec![
        DataPoint::new(0, 1.0, "a"),
        DataPoint::new(5, 2.0, "b"),
        DataPoint::new(10, 3.0, "a"),
        DataPoint::new(15, 4.0, "c"),
        DataPoint::new(20, 5.0, "a"),
    ]
}

#[test]
fn filter_keeps_selected_categories_inside_inclusive_range() {
    let range = TimeRange::new(5, 20).expect("range");
    let filtered = filter_points(&sample_points(), &selection(&["a", "b"]), range);

    let timestamps: Vec<i64> = filtered.iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![5, 10, 20]);
}

#[test]
fn filter_with_empty_selection_is_empty() {
    let range = TimeRange::new(0, 100).expect("range");
    assert!(filter_points(&sample_points(), &IndexSet::new(), range).is_empty());
}

#[test]
fn filter_ignores_unknown_categories() {
    let range = TimeRange::new(0, 100).expect("range");
    assert!(filter_points(&sample_points(), &selection(&["zzz"]), range).is_empty());
}

#[test]
fn reversed_or_empty_time_range_is_rejected() {
    assert_eq!(
        TimeRange::new(10, 5),
        Err(ChartError::InvalidRange { start: 10, end: 5 })
    );
    assert!(TimeRange::new(7, 7).is_err());
}

#[test]
fn trailing_range_ends_at_given_instant() {
    let range = TimeRange::trailing(3_600_000, 3_600_000).expect("range");
    assert_eq!(range.start(), 0);
    assert_eq!(range.end(), 3_600_000);
    assert!(range.contains(0));
    assert!(range.contains(3_600_000));
    assert!(!range.contains(3_600_001));
}

#[test]
fn time_window_swaps_reversed_bounds() {
    let forward = points_in_time_window(&sample_points(), 5, 15);
    let reversed = points_in_time_window(&sample_points(), 15, 5);
    assert_eq!(forward, reversed);
    assert_eq!(forward.len(), 3);
}

#[test]
fn unique_categories_keep_first_seen_order() {
    let names: Vec<String> = unique_categories(&sample_points())
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn time_range_json_round_trips_as_pair() {
    let range = TimeRange::new(1, 2).expect("range");
    let json = serde_json::to_string(&range).expect("serialize");
    assert_eq!(json, "[1,2]");
    assert!(serde_json::from_str::<TimeRange>("[2,1]").is_err());
}
