use std::str::FromStr;

use streamchart::core::DataPoint;
use streamchart::pipeline::{Aggregation, aggregate_points};

#[test]
fn one_minute_bucket_averages_values() {
    let points = vec![
        DataPoint::new(0, 10.0, "a"),
        DataPoint::new(30_000, 20.0, "a"),
        DataPoint::new(59_999, 30.0, "a"),
    ];

    let series = aggregate_points(&points, Aggregation::OneMinute);
    assert_eq!(series.len(), 1);
    assert_eq!(series.buckets[0].timestamp, 0);
    assert_eq!(series.buckets[0].get("a"), Some(20.0));
}

#[test]
fn bucket_keys_are_interval_multiples() {
    let points = vec![
        DataPoint::new(61_000, 1.0, "a"),
        DataPoint::new(125_000, 2.0, "a"),
        DataPoint::new(299_999, 3.0, "b"),
    ];

    let series = aggregate_points(&points, Aggregation::OneMinute);
    let keys: Vec<i64> = series.buckets.iter().map(|b| b.timestamp).collect();
    assert_eq!(keys, vec![60_000, 120_000, 240_000]);

    let five = aggregate_points(&points, Aggregation::FiveMinutes);
    assert_eq!(five.len(), 1);
    assert_eq!(five.buckets[0].timestamp, 0);
}

#[test]
fn singleton_buckets_keep_their_value() {
    let points = vec![
        DataPoint::new(0, 4.5, "a"),
        DataPoint::new(3_600_000, 9.25, "a"),
    ];

    let series = aggregate_points(&points, Aggregation::OneHour);
    assert_eq!(series.len(), 2);
    assert_eq!(series.buckets[0].get("a"), Some(4.5));
    assert_eq!(series.buckets[1].get("a"), Some(9.25));
}

#[test]
fn missing_categories_are_omitted_not_zero_filled() {
    let points = vec![DataPoint::new(0, 1.0, "a"), DataPoint::new(70_000, 2.0, "b")];

    let series = aggregate_points(&points, Aggregation::OneMinute);
    assert_eq!(series.buckets[0].get("b"), None);
    assert_eq!(series.buckets[1].get("a"), None);
}

#[test]
fn bucket_categories_are_sorted_independent_of_input_order() {
    let forward = vec![
        DataPoint::new(0, 1.0, "b"),
        DataPoint::new(1, 2.0, "a"),
        DataPoint::new(2, 3.0, "c"),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    let a = aggregate_points(&forward, Aggregation::OneMinute);
    let b = aggregate_points(&backward, Aggregation::OneMinute);
    assert_eq!(a, b);

    let names: Vec<&str> = a.buckets[0].categories().map(|c| c.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn raw_mode_groups_by_exact_timestamp_with_last_write_winning() {
    let points = vec![
        DataPoint::new(1_000, 1.0, "a"),
        DataPoint::new(1_000, 2.0, "b"),
        DataPoint::new(1_000, 7.0, "a"),
        DataPoint::new(2_000, 3.0, "a"),
    ];

    let series = aggregate_points(&points, Aggregation::Raw);
    assert_eq!(series.len(), 2);
    assert_eq!(series.buckets[0].get("a"), Some(7.0));
    assert_eq!(series.buckets[0].get("b"), Some(2.0));
    assert_eq!(series.bucket(2_000).and_then(|b| b.get("a")), Some(3.0));
}

#[test]
fn negative_timestamps_floor_toward_negative_infinity() {
    let points = vec![DataPoint::new(-1, 5.0, "a"), DataPoint::new(-60_000, 7.0, "a")];

    let series = aggregate_points(&points, Aggregation::OneMinute);
    assert_eq!(series.len(), 1);
    assert_eq!(series.buckets[0].timestamp, -60_000);
    assert_eq!(series.buckets[0].get("a"), Some(6.0));
}

#[test]
fn empty_input_yields_empty_series() {
    assert!(aggregate_points(&[], Aggregation::FiveMinutes).is_empty());
}

#[test]
fn flattened_points_follow_bucket_then_category_order() {
    let points = vec![
        DataPoint::new(61_000, 4.0, "b"),
        DataPoint::new(1_000, 2.0, "b"),
        DataPoint::new(2_000, 1.0, "a"),
    ];

    let flat = aggregate_points(&points, Aggregation::OneMinute).to_points();
    let rows: Vec<(i64, &str, f64)> = flat
        .iter()
        .map(|p| (p.timestamp, p.category.as_str(), p.value))
        .collect();
    assert_eq!(rows, vec![(0, "a", 1.0), (0, "b", 2.0), (60_000, "b", 4.0)]);
}

#[test]
fn aggregation_modes_parse_and_display() {
    for mode in Aggregation::ALL {
        let text = mode.to_string();
        assert_eq!(Aggregation::from_str(&text).expect("parse"), mode);
    }
    assert_eq!(Aggregation::OneMinute.interval_ms(), Some(60_000));
    assert_eq!(Aggregation::Raw.interval_ms(), None);
    assert!(Aggregation::from_str("2min").is_err());
    assert_eq!(
        serde_json::to_string(&Aggregation::OneHour).expect("json"),
        "\"1hour\""
    );
}
