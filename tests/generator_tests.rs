use streamchart::core::{DEFAULT_CATEGORIES, PointMetadata, PointSource, SineWaveGenerator};

#[test]
fn initial_backfill_is_evenly_spaced_and_round_robin() {
    let mut generator = SineWaveGenerator::seeded(7);
    let points = generator.generate_initial(6, 10_000);

    let timestamps: Vec<i64> = points.iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![9_500, 9_600, 9_700, 9_800, 9_900, 10_000]);

    let categories: Vec<&str> = points.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(
        categories,
        vec!["metric-a", "metric-b", "metric-c", "metric-a", "metric-b", "metric-c"]
    );
    assert_eq!(points[3].metadata, PointMetadata::Sequence(3));
}

#[test]
fn generated_values_stay_in_sine_envelope() {
    let mut generator = SineWaveGenerator::seeded(42);
    for point in generator.generate_initial(2_000, 1_700_000_000_000) {
        assert!(point.value >= 0.0);
        assert!(point.value <= 155.0, "value {} above envelope", point.value);
        assert!(point.value >= 45.0, "value {} below envelope", point.value);
    }
}

#[test]
fn live_points_use_requested_timestamp_and_known_category() {
    let mut generator = SineWaveGenerator::seeded(3);
    let point = generator.next_point(123_456);

    assert_eq!(point.timestamp, 123_456);
    assert_eq!(point.metadata, PointMetadata::Live);
    assert!(DEFAULT_CATEGORIES.contains(&point.category.as_str()));
}

#[test]
fn seeded_generators_are_reproducible() {
    let mut a = SineWaveGenerator::seeded(99);
    let mut b = SineWaveGenerator::seeded(99);
    assert_eq!(a.generate_initial(50, 0), b.generate_initial(50, 0));
}

#[test]
fn custom_categories_replace_defaults() {
    let mut generator = SineWaveGenerator::seeded(1).with_categories(["cpu", "mem"]);
    let names: Vec<&str> = generator.categories().iter().map(|c| c.as_str()).collect();
    assert_eq!(names, vec!["cpu", "mem"]);

    let point = generator.next_point(0);
    assert!(point.category.as_str() == "cpu" || point.category.as_str() == "mem");
}

#[test]
fn closures_are_point_sources() {
    let mut source = |timestamp: i64| streamchart::core::DataPoint::new(timestamp, 1.0, "x");
    let point = source.next_point(5);
    assert_eq!(point.timestamp, 5);
}
