use std::sync::Arc;

use streamchart::core::{DataPoint, StreamBuffer};
use streamchart::pipeline::{Aggregation, Pipeline, TimeRange, ViewConfig, run_pipeline};

fn buffer_with(count: i64) -> StreamBuffer {
    let mut buffer = StreamBuffer::with_capacity(1_000).expect("buffer");
    for i in 0..count {
        let category = if i % 2 == 0 { "a" } else { "b" };
        buffer.append(DataPoint::new(i * 1_000, i as f64, category));
    }
    buffer
}

fn view() -> ViewConfig {
    ViewConfig::new(["a", "b"], TimeRange::new(0, 1_000_000).expect("range"))
}

#[test]
fn same_snapshot_and_view_hit_the_cache() {
    let mut buffer = buffer_with(10);
    let snapshot = buffer.snapshot();
    let mut pipeline = Pipeline::new();

    let first = pipeline.run(&snapshot, &view());
    let second = pipeline.run(&snapshot, &view());

    assert!(Arc::ptr_eq(&first, &second));
    let stats = pipeline.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn category_order_does_not_change_cache_identity() {
    let mut buffer = buffer_with(10);
    let snapshot = buffer.snapshot();
    let mut pipeline = Pipeline::new();

    pipeline.run(&snapshot, &view());
    let reordered = ViewConfig::new(["b", "a"], TimeRange::new(0, 1_000_000).expect("range"));
    pipeline.run(&snapshot, &reordered);

    assert_eq!(pipeline.cache_stats().hits, 1);
}

#[test]
fn new_generation_or_view_recomputes() {
    let mut buffer = buffer_with(10);
    let mut pipeline = Pipeline::new();

    let before = pipeline.run(&buffer.snapshot(), &view());
    buffer.append(DataPoint::new(10_000, 10.0, "a"));
    let after = pipeline.run(&buffer.snapshot(), &view());
    assert_eq!(after.filtered.len(), before.filtered.len() + 1);

    pipeline.run(
        &buffer.snapshot(),
        &view().with_aggregation(Aggregation::OneMinute),
    );
    let stats = pipeline.cache_stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 0);
}

#[test]
fn cached_output_matches_uncached_pass() {
    let mut buffer = buffer_with(50);
    let snapshot = buffer.snapshot();
    let view = view().with_aggregation(Aggregation::OneMinute);

    let mut pipeline = Pipeline::new();
    let cached = pipeline.run(&snapshot, &view);
    assert_eq!(*cached, run_pipeline(&snapshot, &view));
}

#[test]
fn cache_size_stays_bounded() {
    let mut buffer = buffer_with(1);
    let mut pipeline = Pipeline::new();
    for i in 0..100 {
        buffer.append(DataPoint::new(1_000 + i, 1.0, "a"));
        pipeline.run(&buffer.snapshot(), &view());
    }
    assert!(pipeline.cache_stats().size <= 32);

    pipeline.clear_cache();
    assert_eq!(pipeline.cache_stats().size, 0);
}

#[test]
fn raw_series_is_the_filtered_points() {
    let mut buffer = buffer_with(6);
    let output = run_pipeline(
        &buffer.snapshot(),
        &ViewConfig::new(["a"], TimeRange::new(0, 1_000_000).expect("range")),
    );
    assert_eq!(output.series, output.filtered);
    assert!(output.series.iter().all(|p| p.category.as_str() == "a"));
}

#[test]
fn toggling_a_category_flips_selection() {
    let mut view = view();
    assert!(!view.toggle_category("a"));
    assert!(!view.is_selected("a"));
    assert!(view.toggle_category("a"));
    assert!(view.is_selected("a"));
}

#[test]
fn reordered_selection_returns_identical_output() {
    let mut buffer = buffer_with(10);
    let snapshot = buffer.snapshot();
    let mut pipeline = Pipeline::new();

    let first = pipeline.run(&snapshot, &view());
    let reordered = ViewConfig::new(["b", "a"], TimeRange::new(0, 1_000_000).expect("range"));
    let second = pipeline.run(&snapshot, &reordered);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*second, run_pipeline(&snapshot, &reordered));
}
