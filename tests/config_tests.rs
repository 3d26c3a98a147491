use streamchart::DashboardConfig;
use streamchart::api::ChartColors;
use streamchart::pipeline::Aggregation;

#[test]
fn empty_document_yields_defaults() {
    let config = DashboardConfig::from_json_str("{}").expect("defaults");
    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.buffer_capacity, 10_000);
    assert_eq!(config.tick_interval_ms, 100);
    assert_eq!(config.initial_point_count, 5_000);
    assert_eq!((config.chart_width, config.chart_height), (600, 300));
    assert_eq!(config.aggregation, Aggregation::Raw);
}

#[test]
fn json_round_trip_preserves_config() {
    let config = DashboardConfig::default()
        .with_buffer_capacity(2_000)
        .with_categories(["cpu", "mem"])
        .with_aggregation(Aggregation::OneHour)
        .with_device_pixel_ratio(2.0);
    let json = config.to_json_pretty().expect("serialize");
    let parsed = DashboardConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_document_overrides_selected_fields() {
    let config = DashboardConfig::from_json_str(
        r##"{ "buffer_capacity": 250, "aggregation": "5min", "colors": { "line": "#ff0000" } }"##,
    )
    .expect("parse");
    assert_eq!(config.buffer_capacity, 250);
    assert_eq!(config.aggregation, Aggregation::FiveMinutes);
    assert_eq!(config.colors.line, "#ff0000");
    assert_eq!(config.colors.bar, ChartColors::default().bar);
}

#[test]
fn malformed_json_is_rejected() {
    assert!(DashboardConfig::from_json_str("{ not json").is_err());
}

#[test]
fn zero_capacity_is_rejected() {
    let err = DashboardConfig::from_json_str(r#"{ "buffer_capacity": 0 }"#);
    assert!(err.is_err());
    assert!(DashboardConfig::default().with_buffer_capacity(0).validate().is_err());
}

#[test]
fn invalid_color_is_rejected() {
    let colors = ChartColors {
        scatter: "orange".to_owned(),
        ..ChartColors::default()
    };
    assert!(DashboardConfig::default().with_colors(colors).validate().is_err());
}

#[test]
fn out_of_range_settings_are_rejected() {
    let base = DashboardConfig::default;
    assert!(base().with_tick_interval_ms(0).validate().is_err());
    assert!(base().with_chart_size(0, 300).validate().is_err());
    assert!(base().with_device_pixel_ratio(f64::NAN).validate().is_err());
    assert!(base().with_window(0, 0).validate().is_err());
    assert!(base().with_metrics_refresh_ms(-1.0).validate().is_err());
    assert!(base().with_fps_window(0).validate().is_err());
    assert!(base().with_sample_targets(100, 0, 100).validate().is_err());
    assert!(base().with_categories(["ok", ""]).validate().is_err());
}

#[test]
fn time_range_spans_lookback_and_lookahead() {
    let config = DashboardConfig::default().with_window(1_000, 500);
    let range = config.time_range_around(10_000).expect("range");
    assert_eq!(range.start(), 9_000);
    assert_eq!(range.end(), 10_500);
}

#[test]
fn surface_size_carries_device_pixel_ratio() {
    let size = DashboardConfig::default()
        .with_chart_size(300, 150)
        .with_device_pixel_ratio(2.0)
        .surface_size();
    assert_eq!(size.backing_size(), (600, 300));
}

#[test]
fn overflowing_window_is_rejected() {
    assert!(DashboardConfig::default().with_window(i64::MAX, 1).validate().is_err());
    let json = format!(r#"{{ "lookback_ms": {}, "lookahead_ms": {} }}"#, i64::MAX, i64::MAX);
    assert!(DashboardConfig::from_json_str(&json).is_err());
}
