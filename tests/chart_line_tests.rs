use approx::assert_relative_eq;
use streamchart::ChartError;
use streamchart::charts::{
    BACKGROUND_COLOR, LineChartOptions, project_line_segments, render_line_chart,
};
use streamchart::core::{DataPoint, LinearScale, Viewport};
use streamchart::pipeline::TimeRange;
use streamchart::render::{DrawCommand, SurfaceSize};

fn size() -> SurfaceSize {
    SurfaceSize::new(600, 300)
}

fn ramp() -> Vec<DataPoint> {
    (0..5)
        .map(|i| DataPoint::new(i * 1_000, 10.0 * i as f64, "a"))
        .collect()
}

#[test]
fn empty_input_only_clears() {
    let frame = render_line_chart(&[], size(), &LineChartOptions::default()).expect("frame");
    assert_eq!(frame.commands.len(), 1);
    assert!(matches!(
        frame.commands[0],
        DrawCommand::Clear { color, .. } if color == BACKGROUND_COLOR
    ));
}

#[test]
fn zero_size_is_rejected() {
    let err = render_line_chart(&ramp(), SurfaceSize::new(0, 300), &LineChartOptions::default())
        .expect_err("zero width");
    assert_eq!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 300
        }
    );
}

#[test]
fn polyline_spans_padded_plot_area() {
    let frame = render_line_chart(&ramp(), size(), &LineChartOptions::default()).expect("frame");

    let series: Vec<_> = frame.lines().filter(|l| l.stroke_width == 2.0).collect();
    assert_eq!(series.len(), 4);

    let first = series[0];
    let last = series[3];
    assert_relative_eq!(first.x1, 40.0);
    assert_relative_eq!(first.y1, 260.0);
    assert_relative_eq!(last.x2, 560.0);
    assert_relative_eq!(last.y2, 40.0);
}

#[test]
fn axes_and_min_max_labels_are_drawn() {
    let frame = render_line_chart(&ramp(), size(), &LineChartOptions::default()).expect("frame");

    let axes: Vec<_> = frame.lines().filter(|l| l.stroke_width == 1.0).collect();
    assert_eq!(axes.len(), 2);

    let labels: Vec<&str> = frame.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, vec!["Min: 0.00", "Max: 40.00"]);
}

#[test]
fn x_range_filters_visible_points() {
    let options = LineChartOptions {
        x_range: Some(TimeRange::new(1_000, 3_000).expect("range")),
        ..LineChartOptions::default()
    };
    let frame = render_line_chart(&ramp(), size(), &options).expect("frame");

    assert_eq!(frame.lines().filter(|l| l.stroke_width == 2.0).count(), 2);
    let labels: Vec<&str> = frame.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, vec!["Min: 10.00", "Max: 30.00"]);
}

#[test]
fn single_point_draws_labels_but_no_segments() {
    let points = vec![DataPoint::new(5, 42.0, "a")];
    let frame = render_line_chart(&points, size(), &LineChartOptions::default()).expect("frame");

    assert_eq!(frame.lines().filter(|l| l.stroke_width == 2.0).count(), 0);
    assert_eq!(frame.texts().count(), 2);
}

#[test]
fn constant_values_do_not_produce_nan() {
    let points: Vec<DataPoint> = (0..4).map(|i| DataPoint::new(i, 7.0, "a")).collect();
    let frame = render_line_chart(&points, size(), &LineChartOptions::default()).expect("frame");
    assert!(frame.validate().is_ok());
}

#[test]
fn viewport_pans_and_zooms_segments() {
    let options = LineChartOptions {
        viewport: Some(Viewport::new(600, 300).with_pan(40.0, 0.0).with_zoom(2.0)),
        ..LineChartOptions::default()
    };
    let frame = render_line_chart(&ramp(), size(), &options).expect("frame");
    let first = frame
        .lines()
        .find(|l| l.stroke_width == 2.0)
        .expect("segment");
    assert_relative_eq!(first.x1, 0.0);
    assert_relative_eq!(first.y1, 520.0);
}

#[test]
fn invalid_viewport_is_rejected() {
    let options = LineChartOptions {
        viewport: Some(Viewport::new(600, 300).with_zoom(0.0)),
        ..LineChartOptions::default()
    };
    assert!(render_line_chart(&ramp(), size(), &options).is_err());
}

#[test]
fn projection_yields_one_segment_per_adjacent_pair() {
    let x = LinearScale::new(0.0, 4_000.0, 0.0, 400.0).expect("x");
    let y = LinearScale::new(0.0, 40.0, 100.0, 0.0).expect("y");
    let segments =
        project_line_segments(&ramp(), x, y, Viewport::new(400, 100)).expect("segments");
    assert_eq!(segments.len(), 4);
    assert_relative_eq!(segments[1].x1, 100.0);
    assert_relative_eq!(segments[1].y1, 75.0);
}

#[test]
fn rendering_is_deterministic() {
    let a = render_line_chart(&ramp(), size(), &LineChartOptions::default()).expect("a");
    let b = render_line_chart(&ramp(), size(), &LineChartOptions::default()).expect("b");
    assert_eq!(a, b);
}
