use crate::charts::{CHART_PADDING, begin_frame, draw_axes, floored_value_range};
use crate::core::{DataPoint, LinearScale};
use crate::error::ChartResult;
use crate::pipeline::{BAR_SAMPLE_TARGET, SampleTarget, stride_sample};
use crate::render::{Color, DrawingSurface, RenderFrame, SurfaceSize};

/// Fraction of each slot covered by its bar; the rest is split as gaps.
const BAR_FILL_RATIO: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartOptions {
    pub color: Color,
    pub y_range: Option<(f64, f64)>,
    pub sample_target: SampleTarget,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.063, 0.725, 0.506),
            y_range: None,
            sample_target: SampleTarget::Bounded(BAR_SAMPLE_TARGET),
        }
    }
}

/// One bar per sampled point, in input order, standing on the bottom axis.
pub fn render_bar_chart(
    points: &[DataPoint],
    size: SurfaceSize,
    options: &BarChartOptions,
) -> ChartResult<RenderFrame> {
    let mut frame = begin_frame(size)?;
    let sampled = stride_sample(points, options.sample_target);
    if sampled.is_empty() {
        return Ok(frame);
    }

    draw_axes(&mut frame, size);

    let width = f64::from(size.width);
    let height = f64::from(size.height);
    let chart_width = width - 2.0 * CHART_PADDING;
    let chart_height = height - 2.0 * CHART_PADDING;
    let (y_min, y_max) =
        floored_value_range(points.iter().map(|point| point.value), options.y_range);
    let height_scale = LinearScale::guarded(y_min, y_max, 0.0, chart_height)?;

    let slot_width = chart_width / sampled.len() as f64;
    let bar_width = slot_width * BAR_FILL_RATIO;
    let gap = slot_width * (1.0 - BAR_FILL_RATIO) / 2.0;
    for (index, point) in sampled.iter().enumerate() {
        let bar_height = height_scale.domain_to_pixel(point.value)?;
        let x = CHART_PADDING + index as f64 * slot_width + gap;
        let y = height - CHART_PADDING - bar_height;
        frame.draw_rect(x, y, bar_width, bar_height, Some(options.color), None, 0.0);
    }

    Ok(frame)
}
