use crate::charts::{CHART_PADDING, begin_frame, draw_axes, floored_value_range};
use crate::core::{DataPoint, LinearScale};
use crate::error::ChartResult;
use crate::pipeline::{SCATTER_SAMPLE_TARGET, SampleTarget, stride_sample};
use crate::render::{Color, DrawingSurface, RenderFrame, SurfaceSize};

const POINT_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlotOptions {
    pub color: Color,
    pub y_range: Option<(f64, f64)>,
    pub sample_target: SampleTarget,
}

impl Default for ScatterPlotOptions {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.961, 0.620, 0.043),
            y_range: None,
            sample_target: SampleTarget::Bounded(SCATTER_SAMPLE_TARGET),
        }
    }
}

/// One filled circle per sampled point.
///
/// The time axis spans the first to last sampled timestamp; a single point
/// sits on the left edge.
pub fn render_scatter_plot(
    points: &[DataPoint],
    size: SurfaceSize,
    options: &ScatterPlotOptions,
) -> ChartResult<RenderFrame> {
    let mut frame = begin_frame(size)?;
    let sampled = stride_sample(points, options.sample_target);
    let (Some(first), Some(last)) = (sampled.first(), sampled.last()) else {
        return Ok(frame);
    };

    draw_axes(&mut frame, size);

    let width = f64::from(size.width);
    let height = f64::from(size.height);
    let x_scale = LinearScale::guarded(
        first.timestamp as f64,
        last.timestamp as f64,
        CHART_PADDING,
        width - CHART_PADDING,
    )?;
    let (y_min, y_max) =
        floored_value_range(points.iter().map(|point| point.value), options.y_range);
    let y_scale = LinearScale::guarded(y_min, y_max, height - CHART_PADDING, CHART_PADDING)?;

    for point in &sampled {
        let x = x_scale.domain_to_pixel(point.timestamp as f64)?;
        let y = y_scale.domain_to_pixel(point.value)?;
        frame.draw_circle(x, y, POINT_RADIUS, Some(options.color), None);
    }

    Ok(frame)
}
