use serde::{Deserialize, Serialize};

use crate::charts::{CHART_PADDING, begin_frame, draw_axes};
use crate::core::{DataPoint, LinearScale, Viewport, value_bounds};
use crate::error::{ChartError, ChartResult};
use crate::pipeline::{TimeRange, points_in_time_window};
use crate::render::{Color, DrawingSurface, RenderFrame, SurfaceSize, TextStyle};

const LINE_WIDTH: f64 = 2.0;
const LABEL_FONT_SIZE: f64 = 12.0;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartOptions {
    pub color: Color,
    /// Visible time window; defaults to the first and last timestamps.
    pub x_range: Option<TimeRange>,
    /// Value range; defaults to the min and max of the visible points.
    pub y_range: Option<(f64, f64)>,
    /// Pan and zoom applied to the projected polyline.
    pub viewport: Option<Viewport>,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.231, 0.510, 0.965),
            x_range: None,
            y_range: None,
            viewport: None,
        }
    }
}

/// Projects points into adjacent line segments.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same geometry.
pub fn project_line_segments(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
    viewport: Viewport,
) -> ChartResult<Vec<LineSegment>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut mapped = Vec::with_capacity(points.len());
    for point in points {
        let x = x_scale.domain_to_pixel(point.timestamp as f64)?;
        let y = y_scale.domain_to_pixel(point.value)?;
        mapped.push(viewport.apply(x, y));
    }

    Ok(mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect())
}

/// Time-ordered polyline with min/max annotations.
///
/// No downsampling: every visible point contributes a vertex.
pub fn render_line_chart(
    points: &[DataPoint],
    size: SurfaceSize,
    options: &LineChartOptions,
) -> ChartResult<RenderFrame> {
    let mut frame = begin_frame(size)?;
    let viewport = options.viewport.unwrap_or(Viewport::new(size.width, size.height));
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let visible = match options.x_range {
        Some(range) => points_in_time_window(points, range.start(), range.end()),
        None => points.to_vec(),
    };
    let Some((data_min, data_max)) = value_bounds(visible.iter().map(|point| point.value)) else {
        return Ok(frame);
    };
    let (y_min, y_max) = options.y_range.unwrap_or((data_min, data_max));

    draw_axes(&mut frame, size);

    let width = f64::from(size.width);
    let height = f64::from(size.height);
    if let [first, .., last] = visible.as_slice() {
        let x_scale = LinearScale::guarded(
            first.timestamp as f64,
            last.timestamp as f64,
            CHART_PADDING,
            width - CHART_PADDING,
        )?;
        let y_scale =
            LinearScale::guarded(y_min, y_max, height - CHART_PADDING, CHART_PADDING)?;
        for segment in project_line_segments(&visible, x_scale, y_scale, viewport)? {
            frame.draw_line(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                options.color,
                LINE_WIDTH,
            );
        }
    }

    let label_style = TextStyle::default().with_font_size(LABEL_FONT_SIZE);
    frame.draw_text(
        &format!("Min: {y_min:.2}"),
        CHART_PADDING + 10.0,
        CHART_PADDING + 20.0,
        &label_style,
    );
    frame.draw_text(
        &format!("Max: {y_max:.2}"),
        CHART_PADDING + 10.0,
        CHART_PADDING + 40.0,
        &label_style,
    );

    Ok(frame)
}
