//! Chart renderers.
//!
//! Each renderer is a pure function of (points, surface size, options) that
//! records a deterministic sequence of drawing calls into a [`RenderFrame`].
//! Rendering the same input twice yields identical frames.

mod bar;
mod heatmap;
mod line;
mod scatter;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::{Color, DrawingSurface, RenderFrame, SurfaceSize};

pub use bar::{BarChartOptions, render_bar_chart};
pub use heatmap::{HeatmapGrid, HeatmapOptions, build_heatmap_grid, heatmap_color, render_heatmap};
pub use line::{LineChartOptions, LineSegment, project_line_segments, render_line_chart};
pub use scatter::{ScatterPlotOptions, render_scatter_plot};

pub const CHART_PADDING: f64 = 40.0;
pub const HEATMAP_PADDING: f64 = 60.0;
pub const BACKGROUND_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.8);
pub const AXIS_COLOR: Color = Color::rgb(0.8, 0.8, 0.8);

/// The projections a dashboard paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [Self; 4] = [Self::Line, Self::Bar, Self::Scatter, Self::Heatmap];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates the size and records the background clear.
fn begin_frame(size: SurfaceSize) -> ChartResult<RenderFrame> {
    size.validate()?;
    let mut frame = RenderFrame::new(size);
    frame.clear(
        f64::from(size.width),
        f64::from(size.height),
        BACKGROUND_COLOR,
    );
    Ok(frame)
}

/// Bottom and left axis lines inside the padded plot area.
fn draw_axes(surface: &mut dyn DrawingSurface, size: SurfaceSize) {
    let width = f64::from(size.width);
    let height = f64::from(size.height);
    surface.draw_line(
        CHART_PADDING,
        height - CHART_PADDING,
        width - CHART_PADDING,
        height - CHART_PADDING,
        AXIS_COLOR,
        1.0,
    );
    surface.draw_line(
        CHART_PADDING,
        CHART_PADDING,
        CHART_PADDING,
        height - CHART_PADDING,
        AXIS_COLOR,
        1.0,
    );
}

/// Value range for bar-like charts: 0 at the bottom, at least 100 at the top.
///
/// `values` is the whole input, not the stride-sampled subset.
fn floored_value_range(values: impl Iterator<Item = f64>, explicit: Option<(f64, f64)>) -> (f64, f64) {
    if let Some(range) = explicit {
        return range;
    }
    let max = values.fold(100.0_f64, f64::max);
    (0.0, max)
}
