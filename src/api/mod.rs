//! Host-facing surface: configuration and the dashboard orchestrator.

mod config;
mod dashboard;

pub use config::{
    ChartColors, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_INITIAL_POINT_COUNT,
    DEFAULT_LOOKAHEAD_MS, DEFAULT_LOOKBACK_MS, DashboardConfig, ResolvedChartColors,
};
pub use dashboard::{Dashboard, RenderReport, SurfaceProvider};
