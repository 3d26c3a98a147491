//! streamchart: live time-series dashboard core.
//!
//! A bounded stream buffer feeds a filter / aggregate / downsample pipeline
//! whose output is projected by line, bar, scatter and heatmap renderers into
//! backend-agnostic render frames. A cooperative scheduler drives the
//! producer and a rolling performance monitor; drivers exchange immutable
//! snapshots over channels.

pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod perf;
pub mod pipeline;
pub mod render;
pub mod runtime;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig, RenderReport, SurfaceProvider};
pub use error::{ChartError, ChartResult};
