use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_BUFFER_CAPACITY, DEFAULT_CATEGORIES, DEFAULT_TICK_INTERVAL_MS};
use crate::error::{ChartError, ChartResult};
use crate::perf::{DEFAULT_FPS_WINDOW, DEFAULT_METRICS_REFRESH_MS};
use crate::pipeline::{
    Aggregation, BAR_SAMPLE_TARGET, HEATMAP_SAMPLE_TARGET, SCATTER_SAMPLE_TARGET, TimeRange,
};
use crate::render::{Color, SurfaceSize};

pub const DEFAULT_INITIAL_POINT_COUNT: usize = 5_000;
pub const DEFAULT_CHART_WIDTH: u32 = 600;
pub const DEFAULT_CHART_HEIGHT: u32 = 300;
pub const DEFAULT_LOOKBACK_MS: i64 = 3_600_000;
pub const DEFAULT_LOOKAHEAD_MS: i64 = 600_000;

/// Hex colours per chart. The heatmap derives its colours from values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartColors {
    #[serde(default = "default_line_color")]
    pub line: String,
    #[serde(default = "default_bar_color")]
    pub bar: String,
    #[serde(default = "default_scatter_color")]
    pub scatter: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            line: default_line_color(),
            bar: default_bar_color(),
            scatter: default_scatter_color(),
        }
    }
}

/// Colours resolved from [`ChartColors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedChartColors {
    pub line: Color,
    pub bar: Color,
    pub scatter: Color,
}

impl ChartColors {
    pub fn resolve(&self) -> ChartResult<ResolvedChartColors> {
        Ok(ResolvedChartColors {
            line: Color::from_hex(&self.line)?,
            bar: Color::from_hex(&self.bar)?,
            scatter: Color::from_hex(&self.scatter)?,
        })
    }
}

/// Dashboard bootstrap configuration.
///
/// Serializable so hosts can keep dashboard setup in a JSON file; every field
/// has a default, so `{}` is a complete document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: i64,
    #[serde(default = "default_initial_point_count")]
    pub initial_point_count: usize,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default)]
    pub colors: ChartColors,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default = "default_lookback_ms")]
    pub lookback_ms: i64,
    #[serde(default = "default_lookahead_ms")]
    pub lookahead_ms: i64,
    #[serde(default = "default_metrics_refresh_ms")]
    pub metrics_refresh_ms: f64,
    #[serde(default = "default_fps_window")]
    pub fps_window: usize,
    #[serde(default = "default_bar_sample_target")]
    pub bar_sample_target: usize,
    #[serde(default = "default_scatter_sample_target")]
    pub scatter_sample_target: usize,
    #[serde(default = "default_heatmap_sample_target")]
    pub heatmap_sample_target: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
            initial_point_count: default_initial_point_count(),
            categories: default_categories(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
            colors: ChartColors::default(),
            aggregation: Aggregation::default(),
            lookback_ms: default_lookback_ms(),
            lookahead_ms: default_lookahead_ms(),
            metrics_refresh_ms: default_metrics_refresh_ms(),
            fps_window: default_fps_window(),
            bar_sample_target: default_bar_sample_target(),
            scatter_sample_target: default_scatter_sample_target(),
            heatmap_sample_target: default_heatmap_sample_target(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse dashboard config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize dashboard config json: {e}"))
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.buffer_capacity == 0 {
            return Err(ChartError::InvalidData(
                "buffer capacity must be > 0".to_owned(),
            ));
        }
        if self.tick_interval_ms <= 0 {
            return Err(ChartError::InvalidData(
                "tick interval must be > 0 ms".to_owned(),
            ));
        }
        self.surface_size().validate()?;
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        let window_ms = self.lookback_ms.checked_add(self.lookahead_ms);
        if self.lookback_ms < 0 || self.lookahead_ms < 0 || !matches!(window_ms, Some(1..)) {
            return Err(ChartError::InvalidData(
                "lookback and lookahead must be >= 0 and span a non-empty window".to_owned(),
            ));
        }
        if !self.metrics_refresh_ms.is_finite() || self.metrics_refresh_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "metrics refresh interval must be finite and >= 0".to_owned(),
            ));
        }
        if self.fps_window == 0 {
            return Err(ChartError::InvalidData("fps window must be > 0".to_owned()));
        }
        for (name, target) in [
            ("bar", self.bar_sample_target),
            ("scatter", self.scatter_sample_target),
            ("heatmap", self.heatmap_sample_target),
        ] {
            if target == 0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} sample target must be > 0"
                )));
            }
        }
        if self.categories.iter().any(String::is_empty) {
            return Err(ChartError::InvalidData(
                "category names must not be empty".to_owned(),
            ));
        }
        self.colors.resolve()?;
        Ok(())
    }

    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.chart_width, self.chart_height)
            .with_device_pixel_ratio(self.device_pixel_ratio)
    }

    /// Initial time window around `now_ms`.
    pub fn time_range_around(&self, now_ms: i64) -> ChartResult<TimeRange> {
        TimeRange::new(
            now_ms.saturating_sub(self.lookback_ms),
            now_ms.saturating_add(self.lookahead_ms),
        )
    }

    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval_ms: i64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_initial_point_count(mut self, count: usize) -> Self {
        self.initial_point_count = count;
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ChartColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_window(mut self, lookback_ms: i64, lookahead_ms: i64) -> Self {
        self.lookback_ms = lookback_ms;
        self.lookahead_ms = lookahead_ms;
        self
    }

    #[must_use]
    pub fn with_metrics_refresh_ms(mut self, refresh_ms: f64) -> Self {
        self.metrics_refresh_ms = refresh_ms;
        self
    }

    #[must_use]
    pub fn with_fps_window(mut self, window: usize) -> Self {
        self.fps_window = window;
        self
    }

    #[must_use]
    pub fn with_sample_targets(mut self, bar: usize, scatter: usize, heatmap: usize) -> Self {
        self.bar_sample_target = bar;
        self.scatter_sample_target = scatter;
        self.heatmap_sample_target = heatmap;
        self
    }
}

fn default_buffer_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

fn default_tick_interval_ms() -> i64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_initial_point_count() -> usize {
    DEFAULT_INITIAL_POINT_COUNT
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| (*name).to_owned()).collect()
}

fn default_chart_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_lookback_ms() -> i64 {
    DEFAULT_LOOKBACK_MS
}

fn default_lookahead_ms() -> i64 {
    DEFAULT_LOOKAHEAD_MS
}

fn default_metrics_refresh_ms() -> f64 {
    DEFAULT_METRICS_REFRESH_MS
}

fn default_fps_window() -> usize {
    DEFAULT_FPS_WINDOW
}

fn default_bar_sample_target() -> usize {
    BAR_SAMPLE_TARGET
}

fn default_scatter_sample_target() -> usize {
    SCATTER_SAMPLE_TARGET
}

fn default_heatmap_sample_target() -> usize {
    HEATMAP_SAMPLE_TARGET
}

fn default_line_color() -> String {
    "#3b82f6".to_owned()
}

fn default_bar_color() -> String {
    "#10b981".to_owned()
}

fn default_scatter_color() -> String {
    "#f59e0b".to_owned()
}
