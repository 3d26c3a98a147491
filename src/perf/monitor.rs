use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::perf::{FpsCounter, MemorySampler, NoMemorySampler, round_to_hundredths};

pub const DEFAULT_METRICS_REFRESH_MS: f64 = 1000.0;

/// Timings of one dashboard pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PassTimings {
    pub processing_ms: f64,
    pub render_ms: f64,
    pub data_point_count: usize,
}

/// Snapshot shown by a performance overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub fps: u32,
    pub memory_usage_mb: f64,
    pub render_time_ms: f64,
    pub data_processing_time_ms: f64,
    pub data_point_count: usize,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 60,
            memory_usage_mb: 0.0,
            render_time_ms: 0.0,
            data_processing_time_ms: 0.0,
            data_point_count: 0,
        }
    }
}

/// Per-frame fps and memory tracking with throttled publication.
///
/// Every frame updates the rolling fps; a new [`PerformanceMetrics`] is
/// committed only once more than the refresh interval has passed since the
/// previous commit.
pub struct PerformanceMonitor {
    fps: FpsCounter,
    memory: Box<dyn MemorySampler>,
    refresh_interval_ms: f64,
    last_commit_ms: Option<f64>,
    pending: PassTimings,
    current: PerformanceMetrics,
    commits: u64,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self {
            fps: FpsCounter::default(),
            memory: Box::new(NoMemorySampler),
            refresh_interval_ms: DEFAULT_METRICS_REFRESH_MS,
            last_commit_ms: None,
            pending: PassTimings::default(),
            current: PerformanceMetrics::default(),
            commits: 0,
        }
    }
}

impl std::fmt::Debug for PerformanceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceMonitor")
            .field("fps", &self.fps)
            .field("refresh_interval_ms", &self.refresh_interval_ms)
            .field("last_commit_ms", &self.last_commit_ms)
            .field("pending", &self.pending)
            .field("current", &self.current)
            .field("commits", &self.commits)
            .finish_non_exhaustive()
    }
}

impl PerformanceMonitor {
    pub fn new(
        fps_window: usize,
        refresh_interval_ms: f64,
        memory: Box<dyn MemorySampler>,
    ) -> ChartResult<Self> {
        if !refresh_interval_ms.is_finite() || refresh_interval_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "metrics refresh interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            fps: FpsCounter::with_window(fps_window)?,
            memory,
            refresh_interval_ms,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_memory_sampler(mut self, memory: Box<dyn MemorySampler>) -> Self {
        self.memory = memory;
        self
    }

    /// Stores pass timings for the next commit; the latest pass wins.
    pub fn record_pass(&mut self, timings: PassTimings) {
        self.pending = timings;
    }

    /// Advances the monitor by one frame at `now_ms`.
    ///
    /// Returns the committed metrics when this frame crosses the refresh
    /// interval. The first frame only establishes the commit baseline.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<PerformanceMetrics> {
        let fps = self.fps.update_at(now_ms);
        let memory_usage_mb = round_to_hundredths(self.memory.sample_mb().unwrap_or(0.0));

        let Some(last_commit) = self.last_commit_ms else {
            self.last_commit_ms = Some(now_ms);
            return None;
        };
        if now_ms - last_commit <= self.refresh_interval_ms {
            return None;
        }

        self.current = PerformanceMetrics {
            fps,
            memory_usage_mb,
            render_time_ms: self.pending.render_ms,
            data_processing_time_ms: self.pending.processing_ms,
            data_point_count: self.pending.data_point_count,
        };
        self.last_commit_ms = Some(now_ms);
        self.commits += 1;
        debug!(
            fps,
            memory_usage_mb,
            data_point_count = self.current.data_point_count,
            "performance metrics committed"
        );
        Some(self.current)
    }

    /// Last committed metrics.
    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        self.current
    }

    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    #[must_use]
    pub fn fps_counter(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn reset(&mut self) {
        self.fps.reset();
        self.last_commit_ms = None;
        self.pending = PassTimings::default();
    }
}
