use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::perf::{PassTimings, PerformanceMetrics, PerformanceMonitor};
use crate::runtime::ScheduledTask;

/// Sole writer of performance state.
///
/// Drains pass timings reported by the dashboard, advances the monitor once
/// per frame and publishes committed metrics.
pub struct FrameDriver {
    monitor: PerformanceMonitor,
    timings: Receiver<PassTimings>,
    metrics: Sender<PerformanceMetrics>,
    receiver_gone: bool,
}

impl std::fmt::Debug for FrameDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

impl FrameDriver {
    /// Returns the driver, the sender for pass timings and the receiver for
    /// committed metrics.
    pub fn new(
        monitor: PerformanceMonitor,
    ) -> (Self, Sender<PassTimings>, Receiver<PerformanceMetrics>) {
        let (timings_tx, timings) = mpsc::channel();
        let (metrics, metrics_rx) = mpsc::channel();
        let driver = Self {
            monitor,
            timings,
            metrics,
            receiver_gone: false,
        };
        (driver, timings_tx, metrics_rx)
    }

    pub fn on_frame(&mut self, now_ms: i64) -> Option<PerformanceMetrics> {
        for timings in self.timings.try_iter() {
            self.monitor.record_pass(timings);
        }
        let committed = self.monitor.on_frame(now_ms as f64)?;
        if self.metrics.send(committed).is_err() && !self.receiver_gone {
            self.receiver_gone = true;
            debug!("metrics receiver dropped");
        }
        Some(committed)
    }

    #[must_use]
    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }
}

impl ScheduledTask for FrameDriver {
    fn run(&mut self, now_ms: i64) {
        self.on_frame(now_ms);
    }
}
