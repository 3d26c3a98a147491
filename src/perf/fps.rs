use std::collections::VecDeque;

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_FPS_WINDOW: usize = 60;
const INITIAL_FPS: f64 = 60.0;

/// Rolling frame-rate estimate over the last `window` frame deltas.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    samples: VecDeque<f64>,
    window: usize,
    fps: f64,
    last_frame_ms: Option<f64>,
    frame_count: u64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_FPS_WINDOW),
            window: DEFAULT_FPS_WINDOW,
            fps: INITIAL_FPS,
            last_frame_ms: None,
            frame_count: 0,
        }
    }
}

impl FpsCounter {
    pub fn with_window(window: usize) -> ChartResult<Self> {
        if window == 0 {
            return Err(ChartError::InvalidData(
                "fps window must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(window),
            window,
            ..Self::default()
        })
    }

    /// Registers a frame at `now_ms` and returns the rounded rolling fps.
    ///
    /// The first frame after construction or `reset` only sets the baseline.
    pub fn update_at(&mut self, now_ms: f64) -> u32 {
        if let Some(last) = self.last_frame_ms {
            self.record_delta(now_ms - last);
        }
        self.last_frame_ms = Some(now_ms);
        self.frame_count += 1;
        self.fps()
    }

    /// Folds one frame delta into the window. Non-positive deltas are ignored.
    pub fn record_delta(&mut self, delta_ms: f64) {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(1000.0 / delta_ms);
        self.fps = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps.round().clamp(0.0, f64::from(u32::MAX)) as u32
    }

    #[must_use]
    pub fn raw_fps(&self) -> f64 {
        self.fps
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Clears the window and baseline; the last estimate is kept until new
    /// samples arrive.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.frame_count = 0;
        self.last_frame_ms = None;
    }
}
