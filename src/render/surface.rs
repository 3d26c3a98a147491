use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextStyle};

/// Logical surface size plus device pixel density.
///
/// Draw calls always use logical pixels; only the backing store is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Physical size of the backing store.
    #[must_use]
    pub fn backing_size(self) -> (u32, u32) {
        let scale = |logical: u32| (f64::from(logical) * self.device_pixel_ratio).ceil() as u32;
        (scale(self.width), scale(self.height))
    }
}

/// Primitive drawing operations over a 2D surface in logical pixels.
///
/// Implementations perform no data-domain logic; every coordinate is already
/// scaled by the caller.
pub trait DrawingSurface {
    fn clear(&mut self, width: f64, height: f64, background: Color);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64);

    #[allow(clippy::too_many_arguments)]
    fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    );

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Option<Color>, stroke: Option<Color>);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}
