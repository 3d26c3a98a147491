use crate::error::{ChartError, ChartResult};

/// Affine map of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Unchecked: `in_min == in_max` divides by zero. Callers guard with
/// [`non_degenerate_range`] first.
#[must_use]
pub fn scale_value(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Widens a collapsed range to a span of 1.
#[must_use]
pub fn non_degenerate_range(min: f64, max: f64) -> (f64, f64) {
    if max == min { (min, min + 1.0) } else { (min, max) }
}

/// Number of axis ticks that keeps roughly 50 px between labels.
#[must_use]
pub fn optimal_tick_count(pixel_size: f64) -> usize {
    const TARGET_PIXELS: f64 = 50.0;
    if !pixel_size.is_finite() || pixel_size <= 0.0 {
        return 2;
    }
    ((pixel_size / TARGET_PIXELS).floor() as usize).max(2)
}

/// Checked domain-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds a scale from possibly collapsed data bounds or pixel span.
    pub fn guarded(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        let (domain_start, domain_end) = non_degenerate_range(domain_start, domain_end);
        let (range_start, range_end) = non_degenerate_range(range_start, range_end);
        Self::new(domain_start, domain_end, range_start, range_end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        Ok(scale_value(
            value,
            self.domain_start,
            self.domain_end,
            self.range_start,
            self.range_end,
        ))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(scale_value(
            pixel,
            self.range_start,
            self.range_end,
            self.domain_start,
            self.domain_end,
        ))
    }
}
