use serde::{Deserialize, Serialize};

pub const BAR_SAMPLE_TARGET: usize = 100;
pub const HEATMAP_SAMPLE_TARGET: usize = 100;
pub const SCATTER_SAMPLE_TARGET: usize = 500;

/// Upper bound on drawn items for one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleTarget {
    /// Keep at most this many items (a zero bound is treated as 1).
    Bounded(usize),
    /// Draw everything.
    Unbounded,
}

impl SampleTarget {
    /// Index step between kept items for an input of `len` items.
    ///
    /// Rounds `len / target` up rather than down, so the output never exceeds
    /// the target.
    #[must_use]
    pub fn stride(self, len: usize) -> usize {
        match self {
            Self::Unbounded => 1,
            Self::Bounded(target) => len.div_ceil(target.max(1)).max(1),
        }
    }
}

/// Keeps items at indices `0, s, 2s, ...` so that at most `target` survive.
///
/// Index based and deterministic; dropped items are not folded into the kept
/// ones. Inputs shorter than the target come back unchanged.
#[must_use]
pub fn stride_sample<T: Clone>(items: &[T], target: SampleTarget) -> Vec<T> {
    let stride = target.stride(items.len());
    if stride == 1 {
        return items.to_vec();
    }
    items.iter().step_by(stride).cloned().collect()
}
