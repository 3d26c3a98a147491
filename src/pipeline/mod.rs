//! Filter -> aggregate -> downsample stages.
//!
//! Every stage is a pure function over slices. [`Pipeline`] composes the first
//! two over one immutable [`BufferSnapshot`] and memoizes the result; stride
//! downsampling is left to each chart since every chart has its own budget.

mod aggregate;
mod cache;
mod downsample;
mod filter;
mod view;

use std::sync::Arc;

use tracing::debug;

use crate::core::{BufferSnapshot, DataPoint};

pub use aggregate::{AggregatedBucket, AggregatedSeries, BucketValues, aggregate_points};
pub use cache::{PipelineCache, PipelineCacheStats};
pub use downsample::{
    BAR_SAMPLE_TARGET, HEATMAP_SAMPLE_TARGET, SCATTER_SAMPLE_TARGET, SampleTarget, stride_sample,
};
pub use filter::{filter_points, points_in_time_window, unique_categories};
pub use view::{Aggregation, TimeRange, ViewConfig};

use cache::PipelineCacheKey;

/// Render-ready result of one pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Generation of the snapshot the pass ran on.
    pub generation: u64,
    /// Filtered points in arrival order.
    pub filtered: Vec<DataPoint>,
    pub aggregated: AggregatedSeries,
    /// Points handed to charts: `filtered` in raw mode, flattened buckets otherwise.
    pub series: Vec<DataPoint>,
}

impl PipelineOutput {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Runs filter and aggregation over one snapshot without caching.
#[must_use]
pub fn run_pipeline(snapshot: &BufferSnapshot, view: &ViewConfig) -> PipelineOutput {
    let filtered = filter_points(snapshot, &view.selected_categories, view.time_range);
    let aggregated = aggregate_points(&filtered, view.aggregation);
    let series = match view.aggregation {
        Aggregation::Raw => filtered.clone(),
        _ => aggregated.to_points(),
    };

    PipelineOutput {
        generation: snapshot.generation(),
        filtered,
        aggregated,
        series,
    }
}

/// Memoizing front of [`run_pipeline`].
#[derive(Debug, Default)]
pub struct Pipeline {
    cache: PipelineCache,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pass for `(snapshot, view)`, recomputing only on a cache miss.
    pub fn run(&mut self, snapshot: &BufferSnapshot, view: &ViewConfig) -> Arc<PipelineOutput> {
        let key = PipelineCacheKey::new(snapshot.source_id(), snapshot.generation(), view);
        if let Some(output) = self.cache.get(&key) {
            debug!(generation = snapshot.generation(), "pipeline cache hit");
            return output;
        }

        let output = Arc::new(run_pipeline(snapshot, view));
        debug!(
            generation = snapshot.generation(),
            input_len = snapshot.len(),
            filtered_len = output.filtered.len(),
            bucket_count = output.aggregated.len(),
            aggregation = %view.aggregation,
            "pipeline pass"
        );
        self.cache.insert(key, Arc::clone(&output));
        output
    }

    #[must_use]
    pub fn cache_stats(&self) -> PipelineCacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
