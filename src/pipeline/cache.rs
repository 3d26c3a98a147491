use std::collections::HashMap;
use std::sync::Arc;

use crate::core::Category;
use crate::pipeline::{Aggregation, PipelineOutput, TimeRange, ViewConfig};

/// Runtime metrics exposed by the pipeline cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PipelineCacheKey {
    source_id: u64,
    generation: u64,
    categories: Vec<Category>,
    time_range: TimeRange,
    aggregation: Aggregation,
}

impl PipelineCacheKey {
    pub(crate) fn new(source_id: u64, generation: u64, view: &ViewConfig) -> Self {
        let (names, time_range, aggregation) = view.fingerprint();
        Self {
            source_id,
            generation,
            categories: names.into_iter().map(Category::new).collect(),
            time_range,
            aggregation,
        }
    }
}

/// Memo of pipeline passes keyed by (buffer identity, generation, view).
///
/// Entries for older generations are never reused once the buffer moves on,
/// so the map is simply cleared when it fills up.
#[derive(Debug, Default)]
pub struct PipelineCache {
    entries: HashMap<PipelineCacheKey, Arc<PipelineOutput>>,
    hits: u64,
    misses: u64,
}

impl PipelineCache {
    const MAX_ENTRIES: usize = 32;

    pub(crate) fn get(&mut self, key: &PipelineCacheKey) -> Option<Arc<PipelineOutput>> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            self.hits = self.hits.saturating_add(1);
        }
        value
    }

    pub(crate) fn insert(&mut self, key: PipelineCacheKey, value: Arc<PipelineOutput>) {
        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        self.entries.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> PipelineCacheStats {
        PipelineCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
