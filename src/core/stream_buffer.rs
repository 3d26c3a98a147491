use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BUFFER_CAPACITY: usize = 10_000;

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

fn next_buffer_id() -> u64 {
    NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Immutable view of the buffer at one generation.
///
/// Cloning is cheap; every clone shares the same point storage.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    source_id: u64,
    generation: u64,
    points: Arc<[DataPoint]>,
}

impl BufferSnapshot {
    /// Wraps externally produced points as a standalone snapshot.
    #[must_use]
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        Self {
            source_id: next_buffer_id(),
            generation: 0,
            points: Arc::from(points),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::from_points(Vec::new())
    }

    /// Identity of the buffer this snapshot was taken from.
    #[must_use]
    pub fn source_id(&self) -> u64 {
        self.source_id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// True when both snapshots share one allocation.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl Deref for BufferSnapshot {
    type Target = [DataPoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Bounded FIFO store of the most recent points.
///
/// Points are expected in non-decreasing timestamp order; the buffer neither
/// checks nor re-sorts. Once full, every append evicts the oldest point.
#[derive(Debug)]
pub struct StreamBuffer {
    id: u64,
    points: VecDeque<DataPoint>,
    capacity: usize,
    generation: u64,
    total_appended: u64,
    cached_snapshot: Option<BufferSnapshot>,
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self {
            id: next_buffer_id(),
            points: VecDeque::with_capacity(DEFAULT_BUFFER_CAPACITY),
            capacity: DEFAULT_BUFFER_CAPACITY,
            generation: 0,
            total_appended: 0,
            cached_snapshot: None,
        }
    }
}

impl StreamBuffer {
    pub fn with_capacity(capacity: usize) -> ChartResult<Self> {
        if capacity == 0 {
            return Err(ChartError::InvalidData(
                "stream buffer capacity must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            id: next_buffer_id(),
            points: VecDeque::with_capacity(capacity),
            capacity,
            generation: 0,
            total_appended: 0,
            cached_snapshot: None,
        })
    }

    pub fn append(&mut self, point: DataPoint) {
        if self.points.len() == self.capacity {
            if let Some(evicted) = self.points.pop_front() {
                trace!(
                    evicted_timestamp = evicted.timestamp,
                    capacity = self.capacity,
                    "evict oldest point"
                );
            }
        }
        self.points.push_back(point);
        self.generation += 1;
        self.total_appended += 1;
        self.cached_snapshot = None;
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = DataPoint>) {
        for point in points {
            self.append(point);
        }
    }

    /// Returns the current contents in arrival order.
    ///
    /// Repeated calls without an intervening append return the same storage.
    pub fn snapshot(&mut self) -> BufferSnapshot {
        if let Some(snapshot) = &self.cached_snapshot {
            return snapshot.clone();
        }
        let points: Arc<[DataPoint]> = self.points.iter().cloned().collect();
        let snapshot = BufferSnapshot {
            source_id: self.id,
            generation: self.generation,
            points,
        };
        self.cached_snapshot = Some(snapshot.clone());
        snapshot
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    #[must_use]
    pub fn evicted_count(&self) -> u64 {
        self.total_appended - self.points.len() as u64
    }

    #[must_use]
    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.back()
    }
}
