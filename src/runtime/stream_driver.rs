use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, trace};

use crate::core::{BufferSnapshot, DataPoint, PointSource, StreamBuffer};
use crate::runtime::ScheduledTask;

/// Sole writer of a [`StreamBuffer`].
///
/// Each tick pulls one point from the source, appends it and publishes the
/// resulting immutable snapshot.
pub struct StreamDriver<S> {
    buffer: StreamBuffer,
    source: S,
    snapshots: Sender<BufferSnapshot>,
    receiver_gone: bool,
    ticks: u64,
}

impl<S: PointSource> StreamDriver<S> {
    pub fn new(buffer: StreamBuffer, source: S) -> (Self, Receiver<BufferSnapshot>) {
        let (snapshots, receiver) = mpsc::channel();
        let driver = Self {
            buffer,
            source,
            snapshots,
            receiver_gone: false,
            ticks: 0,
        };
        (driver, receiver)
    }

    /// Seeds the buffer in one step and publishes a single snapshot.
    pub fn backfill(&mut self, points: impl IntoIterator<Item = DataPoint>) -> BufferSnapshot {
        self.buffer.extend(points);
        debug!(
            buffer_id = self.buffer.id(),
            len = self.buffer.len(),
            "stream buffer backfilled"
        );
        self.publish()
    }

    /// Appends the source's point for `now_ms` and publishes the snapshot.
    pub fn tick(&mut self, now_ms: i64) -> BufferSnapshot {
        let point = self.source.next_point(now_ms);
        self.buffer.append(point);
        self.ticks += 1;
        self.publish()
    }

    fn publish(&mut self) -> BufferSnapshot {
        let snapshot = self.buffer.snapshot();
        trace!(
            generation = snapshot.generation(),
            len = snapshot.len(),
            "publishing buffer snapshot"
        );
        if self.snapshots.send(snapshot.clone()).is_err() && !self.receiver_gone {
            self.receiver_gone = true;
            debug!(buffer_id = self.buffer.id(), "snapshot receiver dropped");
        }
        snapshot
    }

    #[must_use]
    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

impl<S: PointSource> ScheduledTask for StreamDriver<S> {
    fn run(&mut self, now_ms: i64) {
        self.tick(now_ms);
    }
}
