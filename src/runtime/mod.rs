//! Cooperative scheduling and the drivers that feed the dashboard.

mod frame_driver;
mod scheduler;
mod stream_driver;

pub use frame_driver::FrameDriver;
pub use scheduler::{MAX_CATCH_UP_TICKS, ScheduledTask, Scheduler, TaskHandle};
pub use stream_driver::StreamDriver;

use std::sync::mpsc::Receiver;

/// Drains the channel and keeps only the newest message.
pub fn latest<T>(receiver: &Receiver<T>) -> Option<T> {
    receiver.try_iter().last()
}
