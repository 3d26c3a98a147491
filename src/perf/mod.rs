//! Frame-rate, memory and timing instrumentation.

mod fps;
mod memory;
mod monitor;
mod timing;

pub use fps::{DEFAULT_FPS_WINDOW, FpsCounter};
#[cfg(feature = "memory-sampling")]
pub use memory::ProcessMemorySampler;
pub use memory::{MemorySampler, NoMemorySampler, default_memory_sampler, round_to_hundredths};
pub use monitor::{DEFAULT_METRICS_REFRESH_MS, PassTimings, PerformanceMetrics, PerformanceMonitor};
pub use timing::{FRAME_BUDGET_MS, measure};
