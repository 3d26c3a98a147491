pub mod generator;
pub mod primitives;
pub mod scale;
pub mod stats;
pub mod stream_buffer;
pub mod types;

pub use generator::{
    DEFAULT_CATEGORIES, DEFAULT_TICK_INTERVAL_MS, PointSource, SineWaveGenerator,
};
pub use scale::{LinearScale, non_degenerate_range, optimal_tick_count, scale_value};
pub use stats::{DataStats, calculate_stats, value_bounds};
pub use stream_buffer::{BufferSnapshot, DEFAULT_BUFFER_CAPACITY, StreamBuffer};
pub use types::{Category, DataPoint, PointMetadata, Viewport};
