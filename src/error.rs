use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid range: start={start} must be < end={end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
