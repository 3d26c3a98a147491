use std::time::Instant;

use tracing::warn;

/// Frame budget at 60 fps.
pub const FRAME_BUDGET_MS: f64 = 16.67;

/// Runs `operation` and returns its result with the elapsed wall time in ms.
///
/// Calls slower than [`FRAME_BUDGET_MS`] are reported at `warn`.
pub fn measure<T>(label: &str, operation: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let result = operation();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if elapsed_ms > FRAME_BUDGET_MS {
        warn!(label, elapsed_ms, "operation exceeded frame budget");
    }
    (result, elapsed_ms)
}
