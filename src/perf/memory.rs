/// Source of resident memory readings in megabytes.
///
/// `None` means the platform cannot report memory; callers show 0.
pub trait MemorySampler {
    fn sample_mb(&mut self) -> Option<f64>;
}

/// Sampler for hosts without a memory probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemorySampler;

impl MemorySampler for NoMemorySampler {
    fn sample_mb(&mut self) -> Option<f64> {
        None
    }
}

impl<F> MemorySampler for F
where
    F: FnMut() -> Option<f64>,
{
    fn sample_mb(&mut self) -> Option<f64> {
        self()
    }
}

#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(feature = "memory-sampling")]
pub use process::ProcessMemorySampler;

#[cfg(feature = "memory-sampling")]
mod process {
    use sysinfo::{Pid, ProcessExt, System, SystemExt};
    use tracing::debug;

    use super::MemorySampler;

    const BYTES_PER_MB: f64 = 1_048_576.0;

    /// Resident memory of the current process via `sysinfo`.
    pub struct ProcessMemorySampler {
        system: System,
        pid: Option<Pid>,
    }

    impl ProcessMemorySampler {
        #[must_use]
        pub fn new() -> Self {
            let pid = match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(reason) => {
                    debug!(reason, "process memory sampling unavailable");
                    None
                }
            };
            Self {
                system: System::new(),
                pid,
            }
        }
    }

    impl Default for ProcessMemorySampler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemorySampler for ProcessMemorySampler {
        fn sample_mb(&mut self) -> Option<f64> {
            let pid = self.pid?;
            if !self.system.refresh_process(pid) {
                return None;
            }
            let bytes = self.system.process(pid)?.memory();
            Some(bytes as f64 / BYTES_PER_MB)
        }
    }
}

/// Best sampler compiled into this build.
#[must_use]
pub fn default_memory_sampler() -> Box<dyn MemorySampler> {
    #[cfg(feature = "memory-sampling")]
    {
        Box::new(ProcessMemorySampler::new())
    }
    #[cfg(not(feature = "memory-sampling"))]
    {
        Box::new(NoMemorySampler)
    }
}
