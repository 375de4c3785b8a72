use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::sample::Sample;

/// Why a single process could not be read during a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessLookupError {
    #[error("process {0} vanished")]
    Vanished(u32),
}

/// Two-phase process enumeration: list ids, then read each one.
/// A process may exit between the two phases.
pub trait ProcessSource: Send + Sync {
    fn pids(&self) -> Vec<u32>;

    /// # Errors
    ///
    /// Returns `ProcessLookupError` if the process is gone.
    fn read(&self, pid: u32) -> Result<ProcessInfo, ProcessLookupError>;
}

/// Reads every listed process, silently skipping the ones that fail.
#[must_use]
pub fn list_processes(source: &dyn ProcessSource) -> Vec<ProcessInfo> {
    source
        .pids()
        .into_iter()
        .filter_map(|pid| match source.read(pid) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("Skipping process: {e}");
                None
            }
        })
        .collect()
}

/// Source of per-cycle measurements. Implementations never fail: a metric
/// that cannot be read falls back to its last known value, or zero.
#[async_trait]
pub trait Sampler: Send + Sync {
    /// Measures the host. May block for the CPU measurement window.
    async fn sample(&self) -> Sample;

    /// Snapshot of running processes, as of the last `sample()`.
    fn list_processes(&self) -> Vec<ProcessInfo>;
}
