use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sysinfo::{Pid, ProcessesToUpdate, System};

use super::disk_collector::DiskCollector;
use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::{self, ProcessLookupError, ProcessSource, Sampler};

pub const DEFAULT_MEASURE_WINDOW: Duration = Duration::from_secs(1);

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Samples the host through the `sysinfo` crate.
///
/// CPU usage is the delta between two refreshes, so every `sample()` refreshes,
/// sleeps for the measurement window and refreshes again. Process CPU usage
/// comes from the same pair of refreshes.
///
/// Uses `Mutex<System>` for interior mutability since the `Sampler` trait
/// requires `&self` but `sysinfo::System` needs `&mut self` for refresh. The
/// lock is never held across the measurement sleep. A poisoned lock is
/// recovered: the next refresh overwrites whatever a panicking holder left.
pub struct SysinfoSampler {
    sys: Mutex<System>,
    disk_collector: DiskCollector,
    measure_window: Duration,
    last_sample: Mutex<Option<Sample>>,
}

impl SysinfoSampler {
    /// Creates a sampler with the default one-second measurement window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_measure_window(DEFAULT_MEASURE_WINDOW)
    }

    /// Windows shorter than `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` are raised
    /// to it; below that the CPU figures are meaningless.
    #[must_use]
    pub fn with_measure_window(window: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Self {
            sys: Mutex::new(sys),
            disk_collector: DiskCollector::new(),
            measure_window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
            last_sample: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn measure_window(&self) -> Duration {
        self.measure_window
    }

    fn prime(&self) {
        let mut sys = self.lock_system();
        sys.refresh_cpu_usage();
        sys.refresh_processes(ProcessesToUpdate::All, true);
    }

    fn measure(&self, now: DateTime<Utc>) -> Sample {
        let mut sys = self.lock_system();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let cpu_percent = f64::from(sys.global_cpu_usage());
        let total = sys.total_memory();
        let used = sys.used_memory();
        let available = sys.available_memory();
        drop(sys);

        let last = self.last_known();

        let (ram_percent, ram_available_bytes) = if total > 0 {
            (safe_percent(used, total), available)
        } else {
            tracing::warn!("Total memory reported as zero, keeping last known RAM values");
            last.as_ref()
                .map_or((0.0, 0), |s| (s.ram_percent, s.ram_available_bytes))
        };

        let (disk_percent, disk_free_bytes) = match self.disk_collector.root_usage() {
            Some(disk) => (disk.usage_percent, disk.free_bytes),
            None => {
                tracing::debug!("No real filesystem found, keeping last known disk values");
                last.as_ref()
                    .map_or((0.0, 0), |s| (s.disk_percent, s.disk_free_bytes))
            }
        };

        Sample::new(
            now,
            cpu_percent,
            ram_percent,
            ram_available_bytes,
            disk_percent,
            disk_free_bytes,
        )
    }

    fn lock_system(&self) -> MutexGuard<'_, System> {
        self.sys.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("System lock poisoned, recovering and refreshing");
            self.sys.clear_poison();
            poisoned.into_inner()
        })
    }

    fn last_known(&self) -> Option<Sample> {
        self.last_sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn remember(&self, sample: &Sample) {
        *self
            .last_sample
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(sample.clone());
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for SysinfoSampler {
    async fn sample(&self) -> Sample {
        self.prime();
        tokio::time::sleep(self.measure_window).await;

        let sample = self.measure(Utc::now());
        self.remember(&sample);
        sample
    }

    fn list_processes(&self) -> Vec<ProcessInfo> {
        sampler::list_processes(self)
    }
}

impl ProcessSource for SysinfoSampler {
    fn pids(&self) -> Vec<u32> {
        self.lock_system()
            .processes()
            .keys()
            .map(|pid| pid.as_u32())
            .collect()
    }

    fn read(&self, pid: u32) -> Result<ProcessInfo, ProcessLookupError> {
        let sys = self.lock_system();
        let process = sys
            .process(Pid::from_u32(pid))
            .ok_or(ProcessLookupError::Vanished(pid))?;

        Ok(ProcessInfo {
            pid,
            name: process.name().to_string_lossy().to_string(),
            cpu_percent: process.cpu_usage(),
            memory_percent: safe_percent(process.memory(), sys.total_memory()),
        })
    }
}
