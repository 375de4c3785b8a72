use std::sync::{Mutex, MutexGuard};

use sysinfo::Disks;

/// Filesystem types to exclude from disk metrics.
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs",
    "devtmpfs",
    "sysfs",
    "proc",
    "cgroup2",
    "squashfs",
    "efivarfs",
    "bpf",
    "hugetlbfs",
    "mqueue",
    "pstore",
    "securityfs",
    "debugfs",
    "tracefs",
    "fusectl",
    "rpc_pipefs",
];

/// Usage of one mounted filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskUsage {
    pub mount_point: String,
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub usage_percent: f64,
}

impl DiskUsage {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(mount_point: String, total_bytes: u64, free_bytes: u64) -> Self {
        let used = total_bytes.saturating_sub(free_bytes);
        let usage_percent = if total_bytes > 0 {
            ((used as f64 / total_bytes as f64) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            mount_point,
            total_bytes,
            free_bytes,
            usage_percent,
        }
    }
}

/// The root filesystem if mounted, else the largest one.
#[must_use]
pub fn pick_root(disks: &[DiskUsage]) -> Option<&DiskUsage> {
    disks
        .iter()
        .find(|d| d.mount_point == "/")
        .or_else(|| disks.iter().max_by_key(|d| d.total_bytes))
}

/// Reads filesystem usage through `sysinfo`, ignoring pseudo-filesystems and
/// zero-size mounts. `overlay` is kept: inside a container it *is* `/`.
pub struct DiskCollector {
    disks: Mutex<Disks>,
}

impl DiskCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            disks: Mutex::new(Disks::new_with_refreshed_list()),
        }
    }

    fn lock_disks(&self) -> MutexGuard<'_, Disks> {
        self.disks.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Disk lock poisoned, recovering and refreshing");
            self.disks.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Refreshes and lists real filesystems.
    #[must_use]
    pub fn collect(&self) -> Vec<DiskUsage> {
        let mut disks = self.lock_disks();
        disks.refresh(true);

        disks
            .iter()
            .filter(|d| {
                let fs = d.file_system().to_string_lossy();
                !PSEUDO_FILESYSTEMS.iter().any(|&pseudo| fs == pseudo) && d.total_space() > 0
            })
            .map(|d| {
                DiskUsage::new(
                    d.mount_point().to_string_lossy().to_string(),
                    d.total_space(),
                    d.available_space(),
                )
            })
            .collect()
    }

    /// Usage of the filesystem holding `/`, or `None` if nothing real is mounted.
    #[must_use]
    pub fn root_usage(&self) -> Option<DiskUsage> {
        pick_root(&self.collect()).cloned()
    }
}

impl Default for DiskCollector {
    fn default() -> Self {
        Self::new()
    }
}
