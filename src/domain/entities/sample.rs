use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host-wide resource usage measured during one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub ram_available_bytes: u64,
    pub disk_percent: f64,
    pub disk_free_bytes: u64,
}

impl Sample {
    /// Builds a sample, clamping every percentage into `[0, 100]`.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        cpu_percent: f64,
        ram_percent: f64,
        ram_available_bytes: u64,
        disk_percent: f64,
        disk_free_bytes: u64,
    ) -> Self {
        Self {
            timestamp,
            cpu_percent: clamp_percent(cpu_percent),
            ram_percent: clamp_percent(ram_percent),
            ram_available_bytes,
            disk_percent: clamp_percent(disk_percent),
            disk_free_bytes,
        }
    }
}

/// NaN collapses to 0 so a broken counter can never trip a threshold.
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
