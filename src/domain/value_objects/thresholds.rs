use serde::{Deserialize, Serialize};

/// Limits above which a metric raises an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// CPU usage percentage above which the CPU alert fires
    pub cpu_limit: f64,
    /// RAM usage percentage above which the RAM alert fires
    pub ram_limit: f64,
}

impl Thresholds {
    /// Builds thresholds, clamping both limits into `[0, 100]`.
    #[must_use]
    pub fn new(cpu_limit: f64, ram_limit: f64) -> Self {
        Self {
            cpu_limit: cpu_limit.clamp(0.0, 100.0),
            ram_limit: ram_limit.clamp(0.0, 100.0),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_limit: 80.0,
            ram_limit: 85.0,
        }
    }
}
