use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Information about a running process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f64,
}

/// Returns the `n` busiest processes, highest CPU first.
#[must_use]
pub fn top_by_cpu(processes: &[ProcessInfo], n: usize) -> Vec<&ProcessInfo> {
    let mut procs: Vec<&ProcessInfo> = processes.iter().collect();
    procs.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
    });
    procs.truncate(n);
    procs
}
