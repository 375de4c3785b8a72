use colored::Colorize;

use super::sanitize_terminal;
use crate::domain::entities::process::{ProcessInfo, top_by_cpu};

/// Formats the top N processes sorted by CPU usage as an aligned table.
///
/// # Returns
///
/// A multi-line string with header, separator, and process rows.
#[must_use]
pub fn format_process_table(processes: &[ProcessInfo], top_n: usize) -> String {
    let header = format!("{:<8} {:<24} {:>7} {:>7}", "PID", "NOM", "CPU%", "RAM%");
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];

    for p in top_by_cpu(processes, top_n) {
        let name: String = sanitize_terminal(&p.name)
            .replace('\n', " ")
            .chars()
            .take(23)
            .collect();
        let row = format!(
            "{:<8} {:<24} {:>7.1} {:>7.1}",
            p.pid, name, p.cpu_percent, p.memory_percent
        );
        if p.cpu_percent >= 90.0 {
            rows.push(row.red().to_string());
        } else {
            rows.push(row);
        }
    }

    rows.join("\n")
}
