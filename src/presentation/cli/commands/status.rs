use colored::Colorize;
use serde::Serialize;

use crate::domain::entities::alert::AlertCondition;
use crate::domain::entities::process::{ProcessInfo, top_by_cpu};
use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::Sampler;
use crate::domain::rules::evaluate;
use crate::domain::value_objects::thresholds::Thresholds;
use crate::presentation::cli::formatters::status_fmt::{
    colorize_percent, format_gib, print_section_header, progress_bar,
};
use crate::presentation::cli::formatters::table_fmt::format_process_table;

/// Machine-readable form of `sentinel status --json`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub sample: Sample,
    pub thresholds: Thresholds,
    pub alert: Option<AlertCondition>,
    pub top_processes: Vec<ProcessInfo>,
}

impl StatusReport {
    #[must_use]
    pub fn new(
        sample: Sample,
        thresholds: Thresholds,
        processes: &[ProcessInfo],
        top_n: usize,
    ) -> Self {
        let alert = evaluate(&sample, &thresholds);
        let top_processes = top_by_cpu(processes, top_n).into_iter().cloned().collect();
        Self {
            sample,
            thresholds,
            alert,
            top_processes,
        }
    }
}

/// Takes one sample and prints it. Never sends a notification.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run_status(
    sampler: &dyn Sampler,
    thresholds: Thresholds,
    top_n: usize,
    json: bool,
) -> anyhow::Result<()> {
    let sample = sampler.sample().await;
    let processes = sampler.list_processes();
    let report = StatusReport::new(sample, thresholds, &processes, top_n);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.sample;
    println!("{}", "sentinel — État du système".bold().cyan());
    println!("{}", "━".repeat(50));

    print_section_header("\n🔥 CPU");
    println!(
        "  {} {}",
        progress_bar(s.cpu_percent, 30),
        colorize_percent(s.cpu_percent)
    );

    print_section_header("\n🧠 Mémoire RAM");
    println!(
        "  {} {}",
        progress_bar(s.ram_percent, 30),
        colorize_percent(s.ram_percent)
    );
    println!("  Disponible : {}", format_gib(s.ram_available_bytes));

    print_section_header("\n💿 Disque (/)");
    println!(
        "  {} {}",
        progress_bar(s.disk_percent, 30),
        colorize_percent(s.disk_percent)
    );
    println!("  Libre : {}", format_gib(s.disk_free_bytes));

    print_section_header(&format!("\n📊 Top {top_n} processus (CPU)"));
    println!("{}", format_process_table(&report.top_processes, top_n));

    match &report.alert {
        Some(condition) => {
            println!("\n{}", "⚠️  Seuils dépassés :".red().bold());
            for line in &condition.lines {
                println!("  {line}");
            }
        }
        None => println!("\n{}", "✅ Système sain".green().bold()),
    }

    Ok(())
}
