use std::time::Duration;

use crate::application::services::monitor::{CycleReport, MonitorService};
use crate::domain::entities::alert::{Dispatch, DispatchOutcome};
use crate::domain::ports::display::DisplaySurface;

fn log_report(report: &CycleReport) {
    let s = &report.sample;
    tracing::debug!(
        "Cycle : CPU {:.1}%, RAM {:.1}%, disque {:.1}%",
        s.cpu_percent,
        s.ram_percent,
        s.disk_percent
    );
    if let Dispatch::Attempted(DispatchOutcome::Sent) = report.dispatch {
        tracing::info!("Alerte Telegram envoyée");
    }
}

/// Run the monitoring loop: one cycle, one frame, one pause.
///
/// The loop runs until it receives Ctrl+C via [`tokio::signal::ctrl_c()`],
/// or after `max_cycles` cycles when given. A signal arriving mid-cycle
/// abandons that cycle.
///
/// # Errors
///
/// Currently never fails; the signature leaves room for fatal display errors.
pub async fn run_monitor(
    service: &mut MonitorService<'_>,
    display: &mut dyn DisplaySurface,
    interval: Duration,
    max_cycles: Option<u64>,
) -> anyhow::Result<()> {
    tracing::info!("Surveillance démarrée (intervalle : {}s)", interval.as_secs());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut cycles = 0u64;
    let done = |cycles: u64| max_cycles.is_some_and(|max| cycles >= max);
    if done(cycles) {
        return Ok(());
    }

    loop {
        tokio::select! {
            report = service.run_once() => log_report(&report),
            _ = &mut shutdown => break,
        }
        if let Some(view) = service.view() {
            display.render(&view);
        }

        cycles += 1;
        if done(cycles) {
            tracing::info!("{cycles} cycle(s) effectué(s), arrêt");
            return Ok(());
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => break,
        }
    }

    tracing::info!("Signal d'arrêt reçu, fermeture propre...");
    println!("\nArrêt de Sentinel...");
    Ok(())
}
