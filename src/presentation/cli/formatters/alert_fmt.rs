use colored::Colorize;

use super::sanitize_terminal;
use crate::domain::entities::alert::{AlertLog, AlertRecord, Dispatch, DispatchOutcome};
use crate::infrastructure::notifications::telegram::format_timestamp;

fn outcome_badge(outcome: &DispatchOutcome) -> String {
    let label = format!("[{outcome}]");
    match outcome {
        DispatchOutcome::Sent => format!("{}", label.green()),
        DispatchOutcome::NotConfigured => format!("{}", label.yellow()),
        DispatchOutcome::Failed(_) => format!("{}", label.red().bold()),
    }
}

fn format_record(record: &AlertRecord) -> String {
    format!(
        "{} {} {}",
        format_timestamp(record.timestamp).dimmed(),
        outcome_badge(&record.outcome),
        sanitize_terminal(&record.text).replace('\n', " | ")
    )
}

/// The `limit` most recent alerts, newest first.
#[must_use]
pub fn format_alert_log(log: &AlertLog, limit: usize) -> String {
    if log.is_empty() {
        return "✅ Aucune alerte envoyée".green().to_string();
    }
    log.recent()
        .take(limit)
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line status of the latest cycle's alert step.
#[must_use]
pub fn format_dispatch(dispatch: &Dispatch) -> String {
    match dispatch {
        Dispatch::NoCondition => "✅ Système sain".green().to_string(),
        Dispatch::Suppressed => "🔕 Seuil dépassé, alerte déjà envoyée récemment"
            .yellow()
            .to_string(),
        Dispatch::Attempted(outcome) => {
            format!("🚨 Alerte déclenchée {}", outcome_badge(outcome))
        }
    }
}
