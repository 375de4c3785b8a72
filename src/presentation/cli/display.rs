use std::io::{self, Write};

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::domain::ports::display::{CycleView, DisplaySurface};
use crate::domain::value_objects::thresholds::Thresholds;
use crate::infrastructure::notifications::telegram::format_timestamp;
use crate::presentation::cli::formatters::alert_fmt::{format_alert_log, format_dispatch};
use crate::presentation::cli::formatters::history_fmt::format_cpu_history;
use crate::presentation::cli::formatters::status_fmt::{
    colorize_percent, format_gib, progress_bar, section_header,
};
use crate::presentation::cli::formatters::table_fmt::format_process_table;

const BAR_WIDTH: usize = 30;
const ALERTS_SHOWN: usize = 5;

/// Full-screen dashboard redrawn after every cycle.
pub struct TerminalDisplay {
    thresholds: Thresholds,
    top_n: usize,
    clear_screen: bool,
}

impl TerminalDisplay {
    #[must_use]
    pub const fn new(thresholds: Thresholds, top_n: usize) -> Self {
        Self {
            thresholds,
            top_n,
            clear_screen: true,
        }
    }

    /// Appends frames instead of redrawing in place (useful when piping).
    #[must_use]
    pub const fn without_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    fn clear(out: &mut impl Write) -> io::Result<()> {
        execute!(out, Clear(ClearType::All), MoveTo(0, 0))
    }
}

impl DisplaySurface for TerminalDisplay {
    fn render(&mut self, view: &CycleView<'_>) {
        let mut out = io::stdout().lock();
        if self.clear_screen {
            if let Err(e) = Self::clear(&mut out) {
                tracing::debug!("Screen clear failed: {e}");
            }
        }
        let frame = format_frame(view, &self.thresholds, self.top_n);
        if let Err(e) = writeln!(out, "{frame}").and_then(|()| out.flush()) {
            tracing::debug!("Dashboard write failed: {e}");
        }
    }
}

fn metric_line(label: &str, value: f64, limit: Option<f64>) -> String {
    let limit = limit.map_or_else(String::new, |l| {
        format!("  (seuil {l:.0}%)").dimmed().to_string()
    });
    format!(
        "  {label:<8} {} {}{limit}",
        progress_bar(value, BAR_WIDTH),
        colorize_percent(value)
    )
}

/// Builds one dashboard frame as text.
#[must_use]
pub fn format_frame(view: &CycleView<'_>, thresholds: &Thresholds, top_n: usize) -> String {
    let s = view.sample;
    let lines = [
        format!(
            "{}  {}",
            "🛡️  SENTINEL".bold().cyan(),
            format_timestamp(s.timestamp).dimmed()
        ),
        "━".repeat(50),
        metric_line("CPU", s.cpu_percent, Some(thresholds.cpu_limit)),
        metric_line("RAM", s.ram_percent, Some(thresholds.ram_limit)),
        metric_line("Disque", s.disk_percent, None),
        format!(
            "  RAM dispo : {}   Disque libre : {}",
            format_gib(s.ram_available_bytes),
            format_gib(s.disk_free_bytes)
        ),
        String::new(),
        format_dispatch(view.last_dispatch),
        String::new(),
        section_header("📈 Historique CPU"),
        format_cpu_history(view.history),
        String::new(),
        section_header(&format!("📊 Top {top_n} processus (CPU)")),
        format_process_table(view.processes, top_n),
        String::new(),
        section_header("🚨 Dernières alertes"),
        format_alert_log(view.alert_log, ALERTS_SHOWN),
        String::new(),
        "Ctrl+C pour quitter".dimmed().to_string(),
    ];
    lines.join("\n")
}
