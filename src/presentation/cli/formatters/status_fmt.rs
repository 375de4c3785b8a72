use colored::{ColoredString, Colorize};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[must_use]
pub fn progress_bar(value: f64, width: usize) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if value >= 90.0 {
        bar_filled.red().bold()
    } else if value >= 70.0 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

#[must_use]
pub fn colorize_percent(value: f64) -> ColoredString {
    let text = format!("{value:.1}%");
    if value >= 90.0 {
        text.red().bold()
    } else if value >= 70.0 {
        text.yellow()
    } else {
        text.green()
    }
}

/// Bytes as gibibytes with two decimals, e.g. `3.25 Go`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_gib(bytes: u64) -> String {
    format!("{:.2} Go", bytes as f64 / GIB)
}

/// Title line followed by an underline of matching width.
#[must_use]
pub fn section_header(title: &str) -> String {
    let display_width = title.chars().count();
    format!("{}\n{}", title.bold().cyan(), "─".repeat(display_width).cyan())
}

pub fn print_section_header(title: &str) {
    println!("{}", section_header(title));
}
