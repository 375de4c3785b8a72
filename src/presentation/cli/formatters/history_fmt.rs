use crate::domain::entities::history::HistoryBuffer;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per value, oldest on the left, scaled on 0–100 %.
#[must_use]
pub fn sparkline(values: impl IntoIterator<Item = f64>) -> String {
    values.into_iter().map(level).collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn level(value: f64) -> char {
    let ratio = if value.is_nan() {
        0.0
    } else {
        (value / 100.0).clamp(0.0, 1.0)
    };
    let max_index = LEVELS.len() - 1;
    let idx = (ratio * max_index as f64).round() as usize;
    LEVELS[idx.min(max_index)]
}

/// Sparkline of the CPU history with min / max / mean underneath.
#[must_use]
pub fn format_cpu_history(history: &HistoryBuffer) -> String {
    if history.is_empty() {
        return "(aucune mesure)".to_string();
    }
    let (min, max, sum) = history.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), v| (lo.min(v), hi.max(v), sum + v),
    );
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / history.len() as f64;
    format!(
        "{}\nmin {min:.1}%  max {max:.1}%  moy {mean:.1}%  ({}/{} mesures)",
        sparkline(history.iter()),
        history.len(),
        history.capacity()
    )
}
