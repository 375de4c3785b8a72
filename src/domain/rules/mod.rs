pub mod cpu;
pub mod debounce;
pub mod ram;

use crate::domain::entities::alert::AlertCondition;
use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::thresholds::Thresholds;

pub use debounce::{AlertState, DEFAULT_QUIET_WINDOW_SECS, should_send};

/// A deterministic check of one metric against its limit.
/// Rules are pure functions: sample + thresholds in, at most one line out. No I/O.
pub trait Rule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Returns the alert line when the sample breaches this rule's limit
    fn evaluate(&self, sample: &Sample, thresholds: &Thresholds) -> Option<String>;
}

/// Alertable metrics, in the order their lines appear in a message.
/// Disk usage is displayed but deliberately absent here.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(cpu::CpuLimitRule), Box::new(ram::RamLimitRule)]
}

/// Runs every rule against a sample and folds the breaches into a single condition.
pub struct ThresholdEvaluator {
    rules: Vec<Box<dyn Rule>>,
}

impl ThresholdEvaluator {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Returns `None` when no rule fires; otherwise one condition with one
    /// line per breached metric.
    #[must_use]
    pub fn evaluate(&self, sample: &Sample, thresholds: &Thresholds) -> Option<AlertCondition> {
        let lines: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let line = rule.evaluate(sample, thresholds)?;
                tracing::debug!("Rule {} fired", rule.name());
                Some(line)
            })
            .collect();
        AlertCondition::from_lines(sample.timestamp, lines)
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Evaluates a sample with the default rule set.
#[must_use]
pub fn evaluate(sample: &Sample, thresholds: &Thresholds) -> Option<AlertCondition> {
    ThresholdEvaluator::default().evaluate(sample, thresholds)
}
