use chrono::Duration;
use serde::Serialize;

use crate::domain::entities::alert::{
    AlertCondition, AlertLog, AlertRecord, Dispatch, DispatchOutcome,
};
use crate::domain::entities::history::HistoryBuffer;
use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::display::CycleView;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::sampler::Sampler;
use crate::domain::rules::{AlertState, DEFAULT_QUIET_WINDOW_SECS, ThresholdEvaluator};
use crate::domain::value_objects::thresholds::Thresholds;

/// Result of a single monitoring cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub sample: Sample,
    pub condition: Option<AlertCondition>,
    pub dispatch: Dispatch,
}

/// Orchestrates a monitoring cycle: sample → history → evaluate → debounce → notify.
///
/// Owns all state that survives between cycles. Cycles are strictly
/// sequential, so `run_once` takes `&mut self` and nothing is locked.
pub struct MonitorService<'a> {
    sampler: &'a dyn Sampler,
    notifier: &'a dyn Notifier,
    evaluator: ThresholdEvaluator,
    thresholds: Thresholds,
    quiet_window: Duration,
    history: HistoryBuffer,
    alert_log: AlertLog,
    alert_state: AlertState,
    latest_sample: Option<Sample>,
    processes: Vec<ProcessInfo>,
    last_dispatch: Dispatch,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub fn new(sampler: &'a dyn Sampler, notifier: &'a dyn Notifier, thresholds: Thresholds) -> Self {
        Self {
            sampler,
            notifier,
            evaluator: ThresholdEvaluator::default(),
            thresholds,
            quiet_window: i64::try_from(DEFAULT_QUIET_WINDOW_SECS)
                .map_or(Duration::MAX, Duration::seconds),
            history: HistoryBuffer::default(),
            alert_log: AlertLog::default(),
            alert_state: AlertState::never(),
            latest_sample: None,
            processes: Vec::new(),
            last_dispatch: Dispatch::NoCondition,
        }
    }

    #[must_use]
    pub const fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
        self.quiet_window = quiet_window;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = HistoryBuffer::with_capacity(capacity);
        self
    }

    #[must_use]
    pub fn with_alert_log_capacity(mut self, capacity: usize) -> Self {
        self.alert_log = AlertLog::with_capacity(capacity);
        self
    }

    /// Starts from a known debounce state instead of "never alerted".
    #[must_use]
    pub const fn with_alert_state(mut self, state: AlertState) -> Self {
        self.alert_state = state;
        self
    }

    /// Run a single monitoring cycle.
    ///
    /// Never fails: metric errors are absorbed by the sampler and delivery
    /// errors end up in the returned [`Dispatch`] and the alert log. The
    /// sample timestamp is the cycle's notion of "now" for debouncing.
    pub async fn run_once(&mut self) -> CycleReport {
        let sample = self.sampler.sample().await;
        self.history.push(sample.cpu_percent);

        let condition = self.evaluator.evaluate(&sample, &self.thresholds);
        let dispatch = match &condition {
            None => {
                tracing::debug!("System OK, no alert");
                Dispatch::NoCondition
            }
            Some(c) if !self.alert_state.permits(sample.timestamp, self.quiet_window) => {
                tracing::debug!(
                    "Alert suppressed (quiet window {}s): {}",
                    self.quiet_window.num_seconds(),
                    c.text().replace('\n', " | ")
                );
                Dispatch::Suppressed
            }
            Some(c) => Dispatch::Attempted(self.dispatch(c, &sample).await),
        };

        self.processes = self.sampler.list_processes();
        self.latest_sample = Some(sample.clone());
        self.last_dispatch = dispatch.clone();

        CycleReport {
            sample,
            condition,
            dispatch,
        }
    }

    async fn dispatch(&mut self, condition: &AlertCondition, sample: &Sample) -> DispatchOutcome {
        tracing::warn!("Alert: {}", condition.text().replace('\n', " | "));
        let result = self.notifier.send(condition).await;
        let outcome = DispatchOutcome::from(&result);

        // The window restarts on every attempt, delivered or not.
        self.alert_state.mark_attempt(sample.timestamp);
        self.alert_log.record(AlertRecord {
            timestamp: sample.timestamp,
            text: condition.text(),
            outcome: outcome.clone(),
        });

        if let Err(e) = result {
            tracing::warn!("Alert notification failed: {e}");
        }
        outcome
    }

    #[must_use]
    pub const fn latest_sample(&self) -> Option<&Sample> {
        self.latest_sample.as_ref()
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    #[must_use]
    pub fn processes(&self) -> &[ProcessInfo] {
        &self.processes
    }

    #[must_use]
    pub const fn alert_log(&self) -> &AlertLog {
        &self.alert_log
    }

    #[must_use]
    pub const fn alert_state(&self) -> &AlertState {
        &self.alert_state
    }

    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Everything a display needs, once at least one cycle has run.
    #[must_use]
    pub fn view(&self) -> Option<CycleView<'_>> {
        self.latest_sample.as_ref().map(|sample| CycleView {
            sample,
            history: &self.history,
            processes: &self.processes,
            alert_log: &self.alert_log,
            last_dispatch: &self.last_dispatch,
        })
    }
}
