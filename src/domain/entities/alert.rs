use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALERT_LOG_CAPACITY: usize = 20;

/// One or more breached limits detected in a single cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCondition {
    pub detected_at: DateTime<Utc>,
    pub lines: Vec<String>,
}

impl AlertCondition {
    /// Returns `None` when there is nothing to report.
    #[must_use]
    pub fn from_lines(detected_at: DateTime<Utc>, lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self { detected_at, lines })
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// What happened to an alert once it was handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent,
    NotConfigured,
    Failed(String),
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "envoyée"),
            Self::NotConfigured => write!(f, "non configurée"),
            Self::Failed(reason) => write!(f, "échec : {reason}"),
        }
    }
}

/// Result of the alert step of one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "outcome", rename_all = "snake_case")]
pub enum Dispatch {
    /// No limit was breached.
    NoCondition,
    /// A limit was breached inside the quiet window; the condition was dropped.
    Suppressed,
    /// The notifier was called.
    Attempted(DispatchOutcome),
}

/// An alert that went through a send attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub outcome: DispatchOutcome,
}

/// Bounded, newest-last list of dispatched alerts for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLog {
    capacity: usize,
    records: VecDeque<AlertRecord>,
}

impl AlertLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, record: AlertRecord) {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&AlertRecord> {
        self.records.back()
    }

    /// Most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter().rev()
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ALERT_LOG_CAPACITY)
    }
}
