//! Quiet-window policy for outbound alerts.
//!
//! At most one alert leaves the process per window. A condition detected
//! inside the window is dropped, never queued.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_QUIET_WINDOW_SECS: u64 = 300;

/// Returns `true` when enough time has passed since the last alert.
///
/// The bound is strict: `now - last == window` is still inside the window.
/// A host that never alerted may always send.
#[must_use]
pub fn should_send(
    now: DateTime<Utc>,
    last_alert_time: Option<DateTime<Utc>>,
    quiet_window: Duration,
) -> bool {
    last_alert_time.is_none_or(|last| now.signed_duration_since(last) > quiet_window)
}

/// Time of the last send attempt. Owned by the cycle driver and only
/// advanced once an attempt has completed, successful or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertState {
    last_alert_time: Option<DateTime<Utc>>,
}

impl AlertState {
    #[must_use]
    pub const fn never() -> Self {
        Self {
            last_alert_time: None,
        }
    }

    #[must_use]
    pub const fn sent_at(at: DateTime<Utc>) -> Self {
        Self {
            last_alert_time: Some(at),
        }
    }

    #[must_use]
    pub const fn last_alert_time(&self) -> Option<DateTime<Utc>> {
        self.last_alert_time
    }

    #[must_use]
    pub fn permits(&self, now: DateTime<Utc>, quiet_window: Duration) -> bool {
        should_send(now, self.last_alert_time, quiet_window)
    }

    pub fn mark_attempt(&mut self, at: DateTime<Utc>) {
        self.last_alert_time = Some(at);
    }
}
