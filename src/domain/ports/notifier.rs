use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::alert::{AlertCondition, DispatchOutcome};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification channel not configured (missing token or chat id)")]
    NotConfigured,
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),
}

impl From<&Result<(), NotifyError>> for DispatchOutcome {
    fn from(result: &Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => Self::Sent,
            Err(NotifyError::NotConfigured) => Self::NotConfigured,
            Err(NotifyError::DeliveryFailed(reason)) => Self::Failed(reason.clone()),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert, best effort. Makes at most one network call and
    /// returns once it has resolved or timed out.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::NotConfigured` without touching the network when
    /// credentials are missing, `NotifyError::DeliveryFailed` otherwise.
    async fn send(&self, condition: &AlertCondition) -> Result<(), NotifyError>;
}
