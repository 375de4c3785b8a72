use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(String),
}

/// Single-shot JSON POST. No retries: one call, one outcome.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns `TransportError` on timeout, connection failure or a non-2xx status.
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), TransportError>;
}
