use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::transport::{MessageTransport, TransportError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// `reqwest`-backed transport with a hard per-request timeout covering DNS
/// resolution, connection and response.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TransportError::Request(format!("impossible de créer le client HTTP: {e}"))
            })?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl MessageTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify(&e, self.timeout))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}

/// The request URL carries the bot token, so it is stripped before the
/// error is turned into text.
fn classify(error: &reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout(timeout);
    }
    let kind = if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid request"
    } else if error.is_body() || error.is_decode() {
        "malformed body"
    } else {
        "transport error"
    };
    let detail = std::error::Error::source(error).map_or_else(String::new, |s| format!(": {s}"));
    TransportError::Request(format!("{kind}{detail}"))
}
