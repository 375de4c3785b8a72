use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use serde_json::{Value, json};
use tracing::warn;

use crate::domain::entities::alert::AlertCondition;
use crate::domain::ports::notifier::{NotifyError, Notifier};
use crate::domain::ports::transport::MessageTransport;
use crate::domain::value_objects::credentials::Credentials;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats a UTC instant as local wall-clock time, e.g. `18/12/2025 20:30:05`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Sends alerts to a Telegram chat through the Bot API `sendMessage` method.
///
/// Delivery is a single POST with no retry. Missing credentials short-circuit
/// before any network access. The bot token only ever appears in the request
/// URL, never in logs or error messages.
pub struct TelegramNotifier {
    credentials: Option<Credentials>,
    transport: Box<dyn MessageTransport>,
    api_base: String,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(
        credentials: Option<Credentials>,
        transport: Box<dyn MessageTransport>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_owned();
        Self {
            credentials,
            transport,
            api_base,
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn endpoint(&self, credentials: &Credentials) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, credentials.token())
    }

    #[must_use]
    pub fn format_message(condition: &AlertCondition) -> String {
        format!(
            "🚨 **ALERTE SENTINEL** [{}] 🚨\n\n{}\n",
            format_timestamp(condition.detected_at),
            condition.text()
        )
    }

    fn payload(credentials: &Credentials, condition: &AlertCondition) -> Value {
        json!({
            "chat_id": credentials.chat_id(),
            "text": Self::format_message(condition),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, condition: &AlertCondition) -> Result<(), NotifyError> {
        let Some(credentials) = self.credentials.as_ref() else {
            warn!("Configuration Telegram manquante (TELEGRAM_TOKEN / CHAT_ID)");
            return Err(NotifyError::NotConfigured);
        };

        let payload = Self::payload(credentials, condition);
        match self
            .transport
            .post_json(&self.endpoint(credentials), &payload)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Alerte envoyée à {}",
                    format_timestamp(condition.detected_at)
                );
                Ok(())
            }
            Err(e) => {
                warn!("Erreur envoi Telegram : {e}");
                Err(NotifyError::DeliveryFailed(e.to_string()))
            }
        }
    }
}
