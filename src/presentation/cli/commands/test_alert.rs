use chrono::Utc;
use colored::Colorize;

use crate::domain::entities::alert::AlertCondition;
use crate::domain::ports::notifier::{Notifier, NotifyError};

const TEST_LINE: &str = "🧪 Test de notification Sentinel : tout fonctionne";

#[must_use]
pub fn test_condition() -> AlertCondition {
    AlertCondition {
        detected_at: Utc::now(),
        lines: vec![TEST_LINE.to_string()],
    }
}

/// Sends one synthetic alert, bypassing thresholds and the quiet window.
///
/// # Errors
///
/// Returns an error if credentials are missing or delivery fails.
pub async fn run_test_alert(notifier: &dyn Notifier) -> anyhow::Result<()> {
    match notifier.send(&test_condition()).await {
        Ok(()) => {
            println!("{}", "✅ Alerte de test envoyée".green().bold());
            Ok(())
        }
        Err(NotifyError::NotConfigured) => {
            anyhow::bail!("Telegram non configuré : définir TELEGRAM_TOKEN et CHAT_ID")
        }
        Err(e) => Err(anyhow::Error::new(e).context("Échec de l'alerte de test")),
    }
}
