use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::alert::DEFAULT_ALERT_LOG_CAPACITY;
use crate::domain::entities::history::DEFAULT_HISTORY_CAPACITY;
use crate::domain::rules::DEFAULT_QUIET_WINDOW_SECS;
use crate::domain::value_objects::credentials::Credentials;
use crate::domain::value_objects::thresholds::Thresholds;

pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_ENV: &str = "CHAT_ID";
const MIN_NOTIFY_TIMEOUT_SECS: u64 = 1;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Loop pacing and display sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_measure_window")]
    pub measure_window_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_top_processes")]
    pub top_processes: usize,
    #[serde(default = "default_alert_log_capacity")]
    pub alert_log_capacity: usize,
}

/// Alert limits, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_cpu_limit")]
    pub cpu_limit: f64,
    #[serde(default = "default_ram_limit")]
    pub ram_limit: f64,
}

/// Telegram delivery settings. `TELEGRAM_TOKEN` and `CHAT_ID` from the
/// environment take precedence over `token` and `chat_id` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_quiet_window")]
    pub quiet_window_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

// --- Defaults ---

const fn default_interval() -> u64 {
    2
}

const fn default_measure_window() -> u64 {
    1000
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

const fn default_top_processes() -> usize {
    5
}

const fn default_alert_log_capacity() -> usize {
    DEFAULT_ALERT_LOG_CAPACITY
}

const fn default_cpu_limit() -> f64 {
    80.0
}

const fn default_ram_limit() -> f64 {
    85.0
}

const fn default_quiet_window() -> u64 {
    DEFAULT_QUIET_WINDOW_SECS
}

const fn default_timeout() -> u64 {
    5
}

fn default_api_base() -> String {
    "https://api.telegram.org".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            measure_window_ms: default_measure_window(),
            history_capacity: default_history_capacity(),
            top_processes: default_top_processes(),
            alert_log_capacity: default_alert_log_capacity(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_limit: default_cpu_limit(),
            ram_limit: default_ram_limit(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            quiet_window_secs: default_quiet_window(),
            timeout_secs: default_timeout(),
            api_base: default_api_base(),
            token: None,
            chat_id: None,
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("sentinel").join("config.toml"))
    }

    /// Telegram credentials from the process environment, falling back to the
    /// file values. `None` when either part is missing or blank.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials_with(|key| std::env::var(key).ok())
    }

    /// Same as [`credentials`](Self::credentials) with an injectable lookup.
    #[must_use]
    pub fn credentials_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
        let pick = |key: &str, file: Option<&String>| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.cloned())
        };
        let token = pick(TOKEN_ENV, self.notifications.token.as_ref());
        let chat_id = pick(CHAT_ID_ENV, self.notifications.chat_id.as_ref());
        Credentials::from_parts(token.as_deref(), chat_id.as_deref())
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.general.interval_secs)
    }

    #[must_use]
    pub const fn measure_window(&self) -> Duration {
        Duration::from_millis(self.general.measure_window_ms)
    }

    /// Never below one second; a zero timeout would fail every send.
    #[must_use]
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notifications.timeout_secs.max(MIN_NOTIFY_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn quiet_window(&self) -> chrono::Duration {
        i64::try_from(self.notifications.quiet_window_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from(&self.thresholds)
    }
}

impl From<&ThresholdConfig> for Thresholds {
    fn from(config: &ThresholdConfig) -> Self {
        let clean = |v: f64, default: f64| if v.is_nan() { default } else { v };
        Self::new(
            clean(config.cpu_limit, default_cpu_limit()),
            clean(config.ram_limit, default_ram_limit()),
        )
    }
}
