use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot API token (falls back to the `BOT_TOKEN` environment variable)
    #[serde(default)]
    pub token: Option<String>,

    /// Bot API base URL, without the `/bot<token>` suffix
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Long-polling timeout passed to getUpdates
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Pause after a failed poll before trying again
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_error_backoff() -> u64 {
    5
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout(),
            error_backoff_secs: default_error_backoff(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite database file; relative paths resolve against the config file's directory
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

fn default_database() -> PathBuf {
    PathBuf::from("episort.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Maximum files re-sent per second across all chats
    #[serde(default = "default_per_second")]
    pub per_second: u32,

    /// Clear stored uploads even when some of them could not be re-sent (default: true)
    #[serde(default = "default_clear_on_failure")]
    pub clear_on_failure: bool,
}

fn default_per_second() -> u32 {
    20
}

fn default_clear_on_failure() -> bool {
    true
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            per_second: default_per_second(),
            clear_on_failure: default_clear_on_failure(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Missing episodes listed per season before the rest are summarized
    #[serde(default = "default_max_listed_missing")]
    pub max_listed_missing: usize,

    /// Longest message the transport accepts, in UTF-16 code units
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,
}

fn default_max_listed_missing() -> usize {
    200
}

fn default_message_limit() -> usize {
    4096
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_listed_missing: default_max_listed_missing(),
            message_limit: default_message_limit(),
        }
    }
}
