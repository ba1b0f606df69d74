mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV: &str = "BOT_TOKEN";

/// Smallest message limit that still fits a header and a fenced line.
const MIN_MESSAGE_LIMIT: usize = 64;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    if let Some(path) = find_default_config() {
        return load_config(&path);
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    Ok(config)
}

/// First existing file among the default config locations.
pub fn find_default_config() -> Option<PathBuf> {
    let default_paths = [
        "./episort.toml",
        "./config.toml",
        "~/.config/episort/config.toml",
        "/etc/episort/config.toml",
    ];

    default_paths
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .find(|p| p.exists())
}

fn apply_env_overrides(config: &mut Config) {
    let has_token = config
        .telegram
        .token
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());

    if !has_token {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.telegram.token = Some(token.trim().to_string());
            }
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.telegram.poll_timeout_secs == 0 {
        anyhow::bail!("telegram.poll_timeout_secs cannot be 0");
    }

    if !config.telegram.api_url.starts_with("http://")
        && !config.telegram.api_url.starts_with("https://")
    {
        anyhow::bail!(
            "telegram.api_url must be an http(s) URL, got '{}'",
            config.telegram.api_url
        );
    }

    if config.delivery.per_second == 0 {
        anyhow::bail!("delivery.per_second cannot be 0");
    }

    if config.report.max_listed_missing == 0 {
        anyhow::bail!("report.max_listed_missing cannot be 0");
    }

    if config.report.message_limit < MIN_MESSAGE_LIMIT {
        anyhow::bail!(
            "report.message_limit must be at least {}, got {}",
            MIN_MESSAGE_LIMIT,
            config.report.message_limit
        );
    }

    Ok(())
}

impl Config {
    /// The bot token, or an error explaining how to provide one.
    pub fn require_token(&self) -> Result<&str> {
        self.telegram
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .with_context(|| {
                format!(
                    "No bot token configured: set telegram.token or the {} environment variable",
                    TOKEN_ENV
                )
            })
    }

    /// Database path, resolved against `base_dir` when relative.
    pub fn database_path(&self, base_dir: Option<&Path>) -> PathBuf {
        let db = PathBuf::from(shellexpand::tilde(&self.storage.database.to_string_lossy()).as_ref());
        match base_dir {
            Some(dir) if db.is_relative() => dir.join(db),
            _ => db,
        }
    }
}
