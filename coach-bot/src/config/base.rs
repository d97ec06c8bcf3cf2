//! Base config: Telegram connection and logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "logs/coach-bot.log";

/// Telegram credential, optional API URL override and log file path.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN (or TELEGRAM_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN / TELEGRAM_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_TOKEN"))
                .ok()
                .filter(|s| !s.trim().is_empty())
                .context("BOT_TOKEN (or TELEGRAM_TOKEN) not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
