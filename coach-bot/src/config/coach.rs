//! Coaching settings: plan links, web server port, premium allowlist and timing knobs.

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use coach_core::router::{DEFAULT_BASE_URL, DEFAULT_HISTORY_MAX_CHARS, DEFAULT_PLAN_COOLDOWN_SECS};
use coach_core::RouterConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// BASE_URL: prefix of plan links, served by the web server.
    pub base_url: String,
    /// PORT of the plan web server.
    pub port: u16,
    /// PREMIUM_USER_IDS, comma-separated.
    pub premium_user_ids: Vec<String>,
    /// PLAN_COOLDOWN_SECS
    pub plan_cooldown_secs: i64,
    /// HISTORY_MAX_CHARS
    pub history_max_chars: usize,
    /// REMINDER_INTERVAL_SECS
    pub reminder_interval_secs: u64,
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Splits a comma-separated id list, dropping blanks.
fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

impl CoachConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let premium_user_ids = env::var("PREMIUM_USER_IDS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            base_url,
            port: parse_env("PORT", DEFAULT_PORT),
            premium_user_ids,
            plan_cooldown_secs: parse_env("PLAN_COOLDOWN_SECS", DEFAULT_PLAN_COOLDOWN_SECS),
            history_max_chars: parse_env("HISTORY_MAX_CHARS", DEFAULT_HISTORY_MAX_CHARS),
            reminder_interval_secs: parse_env(
                "REMINDER_INTERVAL_SECS",
                DEFAULT_REMINDER_INTERVAL_SECS,
            ),
        })
    }

    /// base_url must be an http(s) URL; the reminder interval must be positive.
    pub fn validate(&self) -> Result<()> {
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => anyhow::bail!("BASE_URL is not a valid http(s) URL: {}", self.base_url),
        }
        if self.reminder_interval_secs == 0 {
            anyhow::bail!("REMINDER_INTERVAL_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            base_url: self.base_url.clone(),
            plan_cooldown: ChronoDuration::seconds(self.plan_cooldown_secs),
            history_max_chars: self.history_max_chars,
        }
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }
}
