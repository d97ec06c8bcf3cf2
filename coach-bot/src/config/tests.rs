//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;

const VARS: [&str; 16] = [
    "BOT_TOKEN",
    "TELEGRAM_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_MAX_TOKENS",
    "BASE_URL",
    "PORT",
    "PREMIUM_USER_IDS",
    "PLAN_COOLDOWN_SECS",
    "HISTORY_MAX_CHARS",
    "REMINDER_INTERVAL_SECS",
    "LLM_SYSTEM_PROMPT",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
    env::remove_var("SYSTEM_PROMPT");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/coach-bot.log");
    assert_eq!(config.llm_config().model(), "gpt-3.5-turbo");
    assert_eq!(config.llm_config().max_tokens(), 200);
    assert_eq!(config.coach.base_url, "http://localhost:5000");
    assert_eq!(config.coach.port, 5000);
    assert!(config.coach.premium_user_ids.is_empty());
    assert_eq!(config.coach.plan_cooldown_secs, 300);
    assert_eq!(config.coach.history_max_chars, 2000);
    assert_eq!(config.coach.reminder_interval_secs, 3600);
    assert!(config.validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("TELEGRAM_TOKEN", "fallback_token");
    env::set_var("OPENAI_API_KEY", "custom_key");
    env::set_var("BASE_URL", "https://coach.example/");
    env::set_var("PORT", "8080");
    env::set_var("PREMIUM_USER_IDS", "42, 7");
    env::set_var("PLAN_COOLDOWN_SECS", "60");
    env::set_var("REMINDER_INTERVAL_SECS", "600");
    env::set_var("LOG_FILE", "/tmp/coach.log");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "fallback_token");
    assert_eq!(config.log_file(), "/tmp/coach.log");
    assert_eq!(config.coach.base_url, "https://coach.example");
    assert_eq!(config.coach.port, 8080);
    assert_eq!(config.coach.premium_user_ids, vec!["42", "7"]);
    let router = config.coach.router_config();
    assert_eq!(router.plan_cooldown, chrono::Duration::seconds(60));
    assert_eq!(router.base_url, "https://coach.example");
    assert_eq!(config.coach.reminder_interval().as_secs(), 600);
    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "override_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "test_key");
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_missing_api_key_is_an_error() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    assert!(BotConfig::load(None).is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validate_base_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("BASE_URL", "ftp://coach.example");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}
