//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use crate::core::{Bot as CoreBot, Chat, DbotError, Result};
use anyhow::Context;
use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId};

/// Creates the teloxide Bot, pointing it at `api_url` when set.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> anyhow::Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
