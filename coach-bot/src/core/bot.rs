//! Outbound messaging abstraction.
//!
//! [`Bot`] is transport-agnostic; `TelegramBotAdapter` implements it with teloxide and tests
//! substitute a recording mock.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Message};

#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Answers `message` in its chat.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
