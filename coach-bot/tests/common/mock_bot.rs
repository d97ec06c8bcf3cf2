//! Mock implementation of [`coach_bot::Bot`] that records every sent message.

use async_trait::async_trait;
use coach_bot::{Bot, Chat, DbotError, Result};
use std::sync::Mutex;

/// One recorded `send_message(chat, text)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
}

/// Records sends; optionally fails every send.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentMessage>>,
    fail: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bot whose sends always fail.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(DbotError::Bot("send failed".to_string()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}
