use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text content; empty for non-text messages.
    pub content: String,
    /// `"text"` or `"other"`.
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_text(&self) -> bool {
        self.message_type == "text" && !self.content.trim().is_empty()
    }
}
