#![allow(dead_code)]

pub mod mock_bot;

use chrono::Utc;
use coach_bot::{Chat, Message, User};

/// A private text message from `user_id`.
pub fn text_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat::private(user_id),
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}
