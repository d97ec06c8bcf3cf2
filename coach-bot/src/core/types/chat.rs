use serde::{Deserialize, Serialize};

/// Chat identity. For private chats the id equals the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Private chat with `user_id`; used to address reminders.
    pub fn private(user_id: i64) -> Self {
        Self {
            id: user_id,
            chat_type: "private".to_string(),
        }
    }
}
