//! # Prompt
//!
//! Builds the coaching prompts sent to the LLM. Every prompt is a single user
//! message combining the coaching instruction, the (truncated) conversation
//! history, and the current user message.
//!
//! ## Format
//!
//! ```text
//! {instruction}
//! Previous conversation: {history}
//! User said: {message}
//! ```
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Default system instruction when no custom system prompt is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a supportive life coach. Answer in the language the user writes in. Use plain text without Markdown, suitable for a Telegram chat.";

/// Label preceding the conversation history in every prompt.
pub const SECTION_HISTORY: &str = "Previous conversation:";

/// Label preceding the current user message in every prompt.
pub const SECTION_MESSAGE: &str = "User said:";

/// The tone question asked during onboarding. Users answer with 1, 2 or 3.
pub const TONE_QUESTION: &str = "How would you like me to coach you? Choose 1) As a motivating friend, 2) As a strict mentor, 3) As a relaxed guide.";

/// The focus question asked once the tone is chosen.
pub const FOCUS_QUESTION: &str = "Which area do you want to focus on? Choose one: training, mindset, career, finance, productivity.";

/// Day labels of a weekly plan, Monday first.
pub const PLAN_DAYS: [&str; 7] = ["Mån", "Tis", "Ons", "Tor", "Fre", "Lör", "Sön"];

/// Coaching persona and focus embedded in prompts once onboarding is complete.
#[derive(Debug, Clone, Copy)]
pub struct CoachingStyle<'a> {
    /// Human-readable tone, e.g. "motivating friend".
    pub tone: &'a str,
    /// Focus area keyword, e.g. "training".
    pub focus_area: &'a str,
}

/// Returns at most the last `max_chars` characters of `history`, cut on a char boundary.
///
/// `max_chars == 0` disables truncation.
pub fn truncate_history(history: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return history;
    }
    let total = history.chars().count();
    if total <= max_chars {
        return history;
    }
    let skip = total - max_chars;
    match history.char_indices().nth(skip) {
        Some((idx, _)) => &history[idx..],
        None => history,
    }
}

fn with_conversation(instruction: &str, history: &str, message: &str) -> String {
    format!(
        "{}\n{} {}\n{} {}",
        instruction, SECTION_HISTORY, history, SECTION_MESSAGE, message
    )
}

/// Onboarding: the user is new; ask their name, then the tone question.
pub fn onboarding_prompt(history: &str, message: &str) -> String {
    let instruction = format!(
        "You are a life coach getting to know the user from scratch. Start by asking their name and guide the conversation naturally. After the name, ask: '{}'",
        TONE_QUESTION
    );
    with_conversation(&instruction, history, message)
}

/// Tone chosen, focus missing: ask the focus question.
pub fn focus_prompt(history: &str, message: &str) -> String {
    let instruction = format!(
        "You are a life coach. The user is in basic mode and must choose a focus area. Ask: '{}'",
        FOCUS_QUESTION
    );
    with_conversation(&instruction, history, message)
}

/// The 7-line schedule format the LLM must follow, e.g. `Mån: [activity]` one line per day.
pub fn plan_format() -> String {
    PLAN_DAYS
        .iter()
        .map(|day| format!("{}: [activity]", day))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Weekly plan request. The reply is expected to contain the 7-line schedule.
pub fn plan_prompt(style: CoachingStyle<'_>, history: &str, message: &str) -> String {
    let instruction = format!(
        "You are a life coach coaching in {tone}-style. The user has chosen focus area: {focus} and is premium. \
         Generate a detailed weekly plan for {focus} in the following format:\n{format}\n\
         Example:\nMån: Running 30 min\nTis: Strength 45 min\nOns: Rest\nTor: Yoga 30 min\nFre: Cycling 1 hour\nLör: Swimming 45 min\nSön: Rest",
        tone = style.tone,
        focus = style.focus_area,
        format = plan_format(),
    );
    with_conversation(&instruction, history, message)
}

/// The user reports a finished task; ask for an encouraging closing remark.
pub fn task_done_prompt(style: CoachingStyle<'_>, history: &str, message: &str) -> String {
    let instruction = format!(
        "You are a life coach coaching in {}-style. The user has chosen focus area: {}. \
         The user has said they are done with a task. Acknowledge the completed goal and give an encouraging response (e.g. 'Well done!').",
        style.tone, style.focus_area
    );
    with_conversation(&instruction, history, message)
}

/// General coaching conversation.
pub fn general_prompt(style: CoachingStyle<'_>, history: &str, message: &str) -> String {
    let instruction = format!(
        "You are a life coach coaching in {}-style. The user has chosen focus area: {}. \
         Help the user as a partner. If a goal is mentioned (e.g. 'train at 18:00'), suggest it and note it. \
         If the topic is unrelated to life coaching, gently suggest returning to relevant topics like training, mindset, career, finance, or productivity.",
        style.tone, style.focus_area
    );
    with_conversation(&instruction, history, message)
}

/// Wraps a prompt as the message list sent to the LLM (a single user message).
pub fn as_messages(prompt: impl Into<String>) -> Vec<ChatMessage> {
    vec![ChatMessage::user(prompt)]
}
