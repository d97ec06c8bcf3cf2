//! OpenAI implementation of [`LlmClient`]: wraps openai-client, prepends the system message,
//! and bounds the reply with `max_tokens`.

use anyhow::Result;
use async_trait::async_trait;
use prompt::{ChatMessage, DEFAULT_SYSTEM_MESSAGE};
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient, DEFAULT_MAX_TOKENS};

/// LlmClient backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
    max_tokens: u32,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }

    /// Full message list sent to the API: system message first, then `messages`.
    fn build_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Vec<openai_client::ChatCompletionRequestMessage>> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(chat_message_to_openai(&ChatMessage::system(
            self.system_content(),
        ))?);
        for msg in messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        Ok(openai_messages)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model, max_tokens = self.max_tokens))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = self.build_messages(&messages)?;
        self.client
            .chat_completion(&self.model, openai_messages, Some(self.max_tokens))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_system_prompt_is_used_when_unset() {
        let client = OpenAILlmClient::new("dummy".to_string());
        assert_eq!(client.system_content(), DEFAULT_SYSTEM_MESSAGE);
    }

    #[test]
    fn test_custom_system_prompt_and_limits() {
        let client = OpenAILlmClient::new("dummy".to_string())
            .with_model("gpt-4".to_string())
            .with_system_prompt_opt(Some("Be brief.".to_string()))
            .with_max_tokens(50);
        assert_eq!(client.system_content(), "Be brief.");
        assert_eq!(client.model, "gpt-4");
        assert_eq!(client.max_tokens, 50);
    }

    #[test]
    fn test_build_messages_prepends_system() {
        let client = OpenAILlmClient::new("dummy".to_string());
        let built = client
            .build_messages(&[ChatMessage::user("hi"), ChatMessage::assistant("hello")])
            .unwrap();
        assert_eq!(built.len(), 3);
        assert!(matches!(
            built[0],
            openai_client::ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            built[1],
            openai_client::ChatCompletionRequestMessage::User(_)
        ));
    }
}
