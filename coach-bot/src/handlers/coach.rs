//! Coaching handler: routes text messages through [`CoachRouter`] and sends the reply.

use async_trait::async_trait;
use coach_core::CoachRouter;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};

/// Replies to every text message with the router's answer. Non-text messages are ignored.
///
/// **External interactions:** CoachRouter (profile store + LLM), Bot (send).
#[derive(Clone)]
pub struct CoachHandler {
    router: Arc<CoachRouter>,
    bot: Arc<dyn Bot>,
}

impl CoachHandler {
    pub fn new(router: Arc<CoachRouter>, bot: Arc<dyn Bot>) -> Self {
        Self { router, bot }
    }
}

#[async_trait]
impl Handler for CoachHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() {
            info!("Ignoring non-text message");
            return Ok(HandlerResponse::Ignore);
        }
        if message.user.id == 0 {
            warn!(chat_id = message.chat.id, "Message without sender");
            return Err(HandlerError::NoSender.into());
        }

        let user_id = message.user.id.to_string();
        let reply = self.router.respond(&user_id, &message.content).await?;
        self.bot.reply_to(message, &reply).await?;
        info!(reply_len = reply.len(), "Reply sent");
        Ok(HandlerResponse::Reply(reply))
    }
}
