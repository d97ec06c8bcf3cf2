//! Polling runner: converts teloxide messages to core messages and passes them to the HandlerChain.

use crate::chain::HandlerChain;
use crate::core::{Message, ToCoreMessage};
use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Runs one message through the chain, logging a failure instead of returning it.
pub async fn handle_update(chain: &HandlerChain, message: &Message) {
    info!(
        user_id = message.user.id,
        chat_id = message.chat.id,
        message_type = %message.message_type,
        "Received message"
    );
    if let Err(e) = chain.handle(message).await {
        error!(error = %e, user_id = message.user.id, "Handler chain failed");
    }
}

/// Runs the teloxide long-polling REPL until shutdown. Updates of one chat are handled in
/// arrival order; different chats run concurrently.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Connected to Telegram");
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            handle_update(&chain, &core_msg).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}
