//! # Coach bot
//!
//! Telegram delivery layer for the life-coach domain in `coach-core`: core message/bot/handler
//! types, the handler chain, env configuration, Telegram adapters and polling runner, the goal
//! reminder loop and the plan web server.

pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod handlers;
pub mod reminder;
pub mod runner;
pub mod telegram;
pub mod web;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, Bot, Chat, DbotError, Handler, HandlerError, HandlerResponse, Message, Result,
    ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{build_teloxide_bot, handle_update, run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{BaseConfig, BotConfig, CoachConfig};
pub use handlers::{CoachHandler, LoggingHandler};
pub use reminder::{run_reminder_loop, send_due_reminders};
pub use runner::{build_components, build_handler_chain, build_llm_client, run_bot, BotComponents};
