//! Error types for the bot.
//!
//! [`DbotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use coach_core::CoachError;
use thiserror::Error;

/// Top-level error for the bot (transport, handler, coaching).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Coach error: {0}")]
    Coach(#[from] CoachError),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Message has no sender")]
    NoSender,
}

/// Result type for bot operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
