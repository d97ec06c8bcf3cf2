//! Error types for the coaching domain.

use thiserror::Error;

/// Errors surfaced by the router and the profile store.
///
/// LLM failures are not represented here: the router degrades them to a
/// templated reply instead of returning an error.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for coaching operations; uses [`CoachError`].
pub type Result<T> = std::result::Result<T, CoachError>;
