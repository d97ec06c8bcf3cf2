//! Web error type rendered as a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coach_core::CoachError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Plan {index} not found for user {user_id}")]
    PlanNotFound { user_id: String, index: usize },

    #[error("Store error: {0}")]
    Store(#[from] CoachError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::UserNotFound(_) | WebError::PlanNotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Store(err) => {
                tracing::error!(error = %err, "Store error while serving plan");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
