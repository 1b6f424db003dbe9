//! Error types for the LexiAssist API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lexi_ai::AiError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Absent record and not-owned record are indistinguishable on purpose.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authorization required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("AI assistant error: {0}")]
    Ai(#[from] AiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body: `{message, error}` as in the original API.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            ApiError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"), None)
            }
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Authorization required".to_string(),
                None,
            ),
            ApiError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
                None,
            ),
            ApiError::Ai(AiError::MissingApiKey) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error: Missing API key.".to_string(),
                None,
            ),
            ApiError::Ai(AiError::InvalidFormat { snippet }) => {
                tracing::error!(%snippet, "AI returned non-JSON text");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI assistant returned an invalid format. Please try again.".to_string(),
                    Some("invalid_ai_response_format".to_string()),
                )
            }
            ApiError::Ai(e) => {
                tracing::error!("AI request failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "AI request failed".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string(), None)
            }
            ApiError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string(), None)
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string(), None)
            }
        };

        let body = Json(ErrorBody {
            message,
            error: detail,
        });

        (status, body).into_response()
    }
}
