//! Error types for the AI collaborator

use thiserror::Error;

/// Failures from the completion client and response parsing.
///
/// `InvalidFormat` is deliberately distinct from `Api`/`Request`: it marks a
/// contract violation by the model (non-JSON where JSON was required), not a
/// transport problem, and callers surface it differently.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Server configuration error: missing API key")]
    MissingApiKey,

    #[error("AI service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned an empty response")]
    EmptyResponse,

    #[error("AI assistant returned an invalid format")]
    InvalidFormat { snippet: String },
}
