//! HTTP handlers for the LexiAssist API

pub mod auth;
pub mod cases;
pub mod clients;
pub mod hearings;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}
