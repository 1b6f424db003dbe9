//! LexiAssist API - legal practice management backend
//!
//! REST endpoints for:
//! - Token-authenticated lawyer accounts
//! - Owner-scoped cases, clients, and hearings
//! - AI-backed case summaries and similar-case research
//! - Case document attachments

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::{AppState, Config};

/// Build the application router over shared state.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        // Cases
        .route(
            "/api/cases",
            get(handlers::cases::list).post(handlers::cases::create),
        )
        .route(
            "/api/cases/:id",
            get(handlers::cases::get_one)
                .put(handlers::cases::update)
                .delete(handlers::cases::remove),
        )
        .route("/api/cases/:id/summary", post(handlers::cases::generate_summary))
        .route("/api/cases/:id/similar", post(handlers::cases::find_similar))
        .route("/api/cases/:id/document", post(handlers::cases::upload_document))
        .route(
            "/api/cases/:id/document/:doc_id",
            delete(handlers::cases::delete_document),
        )
        // Clients
        .route(
            "/api/clients",
            get(handlers::clients::list).post(handlers::clients::create),
        )
        .route(
            "/api/clients/:id",
            get(handlers::clients::get_one)
                .put(handlers::clients::update)
                .delete(handlers::clients::remove),
        )
        // Hearings
        .route(
            "/api/hearings",
            get(handlers::hearings::list).post(handlers::hearings::create),
        )
        .route("/api/hearings/upcoming", get(handlers::hearings::upcoming))
        .route(
            "/api/hearings/:id",
            get(handlers::hearings::get_one)
                .put(handlers::hearings::update)
                .delete(handlers::hearings::remove),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
