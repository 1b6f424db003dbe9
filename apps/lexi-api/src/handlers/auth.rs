//! Registration, login, and profile handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::ApiError;
use crate::extract::{AuthLawyer, ValidatedJson};
use crate::models::{AuthResponse, LawyerProfile, LawyerRow, LoginRequest, RegisterRequest};
use crate::state::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM lawyers WHERE email = ?")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Validation("Email already registered".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO lawyers (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(hash_password(&req.password))
    .bind(Utc::now().to_rfc3339())
    .execute(&state.db)
    .await?;

    let token = issue_token(&state.db, &id).await?;
    tracing::info!(lawyer = %id, "Registered lawyer");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            lawyer: LawyerProfile {
                id,
                name: req.name,
                email: req.email,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let lawyer: Option<LawyerRow> = sqlx::query_as(
        "SELECT id, name, email, password_hash FROM lawyers WHERE email = ?",
    )
    .bind(&req.email)
    .fetch_optional(&state.db)
    .await?;

    let lawyer = lawyer.ok_or(ApiError::InvalidCredentials)?;
    if !verify_password(&req.password, &lawyer.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(&state.db, &lawyer.id).await?;

    Ok(Json(AuthResponse {
        token,
        lawyer: lawyer.into(),
    }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
) -> Result<Json<LawyerProfile>, ApiError> {
    let lawyer: Option<LawyerRow> = sqlx::query_as(
        "SELECT id, name, email, password_hash FROM lawyers WHERE id = ?",
    )
    .bind(&lawyer_id)
    .fetch_optional(&state.db)
    .await?;

    // A session pointing at a deleted lawyer is as good as no session
    let lawyer = lawyer.ok_or(ApiError::InvalidToken)?;
    Ok(Json(lawyer.into()))
}
