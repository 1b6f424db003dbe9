//! Request extractors: caller identity and validated JSON bodies

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header
/// against the sessions table. Every resource handler takes this and scopes
/// its queries to the contained lawyer id.
pub struct AuthLawyer(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthLawyer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::MissingToken)?;

        let row: Option<(String,)> =
            sqlx::query_as("SELECT lawyer_id FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&state.db)
                .await?;

        row.map(|(lawyer_id,)| AuthLawyer(lawyer_id))
            .ok_or(ApiError::InvalidToken)
    }
}

/// JSON body extractor whose rejection is a structured validation error
/// (`{message, error}` with a 400) instead of axum's plain-text 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<Arc<AppState>> for ValidatedJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(ValidatedJson(value))
    }
}
