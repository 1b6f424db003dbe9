//! Client handlers: owner-scoped CRUD

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{AuthLawyer, ValidatedJson};
use crate::models::{
    ClientResponse, ClientRow, CreateClientRequest, DeletedResponse, UpdateClientRequest,
};
use crate::state::AppState;

async fn fetch_owned(
    db: &SqlitePool,
    id: &str,
    lawyer_id: &str,
) -> Result<Option<ClientRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, name, email, phone, address, id_proof, cases_json, notes, lawyer_id,
               created_at
        FROM clients
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(id)
    .bind(lawyer_id)
    .fetch_optional(db)
    .await
}

fn into_response(row: ClientRow) -> Result<ClientResponse, ApiError> {
    row.into_response().map_err(|e| ApiError::Internal(e.into()))
}

/// Get all clients, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let rows: Vec<ClientRow> = sqlx::query_as(
        r#"
        SELECT id, name, email, phone, address, id_proof, cases_json, notes, lawyer_id,
               created_at
        FROM clients
        WHERE lawyer_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(&lawyer_id)
    .fetch_all(&state.db)
    .await?;

    let clients = rows
        .into_iter()
        .map(into_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(clients))
}

/// Get single client
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;
    Ok(Json(into_response(row)?))
}

/// Create client
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    ValidatedJson(req): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let id = Uuid::new_v4().to_string();
    let cases_json = serde_json::to_string(&req.cases.unwrap_or_default())
        .map_err(|e| ApiError::Internal(e.into()))?;

    sqlx::query(
        r#"
        INSERT INTO clients (id, name, email, phone, address, id_proof, cases_json, notes,
                             lawyer_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.address)
    .bind(&req.id_proof)
    .bind(&cases_json)
    .bind(&req.notes)
    .bind(&lawyer_id)
    .bind(Utc::now().to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!(client = %id, lawyer = %lawyer_id, "Created client");

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;
    Ok((StatusCode::CREATED, Json(into_response(row)?)))
}

/// Update client; provided fields replace stored values
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;

    let cases_json = match req.cases {
        Some(cases) => {
            serde_json::to_string(&cases).map_err(|e| ApiError::Internal(e.into()))?
        }
        None => row.cases_json,
    };

    sqlx::query(
        r#"
        UPDATE clients
        SET name = ?, email = ?, phone = ?, address = ?, id_proof = ?, cases_json = ?,
            notes = ?
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(req.name.unwrap_or(row.name))
    .bind(req.email.or(row.email))
    .bind(req.phone.unwrap_or(row.phone))
    .bind(req.address.or(row.address))
    .bind(req.id_proof.or(row.id_proof))
    .bind(&cases_json)
    .bind(req.notes.or(row.notes))
    .bind(&id)
    .bind(&lawyer_id)
    .execute(&state.db)
    .await?;

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;
    Ok(Json(into_response(row)?))
}

/// Delete client
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM clients WHERE id = ? AND lawyer_id = ?")
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Client"));
    }
    Ok(Json(DeletedResponse {
        message: "Client deleted",
    }))
}
