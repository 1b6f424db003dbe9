//! Case handlers: owner-scoped CRUD, AI summary/similar-case endpoints, and
//! document attachment management.
//!
//! Every query filters on `id AND lawyer_id`; a case owned by someone else
//! is reported as not found, never forbidden.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use lexi_ai::{parse, prompt, SimilarCase};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{AuthLawyer, ValidatedJson};
use crate::models::{
    CaseResponse, CaseRow, ClientSummary, CreateCaseRequest, DeletedResponse, DocumentRecord,
    SummaryResponse, UpdateCaseRequest,
};
use crate::state::AppState;

async fn fetch_owned(
    db: &SqlitePool,
    id: &str,
    lawyer_id: &str,
) -> Result<Option<CaseRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, case_number, title, client_id, case_type, court, filing_date, status,
               description, documents_json, similar_cases_json, summary, lawyer_id,
               created_at, updated_at
        FROM cases
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(id)
    .bind(lawyer_id)
    .fetch_optional(db)
    .await
}

async fn client_summary(
    db: &SqlitePool,
    client_id: Option<&str>,
    lawyer_id: &str,
) -> Result<Option<ClientSummary>, sqlx::Error> {
    let Some(client_id) = client_id else {
        return Ok(None);
    };
    sqlx::query_as(
        "SELECT id, name, phone, email, address FROM clients WHERE id = ? AND lawyer_id = ?",
    )
    .bind(client_id)
    .bind(lawyer_id)
    .fetch_optional(db)
    .await
}

/// Resolve the referenced client and convert a row into the API shape.
async fn respond(state: &AppState, row: CaseRow) -> Result<CaseResponse, ApiError> {
    let client = client_summary(&state.db, row.client_id.as_deref(), &row.lawyer_id).await?;
    row.into_response(client)
        .map_err(|e| ApiError::Internal(e.into()))
}

/// Get all cases, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
) -> Result<Json<Vec<CaseResponse>>, ApiError> {
    let rows: Vec<CaseRow> = sqlx::query_as(
        r#"
        SELECT id, case_number, title, client_id, case_type, court, filing_date, status,
               description, documents_json, similar_cases_json, summary, lawyer_id,
               created_at, updated_at
        FROM cases
        WHERE lawyer_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(&lawyer_id)
    .fetch_all(&state.db)
    .await?;

    let clients: Vec<ClientSummary> =
        sqlx::query_as("SELECT id, name, phone, email, address FROM clients WHERE lawyer_id = ?")
            .bind(&lawyer_id)
            .fetch_all(&state.db)
            .await?;
    let by_id: HashMap<String, ClientSummary> =
        clients.into_iter().map(|c| (c.id.clone(), c)).collect();

    let cases = rows
        .into_iter()
        .map(|row| {
            let client = row.client_id.as_deref().and_then(|id| by_id.get(id)).cloned();
            row.into_response(client)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(cases))
}

/// Get single case
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<CaseResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;
    Ok(Json(respond(&state, row).await?))
}

/// Create case
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    ValidatedJson(req): ValidatedJson<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CaseResponse>), ApiError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let status = req.status.unwrap_or(crate::models::CaseStatus::Filed);

    sqlx::query(
        r#"
        INSERT INTO cases (id, case_number, title, client_id, case_type, court, filing_date,
                           status, description, documents_json, similar_cases_json, summary,
                           lawyer_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, '[]', '[]', NULL, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.case_number)
    .bind(&req.title)
    .bind(&req.client)
    .bind(&req.case_type)
    .bind(&req.court)
    .bind(req.filing_date.map(|d| d.to_rfc3339()))
    .bind(status.to_string())
    .bind(&req.description)
    .bind(&lawyer_id)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!(case = %id, lawyer = %lawyer_id, "Created case");

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;
    Ok((StatusCode::CREATED, Json(respond(&state, row).await?)))
}

/// Update case; provided fields replace stored values and `updatedAt` is
/// refreshed.
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCaseRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;

    let status = req
        .status
        .map(|s| s.to_string())
        .unwrap_or(row.status);

    sqlx::query(
        r#"
        UPDATE cases
        SET case_number = ?, title = ?, client_id = ?, case_type = ?, court = ?,
            filing_date = ?, status = ?, description = ?, updated_at = ?
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(req.case_number.unwrap_or(row.case_number))
    .bind(req.title.unwrap_or(row.title))
    .bind(req.client.or(row.client_id))
    .bind(req.case_type.unwrap_or(row.case_type))
    .bind(req.court.or(row.court))
    .bind(req.filing_date.or(row.filing_date).map(|d| d.to_rfc3339()))
    .bind(status)
    .bind(req.description.or(row.description))
    .bind(Utc::now().to_rfc3339())
    .bind(&id)
    .bind(&lawyer_id)
    .execute(&state.db)
    .await?;

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;
    Ok(Json(respond(&state, row).await?))
}

/// Delete case
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM cases WHERE id = ? AND lawyer_id = ?")
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Case"));
    }
    Ok(Json(DeletedResponse {
        message: "Case deleted",
    }))
}

/// Generate a 2-3 sentence summary via the AI collaborator and persist it.
///
/// The case is only written after the collaborator succeeds.
pub async fn generate_summary(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;

    let prompt = prompt::case_summary(
        &row.title,
        &row.case_type,
        row.court.as_deref().unwrap_or(""),
        row.description.as_deref().unwrap_or(""),
    );

    let summary = state.ai.complete(&prompt, false).await?;

    sqlx::query("UPDATE cases SET summary = ? WHERE id = ? AND lawyer_id = ?")
        .bind(&summary)
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    Ok(Json(SummaryResponse { summary }))
}

/// Ask the AI collaborator (with web search enabled) for 3-5 precedents and
/// replace the stored list on a successful parse.
///
/// A parse failure is its own error kind and leaves the case untouched.
pub async fn find_similar(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<Vec<SimilarCase>>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;

    let prompt = prompt::similar_cases(
        &row.title,
        &row.case_type,
        row.description.as_deref().unwrap_or(""),
    );

    let raw = state.ai.complete(&prompt, true).await?;
    let similar = parse::similar_cases(&raw)?;

    let similar_json =
        serde_json::to_string(&similar).map_err(|e| ApiError::Internal(e.into()))?;
    sqlx::query("UPDATE cases SET similar_cases_json = ? WHERE id = ? AND lawyer_id = ?")
        .bind(&similar_json)
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    Ok(Json(similar))
}

/// Attach an uploaded file to a case.
///
/// The blob is written to the upload directory before the record is
/// appended; the two steps are not transactional.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<CaseResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;

    let mut uploaded: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() == Some("document") {
            let name = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "document".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            uploaded = Some((name, data));
            break;
        }
    }

    let (name, data) =
        uploaded.ok_or_else(|| ApiError::Validation("No file uploaded.".to_string()))?;

    let doc_id = Uuid::new_v4().to_string();
    tokio::fs::create_dir_all(&state.upload_dir).await?;
    let path = state.upload_dir.join(&doc_id);
    tokio::fs::write(&path, &data).await?;

    let document = DocumentRecord {
        id: doc_id,
        name,
        url: path.to_string_lossy().into_owned(),
        uploaded_at: Utc::now(),
    };

    let mut documents: Vec<DocumentRecord> = serde_json::from_str(&row.documents_json)
        .map_err(|e| ApiError::Internal(e.into()))?;
    documents.push(document);

    let documents_json =
        serde_json::to_string(&documents).map_err(|e| ApiError::Internal(e.into()))?;
    sqlx::query("UPDATE cases SET documents_json = ? WHERE id = ? AND lawyer_id = ?")
        .bind(&documents_json)
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;
    Ok(Json(respond(&state, row).await?))
}

/// Detach a document by id.
///
/// An unknown document id is a no-op returning the unchanged case, and the
/// stored blob is not released.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path((id, doc_id)): Path<(String, String)>,
) -> Result<Json<CaseResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;

    let mut documents: Vec<DocumentRecord> = serde_json::from_str(&row.documents_json)
        .map_err(|e| ApiError::Internal(e.into()))?;
    documents.retain(|d| d.id != doc_id);

    let documents_json =
        serde_json::to_string(&documents).map_err(|e| ApiError::Internal(e.into()))?;
    sqlx::query("UPDATE cases SET documents_json = ? WHERE id = ? AND lawyer_id = ?")
        .bind(&documents_json)
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Case"))?;
    Ok(Json(respond(&state, row).await?))
}
