//! Hearing handlers: owner-scoped CRUD plus the upcoming-hearings view

use std::collections::HashMap;
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
    CaseSummary, CreateHearingRequest, DeletedResponse, HearingResponse, HearingRow,
    HearingStatus, HearingType, UpdateHearingRequest,
};
use crate::state::AppState;

/// At most this many hearings in the upcoming view.
const UPCOMING_LIMIT: usize = 10;

async fn fetch_owned(
    db: &SqlitePool,
    id: &str,
    lawyer_id: &str,
) -> Result<Option<HearingRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, case_id, date, time, court, judge, hearing_type, notes, status,
               lawyer_id, reminder_sent, created_at
        FROM hearings
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(id)
    .bind(lawyer_id)
    .fetch_optional(db)
    .await
}

async fn case_summaries(
    db: &SqlitePool,
    lawyer_id: &str,
) -> Result<HashMap<String, CaseSummary>, sqlx::Error> {
    let cases: Vec<CaseSummary> =
        sqlx::query_as("SELECT id, case_number, title FROM cases WHERE lawyer_id = ?")
            .bind(lawyer_id)
            .fetch_all(db)
            .await?;
    Ok(cases.into_iter().map(|c| (c.id.clone(), c)).collect())
}

fn attach_cases(
    rows: Vec<HearingRow>,
    cases: &HashMap<String, CaseSummary>,
) -> Vec<HearingResponse> {
    rows.into_iter()
        .map(|row| {
            let case = cases.get(&row.case_id).cloned();
            row.into_response(case)
        })
        .collect()
}

/// Get all hearings, soonest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
) -> Result<Json<Vec<HearingResponse>>, ApiError> {
    let rows: Vec<HearingRow> = sqlx::query_as(
        r#"
        SELECT id, case_id, date, time, court, judge, hearing_type, notes, status,
               lawyer_id, reminder_sent, created_at
        FROM hearings
        WHERE lawyer_id = ?
        ORDER BY date ASC
        "#,
    )
    .bind(&lawyer_id)
    .fetch_all(&state.db)
    .await?;

    let cases = case_summaries(&state.db, &lawyer_id).await?;
    Ok(Json(attach_cases(rows, &cases)))
}

/// Get upcoming hearings: future-dated, still scheduled, soonest first,
/// capped at ten.
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
) -> Result<Json<Vec<HearingResponse>>, ApiError> {
    let rows: Vec<HearingRow> = sqlx::query_as(
        r#"
        SELECT id, case_id, date, time, court, judge, hearing_type, notes, status,
               lawyer_id, reminder_sent, created_at
        FROM hearings
        WHERE lawyer_id = ? AND status = 'scheduled'
        ORDER BY date ASC
        "#,
    )
    .bind(&lawyer_id)
    .fetch_all(&state.db)
    .await?;

    let now = Utc::now();
    let rows: Vec<HearingRow> = rows
        .into_iter()
        .filter(|h| h.date >= now)
        .take(UPCOMING_LIMIT)
        .collect();

    let cases = case_summaries(&state.db, &lawyer_id).await?;
    Ok(Json(attach_cases(rows, &cases)))
}

/// Get single hearing
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<HearingResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Hearing"))?;

    let case: Option<CaseSummary> = sqlx::query_as(
        "SELECT id, case_number, title FROM cases WHERE id = ? AND lawyer_id = ?",
    )
    .bind(&row.case_id)
    .bind(&lawyer_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(row.into_response(case)))
}

/// Create hearing
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    ValidatedJson(req): ValidatedJson<CreateHearingRequest>,
) -> Result<(StatusCode, Json<HearingResponse>), ApiError> {
    let id = Uuid::new_v4().to_string();
    let hearing_type = req.hearing_type.unwrap_or(HearingType::Hearing);
    let status = req.status.unwrap_or(HearingStatus::Scheduled);

    sqlx::query(
        r#"
        INSERT INTO hearings (id, case_id, date, time, court, judge, hearing_type, notes,
                              status, lawyer_id, reminder_sent, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.case)
    .bind(req.date.to_rfc3339())
    .bind(&req.time)
    .bind(&req.court)
    .bind(&req.judge)
    .bind(hearing_type.to_string())
    .bind(&req.notes)
    .bind(status.to_string())
    .bind(&lawyer_id)
    .bind(Utc::now().to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!(hearing = %id, lawyer = %lawyer_id, "Created hearing");

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Hearing"))?;
    let response = row.into_response(None);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Update hearing; provided fields replace stored values
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateHearingRequest>,
) -> Result<Json<HearingResponse>, ApiError> {
    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Hearing"))?;

    let hearing_type = req
        .hearing_type
        .map(|t| t.to_string())
        .unwrap_or(row.hearing_type);
    let status = req.status.map(|s| s.to_string()).unwrap_or(row.status);

    sqlx::query(
        r#"
        UPDATE hearings
        SET case_id = ?, date = ?, time = ?, court = ?, judge = ?, hearing_type = ?,
            notes = ?, status = ?
        WHERE id = ? AND lawyer_id = ?
        "#,
    )
    .bind(req.case.unwrap_or(row.case_id))
    .bind(req.date.unwrap_or(row.date).to_rfc3339())
    .bind(req.time.or(row.time))
    .bind(req.court.or(row.court))
    .bind(req.judge.or(row.judge))
    .bind(hearing_type)
    .bind(req.notes.or(row.notes))
    .bind(status)
    .bind(&id)
    .bind(&lawyer_id)
    .execute(&state.db)
    .await?;

    let row = fetch_owned(&state.db, &id, &lawyer_id)
        .await?
        .ok_or(ApiError::NotFound("Hearing"))?;

    let case: Option<CaseSummary> = sqlx::query_as(
        "SELECT id, case_number, title FROM cases WHERE id = ? AND lawyer_id = ?",
    )
    .bind(&row.case_id)
    .bind(&lawyer_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(row.into_response(case)))
}

/// Delete hearing
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthLawyer(lawyer_id): AuthLawyer,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM hearings WHERE id = ? AND lawyer_id = ?")
        .bind(&id)
        .bind(&lawyer_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Hearing"));
    }
    Ok(Json(DeletedResponse {
        message: "Hearing deleted",
    }))
}
