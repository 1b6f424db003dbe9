//! Integration tests for the LexiAssist API
//!
//! Each test builds the full router over an in-memory SQLite database and a
//! stub AI collaborator, then drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lexi_ai::{AiError, CompletionClient};
use lexi_api::state::run_migrations;
use lexi_api::{app, AppState};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::util::ServiceExt;

// ============================================================
// Harness
// ============================================================

/// Scripted stand-in for the AI collaborator.
enum StubAi {
    Text(String),
    ApiFailure,
    MissingKey,
}

#[async_trait]
impl CompletionClient for StubAi {
    async fn complete(&self, _prompt: &str, _web_search: bool) -> Result<String, AiError> {
        match self {
            StubAi::Text(text) => Ok(text.clone()),
            StubAi::ApiFailure => Err(AiError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            }),
            StubAi::MissingKey => Err(AiError::MissingApiKey),
        }
    }
}

struct TestApp {
    router: Router,
    upload_dir: TempDir,
}

async fn test_app_with_ai(ai: StubAi) -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let state = Arc::new(AppState::with_parts(
        pool,
        Arc::new(ai),
        upload_dir.path().to_path_buf(),
    ));
    TestApp {
        router: app(state),
        upload_dir,
    }
}

async fn test_app() -> TestApp {
    test_app_with_ai(StubAi::Text("unused".to_string())).await
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn register(router: &Router, email: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "Asha Rao", "email": email, "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn create_case(router: &Router, token: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/cases",
        Some(token),
        Some(json!({
            "caseNumber": "CRL-42/2026",
            "title": "State v. Mehta",
            "caseType": "criminal",
            "court": "Delhi High Court",
            "description": "Alleged breach of trust by a company director."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create case failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

fn multipart_request(
    uri: &str,
    token: &str,
    field_name: &str,
    file_name: &str,
    contents: &[u8],
) -> Request<Body> {
    let boundary = "lexi-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================
// Auth
// ============================================================

#[tokio::test]
async fn health_works() {
    let app = test_app().await;
    let (status, body) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn register_login_me_flow() {
    let app = test_app().await;
    let token = register(&app.router, "asha@example.com").await;

    let (status, body) = send(&app.router, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["name"], "Asha Rao");

    // Duplicate registration is a validation error
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "X", "email": "asha@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Login issues a fresh working token
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "asha@example.com", "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["token"].as_str().unwrap();
    let (status, _) = send(&app.router, "GET", "/api/auth/me", Some(fresh), None).await;
    assert_eq!(status, StatusCode::OK);

    // Wrong password is rejected
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "asha@example.com", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn resource_routes_require_a_bearer_token() {
    let app = test_app().await;

    let (status, body) = send(&app.router, "GET", "/api/cases", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authorization required");

    let (status, body) =
        send(&app.router, "GET", "/api/cases", Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

// ============================================================
// Cases
// ============================================================

#[tokio::test]
async fn case_create_then_fetch_round_trips() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caseNumber"], "CRL-42/2026");
    assert_eq!(body["title"], "State v. Mehta");
    assert_eq!(body["caseType"], "criminal");
    assert_eq!(body["court"], "Delhi High Court");
    assert_eq!(body["status"], "filed");
    assert_eq!(body["documents"], json!([]));
    assert_eq!(body["similarCases"], json!([]));
    assert_eq!(body["summary"], Value::Null);
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn cases_are_owner_scoped() {
    let app = test_app().await;
    let owner = register(&app.router, "owner@example.com").await;
    let other = register(&app.router, "other@example.com").await;
    let id = create_case(&app.router, &owner).await;

    // The other lawyer sees nothing, and gets not-found (never forbidden)
    let (status, body) = send(&app.router, "GET", "/api/cases", Some(&other), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for (method, uri) in [
        ("GET", format!("/api/cases/{id}")),
        ("DELETE", format!("/api/cases/{id}")),
        ("POST", format!("/api/cases/{id}/summary")),
        ("POST", format!("/api/cases/{id}/similar")),
    ] {
        let (status, body) = send(&app.router, method, &uri, Some(&other), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}: {body}");
        assert_eq!(body["message"], "Case not found");
    }

    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/api/cases/{id}"),
        Some(&other),
        Some(json!({"title": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still sees the untouched case
    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "State v. Mehta");
}

#[tokio::test]
async fn deleting_twice_yields_not_found_both_ways() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "DELETE",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Case deleted");

    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.router,
        "DELETE",
        "/api/cases/no-such-case",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_fields_and_refreshes_updated_at() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (_, before) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/cases/{id}"),
        Some(&token),
        Some(json!({"status": "won", "title": "State v. Mehta (appeal)"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "won");
    assert_eq!(body["title"], "State v. Mehta (appeal)");
    // Untouched fields survive
    assert_eq!(body["caseNumber"], "CRL-42/2026");
    assert_ne!(body["updatedAt"], before["updatedAt"]);
    assert_eq!(body["createdAt"], before["createdAt"]);
}

#[tokio::test]
async fn malformed_case_body_is_a_validation_error() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;

    // Missing required caseNumber/caseType, and a status outside the enum
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/cases",
        Some(&token),
        Some(json!({"title": "No number", "status": "vanished"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn case_embeds_owned_client_summary() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;

    let (status, client) = send(
        &app.router,
        "POST",
        "/api/clients",
        Some(&token),
        Some(json!({"name": "Ravi Kumar", "phone": "9876543210"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = client["id"].as_str().unwrap();

    let (status, case) = send(
        &app.router,
        "POST",
        "/api/cases",
        Some(&token),
        Some(json!({
            "caseNumber": "CIV-7/2026",
            "title": "Kumar v. Singh",
            "caseType": "civil",
            "client": client_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(case["client"]["name"], "Ravi Kumar");
    assert_eq!(case["client"]["phone"], "9876543210");
}

// ============================================================
// Clients
// ============================================================

#[tokio::test]
async fn client_crud_and_validation() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;

    // phone is required by the schema
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/clients",
        Some(&token),
        Some(json!({"name": "No Phone"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/clients",
        Some(&token),
        Some(json!({"name": "Ravi Kumar", "phone": "9876543210", "notes": "Walk-in"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["cases"], json!([]));
    assert_eq!(body["email"], Value::Null);

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/clients/{id}"),
        Some(&token),
        Some(json!({"email": "ravi@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ravi@example.com");
    assert_eq!(body["name"], "Ravi Kumar");

    // Another lawyer cannot reach it
    let other = register(&app.router, "other@example.com").await;
    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/clients/{id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("/api/clients/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("/api/clients/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================
// Hearings
// ============================================================

async fn create_hearing(
    router: &Router,
    token: &str,
    case_id: &str,
    date: chrono::DateTime<chrono::Utc>,
    status: &str,
) -> String {
    let (code, body) = send(
        router,
        "POST",
        "/api/hearings",
        Some(token),
        Some(json!({
            "case": case_id,
            "date": date.to_rfc3339(),
            "status": status
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "create hearing failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn hearing_defaults_and_case_population() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let case_id = create_case(&app.router, &token).await;

    let date = chrono::Utc::now() + chrono::Duration::days(3);
    let id = create_hearing(&app.router, &token, &case_id, date, "scheduled").await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/hearings/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "hearing");
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["reminderSent"], false);
    assert_eq!(body["case"]["caseNumber"], "CRL-42/2026");
    assert_eq!(body["case"]["title"], "State v. Mehta");
}

#[tokio::test]
async fn upcoming_returns_only_future_scheduled_hearings() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let case_id = create_case(&app.router, &token).await;

    let now = chrono::Utc::now();
    let _yesterday =
        create_hearing(&app.router, &token, &case_id, now - chrono::Duration::days(1), "scheduled")
            .await;
    let tomorrow =
        create_hearing(&app.router, &token, &case_id, now + chrono::Duration::days(1), "scheduled")
            .await;
    let _next_week =
        create_hearing(&app.router, &token, &case_id, now + chrono::Duration::days(7), "postponed")
            .await;

    let (status, body) = send(&app.router, "GET", "/api/hearings/upcoming", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let hearings = body.as_array().unwrap();
    assert_eq!(hearings.len(), 1);
    assert_eq!(hearings[0]["id"], tomorrow.as_str());

    // The full list still holds all three, soonest first
    let (_, body) = send(&app.router, "GET", "/api/hearings", Some(&token), None).await;
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 3);
    let dates: Vec<&str> = all.iter().map(|h| h["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn upcoming_is_capped_at_ten_soonest_first() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let case_id = create_case(&app.router, &token).await;

    let now = chrono::Utc::now();
    for day in (1..=12).rev() {
        create_hearing(
            &app.router,
            &token,
            &case_id,
            now + chrono::Duration::days(day),
            "scheduled",
        )
        .await;
    }

    let (status, body) = send(&app.router, "GET", "/api/hearings/upcoming", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let hearings = body.as_array().unwrap();
    assert_eq!(hearings.len(), 10);

    let dates: Vec<&str> = hearings.iter().map(|h| h["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted, "upcoming hearings must be soonest first");
}

// ============================================================
// AI summary
// ============================================================

#[tokio::test]
async fn summary_stores_ai_text_verbatim() {
    let app = test_app_with_ai(StubAi::Text("S".to_string())).await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/cases/{id}/summary"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "S");

    let (_, case) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(case["summary"], "S");
}

#[tokio::test]
async fn summary_failure_leaves_case_untouched() {
    let app = test_app_with_ai(StubAi::ApiFailure).await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/cases/{id}/summary"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("upstream unavailable"));

    let (_, case) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(case["summary"], Value::Null);
}

#[tokio::test]
async fn missing_api_key_is_a_configuration_error() {
    let app = test_app_with_ai(StubAi::MissingKey).await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/cases/{id}/summary"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("configuration"));
}

// ============================================================
// AI similar cases
// ============================================================

#[tokio::test]
async fn similar_cases_strips_fences_and_replaces_stored_list() {
    let raw = "```json\n[{\"caseTitle\":\"A\",\"citation\":\"C\",\"verdict\":\"V\"}]\n```";
    let app = test_app_with_ai(StubAi::Text(raw.to_string())).await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/cases/{id}/similar"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"caseTitle": "A", "citation": "C", "verdict": "V"}])
    );

    let (_, case) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(case["similarCases"][0]["caseTitle"], "A");
}

#[tokio::test]
async fn non_json_similar_response_is_a_distinct_error() {
    let app = test_app_with_ai(StubAi::Text("Sorry, I cannot help".to_string())).await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/cases/{id}/similar"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "invalid_ai_response_format");
    assert!(body["message"].as_str().unwrap().contains("invalid format"));

    let (_, case) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(case["similarCases"], json!([]));
}

// ============================================================
// Documents
// ============================================================

#[tokio::test]
async fn document_attach_and_detach() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let request = multipart_request(
        &format!("/api/cases/{id}/document"),
        &token,
        "document",
        "notes.pdf",
        b"fake pdf bytes",
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let case: Value = serde_json::from_slice(&bytes).unwrap();

    let documents = case["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["name"], "notes.pdf");
    assert!(documents[0]["uploadedAt"].is_string());
    let doc_id = documents[0]["id"].as_str().unwrap().to_string();

    // The blob landed in the upload dir before the record was appended
    let stored = documents[0]["url"].as_str().unwrap();
    assert_eq!(std::fs::read(stored).unwrap(), b"fake pdf bytes");
    assert!(stored.starts_with(app.upload_dir.path().to_str().unwrap()));

    // Detach removes exactly that record
    let (status, case) = send(
        &app.router,
        "DELETE",
        &format!("/api/cases/{id}/document/{doc_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case["documents"], json!([]));

    // The blob itself is not released on detach
    assert!(std::path::Path::new(stored).exists());

    // Detaching an unknown id is a no-op, not an error
    let (status, case) = send(
        &app.router,
        "DELETE",
        &format!("/api/cases/{id}/document/{doc_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case["documents"], json!([]));
}

#[tokio::test]
async fn detach_leaves_other_documents_untouched() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    for name in ["first.pdf", "second.pdf"] {
        let request = multipart_request(
            &format!("/api/cases/{id}/document"),
            &token,
            "document",
            name,
            name.as_bytes(),
        );
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (_, case) = send(
        &app.router,
        "GET",
        &format!("/api/cases/{id}"),
        Some(&token),
        None,
    )
    .await;
    let documents = case["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
    let first_id = documents[0]["id"].as_str().unwrap().to_string();

    let (status, case) = send(
        &app.router,
        "DELETE",
        &format!("/api/cases/{id}/document/{first_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let remaining = case["documents"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["name"], "second.pdf");
}

#[tokio::test]
async fn upload_without_a_document_field_is_rejected() {
    let app = test_app().await;
    let token = register(&app.router, "a@example.com").await;
    let id = create_case(&app.router, &token).await;

    let request = multipart_request(
        &format!("/api/cases/{id}/document"),
        &token,
        "attachment",
        "notes.pdf",
        b"bytes",
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "No file uploaded.");
}
