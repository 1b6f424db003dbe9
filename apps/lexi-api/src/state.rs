//! Application state and configuration for the LexiAssist API

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use lexi_ai::{CompletionClient, GeminiClient};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Process configuration, read once at startup and passed in explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:lexiassist.db?mode=rwc".to_string());

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self {
            port,
            database_url,
            gemini_api_key,
            upload_dir,
        }
    }
}

pub struct AppState {
    pub db: SqlitePool,
    pub ai: Arc<dyn CompletionClient>,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await?;

        run_migrations(&pool).await?;

        if config.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; AI endpoints will fail until it is");
        }
        let ai = Arc::new(GeminiClient::new(config.gemini_api_key.clone())?);

        Ok(Self::with_parts(pool, ai, config.upload_dir.clone()))
    }

    /// Assemble state from pre-built collaborators (tests inject stubs here).
    pub fn with_parts(
        db: SqlitePool,
        ai: Arc<dyn CompletionClient>,
        upload_dir: PathBuf,
    ) -> Self {
        Self { db, ai, upload_dir }
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lawyers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            lawyer_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cases (
            id TEXT PRIMARY KEY,
            case_number TEXT NOT NULL,
            title TEXT NOT NULL,
            client_id TEXT,
            case_type TEXT NOT NULL,
            court TEXT,
            filing_date TEXT,
            status TEXT NOT NULL DEFAULT 'filed',
            description TEXT,
            documents_json TEXT NOT NULL DEFAULT '[]',
            similar_cases_json TEXT NOT NULL DEFAULT '[]',
            summary TEXT,
            lawyer_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT NOT NULL,
            address TEXT,
            id_proof TEXT,
            cases_json TEXT NOT NULL DEFAULT '[]',
            notes TEXT,
            lawyer_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hearings (
            id TEXT PRIMARY KEY,
            case_id TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT,
            court TEXT,
            judge TEXT,
            hearing_type TEXT NOT NULL DEFAULT 'hearing',
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'scheduled',
            lawyer_id TEXT NOT NULL,
            reminder_sent INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Every query filters on the owning lawyer
    for stmt in [
        "CREATE INDEX IF NOT EXISTS idx_cases_lawyer ON cases(lawyer_id)",
        "CREATE INDEX IF NOT EXISTS idx_clients_lawyer ON clients(lawyer_id)",
        "CREATE INDEX IF NOT EXISTS idx_hearings_lawyer_date ON hearings(lawyer_id, status, date)",
        "CREATE INDEX IF NOT EXISTS idx_sessions_lawyer ON sessions(lawyer_id)",
    ] {
        sqlx::query(stmt).execute(pool).await?;
    }

    tracing::info!("Migrations complete");
    Ok(())
}
