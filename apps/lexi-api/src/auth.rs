//! Password hashing and bearer-token issuance.
//!
//! Tokens are opaque v4 UUIDs persisted server-side; password hashes are
//! salted SHA-256 stored as `salt$digest`.

use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = hex::encode(Sha256::digest(format!("{salt}{password}")));
    format!("{salt}${digest}")
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => {
            hex::encode(Sha256::digest(format!("{salt}{password}"))) == digest
        }
        None => false,
    }
}

/// Mint a bearer token for a lawyer and persist it.
pub async fn issue_token(pool: &SqlitePool, lawyer_id: &str) -> Result<String, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO sessions (token, lawyer_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(lawyer_id)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    Ok(token)
}
