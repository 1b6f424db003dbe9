//! Data models for the LexiAssist API
//!
//! Rows mirror the SQLite schema; list-valued fields (`documents`,
//! `similarCases`, `cases`) live in `*_json` TEXT columns and are parsed at
//! the edge. Wire names are camelCase to match the original API.

use chrono::{DateTime, Utc};
use lexi_ai::SimilarCase;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Filed,
    Ongoing,
    Hearing,
    Closed,
    Won,
    Lost,
}

impl CaseStatus {
    pub fn from_db(s: &str) -> Self {
        match s {
            "ongoing" => CaseStatus::Ongoing,
            "hearing" => CaseStatus::Hearing,
            "closed" => CaseStatus::Closed,
            "won" => CaseStatus::Won,
            "lost" => CaseStatus::Lost,
            _ => CaseStatus::Filed,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaseStatus::Filed => "filed",
            CaseStatus::Ongoing => "ongoing",
            CaseStatus::Hearing => "hearing",
            CaseStatus::Closed => "closed",
            CaseStatus::Won => "won",
            CaseStatus::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HearingType {
    Hearing,
    Filing,
    Argument,
    Judgment,
}

impl HearingType {
    pub fn from_db(s: &str) -> Self {
        match s {
            "filing" => HearingType::Filing,
            "argument" => HearingType::Argument,
            "judgment" => HearingType::Judgment,
            _ => HearingType::Hearing,
        }
    }
}

impl std::fmt::Display for HearingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HearingType::Hearing => "hearing",
            HearingType::Filing => "filing",
            HearingType::Argument => "argument",
            HearingType::Judgment => "judgment",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HearingStatus {
    Scheduled,
    Completed,
    Postponed,
}

impl HearingStatus {
    pub fn from_db(s: &str) -> Self {
        match s {
            "completed" => HearingStatus::Completed,
            "postponed" => HearingStatus::Postponed,
            _ => HearingStatus::Scheduled,
        }
    }
}

impl std::fmt::Display for HearingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HearingStatus::Scheduled => "scheduled",
            HearingStatus::Completed => "completed",
            HearingStatus::Postponed => "postponed",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

/// A file attached to a case. Detach matches on `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Case row as stored in SQLite.
#[derive(Debug, Clone, FromRow)]
pub struct CaseRow {
    pub id: String,
    pub case_number: String,
    pub title: String,
    pub client_id: Option<String>,
    pub case_type: String,
    pub court: Option<String>,
    pub filing_date: Option<DateTime<Utc>>,
    pub status: String,
    pub description: Option<String>,
    pub documents_json: String,
    pub similar_cases_json: String,
    pub summary: Option<String>,
    pub lawyer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRow {
    /// Parse the JSON list columns and attach the resolved client summary.
    pub fn into_response(
        self,
        client: Option<ClientSummary>,
    ) -> Result<CaseResponse, serde_json::Error> {
        let documents: Vec<DocumentRecord> = serde_json::from_str(&self.documents_json)?;
        let similar_cases: Vec<SimilarCase> = serde_json::from_str(&self.similar_cases_json)?;
        Ok(CaseResponse {
            id: self.id,
            case_number: self.case_number,
            title: self.title,
            client,
            case_type: self.case_type,
            court: self.court,
            filing_date: self.filing_date,
            status: CaseStatus::from_db(&self.status),
            description: self.description,
            documents,
            similar_cases,
            summary: self.summary,
            lawyer: self.lawyer_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Referenced client fields embedded in case responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: String,
    pub case_number: String,
    pub title: String,
    pub client: Option<ClientSummary>,
    pub case_type: String,
    pub court: Option<String>,
    pub filing_date: Option<DateTime<Utc>>,
    pub status: CaseStatus,
    pub description: Option<String>,
    pub documents: Vec<DocumentRecord>,
    pub similar_cases: Vec<SimilarCase>,
    pub summary: Option<String>,
    pub lawyer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    pub case_type: String,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub filing_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields present in the body replace the stored values; omitted fields are
/// left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseRequest {
    pub case_number: Option<String>,
    pub title: Option<String>,
    pub client: Option<String>,
    pub case_type: Option<String>,
    pub court: Option<String>,
    pub filing_date: Option<DateTime<Utc>>,
    pub status: Option<CaseStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub id_proof: Option<String>,
    pub cases_json: String,
    pub notes: Option<String>,
    pub lawyer_id: String,
    pub created_at: DateTime<Utc>,
}

impl ClientRow {
    pub fn into_response(self) -> Result<ClientResponse, serde_json::Error> {
        let cases: Vec<String> = serde_json::from_str(&self.cases_json)?;
        Ok(ClientResponse {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            id_proof: self.id_proof,
            cases,
            notes: self.notes,
            lawyer: self.lawyer_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub id_proof: Option<String>,
    /// Informational case-id list; not authoritatively maintained.
    pub cases: Vec<String>,
    pub notes: Option<String>,
    pub lawyer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub id_proof: Option<String>,
    #[serde(default)]
    pub cases: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub id_proof: Option<String>,
    pub cases: Option<Vec<String>>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Hearings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct HearingRow {
    pub id: String,
    pub case_id: String,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub hearing_type: String,
    pub notes: Option<String>,
    pub status: String,
    pub lawyer_id: String,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl HearingRow {
    pub fn into_response(self, case: Option<CaseSummary>) -> HearingResponse {
        HearingResponse {
            id: self.id,
            case,
            case_id: self.case_id,
            date: self.date,
            time: self.time,
            court: self.court,
            judge: self.judge,
            hearing_type: HearingType::from_db(&self.hearing_type),
            notes: self.notes,
            status: HearingStatus::from_db(&self.status),
            lawyer: self.lawyer_id,
            reminder_sent: self.reminder_sent,
            created_at: self.created_at,
        }
    }
}

/// Referenced case fields embedded in hearing responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    pub id: String,
    pub case_number: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingResponse {
    pub id: String,
    pub case: Option<CaseSummary>,
    pub case_id: String,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub court: Option<String>,
    pub judge: Option<String>,
    #[serde(rename = "type")]
    pub hearing_type: HearingType,
    pub notes: Option<String>,
    pub status: HearingStatus,
    pub lawyer: String,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHearingRequest {
    pub case: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default, rename = "type")]
    pub hearing_type: Option<HearingType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<HearingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHearingRequest {
    pub case: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub court: Option<String>,
    pub judge: Option<String>,
    #[serde(rename = "type")]
    pub hearing_type: Option<HearingType>,
    pub notes: Option<String>,
    pub status: Option<HearingStatus>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct LawyerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawyerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<LawyerRow> for LawyerProfile {
    fn from(row: LawyerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub lawyer: LawyerProfile,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}
