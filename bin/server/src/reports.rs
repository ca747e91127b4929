//! Report submission and listing.
//!
//! The service owns the only business rule in the system: both submitted
//! fields must be non-empty after trimming. Everything else is delegated to
//! the repository.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use modreport_identity::SessionUser;
use serde_json::json;
use sqlx::PgPool;

use crate::db::{NewReport, ReportRecord, ReportRepository};

/// Service for validating and storing report submissions.
pub struct ReportService {
    repo: ReportRepository,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ReportRepository::new(pool),
        }
    }

    /// Validates and persists a report submitted by `user`.
    ///
    /// The submitter's display tag and ID are snapshotted into the row;
    /// the store assigns the ID and timestamp.
    pub async fn submit(
        &self,
        user: &SessionUser,
        username: &str,
        report_reason: &str,
    ) -> Result<ReportRecord, ReportError> {
        let (username, report_reason) = validate_submission(username, report_reason)?;

        let report = NewReport {
            username,
            report_reason,
            submitted_by: user.display_tag(),
            submitted_by_id: user.id.clone(),
        };

        let record = self.repo.insert(&report).await?;
        tracing::info!(report_id = record.id, submitted_by_id = %record.submitted_by_id, "report submitted");
        Ok(record)
    }

    /// Lists every report, newest first.
    pub async fn list_all(&self) -> Result<Vec<ReportRecord>, ReportError> {
        Ok(self.repo.list_all().await?)
    }
}

/// Trims both submitted fields, rejecting the submission if either is
/// empty afterwards.
fn validate_submission(
    username: &str,
    report_reason: &str,
) -> Result<(String, String), ReportError> {
    let username = username.trim();
    let report_reason = report_reason.trim();

    if username.is_empty() || report_reason.is_empty() {
        return Err(ReportError::Validation(
            "Username and report reason are required",
        ));
    }

    Ok((username.to_string(), report_reason.to_string()))
}

/// Report submission and listing errors.
#[derive(Debug)]
pub enum ReportError {
    /// A required field was empty after trimming.
    Validation(&'static str),
    /// Database error.
    Database(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {}", msg),
            Self::Database(msg) => write!(f, "report database error: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<sqlx::Error> for ReportError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
            }
            Self::Database(msg) => {
                tracing::error!("report database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
