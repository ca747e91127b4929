//! Database repository for submitted reports.
//!
//! Reports are append-only: the repository exposes a single insert and a
//! single ordered listing. There is no update or delete path.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Wire format for `timestamp` fields in the reports API.
const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// Store-assigned ID.
    pub id: i64,
    /// The reported user's name, as entered by the submitter.
    pub username: String,
    /// Free-form description of the complaint.
    pub report_reason: String,
    /// `username#discriminator` of the submitter at submission time.
    pub submitted_by: String,
    /// Stable Discord user ID of the submitter.
    pub submitted_by_id: String,
    /// Store-assigned creation time.
    pub timestamp: DateTime<Utc>,
}

impl ReportRecord {
    /// Shapes the record for the JSON reports API.
    #[must_use]
    pub fn to_api(&self) -> ApiReport {
        ApiReport {
            id: self.id,
            username: self.username.clone(),
            report_reason: self.report_reason.clone(),
            submitted_by: self.submitted_by.clone(),
            submitted_by_id: self.submitted_by_id.clone(),
            timestamp: self.timestamp.format(API_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// JSON shape of a report in the `/api/reports` response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiReport {
    pub id: i64,
    pub username: String,
    pub report_reason: String,
    pub submitted_by: String,
    pub submitted_by_id: String,
    /// Formatted `YYYY-MM-DD HH:MM:SS`, UTC.
    pub timestamp: String,
}

/// Fields of a report not assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub username: String,
    pub report_reason: String,
    pub submitted_by: String,
    pub submitted_by_id: String,
}

/// Row type for report queries.
#[derive(FromRow)]
struct ReportRow {
    id: i64,
    username: String,
    report_reason: String,
    submitted_by: String,
    submitted_by_id: String,
    timestamp: DateTime<Utc>,
}

impl ReportRow {
    fn into_record(self) -> ReportRecord {
        ReportRecord {
            id: self.id,
            username: self.username,
            report_reason: self.report_reason,
            submitted_by: self.submitted_by,
            submitted_by_id: self.submitted_by_id,
            timestamp: self.timestamp,
        }
    }
}

/// Repository for report operations.
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new report, returning the persisted row with its
    /// store-assigned ID and timestamp.
    pub async fn insert(&self, report: &NewReport) -> Result<ReportRecord, sqlx::Error> {
        let row: ReportRow = sqlx::query_as(
            r#"
            INSERT INTO reports (username, report_reason, submitted_by, submitted_by_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, report_reason, submitted_by, submitted_by_id, timestamp
            "#,
        )
        .bind(&report.username)
        .bind(&report.report_reason)
        .bind(&report.submitted_by)
        .bind(&report.submitted_by_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    /// Lists every report, newest first. Reports sharing a timestamp come
    /// back in reverse insertion order.
    pub async fn list_all(&self) -> Result<Vec<ReportRecord>, sqlx::Error> {
        let rows: Vec<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, username, report_reason, submitted_by, submitted_by_id, timestamp
            FROM reports
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReportRow::into_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_record() -> ReportRecord {
        ReportRecord {
            id: 7,
            username: "baduser".to_string(),
            report_reason: "spam".to_string(),
            submitted_by: "alice#0001".to_string(),
            submitted_by_id: "42".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 13, 5, 9).unwrap(),
        }
    }

    #[test]
    fn api_timestamp_format() {
        let api = test_record().to_api();
        assert_eq!(api.timestamp, "2025-09-01 13:05:09");
    }

    #[test]
    fn api_shape_carries_all_fields() {
        let api = test_record().to_api();
        let json = serde_json::to_value(&api).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "username": "baduser",
                "report_reason": "spam",
                "submitted_by": "alice#0001",
                "submitted_by_id": "42",
                "timestamp": "2025-09-01 13:05:09",
            })
        );
    }
}
