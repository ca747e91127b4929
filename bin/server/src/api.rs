//! JSON API handlers for report submission and the admin report listing.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{AppState, RequireUser},
    db::ApiReport,
    reports::{ReportError, ReportService},
};

/// Body of a `POST /submit_report` request.
#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub report_reason: String,
}

/// Accepts a report submission from the logged-in user.
pub async fn submit_report(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<SubmitReportRequest>,
) -> Result<Response, ReportError> {
    ReportService::new(state.db_pool.clone())
        .submit(&user, &body.username, &body.report_reason)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Report submitted successfully",
    }))
    .into_response())
}

/// Returns every report as JSON, newest first. Admins only.
pub async fn api_reports(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Response, ReportError> {
    if !state.admins.is_admin(&user.id) {
        return Ok((
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Access denied"})),
        )
            .into_response());
    }

    let reports: Vec<ApiReport> = ReportService::new(state.db_pool.clone())
        .list_all()
        .await?
        .iter()
        .map(|report| report.to_api())
        .collect();

    Ok(Json(reports).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_fields_default_to_empty() {
        // Missing fields behave like empty ones and fail validation
        // downstream, matching the 400 contract.
        let body: SubmitReportRequest = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(body.username, "");
        assert_eq!(body.report_reason, "");
    }

    #[test]
    fn submit_request_parses_both_fields() {
        let body: SubmitReportRequest =
            serde_json::from_str(r#"{"username":"baduser","report_reason":"spam"}"#)
                .expect("deserialize");
        assert_eq!(body.username, "baduser");
        assert_eq!(body.report_reason, "spam");
    }
}
