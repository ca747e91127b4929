//! HTML page handlers: the report form, the login prompt, and the admin
//! report listing.
//!
//! Pages are rendered as plain HTML strings; all user-originated content is
//! escaped before interpolation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use modreport_identity::SessionUser;

use crate::{
    auth::{AppState, OptionalUser},
    db::ReportRecord,
    reports::{ReportError, ReportService},
};

/// Home page: redirects anonymous visitors to the login page, otherwise
/// shows the report form.
pub async fn index(State(state): State<AppState>, OptionalUser(user): OptionalUser) -> Response {
    let Some(user) = user else {
        return Redirect::to("/login_page").into_response();
    };

    let is_admin = state.admins.is_admin(&user.id);
    Html(render_index(&user, is_admin)).into_response()
}

/// Login page: redirects authenticated users home.
pub async fn login_page(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(render_login_page()).into_response()
}

/// Admin page listing every submitted report, newest first.
pub async fn admin_reports(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<Response, ReportError> {
    let Some(user) = user else {
        return Ok(Redirect::to("/login_page").into_response());
    };

    if !state.admins.is_admin(&user.id) {
        return Ok((StatusCode::FORBIDDEN, "Access Denied - Admin Only").into_response());
    }

    let reports = ReportService::new(state.db_pool.clone()).list_all().await?;
    Ok(Html(render_admin_reports(&user, &reports)).into_response())
}

fn render_index(user: &SessionUser, is_admin: bool) -> String {
    let admin_link = if is_admin {
        r#"<p><a href="/admin/reports">View submitted reports</a></p>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Submit a Report</title></head>
<body>
  <h1>Submit a Report</h1>
  <p>Logged in as <strong>{user}</strong> &middot; <a href="/logout">Log out</a></p>
  {admin_link}
  <form id="report-form">
    <label for="username">Username to report</label><br>
    <input id="username" name="username" type="text" required><br>
    <label for="report_reason">Reason</label><br>
    <textarea id="report_reason" name="report_reason" required></textarea><br>
    <button type="submit">Submit</button>
  </form>
  <p id="result"></p>
  <script>
    document.getElementById('report-form').addEventListener('submit', async (e) => {{
      e.preventDefault();
      const form = e.target;
      const response = await fetch('/submit_report', {{
        method: 'POST',
        headers: {{'Content-Type': 'application/json'}},
        body: JSON.stringify({{
          username: form.username.value,
          report_reason: form.report_reason.value,
        }}),
      }});
      const body = await response.json();
      document.getElementById('result').textContent = body.message || body.error;
      if (body.success) form.reset();
    }});
  </script>
</body>
</html>
"#,
        user = escape_html(&user.display_tag()),
        admin_link = admin_link,
    )
}

fn render_login_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Log in</title></head>
<body>
  <h1>Report Portal</h1>
  <p>Log in with Discord to submit a report.</p>
  <p><a href="/login">Log in with Discord</a></p>
</body>
</html>
"#
    .to_string()
}

fn render_admin_reports(user: &SessionUser, reports: &[ReportRecord]) -> String {
    let rows: String = reports
        .iter()
        .map(|report| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                report.id,
                escape_html(&report.username),
                escape_html(&report.report_reason),
                escape_html(&report.submitted_by),
                report.timestamp.format("%Y-%m-%d %H:%M:%S"),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Submitted Reports</title></head>
<body>
  <h1>Submitted Reports</h1>
  <p>Logged in as <strong>{user}</strong> &middot; <a href="/">Back</a> &middot; <a href="/logout">Log out</a></p>
  <table border="1">
    <thead>
      <tr><th>ID</th><th>Username</th><th>Reason</th><th>Submitted by</th><th>Submitted at</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        user = escape_html(&user.display_tag()),
        rows = rows,
    )
}

/// Escapes text for interpolation into HTML element content and
/// double-quoted attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_user() -> SessionUser {
        SessionUser {
            id: "42".to_string(),
            username: "alice".to_string(),
            discriminator: "0001".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html(r#"<b>"bad" & 'user'</b>"#),
            "&lt;b&gt;&quot;bad&quot; &amp; &#39;user&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("baduser#1234"), "baduser#1234");
    }

    #[test]
    fn index_shows_admin_link_only_to_admins() {
        let user = test_user();
        assert!(render_index(&user, true).contains("/admin/reports"));
        assert!(!render_index(&user, false).contains("/admin/reports"));
    }

    #[test]
    fn index_shows_display_tag() {
        assert!(render_index(&test_user(), false).contains("alice#0001"));
    }

    #[test]
    fn admin_page_escapes_report_content() {
        let reports = vec![ReportRecord {
            id: 1,
            username: "<script>alert(1)</script>".to_string(),
            report_reason: "spam".to_string(),
            submitted_by: "alice#0001".to_string(),
            submitted_by_id: "42".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
        }];
        let html = render_admin_reports(&test_user(), &reports);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn admin_page_renders_one_row_per_report() {
        let reports: Vec<ReportRecord> = (1..=3)
            .map(|id| ReportRecord {
                id,
                username: format!("user{}", id),
                report_reason: "spam".to_string(),
                submitted_by: "alice#0001".to_string(),
                submitted_by_id: "42".to_string(),
                timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
            })
            .collect();
        let html = render_admin_reports(&test_user(), &reports);
        assert_eq!(html.matches("<tr><td>").count(), 3);
    }
}
