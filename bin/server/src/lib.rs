//! modreport web server.
//!
//! A small web application where Discord-authenticated users file reports
//! about other users and a configured set of administrators reviews them.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod pages;
pub mod reports;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::AppState;

/// Builds the application router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::index))
        .route("/login_page", get(pages::login_page))
        .route("/admin/reports", get(pages::admin_reports))
        // Auth flow
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        // JSON API
        .route("/submit_report", post(api::submit_report))
        .route("/api/reports", get(api::api_reports))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
