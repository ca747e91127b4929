//! Database repositories for the modreport server.
//!
//! The schema is a single append-only `reports` table; see the migrations
//! directory for its definition.

pub mod report;

pub use report::{ApiReport, NewReport, ReportRecord, ReportRepository};
