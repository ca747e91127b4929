//! User identity and access control for modreport.
//!
//! This crate provides:
//! - The ephemeral [`SessionUser`] identity established after Discord login
//! - The static [`AdminSet`] allow-list of administrator user IDs
//!
//! # Access Control Model
//!
//! Any user who completes the Discord OAuth2 flow may submit reports.
//! Administrative capabilities (viewing submitted reports) are granted to a
//! fixed set of Discord user IDs supplied via configuration at startup.
//! There is no mutable role state: membership changes require a restart.
//!
//! # Example
//!
//! ```
//! use modreport_identity::{AdminSet, SessionUser};
//!
//! let user = SessionUser {
//!     id: "42".to_string(),
//!     username: "alice".to_string(),
//!     discriminator: "0001".to_string(),
//!     avatar: None,
//! };
//!
//! let admins = AdminSet::from_list("42, 1337");
//!
//! assert_eq!(user.display_tag(), "alice#0001");
//! assert!(admins.is_admin(&user.id));
//! ```

pub mod admin;
pub mod user;

pub use admin::AdminSet;
pub use user::SessionUser;
