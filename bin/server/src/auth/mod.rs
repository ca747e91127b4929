//! Authentication module for the modreport server.
//!
//! This module provides:
//! - The Discord OAuth2 client used for login
//! - Signed-cookie session handling
//! - Authentication extractors for Axum routes
//!
//! # Authorization Model
//!
//! Completing the Discord login grants report submission. Administrative
//! views additionally require the user's Discord ID to appear in the
//! configured [`AdminSet`](modreport_identity::AdminSet); the check is made
//! per request against state loaded once at startup.

pub mod discord;
pub mod middleware;
pub mod routes;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use modreport_identity::AdminSet;
use sqlx::PgPool;

use crate::config::SessionConfig;

pub use discord::{DiscordOAuthClient, DiscordUser};
pub use middleware::{OptionalUser, RequireUser};
pub use routes::{callback, login, logout};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db_pool: PgPool,
    /// Discord OAuth client for authentication.
    pub discord_client: DiscordOAuthClient,
    /// Configured administrator allow-list.
    pub admins: AdminSet,
    /// Whether to set the Secure flag on cookies.
    pub secure_cookies: bool,
    /// Cookie signing key derived from the configured session secret.
    signing_key: Key,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The session secret must provide at least 32 bytes of key material;
    /// shorter secrets are rejected at startup rather than panicking on
    /// the first request.
    pub fn new(
        db_pool: PgPool,
        discord_client: DiscordOAuthClient,
        admins: AdminSet,
        session: &SessionConfig,
    ) -> Result<Self, String> {
        if session.secret.len() < 32 {
            return Err("session secret must be at least 32 bytes".to_string());
        }

        Ok(Self {
            db_pool,
            discord_client,
            admins,
            secure_cookies: session.secure_cookies,
            signing_key: Key::derive_from(session.secret.as_bytes()),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.signing_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscordConfig;

    fn test_state(secret: &str) -> Result<AppState, String> {
        // connect_lazy validates the URL without touching the network.
        let pool = PgPool::connect_lazy("postgres://localhost/modreport").expect("lazy pool");
        let discord_client = DiscordOAuthClient::new(&DiscordConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:5000/callback".to_string(),
        })
        .expect("valid discord config");
        AppState::new(
            pool,
            discord_client,
            AdminSet::from_list("42"),
            &SessionConfig {
                secret: secret.to_string(),
                secure_cookies: false,
            },
        )
    }

    #[tokio::test]
    async fn short_session_secret_is_rejected() {
        assert!(test_state("too short").is_err());
    }

    #[tokio::test]
    async fn sufficient_session_secret_is_accepted() {
        let state = test_state("0123456789abcdef0123456789abcdef").expect("state");
        assert!(state.admins.is_admin("42"));
        assert!(!state.secure_cookies);
    }
}
