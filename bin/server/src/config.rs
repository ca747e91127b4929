//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables
//! (e.g. `DATABASE_URL`, `SESSION__SECRET`, `DISCORD__CLIENT_ID`).

use modreport_identity::AdminSet;
use serde::Deserialize;

/// Server configuration, read once at process startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Comma-separated list of administrator Discord user IDs.
    #[serde(default)]
    pub admins: String,

    /// Session cookie configuration.
    pub session: SessionConfig,

    /// Discord OAuth2 configuration.
    pub discord: DiscordConfig,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to derive the cookie signing key. Must be at least
    /// 32 bytes of key material.
    pub secret: String,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local
    /// HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

/// Discord OAuth2 application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// The OAuth2 client ID registered with Discord.
    pub client_id: String,
    /// The OAuth2 client secret.
    pub client_secret: String,
    /// The redirect URI for the OAuth2 callback.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

fn default_redirect_uri() -> String {
    "http://localhost:5000/callback".to_string()
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Builds the admin allow-list from the configured ID list.
    #[must_use]
    pub fn admin_set(&self) -> AdminSet {
        AdminSet::from_list(&self.admins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            listen_addr: default_listen_addr(),
            database_url: "postgres://localhost/modreport".to_string(),
            admins: "42,1337".to_string(),
            session: SessionConfig {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                secure_cookies: default_secure_cookies(),
            },
            discord: DiscordConfig {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
                redirect_uri: default_redirect_uri(),
            },
        }
    }

    #[test]
    fn defaults_cover_local_deployment() {
        let config = test_config();
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.discord.redirect_uri, "http://localhost:5000/callback");
        assert!(config.session.secure_cookies);
    }

    #[test]
    fn admin_set_is_parsed_from_comma_separated_ids() {
        let config = test_config();
        let admins = config.admin_set();
        assert!(admins.is_admin("42"));
        assert!(admins.is_admin("1337"));
        assert!(!admins.is_admin("7"));
    }

    #[test]
    fn admin_set_defaults_to_empty() {
        let config = ServerConfig {
            admins: String::new(),
            ..test_config()
        };
        assert!(config.admin_set().is_empty());
    }
}
