//! Discord OAuth2 client.
//!
//! Discord does not support OIDC discovery, so the client is built from the
//! documented authorization and token endpoints directly. Only the
//! `identify` scope is requested; the access token is used once, to fetch
//! the authenticated user's profile, and is then discarded.

use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
    basic::BasicClient,
};
use serde::Deserialize;

use crate::config::DiscordConfig;

/// Discord API base URL.
const DISCORD_API_BASE_URL: &str = "https://discord.com/api/v10";

/// OAuth scopes requested at login. `identify` grants read access to the
/// basic profile of the authorizing user and nothing else.
const DISCORD_SCOPES: &[&str] = &["identify"];

/// Discord OAuth2 client.
#[derive(Clone)]
pub struct DiscordOAuthClient {
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    redirect_url: String,
    http_client: reqwest::Client,
}

impl DiscordOAuthClient {
    /// Creates a new Discord OAuth client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured redirect URI is not a valid URL.
    pub fn new(config: &DiscordConfig) -> Result<Self, DiscordError> {
        // Validate the redirect URL up front; the per-request builders
        // below rely on it being well-formed.
        let _ = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| DiscordError::Configuration(format!("invalid redirect URI: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                DiscordError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_url: format!("{}/oauth2/authorize", DISCORD_API_BASE_URL),
            token_url: format!("{}/oauth2/token", DISCORD_API_BASE_URL),
            redirect_url: config.redirect_uri.clone(),
            http_client,
        })
    }

    /// Generates the authorization URL for redirecting the user to Discord.
    ///
    /// Returns the URL along with the auth state the caller must persist
    /// and validate on callback.
    pub fn authorization_url(&self) -> (String, DiscordAuthState) {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(self.auth_url.clone()).expect("valid auth URL"))
            .set_redirect_uri(
                RedirectUrl::new(self.redirect_url.clone()).expect("valid redirect URL"),
            );

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);

        for scope in DISCORD_SCOPES {
            auth_request = auth_request.add_scope(Scope::new((*scope).to_string()));
        }

        let (auth_url, csrf_token) = auth_request.url();

        let state = DiscordAuthState {
            csrf_token: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };

        (auth_url.to_string(), state)
    }

    /// Exchanges the authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<String, DiscordError> {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_token_uri(TokenUrl::new(self.token_url.clone()).expect("valid token URL"))
            .set_redirect_uri(
                RedirectUrl::new(self.redirect_url.clone()).expect("valid redirect URL"),
            );

        let pkce_verifier = PkceCodeVerifier::new(pkce_verifier.to_string());

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.http_client)
            .await
            .map_err(|e| DiscordError::TokenExchange(format!("token exchange failed: {}", e)))?;

        Ok(token_response.access_token().secret().clone())
    }

    /// Fetches the authenticated user's profile from Discord.
    pub async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, DiscordError> {
        let response = self
            .http_client
            .get(format!("{}/users/@me", DISCORD_API_BASE_URL))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DiscordError::Profile(format!("profile request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DiscordError::Profile(format!(
                "profile request returned {}",
                response.status()
            )));
        }

        response
            .json::<DiscordUser>()
            .await
            .map_err(|e| DiscordError::Profile(format!("invalid profile response: {}", e)))
    }
}

/// State stored during the OAuth flow for validation on callback.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DiscordAuthState {
    pub csrf_token: String,
    pub pkce_verifier: String,
}

/// The profile returned by Discord's `/users/@me` endpoint.
///
/// Only the fields this application uses are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    /// Stable Discord user ID.
    pub id: String,
    /// Current username.
    pub username: String,
    /// Discriminator; accounts on the new username system omit it or
    /// report `"0"`.
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Avatar hash, if set.
    #[serde(default)]
    pub avatar: Option<String>,
}

fn default_discriminator() -> String {
    "0".to_string()
}

/// Discord OAuth errors.
#[derive(Debug)]
pub enum DiscordError {
    /// Configuration error.
    Configuration(String),
    /// Token exchange failed.
    TokenExchange(String),
    /// Profile fetch failed.
    Profile(String),
}

impl std::fmt::Display for DiscordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Discord configuration error: {}", msg),
            Self::TokenExchange(msg) => write!(f, "Discord token exchange error: {}", msg),
            Self::Profile(msg) => write!(f, "Discord profile error: {}", msg),
        }
    }
}

impl std::error::Error for DiscordError {}
