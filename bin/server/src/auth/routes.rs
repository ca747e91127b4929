//! Authentication routes for login, callback, and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use modreport_identity::SessionUser;
use serde::Deserialize;
use time::Duration as TimeDuration;

use super::{
    AppState,
    discord::DiscordAuthState,
    middleware::{AUTH_STATE_COOKIE, removal_cookie, session_cookie},
};

/// Query parameters for the OAuth callback.
///
/// All fields are optional: Discord sends `code` + `state` on success and
/// `error` when the user denies the authorization request.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Initiates the login flow by redirecting to Discord's authorization URL.
pub async fn login(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let (auth_url, auth_state) = state.discord_client.authorization_url();

    // Store the auth state in a signed cookie for validation on callback
    let auth_state_json = serde_json::to_string(&auth_state).expect("serialize auth state");

    let cookie = Cookie::build((AUTH_STATE_COOKIE, auth_state_json))
        .path("/")
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(10));

    (jar.add(cookie), Redirect::to(&auth_url))
}

/// Handles the OAuth callback after the user authenticates with Discord.
///
/// Provider errors and failed exchanges send the user back to the login
/// page to retry; a missing or mismatched `state` is rejected outright.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Result<Response, AuthError> {
    // Read the in-flight auth state before invalidating its cookie; either
    // outcome below ends this login attempt.
    let stored_state = jar
        .get(AUTH_STATE_COOKIE)
        .map(|cookie| serde_json::from_str::<DiscordAuthState>(cookie.value()));
    let jar = jar.add(removal_cookie(AUTH_STATE_COOKIE));

    // The provider signaled denial or an error; nothing to validate.
    if let Some(error) = query.error {
        tracing::info!(error = %error, "Discord authorization was not granted");
        return Ok((jar, Redirect::to("/login_page")).into_response());
    }

    let auth_state = match stored_state {
        Some(Ok(state)) => state,
        Some(Err(_)) => return Err(AuthError::InvalidAuthState),
        None => return Err(AuthError::MissingAuthState),
    };

    // Validate the CSRF state token returned by the provider
    match query.state {
        Some(ref returned) if *returned == auth_state.csrf_token => {}
        _ => return Err(AuthError::CsrfMismatch),
    }

    let Some(code) = query.code else {
        return Err(AuthError::MalformedCallback);
    };

    // Exchange the authorization code and fetch the user's profile. Any
    // failure here sends the user back to the login page to retry.
    let access_token = match state
        .discord_client
        .exchange_code(&code, &auth_state.pkce_verifier)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth token exchange failed");
            return Ok((jar, Redirect::to("/login_page")).into_response());
        }
    };

    let profile = match state.discord_client.fetch_user(&access_token).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, "Discord profile fetch failed");
            return Ok((jar, Redirect::to("/login_page")).into_response());
        }
    };

    let user = SessionUser {
        id: profile.id,
        username: profile.username,
        discriminator: profile.discriminator,
        avatar: profile.avatar,
    };

    tracing::info!(user_id = %user.id, "user logged in");

    let jar = jar.add(session_cookie(&user, state.secure_cookies));
    Ok((jar, Redirect::to("/")).into_response())
}

/// Logs out the user by removing the session cookie.
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    (
        jar.add(removal_cookie(super::middleware::SESSION_COOKIE)),
        Redirect::to("/login_page"),
    )
}

/// Authentication errors surfaced as HTTP responses.
#[derive(Debug)]
pub enum AuthError {
    MissingAuthState,
    InvalidAuthState,
    CsrfMismatch,
    MalformedCallback,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthState => (StatusCode::BAD_REQUEST, "Missing auth state"),
            Self::InvalidAuthState => (StatusCode::BAD_REQUEST, "Invalid auth state"),
            Self::CsrfMismatch => (StatusCode::BAD_REQUEST, "CSRF token mismatch"),
            Self::MalformedCallback => (StatusCode::BAD_REQUEST, "Malformed callback"),
        };

        (status, message).into_response()
    }
}
