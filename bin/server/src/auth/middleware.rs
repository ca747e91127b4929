//! Session cookie handling and authentication extractors for Axum.
//!
//! The logged-in identity lives in a signed cookie; there is no server-side
//! session table. Tampered or unparseable cookies are treated the same as
//! no cookie at all.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use modreport_identity::SessionUser;
use serde_json::json;

use super::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Auth state cookie name (CSRF protection during the OAuth flow).
pub const AUTH_STATE_COOKIE: &str = "auth_state";

/// Reads the session user out of a signed cookie jar, if present and valid.
pub fn session_user(jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Builds the session cookie establishing `user` as the logged-in identity.
///
/// The cookie has no max-age: it lasts for the browser session, and logout
/// removes it explicitly.
pub fn session_cookie(user: &SessionUser, secure: bool) -> Cookie<'static> {
    let value = serde_json::to_string(user).expect("serialize session user");
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Builds a removal cookie for `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// Extractor for optionally getting the authenticated user.
///
/// Used by the page routes, which redirect anonymous visitors rather than
/// rejecting the request.
pub struct OptionalUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(&app_state));
        Ok(OptionalUser(session_user(&jar)))
    }
}

/// Extractor for requiring an authenticated user on API routes.
///
/// Rejects anonymous requests with a 401 JSON error before the request
/// body is touched.
pub struct RequireUser(pub SessionUser);

impl<S> FromRequestParts<S> for RequireUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(&app_state));
        session_user(&jar)
            .map(RequireUser)
            .ok_or(AuthRejection::NotAuthenticated)
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Not authenticated"})),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jar() -> (SignedCookieJar, Key) {
        let key = Key::derive_from(&[7u8; 64]);
        (SignedCookieJar::new(key.clone()), key)
    }

    fn test_user() -> SessionUser {
        SessionUser {
            id: "42".to_string(),
            username: "alice".to_string(),
            discriminator: "0001".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn session_user_roundtrips_through_signed_jar() {
        let (jar, _) = test_jar();
        let jar = jar.add(session_cookie(&test_user(), false));
        let user = session_user(&jar).expect("session user");
        assert_eq!(user.id, "42");
        assert_eq!(user.display_tag(), "alice#0001");
    }

    #[test]
    fn missing_cookie_yields_no_user() {
        let (jar, _) = test_jar();
        assert!(session_user(&jar).is_none());
    }

    #[test]
    fn garbage_cookie_value_yields_no_user() {
        let (jar, _) = test_jar();
        let jar = jar.add(Cookie::new(SESSION_COOKIE, "not json"));
        assert!(session_user(&jar).is_none());
    }

    #[test]
    fn session_cookie_is_http_only_and_lax() {
        let cookie = session_cookie(&test_user(), true);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie(SESSION_COOKIE);
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
