use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha512};
use tower_cookies::{cookie::SameSite, Cookie, Cookies, Key};

use crate::errors::AppError;
use crate::state::AppState;

/// Name of the signed cookie carrying the session identity.
pub const SESSION_COOKIE: &str = "pathfinder_session";

/// Expands the configured secret into the 64-byte key used to sign session cookies.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Emails are free-form, so the cookie carries them hex-encoded to keep
/// `;`, `,` and quotes out of the header value.
fn encode_identity(email: &str) -> String {
    hex::encode(email.as_bytes())
}

fn decode_identity(value: &str) -> Option<String> {
    let bytes = hex::decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

/// Request-scoped session context.
///
/// Built from the incoming cookie jar on each request; `login` and `logout`
/// stage cookie changes that are written back on the response.
pub struct Session {
    cookies: Cookies,
    key: Key,
}

impl Session {
    pub fn new(cookies: Cookies, key: Key) -> Self {
        Self { cookies, key }
    }

    /// The email bound to this session, if the cookie is present and its signature verifies.
    pub fn current_identity(&self) -> Option<String> {
        let cookie = self.cookies.signed(&self.key).get(SESSION_COOKIE)?;
        decode_identity(cookie.value())
    }

    /// Binds `email` to the session, replacing any previous identity.
    pub fn login(&self, email: &str) {
        let cookie = Cookie::build((SESSION_COOKIE, encode_identity(email)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        self.cookies.signed(&self.key).add(cookie);
    }

    /// Clears the identity. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        self.cookies
            .remove(Cookie::build(SESSION_COOKIE).path("/").build());
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;
        Ok(Session::new(cookies, state.session_key.clone()))
    }
}

/// Extractor for handlers that require a logged-in caller.
/// Rejects with `Unauthorized` when the session carries no identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        let email = session.current_identity().ok_or(AppError::Unauthorized)?;
        Ok(AuthUser { email })
    }
}
