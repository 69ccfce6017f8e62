//! Request gate: finds the session token on a request and verifies it.
//!
//! The gate works on the raw cookie and header values so it can be used from
//! any HTTP layer; the server's extractor feeds it from axum request parts.

use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::session::Session;
use crate::token::{SessionToken, SessionTokenCodec};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// Picks the session token from the cookie value, falling back to a bearer
/// `Authorization` header.
///
/// # Errors
///
/// Returns `MissingToken` if neither source holds a non-empty token.
pub fn extract_token(
    cookie: Option<&str>,
    authorization: Option<&str>,
) -> Result<SessionToken, AuthError> {
    if let Some(value) = cookie.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(SessionToken::from(value));
    }

    authorization
        .and_then(|header| header.trim_start().strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(SessionToken::from)
        .ok_or(AuthError::MissingToken)
}

/// Extracts and verifies the request's session token.
///
/// # Errors
///
/// - `MissingToken` if no token is present
/// - `InvalidToken` if the token fails verification
pub fn authenticate(
    cookie: Option<&str>,
    authorization: Option<&str>,
    codec: &SessionTokenCodec,
    now: DateTime<Utc>,
) -> Result<Session, AuthError> {
    let token = extract_token(cookie, authorization)?;
    let session = codec.verify_at(&token, now)?;
    Ok(session)
}
