//! Authentication extractors for Axum.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use deployment_restarter_platform_access::{AuthError, Session, TOKEN_COOKIE, authenticate};
use std::sync::Arc;
use tracing::debug;

use super::AppState;

/// Extractor for requiring a verified session.
///
/// The token is read from the `token` cookie, falling back to an
/// `Authorization: Bearer` header. Requests without a valid token are
/// rejected with 401.
pub struct RequireSession(pub Session);

impl<S> FromRequestParts<S> for RequireSession
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar.get(TOKEN_COOKIE).map(|c| c.value());
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let session = authenticate(cookie, authorization, &app_state.codec, Utc::now())
            .map_err(|e| {
                debug!(error = %e, "rejecting unauthenticated request");
                AuthRejection(e)
            })?;

        Ok(RequireSession(session))
    }
}

/// Rejection type for [`RequireSession`].
#[derive(Debug)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            AuthError::MissingToken => "Missing token",
            AuthError::InvalidToken { .. } => "Invalid token",
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
