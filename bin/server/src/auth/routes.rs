//! Authentication routes for login, callback, and logout.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use deployment_restarter_platform_access::{
    ExchangeError, SESSION_LIFETIME, Session, TOKEN_COOKIE, VerificationError,
};
use oauth2::CsrfToken;
use rootcause::Report;
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;
use tracing::{error, info, warn};

use super::AppState;

/// Query parameters for the OIDC callback.
///
/// Both are optional so that missing values are reported by the handler
/// rather than rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Initiates the login flow by redirecting to the identity provider.
pub async fn login(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let csrf = CsrfToken::new_random();
    let auth_url = state.identity.authorization_url(csrf.secret());

    let cookie = Cookie::build((state.oidc.state_cookie().to_string(), csrf.secret().clone()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(state.oidc.state_cookie_max_age()));

    (
        StatusCode::FOUND,
        jar.add(cookie),
        [(header::LOCATION, auth_url)],
    )
}

/// Handles the callback after the user authenticates with the identity provider.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, CallbackError> {
    // The state must match before the code is used at all.
    let expected = jar
        .get(state.oidc.state_cookie())
        .map(|c| c.value())
        .filter(|value| !value.is_empty())
        .ok_or(CallbackError::InvalidState)?;
    if query.state.as_deref() != Some(expected) {
        warn!("callback state does not match state cookie");
        return Err(CallbackError::InvalidState);
    }

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(CallbackError::MissingCode)?;

    let identity = state
        .identity
        .exchange(code)
        .await
        .map_err(CallbackError::Exchange)?;

    let session = Session::issue_now(identity.username, identity.role, identity.namespaces);
    let token = state
        .codec
        .issue(&session)
        .map_err(CallbackError::TokenIssue)?;

    info!(username = %session.username(), role = %session.role(), "user logged in");

    let session_cookie = Cookie::build((TOKEN_COOKIE, token.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(SESSION_LIFETIME.num_seconds()));

    // Remove state cookie
    let remove_state = Cookie::build((state.oidc.state_cookie().to_string(), ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    let jar = jar.add(session_cookie).add(remove_state);

    Ok((jar, Redirect::to("/")))
}

/// Logs out the user by clearing the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let remove_session = Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/"))
}

/// Login callback errors.
#[derive(Debug)]
pub enum CallbackError {
    InvalidState,
    MissingCode,
    Exchange(Report<ExchangeError>),
    TokenIssue(VerificationError),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidState => (StatusCode::BAD_REQUEST, "Invalid state").into_response(),
            Self::MissingCode => (StatusCode::BAD_REQUEST, "Code not found").into_response(),
            Self::Exchange(report) => {
                error!("Token exchange failed: {}", report);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Token exchange error: {}", report.current_context()),
                )
                    .into_response()
            }
            Self::TokenIssue(e) => {
                error!("Failed to issue session token: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
