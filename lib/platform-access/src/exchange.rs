//! Identity exchange with the upstream identity provider.
//!
//! The provider's identity token is read **without verifying its
//! signature**: the claims are trusted because they arrived in the response
//! to our own code exchange over the provider's token endpoint.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rootcause::Report;
use serde::Deserialize;

use crate::error::ExchangeError;
use crate::role::{Role, RoleNames};

/// Identity recovered from a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamIdentity {
    /// The provider's `preferred_username`.
    pub username: String,
    /// Role resolved from the realm roles.
    pub role: Role,
    /// The optional `allowed_namespaces` claim.
    pub namespaces: Option<Vec<String>>,
}

/// An OAuth2/OIDC identity provider that logins are delegated to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the URL to send the browser to, carrying `state`.
    fn authorization_url(&self, state: &str) -> String;

    /// Trades an authorization code for the caller's identity.
    ///
    /// Makes a single attempt; failures surface to the caller.
    async fn exchange(&self, code: &str) -> Result<UpstreamIdentity, Report<ExchangeError>>;
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    preferred_username: String,
    #[serde(default)]
    realm_access: RealmAccess,
    #[serde(default)]
    allowed_namespaces: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RealmAccess {
    #[serde(default)]
    roles: Vec<String>,
}

/// Reads the payload of an identity token and resolves the caller's role.
///
/// # Errors
///
/// Returns `MalformedIdentityToken` if the token is not three dot-separated
/// segments, the payload is not base64url JSON, or `preferred_username` is
/// missing.
pub fn parse_identity_token(
    id_token: &str,
    roles: &RoleNames,
) -> Result<UpstreamIdentity, ExchangeError> {
    // JWT is base64url(header).base64url(payload).signature
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(ExchangeError::MalformedIdentityToken {
            reason: format!("expected 3 segments, found {}", parts.len()),
        });
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| ExchangeError::MalformedIdentityToken {
            reason: format!("failed to decode payload: {e}"),
        })?;

    let claims: IdTokenClaims =
        serde_json::from_slice(&payload).map_err(|e| ExchangeError::MalformedIdentityToken {
            reason: format!("failed to parse payload: {e}"),
        })?;

    let role = roles.resolve(&claims.realm_access.roles);
    tracing::debug!(
        username = %claims.preferred_username,
        upstream_roles = ?claims.realm_access.roles,
        %role,
        "resolved upstream identity"
    );

    Ok(UpstreamIdentity {
        username: claims.preferred_username,
        role,
        namespaces: claims.allowed_namespaces,
    })
}
