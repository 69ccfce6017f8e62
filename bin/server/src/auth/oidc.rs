//! Keycloak identity provider.
//!
//! The authorization URL is built with the `oauth2` crate. The code
//! exchange is a plain form POST to the realm's token endpoint; the
//! returned identity token is handed to
//! [`parse_identity_token`] for claim extraction.

use async_trait::async_trait;
use deployment_restarter_platform_access::{
    ExchangeError, IdentityProvider, OidcConfig, RoleNames, UpstreamIdentity,
    parse_identity_token,
};
use oauth2::basic::BasicClient;
use oauth2::{AuthUrl, ClientId, CsrfToken, EndpointSet, RedirectUrl, Scope};
use rootcause::Report;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// [`IdentityProvider`] backed by a Keycloak realm.
pub struct KeycloakProvider {
    client: BasicClient<EndpointSet>,
    http_client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    roles: RoleNames,
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    id_token: String,
}

impl KeycloakProvider {
    /// Creates a provider for the configured realm.
    ///
    /// # Errors
    ///
    /// Returns `OidcError::Configuration` if a configured URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &OidcConfig) -> Result<Self, OidcError> {
        let auth_url = AuthUrl::new(config.auth_url())
            .map_err(|e| OidcError::Configuration(format!("invalid auth URL: {}", e)))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid redirect URI: {}", e)))?;

        let client = BasicClient::new(ClientId::new(config.client_id().to_string()))
            .set_auth_uri(auth_url)
            .set_redirect_uri(redirect_url);

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.exchange_timeout())
            .build()
            .map_err(|e| {
                OidcError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            http_client,
            token_url: config.token_url(),
            client_id: config.client_id().to_string(),
            client_secret: config.client_secret().to_string(),
            redirect_uri: config.redirect_uri().to_string(),
            roles: config.roles().clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for KeycloakProvider {
    fn authorization_url(&self, state: &str) -> String {
        let (url, _csrf) = self
            .client
            .authorize_url(|| CsrfToken::new(state.to_string()))
            .add_scope(Scope::new("openid".to_string()))
            .url();
        url.to_string()
    }

    #[instrument(skip_all)]
    async fn exchange(&self, code: &str) -> Result<UpstreamIdentity, Report<ExchangeError>> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ExchangeError::UpstreamUnavailable {
                reason: format!("token endpoint error: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "token endpoint rejected code exchange");
            return Err(ExchangeError::UpstreamUnavailable {
                reason: format!("token endpoint returned {}", status),
            }
            .into());
        }

        let body: TokenEndpointResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ExchangeError::MalformedIdentityToken {
                    reason: format!("invalid token response: {}", e),
                }
            } else {
                ExchangeError::UpstreamUnavailable {
                    reason: format!("failed to read token response: {}", e),
                }
            }
        })?;

        let identity = parse_identity_token(&body.id_token, &self.roles)?;
        debug!(username = %identity.username, role = %identity.role, "code exchange succeeded");
        Ok(identity)
    }
}

/// Identity provider setup errors.
#[derive(Debug)]
pub enum OidcError {
    /// Configuration error.
    Configuration(String),
}

impl std::fmt::Display for OidcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "OIDC configuration error: {}", msg),
        }
    }
}

impl std::error::Error for OidcError {}
