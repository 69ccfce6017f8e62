//! Authentication module for the deployment-restarter server.
//!
//! This module provides:
//! - The Keycloak authorization-code login flow
//! - Stateless signed session tokens carried in the `token` cookie
//! - An extractor that turns a request into a verified [`Session`]
//!
//! # Authorization Model
//!
//! Everything a request needs to be authorized travels in the session
//! token: the username, the collapsed [`Role`](deployment_restarter_platform_access::Role)
//! and the namespaces the identity provider reported. Nothing is stored
//! server-side, so a role change at the identity provider takes effect on
//! the next login or when the five-minute token expires.
//!
//! Per-namespace restart permission is decided by
//! [`authorize`](deployment_restarter_authz::authorize) against the
//! namespace labels in the cluster.
//!
//! [`Session`]: deployment_restarter_platform_access::Session

pub mod middleware;
pub mod oidc;
pub mod routes;

use deployment_restarter_authz::RestartLabel;
use deployment_restarter_cluster::ClusterApi;
use deployment_restarter_platform_access::{IdentityProvider, OidcConfig, SessionTokenCodec};
use std::sync::Arc;

use crate::config::{ServerConfig, SessionConfig};

pub use middleware::{AuthRejection, RequireSession};
pub use oidc::KeycloakProvider;
pub use routes::{callback, login, logout};

/// Shared application state.
pub struct AppState {
    /// Signs and verifies session tokens.
    pub codec: SessionTokenCodec,
    /// Identity provider used for login.
    pub identity: Arc<dyn IdentityProvider>,
    /// Cluster the console operates on.
    pub cluster: Arc<dyn ClusterApi>,
    /// Restart label family for access decisions.
    pub label: RestartLabel,
    /// Session configuration.
    pub session_config: SessionConfig,
    /// Identity provider configuration (state cookie settings).
    pub oidc: OidcConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: &ServerConfig,
        identity: Arc<dyn IdentityProvider>,
        cluster: Arc<dyn ClusterApi>,
    ) -> Self {
        Self {
            codec: SessionTokenCodec::new(config.signing_key.as_bytes()),
            identity,
            cluster,
            label: RestartLabel::new(
                config.label_domain.clone(),
                config.oidc.roles().clone(),
            ),
            session_config: config.session.clone(),
            oidc: config.oidc.clone(),
        }
    }
}
