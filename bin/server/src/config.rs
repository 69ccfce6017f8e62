//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded once at startup via the `config` crate from `DEPRESTART_*`
//! environment variables. Nested sections use `__`, e.g.
//! `DEPRESTART_OIDC__CLIENT_ID`.
//!
//! See [`OidcConfig`](deployment_restarter_platform_access::OidcConfig) for
//! identity provider configuration.

use deployment_restarter_authz::DEFAULT_LABEL_DOMAIN;
use deployment_restarter_platform_access::OidcConfig;
use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "DEPRESTART";

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    /// Kubeconfig to use when not running in-cluster.
    #[serde(default)]
    pub kubeconfig_path: Option<PathBuf>,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Symmetric key used to sign session tokens.
    pub signing_key: String,

    /// Domain of the namespace restart labels.
    #[serde(default = "default_label_domain")]
    pub label_domain: String,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Identity provider configuration.
    pub oidc: OidcConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_server_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_label_domain() -> String {
    DEFAULT_LABEL_DOMAIN.to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(environment())
    }

    fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.signing_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "signing_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
