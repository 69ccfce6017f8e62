//! Identity provider configuration.
//!
//! The console delegates login to a Keycloak realm. Endpoints are derived
//! from the server base URL and realm name.

use serde::{Deserialize, Serialize};

use crate::role::RoleNames;

/// Configuration for the Keycloak realm used for login.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Keycloak base URL (e.g., "https://sso.example.com").
    base_url: String,
    /// Realm name.
    realm: String,
    /// The OAuth2 client ID registered with the realm.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the OAuth2 callback (e.g., "https://console.example.com/callback").
    redirect_uri: String,
    /// Name of the cookie holding the login state.
    /// Default: "oauthstate"
    #[serde(default = "default_state_cookie")]
    state_cookie: String,
    /// Max-age of the state cookie, in seconds.
    /// Default: 300
    #[serde(default = "default_state_cookie_max_age")]
    state_cookie_max_age: i64,
    /// Timeout for the code exchange request, in seconds.
    /// Default: 10
    #[serde(default = "default_exchange_timeout_seconds")]
    exchange_timeout_seconds: u64,
    /// Realm role names mapped onto console roles.
    #[serde(default)]
    roles: RoleNames,
}

fn default_state_cookie() -> String {
    "oauthstate".to_string()
}

fn default_state_cookie_max_age() -> i64 {
    300
}

fn default_exchange_timeout_seconds() -> u64 {
    10
}

impl OidcConfig {
    /// Creates a new configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        base_url: String,
        realm: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self::builder(base_url, realm, client_id, client_secret, redirect_uri).build()
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        base_url: String,
        realm: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> OidcConfigBuilder {
        OidcConfigBuilder::new(base_url, realm, client_id, client_secret, redirect_uri)
    }

    /// Returns the realm's authorization endpoint.
    #[must_use]
    pub fn auth_url(&self) -> String {
        self.endpoint("auth")
    }

    /// Returns the realm's token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.endpoint("token")
    }

    fn endpoint(&self, name: &str) -> String {
        format!(
            "{}/auth/realms/{}/protocol/openid-connect/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.realm),
            name
        )
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the state cookie name.
    #[must_use]
    pub fn state_cookie(&self) -> &str {
        &self.state_cookie
    }

    /// Returns the state cookie max-age in seconds.
    #[must_use]
    pub fn state_cookie_max_age(&self) -> i64 {
        self.state_cookie_max_age
    }

    /// Returns the code exchange timeout.
    #[must_use]
    pub fn exchange_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.exchange_timeout_seconds)
    }

    /// Returns the realm role mapping.
    #[must_use]
    pub fn roles(&self) -> &RoleNames {
        &self.roles
    }
}

/// Builder for `OidcConfig`.
#[derive(Debug)]
pub struct OidcConfigBuilder {
    config: OidcConfig,
}

impl OidcConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        base_url: String,
        realm: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            config: OidcConfig {
                base_url,
                realm,
                client_id,
                client_secret,
                redirect_uri,
                state_cookie: default_state_cookie(),
                state_cookie_max_age: default_state_cookie_max_age(),
                exchange_timeout_seconds: default_exchange_timeout_seconds(),
                roles: RoleNames::default(),
            },
        }
    }

    /// Sets the state cookie name.
    #[must_use]
    pub fn state_cookie(mut self, name: String) -> Self {
        self.config.state_cookie = name;
        self
    }

    /// Sets the state cookie max-age in seconds.
    #[must_use]
    pub fn state_cookie_max_age(mut self, seconds: i64) -> Self {
        self.config.state_cookie_max_age = seconds;
        self
    }

    /// Sets the code exchange timeout in seconds.
    #[must_use]
    pub fn exchange_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.exchange_timeout_seconds = seconds;
        self
    }

    /// Sets the realm role mapping.
    #[must_use]
    pub fn roles(mut self, roles: RoleNames) -> Self {
        self.config.roles = roles;
        self
    }

    /// Builds the `OidcConfig`.
    #[must_use]
    pub fn build(self) -> OidcConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn config() -> OidcConfig {
        OidcConfig::new(
            "https://sso.example.com/".to_string(),
            "ops".to_string(),
            "console".to_string(),
            "s3cret".to_string(),
            "https://console.example.com/callback".to_string(),
        )
    }

    #[test]
    fn new_config_has_defaults() {
        let config = config();
        assert_eq!(config.state_cookie(), "oauthstate");
        assert_eq!(config.state_cookie_max_age(), 300);
        assert_eq!(config.exchange_timeout(), std::time::Duration::from_secs(10));
        assert_eq!(config.roles(), &RoleNames::default());
    }

    #[test]
    fn derives_keycloak_endpoints() {
        let config = config();
        assert_eq!(
            config.auth_url(),
            "https://sso.example.com/auth/realms/ops/protocol/openid-connect/auth"
        );
        assert_eq!(
            config.token_url(),
            "https://sso.example.com/auth/realms/ops/protocol/openid-connect/token"
        );
    }

    #[test]
    fn realm_is_path_escaped() {
        let config = OidcConfig::new(
            "https://sso.example.com".to_string(),
            "ops team".to_string(),
            "console".to_string(),
            "s3cret".to_string(),
            "https://console.example.com/callback".to_string(),
        );
        assert!(config.token_url().contains("/realms/ops%20team/"));
    }

    #[test]
    fn builder_allows_customization() {
        let config = OidcConfig::builder(
            "https://sso.example.com".to_string(),
            "ops".to_string(),
            "console".to_string(),
            "s3cret".to_string(),
            "https://console.example.com/callback".to_string(),
        )
        .state_cookie("login_state".to_string())
        .state_cookie_max_age(60)
        .exchange_timeout_seconds(3)
        .roles(RoleNames::canonical())
        .build();

        assert_eq!(config.state_cookie(), "login_state");
        assert_eq!(config.state_cookie_max_age(), 60);
        assert_eq!(config.exchange_timeout(), std::time::Duration::from_secs(3));
        assert_eq!(config.roles().resolve(&["elevated"]), Role::Elevated);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "base_url": "https://sso.example.com",
            "realm": "ops",
            "client_id": "console",
            "client_secret": "s3cret",
            "redirect_uri": "https://console.example.com/callback"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.client_id(), "console");
        assert_eq!(config.state_cookie(), "oauthstate");
        assert_eq!(config.roles().upstream_name(Role::Elevated), "ngic-dev");
    }
}
