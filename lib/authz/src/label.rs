//! Namespace access labels.
//!
//! Cluster operators grant a role restart access to a namespace by setting
//! `<domain>/restart.<role>=true` on it, where `<role>` is the realm role
//! name the identity provider uses (e.g. `ngic-dev` for the elevated role).
//! The console only reads these labels.

use deployment_restarter_platform_access::{Role, RoleNames};

/// Default label domain.
pub const DEFAULT_LABEL_DOMAIN: &str = "ngic.com";

/// The restart label family under one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartLabel {
    domain: String,
    roles: RoleNames,
}

impl RestartLabel {
    /// Creates the label family for `domain`, naming roles as `roles` does.
    #[must_use]
    pub fn new(domain: impl Into<String>, roles: RoleNames) -> Self {
        Self {
            domain: domain.into(),
            roles,
        }
    }

    /// Returns the label key granting `role` access.
    #[must_use]
    pub fn key(&self, role: Role) -> String {
        format!("{}/restart.{}", self.domain, self.roles.upstream_name(role))
    }

    /// Returns the label selector matching namespaces open to `role`.
    #[must_use]
    pub fn selector(&self, role: Role) -> String {
        format!("{}=true", self.key(role))
    }

    /// Returns true if `value` grants access.
    ///
    /// Only the exact string `"true"` does.
    #[must_use]
    pub fn grants(value: Option<&str>) -> bool {
        value == Some("true")
    }
}

impl Default for RestartLabel {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_DOMAIN, RoleNames::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_upstream_role_name() {
        let label = RestartLabel::default();
        assert_eq!(label.key(Role::Admin), "ngic.com/restart.admin");
        assert_eq!(label.key(Role::Elevated), "ngic.com/restart.ngic-dev");
        assert_eq!(label.key(Role::User), "ngic.com/restart.user");
    }

    #[test]
    fn selector_follows_configured_role_names() {
        let roles = RoleNames::new(
            "admin".to_string(),
            "platform-dev".to_string(),
            "user".to_string(),
        );
        let label = RestartLabel::new("example.org", roles);
        assert_eq!(
            label.selector(Role::Elevated),
            "example.org/restart.platform-dev=true"
        );
    }

    #[test]
    fn only_exact_true_grants() {
        assert!(RestartLabel::grants(Some("true")));
        assert!(!RestartLabel::grants(Some("True")));
        assert!(!RestartLabel::grants(Some("yes")));
        assert!(!RestartLabel::grants(Some("")));
        assert!(!RestartLabel::grants(None));
    }
}
