//! Roles and the precedence used to pick one from upstream role claims.
//!
//! An identity may carry many upstream realm roles. The console works with
//! exactly one [`Role`] per session, chosen by walking [`Role::PRECEDENCE`]
//! and taking the first role the identity holds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Console role carried in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May act on every namespace.
    Admin,
    /// May act on namespaces labelled for the elevated role.
    Elevated,
    /// May act on namespaces labelled for the user role.
    User,
}

impl Role {
    /// Highest precedence first.
    pub const PRECEDENCE: [Role; 3] = [Role::Admin, Role::Elevated, Role::User];

    /// Returns the canonical name used in tokens and namespace labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Elevated => "elevated",
            Self::User => "user",
        }
    }

    /// Returns true if this role bypasses namespace label checks.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Resolves a role from upstream role names using the canonical names.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(upstream: &[S]) -> Role {
        RoleNames::canonical().resolve(upstream)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upstream realm role names that map onto each console role.
///
/// Defaults match the realm the console was first deployed against, where
/// the elevated role is called `ngic-dev`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleNames {
    #[serde(default = "default_admin_role")]
    admin: String,
    #[serde(default = "default_elevated_role")]
    elevated: String,
    #[serde(default = "default_user_role")]
    user: String,
}

fn default_admin_role() -> String {
    "admin".to_string()
}

fn default_elevated_role() -> String {
    "ngic-dev".to_string()
}

fn default_user_role() -> String {
    "user".to_string()
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            admin: default_admin_role(),
            elevated: default_elevated_role(),
            user: default_user_role(),
        }
    }
}

impl RoleNames {
    /// Creates a mapping with explicit upstream names.
    #[must_use]
    pub fn new(admin: String, elevated: String, user: String) -> Self {
        Self {
            admin,
            elevated,
            user,
        }
    }

    /// Upstream names identical to the canonical role names.
    #[must_use]
    pub fn canonical() -> Self {
        Self::new(
            Role::Admin.as_str().to_string(),
            Role::Elevated.as_str().to_string(),
            Role::User.as_str().to_string(),
        )
    }

    /// Returns the upstream name for a role.
    #[must_use]
    pub fn upstream_name(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::Elevated => &self.elevated,
            Role::User => &self.user,
        }
    }

    /// Picks the highest-precedence role present in `upstream`.
    ///
    /// Identities holding none of the mapped names get [`Role::User`].
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, upstream: &[S]) -> Role {
        Role::PRECEDENCE
            .into_iter()
            .find(|role| {
                let name = self.upstream_name(*role);
                upstream.iter().any(|r| r.as_ref() == name)
            })
            .unwrap_or(Role::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_wins_over_user() {
        assert_eq!(Role::resolve(&["user", "admin"]), Role::Admin);
    }

    #[test]
    fn empty_set_defaults_to_user() {
        let none: [&str; 0] = [];
        assert_eq!(Role::resolve(&none), Role::User);
    }

    #[test]
    fn unmatched_roles_default_to_user() {
        assert_eq!(
            Role::resolve(&["offline_access", "uma_authorization"]),
            Role::User
        );
    }

    #[test]
    fn elevated_wins_over_user_but_not_admin() {
        assert_eq!(Role::resolve(&["user", "elevated"]), Role::Elevated);
        assert_eq!(
            Role::resolve(&["elevated", "admin", "user"]),
            Role::Admin
        );
    }

    #[test]
    fn default_names_map_ngic_dev_to_elevated() {
        let names = RoleNames::default();
        let upstream = vec!["offline_access".to_string(), "ngic-dev".to_string()];
        assert_eq!(names.resolve(&upstream), Role::Elevated);
        // The canonical name is not an upstream name under the default mapping.
        assert_eq!(names.resolve(&["elevated"]), Role::User);
    }

    #[test]
    fn custom_names_are_honoured() {
        let names = RoleNames::new(
            "cluster-admins".to_string(),
            "developers".to_string(),
            "viewers".to_string(),
        );
        assert_eq!(names.resolve(&["developers"]), Role::Elevated);
        assert_eq!(names.resolve(&["viewers", "cluster-admins"]), Role::Admin);
        assert_eq!(names.resolve(&["admin"]), Role::User);
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Elevated.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn role_serialization_format() {
        let json = serde_json::to_string(&Role::Elevated).expect("serialize");
        assert_eq!(json, "\"elevated\"");
        let parsed: Role = serde_json::from_str("\"admin\"").expect("deserialize");
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn role_names_deserialize_with_defaults() {
        let names: RoleNames =
            serde_json::from_str(r#"{"elevated": "platform-dev"}"#).expect("deserialize");
        assert_eq!(names.upstream_name(Role::Admin), "admin");
        assert_eq!(names.upstream_name(Role::Elevated), "platform-dev");
        assert_eq!(names.upstream_name(Role::User), "user");
    }
}
