//! Authenticated sessions.
//!
//! A session is created once per successful login and never changes
//! afterwards. There is no server-side store: the signed
//! [`SessionToken`](crate::SessionToken) carrying the session is the only
//! copy, so a new login always produces a new session.

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// How long a session stays valid after issuance.
pub const SESSION_LIFETIME: Duration = Duration::minutes(5);

/// Identity and role recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    role: Role,
    namespaces: Option<Vec<String>>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session issued at `now`, expiring [`SESSION_LIFETIME`] later.
    ///
    /// The expiry is truncated to whole seconds, the resolution of the
    /// token's `exp` claim.
    #[must_use]
    pub fn issued_at(
        username: String,
        role: Role,
        namespaces: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = now + SESSION_LIFETIME;
        let expires_at = expires_at
            .duration_trunc(Duration::seconds(1))
            .unwrap_or(expires_at);
        Self {
            username,
            role,
            namespaces,
            expires_at,
        }
    }

    /// Creates a session issued now.
    #[must_use]
    pub fn issue_now(username: String, role: Role, namespaces: Option<Vec<String>>) -> Self {
        Self::issued_at(username, role, namespaces, Utc::now())
    }

    /// Rebuilds a session from verified token claims.
    pub(crate) fn from_parts(
        username: String,
        role: Role,
        namespaces: Option<Vec<String>>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            role,
            namespaces,
            expires_at,
        }
    }

    /// Returns the upstream username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the resolved role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the namespaces named by the identity provider, if any.
    #[must_use]
    pub fn namespaces(&self) -> Option<&[String]> {
        self.namespaces.as_deref()
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the session belongs to an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
