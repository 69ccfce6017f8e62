//! Per-request access decisions for namespaces.

use async_trait::async_trait;
use deployment_restarter_platform_access::{Role, Session};
use rootcause::Report;
use tracing::{debug, warn};

use crate::error::{AccessError, LookupError};

/// Reads whether a namespace carries the restart label for a role.
///
/// Implementations must consult the cluster on every call.
#[async_trait]
pub trait NamespaceLabelLookup: Send + Sync {
    /// Returns true if `namespace` is labelled `"true"` for `role`.
    async fn has_restart_label(
        &self,
        namespace: &str,
        role: Role,
    ) -> Result<bool, Report<LookupError>>;
}

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The session may act on the namespace.
    Allow,
    /// The session may not act on the namespace.
    Deny(AccessError),
}

impl Decision {
    /// Returns true for [`Decision::Allow`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Converts the decision into a result.
    ///
    /// # Errors
    ///
    /// Returns the attached [`AccessError`] for [`Decision::Deny`].
    pub fn into_result(self) -> Result<(), AccessError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(err) => Err(err),
        }
    }
}

/// Decides whether `session` may list or restart deployments in `namespace`.
///
/// Admins are always allowed. Every other role is allowed only when the
/// lookup reports the namespace's restart label for that role; a failed
/// lookup denies, keeping the underlying error.
pub async fn authorize(
    session: &Session,
    namespace: &str,
    lookup: &dyn NamespaceLabelLookup,
) -> Decision {
    let role = session.role();
    if role.is_admin() {
        debug!(username = session.username(), namespace, "admin access");
        return Decision::Allow;
    }

    match lookup.has_restart_label(namespace, role).await {
        Ok(true) => {
            debug!(username = session.username(), namespace, %role, "access granted by label");
            Decision::Allow
        }
        Ok(false) => {
            debug!(username = session.username(), namespace, %role, "access denied");
            Decision::Deny(AccessError::Denied {
                namespace: namespace.to_string(),
                role,
            })
        }
        Err(report) => {
            warn!(
                username = session.username(),
                namespace,
                %role,
                error = %report,
                "namespace label lookup failed"
            );
            Decision::Deny(AccessError::LookupFailed {
                namespace: namespace.to_string(),
                details: report.current_context().details.clone(),
            })
        }
    }
}
