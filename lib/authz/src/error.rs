//! Authorization error types.

use deployment_restarter_platform_access::Role;
use std::fmt;

/// Access decision errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The namespace does not grant restart access to the role.
    Denied {
        /// The namespace that was targeted.
        namespace: String,
        /// The role that was checked.
        role: Role,
    },
    /// The namespace labels could not be read.
    LookupFailed {
        /// The namespace that was targeted.
        namespace: String,
        /// Error details.
        details: String,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied { namespace, role } => {
                write!(
                    f,
                    "role '{}' may not act on namespace '{}'",
                    role, namespace
                )
            }
            Self::LookupFailed { namespace, details } => {
                write!(
                    f,
                    "failed to look up labels of namespace '{}': {}",
                    namespace, details
                )
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Failure reported by a namespace label lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// Error details.
    pub details: String,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "namespace label lookup failed: {}", self.details)
    }
}

impl std::error::Error for LookupError {}
