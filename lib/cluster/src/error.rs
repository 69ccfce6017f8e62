//! Cluster error types.

use std::fmt;

/// Errors from talking to the Kubernetes API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// No usable client configuration could be built.
    Connect {
        /// Error details.
        details: String,
    },
    /// The API server rejected or failed a request.
    Request {
        /// The operation that failed (e.g. "list namespaces").
        operation: &'static str,
        /// Error details.
        details: String,
    },
    /// The API server did not answer in time.
    Timeout {
        /// The operation that timed out.
        operation: &'static str,
    },
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect { details } => {
                write!(f, "failed to configure kubernetes client: {}", details)
            }
            Self::Request { operation, details } => {
                write!(f, "failed to {}: {}", operation, details)
            }
            Self::Timeout { operation } => {
                write!(f, "timed out trying to {}", operation)
            }
        }
    }
}

impl std::error::Error for ClusterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_names_operation() {
        let err = ClusterError::Request {
            operation: "get namespace",
            details: "namespaces \"payments\" not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to get namespace: namespaces \"payments\" not found"
        );
    }

    #[test]
    fn timeout_names_operation() {
        let err = ClusterError::Timeout {
            operation: "restart deployment",
        };
        assert!(err.to_string().contains("restart deployment"));
    }
}
