//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use deployment_restarter_authz::AccessError;
use deployment_restarter_cluster::ClusterError;
use rootcause::Report;
use tracing::error;

/// Errors returned by the namespace and deployment handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A path parameter is not a valid Kubernetes object name.
    InvalidName { kind: &'static str },
    /// The caller may not act on the namespace.
    Access(AccessError),
    /// A cluster operation failed.
    Cluster(Report<ClusterError>),
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<Report<ClusterError>> for ApiError {
    fn from(report: Report<ClusterError>) -> Self {
        Self::Cluster(report)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidName { kind } => {
                (StatusCode::BAD_REQUEST, format!("Invalid {}", kind)).into_response()
            }
            Self::Access(AccessError::Denied { .. }) => {
                (StatusCode::FORBIDDEN, "Forbidden").into_response()
            }
            Self::Access(AccessError::LookupFailed { namespace, details }) => {
                error!(%namespace, %details, "namespace lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to get namespace: {}", details),
                )
                    .into_response()
            }
            Self::Cluster(report) => {
                error!("Cluster operation failed: {}", report);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    report.current_context().to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployment_restarter_platform_access::Role;

    #[test]
    fn denied_is_forbidden() {
        let response = ApiError::from(AccessError::Denied {
            namespace: "payments".to_string(),
            role: Role::User,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn invalid_name_is_bad_request() {
        let response = ApiError::InvalidName { kind: "namespace" }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_failure_is_server_error() {
        let response = ApiError::from(AccessError::LookupFailed {
            namespace: "payments".to_string(),
            details: "connection refused".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn cluster_failure_is_server_error() {
        let report: Report<ClusterError> = ClusterError::Timeout {
            operation: "list deployments",
        }
        .into();
        let response = ApiError::from(report).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
