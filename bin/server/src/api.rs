//! Namespace and deployment handlers.
//!
//! All handlers require a session. Non-admin sessions only see namespaces
//! carrying their role's restart label. Path parameters must be valid
//! Kubernetes names; anything else is rejected before the cluster is
//! contacted.

use axum::{
    extract::{Path, State},
    response::Html,
};
use chrono::Utc;
use deployment_restarter_authz::authorize;
use deployment_restarter_cluster::{ClusterLabelLookup, is_dns_label, is_dns_subdomain};
use deployment_restarter_platform_access::Session;
use std::sync::Arc;
use tracing::info;

use crate::auth::{AppState, RequireSession};
use crate::error::ApiError;
use crate::pages;

/// Lists the namespaces the caller may act on.
pub async fn list_namespaces(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
) -> Result<Html<String>, ApiError> {
    let selector = (!session.is_admin()).then(|| state.label.selector(session.role()));
    let namespaces = state.cluster.list_namespaces(selector.as_deref()).await?;
    Ok(pages::namespace_list(&namespaces))
}

/// Lists the deployments of one namespace.
pub async fn list_deployments(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(namespace): Path<String>,
) -> Result<Html<String>, ApiError> {
    check_namespace(&namespace)?;
    ensure_access(&state, &session, &namespace).await?;

    let deployments = state.cluster.list_deployments(&namespace).await?;
    Ok(pages::deployment_list(&namespace, &deployments))
}

/// Restarts a deployment and returns the refreshed deployment list.
pub async fn restart_deployment(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path((namespace, deployment)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    check_namespace(&namespace)?;
    if !is_dns_subdomain(&deployment) {
        return Err(ApiError::InvalidName { kind: "deployment" });
    }
    ensure_access(&state, &session, &namespace).await?;

    state
        .cluster
        .restart_deployment(&namespace, &deployment, Utc::now())
        .await?;
    info!(
        username = %session.username(),
        %namespace,
        %deployment,
        "deployment restart requested"
    );

    let deployments = state.cluster.list_deployments(&namespace).await?;
    Ok(pages::deployment_list(&namespace, &deployments))
}

fn check_namespace(namespace: &str) -> Result<(), ApiError> {
    if is_dns_label(namespace) {
        Ok(())
    } else {
        Err(ApiError::InvalidName { kind: "namespace" })
    }
}

async fn ensure_access(
    state: &AppState,
    session: &Session,
    namespace: &str,
) -> Result<(), ApiError> {
    let lookup = ClusterLabelLookup::new(state.cluster.as_ref(), &state.label);
    authorize(session, namespace, &lookup).await.into_result()?;
    Ok(())
}
