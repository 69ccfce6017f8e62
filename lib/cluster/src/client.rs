//! Kubernetes client for namespace and deployment operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    Client, Config, ResourceExt,
    api::{Api, ListParams, Patch, PatchParams},
    config::{KubeConfigOptions, Kubeconfig},
};
use rootcause::Report;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use tokio::time;
use tracing::{debug, info, instrument};

use crate::deployment::{DeploymentSummary, restart_patch};
use crate::error::ClusterError;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Cluster operations the console needs.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Lists namespace names, optionally filtered by a label selector.
    async fn list_namespaces(
        &self,
        label_selector: Option<&str>,
    ) -> Result<Vec<String>, Report<ClusterError>>;

    /// Returns the labels of one namespace.
    async fn namespace_labels(
        &self,
        namespace: &str,
    ) -> Result<BTreeMap<String, String>, Report<ClusterError>>;

    /// Lists the deployments in a namespace.
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentSummary>, Report<ClusterError>>;

    /// Triggers a rollout restart by stamping the pod template with `at`.
    async fn restart_deployment(
        &self,
        namespace: &str,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<(), Report<ClusterError>>;
}

/// [`ClusterApi`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects using in-cluster configuration, falling back to a kubeconfig.
    ///
    /// The fallback reads `kubeconfig_path` when given and otherwise the
    /// default kubeconfig locations.
    pub async fn connect(kubeconfig_path: Option<&Path>) -> Result<Self, Report<ClusterError>> {
        let config = match Config::incluster() {
            Ok(config) => {
                info!("using in-cluster kubernetes configuration");
                config
            }
            Err(e) => {
                debug!(error = %e, "not running in-cluster, falling back to kubeconfig");
                Self::kubeconfig(kubeconfig_path).await?
            }
        };

        let client = Client::try_from(config).map_err(|e| ClusterError::Connect {
            details: e.to_string(),
        })?;

        Ok(Self::new(client))
    }

    async fn kubeconfig(path: Option<&Path>) -> Result<Config, Report<ClusterError>> {
        let connect_error = |e: &dyn std::fmt::Display| ClusterError::Connect {
            details: e.to_string(),
        };

        match path {
            Some(path) => {
                info!(path = %path.display(), "using kubeconfig override");
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| connect_error(&e))?;
                Ok(
                    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                        .await
                        .map_err(|e| connect_error(&e))?,
                )
            }
            None => Ok(Config::infer().await.map_err(|e| connect_error(&e))?),
        }
    }

    /// Returns the API server's version string.
    pub async fn server_version(&self) -> Result<String, Report<ClusterError>> {
        let info = bounded("get server version", self.client.apiserver_version()).await?;
        Ok(info.git_version)
    }
}

/// Runs a kube call under [`REQUEST_TIMEOUT`].
async fn bounded<T, F>(operation: &'static str, call: F) -> Result<T, Report<ClusterError>>
where
    F: Future<Output = Result<T, kube::Error>>,
{
    match time::timeout(REQUEST_TIMEOUT, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ClusterError::Request {
            operation,
            details: e.to_string(),
        }
        .into()),
        Err(_) => Err(ClusterError::Timeout { operation }.into()),
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    #[instrument(skip(self))]
    async fn list_namespaces(
        &self,
        label_selector: Option<&str>,
    ) -> Result<Vec<String>, Report<ClusterError>> {
        let api = Api::<Namespace>::all(self.client.clone());
        let mut params = ListParams::default();
        if let Some(selector) = label_selector {
            params = params.labels(selector);
        }

        let list = bounded("list namespaces", api.list(&params)).await?;
        let names: Vec<String> = list.items.iter().map(ResourceExt::name_any).collect();

        debug!(count = names.len(), "listed namespaces");
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn namespace_labels(
        &self,
        namespace: &str,
    ) -> Result<BTreeMap<String, String>, Report<ClusterError>> {
        let api = Api::<Namespace>::all(self.client.clone());
        let ns = bounded("get namespace", api.get(namespace)).await?;
        Ok(ns.labels().clone())
    }

    #[instrument(skip(self))]
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentSummary>, Report<ClusterError>> {
        let api = Api::<Deployment>::namespaced(self.client.clone(), namespace);
        let list = bounded("list deployments", api.list(&ListParams::default())).await?;
        let deployments: Vec<DeploymentSummary> =
            list.items.iter().map(DeploymentSummary::from).collect();

        debug!(count = deployments.len(), "listed deployments");
        Ok(deployments)
    }

    #[instrument(skip(self))]
    async fn restart_deployment(
        &self,
        namespace: &str,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<(), Report<ClusterError>> {
        let api = Api::<Deployment>::namespaced(self.client.clone(), namespace);
        let patch = restart_patch(at);
        debug!(?patch, "patch to apply");

        bounded(
            "restart deployment",
            api.patch(name, &PatchParams::default(), &Patch::Strategic(&patch)),
        )
        .await?;

        info!("restarted deployment");
        Ok(())
    }
}
