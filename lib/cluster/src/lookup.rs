//! Namespace label lookups backed by the cluster.

use async_trait::async_trait;
use deployment_restarter_authz::{LookupError, NamespaceLabelLookup, RestartLabel};
use deployment_restarter_platform_access::Role;
use rootcause::Report;

use crate::client::ClusterApi;

/// Reads restart labels straight from the cluster on every call.
pub struct ClusterLabelLookup<'a> {
    cluster: &'a dyn ClusterApi,
    label: &'a RestartLabel,
}

impl<'a> ClusterLabelLookup<'a> {
    /// Creates a lookup over `cluster` for the given label family.
    #[must_use]
    pub fn new(cluster: &'a dyn ClusterApi, label: &'a RestartLabel) -> Self {
        Self { cluster, label }
    }
}

#[async_trait]
impl NamespaceLabelLookup for ClusterLabelLookup<'_> {
    async fn has_restart_label(
        &self,
        namespace: &str,
        role: Role,
    ) -> Result<bool, Report<LookupError>> {
        let labels = self
            .cluster
            .namespace_labels(namespace)
            .await
            .map_err(|report| LookupError {
                details: report.current_context().to_string(),
            })?;

        let key = self.label.key(role);
        Ok(RestartLabel::grants(labels.get(&key).map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::DeploymentSummary;
    use crate::error::ClusterError;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;

    struct LabelledCluster {
        labels: BTreeMap<String, BTreeMap<String, String>>,
    }

    impl LabelledCluster {
        fn with(namespace: &str, labels: &[(&str, &str)]) -> Self {
            let labels = labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Self {
                labels: BTreeMap::from([(namespace.to_string(), labels)]),
            }
        }
    }

    #[async_trait]
    impl ClusterApi for LabelledCluster {
        async fn list_namespaces(
            &self,
            _label_selector: Option<&str>,
        ) -> Result<Vec<String>, Report<ClusterError>> {
            Ok(self.labels.keys().cloned().collect())
        }

        async fn namespace_labels(
            &self,
            namespace: &str,
        ) -> Result<BTreeMap<String, String>, Report<ClusterError>> {
            self.labels.get(namespace).cloned().ok_or_else(|| {
                ClusterError::Request {
                    operation: "get namespace",
                    details: format!("namespaces \"{namespace}\" not found"),
                }
                .into()
            })
        }

        async fn list_deployments(
            &self,
            _namespace: &str,
        ) -> Result<Vec<DeploymentSummary>, Report<ClusterError>> {
            Ok(Vec::new())
        }

        async fn restart_deployment(
            &self,
            _namespace: &str,
            _name: &str,
            _at: DateTime<Utc>,
        ) -> Result<(), Report<ClusterError>> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn true_label_grants_matching_role() {
        let cluster = LabelledCluster::with("payments", &[("ngic.com/restart.user", "true")]);
        let label = RestartLabel::default();
        let lookup = ClusterLabelLookup::new(&cluster, &label);

        assert!(
            lookup
                .has_restart_label("payments", Role::User)
                .await
                .expect("lookup")
        );
        assert!(
            !lookup
                .has_restart_label("payments", Role::Elevated)
                .await
                .expect("lookup")
        );
    }

    #[tokio::test]
    async fn elevated_role_reads_upstream_label_name() {
        let cluster = LabelledCluster::with("payments", &[("ngic.com/restart.ngic-dev", "true")]);
        let label = RestartLabel::default();
        let lookup = ClusterLabelLookup::new(&cluster, &label);

        assert!(
            lookup
                .has_restart_label("payments", Role::Elevated)
                .await
                .expect("lookup")
        );
        assert!(
            !lookup
                .has_restart_label("payments", Role::User)
                .await
                .expect("lookup")
        );
    }

    #[tokio::test]
    async fn non_true_value_does_not_grant() {
        let cluster = LabelledCluster::with("payments", &[("ngic.com/restart.user", "false")]);
        let label = RestartLabel::default();
        let lookup = ClusterLabelLookup::new(&cluster, &label);

        assert!(
            !lookup
                .has_restart_label("payments", Role::User)
                .await
                .expect("lookup")
        );
    }

    #[tokio::test]
    async fn missing_namespace_is_an_error() {
        let cluster = LabelledCluster::with("payments", &[]);
        let label = RestartLabel::default();
        let lookup = ClusterLabelLookup::new(&cluster, &label);

        let err = lookup
            .has_restart_label("search", Role::User)
            .await
            .expect_err("missing namespace");
        assert!(err.current_context().details.contains("not found"));
    }
}
