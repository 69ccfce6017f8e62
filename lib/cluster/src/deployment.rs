//! Deployment views and the rollout restart patch.

use chrono::{DateTime, SecondsFormat, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use kube::ResourceExt;

/// Pod template annotation that `kubectl rollout restart` bumps.
pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// What the console shows for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// Deployment name.
    pub name: String,
    /// Replicas reporting ready.
    pub ready_replicas: i32,
    /// Replicas requested by the deployment; 0 when unset.
    pub desired_replicas: i32,
}

impl From<&Deployment> for DeploymentSummary {
    fn from(deployment: &Deployment) -> Self {
        Self {
            name: deployment.name_any(),
            ready_replicas: deployment
                .status
                .as_ref()
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0),
            desired_replicas: deployment
                .spec
                .as_ref()
                .and_then(|s| s.replicas)
                .unwrap_or(0),
        }
    }
}

/// Builds the strategic merge patch that triggers a rollout restart.
#[must_use]
pub fn restart_patch(at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "spec": {
            "template": {
                "metadata": {
                    "annotations": {
                        RESTARTED_AT_ANNOTATION: at.to_rfc3339_opts(SecondsFormat::Secs, true)
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use k8s_openapi::api::apps::v1::{DeploymentSpec, DeploymentStatus};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn restart_patch_shape() {
        let at = Utc
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        let patch = restart_patch(at);
        assert_eq!(
            patch.to_string(),
            r#"
{
    "spec": {
        "template": {
            "metadata": {
                "annotations": {
                    "kubectl.kubernetes.io/restartedAt": "2025-01-02T03:04:05Z"
                }
            }
        }
    }
}
"#
            .replace(['\n', ' '], "")
        );
    }

    #[test]
    fn summary_reads_ready_and_desired() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("api".to_string()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(3),
                ..Default::default()
            }),
            status: Some(DeploymentStatus {
                ready_replicas: Some(2),
                ..Default::default()
            }),
        };

        assert_eq!(
            DeploymentSummary::from(&deployment),
            DeploymentSummary {
                name: "api".to_string(),
                ready_replicas: 2,
                desired_replicas: 3,
            }
        );
    }

    #[test]
    fn summary_defaults_missing_counts_to_zero() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("worker".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let summary = DeploymentSummary::from(&deployment);
        assert_eq!(summary.ready_replicas, 0);
        assert_eq!(summary.desired_replicas, 0);
    }
}
