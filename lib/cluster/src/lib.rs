//! Kubernetes operations for deployment-restarter.
//!
//! Namespaces are listed and read for their restart labels; deployments are
//! listed and restarted by patching their pod template annotation, the same
//! way `kubectl rollout restart` does.

mod client;
mod deployment;
mod error;
mod lookup;
mod names;

pub use client::{ClusterApi, KubeCluster};
pub use deployment::{DeploymentSummary, RESTARTED_AT_ANNOTATION, restart_patch};
pub use error::ClusterError;
pub use lookup::ClusterLabelLookup;
pub use names::{is_dns_label, is_dns_subdomain};
