//! Namespace access control for deployment-restarter.
//!
//! Admin sessions may act on every namespace. Other roles may act on a
//! namespace only while it carries the restart label for their role; the
//! label is read from the cluster on every request.

mod decision;
mod error;
mod label;

pub use decision::{Decision, NamespaceLabelLookup, authorize};
pub use error::{AccessError, LookupError};
pub use label::{DEFAULT_LABEL_DOMAIN, RestartLabel};
