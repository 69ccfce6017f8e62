//! Authentication core for the deployment-restarter console.
//!
//! This crate provides:
//! - The role model (`Role`, `RoleNames`) and upstream role resolution
//! - Sessions and the signed session token codec (`Session`, `SessionTokenCodec`)
//! - The identity exchange contract (`IdentityProvider`) and id-token parsing
//! - The request gate (`authenticate`)
//! - Identity provider configuration (`OidcConfig`)
//!
//! # Example
//!
//! ```
//! use deployment_restarter_platform_access::{Role, Session, SessionTokenCodec};
//!
//! let codec = SessionTokenCodec::new(b"signing-key");
//! let role = Role::resolve(&["user", "admin"]);
//! let session = Session::issue_now("alice".to_string(), role, None);
//!
//! let token = codec.issue(&session).unwrap();
//! let verified = codec.verify(&token).unwrap();
//!
//! assert_eq!(verified, session);
//! assert!(verified.is_admin());
//! ```

pub mod error;
pub mod exchange;
pub mod gate;
pub mod oidc;
pub mod role;
pub mod session;
pub mod token;

// Re-export main types at crate root
pub use error::{AuthError, ExchangeError, VerificationError};
pub use exchange::{IdentityProvider, UpstreamIdentity, parse_identity_token};
pub use gate::{TOKEN_COOKIE, authenticate, extract_token};
pub use oidc::{OidcConfig, OidcConfigBuilder};
pub use role::{Role, RoleNames};
pub use session::{SESSION_LIFETIME, Session};
pub use token::{SessionToken, SessionTokenCodec};
