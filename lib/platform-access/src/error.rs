//! Error types for the platform-access crate.
//!
//! - `VerificationError`: a session token failed verification
//! - `AuthError`: a request carried no usable session token
//! - `ExchangeError`: the identity provider exchange failed
//!
//! Exchange errors cross an I/O boundary and are returned wrapped in a
//! rootcause `Report`; the others come from pure functions and are returned
//! as-is.

use std::fmt;

/// Errors from verifying a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The signature does not match the payload under the current key.
    BadSignature,
    /// The token's expiry has passed.
    Expired,
    /// The token could not be parsed into the expected shape.
    Malformed { reason: String },
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSignature => write!(f, "token signature does not verify"),
            Self::Expired => write!(f, "token has expired"),
            Self::Malformed { reason } => write!(f, "malformed token: {reason}"),
        }
    }
}

impl std::error::Error for VerificationError {}

/// Errors from authenticating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Neither the session cookie nor a bearer header was present.
    MissingToken,
    /// A token was present but did not verify.
    InvalidToken { cause: VerificationError },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing token"),
            Self::InvalidToken { cause } => write!(f, "invalid token: {cause}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingToken => None,
            Self::InvalidToken { cause } => Some(cause),
        }
    }
}

impl From<VerificationError> for AuthError {
    fn from(cause: VerificationError) -> Self {
        Self::InvalidToken { cause }
    }
}

/// Errors from exchanging an authorization code with the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The token endpoint could not be reached or answered with a non-2xx status.
    UpstreamUnavailable { reason: String },
    /// The token response or its identity token could not be parsed.
    MalformedIdentityToken { reason: String },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpstreamUnavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
            Self::MalformedIdentityToken { reason } => {
                write!(f, "malformed identity token: {reason}")
            }
        }
    }
}

impl std::error::Error for ExchangeError {}
