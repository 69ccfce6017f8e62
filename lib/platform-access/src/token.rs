//! Signed, time-bounded session tokens.
//!
//! Tokens are compact HS256 JWS strings whose claims are the session's
//! username, role, optional namespace list and `exp`. Only the signature and
//! the expiry are checked on the way back in.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VerificationError;
use crate::role::Role;
use crate::session::Session;

/// A signed session token as carried by the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    username: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespaces: Option<Vec<String>>,
    exp: i64,
}

/// Issues and verifies session tokens under one signing key.
///
/// Building a codec with a different key invalidates every token issued by
/// the old one; there is no overlap window.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionTokenCodec {
    /// Creates a codec for the given symmetric key.
    #[must_use]
    pub fn new(key: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
        }
    }

    /// Signs a session into a token that expires with the session.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if the claims cannot be serialized.
    pub fn issue(&self, session: &Session) -> Result<SessionToken, VerificationError> {
        let claims = SessionClaims {
            username: session.username().to_string(),
            role: session.role(),
            namespaces: session.namespaces().map(<[String]>::to_vec),
            exp: session.expires_at().timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken)
            .map_err(|e| VerificationError::Malformed {
                reason: e.to_string(),
            })
    }

    /// Verifies a token against the system clock.
    ///
    /// # Errors
    ///
    /// See [`SessionTokenCodec::verify_at`].
    pub fn verify(&self, token: &SessionToken) -> Result<Session, VerificationError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token's signature, then its expiry against `now`.
    ///
    /// # Errors
    ///
    /// - `BadSignature` if the MAC does not match under this codec's key
    /// - `Expired` if `now` is at or after the embedded expiry
    /// - `Malformed` if the token cannot be parsed into the expected claims
    pub fn verify_at(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> Result<Session, VerificationError> {
        let data = jsonwebtoken::decode::<SessionClaims>(
            token.as_str(),
            &self.decoding,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerificationError::BadSignature,
            _ => VerificationError::Malformed {
                reason: e.to_string(),
            },
        })?;

        let claims = data.claims;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(|| {
            VerificationError::Malformed {
                reason: format!("exp {} is out of range", claims.exp),
            }
        })?;

        let session =
            Session::from_parts(claims.username, claims.role, claims.namespaces, expires_at);
        if session.is_expired_at(now) {
            return Err(VerificationError::Expired);
        }

        Ok(session)
    }
}
