//! Verified token
//!
//! The terminal success state of verification. Only
//! [`Verifier::verify`](crate::Verifier::verify) constructs this type, so
//! holding one is proof that the signature and every registered claim
//! predicate passed.

use crate::claims::ClaimValue;
use crate::token::DecodedToken;

/// A token whose signature and registered claims have been verified
///
/// This is the only representation safe to use for authorization decisions.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    token: DecodedToken,
}

impl VerifiedToken {
    pub(crate) fn new(token: DecodedToken) -> Self {
        Self { token }
    }

    /// The underlying decoded token
    pub fn decoded(&self) -> &DecodedToken {
        &self.token
    }

    /// Unwrap into the decoded token
    pub fn into_decoded(self) -> DecodedToken {
        self.token
    }

    pub fn issuer(&self) -> Option<&str> {
        self.token.issuer()
    }

    pub fn subject(&self) -> Option<&str> {
        self.token.subject()
    }

    pub fn audience(&self) -> Option<&ClaimValue> {
        self.token.audience()
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.token.expires_at()
    }

    pub fn not_before(&self) -> Option<i64> {
        self.token.not_before()
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.token.issued_at()
    }

    pub fn jwt_id(&self) -> Option<&str> {
        self.token.jwt_id()
    }

    pub fn key_id(&self) -> Option<&str> {
        self.token.key_id()
    }

    /// Look up a payload claim by name
    pub fn claim(&self, name: &str) -> Option<&ClaimValue> {
        self.token.claim(name)
    }
}
