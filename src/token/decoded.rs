//! Token decoder
//!
//! Decoding parses the wire shape without trusting it: the header and payload
//! become claim sets, the signature segment is kept as-is until a verifier
//! checks it. Nothing read from a [`DecodedToken`] may be used for
//! authorization decisions; that is what [`VerifiedToken`](super::VerifiedToken)
//! is for.

use crate::claims::{ClaimSet, ClaimValue};
use crate::error::{Error, Result};
use crate::utils::base64url;

/// A parsed but unverified token
///
/// Immutable once decoded. The raw base64url segments are retained so that a
/// verifier can recompute the exact signing input rather than re-serializing
/// the claims (which could disagree with the producer's byte choices).
#[derive(Debug, Clone)]
pub struct DecodedToken {
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    header: ClaimSet,
    payload: ClaimSet,
}

impl DecodedToken {
    /// Parse a compact token string
    ///
    /// Exactly three dot-separated segments are required; unsigned tokens
    /// still carry their (empty) third segment. Header and payload must be
    /// base64url-encoded JSON objects.
    pub fn decode(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(Error::FormatInvalid);
        }
        let (header_b64, payload_b64, signature_b64) = (parts[0], parts[1], parts[2]);

        let header = ClaimSet::from_json_bytes(&base64url::decode(header_b64)?)?;
        let payload = ClaimSet::from_json_bytes(&base64url::decode(payload_b64)?)?;

        Ok(Self {
            header_b64: header_b64.to_string(),
            payload_b64: payload_b64.to_string(),
            signature_b64: signature_b64.to_string(),
            header,
            payload,
        })
    }

    /// Parsed header claims
    pub fn header(&self) -> &ClaimSet {
        &self.header
    }

    /// Parsed payload claims
    pub fn payload(&self) -> &ClaimSet {
        &self.payload
    }

    /// Raw base64url header segment
    pub fn header_segment(&self) -> &str {
        &self.header_b64
    }

    /// Raw base64url payload segment
    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    /// Raw base64url signature segment (empty for unsigned tokens)
    pub fn signature_segment(&self) -> &str {
        &self.signature_b64
    }

    /// The exact bytes the signature was computed over
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    /// `alg` header value
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(ClaimValue::as_str)
    }

    /// `kid` header value
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(ClaimValue::as_str)
    }

    /// `iss` payload claim
    pub fn issuer(&self) -> Option<&str> {
        self.payload.get("iss").and_then(ClaimValue::as_str)
    }

    /// `sub` payload claim
    pub fn subject(&self) -> Option<&str> {
        self.payload.get("sub").and_then(ClaimValue::as_str)
    }

    /// `aud` payload claim: a scalar string or an array of strings
    pub fn audience(&self) -> Option<&ClaimValue> {
        self.payload.get("aud")
    }

    /// `exp` payload claim, epoch seconds
    pub fn expires_at(&self) -> Option<i64> {
        self.payload.get("exp").and_then(ClaimValue::as_seconds)
    }

    /// `nbf` payload claim, epoch seconds
    pub fn not_before(&self) -> Option<i64> {
        self.payload.get("nbf").and_then(ClaimValue::as_seconds)
    }

    /// `iat` payload claim, epoch seconds
    pub fn issued_at(&self) -> Option<i64> {
        self.payload.get("iat").and_then(ClaimValue::as_seconds)
    }

    /// `jti` payload claim
    pub fn jwt_id(&self) -> Option<&str> {
        self.payload.get("jti").and_then(ClaimValue::as_str)
    }

    /// Look up a payload claim by name
    pub fn claim(&self, name: &str) -> Option<&ClaimValue> {
        self.payload.get(name)
    }

    /// Look up a header claim by name
    pub fn header_claim(&self, name: &str) -> Option<&ClaimValue> {
        self.header.get(name)
    }
}
