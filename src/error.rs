//! Errors for token creation, decoding and verification
//!
//! Every failure is terminal and programmatically distinguishable; the
//! library never collapses a verification outcome into a bare boolean.

use thiserror::Error;

/// Errors that can occur while building, decoding or verifying a token
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Custom claim name cannot be empty")]
    ClaimNameEmpty,

    #[error("Algorithm '{0}' has no signing key")]
    MissingSigningKey(&'static str),

    #[error("Algorithm '{0}' has no verification key")]
    MissingVerificationKey(&'static str),

    #[error("Key type mismatch for algorithm '{algorithm}': expected {expected}, got {actual}")]
    KeyTypeMismatch {
        algorithm: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Key material rejected: {0}")]
    KeyRejected(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("JSON serialization failed: {0}")]
    SerializeFailed(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("Token algorithm '{found}' does not match verifier algorithm '{expected}'")]
    AlgorithmMismatch {
        expected: &'static str,
        found: String,
    },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("ECDSA signature encoding invalid: {0}")]
    SignatureEncoding(String),

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Claim validation failed: {0}")]
    InvalidClaim(#[from] ClaimError),
}

/// A specific registered-claim predicate failure, naming the claim
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    Expired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    NotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issued in the future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    IssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Claim '{claim}' mismatch: expected {expected}, found {found}")]
    Mismatch {
        claim: String,
        expected: String,
        found: String,
    },

    #[error("Required claim '{0}' is missing")]
    Missing(String),
}

impl ClaimError {
    /// Name of the claim that failed validation
    pub fn claim(&self) -> &str {
        match self {
            ClaimError::Expired { .. } => "exp",
            ClaimError::NotYetValid { .. } => "nbf",
            ClaimError::IssuedInFuture { .. } => "iat",
            ClaimError::Mismatch { claim, .. } => claim,
            ClaimError::Missing(claim) => claim,
        }
    }
}

/// Result type alias for jwtforge operations
pub type Result<T> = std::result::Result<T, Error>;
