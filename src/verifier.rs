//! Token verification
//!
//! [`Verification`] collects the expected algorithm, claim predicates and
//! leeway tolerances; [`Verifier::verify`] runs the pipeline:
//!
//! ```text
//! token string
//!     | decode                      -> DecodedToken (untrusted)
//!     | header alg == expected?     -> AlgorithmMismatch on disagreement
//!     | Algorithm::verify           -> SignatureInvalid on failure
//!     | temporal + registered checks -> InvalidClaim naming the claim
//!     v
//! VerifiedToken
//! ```
//!
//! The algorithm comparison runs before any signature work so that a token
//! declaring `alg: none` (or any algorithm other than the configured one)
//! never reaches the cryptographic path.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::claims::{ClaimSet, ClaimValue};
use crate::error::{ClaimError, Error, Result};
use crate::token::{DecodedToken, VerifiedToken};
use crate::utils::base64url;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

fn system_clock() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// A registered claim expectation, evaluated in registration order
enum ClaimCheck {
    Issuer(Vec<String>),
    Subject(String),
    Audience(String),
    Equals { name: String, expected: ClaimValue },
}

/// Builder for a [`Verifier`]
///
/// ```
/// use jwtforge::{Algorithm, JwtBuilder, Verification};
///
/// let token = JwtBuilder::new()
///     .with_issuer("https://issuer.example.com")
///     .sign(&Algorithm::hs256("secret"))
///     .unwrap();
///
/// let verifier = Verification::with_algorithm(Algorithm::hs256("secret"))
///     .require_issuer("https://issuer.example.com")
///     .build();
/// assert!(verifier.verify(&token).is_ok());
/// ```
pub struct Verification {
    algorithm: Algorithm,
    checks: Vec<ClaimCheck>,
    exp_leeway: u64,
    nbf_leeway: u64,
    iat_leeway: u64,
    clock: Option<Clock>,
}

impl Verification {
    /// Start building a verifier for one expected algorithm
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            checks: Vec::new(),
            exp_leeway: 0,
            nbf_leeway: 0,
            iat_leeway: 0,
            clock: None,
        }
    }

    /// Require the `iss` claim to equal the given value
    pub fn require_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.checks.push(ClaimCheck::Issuer(vec![issuer.into()]));
        self
    }

    /// Require the `iss` claim to equal one of the given values
    pub fn require_issuer_in<I, S>(mut self, issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks
            .push(ClaimCheck::Issuer(issuers.into_iter().map(Into::into).collect()));
        self
    }

    /// Require the `sub` claim to equal the given value
    pub fn require_subject(mut self, subject: impl Into<String>) -> Self {
        self.checks.push(ClaimCheck::Subject(subject.into()));
        self
    }

    /// Require the expected audience to equal a scalar `aud` claim or to be
    /// contained in an `aud` array
    pub fn require_audience(mut self, audience: impl Into<String>) -> Self {
        self.checks.push(ClaimCheck::Audience(audience.into()));
        self
    }

    /// Require a claim to equal the expected value
    pub fn require_claim(mut self, name: impl Into<String>, expected: impl Into<ClaimValue>) -> Self {
        self.checks.push(ClaimCheck::Equals {
            name: name.into(),
            expected: expected.into(),
        });
        self
    }

    /// Set all three temporal leeways at once (seconds)
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.exp_leeway = seconds;
        self.nbf_leeway = seconds;
        self.iat_leeway = seconds;
        self
    }

    /// Leeway applied to `exp` only (seconds)
    pub fn exp_leeway(mut self, seconds: u64) -> Self {
        self.exp_leeway = seconds;
        self
    }

    /// Leeway applied to `nbf` only (seconds)
    pub fn nbf_leeway(mut self, seconds: u64) -> Self {
        self.nbf_leeway = seconds;
        self
    }

    /// Leeway applied to `iat` only (seconds)
    pub fn iat_leeway(mut self, seconds: u64) -> Self {
        self.iat_leeway = seconds;
        self
    }

    /// Replace the time source (epoch seconds) used by temporal checks
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Finish configuration
    pub fn build(self) -> Verifier {
        Verifier {
            algorithm: self.algorithm,
            checks: self.checks,
            exp_leeway: self.exp_leeway,
            nbf_leeway: self.nbf_leeway,
            iat_leeway: self.iat_leeway,
            clock: self.clock.unwrap_or_else(|| Box::new(system_clock)),
        }
    }
}

/// Verifies tokens against one algorithm and a set of claim predicates
///
/// Immutable after construction; safe to reuse across threads.
pub struct Verifier {
    algorithm: Algorithm,
    checks: Vec<ClaimCheck>,
    exp_leeway: u64,
    nbf_leeway: u64,
    iat_leeway: u64,
    clock: Clock,
}

impl Verifier {
    /// Decode and fully verify a token
    ///
    /// Returns the first failure: decode errors, [`Error::AlgorithmMismatch`],
    /// [`Error::SignatureInvalid`], or [`Error::InvalidClaim`] naming the
    /// first claim predicate that failed. There is no partial success.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken> {
        let decoded = DecodedToken::decode(token)?;

        // The algorithm table check must precede any signature work
        let alg_name = decoded
            .algorithm()
            .ok_or_else(|| Error::MissingField("alg".to_string()))?;
        let alg = AlgorithmId::from_str(alg_name)?;
        if alg != self.algorithm.id() {
            return Err(Error::AlgorithmMismatch {
                expected: self.algorithm.name(),
                found: alg_name.to_string(),
            });
        }

        let signature = base64url::decode(decoded.signature_segment())?;
        self.algorithm
            .verify(decoded.signing_input().as_bytes(), &signature)?;

        let now = (self.clock)();
        self.check_temporal(decoded.payload(), now)?;
        for check in &self.checks {
            run_check(check, decoded.payload())?;
        }

        Ok(VerifiedToken::new(decoded))
    }

    /// Temporal predicates; an absent claim is satisfied
    fn check_temporal(&self, payload: &ClaimSet, now: i64) -> Result<()> {
        if let Some(value) = payload.get("exp") {
            let exp = seconds_of("exp", value)?;
            if now > exp.saturating_add(leeway_i64(self.exp_leeway)) {
                return Err(ClaimError::Expired {
                    expired_at: exp,
                    now,
                    leeway: self.exp_leeway,
                }
                .into());
            }
        }

        if let Some(value) = payload.get("nbf") {
            let nbf = seconds_of("nbf", value)?;
            if now < nbf.saturating_sub(leeway_i64(self.nbf_leeway)) {
                return Err(ClaimError::NotYetValid {
                    not_before: nbf,
                    now,
                    leeway: self.nbf_leeway,
                }
                .into());
            }
        }

        if let Some(value) = payload.get("iat") {
            let iat = seconds_of("iat", value)?;
            if now < iat.saturating_sub(leeway_i64(self.iat_leeway)) {
                return Err(ClaimError::IssuedInFuture {
                    issued_at: iat,
                    now,
                    leeway: self.iat_leeway,
                }
                .into());
            }
        }

        Ok(())
    }
}

fn leeway_i64(leeway: u64) -> i64 {
    leeway.min(i64::MAX as u64) as i64
}

/// Reject temporal claims that are present but not numeric
fn seconds_of(name: &str, value: &ClaimValue) -> Result<i64> {
    value.as_seconds().ok_or_else(|| {
        ClaimError::Mismatch {
            claim: name.to_string(),
            expected: "integer epoch seconds".to_string(),
            found: render(value),
        }
        .into()
    })
}

fn render(value: &ClaimValue) -> String {
    value
        .to_json()
        .unwrap_or_else(|_| "<unserializable>".to_string())
}

fn run_check(check: &ClaimCheck, payload: &ClaimSet) -> Result<()> {
    match check {
        ClaimCheck::Issuer(expected) => match payload.get("iss") {
            None => Err(ClaimError::Missing("iss".to_string()).into()),
            Some(ClaimValue::Text(iss)) if expected.iter().any(|e| e == iss) => Ok(()),
            Some(found) => Err(ClaimError::Mismatch {
                claim: "iss".to_string(),
                expected: format!("{expected:?}"),
                found: render(found),
            }
            .into()),
        },
        ClaimCheck::Subject(expected) => match payload.get("sub") {
            None => Err(ClaimError::Missing("sub".to_string()).into()),
            Some(ClaimValue::Text(sub)) if sub == expected => Ok(()),
            Some(found) => Err(ClaimError::Mismatch {
                claim: "sub".to_string(),
                expected: format!("{expected:?}"),
                found: render(found),
            }
            .into()),
        },
        ClaimCheck::Audience(expected) => match payload.get("aud") {
            None => Err(ClaimError::Missing("aud".to_string()).into()),
            Some(ClaimValue::Text(aud)) if aud == expected => Ok(()),
            Some(ClaimValue::Array(items))
                if items.iter().any(|item| item.as_str() == Some(expected)) =>
            {
                Ok(())
            }
            Some(found) => Err(ClaimError::Mismatch {
                claim: "aud".to_string(),
                expected: format!("{expected:?}"),
                found: render(found),
            }
            .into()),
        },
        ClaimCheck::Equals { name, expected } => match payload.get(name) {
            None => Err(ClaimError::Missing(name.clone()).into()),
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(ClaimError::Mismatch {
                claim: name.clone(),
                expected: render(expected),
                found: render(found),
            }
            .into()),
        },
    }
}
