//! # jwtforge - Compact Signed Tokens (JWT/JWS)
//!
//! > Issue and verify JSON Web Tokens in Rust, with the sharp edges filed off.
//!
//! **jwtforge** builds and validates the signed-token (JWS) subset of the
//! JOSE family: three base64url segments - header, payload, signature -
//! joined by dots. The crate owns the security-critical core: canonical
//! serialization of claims, a closed set of signing algorithms, signature
//! computation and verification, and claim-level validation with clock-skew
//! leeway. Key loading, HTTP plumbing and revocation are the caller's
//! business.
//!
//! ## Overview
//!
//! Getting a token library wrong is rarely loud. An algorithm check that runs
//! after the signature check, a comparison that leaks timing, or a signature
//! encoding converted with the wrong padding is an authentication bypass, not
//! a bug report. **jwtforge** structures the API so the dangerous states are
//! hard to reach:
//!
//! - [`DecodedToken`] is parsed but explicitly untrusted; [`VerifiedToken`]
//!   can only be produced by a [`Verifier`] whose signature and claim checks
//!   all passed.
//! - The algorithm set is closed: the decoded header's `alg` is resolved
//!   against an exhaustive table and compared with the verifier's configured
//!   algorithm *before* any signature work, so `alg: none` substitution and
//!   key-type confusion fail with [`Error::AlgorithmMismatch`].
//! - HMAC verification compares MACs in constant time.
//! - ECDSA signatures cross the DER/JOSE boundary through isolated,
//!   exhaustively tested conversion functions that reject wrong-length input.
//!
//! ## Quick Start
//!
//! ```
//! use jwtforge::{Algorithm, JwtBuilder, Verification};
//!
//! let algorithm = Algorithm::hs256("a-shared-secret");
//!
//! let token = JwtBuilder::new()
//!     .with_issuer("https://issuer.example.com")
//!     .with_subject("user-1234")
//!     .with_claim("admin", true)
//!     .sign(&algorithm)?;
//!
//! let verifier = Verification::with_algorithm(Algorithm::hs256("a-shared-secret"))
//!     .require_issuer("https://issuer.example.com")
//!     .build();
//!
//! let verified = verifier.verify(&token)?;
//! assert_eq!(verified.subject(), Some("user-1234"));
//! # Ok::<(), jwtforge::Error>(())
//! ```
//!
//! ## Algorithm Support
//!
//! All algorithms are constructed with their key material and expose the same
//! `sign`/`verify` contract:
//!
//! - **HMAC**: HS256, HS384, HS512 (shared secret)
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512 (DER public key and/or PKCS#8
//!   private key; either half may be absent for verify-only or sign-only use)
//! - **ECDSA**: ES256 (P-256), ES384 (P-384), ES512 (P-521)
//! - **none**: unsigned tokens, only accepted by a verifier explicitly built
//!   with [`Algorithm::none`]
//!
//! ## Claims
//!
//! Header and payload are insertion-ordered [`ClaimSet`]s; serialization
//! order is exactly setter-call order, which makes token bytes reproducible.
//! Reserved claims (`iss`, `sub`, `aud`, `exp`, `nbf`, `iat`, `jti`) have
//! typed setters but live in the same map as custom claims - last write wins.
//! Passing `None` to any setter removes the claim; nothing ever serializes as
//! JSON `null`.
//!
//! Temporal claims are whole epoch seconds. Each of `exp`, `nbf` and `iat`
//! has an independently configurable leeway (default zero) on the verifier,
//! and an absent temporal claim passes - requiring a claim is always an
//! explicit opt-in via `require_*`.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) - JSON Web Signature (JWS)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518) - JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) - JSON Web Token (JWT)

pub mod error;
pub mod utils;

// Claim model
pub mod claims;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Token types
pub mod token;

// Verifier (main validation API)
pub mod verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{Algorithm, AlgorithmId};
pub use claims::{ClaimSet, ClaimValue};
pub use error::{ClaimError, Error, Result};
pub use keys::{EcdsaCurve, EcdsaKeys, RsaKeys, SecretKey};
pub use token::{DecodedToken, JwtBuilder, VerifiedToken};
pub use verifier::{Verification, Verifier};
