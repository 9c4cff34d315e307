//! Signing algorithms
//!
//! The set of algorithms is closed: [`AlgorithmId`] enumerates every name the
//! library will ever accept, and the name-to-variant table in
//! [`AlgorithmId::from_str`] is the only place wire names are interpreted.
//! Verifiers check the decoded header against this table *before* any
//! signature work, which is what defeats algorithm-confusion attacks
//! (alg "none" substitution, or an HMAC check driven by a public key).

mod ecdsa;
mod hmac;
mod rsa;

use std::fmt;

use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, EcdsaKeys, RsaKeys, SecretKey};

use self::hmac::HmacHash;

/// Algorithm identifier: the canonical `alg` header names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
    /// RSA PKCS#1 v1.5 with SHA-256
    RS256,
    /// RSA PKCS#1 v1.5 with SHA-384
    RS384,
    /// RSA PKCS#1 v1.5 with SHA-512
    RS512,
    /// ECDSA on P-256 with SHA-256
    ES256,
    /// ECDSA on P-384 with SHA-384
    ES384,
    /// ECDSA on P-521 with SHA-512
    ES512,
    /// Unsigned; only valid against a verifier explicitly built for it
    None,
}

impl AlgorithmId {
    /// Parse a wire algorithm name against the closed table
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),
            "ES256" => Ok(AlgorithmId::ES256),
            "ES384" => Ok(AlgorithmId::ES384),
            "ES512" => Ok(AlgorithmId::ES512),
            "none" => Ok(AlgorithmId::None),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }

    /// Canonical string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
            AlgorithmId::ES256 => "ES256",
            AlgorithmId::ES384 => "ES384",
            AlgorithmId::ES512 => "ES512",
            AlgorithmId::None => "none",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key material paired with an algorithm id
#[derive(Clone)]
enum KeyMaterial {
    Secret(SecretKey),
    Rsa(RsaKeys),
    Ecdsa(EcdsaKeys),
    None,
}

/// A signing algorithm with its key material
///
/// Instances are immutable after construction and safe to share across
/// threads; sign and verify never mutate key material. For the asymmetric
/// families an instance may hold only one key half, making it sign-only or
/// verify-only.
#[derive(Clone)]
pub struct Algorithm {
    id: AlgorithmId,
    key: KeyMaterial,
}

impl Algorithm {
    /// HMAC-SHA256 with a shared secret
    pub fn hs256(secret: impl Into<SecretKey>) -> Self {
        Self {
            id: AlgorithmId::HS256,
            key: KeyMaterial::Secret(secret.into()),
        }
    }

    /// HMAC-SHA384 with a shared secret
    pub fn hs384(secret: impl Into<SecretKey>) -> Self {
        Self {
            id: AlgorithmId::HS384,
            key: KeyMaterial::Secret(secret.into()),
        }
    }

    /// HMAC-SHA512 with a shared secret
    pub fn hs512(secret: impl Into<SecretKey>) -> Self {
        Self {
            id: AlgorithmId::HS512,
            key: KeyMaterial::Secret(secret.into()),
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-256
    pub fn rs256(keys: RsaKeys) -> Self {
        Self {
            id: AlgorithmId::RS256,
            key: KeyMaterial::Rsa(keys),
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-384
    pub fn rs384(keys: RsaKeys) -> Self {
        Self {
            id: AlgorithmId::RS384,
            key: KeyMaterial::Rsa(keys),
        }
    }

    /// RSA PKCS#1 v1.5 with SHA-512
    pub fn rs512(keys: RsaKeys) -> Self {
        Self {
            id: AlgorithmId::RS512,
            key: KeyMaterial::Rsa(keys),
        }
    }

    /// ECDSA on P-256 with SHA-256
    pub fn es256(keys: EcdsaKeys) -> Self {
        Self {
            id: AlgorithmId::ES256,
            key: KeyMaterial::Ecdsa(keys),
        }
    }

    /// ECDSA on P-384 with SHA-384
    pub fn es384(keys: EcdsaKeys) -> Self {
        Self {
            id: AlgorithmId::ES384,
            key: KeyMaterial::Ecdsa(keys),
        }
    }

    /// ECDSA on P-521 with SHA-512
    pub fn es512(keys: EcdsaKeys) -> Self {
        Self {
            id: AlgorithmId::ES512,
            key: KeyMaterial::Ecdsa(keys),
        }
    }

    /// The unsigned "none" algorithm: empty signatures only
    pub fn none() -> Self {
        Self {
            id: AlgorithmId::None,
            key: KeyMaterial::None,
        }
    }

    /// Algorithm id
    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    /// Canonical `alg` header value for this algorithm
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Compute the signature over a signing input
    ///
    /// Fails with [`Error::MissingSigningKey`] when the instance holds no
    /// private/secret key.
    pub fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::None => Ok(Vec::new()),
            AlgorithmId::HS256 => hmac::sign(HmacHash::Sha256, self.secret(), signing_input),
            AlgorithmId::HS384 => hmac::sign(HmacHash::Sha384, self.secret(), signing_input),
            AlgorithmId::HS512 => hmac::sign(HmacHash::Sha512, self.secret(), signing_input),
            AlgorithmId::RS256 | AlgorithmId::RS384 | AlgorithmId::RS512 => {
                let private = self
                    .rsa()
                    .private_pkcs8()
                    .ok_or(Error::MissingSigningKey(self.name()))?;
                rsa::sign(rsa::signing_padding(self.name()), private, signing_input)
            }
            AlgorithmId::ES256 => {
                ecdsa::sign(self.name(), EcdsaCurve::P256, self.ecdsa(), signing_input)
            }
            AlgorithmId::ES384 => {
                ecdsa::sign(self.name(), EcdsaCurve::P384, self.ecdsa(), signing_input)
            }
            AlgorithmId::ES512 => {
                ecdsa::sign(self.name(), EcdsaCurve::P521, self.ecdsa(), signing_input)
            }
        }
    }

    /// Check a signature over a signing input
    ///
    /// Fails with [`Error::MissingVerificationKey`] when the instance holds
    /// no public/secret key, and [`Error::SignatureInvalid`] on mismatch.
    pub fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        match self.id {
            AlgorithmId::None => {
                if signature.is_empty() {
                    Ok(())
                } else {
                    Err(Error::SignatureInvalid)
                }
            }
            AlgorithmId::HS256 => {
                hmac::verify(HmacHash::Sha256, self.secret(), signing_input, signature)
            }
            AlgorithmId::HS384 => {
                hmac::verify(HmacHash::Sha384, self.secret(), signing_input, signature)
            }
            AlgorithmId::HS512 => {
                hmac::verify(HmacHash::Sha512, self.secret(), signing_input, signature)
            }
            AlgorithmId::RS256 | AlgorithmId::RS384 | AlgorithmId::RS512 => {
                let public = self
                    .rsa()
                    .public_der()
                    .ok_or(Error::MissingVerificationKey(self.name()))?;
                rsa::verify(
                    rsa::verification_algorithm(self.name()),
                    public,
                    signing_input,
                    signature,
                )
            }
            AlgorithmId::ES256 => ecdsa::verify(
                self.name(),
                EcdsaCurve::P256,
                self.ecdsa(),
                signing_input,
                signature,
            ),
            AlgorithmId::ES384 => ecdsa::verify(
                self.name(),
                EcdsaCurve::P384,
                self.ecdsa(),
                signing_input,
                signature,
            ),
            AlgorithmId::ES512 => ecdsa::verify(
                self.name(),
                EcdsaCurve::P521,
                self.ecdsa(),
                signing_input,
                signature,
            ),
        }
    }

    fn secret(&self) -> &[u8] {
        match &self.key {
            KeyMaterial::Secret(key) => key.as_bytes(),
            _ => unreachable!("constructors pair HMAC ids with secret keys"),
        }
    }

    fn rsa(&self) -> &RsaKeys {
        match &self.key {
            KeyMaterial::Rsa(keys) => keys,
            _ => unreachable!("constructors pair RSA ids with RSA keys"),
        }
    }

    fn ecdsa(&self) -> &EcdsaKeys {
        match &self.key {
            KeyMaterial::Ecdsa(keys) => keys,
            _ => unreachable!("constructors pair ECDSA ids with ECDSA keys"),
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material is deliberately omitted
        f.debug_struct("Algorithm").field("id", &self.id).finish()
    }
}
