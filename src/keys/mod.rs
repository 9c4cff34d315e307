//! Key material for signing algorithms
//!
//! Keys enter the library as raw bytes: HMAC secrets, PKCS#8 DER private
//! keys, DER public keys. Loading them from PEM files, JWK documents or key
//! services is the caller's concern. For the asymmetric families either half
//! may be absent, constraining the algorithm instance to sign-only or
//! verify-only use.

use std::fmt;

/// Shared secret for the HMAC family
#[derive(Clone)]
pub struct SecretKey {
    secret: Vec<u8>,
}

impl SecretKey {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret bytes
        f.debug_struct("SecretKey")
            .field("len", &self.secret.len())
            .finish()
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SecretKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SecretKey {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SecretKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// RSA key material: PKCS#1 `RSAPublicKey` DER and/or PKCS#8 private DER
#[derive(Debug, Clone, Default)]
pub struct RsaKeys {
    public_der: Option<Vec<u8>>,
    private_pkcs8: Option<Vec<u8>>,
}

impl RsaKeys {
    /// Verify-only key material from a DER-encoded public key
    pub fn from_public_der(der: impl Into<Vec<u8>>) -> Self {
        Self {
            public_der: Some(der.into()),
            private_pkcs8: None,
        }
    }

    /// Sign-only key material from a PKCS#8 DER private key
    pub fn from_private_pkcs8(der: impl Into<Vec<u8>>) -> Self {
        Self {
            public_der: None,
            private_pkcs8: Some(der.into()),
        }
    }

    /// Both halves, for instances that sign and verify
    pub fn from_pair(public_der: impl Into<Vec<u8>>, private_pkcs8: impl Into<Vec<u8>>) -> Self {
        Self {
            public_der: Some(public_der.into()),
            private_pkcs8: Some(private_pkcs8.into()),
        }
    }

    pub(crate) fn public_der(&self) -> Option<&[u8]> {
        self.public_der.as_deref()
    }

    pub(crate) fn private_pkcs8(&self) -> Option<&[u8]> {
        self.private_pkcs8.as_deref()
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EcdsaCurve {
    /// Size of one curve coordinate in bytes; a JOSE signature is twice this
    pub fn coordinate_len(self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }
}

/// ECDSA key material: uncompressed-point public key and/or PKCS#8 private DER
#[derive(Debug, Clone)]
pub struct EcdsaKeys {
    curve: EcdsaCurve,
    public_der: Option<Vec<u8>>,
    private_pkcs8: Option<Vec<u8>>,
}

impl EcdsaKeys {
    /// Verify-only key material from a DER-encoded public key
    pub fn from_public_der(curve: EcdsaCurve, der: impl Into<Vec<u8>>) -> Self {
        Self {
            curve,
            public_der: Some(der.into()),
            private_pkcs8: None,
        }
    }

    /// Sign-only key material from a PKCS#8 DER private key
    pub fn from_private_pkcs8(curve: EcdsaCurve, der: impl Into<Vec<u8>>) -> Self {
        Self {
            curve,
            public_der: None,
            private_pkcs8: Some(der.into()),
        }
    }

    /// Both halves, for instances that sign and verify
    pub fn from_pair(
        curve: EcdsaCurve,
        public_der: impl Into<Vec<u8>>,
        private_pkcs8: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            curve,
            public_der: Some(public_der.into()),
            private_pkcs8: Some(private_pkcs8.into()),
        }
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    pub(crate) fn public_der(&self) -> Option<&[u8]> {
        self.public_der.as_deref()
    }

    pub(crate) fn private_pkcs8(&self) -> Option<&[u8]> {
        self.private_pkcs8.as_deref()
    }
}
