//! ECDSA signing and verification
//!
//! The underlying primitive signs and verifies ASN.1 DER `(R, S)` signatures;
//! the token wire format carries the fixed-length JOSE `R || S` encoding.
//! Conversion in both directions lives in [`crate::utils::der`].

use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, EcdsaKeys};
use crate::utils::der;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    self, EcdsaKeyPair, EcdsaSigningAlgorithm, UnparsedPublicKey, VerificationAlgorithm,
};

fn signing_algorithm(curve: EcdsaCurve) -> &'static EcdsaSigningAlgorithm {
    match curve {
        EcdsaCurve::P256 => &signature::ECDSA_P256_SHA256_ASN1_SIGNING,
        EcdsaCurve::P384 => &signature::ECDSA_P384_SHA384_ASN1_SIGNING,
        EcdsaCurve::P521 => &signature::ECDSA_P521_SHA512_ASN1_SIGNING,
    }
}

fn verification_algorithm(curve: EcdsaCurve) -> &'static dyn VerificationAlgorithm {
    match curve {
        EcdsaCurve::P256 => &signature::ECDSA_P256_SHA256_ASN1,
        EcdsaCurve::P384 => &signature::ECDSA_P384_SHA384_ASN1,
        EcdsaCurve::P521 => &signature::ECDSA_P521_SHA512_ASN1,
    }
}

/// Reject key material whose curve disagrees with the algorithm
fn check_curve(algorithm: &'static str, expected: EcdsaCurve, keys: &EcdsaKeys) -> Result<()> {
    if keys.curve() != expected {
        return Err(Error::KeyTypeMismatch {
            algorithm,
            expected: format!("ECDSA {expected:?}"),
            actual: format!("ECDSA {:?}", keys.curve()),
        });
    }
    Ok(())
}

pub(crate) fn sign(
    algorithm: &'static str,
    curve: EcdsaCurve,
    keys: &EcdsaKeys,
    signing_input: &[u8],
) -> Result<Vec<u8>> {
    check_curve(algorithm, curve, keys)?;
    let private_pkcs8 = keys
        .private_pkcs8()
        .ok_or(Error::MissingSigningKey(algorithm))?;

    let key_pair = EcdsaKeyPair::from_pkcs8(signing_algorithm(curve), private_pkcs8)
        .map_err(|e| Error::KeyRejected(e.to_string()))?;

    let rng = SystemRandom::new();
    let der_signature = key_pair
        .sign(&rng, signing_input)
        .map_err(|_| Error::SigningFailed("ECDSA signing failed".to_string()))?;

    der::der_to_jose(der_signature.as_ref(), curve.coordinate_len())
}

pub(crate) fn verify(
    algorithm: &'static str,
    curve: EcdsaCurve,
    keys: &EcdsaKeys,
    signing_input: &[u8],
    signature: &[u8],
) -> Result<()> {
    check_curve(algorithm, curve, keys)?;
    let public_der = keys
        .public_der()
        .ok_or(Error::MissingVerificationKey(algorithm))?;

    // A malformed or wrong-size JOSE signature is just an invalid signature
    let der_signature =
        der::jose_to_der(signature, curve.coordinate_len()).map_err(|_| Error::SignatureInvalid)?;

    let public_key = UnparsedPublicKey::new(verification_algorithm(curve), public_der);
    public_key
        .verify(signing_input, &der_signature)
        .map_err(|_| Error::SignatureInvalid)
}
