//! RSA PKCS#1 v1.5 signing and verification

use crate::error::{Error, Result};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, RsaEncoding, RsaKeyPair, UnparsedPublicKey, VerificationAlgorithm};

pub(crate) fn sign(
    padding: &'static dyn RsaEncoding,
    private_pkcs8: &[u8],
    signing_input: &[u8],
) -> Result<Vec<u8>> {
    let key_pair =
        RsaKeyPair::from_pkcs8(private_pkcs8).map_err(|e| Error::KeyRejected(e.to_string()))?;

    let rng = SystemRandom::new();
    let mut signature = vec![0u8; key_pair.public_modulus_len()];
    key_pair
        .sign(padding, &rng, signing_input, &mut signature)
        .map_err(|_| Error::SigningFailed("RSA signing failed".to_string()))?;

    Ok(signature)
}

pub(crate) fn verify(
    algorithm: &'static dyn VerificationAlgorithm,
    public_der: &[u8],
    signing_input: &[u8],
    signature: &[u8],
) -> Result<()> {
    let public_key = UnparsedPublicKey::new(algorithm, public_der);
    public_key
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}

/// Verification algorithms for the RSA family, 2048-8192 bit moduli
pub(crate) fn verification_algorithm(name: &str) -> &'static dyn VerificationAlgorithm {
    match name {
        "RS256" => &signature::RSA_PKCS1_2048_8192_SHA256,
        "RS384" => &signature::RSA_PKCS1_2048_8192_SHA384,
        "RS512" => &signature::RSA_PKCS1_2048_8192_SHA512,
        _ => unreachable!("not an RSA algorithm name"),
    }
}

/// Signing paddings for the RSA family
pub(crate) fn signing_padding(name: &str) -> &'static dyn RsaEncoding {
    match name {
        "RS256" => &signature::RSA_PKCS1_SHA256,
        "RS384" => &signature::RSA_PKCS1_SHA384,
        "RS512" => &signature::RSA_PKCS1_SHA512,
        _ => unreachable!("not an RSA algorithm name"),
    }
}
