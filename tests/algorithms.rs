//! Asymmetric algorithm round-trips
//!
//! RSA and ECDSA keys are generated per test; slow but hermetic. HMAC
//! round-trips live in the unit tests next to the implementation.

use jwtforge::{
    Algorithm, EcdsaCurve, EcdsaKeys, Error, JwtBuilder, RsaKeys, Verification,
};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING,
    ECDSA_P384_SHA384_ASN1_SIGNING, ECDSA_P521_SHA512_ASN1_SIGNING,
};
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;

/// Generate an RSA keypair, returning (public DER, private PKCS#8 DER)
fn generate_rsa_halves() -> (Vec<u8>, Vec<u8>) {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key");
    let pkcs8_doc = private_key
        .to_pkcs8_der()
        .expect("Failed to serialize to PKCS#8");
    let keypair = RsaKeyPair::from_pkcs8(pkcs8_doc.as_bytes()).expect("Failed to parse key");
    let public_der = keypair.public_key().as_ref().to_vec();
    (public_der, pkcs8_doc.as_bytes().to_vec())
}

fn generate_rsa_keys() -> RsaKeys {
    let (public_der, private_pkcs8) = generate_rsa_halves();
    RsaKeys::from_pair(public_der, private_pkcs8)
}

fn generate_ecdsa_keys(curve: EcdsaCurve) -> EcdsaKeys {
    let alg: &'static EcdsaSigningAlgorithm = match curve {
        EcdsaCurve::P256 => &ECDSA_P256_SHA256_ASN1_SIGNING,
        EcdsaCurve::P384 => &ECDSA_P384_SHA384_ASN1_SIGNING,
        EcdsaCurve::P521 => &ECDSA_P521_SHA512_ASN1_SIGNING,
    };
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &rng).expect("Failed to generate key");
    let key_pair = EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref()).expect("Failed to parse key");
    let public_der = key_pair.public_key().as_ref().to_vec();
    EcdsaKeys::from_pair(curve, public_der, pkcs8.as_ref().to_vec())
}

fn roundtrip(signer: &Algorithm, verifier_algorithm: Algorithm) {
    let token = JwtBuilder::new()
        .with_issuer("issuer")
        .with_subject("subject")
        .sign(signer)
        .expect("Signing failed");

    let verifier = Verification::with_algorithm(verifier_algorithm)
        .require_issuer("issuer")
        .build();
    let verified = verifier.verify(&token).expect("Verification failed");
    assert_eq!(verified.subject(), Some("subject"));
}

// ============================================================================
// RSA
// ============================================================================

#[test]
fn rs256_roundtrip() {
    let keys = generate_rsa_keys();
    roundtrip(&Algorithm::rs256(keys.clone()), Algorithm::rs256(keys));
}

#[test]
fn rs384_roundtrip() {
    let keys = generate_rsa_keys();
    roundtrip(&Algorithm::rs384(keys.clone()), Algorithm::rs384(keys));
}

#[test]
fn rs512_roundtrip() {
    let keys = generate_rsa_keys();
    roundtrip(&Algorithm::rs512(keys.clone()), Algorithm::rs512(keys));
}

#[test]
fn rsa_hash_variants_are_not_interchangeable() {
    let keys = generate_rsa_keys();
    let token = JwtBuilder::new()
        .sign(&Algorithm::rs256(keys.clone()))
        .unwrap();

    // Same key, different declared hash: the algorithm table rejects it
    let verifier = Verification::with_algorithm(Algorithm::rs384(keys)).build();
    assert!(matches!(
        verifier.verify(&token),
        Err(Error::AlgorithmMismatch { .. })
    ));
}

#[test]
fn rsa_tampered_token_fails() {
    let keys = generate_rsa_keys();
    let token = JwtBuilder::new()
        .with_claim("admin", false)
        .sign(&Algorithm::rs256(keys.clone()))
        .unwrap();

    let forged_payload = jwtforge::utils::base64url::encode(r#"{"admin":true}"#);
    let mut parts = token.split('.');
    let forged = format!(
        "{}.{}.{}",
        parts.next().unwrap(),
        forged_payload,
        parts.nth(1).unwrap()
    );

    let verifier = Verification::with_algorithm(Algorithm::rs256(keys)).build();
    assert_eq!(verifier.verify(&forged).err(), Some(Error::SignatureInvalid));
}

#[test]
fn rsa_verify_only_half_verifies_but_cannot_sign() {
    let (public_der, private_pkcs8) = generate_rsa_halves();

    let signer = Algorithm::rs256(RsaKeys::from_private_pkcs8(private_pkcs8));
    let token = JwtBuilder::new().sign(&signer).unwrap();

    let verify_only = RsaKeys::from_public_der(public_der);
    let verifier = Verification::with_algorithm(Algorithm::rs256(verify_only.clone())).build();
    assert!(verifier.verify(&token).is_ok());

    assert!(matches!(
        JwtBuilder::new().sign(&Algorithm::rs256(verify_only)),
        Err(Error::MissingSigningKey("RS256"))
    ));
}

#[test]
fn rsa_sign_only_half_signs_but_cannot_verify() {
    let (_, private_pkcs8) = generate_rsa_halves();

    let sign_only = Algorithm::rs256(RsaKeys::from_private_pkcs8(private_pkcs8));
    let token = JwtBuilder::new().sign(&sign_only).unwrap();

    let verifier = Verification::with_algorithm(sign_only).build();
    assert_eq!(
        verifier.verify(&token).err(),
        Some(Error::MissingVerificationKey("RS256"))
    );
}

// ============================================================================
// ECDSA
// ============================================================================

#[test]
fn es256_roundtrip() {
    let keys = generate_ecdsa_keys(EcdsaCurve::P256);
    roundtrip(&Algorithm::es256(keys.clone()), Algorithm::es256(keys));
}

#[test]
fn es384_roundtrip() {
    let keys = generate_ecdsa_keys(EcdsaCurve::P384);
    roundtrip(&Algorithm::es384(keys.clone()), Algorithm::es384(keys));
}

#[test]
fn es512_roundtrip() {
    let keys = generate_ecdsa_keys(EcdsaCurve::P521);
    roundtrip(&Algorithm::es512(keys.clone()), Algorithm::es512(keys));
}

#[test]
fn ecdsa_signature_segment_has_fixed_jose_length() {
    for (curve, expected_len) in [
        (EcdsaCurve::P256, 64),
        (EcdsaCurve::P384, 96),
        (EcdsaCurve::P521, 132),
    ] {
        let keys = generate_ecdsa_keys(curve);
        let signer = match curve {
            EcdsaCurve::P256 => Algorithm::es256(keys),
            EcdsaCurve::P384 => Algorithm::es384(keys),
            EcdsaCurve::P521 => Algorithm::es512(keys),
        };
        let token = JwtBuilder::new().sign(&signer).unwrap();
        let signature_segment = token.rsplit('.').next().unwrap();
        let signature = jwtforge::utils::base64url::decode(signature_segment).unwrap();
        assert_eq!(signature.len(), expected_len, "{curve:?}");
    }
}

#[test]
fn ecdsa_truncated_signature_fails() {
    let keys = generate_ecdsa_keys(EcdsaCurve::P256);
    let token = JwtBuilder::new()
        .sign(&Algorithm::es256(keys.clone()))
        .unwrap();

    let (head, signature_segment) = token.rsplit_once('.').unwrap();
    let signature = jwtforge::utils::base64url::decode(signature_segment).unwrap();
    let truncated = format!(
        "{head}.{}",
        jwtforge::utils::base64url::encode(&signature[..signature.len() - 1])
    );

    let verifier = Verification::with_algorithm(Algorithm::es256(keys)).build();
    assert_eq!(
        verifier.verify(&truncated).err(),
        Some(Error::SignatureInvalid)
    );
}

#[test]
fn ecdsa_wrong_curve_key_is_rejected() {
    let p384_keys = generate_ecdsa_keys(EcdsaCurve::P384);
    let result = JwtBuilder::new().sign(&Algorithm::es256(p384_keys));
    assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
}
