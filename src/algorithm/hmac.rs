//! HMAC-SHA2 signing and verification
//!
//! Verification recomputes the MAC over the signing input and compares with
//! `constant_time_eq`; the comparison must not short-circuit on the first
//! mismatching byte.

use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// Hash function backing an HMAC algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HmacHash {
    Sha256,
    Sha384,
    Sha512,
}

pub(crate) fn sign(hash: HmacHash, secret: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
    let tag = match hash {
        HmacHash::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret)
                .map_err(|e| Error::KeyRejected(e.to_string()))?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HmacHash::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret)
                .map_err(|e| Error::KeyRejected(e.to_string()))?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HmacHash::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret)
                .map_err(|e| Error::KeyRejected(e.to_string()))?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}

pub(crate) fn verify(
    hash: HmacHash,
    secret: &[u8],
    signing_input: &[u8],
    signature: &[u8],
) -> Result<()> {
    let expected = sign(hash, secret, signing_input)?;

    if signature.len() != expected.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(signature, &expected) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &[u8] = b"eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_sign_lengths_match_hash() {
        assert_eq!(sign(HmacHash::Sha256, b"secret", SIGNING_INPUT).unwrap().len(), 32);
        assert_eq!(sign(HmacHash::Sha384, b"secret", SIGNING_INPUT).unwrap().len(), 48);
        assert_eq!(sign(HmacHash::Sha512, b"secret", SIGNING_INPUT).unwrap().len(), 64);
    }

    #[test]
    fn test_verify_valid_signature() {
        for hash in [HmacHash::Sha256, HmacHash::Sha384, HmacHash::Sha512] {
            let tag = sign(hash, b"secret", SIGNING_INPUT).unwrap();
            assert!(verify(hash, b"secret", SIGNING_INPUT, &tag).is_ok());
        }
    }

    #[test]
    fn test_verify_wrong_secret() {
        let tag = sign(HmacHash::Sha256, b"secret", SIGNING_INPUT).unwrap();
        assert!(matches!(
            verify(HmacHash::Sha256, b"other-secret", SIGNING_INPUT, &tag),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_verify_tampered_input() {
        let tag = sign(HmacHash::Sha256, b"secret", SIGNING_INPUT).unwrap();
        assert!(matches!(
            verify(HmacHash::Sha256, b"secret", b"tampered", &tag),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_verify_wrong_length_signature() {
        let tag = sign(HmacHash::Sha256, b"secret", SIGNING_INPUT).unwrap();
        assert!(verify(HmacHash::Sha256, b"secret", SIGNING_INPUT, &tag[..31]).is_err());
        assert!(verify(HmacHash::Sha256, b"secret", SIGNING_INPUT, b"").is_err());
    }
}
