//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Tokens are always emitted without
//! padding; decoding tolerates padded input since some producers emit it.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};

/// URL-safe engine that accepts both padded and unpadded input
static URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes to an unpadded Base64URL string
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL string to bytes
///
/// Padding is optional on input and never required.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(e.to_string()))
}

/// Decode a Base64URL string to a UTF-8 string
pub fn decode_string(input: &str) -> Result<String> {
    decode(input).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::FormatInvalidBase64(format!("Invalid UTF-8: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foob"), "Zm9vYg");
        assert_eq!(encode(b"fooba"), "Zm9vYmE");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_roundtrip() {
        for input in ["", "f", "fo", "foo", "Hello, World!", "{\"typ\":\"JWT\"}"] {
            let encoded = encode(input);
            assert_eq!(decode_string(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn test_decode_accepts_optional_padding() {
        assert_eq!(decode("SGVsbG8").unwrap(), b"Hello");
        assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        assert!(matches!(decode("!!!"), Err(Error::FormatInvalidBase64(_))));
        // '+' and '/' belong to the standard alphabet, not the URL-safe one
        assert!(decode("a+b/").is_err());
    }

    #[test]
    fn test_url_safe_characters() {
        let encoded = encode([0xfb, 0xff]);
        assert!(encoded.contains('-') || encoded.contains('_'));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }
}
