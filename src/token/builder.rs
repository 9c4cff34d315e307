//! Token builder
//!
//! An owned fluent builder: claim setters accumulate into insertion-ordered
//! claim sets, and the terminal [`sign`](JwtBuilder::sign) call serializes,
//! encodes and signs. Passing `None` to a setter removes the claim instead of
//! writing a JSON `null`.

use std::time::SystemTime;

use crate::algorithm::Algorithm;
use crate::claims::{ClaimSet, ClaimValue};
use crate::error::{Error, Result};
use crate::utils::base64url;

/// Builder for signed tokens
///
/// ```
/// use jwtforge::{Algorithm, JwtBuilder};
///
/// let token = JwtBuilder::new()
///     .with_issuer("https://issuer.example.com")
///     .with_subject("user-1234")
///     .with_claim("admin", true)
///     .sign(&Algorithm::hs256("secret"))
///     .unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct JwtBuilder {
    header: ClaimSet,
    payload: ClaimSet,
    // Setter misuse is remembered and surfaced by sign(), before any
    // serialization or crypto work
    error: Option<Error>,
}

impl JwtBuilder {
    pub fn new() -> Self {
        let mut header = ClaimSet::new();
        header.insert("typ", "JWT");
        Self {
            header,
            payload: ClaimSet::new(),
            error: None,
        }
    }

    /// Merge user-supplied header claims over the defaults
    ///
    /// `typ` stays in its default first position unless removed; a
    /// [`ClaimValue::Null`] value removes the key. `alg` may be set here but
    /// is always overwritten at sign time with the algorithm's name.
    pub fn with_header<K, V>(mut self, header: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ClaimValue>,
    {
        for (name, value) in header {
            let name = name.into();
            let value = value.into();
            if value.is_null() {
                self.header.remove(&name);
            } else {
                self.header.insert(name, value);
            }
        }
        self
    }

    /// Set or remove the `kid` header claim
    pub fn with_key_id<'a>(mut self, key_id: impl Into<Option<&'a str>>) -> Self {
        match key_id.into() {
            Some(kid) => self.header.insert("kid", kid),
            None => {
                self.header.remove("kid");
            }
        }
        self
    }

    /// Set or remove the `iss` claim
    pub fn with_issuer<'a>(mut self, issuer: impl Into<Option<&'a str>>) -> Self {
        self.set_text("iss", issuer.into());
        self
    }

    /// Set or remove the `sub` claim
    pub fn with_subject<'a>(mut self, subject: impl Into<Option<&'a str>>) -> Self {
        self.set_text("sub", subject.into());
        self
    }

    /// Set or remove the `aud` claim
    ///
    /// A single audience serializes as a scalar string, several as an array;
    /// an empty slice removes the claim.
    pub fn with_audience<S: AsRef<str>>(mut self, audience: &[S]) -> Self {
        match audience {
            [] => {
                self.payload.remove("aud");
            }
            [single] => self.payload.insert("aud", single.as_ref()),
            many => {
                let items: Vec<ClaimValue> =
                    many.iter().map(|s| ClaimValue::from(s.as_ref())).collect();
                self.payload.insert("aud", ClaimValue::Array(items));
            }
        }
        self
    }

    /// Set or remove the `exp` claim (whole seconds; sub-second precision is
    /// discarded)
    pub fn with_expires_at(mut self, expires_at: impl Into<Option<SystemTime>>) -> Self {
        self.set_instant("exp", expires_at.into());
        self
    }

    /// Set or remove the `nbf` claim (whole seconds)
    pub fn with_not_before(mut self, not_before: impl Into<Option<SystemTime>>) -> Self {
        self.set_instant("nbf", not_before.into());
        self
    }

    /// Set or remove the `iat` claim (whole seconds)
    pub fn with_issued_at(mut self, issued_at: impl Into<Option<SystemTime>>) -> Self {
        self.set_instant("iat", issued_at.into());
        self
    }

    /// Set or remove the `jti` claim
    pub fn with_jwt_id<'a>(mut self, jwt_id: impl Into<Option<&'a str>>) -> Self {
        self.set_text("jti", jwt_id.into());
        self
    }

    /// Set or remove a custom claim
    ///
    /// Accepts any [`ClaimValue`]-convertible type (text, integer, real,
    /// bool, `SystemTime`, nested [`ClaimSet`]). A claim whose name collides
    /// with a reserved claim overwrites it: the payload is one map and last
    /// write wins. `None` or an explicit [`ClaimValue::Null`] removes the
    /// claim.
    pub fn with_claim<V: Into<ClaimValue>>(
        mut self,
        name: &str,
        value: impl Into<Option<V>>,
    ) -> Self {
        if name.is_empty() {
            self.error.get_or_insert(Error::ClaimNameEmpty);
            return self;
        }
        match value.into().map(Into::into) {
            Some(value) if !value.is_null() => self.payload.insert(name, value),
            _ => {
                self.payload.remove(name);
            }
        }
        self
    }

    /// Set a custom claim holding an array of values
    pub fn with_array_claim<V: Into<ClaimValue>>(
        mut self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        if name.is_empty() {
            self.error.get_or_insert(Error::ClaimNameEmpty);
            return self;
        }
        let items: Vec<ClaimValue> = values.into_iter().map(Into::into).collect();
        self.payload.insert(name, ClaimValue::Array(items));
        self
    }

    /// Serialize, encode and sign, producing the compact token string
    ///
    /// Injects `alg` into the header (always overwriting any user-supplied
    /// value), serializes header and payload in insertion order with no
    /// whitespace, and joins the base64url segments with `.`. The signature
    /// segment of an unsigned ("none") token is the literal empty string.
    pub fn sign(self, algorithm: &Algorithm) -> Result<String> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut header = self.header;
        header.insert("alg", algorithm.name());

        let header_segment = base64url::encode(header.to_json()?);
        let payload_segment = base64url::encode(self.payload.to_json()?);
        let signing_input = format!("{header_segment}.{payload_segment}");

        let signature = algorithm.sign(signing_input.as_bytes())?;
        let signature_segment = base64url::encode(signature);

        Ok(format!("{signing_input}.{signature_segment}"))
    }

    fn set_text(&mut self, name: &'static str, value: Option<&str>) {
        match value {
            Some(text) => self.payload.insert(name, text),
            None => {
                self.payload.remove(name);
            }
        }
    }

    fn set_instant(&mut self, name: &'static str, value: Option<SystemTime>) {
        match value {
            Some(at) => self.payload.insert(name, ClaimValue::from(at)),
            None => {
                self.payload.remove(name);
            }
        }
    }
}

impl Default for JwtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;

    fn payload_json(token: &str) -> String {
        let segment = token.split('.').nth(1).unwrap();
        base64url::decode_string(segment).unwrap()
    }

    fn header_json(token: &str) -> String {
        let segment = token.split('.').next().unwrap();
        base64url::decode_string(segment).unwrap()
    }

    #[test]
    fn test_default_header_order() {
        let token = JwtBuilder::new().sign(&Algorithm::hs256("secret")).unwrap();
        assert_eq!(header_json(&token), r#"{"typ":"JWT","alg":"HS256"}"#);
    }

    #[test]
    fn test_user_header_keeps_typ_first_and_alg_last() {
        let token = JwtBuilder::new()
            .with_header([("asd", 123i64)])
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(
            header_json(&token),
            r#"{"typ":"JWT","asd":123,"alg":"HS256"}"#
        );
    }

    #[test]
    fn test_user_supplied_alg_is_overwritten() {
        let token = JwtBuilder::new()
            .with_header([("alg", "none")])
            .sign(&Algorithm::hs384("secret"))
            .unwrap();
        assert_eq!(header_json(&token), r#"{"typ":"JWT","alg":"HS384"}"#);
    }

    #[test]
    fn test_null_header_value_removes_default() {
        let token = JwtBuilder::new()
            .with_header([("typ", ClaimValue::Null)])
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(header_json(&token), r#"{"alg":"HS256"}"#);
    }

    #[test]
    fn test_key_id_lands_in_header() {
        let token = JwtBuilder::new()
            .with_key_id("key-1")
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(
            header_json(&token),
            r#"{"typ":"JWT","kid":"key-1","alg":"HS256"}"#
        );
    }

    #[test]
    fn test_payload_insertion_order() {
        let token = JwtBuilder::new()
            .with_subject("user")
            .with_issuer("issuer")
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(payload_json(&token), r#"{"sub":"user","iss":"issuer"}"#);
    }

    #[test]
    fn test_none_setter_removes_claim() {
        let token = JwtBuilder::new()
            .with_issuer("issuer")
            .with_issuer(None)
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(payload_json(&token), "{}");
    }

    #[test]
    fn test_audience_scalar_vs_array() {
        let token = JwtBuilder::new()
            .with_audience(&["Mark"])
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(payload_json(&token), r#"{"aud":"Mark"}"#);

        let token = JwtBuilder::new()
            .with_audience(&["Mark", "David"])
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(payload_json(&token), r#"{"aud":["Mark","David"]}"#);

        let token = JwtBuilder::new()
            .with_audience(&["Mark"])
            .with_audience::<&str>(&[])
            .sign(&Algorithm::hs256("secret"))
            .unwrap();
        assert_eq!(payload_json(&token), "{}");
    }

    #[test]
    fn test_empty_claim_name_fails_at_sign() {
        let result = JwtBuilder::new()
            .with_claim("", "value")
            .sign(&Algorithm::hs256("secret"));
        assert_eq!(result, Err(Error::ClaimNameEmpty));

        let result = JwtBuilder::new()
            .with_array_claim("", ["a"])
            .sign(&Algorithm::hs256("secret"));
        assert_eq!(result, Err(Error::ClaimNameEmpty));
    }

    #[test]
    fn test_none_algorithm_leaves_signature_empty() {
        let token = JwtBuilder::new().sign(&Algorithm::none()).unwrap();
        assert!(token.ends_with('.'));
        assert_eq!(token.split('.').nth(2), Some(""));
        assert_eq!(header_json(&token), r#"{"typ":"JWT","alg":"none"}"#);
    }
}
