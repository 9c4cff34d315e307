//! Claim value model
//!
//! Tokens carry their header and payload as [`ClaimSet`]s: insertion-ordered
//! maps from claim name to [`ClaimValue`]. Canonical serialization is defined
//! over this model (insertion order, no whitespace, instants as integer epoch
//! seconds); tokenizing, string escaping and number formatting are delegated
//! to `serde_json`.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A single claim value
///
/// `Instant` carries whole epoch seconds; sub-second precision is truncated
/// on construction. On the wire an instant is indistinguishable from an
/// integer, so equality treats `Instant(n)` and `Integer(n)` as equal.
#[derive(Debug, Clone)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// Seconds since the Unix epoch
    Instant(i64),
    Array(Vec<ClaimValue>),
    Map(ClaimSet),
}

impl ClaimValue {
    /// Value as a string slice, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Value as a signed integer, if it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Value as a double, if it is a real number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClaimValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Value as a boolean, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Value as epoch seconds, accepting either an instant or an integer
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            ClaimValue::Instant(s) | ClaimValue::Integer(s) => Some(*s),
            _ => None,
        }
    }

    /// Value as an array slice, if it is one
    pub fn as_array(&self) -> Option<&[ClaimValue]> {
        match self {
            ClaimValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Value as a nested claim set, if it is one
    pub fn as_map(&self) -> Option<&ClaimSet> {
        match self {
            ClaimValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// True for the JSON null value
    pub fn is_null(&self) -> bool {
        matches!(self, ClaimValue::Null)
    }

    /// Canonical JSON rendering of this value
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SerializeFailed(e.to_string()))
    }
}

impl PartialEq for ClaimValue {
    fn eq(&self, other: &Self) -> bool {
        use ClaimValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            // Instants serialize as plain integers, so they compare as such
            (Integer(a) | Instant(a), Integer(b) | Instant(b)) => a == b,
            (Real(a), Real(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::Text(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Real(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<SystemTime> for ClaimValue {
    fn from(value: SystemTime) -> Self {
        // Truncates sub-second precision in both directions
        let seconds = match value.duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };
        ClaimValue::Instant(seconds)
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(value: Vec<ClaimValue>) -> Self {
        ClaimValue::Array(value)
    }
}

impl From<ClaimSet> for ClaimValue {
    fn from(value: ClaimSet) -> Self {
        ClaimValue::Map(value)
    }
}

/// An insertion-ordered mapping from claim name to value
///
/// Re-inserting an existing name overwrites the value in place, keeping the
/// original position; this makes serialization order a pure function of
/// first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    entries: Vec<(String, ClaimValue)>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a claim, preserving first-insertion order
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove a claim, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<ClaimValue> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up a claim by name
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical JSON: insertion order, no whitespace
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SerializeFailed(e.to_string()))
    }

    /// Parse a JSON object into a claim set, preserving document order
    pub(crate) fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let value: ClaimValue = serde_json::from_slice(bytes)
            .map_err(|e| Error::FormatInvalidJson(e.to_string()))?;
        match value {
            ClaimValue::Map(set) => Ok(set),
            _ => Err(Error::FormatInvalidJson(
                "expected a JSON object".to_string(),
            )),
        }
    }
}

impl FromIterator<(String, ClaimValue)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (String, ClaimValue)>>(iter: I) -> Self {
        let mut set = ClaimSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = (&'a String, &'a ClaimValue);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, ClaimValue)>,
        fn(&'a (String, ClaimValue)) -> (&'a String, &'a ClaimValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn project(entry: &(String, ClaimValue)) -> (&String, &ClaimValue) {
            (&entry.0, &entry.1)
        }
        self.entries.iter().map(project)
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ClaimValue::Null => serializer.serialize_unit(),
            ClaimValue::Bool(b) => serializer.serialize_bool(*b),
            ClaimValue::Integer(n) | ClaimValue::Instant(n) => serializer.serialize_i64(*n),
            ClaimValue::Real(r) => serializer.serialize_f64(*r),
            ClaimValue::Text(s) => serializer.serialize_str(s),
            ClaimValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ClaimValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = ClaimValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                // The model's integer is 64-bit signed; larger values degrade
                if let Ok(n) = i64::try_from(v) {
                    Ok(ClaimValue::Integer(n))
                } else {
                    Ok(ClaimValue::Real(v as f64))
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Real(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Text(v))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ClaimValue::Null)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(ClaimValue::Array(items))
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut set = ClaimSet::new();
                while let Some((name, value)) = map.next_entry::<String, ClaimValue>()? {
                    set.insert(name, value);
                }
                Ok(ClaimValue::Map(set))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_insertion_order_is_canonical() {
        let mut set = ClaimSet::new();
        set.insert("typ", "JWT");
        set.insert("alg", "HS256");
        assert_eq!(set.to_json().unwrap(), r#"{"typ":"JWT","alg":"HS256"}"#);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut set = ClaimSet::new();
        set.insert("a", 1i64);
        set.insert("b", 2i64);
        set.insert("a", 3i64);
        assert_eq!(set.to_json().unwrap(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_value_serialization() {
        let mut set = ClaimSet::new();
        set.insert("s", "value");
        set.insert("i", 123i64);
        set.insert("r", 23.45);
        set.insert("b", true);
        set.insert(
            "t",
            SystemTime::UNIX_EPOCH + Duration::from_millis(1_478_891_521_000),
        );
        set.insert(
            "a",
            vec![ClaimValue::from("x"), ClaimValue::from(1i64)],
        );
        assert_eq!(
            set.to_json().unwrap(),
            r#"{"s":"value","i":123,"r":23.45,"b":true,"t":1478891521,"a":["x",1]}"#
        );
    }

    #[test]
    fn test_instant_truncates_subseconds() {
        let t = SystemTime::UNIX_EPOCH + Duration::from_millis(1_477_592_999);
        assert_eq!(ClaimValue::from(t), ClaimValue::Instant(1_477_592));
    }

    #[test]
    fn test_instant_equals_integer() {
        assert_eq!(ClaimValue::Instant(42), ClaimValue::Integer(42));
        assert_ne!(ClaimValue::Instant(42), ClaimValue::Integer(43));
        assert_ne!(ClaimValue::Instant(42), ClaimValue::Real(42.0));
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let set = ClaimSet::from_json_bytes(br#"{"z":1,"a":"two","m":{"k":null}}"#).unwrap();
        let names: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(set.get("z"), Some(&ClaimValue::Integer(1)));
        assert!(set.get("m").unwrap().as_map().unwrap().get("k").unwrap().is_null());
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(
            ClaimSet::from_json_bytes(b"[1,2,3]"),
            Err(Error::FormatInvalidJson(_))
        ));
        assert!(matches!(
            ClaimSet::from_json_bytes(b"not json"),
            Err(Error::FormatInvalidJson(_))
        ));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let mut set = ClaimSet::new();
        set.insert("name", "value");
        set.insert("count", 7i64);
        set.insert("ok", false);
        let parsed = ClaimSet::from_json_bytes(set.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn test_string_escaping_is_delegated() {
        let mut set = ClaimSet::new();
        set.insert("q", "say \"hi\"\n");
        assert_eq!(set.to_json().unwrap(), r#"{"q":"say \"hi\"\n"}"#);
    }
}
