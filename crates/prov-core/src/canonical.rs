//! # Canonical Serialization
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes used in
//! digest computation and signing across the whole stack.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats
//! and serializes via RFC 8785 (JSON Canonicalization Scheme): sorted
//! keys, compact separators, deterministic byte sequence. Any function
//! that hashes or signs data must accept `&CanonicalBytes`, so a
//! non-canonical byte sequence can never reach a digest.
//!
//! Two records with the same field values therefore always produce the
//! same content identifier, regardless of field declaration order or the
//! serializer that built the intermediate value tree.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalError;

/// Bytes produced exclusively by RFC 8785 canonicalization.
///
/// # Invariants
///
/// - The only constructor is [`CanonicalBytes::new()`].
/// - The byte sequence is valid UTF-8 JSON with lexicographically sorted
///   object keys and compact separators.
/// - No float value appears anywhere in the serialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalError::FloatRejected`] if the value contains a
    /// float anywhere in its tree, [`CanonicalError::Serialization`] if
    /// JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a JSON value tree and reject any float.
///
/// Integers pass (serde_json keeps them as i64/u64); a number that is
/// only representable as f64 is a float and has no stable canonical form.
fn reject_floats(value: &Value) -> Result<(), CanonicalError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for JSON-compatible values without floats.
    fn json_value_no_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,40}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        /// Canonicalization is deterministic.
        #[test]
        fn canonical_bytes_deterministic(value in json_value_no_floats()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical bytes are valid JSON that parses back to the input.
        #[test]
        fn canonical_bytes_roundtrip(value in json_value_no_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            prop_assert_eq!(parsed, value);
        }

        /// Any value containing a non-integer float is rejected.
        #[test]
        fn float_always_rejected(f in any::<f64>().prop_filter("not integer", |f| {
            f.fract() != 0.0 && f.is_finite()
        })) {
            let data = serde_json::json!({"val": f});
            prop_assert!(CanonicalBytes::new(&data).is_err());
        }
    }
}
