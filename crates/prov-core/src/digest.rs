//! # Content Identifiers and Digests
//!
//! Two distinct identifier namespaces live here:
//!
//! - [`Sha256Digest`] is the hash recorded inside a [`Commit`] over the
//!   canonical serialization of an `AssetTree`. It is computed only from
//!   `CanonicalBytes`, so every digest in the system went through the
//!   canonicalization pipeline.
//! - [`Cid`] is the opaque identifier a content store derives for a blob.
//!   The engine never computes a `Cid` itself; it treats the value as a
//!   token minted by whichever store backend holds the bytes.
//!
//! Keeping the two apart matters: a `Cid` names *where bytes live*, a
//! `Sha256Digest` asserts *what a record hashed to at signing time*. The
//! hash check during reconstruction compares the two worlds.
//!
//! [`Commit`]: crate::commit::Commit

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::IdentityError;

/// Length of the fixed placeholder identifier used by mock-mode flows.
pub const MOCK_CID_LEN: usize = 46;

const MOCK_CID: &str = "0000000000000000000000000000000000000000000000";

/// A SHA-256 digest over canonical bytes. Hex-encoded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    /// Compute the digest of a canonical byte sequence.
    ///
    /// The parameter type is `&CanonicalBytes`, not `&[u8]`. This is the
    /// compile-time guarantee that nothing in the system hashes bytes
    /// that skipped canonicalization.
    pub fn of(data: &CanonicalBytes) -> Self {
        let hash = Sha256::digest(data.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Wrap raw digest bytes, e.g. parsed from an external record.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let raw = hex::decode(s.trim()).map_err(|e| IdentityError::InvalidDigest(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| IdentityError::InvalidDigest(format!("expected 32 bytes, got {}", s.len() / 2)))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Sha256Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sha256Digest({}...)", hex::encode(&self.0[..4]))
    }
}

impl std::fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An opaque, store-derived content identifier.
///
/// A `Cid` is a deterministic function of the bytes it names: putting
/// identical bytes into a store twice yields the identical `Cid`. The
/// engine relies on that and on nothing else; the concrete format belongs
/// to the store backend.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid(String);

impl Cid {
    /// Validate and wrap an identifier string.
    ///
    /// Accepts non-empty ASCII tokens of printable characters up to 128
    /// bytes. Whitespace and control characters are rejected so a `Cid`
    /// can always be embedded in line-oriented journals and paths.
    pub fn new(s: impl Into<String>) -> Result<Self, IdentityError> {
        let s = s.into();
        if s.is_empty() || s.len() > 128 {
            return Err(IdentityError::InvalidCid(format!(
                "identifier length {} out of range 1..=128",
                s.len()
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(IdentityError::InvalidCid(
                "identifier must be printable ASCII without whitespace".to_string(),
            ));
        }
        Ok(Self(s))
    }

    /// The fixed-length placeholder used by mock-mode flows.
    ///
    /// Always [`MOCK_CID_LEN`] characters, never derived from a store.
    pub fn mock() -> Self {
        Self(MOCK_CID.to_string())
    }

    /// True if this is the mock placeholder.
    pub fn is_mock(&self) -> bool {
        self.0 == MOCK_CID
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cid({})", self.0)
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
