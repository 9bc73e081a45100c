//! # Signature Envelopes and Signer Addresses
//!
//! The signature recorded in a `Commit` must let an auditor recover the
//! signer from the `(hash, signature)` pair alone. Ed25519 has no key
//! recovery, so the stored value is a self-describing envelope: the
//! signer's 32-byte public key followed by the 64-byte signature, hex on
//! the wire. Interpretation of the envelope (actual verification) lives
//! in `prov-crypto`; this module only defines the value types so the data
//! model stays free of crypto dependencies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentityError;

/// A self-describing signature: public key then signature bytes.
///
/// 96 bytes total, rendered as 192 hex characters. The envelope carries
/// everything needed to verify and to name the signer; whether that
/// signer is *trusted* as the record's author remains the caller's
/// judgment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SignatureEnvelope {
    public_key: [u8; 32],
    signature: [u8; 64],
}

impl SignatureEnvelope {
    /// Assemble an envelope from its parts.
    pub fn new(public_key: [u8; 32], signature: [u8; 64]) -> Self {
        Self { public_key, signature }
    }

    /// The signer's raw public key bytes.
    pub fn public_key_bytes(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// The raw signature bytes.
    pub fn signature_bytes(&self) -> &[u8; 64] {
        &self.signature
    }

    /// The address the envelope claims as signer.
    ///
    /// Derived from the embedded public key. Claiming is not proving;
    /// only verification in `prov-crypto` establishes that the key
    /// actually signed the hash.
    pub fn claimed_address(&self) -> Address {
        Address::from_public_key_bytes(&self.public_key)
    }

    /// Render as 192 hex characters, public key first.
    pub fn to_hex(&self) -> String {
        format!("{}{}", hex::encode(self.public_key), hex::encode(self.signature))
    }

    /// Parse from 192 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let raw = hex::decode(s.trim()).map_err(|e| IdentityError::InvalidEnvelope(e.to_string()))?;
        if raw.len() != 96 {
            return Err(IdentityError::InvalidEnvelope(format!(
                "expected 96 bytes, got {}",
                raw.len()
            )));
        }
        let mut public_key = [0u8; 32];
        let mut signature = [0u8; 64];
        public_key.copy_from_slice(&raw[..32]);
        signature.copy_from_slice(&raw[32..]);
        Ok(Self { public_key, signature })
    }
}

impl Serialize for SignatureEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for SignatureEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignatureEnvelope(signer {})", self.claimed_address())
    }
}

/// A signer address: the lowercase hex of an Ed25519 public key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Derive the address for a raw public key.
    pub fn from_public_key_bytes(bytes: &[u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({}...)", &self.0[..self.0.len().min(8)])
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
