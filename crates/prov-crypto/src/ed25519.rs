//! # Ed25519 Signing and Recovery
//!
//! `SigningKeyPair` holds the provisioned signing key and produces
//! [`SignatureEnvelope`]s over tree digests. [`verify_digest`] is the
//! standalone audit path: given only a digest and an envelope it checks
//! the signature with the embedded public key and returns the signer's
//! address.
//!
//! ## Security Invariant
//!
//! - Signing input is `&Sha256Digest`. There is no API to sign arbitrary
//!   bytes, so a signature in this stack always covers a digest that came
//!   out of the canonicalization pipeline.
//! - The private key is never serialized and `Debug` prints a redacted
//!   placeholder.
//! - Ed25519 signing is deterministic: the same key and digest always
//!   produce the same envelope.

use ed25519_dalek::{Signer, Verifier};

use prov_core::{Address, Sha256Digest, SignatureEnvelope};

use crate::error::CryptoError;

/// The provisioned signing key for this workspace.
///
/// Does not implement `Serialize`; seeds enter as 32 bytes of hex from
/// configuration and never leave.
pub struct SigningKeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl SigningKeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Build a key pair from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Build a key pair from a 64-character hex seed, the form the
    /// workspace configuration stores.
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(seed_hex.trim()).map_err(|e| CryptoError::Key(e.to_string()))?;
        let seed: [u8; 32] = raw
            .try_into()
            .map_err(|_| CryptoError::Key("seed must be exactly 32 bytes of hex".to_string()))?;
        Ok(Self::from_seed(&seed))
    }

    /// The seed as hex, for writing a freshly generated key into a new
    /// workspace configuration.
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// The signer address this key recovers to.
    pub fn address(&self) -> Address {
        Address::from_public_key_bytes(&self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a tree digest, producing a self-describing envelope.
    pub fn sign_digest(&self, digest: &Sha256Digest) -> SignatureEnvelope {
        let signature = self.signing_key.sign(digest.as_bytes());
        SignatureEnvelope::new(
            self.signing_key.verifying_key().to_bytes(),
            signature.to_bytes(),
        )
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKeyPair(<private>)")
    }
}

/// Verify an envelope against a digest and recover the signer address.
///
/// Checks the Ed25519 signature using the public key embedded in the
/// envelope. On success returns the address derived from that key; the
/// caller decides whether to trust it as the record's author.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSignature`] if the embedded key is not
/// a valid Ed25519 point or the signature does not verify over the
/// digest.
pub fn verify_digest(
    digest: &Sha256Digest,
    envelope: &SignatureEnvelope,
) -> Result<Address, CryptoError> {
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(envelope.public_key_bytes())
        .map_err(|e| CryptoError::InvalidSignature(format!("malformed public key: {e}")))?;
    let signature = ed25519_dalek::Signature::from_bytes(envelope.signature_bytes());
    verifying_key
        .verify(digest.as_bytes(), &signature)
        .map_err(|e| CryptoError::InvalidSignature(format!("verification failed: {e}")))?;
    Ok(envelope.claimed_address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_core::CanonicalBytes;

    fn digest_of(value: &serde_json::Value) -> Sha256Digest {
        Sha256Digest::of(&CanonicalBytes::new(value).unwrap())
    }

    #[test]
    fn test_sign_and_verify_recovers_signer() {
        let kp = SigningKeyPair::generate();
        let digest = digest_of(&serde_json::json!({"message": "hello"}));
        let envelope = kp.sign_digest(&digest);
        let recovered = verify_digest(&digest, &envelope).expect("should verify");
        assert_eq!(recovered, kp.address());
    }

    #[test]
    fn test_tampered_digest_fails() {
        let kp = SigningKeyPair::generate();
        let digest = digest_of(&serde_json::json!({"msg": "original"}));
        let other = digest_of(&serde_json::json!({"msg": "tampered"}));
        let envelope = kp.sign_digest(&digest);
        assert!(verify_digest(&other, &envelope).is_err());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let kp = SigningKeyPair::generate();
        let digest = digest_of(&serde_json::json!({"x": 1}));
        let envelope = kp.sign_digest(&digest);
        let mut sig = *envelope.signature_bytes();
        sig[0] ^= 0xff;
        let forged = SignatureEnvelope::new(*envelope.public_key_bytes(), sig);
        assert!(verify_digest(&digest, &forged).is_err());
    }

    #[test]
    fn test_substituted_key_fails() {
        let kp1 = SigningKeyPair::generate();
        let kp2 = SigningKeyPair::generate();
        let digest = digest_of(&serde_json::json!({"x": 1}));
        let envelope = kp1.sign_digest(&digest);
        // Claim kp2's key over kp1's signature.
        let forged = SignatureEnvelope::new(
            *kp2.sign_digest(&digest).public_key_bytes(),
            *envelope.signature_bytes(),
        );
        assert!(verify_digest(&digest, &forged).is_err());
    }

    #[test]
    fn test_signing_deterministic_for_fixed_key() {
        let kp = SigningKeyPair::from_seed(&[42u8; 32]);
        let digest = digest_of(&serde_json::json!({"d": true}));
        assert_eq!(kp.sign_digest(&digest), kp.sign_digest(&digest));
    }

    #[test]
    fn test_seed_hex_roundtrip() {
        let kp = SigningKeyPair::from_seed(&[7u8; 32]);
        let again = SigningKeyPair::from_seed_hex(&kp.seed_hex()).unwrap();
        assert_eq!(kp.address(), again.address());
    }

    #[test]
    fn test_bad_seed_hex_rejected() {
        assert!(SigningKeyPair::from_seed_hex("nothex").is_err());
        assert!(SigningKeyPair::from_seed_hex("aabb").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let kp = SigningKeyPair::generate();
        assert_eq!(format!("{kp:?}"), "SigningKeyPair(<private>)");
    }
}
