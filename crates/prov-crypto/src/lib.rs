//! # prov-crypto
//!
//! The signing service: Ed25519 key handling, signing of tree digests,
//! and signer recovery from self-describing envelopes. The engine hands
//! this crate a digest and gets back an envelope; it never inspects key
//! material directly.
//!
//! ## Crate Policy
//!
//! - Private keys are never serialized, logged, or shown by `Debug`.
//! - Signing input is `&Sha256Digest`, never raw bytes. Everything signed
//!   in this stack is a digest of canonical bytes.
//! - Verification takes only the digest and the envelope and returns the
//!   recovered signer address. Whether that address is trusted is the
//!   caller's judgment.

pub mod ed25519;
pub mod error;

pub use ed25519::{verify_digest, SigningKeyPair};
pub use error::CryptoError;
