//! Error types for signing and verification.

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The envelope is malformed or its signature does not verify.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Key material could not be parsed or derived.
    #[error("key error: {0}")]
    Key(String),
}
