//! # Error Types
//!
//! Errors for the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations. Cryptographic and
//! storage errors live in their own crates; this module covers only what
//! the value types themselves can reject.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalError {
    /// Float values have no stable canonical form across implementations.
    /// Content-addressed records must use integers or strings.
    #[error("float values have no canonical form, use integer or string: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("canonical serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error constructing an identifier newtype from untrusted input.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The string is not a well-formed content identifier.
    #[error("invalid content identifier: {0}")]
    InvalidCid(String),

    /// The string is not a well-formed SHA-256 digest.
    #[error("invalid sha256 digest: {0}")]
    InvalidDigest(String),

    /// The string is not a well-formed signature envelope.
    #[error("invalid signature envelope: {0}")]
    InvalidEnvelope(String),

    /// The value is outside the representable timestamp range.
    #[error("invalid epoch timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Error resolving a license name.
#[derive(Error, Debug)]
pub enum LicenseError {
    /// The name does not match any known preset.
    #[error("unknown license preset: {0:?}")]
    UnknownPreset(String),
}
