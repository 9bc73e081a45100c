//! # Engine Error Taxonomy
//!
//! One enum covering every way an engine operation can fail. Collaborator
//! errors convert in via `#[from]` and keep their detail; the engine adds
//! the failures only it can detect.
//!
//! ## Propagation Policy
//!
//! - `HashMismatch` and invalid signatures abort the operation entirely.
//!   Provenance correctness is the system's reason for existing, so an
//!   unverified result is never presented as valid history.
//! - Store and registry failures propagate as-is. The engine performs no
//!   implicit retry or backoff.
//! - `ConfigMissing` is raised before any network access is attempted.

use std::path::PathBuf;

use thiserror::Error;

use prov_core::{CanonicalError, Sha256Digest};
use prov_crypto::CryptoError;
use prov_registry::RegistryError;
use prov_store::StoreError;

/// Error raised by engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Content store failure: missing content, corruption, transport.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Registry failure: ledger rejection or transport.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Stored tree bytes do not hash to the commit's recorded digest.
    /// Guards against store corruption and forged pointers; fatal.
    #[error("asset tree hash mismatch: recorded {recorded}, computed {computed}")]
    HashMismatch {
        /// The digest the commit recorded at signing time.
        recorded: Sha256Digest,
        /// The digest the fetched tree actually hashes to.
        computed: Sha256Digest,
    },

    /// Signature verification or key handling failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Commit attempted with an empty staging slot.
    #[error("nothing staged, run add before commit")]
    NoStagedAsset,

    /// The workspace has not been initialized.
    #[error("workspace not initialized at {0}, run init first")]
    ConfigMissing(PathBuf),

    /// The workspace configuration is present but unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Canonical serialization failure.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),

    /// A persisted record could not be encoded or decoded.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local workspace filesystem failure.
    #[error("workspace io error: {0}")]
    Io(#[from] std::io::Error),
}
