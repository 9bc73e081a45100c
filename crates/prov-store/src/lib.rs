//! # prov-store
//!
//! Content-addressed blob storage: the `ContentStore` contract and the
//! two bundled backends. A store maps bytes to a deterministic,
//! content-derived identifier; putting identical bytes twice yields the
//! identical identifier, and retrieval verifies the bytes still match it.
//!
//! The engine only sees the trait. `MemoryStore` backs tests and
//! memory-only operation; `FsStore` persists blobs as content-addressed
//! files. A pinning-service client would be a third implementation of
//! the same contract.

pub mod error;
pub mod fs;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};

use prov_core::Cid;

pub use error::StoreError;
pub use fs::FsStore;
pub use memory::MemoryStore;

/// Content-addressed blob storage.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// No ordering or transaction semantics are required; the only contract
/// is deterministic addressing and verified retrieval.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes and return their content-derived identifier.
    ///
    /// Deterministic and idempotent: identical bytes always produce the
    /// identical identifier, and re-putting existing content succeeds.
    async fn put(&self, data: Bytes) -> Result<Cid, StoreError>;

    /// Retrieve bytes by identifier.
    ///
    /// Fails with [`StoreError::NotFound`] for unknown identifiers and
    /// [`StoreError::Corrupt`] if the stored bytes no longer match.
    async fn get(&self, cid: &Cid) -> Result<Bytes, StoreError>;

    /// Check whether the store holds content for an identifier.
    async fn contains(&self, cid: &Cid) -> Result<bool, StoreError>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for std::sync::Arc<T> {
    async fn put(&self, data: Bytes) -> Result<Cid, StoreError> {
        (**self).put(data).await
    }

    async fn get(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        (**self).get(cid).await
    }

    async fn contains(&self, cid: &Cid) -> Result<bool, StoreError> {
        (**self).contains(cid).await
    }
}

/// Derive the identifier the bundled backends assign to a byte sequence.
///
/// `b` followed by the lowercase hex SHA-256 of the bytes. Both backends
/// share this derivation, so content moved between them keeps its
/// identifier.
pub fn derive_cid(data: &[u8]) -> Cid {
    let hash = Sha256::digest(data);
    // 65 printable ASCII chars, statically within Cid validation rules.
    Cid::new(format!("b{}", hex::encode(hash))).expect("hex identifier is always a valid cid")
}
