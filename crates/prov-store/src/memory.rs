//! In-memory content store backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use prov_core::Cid;

use crate::error::StoreError;
use crate::{derive_cid, ContentStore};

/// Content store backed by a `RwLock<HashMap>`.
///
/// Useful for tests and for running the whole flow without touching the
/// filesystem. `Bytes` payloads make reads cheap clones.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<Cid, Bytes>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// True if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn put(&self, data: Bytes) -> Result<Cid, StoreError> {
        let cid = derive_cid(&data);
        let mut blobs = self.blobs.write().expect("lock poisoned");
        blobs.entry(cid.clone()).or_insert(data);
        debug!(%cid, "stored blob in memory");
        Ok(cid)
    }

    async fn get(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        let blobs = self.blobs.read().expect("lock poisoned");
        blobs
            .get(cid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(cid.clone()))
    }

    async fn contains(&self, cid: &Cid) -> Result<bool, StoreError> {
        Ok(self.blobs.read().expect("lock poisoned").contains_key(cid))
    }
}
