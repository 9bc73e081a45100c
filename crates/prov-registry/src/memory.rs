//! In-memory registry backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use prov_core::Cid;

use crate::error::RegistryError;
use crate::{AppendReceipt, Registry, RegistryEntry};

#[derive(Default)]
struct Inner {
    by_asset: HashMap<Cid, Vec<RegistryEntry>>,
    next_seq: u64,
}

/// Registry backed by process memory, for tests and dry runs of the
/// full flow.
#[derive(Default)]
pub struct MemoryRegistry {
    inner: Mutex<Inner>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all assets.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("lock poisoned");
        inner.by_asset.values().map(Vec::len).sum()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn append(
        &self,
        asset_cid: &Cid,
        commit_cid: &Cid,
    ) -> Result<AppendReceipt, RegistryError> {
        let mut inner = self.inner.lock().expect("lock poisoned");
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .by_asset
            .entry(asset_cid.clone())
            .or_default()
            .push(RegistryEntry {
                commit_cid: commit_cid.clone(),
                seq,
            });
        debug!(%asset_cid, %commit_cid, seq, "appended registry entry");
        Ok(AppendReceipt {
            asset_cid: asset_cid.clone(),
            commit_cid: commit_cid.clone(),
            seq,
        })
    }

    async fn query(&self, asset_cid: &Cid) -> Result<Vec<RegistryEntry>, RegistryError> {
        let inner = self.inner.lock().expect("lock poisoned");
        Ok(inner.by_asset.get(asset_cid).cloned().unwrap_or_default())
    }
}
