//! # prov-registry
//!
//! The append-only registry contract: an external ledger mapping an
//! asset's permanent identifier to the ordered list of commits anchored
//! for it. Appends are irrevocable; ordering is assigned by the ledger
//! and is authoritative over any timestamp inside a commit.
//!
//! The engine only sees the trait. `MemoryRegistry` backs tests;
//! `FsRegistry` is a local JSON-lines journal so the full flow runs
//! without a remote ledger. A blockchain contract client would be a
//! third implementation of the same contract.

pub mod error;
pub mod fs;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use prov_core::Cid;

pub use error::RegistryError;
pub use fs::FsRegistry;
pub use memory::MemoryRegistry;

/// One anchored commit reference in an asset's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Identifier of the stored commit envelope.
    pub commit_cid: Cid,
    /// Ledger-assigned sequence number, strictly increasing per backend.
    pub seq: u64,
}

/// Acknowledgement of a landed append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendReceipt {
    /// The asset the entry was recorded under.
    pub asset_cid: Cid,
    /// The commit reference that landed.
    pub commit_cid: Cid,
    /// The sequence number the ledger assigned.
    pub seq: u64,
}

/// Append-only ledger of commit references per asset.
///
/// Implementations must be `Send + Sync`. An append either lands or
/// fails; callers never observe a partial write, and the engine never
/// retries on their behalf.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Record a commit reference for an asset. Irrevocable.
    async fn append(&self, asset_cid: &Cid, commit_cid: &Cid)
        -> Result<AppendReceipt, RegistryError>;

    /// All entries for an asset in ledger order, newest last.
    ///
    /// An empty list means the asset has never been registered.
    async fn query(&self, asset_cid: &Cid) -> Result<Vec<RegistryEntry>, RegistryError>;
}

#[async_trait]
impl<T: Registry + ?Sized> Registry for std::sync::Arc<T> {
    async fn append(
        &self,
        asset_cid: &Cid,
        commit_cid: &Cid,
    ) -> Result<AppendReceipt, RegistryError> {
        (**self).append(asset_cid, commit_cid).await
    }

    async fn query(&self, asset_cid: &Cid) -> Result<Vec<RegistryEntry>, RegistryError> {
        (**self).query(asset_cid).await
    }
}
