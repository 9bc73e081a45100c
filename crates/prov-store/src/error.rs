//! Error types for content stores.

use prov_core::Cid;
use thiserror::Error;

/// Error raised by a content store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The identifier is unknown to this store.
    #[error("content not found: {0}")]
    NotFound(Cid),

    /// Stored bytes no longer hash to their identifier.
    #[error("content corrupt: expected {expected}, found {actual}")]
    Corrupt {
        /// The identifier that was requested.
        expected: Cid,
        /// The identifier the stored bytes actually derive.
        actual: Cid,
    },

    /// Transport or filesystem failure.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
}
