//! Error types for registry backends.

use thiserror::Error;

/// Error raised by a registry backend.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The ledger refused the write.
    #[error("registry rejected append: {0}")]
    Rejected(String),

    /// A persisted journal record could not be parsed.
    #[error("registry journal corrupt: {0}")]
    Corrupt(String),

    /// Transport or filesystem failure.
    #[error("registry io error: {0}")]
    Io(#[from] std::io::Error),
}
