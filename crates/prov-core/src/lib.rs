//! # prov-core
//!
//! Foundational types for the prov stack. This crate defines the value
//! types every other crate builds on: canonical serialization, content
//! identifiers and digests, epoch timestamps, signer addresses, and the
//! `AssetTree`/`Commit` data model with its merge and overlay rules.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` is the only hashable byte sequence.** All digest
//!    and signing input flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for anything that gets addressed or signed.
//!
//! 2. **Newtype wrappers for identifier namespaces.** `Cid`,
//!    `Sha256Digest`, `Address`, `Timestamp` are distinct types with
//!    validated constructors. A commit identifier cannot be passed where
//!    an asset identifier is expected.
//!
//! 3. **Closed enums with an escape variant.** `Action`, `ActionResult`
//!    and `License` are tagged enums, not bare strings. Unrecognized wire
//!    values land in the explicit `Custom` escape, never in a panic.
//!
//! 4. **Drafts and anchored records are different types.** A `CommitDraft`
//!    structurally lacks the hash, signature and timestamp that only exist
//!    once a version is anchored; a `Commit` requires all of them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `prov-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod action;
pub mod canonical;
pub mod commit;
pub mod digest;
pub mod error;
pub mod license;
pub mod signature;
pub mod temporal;
pub mod tree;

// Re-export primary types for ergonomic imports.
pub use action::{Action, ActionResult};
pub use canonical::CanonicalBytes;
pub use commit::{Commit, CommitDraft, CommitOverlay};
pub use digest::{Cid, Sha256Digest, MOCK_CID_LEN};
pub use error::{CanonicalError, IdentityError, LicenseError};
pub use license::{License, LicenseBody, LicensePreset};
pub use signature::{Address, SignatureEnvelope};
pub use temporal::Timestamp;
pub use tree::{AssetTree, TreeUpdate};
