//! # prov-engine
//!
//! The versioning engine. Everything with cross-cutting logic lives
//! here: reconstructing the latest verified tree from the registry and
//! store (`pull`), merging updates and staging a draft (`add`),
//! anchoring the staged version (`commit`), inspecting state (`status`,
//! `log`), standalone signature auditing (`verify`), and the explicit
//! staged-draft reset (`discard_staged`).
//!
//! ## Design
//!
//! - No global mutable state. The staging slot is an explicit
//!   [`StagingArea`] value passed to every mutating operation; the
//!   on-disk [`Workspace`] loads and persists it around engine calls.
//! - The engine is generic over the [`ContentStore`] and [`Registry`]
//!   contracts and holds the workspace configuration plus the signing
//!   key. It caches nothing across operations.
//! - Integrity failures (`HashMismatch`, `InvalidSignature`) abort the
//!   operation. A partially verified history is never returned.

pub mod config;
pub mod engine;
pub mod error;
pub mod staging;
pub mod workspace;

pub use config::{LicenseChoice, WorkspaceConfig};
pub use engine::{AssetSource, CommitOutcome, LogEntry, PulledTree, VersioningEngine};
pub use error::EngineError;
pub use staging::{StagedDraft, StagingArea};
pub use workspace::Workspace;
