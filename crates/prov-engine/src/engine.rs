//! # Versioning Engine
//!
//! Orchestrates the full provenance cycle over the store and registry
//! contracts: reconstruct the latest verified tree (`pull`), merge
//! updates and stage the next version (`add`), anchor it (`commit`),
//! inspect state and history (`status`, `log`), audit a signature
//! (`verify`), and reset the slot (`discard_staged`).
//!
//! ## Integrity Policy
//!
//! Reconstruction always recomputes the fetched tree's canonical digest
//! and compares it with the commit's recorded hash; a mismatch aborts
//! with [`EngineError::HashMismatch`]. Signature verification is a
//! separate, explicit operation and is not performed on every pull;
//! the same digest feeds both checks.

use bytes::Bytes;
use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use prov_core::{
    Address, AssetTree, Cid, Commit, CommitDraft, CommitOverlay, Sha256Digest, SignatureEnvelope,
    Timestamp, TreeUpdate,
};
use prov_crypto::{verify_digest, SigningKeyPair};
use prov_registry::{AppendReceipt, Registry, RegistryEntry};
use prov_store::ContentStore;

use crate::config::WorkspaceConfig;
use crate::error::EngineError;
use crate::staging::{StagedDraft, StagingArea};

/// The asset bytes an operation works on, with the intrinsic properties
/// the caller probed at its boundary (media type and file timestamps are
/// inspected outside the engine).
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// Real asset bytes plus probed intrinsic properties.
    Bytes {
        /// The raw asset content.
        bytes: Bytes,
        /// Probed media type.
        mimetype: String,
        /// Probed creation time.
        birthtime: Timestamp,
    },
    /// Testing flows: a fixed placeholder identity, no store access.
    Mock,
}

/// Result of a reconstruction: the tree ready to receive updates, plus
/// the registry history it was derived from (empty on first
/// registration).
#[derive(Debug, Clone)]
pub struct PulledTree {
    /// Freshly created or most recent verified tree.
    pub tree: AssetTree,
    /// The asset's registry entries, newest last.
    pub history: Vec<RegistryEntry>,
}

impl PulledTree {
    /// True if the asset has no anchored history yet.
    pub fn is_first_registration(&self) -> bool {
        self.history.is_empty()
    }
}

/// Result of `commit`: the sealed envelope and, unless this was a dry
/// run, the registry receipt.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// The sealed commit.
    pub commit: Commit,
    /// Identifier the commit's canonical bytes were stored under.
    pub commit_cid: Cid,
    /// The registry acknowledgement; `None` exactly for dry runs.
    pub receipt: Option<AppendReceipt>,
}

/// One line of an asset's anchored history.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Ledger-assigned sequence.
    pub seq: u64,
    /// Identifier of the stored commit.
    pub commit_cid: Cid,
    /// The commit itself, hash-verified against its stored tree.
    pub commit: Commit,
}

/// The engine. Generic over the store and registry contracts; holds the
/// workspace configuration and signing key, caches nothing across
/// operations.
pub struct VersioningEngine<S, R> {
    store: S,
    registry: R,
    config: WorkspaceConfig,
    signer: SigningKeyPair,
}

impl<S: ContentStore, R: Registry> VersioningEngine<S, R> {
    /// Assemble an engine from its collaborators and configuration.
    ///
    /// The signing key is derived from the configured seed here, once;
    /// nothing downstream touches key material.
    pub fn new(store: S, registry: R, config: WorkspaceConfig) -> Result<Self, EngineError> {
        let signer = SigningKeyPair::from_seed_hex(&config.signing_seed)?;
        Ok(Self {
            store,
            registry,
            config,
            signer,
        })
    }

    /// The address this workspace's signatures recover to.
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Reconstruct the asset's current tree.
    ///
    /// Computes the asset identity (storing the bytes unless in mock
    /// mode), queries the registry, and either builds a fresh tree from
    /// intrinsic properties and configured defaults, or fetches and
    /// hash-verifies the most recent anchored version.
    pub async fn pull(&self, source: &AssetSource) -> Result<PulledTree, EngineError> {
        let (asset_cid, mimetype, birthtime) = match source {
            AssetSource::Bytes {
                bytes,
                mimetype,
                birthtime,
            } => {
                let cid = self.store.put(bytes.clone()).await?;
                (cid, mimetype.clone(), *birthtime)
            }
            // Mock mode never touches the content store.
            AssetSource::Mock => (
                Cid::mock(),
                "application/octet-stream".to_string(),
                Timestamp::now(),
            ),
        };

        let history = self.registry.query(&asset_cid).await?;
        let tree = match history.last() {
            None => {
                debug!(%asset_cid, "no history, first registration");
                AssetTree::first_registration(
                    asset_cid,
                    mimetype,
                    birthtime,
                    self.config.author.clone(),
                    self.config.resolve_license()?,
                )
            }
            Some(latest) => {
                let (commit, tree) = self.fetch_verified(latest).await?;
                debug!(
                    %asset_cid,
                    seq = latest.seq,
                    tree_cid = %commit.asset_tree_cid,
                    "reconstructed latest verified tree"
                );
                tree
            }
        };
        Ok(PulledTree { tree, history })
    }

    /// Stage the next version of an asset.
    ///
    /// Runs reconstruction, applies the sparse update, re-resolves the
    /// configured license (so license drift follows local configuration
    /// rather than history; an explicit license update takes precedence
    /// for this version), and builds a fresh commit draft. Returns the
    /// draft this staging replaced, if any.
    pub async fn add(
        &self,
        staging: &mut StagingArea,
        source: &AssetSource,
        update: &TreeUpdate,
    ) -> Result<Option<StagedDraft>, EngineError> {
        let pulled = self.pull(source).await?;
        let mut tree = pulled.tree.apply(update);
        if update.license.is_none() {
            tree.license = self.config.resolve_license()?;
        }

        let draft = CommitDraft::new(
            &self.config.author,
            &self.config.committer,
            &self.config.provider,
        );
        let staged = StagedDraft {
            asset_cid: tree.asset_cid.clone(),
            tree,
            draft,
        };
        info!(
            asset = %staged.asset_cid,
            first = pulled.is_first_registration(),
            "staged draft"
        );
        let replaced = staging.stage(staged);
        if let Some(previous) = &replaced {
            warn!(replaced = %previous.asset_cid, "staging replaced an unanchored draft");
        }
        Ok(replaced)
    }

    /// Anchor the staged version, or preview it.
    ///
    /// Overlays explicitly supplied fields onto the draft, stamps the
    /// anchoring time, canonicalizes and hashes the staged tree, stores
    /// tree and sealed commit content-addressed, signs the hash, and
    /// appends to the registry. With `dry_run` the sealed commit is
    /// computed and returned but the registry is never called and the
    /// slot is left untouched; the store writes are idempotent, so the
    /// previewed identifiers match a later real anchor.
    pub async fn commit(
        &self,
        staging: &mut StagingArea,
        overlay: &CommitOverlay,
        dry_run: bool,
    ) -> Result<CommitOutcome, EngineError> {
        let staged = staging.current().ok_or(EngineError::NoStagedAsset)?.clone();
        let draft = staged.draft.overlay(overlay);

        let tree_canonical = staged.tree.canonical()?;
        let tree_sha256 = Sha256Digest::of(&tree_canonical);
        let tree_cid = self
            .store
            .put(Bytes::copy_from_slice(tree_canonical.as_bytes()))
            .await?;
        let envelope = self.signer.sign_digest(&tree_sha256);
        let commit = draft.seal(tree_cid, tree_sha256, envelope, Timestamp::now());

        let commit_canonical = commit.canonical()?;
        let commit_cid = self
            .store
            .put(Bytes::copy_from_slice(commit_canonical.as_bytes()))
            .await?;

        if dry_run {
            debug!(%commit_cid, "dry run, registry untouched, slot unchanged");
            return Ok(CommitOutcome {
                commit,
                commit_cid,
                receipt: None,
            });
        }

        let receipt = self.registry.append(&staged.asset_cid, &commit_cid).await?;
        info!(
            asset = %staged.asset_cid,
            %commit_cid,
            seq = receipt.seq,
            "anchored commit"
        );
        staging.discard();
        Ok(CommitOutcome {
            commit,
            commit_cid,
            receipt: Some(receipt),
        })
    }

    /// The staged draft, if any. Read-only.
    pub fn status<'a>(&self, staging: &'a StagingArea) -> Option<&'a StagedDraft> {
        staging.current()
    }

    /// The asset's anchored history in ledger order, newest last.
    ///
    /// Every entry's commit is fetched and its stored tree re-verified
    /// against the recorded hash; the per-entry fetch chains run
    /// concurrently. Unreachable content or a hash mismatch fails the
    /// whole operation rather than producing a partial history.
    pub async fn log(&self, asset_cid: &Cid) -> Result<Vec<LogEntry>, EngineError> {
        let entries = self.registry.query(asset_cid).await?;
        let verified = try_join_all(entries.iter().map(|e| self.fetch_verified(e))).await?;
        Ok(entries
            .iter()
            .zip(verified)
            .map(|(entry, (commit, _tree))| LogEntry {
                seq: entry.seq,
                commit_cid: entry.commit_cid.clone(),
                commit,
            })
            .collect())
    }

    /// Audit a signature found in history.
    ///
    /// Direct passthrough to the signing service; usable without any
    /// staged asset or reconstruction.
    pub fn verify(
        &self,
        digest: &Sha256Digest,
        envelope: &SignatureEnvelope,
    ) -> Result<Address, EngineError> {
        Ok(verify_digest(digest, envelope)?)
    }

    /// Explicitly drop the staged draft, returning it if one existed.
    pub fn discard_staged(&self, staging: &mut StagingArea) -> Option<StagedDraft> {
        staging.discard()
    }

    /// Fetch one history entry's commit and tree, verifying the tree's
    /// canonical digest against the commit's recorded hash.
    ///
    /// The tree fetch depends on the commit's content (the tree
    /// identifier lives inside the envelope), so the two reads pipeline
    /// rather than race; concurrency across entries happens in [`log`].
    ///
    /// [`log`]: VersioningEngine::log
    async fn fetch_verified(
        &self,
        entry: &RegistryEntry,
    ) -> Result<(Commit, AssetTree), EngineError> {
        let commit_bytes = self.store.get(&entry.commit_cid).await?;
        let commit: Commit = serde_json::from_slice(&commit_bytes)?;

        let tree_bytes = self.store.get(&commit.asset_tree_cid).await?;
        let tree: AssetTree = serde_json::from_slice(&tree_bytes)?;

        let computed = tree.digest()?;
        if computed != commit.asset_tree_sha256 {
            error!(
                commit = %entry.commit_cid,
                recorded = %commit.asset_tree_sha256,
                computed = %computed,
                "stored tree does not match recorded hash"
            );
            return Err(EngineError::HashMismatch {
                recorded: commit.asset_tree_sha256,
                computed,
            });
        }
        Ok((commit, tree))
    }
}
