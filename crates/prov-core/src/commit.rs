//! # Commit Envelopes
//!
//! A `Commit` anchors one `AssetTree` version into history: it names the
//! stored tree, records the tree's hash at signing time, and carries the
//! signature over that hash.
//!
//! Drafts and anchored commits are separate types. A [`CommitDraft`] is
//! built when an asset is staged and holds only the fields known at that
//! point; the hash, signature, tree identifier and timestamp exist only
//! on a sealed [`Commit`]. The type system rules out a half-anchored
//! record: there is no way to construct a `Commit` without all of them.
//!
//! ## Integrity Invariants
//!
//! - `asset_tree_sha256` equals the digest of the canonical bytes stored
//!   at `asset_tree_cid`.
//! - `asset_tree_signature` verifies against `asset_tree_sha256` and
//!   recovers to a signer address the caller trusts as `author`.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionResult};
use crate::canonical::CanonicalBytes;
use crate::digest::{Cid, Sha256Digest};
use crate::error::CanonicalError;
use crate::signature::SignatureEnvelope;
use crate::temporal::Timestamp;

/// An unsigned, unanchored commit in the staging slot.
///
/// Carries the provisional identities and tags chosen at `add` time.
/// Completed lazily: the hash and signature require the finalized tree,
/// which only exists once anchoring begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitDraft {
    /// Identity of the asset's author.
    pub author: String,
    /// Identity performing the anchoring.
    pub committer: String,
    /// Identity of the hosting provider.
    pub provider: String,
    /// Provenance tag for the pending version.
    pub action: Action,
    /// Outcome tag, if one is recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_result: Option<ActionResult>,
    /// Commit message.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl CommitDraft {
    /// A fresh draft with configured identities and the default action.
    pub fn new(
        author: impl Into<String>,
        committer: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            committer: committer.into(),
            provider: provider.into(),
            action: Action::InitialRegistration,
            action_result: None,
            abstract_text: String::new(),
        }
    }

    /// Apply an overlay of explicitly supplied fields, leaving the rest.
    pub fn overlay(&self, overlay: &CommitOverlay) -> Self {
        let mut next = self.clone();
        if let Some(message) = &overlay.message {
            next.abstract_text = message.clone();
        }
        if let Some(action) = &overlay.action {
            next.action = action.clone();
        }
        if let Some(action_result) = &overlay.action_result {
            next.action_result = Some(action_result.clone());
        }
        next
    }

    /// Seal the draft into an anchored commit.
    ///
    /// Caller supplies the stored tree's identifier, its recorded digest,
    /// the signature over that digest, and the anchoring time.
    pub fn seal(
        self,
        asset_tree_cid: Cid,
        asset_tree_sha256: Sha256Digest,
        asset_tree_signature: SignatureEnvelope,
        timestamp_created: Timestamp,
    ) -> Commit {
        Commit {
            asset_tree_cid,
            asset_tree_sha256,
            asset_tree_signature,
            author: self.author,
            committer: self.committer,
            provider: self.provider,
            action: self.action,
            action_result: self.action_result,
            abstract_text: self.abstract_text,
            timestamp_created,
        }
    }
}

/// Fields a caller may supply explicitly at commit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOverlay {
    /// Commit message, replacing the draft's.
    pub message: Option<String>,
    /// Provenance tag, replacing the draft's.
    pub action: Option<Action>,
    /// Outcome tag, replacing the draft's.
    pub action_result: Option<ActionResult>,
}

/// A signed envelope anchoring one tree version into history.
///
/// Stored content-addressed; the registry references it by the identifier
/// its canonical bytes hash to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    /// Identifier of the stored tree this commit anchors. Changes every
    /// version.
    pub asset_tree_cid: Cid,
    /// Digest of the tree's canonical bytes at signing time.
    pub asset_tree_sha256: Sha256Digest,
    /// Signature over `asset_tree_sha256`.
    pub asset_tree_signature: SignatureEnvelope,
    /// Identity of the asset's author.
    pub author: String,
    /// Identity that performed the anchoring.
    pub committer: String,
    /// Identity of the hosting provider.
    pub provider: String,
    /// Provenance tag for this version.
    pub action: Action,
    /// Outcome tag, if one was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_result: Option<ActionResult>,
    /// Commit message.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Anchoring time. Display and tie-break only; ledger order is
    /// authoritative.
    pub timestamp_created: Timestamp,
}

impl Commit {
    /// Canonical serialization of this commit, the bytes the store
    /// addresses it by.
    pub fn canonical(&self) -> Result<CanonicalBytes, CanonicalError> {
        CanonicalBytes::new(self)
    }
}
