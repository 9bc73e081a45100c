//! # Staging Area State Machine
//!
//! A single mutable slot holding at most one in-progress draft:
//!
//! ```text
//! Empty ──add──▶ Staged ──commit (anchored)──▶ Empty
//!   ▲              │  ▲
//!   └──discard─────┘  └──add (replaces) ──┘
//! ```
//!
//! `add` always overwrites the slot, even when a different asset was
//! previously staged: the slot tracks "the current asset", and replacing
//! an unrelated unanchored draft is documented single-slot behavior.
//! Callers that want to distinguish deliberate replacement from lost
//! work use [`StagingArea::discard`] first. `status` and `log` never
//! create or clear the slot.
//!
//! ## Design Decision
//!
//! The two states are carried as `Option<StagedDraft>` with transition
//! methods returning `Result`, not as typestates. There are exactly two
//! states and one invariant (commit requires a staged draft); a typestate
//! pair would push `Empty`/`Staged` into every caller signature without
//! proportional safety benefit.

use serde::{Deserialize, Serialize};

use prov_core::{AssetTree, Cid, CommitDraft};

use crate::error::EngineError;

/// The staged triple: asset identity, next tree version, commit draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagedDraft {
    /// Permanent identity of the staged asset.
    pub asset_cid: Cid,
    /// The tree version awaiting anchor.
    pub tree: AssetTree,
    /// The unsigned commit draft for that version.
    pub draft: CommitDraft,
}

/// The single-slot staging workspace.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StagingArea {
    slot: Option<StagedDraft>,
}

impl StagingArea {
    /// An empty staging area, the state `init` establishes.
    pub fn empty() -> Self {
        Self { slot: None }
    }

    /// Rebuild a staging area from a persisted slot.
    pub fn from_slot(slot: Option<StagedDraft>) -> Self {
        Self { slot }
    }

    /// True if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// The staged draft, if any. Read-only; no transition.
    pub fn current(&self) -> Option<&StagedDraft> {
        self.slot.as_ref()
    }

    /// Stage a draft, returning whatever it replaced.
    ///
    /// Replacement applies even when the previous draft belonged to a
    /// different asset; the slot always tracks the current one.
    pub fn stage(&mut self, draft: StagedDraft) -> Option<StagedDraft> {
        self.slot.replace(draft)
    }

    /// Consume the staged draft for anchoring.
    ///
    /// Fails with [`EngineError::NoStagedAsset`] on an empty slot.
    pub fn take(&mut self) -> Result<StagedDraft, EngineError> {
        self.slot.take().ok_or(EngineError::NoStagedAsset)
    }

    /// Explicitly drop the staged draft, returning it if one existed.
    pub fn discard(&mut self) -> Option<StagedDraft> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_core::{License, LicensePreset, Timestamp};

    fn draft_for(asset: &str) -> StagedDraft {
        let asset_cid = Cid::new(asset).unwrap();
        StagedDraft {
            asset_cid: asset_cid.clone(),
            tree: AssetTree::first_registration(
                asset_cid,
                "image/png",
                Timestamp::from_epoch_secs(1_700_000_000).unwrap(),
                "alice",
                License::Preset(LicensePreset::CcBy4),
            ),
            draft: CommitDraft::new("alice", "alice", "pinning.example"),
        }
    }

    #[test]
    fn test_starts_empty() {
        let staging = StagingArea::empty();
        assert!(staging.is_empty());
        assert!(staging.current().is_none());
    }

    #[test]
    fn test_stage_then_current() {
        let mut staging = StagingArea::empty();
        assert!(staging.stage(draft_for("basset1")).is_none());
        assert_eq!(
            staging.current().unwrap().asset_cid,
            Cid::new("basset1").unwrap()
        );
    }

    #[test]
    fn test_stage_replaces_unrelated_draft() {
        let mut staging = StagingArea::empty();
        staging.stage(draft_for("basset1"));
        let replaced = staging.stage(draft_for("basset2")).unwrap();
        assert_eq!(replaced.asset_cid, Cid::new("basset1").unwrap());
        assert_eq!(
            staging.current().unwrap().asset_cid,
            Cid::new("basset2").unwrap()
        );
    }

    #[test]
    fn test_take_empties_the_slot() {
        let mut staging = StagingArea::empty();
        staging.stage(draft_for("basset1"));
        let taken = staging.take().unwrap();
        assert_eq!(taken.asset_cid, Cid::new("basset1").unwrap());
        assert!(staging.is_empty());
    }

    #[test]
    fn test_take_on_empty_fails_no_staged_asset() {
        let mut staging = StagingArea::empty();
        assert!(matches!(staging.take(), Err(EngineError::NoStagedAsset)));
    }

    #[test]
    fn test_discard_is_explicit_and_idempotent() {
        let mut staging = StagingArea::empty();
        staging.stage(draft_for("basset1"));
        assert!(staging.discard().is_some());
        assert!(staging.discard().is_none());
        assert!(staging.is_empty());
    }
}
