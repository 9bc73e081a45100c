//! # AssetTree
//!
//! The versioned metadata snapshot describing one digital asset. A tree
//! is a value type: updates produce a new tree, the prior version is
//! superseded but never mutated.
//!
//! ## Identity Invariant
//!
//! `asset_cid` is the content identifier of the *original asset bytes*
//! and is the asset's permanent identity. It never changes across
//! versions, and neither do `mimetype` and `birthtime`, which are fixed
//! at first registration. [`TreeUpdate`] structurally cannot touch any of
//! the three.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::digest::{Cid, Sha256Digest};
use crate::error::CanonicalError;
use crate::license::License;
use crate::temporal::Timestamp;

/// A metadata snapshot for one asset version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetTree {
    /// Content identifier of the original asset bytes. Permanent.
    pub asset_cid: Cid,
    /// Media type of the asset bytes. Fixed at first registration.
    pub mimetype: String,
    /// Creation time of the asset. Fixed at first registration.
    pub birthtime: Timestamp,
    /// The asset's author identity.
    pub author: String,
    /// License granted on the asset.
    pub license: License,
    /// Free-text description of the asset.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Optional reference to an external NFT record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_record: Option<Cid>,
    /// Optional reference to an external integrity proof.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_cid: Option<Cid>,
}

impl AssetTree {
    /// Build the first version of a tree for a newly registered asset.
    ///
    /// The description starts empty and the external references unset;
    /// they arrive through later updates.
    pub fn first_registration(
        asset_cid: Cid,
        mimetype: impl Into<String>,
        birthtime: Timestamp,
        author: impl Into<String>,
        license: License,
    ) -> Self {
        Self {
            asset_cid,
            mimetype: mimetype.into(),
            birthtime,
            author: author.into(),
            license,
            abstract_text: String::new(),
            nft_record: None,
            integrity_cid: None,
        }
    }

    /// Produce the next version of this tree with a sparse update applied.
    ///
    /// Only fields present in the update are overwritten; everything else
    /// carries forward. The identity fields are not part of [`TreeUpdate`]
    /// and cannot change here.
    pub fn apply(&self, update: &TreeUpdate) -> Self {
        let mut next = self.clone();
        if let Some(abstract_text) = &update.abstract_text {
            next.abstract_text = abstract_text.clone();
        }
        if let Some(nft_record) = &update.nft_record {
            next.nft_record = Some(nft_record.clone());
        }
        if let Some(integrity_cid) = &update.integrity_cid {
            next.integrity_cid = Some(integrity_cid.clone());
        }
        if let Some(license) = &update.license {
            next.license = license.clone();
        }
        next
    }

    /// Canonical serialization of this tree.
    pub fn canonical(&self) -> Result<CanonicalBytes, CanonicalError> {
        CanonicalBytes::new(self)
    }

    /// Digest of the canonical serialization, the value a commit records
    /// and signs.
    pub fn digest(&self) -> Result<Sha256Digest, CanonicalError> {
        Ok(Sha256Digest::of(&self.canonical()?))
    }
}

/// A sparse set of field updates for the next tree version.
///
/// Absent fields leave the prior value in place. The identity fields
/// (`asset_cid`, `mimetype`, `birthtime`) are deliberately not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeUpdate {
    /// New description text.
    pub abstract_text: Option<String>,
    /// New external NFT record reference.
    pub nft_record: Option<Cid>,
    /// New external integrity proof reference.
    pub integrity_cid: Option<Cid>,
    /// New license value.
    pub license: Option<License>,
}

impl TreeUpdate {
    /// True if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.abstract_text.is_none()
            && self.nft_record.is_none()
            && self.integrity_cid.is_none()
            && self.license.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::LicensePreset;

    fn sample_tree() -> AssetTree {
        AssetTree::first_registration(
            Cid::new("basset1").unwrap(),
            "image/png",
            Timestamp::from_epoch_secs(1_700_000_000).unwrap(),
            "alice",
            License::Preset(LicensePreset::CcBy4),
        )
    }

    #[test]
    fn test_first_registration_defaults() {
        let tree = sample_tree();
        assert_eq!(tree.abstract_text, "");
        assert!(tree.nft_record.is_none());
        assert!(tree.integrity_cid.is_none());
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let tree = sample_tree();
        let update = TreeUpdate {
            abstract_text: Some("a painting".to_string()),
            ..TreeUpdate::default()
        };
        let next = tree.apply(&update);
        assert_eq!(next.abstract_text, "a painting");
        assert_eq!(next.author, tree.author);
        assert_eq!(next.license, tree.license);
        assert_eq!(next.asset_cid, tree.asset_cid);
    }

    #[test]
    fn test_apply_does_not_mutate_prior_version() {
        let tree = sample_tree();
        let update = TreeUpdate {
            nft_record: Some(Cid::new("bnft1").unwrap()),
            ..TreeUpdate::default()
        };
        let next = tree.apply(&update);
        assert!(tree.nft_record.is_none());
        assert_eq!(next.nft_record, Some(Cid::new("bnft1").unwrap()));
    }

    #[test]
    fn test_empty_update_is_identity() {
        let tree = sample_tree();
        assert_eq!(tree.apply(&TreeUpdate::default()), tree);
        assert!(TreeUpdate::default().is_empty());
    }

    #[test]
    fn test_digest_changes_with_content() {
        let tree = sample_tree();
        let update = TreeUpdate {
            abstract_text: Some("changed".to_string()),
            ..TreeUpdate::default()
        };
        let next = tree.apply(&update);
        assert_ne!(tree.digest().unwrap(), next.digest().unwrap());
    }

    #[test]
    fn test_digest_stable_across_serde_roundtrip() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: AssetTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree.digest().unwrap(), back.digest().unwrap());
    }

    #[test]
    fn test_wire_field_name_is_abstract() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"abstract\""));
        assert!(!json.contains("abstract_text"));
    }

    #[test]
    fn test_unset_options_omitted_from_wire() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(!json.contains("nft_record"));
        assert!(!json.contains("integrity_cid"));
    }
}
