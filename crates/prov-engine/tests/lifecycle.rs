//! End-to-end engine flows over the in-memory backends: first
//! registration, anchoring, carry-forward, staging discipline, dry runs,
//! mock mode, and integrity failures.

use std::sync::Arc;

use bytes::Bytes;

use prov_core::{
    Action, ActionResult, AssetTree, Cid, CommitDraft, CommitOverlay, License, LicenseBody,
    LicensePreset, Sha256Digest, Timestamp, TreeUpdate, MOCK_CID_LEN,
};
use prov_engine::{
    AssetSource, EngineError, LicenseChoice, StagingArea, VersioningEngine, WorkspaceConfig,
};
use prov_registry::{MemoryRegistry, Registry};
use prov_store::{derive_cid, ContentStore, MemoryStore};

type TestEngine = VersioningEngine<Arc<MemoryStore>, Arc<MemoryRegistry>>;

fn config() -> WorkspaceConfig {
    WorkspaceConfig {
        author: "alice".to_string(),
        committer: "alice".to_string(),
        provider: "pinning.example".to_string(),
        license: LicenseChoice::Preset("CC-BY-4.0".to_string()),
        signing_seed: "42".repeat(32),
    }
}

fn engine_with(
    store: Arc<MemoryStore>,
    registry: Arc<MemoryRegistry>,
    config: WorkspaceConfig,
) -> TestEngine {
    VersioningEngine::new(store, registry, config).expect("engine builds")
}

fn setup() -> (TestEngine, Arc<MemoryStore>, Arc<MemoryRegistry>) {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryRegistry::new());
    let engine = engine_with(store.clone(), registry.clone(), config());
    (engine, store, registry)
}

fn source(bytes: &'static [u8]) -> AssetSource {
    AssetSource::Bytes {
        bytes: Bytes::from_static(bytes),
        mimetype: "image/png".to_string(),
        birthtime: Timestamp::from_epoch_secs(1_700_000_000).unwrap(),
    }
}

fn message(text: &str) -> CommitOverlay {
    CommitOverlay {
        message: Some(text.to_string()),
        ..CommitOverlay::default()
    }
}

#[tokio::test]
async fn first_registration_builds_fresh_tree_with_defaults() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();

    let staged = staging.current().expect("slot staged");
    assert_eq!(staged.asset_cid, derive_cid(b"artwork-1"));
    assert_eq!(staged.tree.asset_cid, derive_cid(b"artwork-1"));
    assert_eq!(staged.tree.abstract_text, "");
    assert_eq!(staged.tree.license, License::Preset(LicensePreset::CcBy4));
    assert_eq!(staged.tree.author, "alice");
    assert_eq!(staged.draft.action, Action::InitialRegistration);
}

#[tokio::test]
async fn commit_anchors_entry_and_empties_slot() {
    let (engine, _store, registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let outcome = engine.commit(&mut staging, &message("first"), false).await.unwrap();

    assert!(staging.is_empty());
    assert_eq!(outcome.commit.abstract_text, "first");
    let receipt = outcome.receipt.expect("real commit has receipt");
    assert_eq!(receipt.commit_cid, outcome.commit_cid);

    let entries = registry.query(&derive_cid(b"artwork-1")).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].commit_cid, outcome.commit_cid);
}

#[tokio::test]
async fn commit_on_empty_slot_fails_no_staged_asset() {
    let (engine, _store, registry) = setup();
    let mut staging = StagingArea::empty();

    let result = engine.commit(&mut staging, &message("nope"), false).await;
    assert!(matches!(result, Err(EngineError::NoStagedAsset)));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn second_commit_without_intervening_add_fails() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    engine.commit(&mut staging, &message("first"), false).await.unwrap();

    let again = engine.commit(&mut staging, &message("again"), false).await;
    assert!(matches!(again, Err(EngineError::NoStagedAsset)));
}

#[tokio::test]
async fn hash_invariant_holds_after_commit() {
    let (engine, store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let outcome = engine.commit(&mut staging, &message("first"), false).await.unwrap();

    let tree_bytes = store.get(&outcome.commit.asset_tree_cid).await.unwrap();
    let tree: AssetTree = serde_json::from_slice(&tree_bytes).unwrap();
    assert_eq!(tree.digest().unwrap(), outcome.commit.asset_tree_sha256);
}

#[tokio::test]
async fn second_add_carries_fields_forward_and_keeps_identity() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    let update = TreeUpdate {
        abstract_text: Some("a painting".to_string()),
        nft_record: Some(Cid::new("bnft1").unwrap()),
        ..TreeUpdate::default()
    };
    engine.add(&mut staging, &source(b"artwork-1"), &update).await.unwrap();
    let first = engine.commit(&mut staging, &message("first"), false).await.unwrap();

    // Re-add the same bytes with no update: prior fields carry forward.
    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let staged = staging.current().unwrap();
    assert_eq!(staged.tree.abstract_text, "a painting");
    assert_eq!(staged.tree.nft_record, Some(Cid::new("bnft1").unwrap()));
    assert_eq!(staged.tree.asset_cid, derive_cid(b"artwork-1"));

    // The next version's tree differs, so its anchored identifier must too,
    // while the asset identity never moves.
    let update2 = TreeUpdate {
        abstract_text: Some("a restored painting".to_string()),
        ..TreeUpdate::default()
    };
    engine.add(&mut staging, &source(b"artwork-1"), &update2).await.unwrap();
    let second = engine.commit(&mut staging, &message("second"), false).await.unwrap();
    assert_ne!(second.commit.asset_tree_cid, first.commit.asset_tree_cid);

    let pulled = engine.pull(&source(b"artwork-1")).await.unwrap();
    assert_eq!(pulled.tree.asset_cid, derive_cid(b"artwork-1"));
    assert_eq!(pulled.tree.abstract_text, "a restored painting");
    assert_eq!(pulled.history.len(), 2);
}

#[tokio::test]
async fn dry_run_never_appends_and_never_clears_slot() {
    let (engine, _store, registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let preview = engine.commit(&mut staging, &message("preview"), true).await.unwrap();

    assert!(preview.receipt.is_none());
    assert!(registry.is_empty());
    assert!(!staging.is_empty());

    // The previewed identifiers match the later real anchor.
    let real = engine.commit(&mut staging, &message("preview"), false).await.unwrap();
    assert_eq!(real.commit.asset_tree_cid, preview.commit.asset_tree_cid);
}

#[tokio::test]
async fn mock_mode_uses_placeholder_and_skips_store() {
    let (engine, store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &AssetSource::Mock, &TreeUpdate::default())
        .await
        .unwrap();

    let staged = staging.current().unwrap();
    assert_eq!(staged.asset_cid.as_str().len(), MOCK_CID_LEN);
    assert!(staged.asset_cid.is_mock());
    assert!(store.is_empty());
}

#[tokio::test]
async fn add_replaces_unrelated_staged_draft() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let replaced = engine
        .add(&mut staging, &source(b"artwork-2"), &TreeUpdate::default())
        .await
        .unwrap();

    assert_eq!(replaced.unwrap().asset_cid, derive_cid(b"artwork-1"));
    assert_eq!(staging.current().unwrap().asset_cid, derive_cid(b"artwork-2"));
}

#[tokio::test]
async fn discard_staged_distinguishes_replace_from_loss() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let discarded = engine.discard_staged(&mut staging);
    assert_eq!(discarded.unwrap().asset_cid, derive_cid(b"artwork-1"));
    assert!(staging.is_empty());
    assert!(engine.discard_staged(&mut staging).is_none());
}

#[tokio::test]
async fn commit_signature_verifies_and_recovers_signer() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    let outcome = engine.commit(&mut staging, &message("first"), false).await.unwrap();

    let recovered = engine
        .verify(&outcome.commit.asset_tree_sha256, &outcome.commit.asset_tree_signature)
        .unwrap();
    assert_eq!(recovered, engine.signer_address());

    // Tampered digest must not verify.
    let other = Sha256Digest::from_bytes([0xAB; 32]);
    assert!(matches!(
        engine.verify(&other, &outcome.commit.asset_tree_signature),
        Err(EngineError::Crypto(_))
    ));
}

#[tokio::test]
async fn log_returns_verified_history_in_ledger_order() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    engine.commit(&mut staging, &message("first"), false).await.unwrap();

    let update = TreeUpdate {
        abstract_text: Some("revised".to_string()),
        ..TreeUpdate::default()
    };
    engine.add(&mut staging, &source(b"artwork-1"), &update).await.unwrap();
    let overlay = CommitOverlay {
        message: Some("second".to_string()),
        action: Some(Action::MetadataUpdate),
        action_result: Some(ActionResult::Success),
    };
    engine.commit(&mut staging, &overlay, false).await.unwrap();

    let log = engine.log(&derive_cid(b"artwork-1")).await.unwrap();
    assert_eq!(log.len(), 2);
    assert!(log[0].seq < log[1].seq);
    assert_eq!(log[0].commit.abstract_text, "first");
    assert_eq!(log[1].commit.abstract_text, "second");
    assert_eq!(log[1].commit.action, Action::MetadataUpdate);
}

#[tokio::test]
async fn forged_hash_pointer_aborts_reconstruction() {
    let (engine, store, registry) = setup();

    // Anchor a commit whose recorded hash does not match the stored tree.
    let tree = AssetTree::first_registration(
        derive_cid(b"artwork-x"),
        "image/png",
        Timestamp::from_epoch_secs(1_700_000_000).unwrap(),
        "mallory",
        License::Preset(LicensePreset::Cc0),
    );
    let tree_cid = store
        .put(Bytes::copy_from_slice(tree.canonical().unwrap().as_bytes()))
        .await
        .unwrap();

    let forged = CommitDraft::new("mallory", "mallory", "pinning.example").seal(
        tree_cid,
        Sha256Digest::from_bytes([0xEE; 32]),
        prov_core::SignatureEnvelope::new([1u8; 32], [2u8; 64]),
        Timestamp::from_epoch_secs(1_700_000_100).unwrap(),
    );
    let commit_cid = store
        .put(Bytes::copy_from_slice(forged.canonical().unwrap().as_bytes()))
        .await
        .unwrap();
    registry.append(&derive_cid(b"artwork-x"), &commit_cid).await.unwrap();

    let result = engine.pull(&source(b"artwork-x")).await;
    assert!(matches!(result, Err(EngineError::HashMismatch { .. })));

    // The same corruption also fails log, never a partial history.
    assert!(matches!(
        engine.log(&derive_cid(b"artwork-x")).await,
        Err(EngineError::HashMismatch { .. })
    ));
}

#[tokio::test]
async fn license_follows_configuration_not_history() {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryRegistry::new());
    let engine = engine_with(store.clone(), registry.clone(), config());
    let mut staging = StagingArea::empty();

    engine
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    engine.commit(&mut staging, &message("first"), false).await.unwrap();

    // Same store and ledger, reconfigured license.
    let mut reconfigured = config();
    reconfigured.license = LicenseChoice::Custom(LicenseBody {
        name: "House Rules".to_string(),
        terms: "ask first".to_string(),
    });
    let engine2 = engine_with(store, registry, reconfigured);

    engine2
        .add(&mut staging, &source(b"artwork-1"), &TreeUpdate::default())
        .await
        .unwrap();
    match &staging.current().unwrap().tree.license {
        License::Custom(body) => assert_eq!(body.name, "House Rules"),
        other => panic!("expected configured custom license, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_license_update_takes_precedence_for_the_version() {
    let (engine, _store, _registry) = setup();
    let mut staging = StagingArea::empty();

    let update = TreeUpdate {
        license: Some(License::Preset(LicensePreset::Cc0)),
        ..TreeUpdate::default()
    };
    engine.add(&mut staging, &source(b"artwork-1"), &update).await.unwrap();
    assert_eq!(
        staging.current().unwrap().tree.license,
        License::Preset(LicensePreset::Cc0)
    );
}
