//! Full workspace flow through the CLI handlers over the filesystem
//! backends: init, add, commit, re-add, discard.

use std::path::PathBuf;

use tempfile::TempDir;

use prov_cli::{add, commit, context, discard, init};
use prov_engine::Workspace;

fn init_workspace(root: &PathBuf) {
    init::run(
        root,
        init::InitArgs {
            author: "alice".to_string(),
            committer: None,
            provider: "pinning.example".to_string(),
            license: "CC-BY-4.0".to_string(),
        },
    )
    .unwrap();
}

fn write_asset(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn add_args(path: Option<PathBuf>, abstract_text: Option<&str>) -> add::AddArgs {
    add::AddArgs {
        path,
        mock: false,
        mimetype: Some("image/png".to_string()),
        abstract_text: abstract_text.map(str::to_string),
        nft_record: None,
        integrity_cid: None,
        license: None,
    }
}

#[tokio::test]
async fn init_add_commit_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".prov");
    init_workspace(&root);

    let asset = write_asset(&dir, "artwork.png", b"png-bytes");
    add::run(&root, add_args(Some(asset.clone()), Some("a painting")))
        .await
        .unwrap();

    let ws = Workspace::open(&root).unwrap();
    let staged = ws.load_staging().unwrap();
    let asset_cid = staged.current().unwrap().asset_cid.clone();
    assert_eq!(staged.current().unwrap().tree.abstract_text, "a painting");

    commit::run(
        &root,
        commit::CommitArgs {
            message: Some("first".to_string()),
            action: None,
            action_result: None,
            dry_run: false,
        },
    )
    .await
    .unwrap();

    // Slot cleared on disk, history visible through the engine.
    assert!(ws.load_staging().unwrap().is_empty());
    let ctx = context::open(&root).unwrap();
    let log = ctx.engine.log(&asset_cid).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].commit.abstract_text, "first");

    // A second add of the same bytes finds and carries the history forward.
    add::run(&root, add_args(Some(asset), None)).await.unwrap();
    let staged = ws.load_staging().unwrap();
    assert_eq!(staged.current().unwrap().tree.abstract_text, "a painting");
}

#[tokio::test]
async fn mock_add_and_discard() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".prov");
    init_workspace(&root);

    add::run(
        &root,
        add::AddArgs {
            path: None,
            mock: true,
            mimetype: None,
            abstract_text: None,
            nft_record: None,
            integrity_cid: None,
            license: None,
        },
    )
    .await
    .unwrap();

    let ws = Workspace::open(&root).unwrap();
    assert!(ws.load_staging().unwrap().current().unwrap().asset_cid.is_mock());

    discard::run(&root, discard::DiscardArgs {}).unwrap();
    assert!(ws.load_staging().unwrap().is_empty());
}

#[tokio::test]
async fn commit_without_staged_asset_fails() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".prov");
    init_workspace(&root);

    let result = commit::run(
        &root,
        commit::CommitArgs {
            message: None,
            action: None,
            action_result: None,
            dry_run: false,
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn uninitialized_workspace_reported_before_anything_else() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".prov");
    let result = add::run(&root, add_args(None, None)).await;
    assert!(result.is_err());
}
