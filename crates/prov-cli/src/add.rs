//! The `add` subcommand: reconstruct, merge updates, stage a draft.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

use anyhow::{Context as _, Result};
use bytes::Bytes;
use clap::Args;
use tracing::debug;

use prov_core::{Cid, License, LicensePreset, Timestamp, TreeUpdate};
use prov_engine::AssetSource;

use crate::context;

/// Arguments for `prov add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path to the asset file.
    #[arg(required_unless_present = "mock", conflicts_with = "mock")]
    pub path: Option<PathBuf>,

    /// Use the fixed mock identity instead of real bytes.
    #[arg(long)]
    pub mock: bool,

    /// Media type of the asset; probed very coarsely if omitted.
    #[arg(long)]
    pub mimetype: Option<String>,

    /// New description for the staged version.
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,

    /// External NFT record reference.
    #[arg(long)]
    pub nft_record: Option<String>,

    /// External integrity proof reference.
    #[arg(long)]
    pub integrity_cid: Option<String>,

    /// License preset overriding the configured one for this version.
    #[arg(long)]
    pub license: Option<String>,
}

pub async fn run(root: &Path, args: AddArgs) -> Result<()> {
    let ctx = context::open(root)?;

    let source = match &args.path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading asset {}", path.display()))?;
            debug!(path = %path.display(), size = bytes.len(), "probed asset file");
            AssetSource::Bytes {
                bytes: Bytes::from(bytes),
                mimetype: args
                    .mimetype
                    .clone()
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                birthtime: probe_birthtime(path),
            }
        }
        None => AssetSource::Mock,
    };

    let update = TreeUpdate {
        abstract_text: args.abstract_text,
        nft_record: args
            .nft_record
            .map(Cid::new)
            .transpose()
            .context("invalid --nft-record")?,
        integrity_cid: args
            .integrity_cid
            .map(Cid::new)
            .transpose()
            .context("invalid --integrity-cid")?,
        license: args
            .license
            .as_deref()
            .map(LicensePreset::from_str)
            .transpose()
            .context("invalid --license")?
            .map(License::Preset),
    };

    let mut staging = ctx.workspace.load_staging()?;
    let replaced = ctx.engine.add(&mut staging, &source, &update).await?;
    ctx.workspace.save_staging(&staging)?;

    if let Some(previous) = replaced {
        println!("replaced staged draft for {}", previous.asset_cid);
    }
    if let Some(staged) = staging.current() {
        println!("staged {} ({})", staged.asset_cid, staged.tree.mimetype);
    }
    Ok(())
}

/// File creation time where the platform records one, falling back to
/// the modification time and finally to now.
fn probe_birthtime(path: &Path) -> Timestamp {
    let when = std::fs::metadata(path)
        .and_then(|m| m.created().or_else(|_| m.modified()))
        .unwrap_or_else(|_| SystemTime::now());
    Timestamp::from_utc(when.into())
}
