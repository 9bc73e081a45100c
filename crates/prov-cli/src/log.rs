//! The `log` subcommand: render an asset's anchored history.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use clap::Args;

use prov_core::Cid;

use crate::context;

/// Arguments for `prov log`.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Asset identifier; defaults to the staged asset.
    pub asset_cid: Option<String>,
}

pub async fn run(root: &Path, args: LogArgs) -> Result<()> {
    let ctx = context::open(root)?;

    let asset_cid = match args.asset_cid {
        Some(s) => Cid::new(s).context("invalid asset identifier")?,
        None => {
            let staging = ctx.workspace.load_staging()?;
            match staging.current() {
                Some(staged) => staged.asset_cid.clone(),
                None => bail!("no asset identifier given and nothing staged"),
            }
        }
    };

    let entries = ctx.engine.log(&asset_cid).await?;
    if entries.is_empty() {
        println!("no history for {asset_cid}");
        return Ok(());
    }
    for entry in entries.iter().rev() {
        let commit = &entry.commit;
        println!("commit {} (seq {})", entry.commit_cid, entry.seq);
        println!("  author    {}", commit.author);
        println!("  action    {}", commit.action);
        if let Some(result) = &commit.action_result {
            println!("  result    {result}");
        }
        println!("  when      {}", commit.timestamp_created);
        println!("  tree      {}", commit.asset_tree_cid);
        println!("  signer    {}", commit.asset_tree_signature.claimed_address());
        if !commit.abstract_text.is_empty() {
            println!("  message   {}", commit.abstract_text);
        }
        println!();
    }
    Ok(())
}
