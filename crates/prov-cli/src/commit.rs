//! The `commit` subcommand: anchor the staged version.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use prov_core::{Action, ActionResult, CommitOverlay};

use crate::context;

/// Arguments for `prov commit`.
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Provenance action tag.
    #[arg(long)]
    pub action: Option<String>,

    /// Provenance outcome tag.
    #[arg(long)]
    pub action_result: Option<String>,

    /// Compute and display the would-be commit without anchoring.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(root: &Path, args: CommitArgs) -> Result<()> {
    let ctx = context::open(root)?;
    let overlay = CommitOverlay {
        message: args.message,
        action: args.action.as_deref().map(Action::from),
        action_result: args.action_result.as_deref().map(ActionResult::from),
    };

    let mut staging = ctx.workspace.load_staging()?;
    let outcome = ctx.engine.commit(&mut staging, &overlay, args.dry_run).await?;
    ctx.workspace.save_staging(&staging)?;

    let commit = &outcome.commit;
    if args.dry_run {
        println!("dry run, nothing anchored");
    }
    println!("commit    {}", outcome.commit_cid);
    println!("tree      {}", commit.asset_tree_cid);
    println!("sha256    {}", commit.asset_tree_sha256);
    println!("action    {}", commit.action);
    println!("when      {}", commit.timestamp_created);
    if !commit.abstract_text.is_empty() {
        println!("message   {}", commit.abstract_text);
    }
    if let Some(receipt) = &outcome.receipt {
        println!("anchored  {} at seq {}", receipt.asset_cid, receipt.seq);
    }
    Ok(())
}
