//! The `discard` subcommand: explicitly drop the staged draft.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use prov_engine::Workspace;

/// Arguments for `prov discard`.
#[derive(Args, Debug)]
pub struct DiscardArgs {}

pub fn run(root: &Path, _args: DiscardArgs) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let mut staging = workspace.load_staging()?;

    match staging.discard() {
        Some(dropped) => {
            workspace.save_staging(&staging)?;
            println!("discarded staged draft for {}", dropped.asset_cid);
        }
        None => println!("nothing staged"),
    }
    Ok(())
}
