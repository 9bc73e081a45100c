//! The `status` subcommand: show the staged draft, read-only.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use prov_engine::Workspace;

/// Arguments for `prov status`.
#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(root: &Path, _args: StatusArgs) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let staging = workspace.load_staging()?;

    match staging.current() {
        None => println!("nothing staged"),
        Some(staged) => {
            println!("staged    {}", staged.asset_cid);
            println!("mimetype  {}", staged.tree.mimetype);
            println!("birthtime {}", staged.tree.birthtime);
            println!("author    {}", staged.tree.author);
            println!("license   {}", staged.tree.license);
            println!("action    {}", staged.draft.action);
            if !staged.tree.abstract_text.is_empty() {
                println!("abstract  {}", staged.tree.abstract_text);
            }
        }
    }
    Ok(())
}
