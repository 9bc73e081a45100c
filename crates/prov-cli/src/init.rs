//! The `init` subcommand: create a workspace with a fresh signing key.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use prov_crypto::SigningKeyPair;
use prov_engine::{LicenseChoice, Workspace, WorkspaceConfig};

/// Arguments for `prov init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Identity recorded as the asset author.
    #[arg(long)]
    pub author: String,

    /// Identity recorded as the committer; defaults to the author.
    #[arg(long)]
    pub committer: Option<String>,

    /// Hosting provider identity.
    #[arg(long, default_value = "local")]
    pub provider: String,

    /// License preset name for new versions.
    #[arg(long, default_value = "CC-BY-4.0")]
    pub license: String,
}

pub fn run(root: &Path, args: InitArgs) -> Result<()> {
    let keypair = SigningKeyPair::generate();
    let config = WorkspaceConfig {
        committer: args.committer.unwrap_or_else(|| args.author.clone()),
        author: args.author,
        provider: args.provider,
        license: LicenseChoice::Preset(args.license),
        signing_seed: keypair.seed_hex(),
    };
    // Surface a bad preset name now, not on the first add.
    config.resolve_license()?;

    Workspace::init(root, &config)?;
    println!("initialized workspace at {}", root.display());
    println!("signer address: {}", keypair.address());
    Ok(())
}
