//! The `verify` subcommand: audit a signature from history.
//!
//! Deliberately standalone: it needs no workspace, no staged asset, and
//! no reconstruction, only the recorded hash and signature envelope.

use anyhow::{Context as _, Result};
use clap::Args;

use prov_core::{Sha256Digest, SignatureEnvelope};
use prov_crypto::verify_digest;

/// Arguments for `prov verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The recorded tree hash, 64 hex characters.
    pub hash: String,

    /// The signature envelope, 192 hex characters.
    pub signature: String,
}

pub fn run(args: VerifyArgs) -> Result<()> {
    let digest = Sha256Digest::from_hex(&args.hash).context("invalid hash")?;
    let envelope = SignatureEnvelope::from_hex(&args.signature).context("invalid signature")?;
    let signer = verify_digest(&digest, &envelope)?;
    println!("signature valid");
    println!("signer address: {signer}");
    Ok(())
}
