//! # prov CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

/// Provenance versioning for digital assets.
///
/// Tracks an asset's metadata as a chain of signed, content-addressed
/// snapshots anchored to an append-only registry.
#[derive(Parser, Debug)]
#[command(name = "prov", version, about)]
struct Cli {
    /// Workspace directory.
    #[arg(long, global = true, default_value = ".prov")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create a workspace with a fresh signing key.
    Init(prov_cli::init::InitArgs),
    /// Reconstruct, merge updates, and stage a draft.
    Add(prov_cli::add::AddArgs),
    /// Anchor the staged version to the registry.
    Commit(prov_cli::commit::CommitArgs),
    /// Show the staged draft.
    Status(prov_cli::status::StatusArgs),
    /// Show an asset's anchored history.
    Log(prov_cli::log::LogArgs),
    /// Audit a recorded hash and signature.
    Verify(prov_cli::verify::VerifyArgs),
    /// Drop the staged draft.
    Discard(prov_cli::discard::DiscardArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => prov_cli::init::run(&cli.workspace, args),
        Commands::Add(args) => prov_cli::add::run(&cli.workspace, args).await,
        Commands::Commit(args) => prov_cli::commit::run(&cli.workspace, args).await,
        Commands::Status(args) => prov_cli::status::run(&cli.workspace, args),
        Commands::Log(args) => prov_cli::log::run(&cli.workspace, args).await,
        Commands::Verify(args) => prov_cli::verify::run(args),
        Commands::Discard(args) => prov_cli::discard::run(&cli.workspace, args),
    }
}
