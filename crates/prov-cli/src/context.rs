//! Shared handler plumbing: open the workspace and assemble the engine
//! over the bundled filesystem backends.

use std::path::Path;

use anyhow::Result;

use prov_engine::{VersioningEngine, Workspace};
use prov_registry::FsRegistry;
use prov_store::FsStore;

/// The engine as the CLI wires it: filesystem store and journal under
/// the workspace directory.
pub type CliEngine = VersioningEngine<FsStore, FsRegistry>;

/// An opened workspace and its engine.
pub struct Context {
    pub workspace: Workspace,
    pub engine: CliEngine,
}

/// Open an initialized workspace and build the engine.
pub fn open(root: &Path) -> Result<Context> {
    let workspace = Workspace::open(root)?;
    let config = workspace.config()?;
    let store = FsStore::new(workspace.objects_dir())?;
    let registry = FsRegistry::open(workspace.registry_path())?;
    let engine = VersioningEngine::new(store, registry, config)?;
    Ok(Context { workspace, engine })
}
