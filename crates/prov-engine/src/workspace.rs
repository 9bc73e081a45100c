//! # On-Disk Workspace
//!
//! The local workspace directory (by convention `.prov/`) holds the
//! configuration, the staged slot, the object store root, and the
//! registry journal:
//!
//! ```text
//! .prov/
//!   config.json          workspace configuration
//!   CURRENT              pointer file naming the staged asset cid
//!   staging/<cid>.json   the staged (tree, commit draft) pair
//!   objects/             FsStore root
//!   registry.jsonl       FsRegistry journal
//! ```
//!
//! ## Crash Consistency
//!
//! Draft content is durably written before the `CURRENT` pointer is
//! updated to name it, and the pointer is removed before draft content
//! is deleted. Every file lands via write-to-temp-then-rename. A crash
//! at any point leaves either the old slot state or nothing observably
//! new; the pointer never dangles.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use prov_core::Cid;

use crate::config::WorkspaceConfig;
use crate::error::EngineError;
use crate::staging::{StagedDraft, StagingArea};

const CONFIG_FILE: &str = "config.json";
const POINTER_FILE: &str = "CURRENT";
const STAGING_DIR: &str = "staging";
const OBJECTS_DIR: &str = "objects";
const REGISTRY_FILE: &str = "registry.jsonl";

/// Handle to an initialized workspace directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Initialize a new workspace: create the directory tree and write
    /// the configuration. Fails if one is already initialized here.
    pub fn init(root: impl AsRef<Path>, config: &WorkspaceConfig) -> Result<Self, EngineError> {
        let root = root.as_ref().to_path_buf();
        if root.join(CONFIG_FILE).exists() {
            return Err(EngineError::Config(format!(
                "workspace already initialized at {}",
                root.display()
            )));
        }
        fs::create_dir_all(root.join(STAGING_DIR))?;
        fs::create_dir_all(root.join(OBJECTS_DIR))?;
        let ws = Self { root };
        ws.write_atomic(&ws.root.join(CONFIG_FILE), &serde_json::to_vec_pretty(config)?)?;
        debug!(root = %ws.root.display(), "initialized workspace");
        Ok(ws)
    }

    /// Open an existing workspace. Fails with [`EngineError::ConfigMissing`]
    /// if none is initialized at the path; checked before any network
    /// access happens.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, EngineError> {
        let root = root.as_ref().to_path_buf();
        if !root.join(CONFIG_FILE).exists() {
            return Err(EngineError::ConfigMissing(root));
        }
        Ok(Self { root })
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root directory for the filesystem content store.
    pub fn objects_dir(&self) -> PathBuf {
        self.root.join(OBJECTS_DIR)
    }

    /// Path of the registry journal.
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    /// Load the workspace configuration.
    pub fn config(&self) -> Result<WorkspaceConfig, EngineError> {
        let raw = fs::read(self.root.join(CONFIG_FILE))
            .map_err(|_| EngineError::ConfigMissing(self.root.clone()))?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Load the persisted staging area.
    ///
    /// A pointer naming a missing or mismatched draft file is reported
    /// as corruption rather than silently treated as empty.
    pub fn load_staging(&self) -> Result<StagingArea, EngineError> {
        let pointer = self.root.join(POINTER_FILE);
        let asset_cid = match fs::read_to_string(&pointer) {
            Ok(s) => Cid::new(s.trim())
                .map_err(|e| EngineError::Config(format!("corrupt staging pointer: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StagingArea::empty());
            }
            Err(e) => return Err(EngineError::Io(e)),
        };
        let raw = fs::read(self.draft_path(&asset_cid)).map_err(|e| {
            EngineError::Config(format!(
                "staging pointer names {asset_cid} but its draft is unreadable: {e}"
            ))
        })?;
        let draft: StagedDraft = serde_json::from_slice(&raw)?;
        if draft.asset_cid != asset_cid {
            return Err(EngineError::Config(format!(
                "staged draft identity {} does not match pointer {asset_cid}",
                draft.asset_cid
            )));
        }
        Ok(StagingArea::from_slot(Some(draft)))
    }

    /// Persist the staging area.
    ///
    /// Ordering: when staging, the draft file is written before the
    /// pointer; when clearing, the pointer is removed before the draft
    /// file.
    pub fn save_staging(&self, staging: &StagingArea) -> Result<(), EngineError> {
        let pointer = self.root.join(POINTER_FILE);
        match staging.current() {
            Some(draft) => {
                let draft_path = self.draft_path(&draft.asset_cid);
                self.write_atomic(&draft_path, &serde_json::to_vec_pretty(draft)?)?;
                self.write_atomic(&pointer, draft.asset_cid.as_str().as_bytes())?;
                debug!(asset = %draft.asset_cid, "persisted staged draft");
            }
            None => {
                let previous = match fs::read_to_string(&pointer) {
                    Ok(s) => Cid::new(s.trim()).ok(),
                    Err(_) => None,
                };
                match fs::remove_file(&pointer) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(EngineError::Io(e)),
                }
                if let Some(cid) = previous {
                    match fs::remove_file(self.draft_path(&cid)) {
                        Ok(()) => {}
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => return Err(EngineError::Io(e)),
                    }
                }
                debug!("cleared staged draft");
            }
        }
        Ok(())
    }

    fn draft_path(&self, asset_cid: &Cid) -> PathBuf {
        self.root.join(STAGING_DIR).join(format!("{asset_cid}.json"))
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
