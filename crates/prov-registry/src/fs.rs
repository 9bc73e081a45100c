//! File-journal registry backend.
//!
//! An append-only JSON-lines file, one record per anchored entry.
//! Appends are serialized behind a mutex, written in append mode and
//! fsynced before the receipt is returned, so an acknowledged entry
//! survives a crash. Sequence numbers continue from the highest record
//! found when the journal is opened.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use prov_core::Cid;

use crate::error::RegistryError;
use crate::{AppendReceipt, Registry, RegistryEntry};

/// One line of the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JournalRecord {
    asset_cid: Cid,
    commit_cid: Cid,
    seq: u64,
}

/// Registry persisted as a local append-only journal.
pub struct FsRegistry {
    path: PathBuf,
    state: Mutex<u64>,
}

impl FsRegistry {
    /// Open (or create) a journal at the given path.
    ///
    /// Scans existing records once to resume the sequence counter.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let next_seq = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let mut max_seq = None;
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    let record: JournalRecord = serde_json::from_str(line)
                        .map_err(|e| RegistryError::Corrupt(format!("bad journal line: {e}")))?;
                    max_seq = Some(max_seq.map_or(record.seq, |m: u64| m.max(record.seq)));
                }
                max_seq.map_or(0, |m| m + 1)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(RegistryError::Io(e)),
        };
        Ok(Self {
            path,
            state: Mutex::new(next_seq),
        })
    }

    /// The journal's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<JournalRecord>, RegistryError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RegistryError::Io(e)),
        };
        contents
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| RegistryError::Corrupt(format!("bad journal line: {e}")))
            })
            .collect()
    }
}

#[async_trait]
impl Registry for FsRegistry {
    async fn append(
        &self,
        asset_cid: &Cid,
        commit_cid: &Cid,
    ) -> Result<AppendReceipt, RegistryError> {
        let mut next_seq = self.state.lock().await;
        let seq = *next_seq;
        let record = JournalRecord {
            asset_cid: asset_cid.clone(),
            commit_cid: commit_cid.clone(),
            seq,
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| RegistryError::Rejected(format!("unserializable record: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.sync_all()?;
        *next_seq = seq + 1;

        debug!(%asset_cid, %commit_cid, seq, path = %self.path.display(), "journal append");
        Ok(AppendReceipt {
            asset_cid: asset_cid.clone(),
            commit_cid: commit_cid.clone(),
            seq,
        })
    }

    async fn query(&self, asset_cid: &Cid) -> Result<Vec<RegistryEntry>, RegistryError> {
        let records = self.read_records()?;
        Ok(records
            .into_iter()
            .filter(|r| r.asset_cid == *asset_cid)
            .map(|r| RegistryEntry {
                commit_cid: r.commit_cid,
                seq: r.seq,
            })
            .collect())
    }
}
