//! Filesystem content store backend.
//!
//! One file per blob under a 2-level fan-out layout:
//! `{root}/{cid[1..3]}/{cid[3..5]}/{cid}`. Writes go to a temporary file
//! first and are renamed into place, so a crash never leaves a torn blob
//! at a final path. Reads re-derive the identifier and refuse corrupt
//! content.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error};

use prov_core::Cid;

use crate::error::StoreError;
use crate::{derive_cid, ContentStore};

/// Content store persisting blobs as content-addressed files.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at the given directory, creating it if
    /// needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for an identifier. Falls back to a flat layout for
    /// identifiers too short to fan out.
    fn blob_path(&self, cid: &Cid) -> PathBuf {
        let s = cid.as_str();
        if s.len() >= 5 {
            self.root.join(&s[1..3]).join(&s[3..5]).join(s)
        } else {
            self.root.join(s)
        }
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn put(&self, data: Bytes) -> Result<Cid, StoreError> {
        let cid = derive_cid(&data);
        let path = self.blob_path(&cid);
        if tokio::fs::try_exists(&path).await? {
            debug!(%cid, "blob already present");
            return Ok(cid);
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Atomic write: temp file in the same directory, then rename.
        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!(%cid, path = %path.display(), size = data.len(), "stored blob to file");
        Ok(cid)
    }

    async fn get(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        let path = self.blob_path(cid);
        match tokio::fs::read(&path).await {
            Ok(data) => {
                // Verify-on-read: corrupt content is an error, never a payload.
                let actual = derive_cid(&data);
                if actual != *cid {
                    error!(expected = %cid, %actual, "blob corruption detected on read");
                    return Err(StoreError::Corrupt {
                        expected: cid.clone(),
                        actual,
                    });
                }
                Ok(Bytes::from(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(cid.clone()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn contains(&self, cid: &Cid) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.blob_path(cid)).await?)
    }
}
