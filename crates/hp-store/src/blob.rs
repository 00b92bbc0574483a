//! Blob storage for persisted baselines.

use crate::StoreResult;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Process-external key/value area. Keys are filesystem-safe signature
/// strings; a missing key is a normal outcome, not a fault.
pub trait BlobStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
}

/// Filesystem blob store rooted at one explicit, injected directory.
///
/// The root is never probed or switched at runtime; callers that want a
/// different location construct a different store.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root_dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    pub fn root_dir(&self) -> &PathBuf {
        &self.root_dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FsBlobStore {
    /// Write via temp-file + rename so concurrent writers of the same key
    /// are last-writer-wins and a reader never observes partial content.
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root_dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root_dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.persist(self.blob_path(key))
            .map_err(|e| std::io::Error::from(e.error))?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.blob_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
