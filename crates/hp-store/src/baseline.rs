//! Design State Store: persisted converged baselines keyed by signature.

use crate::blob::{BlobStore, FsBlobStore};
use crate::signature::Signature;
use crate::{StoreError, StoreResult};
use hp_solver::DesignBaseline;
use std::path::PathBuf;
use tracing::debug;

/// Keyed cache of converged design baselines.
///
/// Baselines are immutable once written: a changed configuration yields a new
/// signature, and existing entries are read, never merged in place.
pub struct BaselineStore {
    blobs: Box<dyn BlobStore>,
}

impl BaselineStore {
    pub fn new(blobs: Box<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Store rooted at an explicit directory on the local filesystem.
    pub fn on_dir(root_dir: PathBuf) -> Self {
        Self::new(Box::new(FsBlobStore::new(root_dir)))
    }

    /// `Ok(None)` for a missing baseline (normal); `Err` when the stored
    /// content exists but cannot be decoded — every off-design cell depends
    /// on a valid anchor, so corruption is fatal.
    pub fn load(&self, signature: &Signature) -> StoreResult<Option<DesignBaseline>> {
        let Some(bytes) = self.blobs.get(signature.as_str())? else {
            return Ok(None);
        };
        let baseline =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                signature: signature.to_string(),
                source,
            })?;
        debug!(%signature, "loaded cached design baseline");
        Ok(Some(baseline))
    }

    pub fn save(&self, signature: &Signature, baseline: &DesignBaseline) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(baseline)?;
        self.blobs.put(signature.as_str(), &bytes)?;
        debug!(%signature, "persisted design baseline");
        Ok(())
    }
}
