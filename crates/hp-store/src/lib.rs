//! hp-store: design baseline cache and configuration signatures.

pub mod baseline;
pub mod blob;
pub mod signature;

pub use baseline::BaselineStore;
pub use blob::{BlobStore, FsBlobStore};
pub use signature::Signature;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt baseline for signature {signature}: {source}")]
    Corrupt {
        signature: String,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
