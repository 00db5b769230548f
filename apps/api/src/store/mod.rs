//! Remote document stores and the local fallback cache.
//!
//! The remote store holds exactly one record per key: the whole content
//! document. There is no field-level patching; `put` always replaces.

pub mod local_cache;
pub mod memory;
pub mod postgres;
pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::content::ContentDocument;

pub use local_cache::{CacheError, LocalCache};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use s3::S3Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Record is not a valid content document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A remote key-value store for the content document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `Ok(None)` when no record exists under `key`.
    async fn fetch(&self, key: &str) -> Result<Option<ContentDocument>, StoreError>;

    /// Replaces the record under `key` with `doc`.
    async fn put(&self, key: &str, doc: &ContentDocument) -> Result<(), StoreError>;

    /// Short backend name for log lines.
    fn backend(&self) -> &'static str;
}
