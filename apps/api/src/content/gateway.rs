use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::models::content::ContentDocument;
use crate::store::{DocumentStore, LocalCache, StoreError};

/// Default bound on a single remote fetch or put.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of writing the document back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Remote store accepted the document.
    Synced,
    /// Remote write failed; only the local cache holds this version.
    LocalOnly { reason: String },
}

impl SaveOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SaveOutcome::Synced)
    }
}

/// Loads and saves the one content document.
///
/// Never fails past this boundary: loads degrade to the local cache and then
/// to the seeded default, saves degrade to a local-only copy.
pub struct ContentGateway {
    remote: Arc<dyn DocumentStore>,
    cache: LocalCache,
    key: String,
    remote_timeout: Duration,
}

impl ContentGateway {
    pub fn new(remote: Arc<dyn DocumentStore>, cache: LocalCache, key: impl Into<String>) -> Self {
        Self {
            remote,
            cache,
            key: key.into(),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Runs one remote call, turning an overrun into `StoreError::Unavailable`.
    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.remote_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(StoreError::Unavailable(format!(
                    "{} store did not answer within {}s",
                    self.remote.backend(),
                    self.remote_timeout.as_secs()
                )))
            })
    }

    pub async fn load(&self) -> ContentDocument {
        match self.bounded(self.remote.fetch(&self.key)).await {
            Ok(Some(doc)) => {
                info!(
                    "Loaded content document '{}' from {} store",
                    self.key,
                    self.remote.backend()
                );
                return doc;
            }
            Ok(None) => {
                info!(
                    "No '{}' record in {} store; trying local cache",
                    self.key,
                    self.remote.backend()
                );
            }
            Err(e) => {
                warn!(
                    "Failed to load '{}' from {} store: {e}; trying local cache",
                    self.key,
                    self.remote.backend()
                );
            }
        }

        match self.cache.read() {
            Ok(Some(doc)) => {
                info!("Loaded content document from {}", self.cache.path().display());
                doc
            }
            Ok(None) => {
                info!("No local cache; serving seeded default content");
                ContentDocument::seed()
            }
            Err(e) => {
                warn!(
                    "Ignoring local cache at {}: {e}; serving seeded default content",
                    self.cache.path().display()
                );
                ContentDocument::seed()
            }
        }
    }

    /// Writes `doc` to the remote store, then mirrors it to the local cache
    /// whatever the remote outcome was. A remote call that outlives
    /// `remote_timeout` counts as failed.
    pub async fn save(&self, doc: &ContentDocument) -> SaveOutcome {
        let remote = self.bounded(self.remote.put(&self.key, doc)).await;

        if let Err(e) = self.cache.write(doc) {
            error!(
                "Failed to mirror content document to {}: {e}",
                self.cache.path().display()
            );
        }

        match remote {
            Ok(()) => {
                info!(
                    "Saved content document '{}' to {} store",
                    self.key,
                    self.remote.backend()
                );
                SaveOutcome::Synced
            }
            Err(e) => {
                warn!(
                    "Remote save of '{}' failed: {e}; kept local copy only",
                    self.key
                );
                SaveOutcome::LocalOnly {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use tempfile::{tempdir, TempDir};

    const KEY: &str = "portfolio/owner";

    fn gateway_with(store: Arc<MemoryStore>) -> (ContentGateway, TempDir) {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("cache.json"));
        (ContentGateway::new(store, cache, KEY), dir)
    }

    fn edited() -> ContentDocument {
        let mut doc = ContentDocument::seed();
        doc.personal_info.bio = "Rewritten bio".to_string();
        doc.performance.pop();
        doc
    }

    #[tokio::test]
    async fn test_load_without_remote_or_cache_yields_seed() {
        let (gateway, _dir) = gateway_with(Arc::new(MemoryStore::new()));
        assert_eq!(gateway.load().await, ContentDocument::seed());
    }

    #[tokio::test]
    async fn test_load_returns_remote_record_verbatim() {
        let store = Arc::new(MemoryStore::with_record(KEY, edited()));
        let (gateway, _dir) = gateway_with(store);
        assert_eq!(gateway.load().await, edited());
    }

    #[tokio::test]
    async fn test_saved_document_loads_back_identically() {
        let (gateway, _dir) = gateway_with(Arc::new(MemoryStore::new()));
        assert!(gateway.save(&edited()).await.is_synced());
        assert_eq!(gateway.load().await, edited());
    }

    #[tokio::test]
    async fn test_missing_remote_record_falls_back_to_cache() {
        let (gateway, _dir) = gateway_with(Arc::new(MemoryStore::new()));
        gateway.cache.write(&edited()).unwrap();
        assert_eq!(gateway.load().await, edited());
    }

    #[tokio::test]
    async fn test_remote_error_falls_back_to_cache() {
        let store = Arc::new(MemoryStore::with_record(KEY, ContentDocument::seed()));
        store.set_failing(true);
        let (gateway, _dir) = gateway_with(store);
        gateway.cache.write(&edited()).unwrap();
        assert_eq!(gateway.load().await, edited());
    }

    #[tokio::test]
    async fn test_malformed_cache_falls_through_to_seed() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let (gateway, _dir) = gateway_with(store);
        std::fs::write(gateway.cache.path(), b"][").unwrap();
        assert_eq!(gateway.load().await, ContentDocument::seed());
    }

    #[tokio::test]
    async fn test_failed_remote_save_still_writes_cache() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let (gateway, _dir) = gateway_with(store.clone());

        let outcome = gateway.save(&edited()).await;
        assert!(matches!(outcome, SaveOutcome::LocalOnly { .. }));
        assert_eq!(gateway.cache.read().unwrap(), Some(edited()));
        assert!(store.get(KEY).is_none());
    }

    #[tokio::test]
    async fn test_successful_save_mirrors_to_cache() {
        let store = Arc::new(MemoryStore::new());
        let (gateway, _dir) = gateway_with(store.clone());

        gateway.save(&edited()).await;
        assert_eq!(store.get(KEY), Some(edited()));
        assert_eq!(gateway.cache.read().unwrap(), Some(edited()));
    }

    /// A remote that accepts the connection and never answers.
    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn fetch(&self, _key: &str) -> Result<Option<ContentDocument>, StoreError> {
            std::future::pending().await
        }

        async fn put(&self, _key: &str, _doc: &ContentDocument) -> Result<(), StoreError> {
            std::future::pending().await
        }

        fn backend(&self) -> &'static str {
            "stalled"
        }
    }

    fn stalled_gateway() -> (ContentGateway, TempDir) {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("cache.json"));
        let gateway = ContentGateway::new(Arc::new(StalledStore), cache, KEY)
            .with_remote_timeout(Duration::from_secs(3));
        (gateway, dir)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_remote_save_times_out_to_local_only() {
        let (gateway, _dir) = stalled_gateway();

        let outcome = gateway.save(&edited()).await;
        match outcome {
            SaveOutcome::LocalOnly { reason } => assert!(reason.contains("within 3s"), "{reason}"),
            SaveOutcome::Synced => panic!("stalled store reported as synced"),
        }
        assert_eq!(gateway.cache.read().unwrap(), Some(edited()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_remote_load_falls_back_to_cache() {
        let (gateway, _dir) = stalled_gateway();
        gateway.cache.write(&edited()).unwrap();
        assert_eq!(gateway.load().await, edited());
    }
}
