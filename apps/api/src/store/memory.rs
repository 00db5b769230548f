use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DocumentStore, StoreError};
use crate::models::content::ContentDocument;

/// In-process store. Backs `STORE_BACKEND=memory` for local runs and stands in
/// for the remote store in tests, where `set_failing(true)` simulates an outage.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, ContentDocument>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_record(key: &str, doc: ContentDocument) -> Self {
        let store = Self::new();
        store.insert(key, doc);
        store
    }

    pub fn insert(&self, key: &str, doc: ContentDocument) {
        self.lock().insert(key.to_string(), doc);
    }

    pub fn get(&self, key: &str) -> Option<ContentDocument> {
        self.lock().get(key).cloned()
    }

    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store is in failing mode".to_string(),
            ));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ContentDocument>> {
        // A poisoned map still holds whole documents; keep serving it.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(&self, key: &str) -> Result<Option<ContentDocument>, StoreError> {
        self.check_available()?;
        Ok(self.get(key))
    }

    async fn put(&self, key: &str, doc: &ContentDocument) -> Result<(), StoreError> {
        self.check_available()?;
        self.insert(key, doc.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
