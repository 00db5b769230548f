use std::sync::{Arc, RwLock};

use crate::models::content::ContentDocument;

/// The document the public site renders from.
///
/// Held as an immutable snapshot: readers get a cheap `Arc` clone, and a
/// commit swaps in a whole new value. Drafts never touch it.
pub struct LiveDocument {
    current: RwLock<Arc<ContentDocument>>,
}

impl LiveDocument {
    pub fn new(doc: ContentDocument) -> Self {
        Self {
            current: RwLock::new(Arc::new(doc)),
        }
    }

    pub fn snapshot(&self) -> Arc<ContentDocument> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the live document, returning the one it superseded.
    pub fn replace(&self, doc: ContentDocument) -> Arc<ContentDocument> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, Arc::new(doc))
    }
}
