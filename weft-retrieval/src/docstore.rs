use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use weft_core::Document;

/// In-memory key-value store for whole documents, keyed by document id.
/// Backs the parent tier of parent/child chunking.
#[derive(Clone, Default)]
pub struct InMemoryDocStore {
    inner: Arc<RwLock<HashMap<String, Document>>>,
}

impl InMemoryDocStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, doc: Document) {
        self.inner.write().await.insert(doc.id.clone(), doc);
    }

    pub async fn get(&self, id: &str) -> Option<Document> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn get_many(&self, ids: &[String]) -> Vec<Option<Document>> {
        let inner = self.inner.read().await;
        ids.iter().map(|id| inner.get(id).cloned()).collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// In-memory byte store, keyed by document id. Holds raw source bytes for
/// strategies that look up full source content by vector match. Starts
/// empty; population is the caller's concern.
#[derive(Clone, Default)]
pub struct InMemoryByteStore {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, id: impl Into<String>, bytes: Vec<u8>) {
        self.inner.write().await.insert(id.into(), bytes);
    }

    pub async fn get(&self, id: &str) -> Option<Vec<u8>> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
