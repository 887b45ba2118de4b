use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;
use weft_core::Value;

use crate::{
    DocumentRetriever, InMemoryByteStore, RetrievalResult, RetrievedDocument, VectorStoreAdapter,
};

pub const DEFAULT_ID_KEY: &str = "doc_id";

/// Pairs the adapter's vector store with a byte store holding raw source
/// bytes keyed by document id, so a vector match on a derived chunk can be
/// resolved to its full source content.
///
/// The byte store starts empty; populating it is the caller's concern
/// (obtain a shared handle via [`byte_store`](Self::byte_store)).
pub struct MultiVectorRetriever {
    adapter: VectorStoreAdapter,
    byte_store: InMemoryByteStore,
    id_key: String,
}

impl MultiVectorRetriever {
    pub fn new(adapter: VectorStoreAdapter) -> Self {
        Self {
            adapter,
            byte_store: InMemoryByteStore::new(),
            id_key: DEFAULT_ID_KEY.to_string(),
        }
    }

    /// Metadata key that links an indexed chunk to its source id.
    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = id_key.into();
        self
    }

    /// Shared handle to the byte store for out-of-band population.
    pub fn byte_store(&self) -> InMemoryByteStore {
        self.byte_store.clone()
    }
}

#[async_trait]
impl DocumentRetriever for MultiVectorRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let hits = self.adapter.search(query, self.adapter.top_k(), None).await?;

        let mut seen = HashSet::new();
        let mut documents = Vec::new();
        for hit in hits {
            let source_id = hit
                .document
                .metadata
                .get(&self.id_key)
                .and_then(Value::as_str)
                .unwrap_or(hit.document.id.as_str())
                .to_string();
            if !seen.insert(source_id.clone()) {
                continue;
            }
            // Ids with no stored source are skipped, not errors.
            let Some(bytes) = self.byte_store.get(&source_id).await else {
                continue;
            };
            documents.push(RetrievedDocument::new(
                String::from_utf8_lossy(&bytes).into_owned(),
                crate::normalize::metadata_value(hit.document.metadata),
            ));
        }

        debug!(resolved = documents.len(), "multi-vector retrieval");
        Ok(documents)
    }
}
