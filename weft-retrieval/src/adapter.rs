use std::sync::Arc;

use async_trait::async_trait;
use weft_core::{Document, Embedding, MetadataFilter, SearchResult, VectorStore};

use crate::{normalize, DocumentRetriever, RetrievalResult, RetrievedDocument, RetrieverHandle};

pub const DEFAULT_TOP_K: usize = 4;

/// Adapter over "a store that can return documents relevant to a text
/// query". Wraps any `VectorStore` (persistent or ephemeral) together with
/// the embedder used to encode queries.
///
/// The adapter performs no validation on the store; an empty store yields
/// empty results, never an error.
#[derive(Clone)]
pub struct VectorStoreAdapter {
    embedder: Arc<dyn Embedding>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl VectorStoreAdapter {
    pub fn new(embedder: Arc<dyn Embedding>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn embedder(&self) -> Arc<dyn Embedding> {
        Arc::clone(&self.embedder)
    }

    pub fn store(&self) -> Arc<dyn VectorStore> {
        Arc::clone(&self.store)
    }

    /// Embed the query and run a similarity search against the store.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> RetrievalResult<Vec<SearchResult>> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&embedding, top_k, filter).await?;
        Ok(results)
    }

    /// Documents relevant to the query, scores stripped. Used both for
    /// serving plain retrieval and for seeding ephemeral stores.
    pub async fn relevant_documents(&self, query: &str) -> RetrievalResult<Vec<Document>> {
        let results = self.search(query, self.top_k, None).await?;
        Ok(results.into_iter().map(|result| result.document).collect())
    }

    /// The identity strategy: a live retriever that serves the store's own
    /// search results unmodified.
    pub fn as_retriever(&self) -> RetrieverHandle {
        RetrieverHandle::live(AdapterRetriever {
            adapter: self.clone(),
        })
    }
}

struct AdapterRetriever {
    adapter: VectorStoreAdapter,
}

#[async_trait]
impl DocumentRetriever for AdapterRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let results = self.adapter.search(query, self.adapter.top_k, None).await?;
        Ok(normalize::normalize_results(results))
    }
}
