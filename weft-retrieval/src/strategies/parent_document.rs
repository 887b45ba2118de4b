use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use weft_core::{Document, Embedding, Value, VectorStore};

use crate::{
    normalize, DocumentRetriever, InMemoryDocStore, InMemoryVectorStore, Indexer, RetrievalResult,
    RetrievedDocument, TextSplitter, VectorStoreAdapter,
};

pub(crate) const PARENT_CHUNK_SIZE: usize = 500;
pub(crate) const CHILD_CHUNK_SIZE: usize = 50;
const PARENT_ID_KEY: &str = "parent_id";

/// Two-tier parent/child chunking retriever.
///
/// Seed documents are split into parent chunks (size 500, no overlap) held
/// in a key-value doc store, and child chunks (size 50, no overlap) indexed
/// into a fresh in-memory vector store. Queries match children; results are
/// the enclosing parents.
///
/// Construction is fetch-then-seed: `seed` retrieves seed documents from
/// the adapter for the current query and ingests them before returning, so
/// the handle is always usable.
pub struct ParentDocumentRetriever {
    embedder: Arc<dyn Embedding>,
    child_index: InMemoryVectorStore,
    parents: InMemoryDocStore,
    child_k: usize,
    parent_k: usize,
}

impl ParentDocumentRetriever {
    pub async fn seed(adapter: &VectorStoreAdapter, query: &str) -> RetrievalResult<Self> {
        let seeds = adapter.relevant_documents(query).await?;
        Self::from_documents(adapter.embedder(), seeds).await
    }

    /// Chunk and index the given documents into fresh stores.
    pub async fn from_documents(
        embedder: Arc<dyn Embedding>,
        seeds: Vec<Document>,
    ) -> RetrievalResult<Self> {
        let parent_splitter = TextSplitter::new(PARENT_CHUNK_SIZE, 0);
        let child_splitter = TextSplitter::new(CHILD_CHUNK_SIZE, 0);

        let parents = InMemoryDocStore::new();
        let child_index = InMemoryVectorStore::new();

        let mut children = Vec::new();
        for seed in &seeds {
            for (parent_idx, parent_text) in parent_splitter.split(&seed.content).iter().enumerate()
            {
                let parent_id = format!("{}:parent:{parent_idx}", seed.id);
                for (child_idx, child_text) in child_splitter.split(parent_text).iter().enumerate()
                {
                    let mut child =
                        Document::new(format!("{parent_id}:child:{child_idx}"), child_text.clone());
                    child
                        .metadata
                        .insert(PARENT_ID_KEY.to_string(), Value::String(parent_id.clone()));
                    children.push(child);
                }
                parents
                    .put(
                        Document::new(parent_id, parent_text.clone())
                            .with_metadata(seed.metadata.clone()),
                    )
                    .await;
            }
        }

        debug!(
            seeds = seeds.len(),
            parents = parents.len().await,
            children = children.len(),
            "seeded parent-document retriever"
        );

        let indexer = Indexer::new(
            Arc::clone(&embedder),
            Arc::new(child_index.clone()) as Arc<dyn VectorStore>,
        );
        indexer.add_documents(children).await?;

        Ok(Self {
            embedder,
            child_index,
            parents,
            child_k: 20,
            parent_k: 5,
        })
    }

    pub fn with_child_k(mut self, child_k: usize) -> Self {
        self.child_k = child_k;
        self
    }

    pub fn with_parent_k(mut self, parent_k: usize) -> Self {
        self.parent_k = parent_k;
        self
    }
}

#[async_trait]
impl DocumentRetriever for ParentDocumentRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let embedding = self.embedder.embed(query).await?;
        let hits = self
            .child_index
            .search(&embedding, self.child_k, None)
            .await?;

        // Child hits map back to distinct parents, best match first.
        let mut seen = HashSet::new();
        let mut parent_ids = Vec::new();
        for hit in &hits {
            let Some(parent_id) = hit.document.metadata.get(PARENT_ID_KEY).and_then(Value::as_str)
            else {
                continue;
            };
            if seen.insert(parent_id.to_string()) {
                parent_ids.push(parent_id.to_string());
            }
            if parent_ids.len() == self.parent_k {
                break;
            }
        }

        let parents: Vec<Document> = self
            .parents
            .get_many(&parent_ids)
            .await
            .into_iter()
            .flatten()
            .collect();
        Ok(normalize::normalize_documents(parents))
    }
}
