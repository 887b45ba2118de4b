use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use weft_core::{Document, Embedding, EmbeddingError, VectorStore};
use weft_retrieval::{InMemoryVectorStore, Indexer, VectorStoreAdapter};

/// Embedder returning fixed vectors for known texts and zeros otherwise.
#[derive(Clone)]
struct FixtureEmbedder {
    vectors: Arc<HashMap<String, Vec<f32>>>,
    dimension: usize,
}

impl FixtureEmbedder {
    fn new(entries: Vec<(&str, Vec<f32>)>) -> Self {
        let dimension = entries.first().map(|(_, v)| v.len()).unwrap_or(4);
        let vectors = entries
            .into_iter()
            .map(|(text, vector)| (text.to_string(), vector))
            .collect();
        Self {
            vectors: Arc::new(vectors),
            dimension,
        }
    }
}

#[async_trait]
impl Embedding for FixtureEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dimension]))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

async fn seeded_adapter() -> VectorStoreAdapter {
    let embedder = Arc::new(FixtureEmbedder::new(vec![
        ("rust borrows", vec![1.0, 0.0, 0.0]),
        ("python lists", vec![0.0, 1.0, 0.0]),
        ("go channels", vec![0.0, 0.0, 1.0]),
        ("rust", vec![1.0, 0.0, 0.0]),
    ]));
    let store = Arc::new(InMemoryVectorStore::new());

    let indexer = Indexer::new(embedder.clone(), store.clone());
    indexer
        .add_documents(vec![
            Document::new("d1", "rust borrows"),
            Document::new("d2", "python lists"),
            Document::new("d3", "go channels"),
        ])
        .await
        .unwrap();

    VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>)
}

#[tokio::test]
async fn plain_retriever_is_identity_with_adapter_output() {
    let adapter = seeded_adapter().await;

    let from_adapter = adapter.relevant_documents("rust").await.unwrap();
    let from_handle = adapter.as_retriever().retrieve("rust").await.unwrap();

    assert_eq!(from_adapter.len(), from_handle.len());
    for (doc, retrieved) in from_adapter.iter().zip(&from_handle) {
        assert_eq!(doc.content, retrieved.content);
    }
    assert_eq!(from_handle[0].content, "rust borrows");
}

#[tokio::test]
async fn empty_store_yields_empty_results() {
    let embedder = Arc::new(FixtureEmbedder::new(vec![("anything", vec![1.0, 0.0])]));
    let store = Arc::new(InMemoryVectorStore::new());
    let adapter = VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>);

    let docs = adapter.as_retriever().retrieve("anything").await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn normalized_output_has_content_and_optional_metadata() {
    let adapter = seeded_adapter().await;
    let docs = adapter.as_retriever().retrieve("rust").await.unwrap();

    assert!(!docs.is_empty());
    for doc in docs {
        assert!(!doc.content.is_empty());
        // metadata is a mapping or None, never anything else
        if let Some(metadata) = doc.metadata {
            assert!(metadata.is_object());
        }
    }
}

#[tokio::test]
async fn adapter_respects_top_k() {
    let adapter = seeded_adapter().await.with_top_k(2);
    let docs = adapter.relevant_documents("rust").await.unwrap();
    assert_eq!(docs.len(), 2);
}
