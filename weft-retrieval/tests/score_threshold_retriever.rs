use std::sync::Arc;

use weft_core::{Document, VectorStore};
use weft_retrieval::{
    DocumentRetriever, HashEmbedder, InMemoryVectorStore, Indexer, ScoreThresholdConfig,
    ScoreThresholdRetriever, VectorStoreAdapter,
};

async fn adapter_with_docs(count: usize) -> VectorStoreAdapter {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());

    let docs = (0..count)
        .map(|idx| Document::new(format!("doc{idx}"), format!("document number {idx}")))
        .collect();
    Indexer::new(embedder.clone(), store.clone())
        .add_documents(docs)
        .await
        .unwrap();

    VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>)
}

#[tokio::test]
async fn returns_all_matches_when_fewer_than_cap() {
    let adapter = adapter_with_docs(3).await;
    let retriever = ScoreThresholdRetriever::new(adapter, ScoreThresholdConfig::default());

    let docs = retriever.retrieve("documents").await.unwrap();
    assert_eq!(docs.len(), 3);
}

#[tokio::test]
async fn caps_results_at_max_k() {
    let adapter = adapter_with_docs(9).await;
    let retriever = ScoreThresholdRetriever::new(adapter, ScoreThresholdConfig::default());

    let docs = retriever.retrieve("documents").await.unwrap();
    assert_eq!(docs.len(), 5);
}

#[tokio::test]
async fn empty_store_is_empty_not_error() {
    let adapter = adapter_with_docs(0).await;
    let retriever = ScoreThresholdRetriever::new(adapter, ScoreThresholdConfig::default());

    let docs = retriever.retrieve("documents").await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn threshold_excludes_low_scores() {
    let adapter = adapter_with_docs(4).await;
    // Hash-embedded unrelated texts never reach near-perfect similarity.
    let config = ScoreThresholdConfig {
        min_score: 0.999,
        ..ScoreThresholdConfig::default()
    };
    let retriever = ScoreThresholdRetriever::new(adapter, config);

    let docs = retriever.retrieve("document number 0").await.unwrap();
    assert!(docs.len() <= 1);
}

#[tokio::test]
async fn custom_policy_is_honored() {
    let adapter = adapter_with_docs(6).await;
    let config = ScoreThresholdConfig {
        min_score: 0.0,
        max_k: 2,
        k_increment: 1,
    };
    let retriever = ScoreThresholdRetriever::new(adapter, config);

    let docs = retriever.retrieve("documents").await.unwrap();
    assert_eq!(docs.len(), 2);
}
