use std::sync::Arc;

use async_trait::async_trait;
use weft_core::{ChatModel, Document, LlmRequest, LlmResponse, VectorStore, WeftError};
use weft_retrieval::{
    HashEmbedder, InMemoryVectorStore, Indexer, RetrievalError, RetrieverFactory, StrategyKind,
    VectorStoreAdapter,
};

/// Model serving canned replies for every strategy prompt: a JSON array for
/// query expansion, a structured query for self-query, an excerpt otherwise.
struct RoutingModel;

#[async_trait]
impl ChatModel for RoutingModel {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, WeftError> {
        let prompt = &request.messages[0].content;
        let content = if prompt.contains("alternative queries") {
            r#"["variant one", "variant two"]"#.to_string()
        } else if prompt.contains("structured metadata filter") {
            r#"{"search": "notes", "filter": null}"#.to_string()
        } else {
            "relevant excerpt".to_string()
        };
        Ok(LlmResponse { content })
    }
}

async fn factory() -> RetrieverFactory {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    Indexer::new(embedder.clone(), store.clone())
        .add_documents(vec![
            Document::new("d1", "notes on retrieval"),
            Document::new("d2", "notes on indexing"),
        ])
        .await
        .unwrap();
    let adapter = VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>);
    RetrieverFactory::new(adapter).with_model(Arc::new(RoutingModel))
}

const ALL_KINDS: [StrategyKind; 8] = [
    StrategyKind::ContextualCompression,
    StrategyKind::MultiQuery,
    StrategyKind::ParentDocument,
    StrategyKind::SelfQuery,
    StrategyKind::ScoreThreshold,
    StrategyKind::TimeWeighted,
    StrategyKind::VectorStore,
    StrategyKind::MultiVector,
];

#[tokio::test]
async fn every_strategy_satisfies_the_retrieve_contract() {
    let factory = factory().await;

    for kind in ALL_KINDS {
        let handle = factory.build(kind, "notes on retrieval").await.unwrap();
        assert!(!handle.is_fixed(), "{kind:?} should be a live retriever");

        let docs = handle.retrieve("notes on retrieval").await.unwrap();
        for doc in docs {
            assert!(!doc.content.is_empty(), "{kind:?} returned empty content");
            if let Some(metadata) = doc.metadata {
                assert!(metadata.is_object(), "{kind:?} returned non-mapping metadata");
            }
        }
    }
}

#[tokio::test]
async fn model_strategies_fail_without_a_model() {
    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    let adapter = VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>);
    let factory = RetrieverFactory::new(adapter);

    for kind in ALL_KINDS {
        let result = factory.build(kind, "query").await;
        if kind.requires_model() {
            assert!(matches!(result, Err(RetrievalError::ModelRequired(_))));
        } else {
            assert!(result.is_ok());
        }
    }
}

#[tokio::test]
async fn plain_strategy_matches_adapter_output() {
    let factory = factory().await;
    let handle = factory.build(StrategyKind::VectorStore, "notes").await.unwrap();

    let embedder = Arc::new(HashEmbedder::new(16));
    let store = Arc::new(InMemoryVectorStore::new());
    Indexer::new(embedder.clone(), store.clone())
        .add_documents(vec![
            Document::new("d1", "notes on retrieval"),
            Document::new("d2", "notes on indexing"),
        ])
        .await
        .unwrap();
    let adapter = VectorStoreAdapter::new(embedder, store as Arc<dyn VectorStore>);

    let from_handle = handle.retrieve("notes").await.unwrap();
    let from_adapter = adapter.as_retriever().retrieve("notes").await.unwrap();
    assert_eq!(from_handle, from_adapter);
}

#[test]
fn kinds_round_trip_through_names() {
    for kind in ALL_KINDS {
        assert_eq!(StrategyKind::from_name(kind.as_str()), Some(kind));
    }
    assert_eq!(StrategyKind::from_name("no-such-strategy"), None);
}
