mod adapter;
mod docstore;
mod error;
mod handle;
mod hash_embedder;
mod in_memory;
mod indexer;
mod normalize;
mod splitter;
mod strategies;
mod strategy;

pub use adapter::{VectorStoreAdapter, DEFAULT_TOP_K};
pub use docstore::{InMemoryByteStore, InMemoryDocStore};
pub use error::{RetrievalError, RetrievalResult};
pub use handle::{DocumentRetriever, RetrieverHandle};
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use indexer::Indexer;
pub use normalize::{normalize_documents, normalize_results, RetrievedDocument};
pub use splitter::TextSplitter;
pub use strategies::{
    AttributeInfo, ContextualCompressionRetriever, MultiQueryRetriever, MultiVectorRetriever,
    ParentDocumentRetriever, ScoreThresholdConfig, ScoreThresholdRetriever, SelfQueryRetriever,
    TimeWeightedRetriever, DEFAULT_ID_KEY,
};
pub use strategy::{RetrieverFactory, StrategyKind};
