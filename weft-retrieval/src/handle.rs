use std::sync::Arc;

use async_trait::async_trait;

use crate::{RetrievalResult, RetrievedDocument};

/// Capability every retrieval strategy exposes: map a text query to a
/// sequence of normalized documents. Strategies differ only in how the
/// documents are produced.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>>;
}

/// A retriever handed to callers.
///
/// `Live` fetches documents per query through a backing strategy. `Fixed`
/// wraps an already-computed result set (e.g. a remote response) and returns
/// it for every query.
#[derive(Clone)]
pub enum RetrieverHandle {
    Live(Arc<dyn DocumentRetriever>),
    Fixed(Vec<RetrievedDocument>),
}

impl std::fmt::Debug for RetrieverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live(_) => f.debug_tuple("Live").finish(),
            Self::Fixed(documents) => f.debug_tuple("Fixed").field(documents).finish(),
        }
    }
}

impl RetrieverHandle {
    pub fn live(retriever: impl DocumentRetriever + 'static) -> Self {
        Self::Live(Arc::new(retriever))
    }

    pub fn fixed(documents: Vec<RetrievedDocument>) -> Self {
        Self::Fixed(documents)
    }

    /// True when the document set was computed ahead of time.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        match self {
            Self::Live(retriever) => retriever.retrieve(query).await,
            Self::Fixed(documents) => Ok(documents.clone()),
        }
    }
}
