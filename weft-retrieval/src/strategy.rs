use std::sync::Arc;

use tracing::debug;
use weft_core::ChatModel;

use crate::{
    AttributeInfo, ContextualCompressionRetriever, MultiQueryRetriever, MultiVectorRetriever,
    ParentDocumentRetriever, RetrievalError, RetrievalResult, RetrieverHandle,
    ScoreThresholdConfig, ScoreThresholdRetriever, SelfQueryRetriever, TimeWeightedRetriever,
    VectorStoreAdapter,
};

/// Tag for one of the supported retrieval strategies. Callers select a
/// strategy by kind (or by its string name) and get back a uniform
/// [`RetrieverHandle`]; the strategy-specific types stay internal to the
/// dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    ContextualCompression,
    MultiQuery,
    ParentDocument,
    SelfQuery,
    ScoreThreshold,
    TimeWeighted,
    VectorStore,
    MultiVector,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContextualCompression => "contextual-compression",
            Self::MultiQuery => "multi-query",
            Self::ParentDocument => "parent-document",
            Self::SelfQuery => "self-query",
            Self::ScoreThreshold => "score-threshold",
            Self::TimeWeighted => "time-weighted",
            Self::VectorStore => "vector-store",
            Self::MultiVector => "multi-vector",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contextual-compression" => Some(Self::ContextualCompression),
            "multi-query" => Some(Self::MultiQuery),
            "parent-document" => Some(Self::ParentDocument),
            "self-query" => Some(Self::SelfQuery),
            "score-threshold" => Some(Self::ScoreThreshold),
            "time-weighted" => Some(Self::TimeWeighted),
            "vector-store" => Some(Self::VectorStore),
            "multi-vector" => Some(Self::MultiVector),
            _ => None,
        }
    }

    /// Strategies that drive a chat model at construction or query time.
    pub fn requires_model(&self) -> bool {
        matches!(
            self,
            Self::ContextualCompression | Self::MultiQuery | Self::SelfQuery
        )
    }
}

/// Builds retrievers for any [`StrategyKind`] from one adapter plus the
/// optional collaborators some strategies need.
///
/// Strategies with a fetch-then-seed construction (parent-document,
/// self-query, time-weighted) complete their seeding inside `build`; the
/// returned handle is always ready to query.
pub struct RetrieverFactory {
    adapter: VectorStoreAdapter,
    model: Option<Arc<dyn ChatModel>>,
    attributes: Vec<AttributeInfo>,
    score_threshold: ScoreThresholdConfig,
}

impl RetrieverFactory {
    pub fn new(adapter: VectorStoreAdapter) -> Self {
        Self {
            adapter,
            model: None,
            attributes: Vec::new(),
            score_threshold: ScoreThresholdConfig::default(),
        }
    }

    pub fn with_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attribute metadata consumed by the self-query strategy.
    pub fn with_attributes(mut self, attributes: Vec<AttributeInfo>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_score_threshold(mut self, config: ScoreThresholdConfig) -> Self {
        self.score_threshold = config;
        self
    }

    fn model_for(&self, kind: StrategyKind) -> RetrievalResult<Arc<dyn ChatModel>> {
        self.model
            .clone()
            .ok_or(RetrievalError::ModelRequired(kind.as_str()))
    }

    /// Construct a retriever for the given strategy and query text.
    ///
    /// `query` is only read by the fetch-then-seed strategies; the others
    /// ignore it and serve whatever query is passed to the handle later.
    pub async fn build(&self, kind: StrategyKind, query: &str) -> RetrievalResult<RetrieverHandle> {
        debug!(strategy = kind.as_str(), "building retriever");
        match kind {
            StrategyKind::ContextualCompression => Ok(RetrieverHandle::live(
                ContextualCompressionRetriever::new(self.model_for(kind)?, self.adapter.clone()),
            )),
            StrategyKind::MultiQuery => Ok(RetrieverHandle::live(MultiQueryRetriever::new(
                self.model_for(kind)?,
                self.adapter.clone(),
            ))),
            StrategyKind::ParentDocument => Ok(RetrieverHandle::live(
                ParentDocumentRetriever::seed(&self.adapter, query).await?,
            )),
            StrategyKind::SelfQuery => Ok(RetrieverHandle::live(
                SelfQueryRetriever::seed(
                    self.model_for(kind)?,
                    &self.adapter,
                    query,
                    self.attributes.clone(),
                )
                .await?,
            )),
            StrategyKind::ScoreThreshold => Ok(RetrieverHandle::live(ScoreThresholdRetriever::new(
                self.adapter.clone(),
                self.score_threshold,
            ))),
            StrategyKind::TimeWeighted => Ok(RetrieverHandle::live(
                TimeWeightedRetriever::seed(&self.adapter, query).await?,
            )),
            StrategyKind::VectorStore => Ok(self.adapter.as_retriever()),
            StrategyKind::MultiVector => Ok(RetrieverHandle::live(MultiVectorRetriever::new(
                self.adapter.clone(),
            ))),
        }
    }
}
