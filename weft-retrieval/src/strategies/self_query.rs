use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_core::{ChatModel, Embedding, LlmRequest, Message, MetadataFilter, VectorStore};

use crate::{
    normalize, DocumentRetriever, InMemoryVectorStore, Indexer, RetrievalError, RetrievalResult,
    RetrievedDocument, VectorStoreAdapter,
};

/// Static description of one filterable metadata field, used by the model
/// to translate natural-language constraints into structured filters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    pub data_type: String,
    pub description: String,
}

impl AttributeInfo {
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: description.into(),
        }
    }
}

const TRANSLATION_PROMPT: &str = r#"You translate a natural-language question into a search string and a structured metadata filter.

The documents carry the following metadata attributes:
{attributes}

Respond with a single JSON object of the form:
{"search": "<text to search for>", "filter": <filter or null>}

A filter is one of:
  {"Eq": ["<attribute>", <value>]}
  {"In": ["<attribute>", [<value>, ...]]}
  {"Range": {"key": "<attribute>", "min": <value or null>, "max": <value or null>}}
  {"All": [<filter>, ...]}
  {"Any": [<filter>, ...]}

Use null for the filter when the question has no metadata constraint. Respond with the JSON object only.

Question: {question}"#;

#[derive(Debug, Deserialize)]
struct StructuredQuery {
    search: String,
    #[serde(default)]
    filter: Option<MetadataFilter>,
}

/// Self-querying retriever.
///
/// Construction is fetch-then-reindex: documents retrieved from the adapter
/// for the current query are ingested into a fresh in-memory store before
/// the retriever is returned. Queries translate the natural-language input
/// into a structured filter via the model and run it against that store.
pub struct SelfQueryRetriever {
    model: Arc<dyn ChatModel>,
    embedder: Arc<dyn Embedding>,
    index: InMemoryVectorStore,
    attributes: Vec<AttributeInfo>,
    top_k: usize,
}

impl SelfQueryRetriever {
    pub async fn seed(
        model: Arc<dyn ChatModel>,
        adapter: &VectorStoreAdapter,
        query: &str,
        attributes: Vec<AttributeInfo>,
    ) -> RetrievalResult<Self> {
        let docs = adapter.relevant_documents(query).await?;
        debug!(docs = docs.len(), "reindexing documents for self-query");

        let index = InMemoryVectorStore::new();
        let embedder = adapter.embedder();
        Indexer::new(
            Arc::clone(&embedder),
            Arc::new(index.clone()) as Arc<dyn VectorStore>,
        )
        .add_documents(docs)
        .await?;

        Ok(Self {
            model,
            embedder,
            index,
            attributes,
            top_k: adapter.top_k(),
        })
    }

    async fn translate(&self, query: &str) -> RetrievalResult<StructuredQuery> {
        let attributes: String = self
            .attributes
            .iter()
            .map(|attr| format!("- {} ({}): {}\n", attr.name, attr.data_type, attr.description))
            .collect();
        let prompt = TRANSLATION_PROMPT
            .replace("{attributes}", attributes.trim_end())
            .replace("{question}", query);
        let request = LlmRequest::from_messages(vec![Message::user(prompt)]);

        let response = self
            .model
            .invoke(request)
            .await
            .map_err(|err| RetrievalError::Model(err.to_string()))?;

        serde_json::from_str(response.content.trim())
            .map_err(|err| RetrievalError::ParseModelOutput(err.to_string()))
    }
}

#[async_trait]
impl DocumentRetriever for SelfQueryRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let structured = self.translate(query).await?;
        debug!(filter = ?structured.filter, "translated self-query");

        let search_text = if structured.search.is_empty() {
            query
        } else {
            &structured.search
        };
        let embedding = self.embedder.embed(search_text).await?;
        let hits = self
            .index
            .search(&embedding, self.top_k, structured.filter.as_ref())
            .await?;
        Ok(normalize::normalize_results(hits))
    }
}
