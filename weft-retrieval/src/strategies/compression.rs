use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use weft_core::{ChatModel, LlmRequest, Message};

use crate::{
    DocumentRetriever, RetrievalError, RetrievalResult, RetrievedDocument, VectorStoreAdapter,
};

const NO_OUTPUT: &str = "NO_OUTPUT";

const EXTRACTION_PROMPT: &str = r#"Given the following question and context, extract any part of the context *as is* that is relevant to answer the question. If none of the context is relevant, return NO_OUTPUT.

Remember, do not edit the extracted parts of the context.

Question: {question}

Context:
{context}

Extracted relevant parts:"#;

/// Wraps the base adapter with a model-driven extraction step that
/// compresses each retrieved document down to its query-relevant excerpt.
pub struct ContextualCompressionRetriever {
    model: Arc<dyn ChatModel>,
    adapter: VectorStoreAdapter,
}

impl ContextualCompressionRetriever {
    pub fn new(model: Arc<dyn ChatModel>, adapter: VectorStoreAdapter) -> Self {
        Self { model, adapter }
    }

    /// Ask the model for the query-relevant excerpt of one document.
    /// `None` means the model judged the document irrelevant.
    async fn compress(&self, query: &str, context: &str) -> RetrievalResult<Option<String>> {
        let prompt = EXTRACTION_PROMPT
            .replace("{question}", query)
            .replace("{context}", context);
        let request = LlmRequest::from_messages(vec![Message::user(prompt)]);

        let response = self
            .model
            .invoke(request)
            .await
            .map_err(|err| RetrievalError::Model(err.to_string()))?;

        let excerpt = response.content.trim();
        if excerpt.is_empty() || excerpt == NO_OUTPUT {
            return Ok(None);
        }
        Ok(Some(excerpt.to_string()))
    }
}

#[async_trait]
impl DocumentRetriever for ContextualCompressionRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let results = self.adapter.search(query, self.adapter.top_k(), None).await?;
        debug!(candidates = results.len(), "compressing retrieved documents");

        let mut compressed = Vec::new();
        for result in results {
            if let Some(excerpt) = self.compress(query, &result.document.content).await? {
                compressed.push(RetrievedDocument::new(
                    excerpt,
                    crate::normalize::metadata_value(result.document.metadata),
                ));
            }
        }
        Ok(compressed)
    }
}
