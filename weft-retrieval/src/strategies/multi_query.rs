use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use weft_core::{ChatModel, LlmRequest, Message, SearchResult};

use crate::{
    normalize, DocumentRetriever, RetrievalError, RetrievalResult, RetrievedDocument,
    VectorStoreAdapter,
};

const QUERY_EXPANSION_PROMPT: &str = r#"You are an AI assistant helping to improve document retrieval.

Given the following question, generate {num_queries} different search queries that approach the topic from different angles. Each query should:
- Use different terminology or phrasing
- Focus on a distinct aspect of the question
- Help retrieve documents that might not match the original question directly

Original question: {question}

Generate exactly {num_queries} alternative queries as a JSON array of strings. Do not include the original question.

Example format: ["query 1", "query 2", "query 3"]
"#;

/// Expands the query into model-generated paraphrases, retrieves for each
/// concurrently, and merges the results with per-document deduplication.
pub struct MultiQueryRetriever {
    model: Arc<dyn ChatModel>,
    adapter: VectorStoreAdapter,
    num_queries: usize,
    prompt_template: String,
}

impl MultiQueryRetriever {
    pub fn new(model: Arc<dyn ChatModel>, adapter: VectorStoreAdapter) -> Self {
        Self {
            model,
            adapter,
            num_queries: 3,
            prompt_template: QUERY_EXPANSION_PROMPT.to_string(),
        }
    }

    pub fn with_num_queries(mut self, num_queries: usize) -> Self {
        self.num_queries = num_queries;
        self
    }

    /// Custom expansion prompt. Must keep the `{num_queries}` and
    /// `{question}` placeholders.
    pub fn with_prompt(mut self, prompt_template: String) -> Self {
        self.prompt_template = prompt_template;
        self
    }

    async fn generate_queries(&self, query: &str) -> RetrievalResult<Vec<String>> {
        let prompt = self
            .prompt_template
            .replace("{num_queries}", &self.num_queries.to_string())
            .replace("{question}", query);
        let request = LlmRequest::from_messages(vec![Message::user(prompt)]);

        let response = self
            .model
            .invoke(request)
            .await
            .map_err(|err| RetrievalError::Model(err.to_string()))?;

        let variants: Vec<String> = serde_json::from_str(response.content.trim())
            .map_err(|err| RetrievalError::ParseModelOutput(err.to_string()))?;

        let mut queries = vec![query.to_string()];
        queries.extend(variants);
        Ok(queries)
    }

    async fn retrieve_all(&self, queries: &[String]) -> Vec<SearchResult> {
        let futures: Vec<_> = queries
            .iter()
            .map(|query| async move {
                (
                    query.as_str(),
                    self.adapter.search(query, self.adapter.top_k(), None).await,
                )
            })
            .collect();

        let mut merged = Vec::new();
        for (query, result) in futures::future::join_all(futures).await {
            match result {
                Ok(results) => merged.extend(results),
                Err(err) => warn!(query, error = %err, "query variant failed"),
            }
        }
        merged
    }

    fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
        let mut seen = HashSet::new();
        results
            .into_iter()
            .filter(|result| seen.insert(result.document.id.clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentRetriever for MultiQueryRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let queries = self.generate_queries(query).await?;
        debug!(variants = queries.len() - 1, "expanded query");

        let merged = self.retrieve_all(&queries).await;
        let unique = Self::deduplicate(merged);
        Ok(normalize::normalize_results(unique))
    }
}
