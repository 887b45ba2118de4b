use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use weft_core::{Document, Embedding};

use crate::in_memory::cosine_similarity;
use crate::{
    normalize, DocumentRetriever, RetrievalResult, RetrievedDocument, VectorStoreAdapter,
};

const DEFAULT_SEARCH_WIDTH: usize = 2;
const DEFAULT_DECAY_RATE: f64 = 0.01;

struct MemoryRecord {
    document: Document,
    embedding: Vec<f32>,
    last_accessed: DateTime<Utc>,
}

/// Scores candidates by similarity plus recency.
///
/// Construction is fetch-then-seed: one retrieval pass against the adapter
/// populates a fresh in-memory stream before the retriever is returned.
/// Each record contributes `similarity + (1 - decay_rate)^hours_since_last_
/// access`; returned records have their access time refreshed.
pub struct TimeWeightedRetriever {
    embedder: Arc<dyn Embedding>,
    stream: RwLock<Vec<MemoryRecord>>,
    search_width: usize,
    decay_rate: f64,
}

impl TimeWeightedRetriever {
    pub async fn seed(adapter: &VectorStoreAdapter, query: &str) -> RetrievalResult<Self> {
        let docs = adapter.relevant_documents(query).await?;
        let embedder = adapter.embedder();

        let texts: Vec<String> = docs.iter().map(|doc| doc.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        let now = Utc::now();
        let stream = docs
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| MemoryRecord {
                document,
                embedding,
                last_accessed: now,
            })
            .collect();

        Ok(Self {
            embedder,
            stream: RwLock::new(stream),
            search_width: DEFAULT_SEARCH_WIDTH,
            decay_rate: DEFAULT_DECAY_RATE,
        })
    }

    pub fn with_search_width(mut self, search_width: usize) -> Self {
        self.search_width = search_width;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    fn combined_score(&self, similarity: f32, last_accessed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let hours = (now - last_accessed).num_seconds().max(0) as f64 / 3600.0;
        let recency = (1.0 - self.decay_rate).powf(hours);
        f64::from(similarity) + recency
    }
}

#[async_trait]
impl DocumentRetriever for TimeWeightedRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let embedding = self.embedder.embed(query).await?;
        let now = Utc::now();

        let mut stream = self.stream.write().await;
        let mut scored: Vec<(usize, f64)> = stream
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let similarity = cosine_similarity(&embedding, &record.embedding);
                let mut score = self.combined_score(similarity, record.last_accessed, now);
                if score.is_nan() {
                    score = f64::NEG_INFINITY;
                }
                (idx, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(self.search_width);
        debug!(returned = scored.len(), "time-weighted retrieval");

        let mut documents = Vec::with_capacity(scored.len());
        for (idx, _) in scored {
            stream[idx].last_accessed = now;
            documents.push(stream[idx].document.clone());
        }
        Ok(normalize::normalize_documents(documents))
    }
}
