use async_trait::async_trait;
use tracing::debug;

use crate::{
    normalize, DocumentRetriever, RetrievalResult, RetrievedDocument, VectorStoreAdapter,
};

/// Policy surface for score-thresholded retrieval: the accept threshold,
/// the result cap, and the candidate-pool growth step.
#[derive(Clone, Copy, Debug)]
pub struct ScoreThresholdConfig {
    pub min_score: f32,
    pub max_k: usize,
    pub k_increment: usize,
}

impl Default for ScoreThresholdConfig {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_k: 5,
            k_increment: 2,
        }
    }
}

/// Returns up to `max_k` results scoring at least `min_score`, growing the
/// candidate pool by `k_increment` until enough matches are accepted or the
/// store runs out of candidates.
pub struct ScoreThresholdRetriever {
    adapter: VectorStoreAdapter,
    config: ScoreThresholdConfig,
}

impl ScoreThresholdRetriever {
    pub fn new(adapter: VectorStoreAdapter, config: ScoreThresholdConfig) -> Self {
        Self { adapter, config }
    }
}

#[async_trait]
impl DocumentRetriever for ScoreThresholdRetriever {
    async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<RetrievedDocument>> {
        let increment = self.config.k_increment.max(1);
        let mut pool_k = increment;

        loop {
            let candidates = self.adapter.search(query, pool_k, None).await?;
            let exhausted = candidates.len() < pool_k;

            let mut accepted: Vec<_> = candidates
                .into_iter()
                .filter(|result| result.score >= self.config.min_score)
                .collect();

            if accepted.len() >= self.config.max_k || exhausted {
                debug!(
                    accepted = accepted.len().min(self.config.max_k),
                    pool_k, "score-threshold retrieval settled"
                );
                accepted.truncate(self.config.max_k);
                return Ok(normalize::normalize_results(accepted));
            }

            pool_k += increment;
        }
    }
}
