use async_trait::async_trait;
use weft_core::{Embedding, EmbeddingError};

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// Deterministic embedder backed by seeded FNV-1a hashing. Not a semantic
/// model; exists so ephemeral stores and tests work without a provider.
#[derive(Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        (0..self.dimension as u64)
            .map(|seed| {
                let mut hash = FNV_OFFSET ^ seed;
                for byte in bytes {
                    hash ^= u64::from(*byte);
                    hash = hash.wrapping_mul(FNV_PRIME);
                }
                (hash % 10_000) as f32 / 10_000.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedding for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
