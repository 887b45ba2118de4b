use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use weft_core::{Document, MetadataFilter, SearchResult, StoreError, Value, VectorStore};

struct Entry {
    document: Document,
    embedding: Vec<f32>,
}

#[derive(Default)]
struct StoreInner {
    entries: HashMap<String, Entry>,
    dimension: Option<usize>,
}

/// Ephemeral cosine-similarity vector store.
///
/// Cloning shares the underlying data; strategies that need a fresh index
/// allocate a new store per construction and drop it with the retriever.
#[derive(Clone, Default)]
pub struct InMemoryVectorStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for mut doc in docs {
            if doc.id.trim().is_empty() {
                return Err(StoreError::InvalidId(doc.id));
            }

            let embedding = doc.embedding.take().ok_or_else(|| {
                StoreError::Internal(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "missing embedding",
                )))
            })?;
            match inner.dimension {
                Some(expected) if expected != embedding.len() => {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: embedding.len(),
                    });
                }
                None => inner.dimension = Some(embedding.len()),
                _ => {}
            }

            inner.entries.insert(
                doc.id.clone(),
                Entry {
                    document: doc,
                    embedding,
                },
            );
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let inner = self.inner.read().await;
        let expected = inner.dimension.unwrap_or(query_embedding.len());
        if expected != query_embedding.len() {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: query_embedding.len(),
            });
        }

        let mut scored = Vec::new();
        for entry in inner.entries.values() {
            if let Some(filter) = filter {
                if !metadata_matches(filter, &entry.document.metadata) {
                    continue;
                }
            }
            let mut score = cosine_similarity(query_embedding, &entry.embedding);
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            scored.push(SearchResult {
                document: entry.document.clone(),
                score,
            });
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for id in ids {
            inner.entries.remove(id);
        }
        Ok(())
    }
}

pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn metadata_matches(filter: &MetadataFilter, metadata: &HashMap<String, Value>) -> bool {
    match filter {
        MetadataFilter::Eq(key, value) => metadata.get(key).map_or(false, |entry| entry == value),
        MetadataFilter::In(key, values) => metadata
            .get(key)
            .map_or(false, |entry| values.iter().any(|value| value == entry)),
        MetadataFilter::Range { key, min, max } => {
            let Some(value) = metadata.get(key).and_then(Value::as_f64) else {
                return false;
            };
            let min_ok = match min.as_ref().map(|bound| bound.as_f64()) {
                Some(Some(bound)) => value >= bound,
                Some(None) => false,
                None => true,
            };
            let max_ok = match max.as_ref().map(|bound| bound.as_f64()) {
                Some(Some(bound)) => value <= bound,
                Some(None) => false,
                None => true,
            };
            min_ok && max_ok
        }
        MetadataFilter::All(filters) => filters
            .iter()
            .all(|filter| metadata_matches(filter, metadata)),
        MetadataFilter::Any(filters) => filters
            .iter()
            .any(|filter| metadata_matches(filter, metadata)),
    }
}
