use thiserror::Error;
use weft_core::{EmbeddingError, StoreError};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("model call failed: {0}")]
    Model(String),
    #[error("failed to parse model output: {0}")]
    ParseModelOutput(String),
    #[error("strategy '{0}' requires a chat model")]
    ModelRequired(&'static str),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
