mod document;
mod embedding;
mod error;
mod llm;
mod metadata_filter;
mod value;
mod vector_store;

pub use document::Document;
pub use embedding::Embedding;
pub use error::{EmbeddingError, StoreError, WeftError};
pub use llm::{ChatModel, LlmRequest, LlmResponse, Message, Role};
pub use metadata_filter::MetadataFilter;
pub use value::Value;
pub use vector_store::{SearchResult, VectorStore};
