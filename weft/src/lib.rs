//! Facade crate re-exporting the Weft workspace: vocabulary types from
//! `weft-core`, retrieval strategies from `weft-retrieval`, and (behind the
//! `remote` feature) the microservice client from `weft-remote`.

pub use weft_core as core;
pub use weft_retrieval as retrieval;

#[cfg(feature = "remote")]
pub use weft_remote as remote;

pub use weft_core::{
    ChatModel, Document, Embedding, LlmRequest, LlmResponse, Message, MetadataFilter, Role,
    SearchResult, Value, VectorStore, WeftError,
};
pub use weft_retrieval::{
    AttributeInfo, DocumentRetriever, RetrievalError, RetrievedDocument, RetrieverFactory,
    RetrieverHandle, StrategyKind, VectorStoreAdapter,
};

#[cfg(feature = "remote")]
pub use weft_remote::{RemoteRetrievalClient, RemoteRetrievalError};
