use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use weft_core::{Document, SearchResult, Value};

/// The normalized document shape every retriever produces.
///
/// `metadata` is a JSON mapping or `None`, never absent: deserializing a
/// record without a metadata field yields `None`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RetrievedDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>, metadata: Option<Value>) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// Map store documents to the normalized shape. Only `content` and
/// `metadata` survive; an empty metadata map becomes `None`.
pub fn normalize_documents(docs: Vec<Document>) -> Vec<RetrievedDocument> {
    docs.into_iter()
        .map(|doc| RetrievedDocument {
            content: doc.content,
            metadata: metadata_value(doc.metadata),
        })
        .collect()
}

/// Map scored search results to the normalized shape, dropping scores.
pub fn normalize_results(results: Vec<SearchResult>) -> Vec<RetrievedDocument> {
    normalize_documents(results.into_iter().map(|result| result.document).collect())
}

pub(crate) fn metadata_value(metadata: HashMap<String, Value>) -> Option<Value> {
    if metadata.is_empty() {
        None
    } else {
        Some(Value::Object(metadata.into_iter().collect()))
    }
}
