/// JSON value type used for document metadata and structured filters.
pub type Value = serde_json::Value;
