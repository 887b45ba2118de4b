use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use weft_retrieval::{RetrievedDocument, RetrieverHandle};

use crate::RemoteRetrievalError;

/// Environment variable holding the base URL of the retrieval microservice.
pub const SERVER_ENV_VAR: &str = "PYTHON_MICRO_SERVER";

#[derive(Debug, Deserialize)]
struct NamedRetrieverResponse {
    documents: Vec<RetrievedDocument>,
}

/// Client for the external retrieval microservice.
///
/// Both calls are independent one-shot requests; no retry policy is applied
/// here, and callers own any backoff they want.
#[derive(Clone, Debug)]
pub struct RemoteRetrievalClient {
    http: Client,
    base_url: String,
}

impl RemoteRetrievalClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteRetrievalError> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url)
            .map_err(|err| RemoteRetrievalError::Config(format!("invalid base_url: {err}")))?;

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// Read the base URL from [`SERVER_ENV_VAR`].
    pub fn from_env() -> Result<Self, RemoteRetrievalError> {
        let base_url = std::env::var(SERVER_ENV_VAR).map_err(|_| {
            RemoteRetrievalError::Config(format!("{SERVER_ENV_VAR} is not set"))
        })?;
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST `/api/query` with `{query, id}` and hand back the raw response.
    ///
    /// Neither the status nor the body shape is checked here; interpreting
    /// the response is the caller's responsibility. Only transport failures
    /// are mapped to an error.
    pub async fn base_request(
        &self,
        query: &str,
        id: &str,
    ) -> Result<reqwest::Response, RemoteRetrievalError> {
        self.http
            .post(self.url("/api/query"))
            .json(&json!({ "query": query, "id": id }))
            .send()
            .await
            .map_err(|err| RemoteRetrievalError::Transport(err.to_string()))
    }

    /// POST `/api/python-retrievers/{retriever_id}` with `{query}` and wrap
    /// the returned documents as a fixed, pre-fetched retriever.
    ///
    /// Non-success responses fail with the server-reported `message` field.
    pub async fn retrieve_named(
        &self,
        query: &str,
        retriever_id: &str,
    ) -> Result<RetrieverHandle, RemoteRetrievalError> {
        let response = self
            .http
            .post(self.url(&format!("/api/python-retrievers/{retriever_id}")))
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|err| RemoteRetrievalError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown remote retriever error")
                .to_string();
            return Err(RemoteRetrievalError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: NamedRetrieverResponse = response
            .json()
            .await
            .map_err(|err| RemoteRetrievalError::Malformed(err.to_string()))?;
        debug!(
            retriever_id,
            documents = body.documents.len(),
            "remote retriever responded"
        );

        Ok(RetrieverHandle::fixed(body.documents))
    }
}
