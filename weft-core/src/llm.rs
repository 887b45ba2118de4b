use serde::{Deserialize, Serialize};

use crate::WeftError;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmRequest {
    /// Provider-side model name. Strategies leave this empty and let the
    /// provider binding pick its configured default.
    pub model: String,
    pub messages: Vec<Message>,
}

impl LlmRequest {
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            model: String::new(),
            messages,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmResponse {
    pub content: String,
}

/// Chat-completion capability consumed by model-driven retrieval strategies.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, WeftError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(Message::system("be terse").role, Role::System);
        assert_eq!(Message::user("hello").role, Role::User);
    }

    #[test]
    fn from_messages_leaves_model_unset() {
        let request = LlmRequest::from_messages(vec![Message::user("hello")]);
        assert!(request.model.is_empty());
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message {
            role: Role::Assistant,
            content: "ok".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
