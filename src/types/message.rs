//! Conversation turns and the chat API request/response types

use serde::{Deserialize, Serialize};

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation, in the wire format the completion API expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request for the chat endpoint
///
/// The caller owns the conversation history and resubmits it on every turn;
/// the service holds no per-conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user message to answer
    pub message: String,
    /// Prior conversation turns, oldest first (empty for a new conversation)
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Response from the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant reply, including the citation suffix when title-based
    /// retrieval was attempted
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let turn = ChatMessage::system("instructions");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "instructions");
    }

    #[test]
    fn request_history_defaults_to_empty() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(request.message, "hello");
        assert!(request.history.is_empty());
    }
}
