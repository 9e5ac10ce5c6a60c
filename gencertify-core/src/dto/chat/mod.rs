//! Chat DTOs

use serde::{Deserialize, Serialize};

/// Message sent to the compliance assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub organization_id: String,
    pub message: String,
    /// Continue an existing conversation; the backend opens a new one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
            ChatRole::System => write!(f, "system"),
        }
    }
}

/// One message of a stored conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A stored conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Chat history lookup
///
/// `history` is null when the session does not exist or belongs to another
/// organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub status: String,
    #[serde(default)]
    pub history: Option<ChatSession>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_ignores_stored_timestamps() {
        let response: ChatHistoryResponse = serde_json::from_value(json!({
            "status": "success",
            "history": {
                "id": "chat-1",
                "organization_id": "org-1",
                "messages": [
                    {"role": "user", "content": "Do we need a DPO?", "timestamp": "2024-05-01T10:00:00Z"},
                    {"role": "assistant", "content": "For GDPR, likely yes.", "timestamp": null}
                ],
                "created_at": "2024-05-01T10:00:00Z"
            }
        }))
        .unwrap();

        let history = response.history.unwrap();
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_missing_history_is_none() {
        let response: ChatHistoryResponse =
            serde_json::from_value(json!({"status": "success", "history": null})).unwrap();
        assert!(response.history.is_none());
    }

    #[test]
    fn test_new_conversation_omits_session() {
        let request = ChatMessageRequest {
            organization_id: "org-1".to_string(),
            message: "hello".to_string(),
            session_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("session_id").is_none());
    }
}
