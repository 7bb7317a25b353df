// Conversation data models
//
// In-memory chat session state rendered by the UI. Conversations and their
// messages live for the page session only; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest derived conversation title, in characters
const TITLE_MAX_CHARS: usize = 50;

// ============================================================================
// Core Entities
// ============================================================================

/// Conversation entity - a chat session between the user and the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display title (derived from the opening message or user-defined)
    pub title: Option<String>,
    /// Cached message count
    pub message_count: i64,
    /// When the conversation started
    pub created_at: DateTime<Utc>,
    /// When the conversation was last modified
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new untitled conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            message_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new conversation with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.title = Some(title.into());
        conversation
    }

    /// Derive a display title from the opening message content.
    ///
    /// Truncates to 50 characters with a `...` suffix, on a char boundary.
    pub fn derive_title(content: &str) -> String {
        let trimmed = content.trim();
        if trimmed.chars().count() <= TITLE_MAX_CHARS {
            return trimmed.to_string();
        }
        let truncated: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversation summary for list display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub title: Option<String>,
    pub message_count: i64,
    pub last_message_preview: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conversation with all of its messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// Message entity - individual message within a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Parent conversation ID
    pub conversation_id: String,
    /// Message author role
    pub role: MessageRole,
    /// Message text content
    pub content: String,
    /// Delivery status
    pub status: MessageStatus,
    /// Model used (for assistant messages)
    pub model: Option<String>,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new user message
    pub fn user(conversation_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            role: MessageRole::User,
            content,
            status: MessageStatus::Sent,
            model: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new assistant message (initially pending; content is
    /// overwritten as stream fragments arrive)
    pub fn assistant(conversation_id: String, initial_content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            role: MessageRole::Assistant,
            content: initial_content,
            status: MessageStatus::Pending,
            model: None,
            created_at: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(conversation_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            role: MessageRole::System,
            content,
            status: MessageStatus::Sent,
            model: None,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Message author role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            _ => Err(format!("Invalid message role: {}", s)),
        }
    }
}

/// Message delivery status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Sent,
    Error,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageStatus::Pending => write!(f, "pending"),
            MessageStatus::Sent => write!(f, "sent"),
            MessageStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MessageStatus::Pending),
            "sent" => Ok(MessageStatus::Sent),
            "error" => Ok(MessageStatus::Error),
            _ => Err(format!("Invalid message status: {}", s)),
        }
    }
}

// ============================================================================
// Streaming Events
// ============================================================================

/// Assistant streaming event relayed to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantEvent {
    /// Streaming text fragment received
    #[serde(rename_all = "camelCase")]
    Token {
        conversation_id: String,
        message_id: String,
        token: String,
        is_final: bool,
    },
    /// Response complete
    #[serde(rename_all = "camelCase")]
    Complete {
        conversation_id: String,
        message_id: String,
        full_content: String,
        model: String,
    },
    /// Error occurred
    #[serde(rename_all = "camelCase")]
    Error {
        conversation_id: String,
        message_id: String,
        code: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_derive_title_short_content() {
        assert_eq!(Conversation::derive_title("Hello there"), "Hello there");
    }

    #[test]
    fn test_derive_title_truncates_long_content() {
        let content = "x".repeat(80);
        let title = Conversation::derive_title(&content);
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_derive_title_respects_char_boundaries() {
        let content = "日".repeat(60);
        let title = Conversation::derive_title(&content);
        assert!(title.starts_with('日'));
        assert_eq!(title.chars().count(), 53);
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("c1".to_string(), "hi".to_string());
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.status, MessageStatus::Sent);

        let assistant = Message::assistant("c1".to_string(), String::new());
        assert_eq!(assistant.role, MessageRole::Assistant);
        assert_eq!(assistant.status, MessageStatus::Pending);
        assert!(assistant.content.is_empty());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            assert_eq!(MessageRole::from_str(&role.to_string()), Ok(role));
        }
        assert!(MessageRole::from_str("tool").is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [MessageStatus::Pending, MessageStatus::Sent, MessageStatus::Error] {
            assert_eq!(MessageStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = AssistantEvent::Token {
            conversation_id: "c1".to_string(),
            message_id: "m1".to_string(),
            token: "Hel".to_string(),
            is_final: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "token");
        assert_eq!(json["conversationId"], "c1");
        assert_eq!(json["isFinal"], false);
    }
}
