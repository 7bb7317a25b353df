// Chat completion data models

use serde::{Deserialize, Serialize};

/// Chat message for AI completion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Options for chat completion requests.
///
/// Unset fields fall back to the service defaults: the configured chat model,
/// temperature 0.7, and 1000 max tokens.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatOptions {
    /// Model override for this request
    pub model: Option<String>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Top-p sampling
    pub top_p: Option<f32>,
}

/// Response from chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Generated content
    pub content: String,
    /// Model used
    pub model: String,
    /// Tokens used (if reported)
    pub tokens_used: Option<u32>,
}

/// Declared JSON shape for structured completions.
///
/// The provider constrains its output to this schema; the response text is
/// then parsed as JSON before being returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    /// Schema name reported to the provider
    pub name: String,
    /// JSON Schema body
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Build a closed object schema from properties and required field names
    pub fn object(
        name: impl Into<String>,
        properties: serde_json::Value,
        required: &[&str],
    ) -> Self {
        Self::new(
            name,
            serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }),
        )
    }
}
