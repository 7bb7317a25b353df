// AI Service Error Types
//
// Shared error taxonomy for every provider call, plus the user-facing
// formatting the UI shows in its inline error banner.

use thiserror::Error;

/// AI service error
#[derive(Error, Debug)]
pub enum AiError {
    /// API key missing or still the placeholder value
    #[error("OpenAI API key is not configured")]
    NotConfigured,

    /// Connection failed
    #[error("Cannot connect to AI service: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Invalid or expired API key: {0}")]
    AuthFailed(String),

    /// Rate limited
    #[error("API rate limit exceeded, please try again later")]
    RateLimited,

    /// Usage quota exhausted
    #[error("API quota exceeded for the configured account")]
    QuotaExceeded,

    /// Request timeout
    #[error("AI service response timeout")]
    Timeout,

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// API error from provider
    #[error("AI service error: {0}")]
    ApiError(String),

    /// JSON parsing error
    #[error("Response parse error: {0}")]
    ParseError(String),

    /// Invalid request from the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Conversation not found
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    /// Message not found
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// Conversation store error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else if err.is_connect() {
            AiError::ConnectionFailed(err.to_string())
        } else {
            AiError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::ParseError(err.to_string())
    }
}

/// Result type for AI operations
pub type AiResult<T> = Result<T, AiError>;

/// Error codes for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiErrorCode {
    NotConfigured,
    ConnectionFailed,
    AuthFailed,
    RateLimited,
    QuotaExceeded,
    Timeout,
    ModelNotFound,
    ApiError,
    ParseError,
    InvalidRequest,
    ConversationNotFound,
    MessageNotFound,
    Storage,
}

impl AiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiErrorCode::NotConfigured => "AI_NOT_CONFIGURED",
            AiErrorCode::ConnectionFailed => "AI_CONNECTION_FAILED",
            AiErrorCode::AuthFailed => "AI_AUTH_FAILED",
            AiErrorCode::RateLimited => "AI_RATE_LIMITED",
            AiErrorCode::QuotaExceeded => "AI_QUOTA_EXCEEDED",
            AiErrorCode::Timeout => "AI_TIMEOUT",
            AiErrorCode::ModelNotFound => "AI_MODEL_NOT_FOUND",
            AiErrorCode::ApiError => "AI_API_ERROR",
            AiErrorCode::ParseError => "AI_PARSE_ERROR",
            AiErrorCode::InvalidRequest => "AI_INVALID_REQUEST",
            AiErrorCode::ConversationNotFound => "AI_CONVERSATION_NOT_FOUND",
            AiErrorCode::MessageNotFound => "AI_MESSAGE_NOT_FOUND",
            AiErrorCode::Storage => "AI_STORAGE_ERROR",
        }
    }
}

// Canned sentences shown in the UI error banner
const USER_MSG_API_KEY: &str =
    "OpenAI API key is not configured. Please check your environment variables.";
const USER_MSG_QUOTA: &str = "OpenAI API quota exceeded. Please check your usage limits.";
const USER_MSG_RATE_LIMIT: &str = "Too many requests. Please wait a moment before trying again.";
const USER_MSG_FALLBACK: &str = "An unexpected error occurred with the AI service.";

/// Map an error message to a user-friendly sentence.
///
/// Pure function over the message text: well-known substrings map to canned
/// sentences, anything else passes through unchanged.
pub fn format_user_message(message: &str) -> String {
    if message.contains("API key") {
        USER_MSG_API_KEY.to_string()
    } else if message.contains("quota") {
        USER_MSG_QUOTA.to_string()
    } else if message.contains("rate limit") {
        USER_MSG_RATE_LIMIT.to_string()
    } else if message.trim().is_empty() {
        USER_MSG_FALLBACK.to_string()
    } else {
        message.to_string()
    }
}

impl AiError {
    pub fn code(&self) -> AiErrorCode {
        match self {
            AiError::NotConfigured => AiErrorCode::NotConfigured,
            AiError::ConnectionFailed(_) => AiErrorCode::ConnectionFailed,
            AiError::AuthFailed(_) => AiErrorCode::AuthFailed,
            AiError::RateLimited => AiErrorCode::RateLimited,
            AiError::QuotaExceeded => AiErrorCode::QuotaExceeded,
            AiError::Timeout => AiErrorCode::Timeout,
            AiError::ModelNotFound(_) => AiErrorCode::ModelNotFound,
            AiError::ApiError(_) => AiErrorCode::ApiError,
            AiError::ParseError(_) => AiErrorCode::ParseError,
            AiError::InvalidRequest(_) => AiErrorCode::InvalidRequest,
            AiError::ConversationNotFound(_) => AiErrorCode::ConversationNotFound,
            AiError::MessageNotFound(_) => AiErrorCode::MessageNotFound,
            AiError::Storage(_) => AiErrorCode::Storage,
        }
    }

    /// Convert to a user-friendly message for the frontend
    pub fn user_message(&self) -> String {
        format_user_message(&self.to_string())
    }
}

impl From<AiError> for String {
    fn from(err: AiError) -> Self {
        err.to_string()
    }
}
