// OpenAI Connection Configuration
//
// Connection settings for the hosted completion/image API. The key is read
// from the environment at startup; scaffolded projects ship a `.env` with a
// placeholder value, so "configured" means a key that is present and not the
// placeholder. Every provider call checks this before touching the network.

use crate::services::error::{AiError, AiResult};

/// Placeholder value shipped in `.env.example`; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI API connection configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (bearer token)
    pub api_key: String,
    /// API endpoint base URL
    pub base_url: String,
    /// Model used for chat completions when a request does not name one
    pub chat_model: String,
    /// Request timeout for non-streaming calls, in seconds
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a configuration with the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads `OPENAI_API_KEY`, with optional `OPENAI_BASE_URL` and
    /// `AIHUB_CHAT_MODEL` overrides. A `.env` file is loaded first when
    /// present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(std::env::var("OPENAI_API_KEY").unwrap_or_default());

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(model) = std::env::var("AIHUB_CHAT_MODEL") {
            if !model.trim().is_empty() {
                config.chat_model = model;
            }
        }

        config
    }

    /// Whether a usable API key is present
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// Fail with a configuration error when no usable key is present
    pub fn ensure_configured(&self) -> AiResult<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(AiError::NotConfigured)
        }
    }
}
