// AI Service Module
//
// Provider seam plus the chat/image/code services built on top of it. All
// networked calls go through the `AiProvider` trait so services and tests
// stay provider-agnostic.

pub mod assistant;
pub mod chat;
pub mod code;
pub mod error;
pub mod image;
pub mod openai;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use async_trait::async_trait;

pub use assistant::{AssistantService, SendOutcome, StreamAccumulator};
pub use chat::ChatService;
pub use code::CodeService;
pub use error::{AiError, AiErrorCode, AiResult};
pub use image::ImageService;
pub use openai::OpenAiProvider;

use crate::config::OpenAiConfig;
use crate::models::chat::{ChatMessage, ChatOptions, ChatResponse, ResponseSchema};
use crate::models::image::{GeneratedImage, ImageOptions};

/// Trait for AI completion/image providers
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Perform a chat completion request
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> AiResult<ChatResponse>;

    /// Perform a streaming chat completion request.
    ///
    /// `on_delta` is invoked once per received text fragment, in arrival
    /// order, until the transport signals completion. The returned response
    /// carries the full accumulated content.
    async fn stream_chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        on_delta: &(dyn for<'a> Fn(&'a str) + Send + Sync),
    ) -> AiResult<ChatResponse>;

    /// Perform a completion constrained to a JSON schema and parse the result
    async fn structured_completion(
        &self,
        messages: Vec<ChatMessage>,
        schema: ResponseSchema,
        options: ChatOptions,
    ) -> AiResult<serde_json::Value>;

    /// Generate `n` images from a prompt in a single provider request
    async fn generate_images(
        &self,
        prompt: &str,
        n: u32,
        options: &ImageOptions,
    ) -> AiResult<Vec<GeneratedImage>>;
}

/// Shared AI provider handle
pub type SharedAiProvider = Arc<dyn AiProvider>;

/// Create the OpenAI provider from a configuration
pub fn openai_provider(config: OpenAiConfig) -> SharedAiProvider {
    Arc::new(OpenAiProvider::new(config))
}
