// Chat Completion Service
//
// Generates conversational responses over the provider seam: plain,
// streaming, and JSON-schema-constrained completions.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::{openai_provider, AiError, AiProvider, AiResult, SharedAiProvider};
use crate::config::OpenAiConfig;
use crate::models::chat::{ChatMessage, ChatOptions, ChatResponse, ResponseSchema};

/// Chat completion service
#[derive(Clone)]
pub struct ChatService {
    provider: SharedAiProvider,
}

impl ChatService {
    pub fn new(provider: SharedAiProvider) -> Self {
        Self { provider }
    }

    /// Create a service backed by the OpenAI provider
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self::new(openai_provider(config))
    }

    pub fn provider(&self) -> &Arc<dyn AiProvider> {
        &self.provider
    }

    /// Generate a chat completion and return the assistant's text
    pub async fn completion(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> AiResult<String> {
        let response = self.provider.chat_completion(messages, options).await?;
        Ok(response.content)
    }

    /// Stream a chat completion.
    ///
    /// `on_chunk` is invoked once per received fragment, in arrival order.
    /// The returned response content is the concatenation of all fragments.
    pub async fn streaming_completion<F>(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        on_chunk: F,
    ) -> AiResult<ChatResponse>
    where
        F: Fn(&str) + Send + Sync,
    {
        self.provider
            .stream_chat_completion(messages, options, &on_chunk)
            .await
    }

    /// Generate a completion constrained to a JSON schema
    pub async fn structured_completion(
        &self,
        messages: Vec<ChatMessage>,
        schema: ResponseSchema,
        options: ChatOptions,
    ) -> AiResult<serde_json::Value> {
        self.provider
            .structured_completion(messages, schema, options)
            .await
    }

    /// Generate a structured completion and decode it into `T`.
    ///
    /// A response that does not match `T` fails with a parse error instead of
    /// returning a partially-populated value.
    pub async fn structured_completion_as<T: DeserializeOwned>(
        &self,
        messages: Vec<ChatMessage>,
        schema: ResponseSchema,
        options: ChatOptions,
    ) -> AiResult<T> {
        let value = self
            .structured_completion(messages, schema, options)
            .await?;
        serde_json::from_value(value).map_err(|e| AiError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MockProvider;
    use std::sync::Mutex;

    fn service_with(mock: Arc<MockProvider>) -> ChatService {
        ChatService::new(mock)
    }

    #[tokio::test]
    async fn test_completion_returns_content() {
        let mock = Arc::new(MockProvider::new());
        mock.push_chat_content("hello back");
        let service = service_with(mock);

        let content = service
            .completion(vec![ChatMessage::user("hello")], ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(content, "hello back");
    }

    #[tokio::test]
    async fn test_streaming_relays_fragments_in_order() {
        let mock = Arc::new(MockProvider::new());
        mock.push_stream_fragments(&["Hel", "lo"]);
        let service = service_with(mock);

        let seen = Mutex::new(Vec::new());
        let response = service
            .streaming_completion(
                vec![ChatMessage::user("hi")],
                ChatOptions::default(),
                |chunk| seen.lock().unwrap().push(chunk.to_string()),
            )
            .await
            .unwrap();

        assert_eq!(response.content, "Hello");
        assert_eq!(*seen.lock().unwrap(), vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn test_streaming_propagates_provider_errors() {
        let mock = Arc::new(MockProvider::new());
        mock.push_stream(Err(AiError::RateLimited));
        let service = service_with(mock);

        let result = service
            .streaming_completion(
                vec![ChatMessage::user("hi")],
                ChatOptions::default(),
                |_| {},
            )
            .await;
        assert!(matches!(result, Err(AiError::RateLimited)));
    }

    #[tokio::test]
    async fn test_structured_completion_as_decodes() {
        #[derive(serde::Deserialize)]
        struct Reply {
            text: String,
        }

        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(serde_json::json!({ "text": "ok" })));
        let service = service_with(mock);

        let reply: Reply = service
            .structured_completion_as(
                vec![ChatMessage::user("hi")],
                ResponseSchema::object(
                    "reply",
                    serde_json::json!({ "text": { "type": "string" } }),
                    &["text"],
                ),
                ChatOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(reply.text, "ok");
    }

    #[tokio::test]
    async fn test_structured_completion_as_rejects_mismatched_shape() {
        #[derive(Debug, serde::Deserialize)]
        struct Reply {
            #[allow(dead_code)]
            text: String,
        }

        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(serde_json::json!({ "other": 1 })));
        let service = service_with(mock);

        let result: AiResult<Reply> = service
            .structured_completion_as(
                vec![ChatMessage::user("hi")],
                ResponseSchema::new("reply", serde_json::json!({})),
                ChatOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
