// Scripted provider used by service tests.
//
// Queue results per method; calls are recorded in order so tests can assert
// how services drive the provider.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AiError, AiProvider, AiResult};
use crate::models::chat::{ChatMessage, ChatOptions, ChatResponse, ResponseSchema};
use crate::models::image::{GeneratedImage, ImageModel, ImageOptions};

#[derive(Debug, Clone)]
pub enum RecordedCall {
    Chat {
        messages: Vec<ChatMessage>,
    },
    Stream {
        messages: Vec<ChatMessage>,
    },
    Structured {
        messages: Vec<ChatMessage>,
        schema_name: String,
        schema: serde_json::Value,
    },
    Images {
        prompt: String,
        n: u32,
        model: ImageModel,
    },
}

#[derive(Default)]
pub struct MockProvider {
    chat_results: Mutex<VecDeque<AiResult<ChatResponse>>>,
    stream_scripts: Mutex<VecDeque<AiResult<Vec<String>>>>,
    structured_results: Mutex<VecDeque<AiResult<serde_json::Value>>>,
    image_results: Mutex<VecDeque<AiResult<Vec<GeneratedImage>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chat(&self, result: AiResult<ChatResponse>) {
        self.chat_results.lock().unwrap().push_back(result);
    }

    pub fn push_chat_content(&self, content: &str) {
        self.push_chat(Ok(ChatResponse {
            content: content.to_string(),
            model: "mock-model".to_string(),
            tokens_used: None,
        }));
    }

    /// Queue a stream script: the fragments emitted before completion
    pub fn push_stream(&self, script: AiResult<Vec<String>>) {
        self.stream_scripts.lock().unwrap().push_back(script);
    }

    pub fn push_stream_fragments(&self, fragments: &[&str]) {
        self.push_stream(Ok(fragments.iter().map(|f| f.to_string()).collect()));
    }

    pub fn push_structured(&self, result: AiResult<serde_json::Value>) {
        self.structured_results.lock().unwrap().push_back(result);
    }

    pub fn push_images(&self, result: AiResult<Vec<GeneratedImage>>) {
        self.image_results.lock().unwrap().push_back(result);
    }

    pub fn push_image_urls(&self, urls: &[&str]) {
        self.push_images(Ok(urls
            .iter()
            .map(|url| GeneratedImage {
                url: url.to_string(),
                revised_prompt: None,
            })
            .collect()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn exhausted(method: &str) -> AiError {
        AiError::ApiError(format!("mock provider: no scripted {} result", method))
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        _options: ChatOptions,
    ) -> AiResult<ChatResponse> {
        self.record(RecordedCall::Chat { messages });
        self.chat_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("chat")))
    }

    async fn stream_chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        _options: ChatOptions,
        on_delta: &(dyn for<'a> Fn(&'a str) + Send + Sync),
    ) -> AiResult<ChatResponse> {
        self.record(RecordedCall::Stream { messages });
        let script = self
            .stream_scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("stream")));

        let fragments = script?;
        let mut content = String::new();
        for fragment in &fragments {
            content.push_str(fragment);
            on_delta(fragment);
        }
        Ok(ChatResponse {
            content,
            model: "mock-model".to_string(),
            tokens_used: None,
        })
    }

    async fn structured_completion(
        &self,
        messages: Vec<ChatMessage>,
        schema: ResponseSchema,
        _options: ChatOptions,
    ) -> AiResult<serde_json::Value> {
        self.record(RecordedCall::Structured {
            messages,
            schema_name: schema.name.clone(),
            schema: schema.schema.clone(),
        });
        self.structured_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("structured")))
    }

    async fn generate_images(
        &self,
        prompt: &str,
        n: u32,
        options: &ImageOptions,
    ) -> AiResult<Vec<GeneratedImage>> {
        self.record(RecordedCall::Images {
            prompt: prompt.to_string(),
            n,
            model: options.model,
        });
        self.image_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("images")))
    }
}
