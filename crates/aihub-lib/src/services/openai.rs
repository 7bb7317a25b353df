// OpenAI Provider Implementation
//
// Thin wrapper over the hosted chat-completions and image-generation
// endpoints. Requests are composed from the caller's messages and options,
// responses are relayed back verbatim; errors are classified into the shared
// taxonomy. No retries, no partial-result recovery.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AiError, AiProvider, AiResult};
use crate::config::OpenAiConfig;
use crate::models::chat::{ChatMessage, ChatOptions, ChatResponse, ResponseSchema};
use crate::models::image::{GeneratedImage, ImageOptions};

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// OpenAI provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn resolve_model(&self, options: &ChatOptions) -> String {
        options
            .model
            .clone()
            .unwrap_or_else(|| self.config.chat_model.clone())
    }

    fn chat_request(
        &self,
        messages: Vec<ChatMessage>,
        options: &ChatOptions,
        response_format: Option<serde_json::Value>,
        stream: bool,
    ) -> ApiChatRequest {
        ApiChatRequest {
            model: self.resolve_model(options),
            messages: messages
                .into_iter()
                .map(|m| ApiMessage {
                    role: m.role,
                    content: m.content,
                })
                .collect(),
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            top_p: options.top_p,
            response_format,
            stream,
        }
    }

    async fn post_chat(&self, request: &ApiChatRequest) -> AiResult<ApiChatResponse> {
        let url = self.api_url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body, &request.model));
        }

        Ok(response.json().await?)
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct ApiChatRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiChatResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    total_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiStreamResponse {
    choices: Vec<ApiStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiStreamChoice {
    delta: ApiDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiImageRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImageResponse {
    data: Vec<ApiImageData>,
}

#[derive(Debug, Deserialize)]
struct ApiImageData {
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

/// Classify a non-2xx provider response into the error taxonomy
fn classify_api_error(status: StatusCode, body: &str, model: &str) -> AiError {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let detail = parsed.error;
        let error_type = detail.error_type.as_deref().unwrap_or("");
        let code = detail.code.as_deref().unwrap_or("");

        if status.as_u16() == 401 || error_type == "invalid_api_key" || code == "invalid_api_key" {
            return AiError::AuthFailed(detail.message);
        }
        if error_type == "insufficient_quota" || code == "insufficient_quota" {
            return AiError::QuotaExceeded;
        }
        if status.as_u16() == 429 {
            return AiError::RateLimited;
        }
        if code == "model_not_found" || detail.message.contains("does not exist") {
            return AiError::ModelNotFound(model.to_string());
        }
        return AiError::ApiError(detail.message);
    }

    match status.as_u16() {
        401 => AiError::AuthFailed(body.to_string()),
        429 => AiError::RateLimited,
        _ => AiError::ApiError(format!("OpenAI API error ({}): {}", status, body)),
    }
}

/// One parsed server-sent-events frame
enum SseFrame {
    Delta(String),
    Done,
}

/// Parse a single SSE line from the completion stream
fn parse_stream_line(line: &str) -> Option<SseFrame> {
    let data = line.trim().strip_prefix("data: ")?;
    if data == "[DONE]" {
        return Some(SseFrame::Done);
    }

    let parsed: ApiStreamResponse = serde_json::from_str(data).ok()?;
    let choice = parsed.choices.first()?;
    if let Some(content) = &choice.delta.content {
        if !content.is_empty() {
            return Some(SseFrame::Delta(content.clone()));
        }
    }
    if choice.finish_reason.is_some() {
        return Some(SseFrame::Done);
    }
    None
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> AiResult<ChatResponse> {
        self.config.ensure_configured()?;

        let request = self.chat_request(messages, &options, None, false);
        let response = self.post_chat(&request).await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        let tokens_used = response.usage.and_then(|u| u.total_tokens);

        Ok(ChatResponse {
            content,
            model: response.model,
            tokens_used,
        })
    }

    async fn stream_chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        on_delta: &(dyn for<'a> Fn(&'a str) + Send + Sync),
    ) -> AiResult<ChatResponse> {
        self.config.ensure_configured()?;

        let request = self.chat_request(messages, &options, None, true);
        let url = self.api_url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body, &request.model));
        }

        let mut full_content = String::new();
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].to_string();
                buffer.drain(..=pos);

                match parse_stream_line(&line) {
                    Some(SseFrame::Delta(delta)) => {
                        full_content.push_str(&delta);
                        on_delta(&delta);
                    }
                    Some(SseFrame::Done) => {
                        return Ok(ChatResponse {
                            content: full_content,
                            model: request.model,
                            tokens_used: None,
                        });
                    }
                    None => {}
                }
            }
        }

        // Transport ended without a [DONE] frame; return what arrived
        log::debug!("completion stream ended without a done frame");
        Ok(ChatResponse {
            content: full_content,
            model: request.model,
            tokens_used: None,
        })
    }

    async fn structured_completion(
        &self,
        messages: Vec<ChatMessage>,
        schema: ResponseSchema,
        options: ChatOptions,
    ) -> AiResult<serde_json::Value> {
        self.config.ensure_configured()?;

        let response_format = serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name,
                "schema": schema.schema,
            },
        });

        let request = self.chat_request(messages, &options, Some(response_format), false);
        let response = self.post_chat(&request).await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        // A malformed body is a parse error, never a partial result
        Ok(serde_json::from_str(&content)?)
    }

    async fn generate_images(
        &self,
        prompt: &str,
        n: u32,
        options: &ImageOptions,
    ) -> AiResult<Vec<GeneratedImage>> {
        self.config.ensure_configured()?;

        let request = ApiImageRequest {
            model: options.model.as_str().to_string(),
            prompt: prompt.to_string(),
            n,
            size: options.resolved_size().as_str().to_string(),
            quality: options
                .model
                .supports_quality()
                .then(|| options.quality.as_str().to_string()),
        };

        let url = self.api_url("/images/generations");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body, &request.model));
        }

        let parsed: ApiImageResponse = response.json().await?;
        parsed
            .data
            .into_iter()
            .map(|item| {
                Ok(GeneratedImage {
                    url: item
                        .url
                        .ok_or_else(|| AiError::ApiError("image response missing url".to_string()))?,
                    revised_prompt: item.revised_prompt,
                })
            })
            .collect()
    }
}
