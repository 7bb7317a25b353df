// Code Assistant Service
//
// Builds system/user prompt pairs for code tasks and delegates to structured
// chat completions with a fixed two-field response shape.

use super::{AiResult, ChatService, SharedAiProvider};
use crate::config::OpenAiConfig;
use crate::models::chat::{ChatMessage, ChatOptions, ResponseSchema};
use crate::models::code::{CodeAssistance, CodeTask};

/// Code assistant service
#[derive(Clone)]
pub struct CodeService {
    chat: ChatService,
}

impl CodeService {
    pub fn new(provider: SharedAiProvider) -> Self {
        Self {
            chat: ChatService::new(provider),
        }
    }

    /// Create a service backed by the OpenAI provider
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self {
            chat: ChatService::from_config(config),
        }
    }

    fn system_prompt(language: &str) -> String {
        format!(
            "You are an expert {} developer. Help with code generation, explanation, \
             and optimization. Always provide clear, well-commented code and detailed \
             explanations.",
            language
        )
    }

    fn response_schema() -> ResponseSchema {
        ResponseSchema::object(
            "code_response",
            serde_json::json!({
                "code": { "type": "string" },
                "explanation": { "type": "string" },
            }),
            &["code", "explanation"],
        )
    }

    /// Generate or transform code from a free-form prompt.
    ///
    /// When `code` is given, it is attached to the prompt as a fenced
    /// snippet in the task's language.
    pub async fn process_code(
        &self,
        prompt: &str,
        code: Option<&str>,
        language: &str,
    ) -> AiResult<CodeAssistance> {
        let user_prompt = match code {
            Some(snippet) if !snippet.trim().is_empty() => format!(
                "{}\n\nExisting code:\n```{}\n{}\n```",
                prompt, language, snippet
            ),
            _ => prompt.to_string(),
        };

        log::debug!("code assistance request for language {}", language);

        self.chat
            .structured_completion_as(
                vec![
                    ChatMessage::system(Self::system_prompt(language)),
                    ChatMessage::user(user_prompt),
                ],
                Self::response_schema(),
                ChatOptions::default(),
            )
            .await
    }

    /// Run a canned task over an existing snippet
    pub async fn run_task(
        &self,
        task: CodeTask,
        code: &str,
        language: &str,
    ) -> AiResult<CodeAssistance> {
        self.process_code(&task.instruction(language), Some(code), language)
            .await
    }

    /// Optimize existing code for performance and readability
    pub async fn optimize_code(&self, code: &str, language: &str) -> AiResult<CodeAssistance> {
        self.run_task(CodeTask::Optimize, code, language).await
    }

    /// Explain what existing code does
    pub async fn explain_code(&self, code: &str, language: &str) -> AiResult<CodeAssistance> {
        self.run_task(CodeTask::Explain, code, language).await
    }

    /// Add error handling to existing code
    pub async fn add_error_handling(&self, code: &str, language: &str) -> AiResult<CodeAssistance> {
        self.run_task(CodeTask::AddErrorHandling, code, language)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::AiError;
    use crate::services::test_support::{MockProvider, RecordedCall};
    use std::sync::Arc;

    fn assistance_json() -> serde_json::Value {
        serde_json::json!({
            "code": "fn main() {}",
            "explanation": "entry point",
        })
    }

    #[tokio::test]
    async fn test_process_code_builds_prompt_pair() {
        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(assistance_json()));
        let service = CodeService::new(mock.clone());

        let result = service
            .process_code("Write a hello world program", None, "rust")
            .await
            .unwrap();
        assert_eq!(result.code, "fn main() {}");
        assert_eq!(result.explanation, "entry point");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Structured {
                messages,
                schema_name,
                schema,
            } => {
                assert_eq!(schema_name, "code_response");
                assert_eq!(schema["required"][0], "code");
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[0].role, "system");
                assert!(messages[0].content.contains("expert rust developer"));
                assert_eq!(messages[1].role, "user");
                assert!(!messages[1].content.contains("Existing code"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_process_code_attaches_snippet_as_fenced_block() {
        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(assistance_json()));
        let service = CodeService::new(mock.clone());

        service
            .process_code("Review this", Some("print('hi')"), "python")
            .await
            .unwrap();

        match &mock.calls()[0] {
            RecordedCall::Structured { messages, .. } => {
                assert!(messages[1].content.contains("```python\nprint('hi')\n```"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_task_variants_use_canned_instructions() {
        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(assistance_json()));
        mock.push_structured(Ok(assistance_json()));
        mock.push_structured(Ok(assistance_json()));
        let service = CodeService::new(mock.clone());

        service.optimize_code("let x = 1;", "javascript").await.unwrap();
        service.explain_code("let x = 1;", "javascript").await.unwrap();
        service
            .add_error_handling("let x = 1;", "javascript")
            .await
            .unwrap();

        let prompts: Vec<String> = mock
            .calls()
            .iter()
            .map(|call| match call {
                RecordedCall::Structured { messages, .. } => messages[1].content.clone(),
                other => panic!("unexpected call: {:?}", other),
            })
            .collect();
        assert!(prompts[0].contains("Optimize this javascript code"));
        assert!(prompts[1].contains("Explain this javascript code"));
        assert!(prompts[2].contains("error handling"));
    }

    #[tokio::test]
    async fn test_malformed_response_fails_instead_of_partial_result() {
        let mock = Arc::new(MockProvider::new());
        mock.push_structured(Ok(serde_json::json!({ "code": "only half" })));
        let service = CodeService::new(mock);

        let result = service.process_code("Write code", None, "rust").await;
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
