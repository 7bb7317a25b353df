// AI Assistant Service
//
// Drives one chat turn end to end: append the user message, append a pending
// assistant placeholder, stream the completion into the placeholder (its
// content is overwritten with the accumulated text on every fragment), then
// finalize it as sent or errored. Events are relayed to the frontend so the
// message list re-renders as fragments arrive. In-flight requests are not
// cancellable; starting a new turn never aborts a previous one.

use std::sync::Mutex;

use super::stream::StreamAccumulator;
use crate::config::OpenAiConfig;
use crate::models::chat::{ChatMessage, ChatOptions};
use crate::models::conversation::{
    AssistantEvent, Conversation, ConversationDetail, ConversationSummary, Message, MessageRole,
    MessageStatus,
};
use crate::repositories::ConversationRepository;
use crate::services::chat::ChatService;
use crate::services::error::{AiError, AiResult};
use crate::services::SharedAiProvider;

/// System prompt prepended to every chat turn
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Provide clear, \
     concise, and helpful responses to user questions.";

/// Outcome of a sent message turn
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// Conversation the turn belongs to (newly created when none was given)
    pub conversation_id: String,
    /// The finalized assistant message
    pub message: Message,
}

/// Main assistant service
pub struct AssistantService {
    repo: ConversationRepository,
    chat: ChatService,
}

impl AssistantService {
    pub fn new(repo: ConversationRepository, chat: ChatService) -> Self {
        Self { repo, chat }
    }

    /// Create a service with a fresh store, backed by the OpenAI provider
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self::new(
            ConversationRepository::new(),
            ChatService::from_config(config),
        )
    }

    /// Create a service with a fresh store over an existing provider
    pub fn with_provider(provider: SharedAiProvider) -> Self {
        Self::new(ConversationRepository::new(), ChatService::new(provider))
    }

    /// The underlying conversation store
    pub fn repository(&self) -> &ConversationRepository {
        &self.repo
    }

    // =========================================================================
    // Conversation Management
    // =========================================================================

    /// Create a new conversation
    pub fn create_conversation(&self, title: Option<String>) -> AiResult<Conversation> {
        self.repo.create_conversation(title)
    }

    /// List conversations, most recently updated first
    pub fn list_conversations(&self) -> AiResult<Vec<ConversationSummary>> {
        self.repo.list_conversations()
    }

    /// Get a conversation with all of its messages
    pub fn get_conversation(&self, conversation_id: &str) -> AiResult<ConversationDetail> {
        let conversation = self
            .repo
            .get_conversation(conversation_id)?
            .ok_or_else(|| AiError::ConversationNotFound(conversation_id.to_string()))?;
        let messages = self.repo.get_messages(conversation_id)?;
        Ok(ConversationDetail {
            conversation,
            messages,
        })
    }

    /// Rename a conversation
    pub fn rename_conversation(&self, conversation_id: &str, title: String) -> AiResult<()> {
        self.repo.rename_conversation(conversation_id, title)
    }

    /// Delete a conversation
    pub fn delete_conversation(&self, conversation_id: &str) -> AiResult<()> {
        if !self.repo.delete_conversation(conversation_id)? {
            return Err(AiError::ConversationNotFound(conversation_id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Message Handling
    // =========================================================================

    /// Send a user message and stream the assistant's reply.
    ///
    /// With no `conversation_id` a conversation is created, titled from the
    /// message. `on_event` receives a `Token` per fragment and a terminal
    /// `Complete` or `Error`. Provider failures are not fatal: the
    /// placeholder is finalized as an error message and the outcome is still
    /// returned, so the caller can tell the two apart via the message
    /// status.
    pub async fn send_message<F>(
        &self,
        conversation_id: Option<&str>,
        content: &str,
        options: ChatOptions,
        on_event: F,
    ) -> AiResult<SendOutcome>
    where
        F: Fn(AssistantEvent) + Send + Sync,
    {
        let conversation = match conversation_id {
            Some(id) => self
                .repo
                .get_conversation(id)?
                .ok_or_else(|| AiError::ConversationNotFound(id.to_string()))?,
            None => self
                .repo
                .create_conversation(Some(Conversation::derive_title(content)))?,
        };
        let conversation_id = conversation.id;

        // History before this turn; the payload appends the new message itself
        let history = self.repo.get_messages(&conversation_id)?;

        let user_message = Message::user(conversation_id.clone(), content.to_string());
        self.repo.create_message(&user_message)?;

        let placeholder = Message::assistant(conversation_id.clone(), String::new());
        self.repo.create_message(&placeholder)?;
        let message_id = placeholder.id;

        let payload = build_payload(&history, content);

        let accumulator = Mutex::new(StreamAccumulator::new(
            conversation_id.clone(),
            message_id.clone(),
        ));
        let result = self
            .chat
            .streaming_completion(payload, options, |fragment| {
                let mut accumulator = accumulator
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                accumulator.push(fragment);
                if let Err(err) = self.repo.update_message_content(
                    &conversation_id,
                    &message_id,
                    accumulator.content(),
                ) {
                    log::warn!("failed to apply stream fragment: {}", err);
                }
                on_event(AssistantEvent::Token {
                    conversation_id: conversation_id.clone(),
                    message_id: message_id.clone(),
                    token: fragment.to_string(),
                    is_final: false,
                });
            })
            .await;

        match result {
            Ok(response) => {
                let message = self.repo.complete_message(
                    &conversation_id,
                    &message_id,
                    MessageStatus::Sent,
                    response.content.clone(),
                    Some(response.model.clone()),
                )?;
                on_event(AssistantEvent::Complete {
                    conversation_id: conversation_id.clone(),
                    message_id,
                    full_content: response.content,
                    model: response.model,
                });
                Ok(SendOutcome {
                    conversation_id,
                    message,
                })
            }
            Err(err) => {
                log::error!("assistant turn failed: {}", err);
                let apology = format!(
                    "I'm sorry, I'm having trouble responding right now. {}",
                    err.user_message()
                );
                let message = self.repo.complete_message(
                    &conversation_id,
                    &message_id,
                    MessageStatus::Error,
                    apology,
                    None,
                )?;
                on_event(AssistantEvent::Error {
                    conversation_id: conversation_id.clone(),
                    message_id,
                    code: err.code().as_str().to_string(),
                    message: err.user_message(),
                });
                Ok(SendOutcome {
                    conversation_id,
                    message,
                })
            }
        }
    }
}

/// Build the provider payload from prior turns plus the new user message
fn build_payload(history: &[Message], content: &str) -> Vec<ChatMessage> {
    let mut payload = Vec::with_capacity(history.len() + 2);
    payload.push(ChatMessage::system(DEFAULT_SYSTEM_PROMPT));
    for message in history {
        payload.push(match message.role {
            MessageRole::User => ChatMessage::user(message.content.clone()),
            MessageRole::Assistant => ChatMessage::assistant(message.content.clone()),
            MessageRole::System => ChatMessage::system(message.content.clone()),
        });
    }
    payload.push(ChatMessage::user(content.to_string()));
    payload
}
