// Conversation Repository
//
// In-memory store for conversations and their messages. State lives for the
// process lifetime only; a reload starts from scratch. Clones share the same
// underlying store, so the UI can read mid-stream while the assistant
// service writes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::models::conversation::{
    Conversation, ConversationSummary, Message, MessageStatus,
};
use crate::services::error::{AiError, AiResult};

/// Longest last-message preview shown in conversation lists, in characters
const PREVIEW_MAX_CHARS: usize = 80;

#[derive(Default)]
struct StoreInner {
    conversations: HashMap<String, Conversation>,
    messages: HashMap<String, Vec<Message>>,
}

/// In-memory conversation store
#[derive(Clone, Default)]
pub struct ConversationRepository {
    inner: Arc<RwLock<StoreInner>>,
}

impl ConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AiResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| AiError::Storage("conversation store lock poisoned".to_string()))
    }

    fn write(&self) -> AiResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| AiError::Storage("conversation store lock poisoned".to_string()))
    }

    /// Create a new conversation
    pub fn create_conversation(&self, title: Option<String>) -> AiResult<Conversation> {
        let mut conversation = Conversation::new();
        conversation.title = title;

        let mut store = self.write()?;
        store
            .conversations
            .insert(conversation.id.clone(), conversation.clone());
        store.messages.insert(conversation.id.clone(), Vec::new());

        log::info!("created conversation {}", conversation.id);
        Ok(conversation)
    }

    /// List conversations, most recently updated first
    pub fn list_conversations(&self) -> AiResult<Vec<ConversationSummary>> {
        let store = self.read()?;
        let mut summaries: Vec<ConversationSummary> = store
            .conversations
            .values()
            .map(|conversation| ConversationSummary {
                id: conversation.id.clone(),
                title: conversation.title.clone(),
                message_count: conversation.message_count,
                last_message_preview: store
                    .messages
                    .get(&conversation.id)
                    .and_then(|messages| messages.last())
                    .map(|message| preview(&message.content)),
                created_at: conversation.created_at,
                updated_at: conversation.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Get a conversation by id
    pub fn get_conversation(&self, conversation_id: &str) -> AiResult<Option<Conversation>> {
        Ok(self.read()?.conversations.get(conversation_id).cloned())
    }

    /// Get a conversation's messages in insertion order
    pub fn get_messages(&self, conversation_id: &str) -> AiResult<Vec<Message>> {
        self.read()?
            .messages
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| AiError::ConversationNotFound(conversation_id.to_string()))
    }

    /// Update a conversation's title
    pub fn rename_conversation(&self, conversation_id: &str, title: String) -> AiResult<()> {
        let mut store = self.write()?;
        let conversation = store
            .conversations
            .get_mut(conversation_id)
            .ok_or_else(|| AiError::ConversationNotFound(conversation_id.to_string()))?;
        conversation.title = Some(title);
        conversation.updated_at = Utc::now();
        Ok(())
    }

    /// Delete a conversation and its messages.
    /// Returns whether a conversation was removed.
    pub fn delete_conversation(&self, conversation_id: &str) -> AiResult<bool> {
        let mut store = self.write()?;
        let removed = store.conversations.remove(conversation_id).is_some();
        store.messages.remove(conversation_id);
        Ok(removed)
    }

    /// Append a message to its conversation
    pub fn create_message(&self, message: &Message) -> AiResult<()> {
        let mut store = self.write()?;

        let conversation = store
            .conversations
            .get_mut(&message.conversation_id)
            .ok_or_else(|| AiError::ConversationNotFound(message.conversation_id.clone()))?;
        conversation.message_count += 1;
        conversation.updated_at = Utc::now();

        store
            .messages
            .get_mut(&message.conversation_id)
            .ok_or_else(|| AiError::ConversationNotFound(message.conversation_id.clone()))?
            .push(message.clone());
        Ok(())
    }

    /// Overwrite the content of a pending message.
    ///
    /// Called once per stream fragment with the accumulated text; only the
    /// in-progress placeholder is mutable.
    pub fn update_message_content(
        &self,
        conversation_id: &str,
        message_id: &str,
        content: &str,
    ) -> AiResult<()> {
        let mut store = self.write()?;
        let message = find_message(&mut store, conversation_id, message_id)?;
        if message.status != MessageStatus::Pending {
            return Err(AiError::InvalidRequest(format!(
                "message {} is no longer pending",
                message_id
            )));
        }
        message.content = content.to_string();
        Ok(())
    }

    /// Finalize a pending message with its terminal status and content
    pub fn complete_message(
        &self,
        conversation_id: &str,
        message_id: &str,
        status: MessageStatus,
        content: String,
        model: Option<String>,
    ) -> AiResult<Message> {
        let mut store = self.write()?;

        let message = find_message(&mut store, conversation_id, message_id)?;
        if message.status != MessageStatus::Pending {
            return Err(AiError::InvalidRequest(format!(
                "message {} is no longer pending",
                message_id
            )));
        }
        message.status = status;
        message.content = content;
        message.model = model;
        let completed = message.clone();

        if let Some(conversation) = store.conversations.get_mut(conversation_id) {
            conversation.updated_at = Utc::now();
        }
        Ok(completed)
    }
}

fn find_message<'a>(
    store: &'a mut StoreInner,
    conversation_id: &str,
    message_id: &str,
) -> AiResult<&'a mut Message> {
    store
        .messages
        .get_mut(conversation_id)
        .ok_or_else(|| AiError::ConversationNotFound(conversation_id.to_string()))?
        .iter_mut()
        .find(|message| message.id == message_id)
        .ok_or_else(|| AiError::MessageNotFound(message_id.to_string()))
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_MAX_CHARS {
        return content.to_string();
    }
    let truncated: String = content.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{}...", truncated)
}
