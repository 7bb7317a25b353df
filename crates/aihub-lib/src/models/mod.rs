// Data models shared between services and the frontend

pub mod chat;
pub mod code;
pub mod conversation;
pub mod image;

pub use chat::{ChatMessage, ChatOptions, ChatResponse, ResponseSchema};
pub use code::{CodeAssistance, CodeTask};
pub use conversation::{
    AssistantEvent, Conversation, ConversationDetail, ConversationSummary, Message, MessageRole,
    MessageStatus,
};
pub use image::{GeneratedImage, ImageModel, ImageOptions, ImageQuality, ImageSize};
