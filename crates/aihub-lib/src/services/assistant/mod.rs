// AI Assistant Module
//
// Orchestrates the chat UI flow: conversation management plus streaming
// message turns applied to the in-memory conversation store.

pub mod service;
pub mod stream;

pub use service::{AssistantService, SendOutcome, DEFAULT_SYSTEM_PROMPT};
pub use stream::StreamAccumulator;
