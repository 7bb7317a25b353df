// AIHub Shared Library
// Models, repositories, services, and utilities behind the AIHub dashboard.
//
// The crate is the service core consumed by the AIHub front end: an
// OpenAI-backed provider layer (chat completions, streaming, structured
// output, image generation), the in-memory conversation state the chat UI
// renders, and the shared error taxonomy surfaced to users.

pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

// Re-export the types most callers need
pub use config::OpenAiConfig;
pub use services::error::{AiError, AiErrorCode, AiResult};
pub use services::{AiProvider, AssistantService, ChatService, CodeService, ImageService};
