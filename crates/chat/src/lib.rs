//! Assistant chat for the sign language app.
//!
//! [`ChatConfig`] resolves the endpoint and credential from the environment,
//! [`OpenAiClient`] talks to any OpenAI-compatible completion API, and
//! [`ChatConversation`] keeps the exchange history.

mod client;
mod config;
mod conversation;
mod error;

pub use client::{ChatBackend, ChatMessage, OpenAiClient, Role, SYSTEM_PROMPT};
pub use config::{
    ChatAvailability, ChatConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
pub use conversation::{ChatConversation, ChatExchange};
pub use error::{ChatError, Result};
