use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("API key not configured. Set GESTUREAI_OPENAI_API_KEY or OPENAI_API_KEY.")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    /// Non-2xx response; `message` comes from the provider body when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from API")]
    InvalidResponse,
}

impl Serialize for ChatError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Request(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
