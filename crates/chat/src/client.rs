//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};

/// Instruction sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for a sign language learning app (GestureAI). You help users with sign language (ASL and Arabic ArSL), fingerspelling, and general questions about the app. Be concise and friendly. Support both English and Arabic when relevant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Anything that can turn a message history into an assistant reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete `history` (user/assistant turns, oldest first).
    async fn complete(&self, history: &[ChatMessage]) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// HTTP client for `POST {base}/chat/completions`.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ChatConfig,
}

impl OpenAiClient {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: ChatConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, history: &[ChatMessage]) -> CompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, history: &[ChatMessage]) -> Result<String> {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ChatError::NotConfigured),
        };

        let url = self.config.completions_url();
        tracing::debug!(
            %url,
            turns = history.len(),
            model = %self.config.model,
            "Sending chat completion"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(history))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Request failed".to_string());
            tracing::warn!(status = status.as_u16(), %message, "Chat completion failed");
            return Err(ChatError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

/// Extract `error.message` from a provider error body.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error?
        .message
        .filter(|m| !m.trim().is_empty())
}

/// Extract the first choice's trimmed content.
fn parse_reply(body: &str) -> Result<String> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|_| ChatError::InvalidResponse)?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ChatError::InvalidResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_prepends_system_prompt() {
        let client = OpenAiClient::new(ChatConfig::default().with_api_key("sk-test"));
        let history = vec![ChatMessage::user("How do I sign B?")];
        let body = serde_json::to_value(client.request_body(&history)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "How do I sign B?");
    }

    #[test]
    fn test_parse_reply_trims_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Open palm.  "}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Open palm.");
    }

    #[test]
    fn test_parse_reply_rejects_missing_content() {
        assert_eq!(parse_reply(r#"{"choices":[]}"#), Err(ChatError::InvalidResponse));
        assert_eq!(
            parse_reply(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(ChatError::InvalidResponse)
        );
        assert_eq!(parse_reply("not json"), Err(ChatError::InvalidResponse));
    }

    #[test]
    fn test_provider_message_extraction() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            provider_message(body).as_deref(),
            Some("Incorrect API key provided")
        );
        assert_eq!(provider_message("<html>bad gateway</html>"), None);
        assert_eq!(provider_message(r#"{"error":{}}"#), None);
    }

    #[tokio::test]
    async fn test_unconfigured_client_refuses_without_request() {
        // Base URL is unroutable; reaching the network would surface as Request.
        let client = OpenAiClient::new(ChatConfig::default().with_base_url("http://0.0.0.0:1"));
        let err = client
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert_eq!(err, ChatError::NotConfigured);
    }
}
