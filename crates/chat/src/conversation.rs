//! Conversation history with per-exchange error isolation.

use chrono::{DateTime, Utc};
use gestureai_events::{emit_event, event_names, ChatErrorEvent, ChatReplyEvent, EventBusRef};
use serde::Serialize;
use uuid::Uuid;

use crate::client::{ChatBackend, ChatMessage};

/// One user message and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatExchange {
    pub id: Uuid,
    pub user: String,
    pub reply: Option<String>,
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

impl ChatExchange {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Ordered list of exchanges. A failed exchange keeps its error and never
/// affects earlier ones; it is left out of the history sent upstream.
#[derive(Default, Clone, Serialize)]
pub struct ChatConversation {
    exchanges: Vec<ChatExchange>,
    #[serde(skip)]
    events: Option<EventBusRef>,
}

impl std::fmt::Debug for ChatConversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConversation")
            .field("exchanges", &self.exchanges)
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl ChatConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `chat:reply` / `chat:error` on `events` as each exchange finishes.
    pub fn with_events(events: EventBusRef) -> Self {
        Self {
            exchanges: Vec::new(),
            events: Some(events),
        }
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatExchange> {
        self.exchanges.iter().find(|e| e.id == id)
    }

    /// Successful turns as user/assistant messages, oldest first.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.exchanges
            .iter()
            .filter_map(|e| e.reply.as_ref().map(|reply| (e, reply)))
            .flat_map(|(e, reply)| {
                [
                    ChatMessage::user(e.user.clone()),
                    ChatMessage::assistant(reply.clone()),
                ]
            })
            .collect()
    }

    /// Send a message. Blank input is ignored and returns `None`.
    pub async fn send<B>(&mut self, backend: &B, text: &str) -> Option<&ChatExchange>
    where
        B: ChatBackend + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut messages = self.history();
        messages.push(ChatMessage::user(text));

        let mut exchange = ChatExchange {
            id: Uuid::new_v4(),
            user: text.to_string(),
            reply: None,
            error: None,
            at: Utc::now(),
        };

        match backend.complete(&messages).await {
            Ok(reply) => {
                tracing::debug!(id = %exchange.id, "Chat reply received");
                exchange.reply = Some(reply);
            }
            Err(e) => {
                tracing::warn!(id = %exchange.id, error = %e, "Chat exchange failed");
                exchange.error = Some(e.to_string());
            }
        }

        self.publish(&exchange);
        self.exchanges.push(exchange);
        self.exchanges.last()
    }

    fn publish(&self, exchange: &ChatExchange) {
        let Some(events) = &self.events else {
            return;
        };
        let exchange_id = exchange.id.to_string();
        match (&exchange.reply, &exchange.error) {
            (Some(reply), _) => emit_event(
                events.as_ref(),
                event_names::CHAT_REPLY,
                &ChatReplyEvent {
                    exchange_id,
                    reply: reply.clone(),
                },
            ),
            (None, Some(error)) => emit_event(
                events.as_ref(),
                event_names::CHAT_ERROR,
                &ChatErrorEvent {
                    exchange_id,
                    error: error.clone(),
                },
            ),
            (None, None) => {}
        }
    }

    /// Resubmit a failed exchange's message as a new exchange.
    ///
    /// The failed entry is removed first. Returns `None` if `id` is unknown or
    /// the exchange did not fail.
    pub async fn retry<B>(&mut self, backend: &B, id: Uuid) -> Option<&ChatExchange>
    where
        B: ChatBackend + ?Sized,
    {
        let pos = self
            .exchanges
            .iter()
            .position(|e| e.id == id && e.is_failed())?;
        let failed = self.exchanges.remove(pos);
        self.send(backend, &failed.user).await
    }
}
