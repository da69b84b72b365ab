//! Shared event contracts between the sign pipeline and its front ends.
//!
//! This crate defines the DTOs for events the core emits. Using shared types
//! keeps field names in one place for every consumer.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{
    emit_event, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus,
    TracingEventBus,
};

use chrono::{DateTime, Utc};
use gestureai_signs::{Language, Mode};
use serde::{Deserialize, Serialize};

/// Event emitted when the displayed live symbol changes.
///
/// Producers: poll loop
/// Consumers: front end (big letter display)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolChangedEvent {
    /// Rendered symbol text ("A", "Hello", "?", "...").
    pub symbol: String,
    /// Finger bit string ("TIMRP"), absent when no hand is visible.
    #[serde(default)]
    pub fingers: Option<String>,
    pub mode: Mode,
    pub language: Language,
    /// Frame timestamp in milliseconds.
    pub ts_ms: u64,
}

/// Event emitted when a stabilizer commits a held symbol.
///
/// Producers: translator and practice contexts
/// Consumers: front end, replay transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCommittedEvent {
    pub symbol: String,
    /// Stabilizer context name ("translator" or "practice").
    pub context: String,
    /// How long the symbol was held before committing.
    pub held_ms: u64,
    pub at: DateTime<Utc>,
}

/// Event emitted when the accumulated translator text changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChangedEvent {
    pub text: String,
}

/// Event emitted when the practice target changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeTargetEvent {
    pub target: String,
    pub language: Language,
    pub score: u32,
    pub attempts: u32,
}

/// Event emitted when a practice attempt is judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeFeedbackEvent {
    pub correct: bool,
    pub expected: String,
    pub got: String,
    pub score: u32,
    pub attempts: u32,
}

/// Status of the landmark detector as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum DetectorStatusPayload {
    Initializing,
    Ready,
    Failed(String),
}

/// Event emitted when detector initialization progresses or fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorStatusEvent {
    pub status: DetectorStatusPayload,
    pub at: DateTime<Utc>,
}

/// Event emitted when the assistant replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReplyEvent {
    pub exchange_id: String,
    pub reply: String,
}

/// Event emitted when a chat exchange fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatErrorEvent {
    pub exchange_id: String,
    pub error: String,
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Live symbol changed.
    pub const SIGN_SYMBOL: &str = "sign:symbol";
    /// Held symbol committed.
    pub const SIGN_COMMITTED: &str = "sign:committed";
    /// Translator text changed.
    pub const TRANSLATOR_TEXT: &str = "translator:text";
    /// New practice target.
    pub const PRACTICE_TARGET: &str = "practice:target";
    /// Practice attempt judged.
    pub const PRACTICE_FEEDBACK: &str = "practice:feedback";
    /// Detector status.
    pub const DETECTOR_STATUS: &str = "detector:status";
    /// Assistant reply.
    pub const CHAT_REPLY: &str = "chat:reply";
    /// Chat exchange failed.
    pub const CHAT_ERROR: &str = "chat:error";
}
