/// Stabilizer polling cadence.
pub const POLL_INTERVAL_MS: u64 = 250;

/// How long a symbol must be held before it commits.
pub const HOLD_MS: u64 = gestureai_stabilizer::DEFAULT_HOLD_MS;

/// How long practice feedback stays up before the next attempt.
pub const FEEDBACK_DELAY_MS: u64 = gestureai_practice::DEFAULT_FEEDBACK_DELAY_MS;

/// A displayed symbol is spoken once it has been shown this long.
pub const SPEECH_DEBOUNCE_MS: u64 = 1000;

/// Stabilizer context names, used in logs and commit events.
pub const TRANSLATOR_CONTEXT: &str = "translator";
pub const PRACTICE_CONTEXT: &str = "practice";
