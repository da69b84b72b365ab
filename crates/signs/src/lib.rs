//! Sign classification for gestureai.
//!
//! Maps a [`FingerState`] to a [`Symbol`] through ordered decision lists, one
//! per (mode, language) pair. Rules are tried top-down and the first match
//! wins, so the order of each table is part of its meaning.
//!
//! ```ignore
//! use gestureai_signs::{classify, Language, Mode};
//!
//! let symbol = classify(fingers, Mode::Letters, Language::En);
//! println!("{}", symbol); // "A", "?", ...
//! ```

mod alphabet;
mod classify;
mod language;
mod rules;
mod symbol;
mod tables;

pub use alphabet::{alphabet, ARABIC_ALPHABET, LATIN_ALPHABET};
pub use classify::{classify, classify_hands, table_for};
pub use language::{Language, Mode};
pub use rules::{FingerPattern, Rule, RuleTable};
pub use symbol::{Symbol, NO_DETECTION_TEXT, UNKNOWN_LETTER_TEXT};
pub use tables::{AR_LETTERS, AR_WORDS, EN_LETTERS, EN_WORDS};

pub use gestureai_landmarks::FingerState;
