//! Classification results.

use serde::{Serialize, Serializer};

use crate::language::Mode;

/// Rendered text for a hand the letter tables could not classify.
pub const UNKNOWN_LETTER_TEXT: &str = "?";

/// Rendered text for "no hand" and for an unclassified word sign.
pub const NO_DETECTION_TEXT: &str = "...";

/// Per-frame classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    /// A single Latin or Arabic letter.
    Letter(&'static str),
    /// A word or short phrase from the fixed vocabulary.
    Word(&'static str),
    /// A recognized hand shape that is not a letter (e.g. 🤟).
    Gesture(&'static str),
    /// A hand was present but no rule matched.
    Unknown(Mode),
    /// No hand in the frame.
    #[default]
    NoHand,
}

impl Symbol {
    /// Text shown in the live readout.
    ///
    /// Unmatched letters render as `?` but unmatched words render as `...`,
    /// the same as an empty frame.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Symbol::Letter(text) | Symbol::Word(text) | Symbol::Gesture(text) => text,
            Symbol::Unknown(Mode::Letters) => UNKNOWN_LETTER_TEXT,
            Symbol::Unknown(Mode::Words) => NO_DETECTION_TEXT,
            Symbol::NoHand => NO_DETECTION_TEXT,
        }
    }

    /// True for anything a rule produced.
    pub fn is_sign(&self) -> bool {
        matches!(
            self,
            Symbol::Letter(_) | Symbol::Word(_) | Symbol::Gesture(_)
        )
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Symbol::Letter(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Symbol::Unknown(_))
    }

    pub fn is_no_hand(&self) -> bool {
        matches!(self, Symbol::NoHand)
    }

    /// The sign text, or `None` for the unknown/no-hand sentinels.
    pub fn text(&self) -> Option<&'static str> {
        match *self {
            Symbol::Letter(text) | Symbol::Word(text) | Symbol::Gesture(text) => Some(text),
            Symbol::Unknown(_) | Symbol::NoHand => None,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
