//! Accumulated translator text.

use gestureai_signs::{Mode, Symbol};
use gestureai_stabilizer::{Commit, CommitSink};

/// Text built from committed symbols. Words are space-prefixed, letters are
/// concatenated. The user may also edit it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAccumulator {
    text: String,
    mode: Mode,
    /// Bumped on every change so observers can detect edits cheaply.
    revision: u64,
}

impl TextAccumulator {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Mode used to join subsequent appends.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Append a recognized symbol. Returns false (and does nothing) for `?`
    /// and `...`.
    pub fn append(&mut self, symbol: Symbol) -> bool {
        let Some(piece) = symbol.text() else {
            return false;
        };
        if self.mode == Mode::Words {
            self.text.push(' ');
        }
        self.text.push_str(piece);
        self.touch();
        true
    }

    pub fn space(&mut self) {
        self.text.push(' ');
        self.touch();
    }

    /// Remove the last character.
    pub fn backspace(&mut self) -> Option<char> {
        let removed = self.text.pop();
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.text.is_empty() {
            self.text.clear();
            self.touch();
        }
    }

    /// Replace the text with a manual edit.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl CommitSink for TextAccumulator {
    fn on_commit(&mut self, commit: &Commit) {
        if self.append(commit.symbol) {
            tracing::debug!(
                symbol = %commit.symbol,
                len = self.text.len(),
                "Appended to translator text"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_concatenate() {
        let mut text = TextAccumulator::new(Mode::Letters);
        text.append(Symbol::Letter("H"));
        text.append(Symbol::Letter("I"));
        assert_eq!(text.text(), "HI");
    }

    #[test]
    fn test_words_are_space_prefixed() {
        let mut text = TextAccumulator::new(Mode::Words);
        text.append(Symbol::Word("Hello"));
        text.append(Symbol::Word("Friend"));
        assert_eq!(text.text(), " Hello Friend");
    }

    #[test]
    fn test_placeholders_never_appended() {
        let mut text = TextAccumulator::new(Mode::Letters);
        assert!(!text.append(Symbol::Unknown(Mode::Letters)));
        assert!(!text.append(Symbol::NoHand));
        assert_eq!(text.text(), "");
        assert_eq!(text.revision(), 0);
    }

    #[test]
    fn test_gesture_appends() {
        let mut text = TextAccumulator::new(Mode::Letters);
        assert!(text.append(Symbol::Gesture("🤟")));
        assert_eq!(text.text(), "🤟");
    }

    #[test]
    fn test_backspace_is_char_aware() {
        let mut text = TextAccumulator::new(Mode::Letters);
        text.append(Symbol::Letter("ب"));
        text.append(Symbol::Gesture("🤟"));
        assert_eq!(text.backspace(), Some('🤟'));
        assert_eq!(text.text(), "ب");
        assert_eq!(text.backspace(), Some('ب'));
        assert_eq!(text.backspace(), None);
    }

    #[test]
    fn test_edit_operations() {
        let mut text = TextAccumulator::new(Mode::Letters);
        text.append(Symbol::Letter("A"));
        text.space();
        text.append(Symbol::Letter("B"));
        assert_eq!(text.text(), "A B");

        text.set_text("typed by hand");
        assert_eq!(text.text(), "typed by hand");

        let rev = text.revision();
        text.clear();
        assert_eq!(text.text(), "");
        assert!(text.revision() > rev);
    }

    #[test]
    fn test_commit_sink_appends_in_current_mode() {
        let mut text = TextAccumulator::new(Mode::Letters);
        text.on_commit(&Commit {
            symbol: Symbol::Letter("S"),
            at_ms: 1200,
            held_ms: 1200,
        });
        text.set_mode(Mode::Words);
        text.on_commit(&Commit {
            symbol: Symbol::Word("Yes"),
            at_ms: 3000,
            held_ms: 1250,
        });
        assert_eq!(text.text(), "S Yes");
    }
}
