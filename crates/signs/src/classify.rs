use gestureai_landmarks::{FingerState, HandLandmarks};

use crate::language::{Language, Mode};
use crate::rules::RuleTable;
use crate::symbol::Symbol;
use crate::tables::{AR_LETTERS, AR_WORDS, EN_LETTERS, EN_WORDS};

/// Decision list used for a mode and language.
pub fn table_for(mode: Mode, language: Language) -> &'static RuleTable {
    match (mode, language) {
        (Mode::Letters, Language::En) => &EN_LETTERS,
        (Mode::Letters, Language::Ar) => &AR_LETTERS,
        (Mode::Words, Language::En) => &EN_WORDS,
        (Mode::Words, Language::Ar) => &AR_WORDS,
    }
}

/// Classify one finger vector. Pure: no state survives between calls.
pub fn classify(fingers: FingerState, mode: Mode, language: Language) -> Symbol {
    table_for(mode, language).classify(&fingers)
}

/// Classify a detector frame. Only the first hand is considered.
pub fn classify_hands(hands: &[HandLandmarks], mode: Mode, language: Language) -> Symbol {
    match hands.first() {
        Some(hand) => classify(FingerState::from_landmarks(hand), mode, language),
        None => Symbol::NoHand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_deterministic() {
        for mode in [Mode::Letters, Mode::Words] {
            for language in [Language::En, Language::Ar] {
                for fingers in FingerState::all() {
                    assert_eq!(
                        classify(fingers, mode, language),
                        classify(fingers, mode, language)
                    );
                }
            }
        }
    }

    #[test]
    fn test_letters_fist_and_thumb() {
        let fist = FingerState::new(false, false, false, false, false);
        let thumb = FingerState::new(true, false, false, false, false);
        assert_eq!(classify(fist, Mode::Letters, Language::En).as_str(), "S");
        assert_eq!(classify(thumb, Mode::Letters, Language::En).as_str(), "A");
    }

    #[test]
    fn test_words_open_hand() {
        let open = FingerState::new(true, true, true, true, true);
        assert_eq!(classify(open, Mode::Words, Language::En).as_str(), "Hello");
        assert_eq!(classify(open, Mode::Letters, Language::En).as_str(), "C");
        assert_eq!(classify(open, Mode::Letters, Language::Ar).as_str(), "س");
    }

    #[test]
    fn test_no_hands_is_no_detection() {
        assert_eq!(
            classify_hands(&[], Mode::Letters, Language::En),
            Symbol::NoHand
        );
    }

    #[test]
    fn test_unknown_sentinel_depends_on_mode() {
        let gap = FingerState::new(false, true, true, false, true);
        assert_eq!(classify(gap, Mode::Letters, Language::En).as_str(), "?");
        assert_eq!(classify(gap, Mode::Words, Language::Ar).as_str(), "...");
    }
}
