use crate::language::Mode;
use crate::rules::{Rule, RuleTable};
use crate::symbol::Symbol;

pub const EN_WORDS: RuleTable = RuleTable {
    name: "en-words",
    rules: &[
        Rule::word("11111", "Hello"),
        Rule::word("-1100", "Peace"),
        Rule::word("10000", "Good"),
        Rule::word("-0000", "Yes"),
        Rule::word("-1000", "One"),
        Rule::word("10001", "Call Me"),
        Rule::word("11001", "I Love You"),
        Rule::word("11110", "Thanks"),
        Rule::word("00011", "No"),
        Rule::word("00100", "Please"),
        Rule::word("10100", "Water"),
        Rule::word("10101", "Sorry"),
        Rule::word("01010", "Help"),
        Rule::word("01011", "More"),
        Rule::word("00111", "Fine"),
    ],
    fallback: Symbol::Unknown(Mode::Words),
};

pub const AR_WORDS: RuleTable = RuleTable {
    name: "ar-words",
    rules: &[
        Rule::word("11111", "مرحبا"),
        Rule::word("-1100", "سلام"),
        Rule::word("10000", "تمام"),
        Rule::word("-0000", "نعم"),
        Rule::word("11001", "أحبك"),
        Rule::word("11110", "شكراً"),
        Rule::word("00011", "لا"),
        Rule::word("00100", "من فضلك"),
        Rule::word("10100", "ماء"),
        Rule::word("10101", "آسف"),
        Rule::word("01010", "مساعدة"),
        Rule::word("01011", "المزيد"),
        Rule::word("00111", "جيد"),
    ],
    fallback: Symbol::Unknown(Mode::Words),
};

#[cfg(test)]
mod tests {
    use super::*;
    use gestureai_landmarks::FingerState;

    fn state(bits: &str) -> FingerState {
        let b: Vec<bool> = bits.chars().map(|c| c == '1').collect();
        FingerState::new(b[0], b[1], b[2], b[3], b[4])
    }

    #[test]
    fn test_open_hand_is_hello() {
        assert_eq!(EN_WORDS.classify(&state("11111")), Symbol::Word("Hello"));
        assert_eq!(AR_WORDS.classify(&state("11111")), Symbol::Word("مرحبا"));
    }

    #[test]
    fn test_thumb_only_is_good_before_yes() {
        assert_eq!(EN_WORDS.classify(&state("10000")), Symbol::Word("Good"));
        assert_eq!(EN_WORDS.classify(&state("00000")), Symbol::Word("Yes"));
        let positions: Vec<usize> = EN_WORDS
            .matching_rules(&state("10000"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![2, 3]);
    }

    #[test]
    fn test_peace_ignores_thumb() {
        assert_eq!(EN_WORDS.classify(&state("01100")), Symbol::Word("Peace"));
        assert_eq!(EN_WORDS.classify(&state("11100")), Symbol::Word("Peace"));
    }

    #[test]
    fn test_arabic_has_no_call_me_or_one() {
        assert_eq!(
            AR_WORDS.classify(&state("10001")),
            Symbol::Unknown(Mode::Words)
        );
        assert_eq!(
            AR_WORDS.classify(&state("01000")),
            Symbol::Unknown(Mode::Words)
        );
        assert_eq!(EN_WORDS.classify(&state("01000")), Symbol::Word("One"));
    }

    #[test]
    fn test_unmatched_word_renders_as_ellipsis() {
        let symbol = EN_WORDS.classify(&state("01101"));
        assert_eq!(symbol.as_str(), "...");
    }

    #[test]
    fn test_every_word_rule_fires() {
        assert!(EN_WORDS.shadowed_rules().is_empty());
        assert!(AR_WORDS.shadowed_rules().is_empty());
        assert_eq!(EN_WORDS.len(), 15);
        assert_eq!(AR_WORDS.len(), 13);
    }
}
