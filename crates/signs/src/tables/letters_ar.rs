use crate::language::Mode;
use crate::rules::{Rule, RuleTable};
use crate::symbol::Symbol;

/// Arabic manual alphabet, أ through ي.
///
/// Independent of the English table even where patterns coincide.
pub const AR_LETTERS: RuleTable = RuleTable {
    name: "ar-letters",
    rules: &[
        Rule::letter("01000", "أ"),
        Rule::letter("01111", "ب"),
        Rule::letter("01100", "ت"),
        Rule::letter("00010", "ث"),
        Rule::letter("00100", "ج"),
        Rule::letter("00101", "ح"),
        Rule::letter("00110", "خ"),
        Rule::letter("10000", "د"),
        Rule::letter("01001", "ذ"),
        Rule::letter("10100", "ر"),
        Rule::letter("01010", "ز"),
        Rule::letter("11111", "س"),
        Rule::letter("01110", "ش"),
        Rule::letter("01011", "ص"),
        Rule::letter("10010", "ض"),
        Rule::letter("10011", "ط"),
        Rule::letter("10110", "ظ"),
        Rule::letter("11001", "ع"),
        Rule::letter("11010", "غ"),
        Rule::letter("-0111", "ف"),
        Rule::letter("11101", "ق"),
        Rule::letter("11100", "ك"),
        Rule::letter("11000", "ل"),
        Rule::letter("00000", "م"),
        Rule::letter("00011", "ن"),
        Rule::letter("11110", "ه"),
        Rule::letter("10001", "و"),
        Rule::letter("00001", "ي"),
    ],
    fallback: Symbol::Unknown(Mode::Letters),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ARABIC_ALPHABET;
    use gestureai_landmarks::FingerState;

    fn state(bits: &str) -> FingerState {
        let b: Vec<bool> = bits.chars().map(|c| c == '1').collect();
        FingerState::new(b[0], b[1], b[2], b[3], b[4])
    }

    #[test]
    fn test_open_hand_without_thumb_is_ba() {
        assert_eq!(AR_LETTERS.classify(&state("01111")), Symbol::Letter("ب"));
    }

    #[test]
    fn test_fist_is_meem() {
        assert_eq!(AR_LETTERS.classify(&state("00000")), Symbol::Letter("م"));
    }

    #[test]
    fn test_table_covers_alphabet_in_order() {
        let letters: Vec<&str> = AR_LETTERS
            .rules
            .iter()
            .filter_map(|rule| rule.symbol.text())
            .collect();
        assert_eq!(letters, ARABIC_ALPHABET.to_vec());
    }

    #[test]
    fn test_every_letter_is_reachable() {
        assert!(AR_LETTERS.shadowed_rules().is_empty());
        for letter in ARABIC_ALPHABET {
            assert!(
                FingerState::all().any(|s| AR_LETTERS.classify(&s) == Symbol::Letter(letter)),
                "letter {letter}"
            );
        }
    }

    #[test]
    fn test_coverage_gaps_fall_back_to_unknown() {
        assert_eq!(
            AR_LETTERS.unmatched_states(),
            vec![state("01101"), state("10101"), state("11011")]
        );
        assert_eq!(
            AR_LETTERS.classify(&state("10101")),
            Symbol::Unknown(Mode::Letters)
        );
    }

    #[test]
    fn test_fa_ignores_thumb() {
        assert_eq!(AR_LETTERS.classify(&state("00111")), Symbol::Letter("ف"));
        assert_eq!(AR_LETTERS.classify(&state("10111")), Symbol::Letter("ف"));
    }
}
