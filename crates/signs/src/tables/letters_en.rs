use crate::language::Mode;
use crate::rules::{Rule, RuleTable};
use crate::symbol::Symbol;

/// English fingerspelling.
///
/// `E` sits below `W` with a pattern `W` already covers, so it never fires.
pub const EN_LETTERS: RuleTable = RuleTable {
    name: "en-letters",
    rules: &[
        // Index and thumb form a circle, other three up.
        Rule::letter("-0111", "F"),
        Rule::letter("-1110", "W"),
        // Four up, thumb tucked.
        Rule::letter("01111", "B"),
        // Everything open, read as a wide curve.
        Rule::letter("11111", "C"),
        Rule::letter("11110", "E"),
        Rule::letter("00001", "I"),
        Rule::letter("10001", "Y"),
        Rule::letter("11000", "L"),
        Rule::letter("01100", "V"),
        // Thumb between index and middle.
        Rule::letter("11100", "K"),
        Rule::letter("-1000", "D"),
        // Fist: thumb alongside is A, thumb folded over is S.
        Rule::letter("10000", "A"),
        Rule::letter("00000", "S"),
        Rule::gesture("-1001", "🤟"),
        Rule::letter("00011", "N"),
        Rule::letter("10100", "G"),
        Rule::letter("01010", "H"),
        // Static stand-in; the real J is a motion.
        Rule::letter("00010", "J"),
        Rule::letter("00100", "M"),
        Rule::letter("10011", "O"),
        Rule::letter("10110", "P"),
        Rule::letter("01011", "Q"),
        Rule::letter("11010", "R"),
        Rule::letter("10010", "T"),
        Rule::letter("11101", "U"),
        Rule::letter("00110", "X"),
        // Static stand-in; the real Z is a motion.
        Rule::letter("00101", "Z"),
    ],
    fallback: Symbol::Unknown(Mode::Letters),
};
