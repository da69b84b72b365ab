use crate::language::Language;

/// Practice targets for English.
pub const LATIN_ALPHABET: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Practice targets for Arabic.
pub const ARABIC_ALPHABET: [&str; 28] = [
    "أ", "ب", "ت", "ث", "ج", "ح", "خ", "د", "ذ", "ر", "ز", "س", "ش", "ص", "ض", "ط", "ظ", "ع",
    "غ", "ف", "ق", "ك", "ل", "م", "ن", "ه", "و", "ي",
];

pub fn alphabet(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &LATIN_ALPHABET,
        Language::Ar => &ARABIC_ALPHABET,
    }
}
