//! Ordered decision lists.

use crate::symbol::Symbol;
use gestureai_landmarks::FingerState;

/// Required state per finger, `None` meaning "either".
///
/// Written as a five-character string in thumb, index, middle, ring, pinky
/// order: `1` open, `0` closed, `-` don't care. `"-0111"` matches any thumb
/// with the index closed and the other three fingers open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerPattern {
    fingers: [Option<bool>; 5],
}

impl FingerPattern {
    /// Parse the five-character notation. Panics on malformed input, which
    /// turns a typo in a `const` table into a compile error.
    pub const fn parse(spec: &str) -> Self {
        let bytes = spec.as_bytes();
        assert!(bytes.len() == 5, "finger pattern must have 5 positions");

        let mut fingers = [None; 5];
        let mut i = 0;
        while i < 5 {
            fingers[i] = match bytes[i] {
                b'1' => Some(true),
                b'0' => Some(false),
                b'-' => None,
                _ => panic!("finger pattern positions must be '1', '0' or '-'"),
            };
            i += 1;
        }
        Self { fingers }
    }

    pub fn matches(&self, state: &FingerState) -> bool {
        self.fingers
            .iter()
            .zip(state.as_array())
            .all(|(required, open)| required.map_or(true, |r| r == open))
    }

    /// Concrete vectors this pattern accepts.
    pub fn expand(&self) -> impl Iterator<Item = FingerState> + '_ {
        FingerState::all().filter(move |state| self.matches(state))
    }
}

impl std::fmt::Display for FingerPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for finger in self.fingers {
            f.write_str(match finger {
                Some(true) => "1",
                Some(false) => "0",
                None => "-",
            })?;
        }
        Ok(())
    }
}

/// One (pattern, result) entry of a decision list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub pattern: FingerPattern,
    pub symbol: Symbol,
}

impl Rule {
    pub const fn new(pattern: &str, symbol: Symbol) -> Self {
        Self {
            pattern: FingerPattern::parse(pattern),
            symbol,
        }
    }

    pub const fn letter(pattern: &str, letter: &'static str) -> Self {
        Self::new(pattern, Symbol::Letter(letter))
    }

    pub const fn word(pattern: &str, word: &'static str) -> Self {
        Self::new(pattern, Symbol::Word(word))
    }

    pub const fn gesture(pattern: &str, gesture: &'static str) -> Self {
        Self::new(pattern, Symbol::Gesture(gesture))
    }
}

/// Rules evaluated top-down; first match wins, `fallback` when none does.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub name: &'static str,
    pub rules: &'static [Rule],
    pub fallback: Symbol,
}

impl RuleTable {
    pub fn classify(&self, state: &FingerState) -> Symbol {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(state))
            .map(|rule| rule.symbol)
            .unwrap_or(self.fallback)
    }

    /// Every rule matching `state`, in evaluation order, with its position.
    pub fn matching_rules<'a>(
        &'a self,
        state: &'a FingerState,
    ) -> impl Iterator<Item = (usize, &'a Rule)> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.pattern.matches(state))
    }

    /// Position of the first rule producing `text`.
    pub fn position_of(&self, text: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.symbol.text() == Some(text))
    }

    /// Rules that can never fire because earlier rules cover all of their vectors.
    pub fn shadowed_rules(&self) -> Vec<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(position, rule)| {
                rule.pattern.expand().all(|state| {
                    self.matching_rules(&state)
                        .next()
                        .map_or(false, |(first, _)| first < *position)
                })
            })
            .collect()
    }

    /// Vectors no rule matches.
    pub fn unmatched_states(&self) -> Vec<FingerState> {
        FingerState::all()
            .filter(|state| !self.rules.iter().any(|rule| rule.pattern.matches(state)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
