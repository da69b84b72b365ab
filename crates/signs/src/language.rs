use serde::{Deserialize, Serialize};

/// Sign language whose tables are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// American manual alphabet, English vocabulary.
    #[default]
    #[serde(rename = "EN", alias = "en")]
    En,
    /// Arabic manual alphabet (ArSL), Arabic vocabulary.
    #[serde(rename = "AR", alias = "ar")]
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ar => "AR",
        }
    }

    /// BCP 47 tag handed to speech synthesis.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ar => "ar-SA",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Fingerspelling or fixed-vocabulary word recognition. Orthogonal to [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Letters,
    Words,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Letters => "LETTERS",
            Mode::Words => "WORDS",
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Letters => Mode::Words,
            Mode::Words => Mode::Letters,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::Ar).unwrap(), "\"AR\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_mode_serde_labels() {
        assert_eq!(serde_json::to_string(&Mode::Words).unwrap(), "\"WORDS\"");
        let mode: Mode = serde_json::from_str("\"LETTERS\"").unwrap();
        assert_eq!(mode, Mode::Letters);
    }

    #[test]
    fn test_speech_tags() {
        assert_eq!(Language::En.speech_tag(), "en-US");
        assert_eq!(Language::Ar.speech_tag(), "ar-SA");
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Language::En.toggled(), Language::Ar);
        assert_eq!(Mode::Words.toggled(), Mode::Letters);
    }
}
