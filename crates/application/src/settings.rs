use gestureai_signs::{Language, Mode};
use serde::{Deserialize, Serialize};

/// App section in focus. Only one stabilizer context runs at a time, chosen
/// by the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Translator,
    Practice,
    Assistant,
    Faq,
}

impl Section {
    /// Sections that show the camera and classify frames.
    pub fn uses_camera(&self) -> bool {
        matches!(self, Section::Translator | Section::Practice)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Translator => "translator",
            Section::Practice => "practice",
            Section::Assistant => "assistant",
            Section::Faq => "faq",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the frame step needs to know to classify a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecognitionSettings {
    pub section: Section,
    pub mode: Mode,
    pub language: Language,
}

impl RecognitionSettings {
    /// The practice view always classifies letters.
    pub fn effective_mode(&self) -> Mode {
        match self.section {
            Section::Practice => Mode::Letters,
            _ => self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_forces_letters() {
        let settings = RecognitionSettings {
            section: Section::Practice,
            mode: Mode::Words,
            language: Language::En,
        };
        assert_eq!(settings.effective_mode(), Mode::Letters);

        let translator = RecognitionSettings {
            section: Section::Translator,
            ..settings
        };
        assert_eq!(translator.effective_mode(), Mode::Words);
    }

    #[test]
    fn test_section_serde() {
        assert_eq!(
            serde_json::to_string(&Section::Assistant).unwrap(),
            "\"assistant\""
        );
        assert!(Section::Practice.uses_camera());
        assert!(!Section::Faq.uses_camera());
    }
}
