//! Speech output scheduling.

use gestureai_signs::{Language, Symbol, NO_DETECTION_TEXT, UNKNOWN_LETTER_TEXT};

/// A text-to-speech engine.
pub trait SpeechSynthesizer: Send {
    /// Stop any utterance in progress.
    fn cancel(&mut self);

    /// Start speaking `text` in the voice for `lang_tag` (e.g. "ar-SA").
    fn speak(&mut self, text: &str, lang_tag: &str);
}

/// Discards all speech.
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn cancel(&mut self) {}

    fn speak(&mut self, _text: &str, _lang_tag: &str) {}
}

/// Whether `text` is worth saying out loud.
pub fn is_speakable(text: &str) -> bool {
    !text.is_empty() && text != UNKNOWN_LETTER_TEXT && text != NO_DETECTION_TEXT
}

/// Speaks the displayed symbol once it has stayed on screen for the debounce
/// period. Each symbol is spoken at most once in a row.
pub struct SpeechScheduler {
    synth: Box<dyn SpeechSynthesizer>,
    debounce_ms: u64,
    enabled: bool,
    shown: Option<(&'static str, u64)>,
    last_spoken: Option<&'static str>,
}

impl SpeechScheduler {
    pub fn new(synth: Box<dyn SpeechSynthesizer>, debounce_ms: u64) -> Self {
        Self {
            synth,
            debounce_ms,
            enabled: true,
            shown: None,
            last_spoken: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_spoken(&self) -> Option<&'static str> {
        self.last_spoken
    }

    /// Record the displayed symbol and speak it if it is due.
    ///
    /// Returns the text spoken on this call, if any.
    pub fn update(
        &mut self,
        displayed: Symbol,
        now_ms: u64,
        language: Language,
    ) -> Option<&'static str> {
        let text = displayed.as_str();
        match self.shown {
            Some((shown, _)) if shown == text => {}
            _ => self.shown = Some((text, now_ms)),
        }

        if !self.enabled {
            return None;
        }
        let (text, since) = self.shown?;
        if !is_speakable(text) || self.last_spoken == Some(text) {
            return None;
        }
        if now_ms.saturating_sub(since) < self.debounce_ms {
            return None;
        }

        self.say(text, language);
        self.last_spoken = Some(text);
        Some(text)
    }

    /// Speak immediately (manual control or practice success). Does not
    /// affect automatic repeat suppression.
    pub fn speak_now(&mut self, text: &str, language: Language) -> bool {
        if !is_speakable(text) {
            return false;
        }
        self.say(text, language);
        true
    }

    fn say(&mut self, text: &str, language: Language) {
        tracing::debug!(text, lang = language.speech_tag(), "Speaking");
        self.synth.cancel();
        self.synth.speak(text, language.speech_tag());
    }
}
