//! The sign session: one live symbol feeding whichever context has focus.
//!
//! The translator and practice contexts each own a stabilizer. Only the
//! context for the focused section is polled, and switching sections or
//! language tears both down.

use std::sync::Arc;

use chrono::Utc;
use gestureai_bus::{PipelineStatus, SymbolFrame};
use gestureai_events::{
    emit_event, event_names, EventBusRef, PracticeFeedbackEvent, PracticeTargetEvent,
    SymbolChangedEvent, SymbolCommittedEvent, TextChangedEvent,
};
use gestureai_practice::{PracticeOutcome, PracticeSession, RandomPicker, TargetPicker};
use gestureai_signs::{FingerState, Language, Mode, Symbol};
use gestureai_stabilizer::{Commit, HoldStabilizer, StabilizerContext};
use serde::Deserialize;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::constants::{PRACTICE_CONTEXT, TRANSLATOR_CONTEXT};
use crate::settings::{RecognitionSettings, Section};
use crate::speech::{SpeechScheduler, SpeechSynthesizer};
use crate::translator::TextAccumulator;

/// User actions, delivered to the poll loop over a channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCommand {
    SetSection(Section),
    SetMode(Mode),
    ToggleMode,
    SetLanguage(Language),
    ToggleLanguage,
    /// Append the live symbol to the translator text now.
    AppendCurrent,
    Space,
    Backspace,
    Clear,
    SetText(String),
    /// Speak the live symbol now.
    SpeakCurrent,
    RestartPractice,
}

pub struct SignSession<P: TargetPicker = RandomPicker> {
    config: AppConfig,
    settings: RecognitionSettings,
    settings_tx: watch::Sender<RecognitionSettings>,
    live: Symbol,
    live_fingers: Option<FingerState>,
    translator: StabilizerContext<TextAccumulator>,
    practice: StabilizerContext<PracticeSession<P>>,
    speech: SpeechScheduler,
    events: EventBusRef,
    pipeline: Arc<PipelineStatus>,
}

impl SignSession<RandomPicker> {
    pub fn new(config: AppConfig, events: EventBusRef, synth: Box<dyn SpeechSynthesizer>) -> Self {
        Self::with_picker(config, events, synth, RandomPicker::new())
    }
}

impl<P: TargetPicker> SignSession<P> {
    pub fn with_picker(
        config: AppConfig,
        events: EventBusRef,
        synth: Box<dyn SpeechSynthesizer>,
        picker: P,
    ) -> Self {
        let settings = RecognitionSettings {
            section: Section::Translator,
            mode: config.mode,
            language: config.language,
        };
        let (settings_tx, _) = watch::channel(settings);

        let translator = StabilizerContext::new(
            TRANSLATOR_CONTEXT,
            config.translator_stabilizer(),
            TextAccumulator::new(config.mode),
        );
        let practice = StabilizerContext::new(
            PRACTICE_CONTEXT,
            config.practice_stabilizer(),
            PracticeSession::with_picker(config.language, picker)
                .with_feedback_delay_ms(config.feedback_delay_ms),
        );

        let mut speech = SpeechScheduler::new(synth, config.speech_debounce_ms);
        speech.set_enabled(config.auto_speak);

        tracing::info!(
            language = %config.language,
            mode = %config.mode,
            hold_ms = config.hold_ms,
            "Sign session created"
        );

        Self {
            config,
            settings,
            settings_tx,
            live: Symbol::NoHand,
            live_fingers: None,
            translator,
            practice,
            speech,
            events,
            pipeline: Arc::new(PipelineStatus::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> RecognitionSettings {
        self.settings
    }

    /// Settings feed for the frame step.
    pub fn subscribe_settings(&self) -> watch::Receiver<RecognitionSettings> {
        self.settings_tx.subscribe()
    }

    /// Counters shared with the frame step.
    pub fn pipeline_status(&self) -> Arc<PipelineStatus> {
        Arc::clone(&self.pipeline)
    }

    pub fn section(&self) -> Section {
        self.settings.section
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    /// Symbol currently displayed.
    pub fn live_symbol(&self) -> Symbol {
        self.live
    }

    pub fn live_fingers(&self) -> Option<FingerState> {
        self.live_fingers
    }

    pub fn text(&self) -> &str {
        self.translator.sink().text()
    }

    pub fn practice(&self) -> &PracticeSession<P> {
        self.practice.sink()
    }

    pub fn translator_stabilizer(&self) -> &HoldStabilizer {
        self.translator.stabilizer()
    }

    pub fn practice_stabilizer(&self) -> &HoldStabilizer {
        self.practice.stabilizer()
    }

    pub fn last_spoken(&self) -> Option<&'static str> {
        self.speech.last_spoken()
    }

    // --- Frame and poll steps ---

    /// Take the newest classified frame as the live symbol.
    pub fn on_frame(&mut self, frame: SymbolFrame) {
        let changed = frame.symbol != self.live;
        self.live = frame.symbol;
        self.live_fingers = frame.fingers;

        if changed {
            tracing::trace!(symbol = %frame.symbol, ts_ms = frame.ts_ms, "Live symbol changed");
            emit_event(
                self.events.as_ref(),
                event_names::SIGN_SYMBOL,
                &SymbolChangedEvent {
                    symbol: frame.symbol.to_string(),
                    fingers: frame.fingers.map(|f| f.to_string()),
                    mode: self.settings.effective_mode(),
                    language: self.settings.language,
                    ts_ms: frame.ts_ms,
                },
            );
        }
    }

    /// One stabilizer tick for the focused context, plus speech.
    pub fn poll(&mut self, now_ms: u64) -> Option<Commit> {
        self.pipeline.increment_polls();

        let commit = match self.settings.section {
            Section::Translator => self.poll_translator(now_ms),
            Section::Practice => self.poll_practice(now_ms),
            Section::Assistant | Section::Faq => None,
        };

        if self.settings.section.uses_camera() {
            self.speech.update(self.live, now_ms, self.settings.language);
        }

        commit
    }

    fn poll_translator(&mut self, now_ms: u64) -> Option<Commit> {
        let commit = self.translator.poll(self.live, now_ms)?;
        self.pipeline.increment_commits();
        self.emit_commit(&commit, TRANSLATOR_CONTEXT);
        self.emit_text();
        Some(commit)
    }

    fn poll_practice(&mut self, now_ms: u64) -> Option<Commit> {
        if let Some(transition) = self.practice.sink_mut().tick(now_ms) {
            self.practice.reset();
            tracing::debug!(?transition, "Practice re-armed");
            self.emit_practice_target();
        }

        if !self.practice.sink().is_awaiting_input() {
            return None;
        }

        let commit = self.practice.poll(self.live, now_ms)?;
        self.pipeline.increment_commits();
        self.emit_commit(&commit, PRACTICE_CONTEXT);

        if let Some(outcome) = self.practice.sink_mut().take_outcome() {
            self.emit_feedback(outcome);
            if let PracticeOutcome::Correct { symbol } = outcome {
                self.speech.speak_now(symbol, self.settings.language);
            }
        }
        Some(commit)
    }

    // --- User actions ---

    pub fn apply(&mut self, command: SessionCommand) {
        tracing::debug!(?command, "Applying session command");
        match command {
            SessionCommand::SetSection(section) => self.set_section(section),
            SessionCommand::SetMode(mode) => self.set_mode(mode),
            SessionCommand::ToggleMode => self.set_mode(self.settings.mode.toggled()),
            SessionCommand::SetLanguage(language) => self.set_language(language),
            SessionCommand::ToggleLanguage => {
                self.set_language(self.settings.language.toggled())
            }
            SessionCommand::AppendCurrent => {
                self.append_current();
            }
            SessionCommand::Space => self.space(),
            SessionCommand::Backspace => {
                self.backspace();
            }
            SessionCommand::Clear => self.clear_text(),
            SessionCommand::SetText(text) => self.set_text(text),
            SessionCommand::SpeakCurrent => {
                self.speak_current();
            }
            SessionCommand::RestartPractice => self.restart_practice(),
        }
    }

    /// Focus a section. Both stabilizers are torn down; entering practice
    /// starts a fresh practice round.
    pub fn set_section(&mut self, section: Section) {
        if section == self.settings.section {
            return;
        }
        let previous = self.settings.section;
        self.translator.reset();
        self.practice.reset();

        self.settings.section = section;
        self.publish_settings();
        tracing::info!(from = %previous, to = %section, "Section changed");

        if section == Section::Practice {
            self.practice.sink_mut().restart();
            self.emit_practice_target();
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.settings.mode {
            return;
        }
        self.settings.mode = mode;
        self.translator.sink_mut().set_mode(mode);
        self.translator.reset();
        self.publish_settings();
        tracing::info!(%mode, "Mode changed");
    }

    /// Switch language. Both stabilizers reset and practice restarts.
    pub fn set_language(&mut self, language: Language) {
        if language == self.settings.language {
            return;
        }
        self.settings.language = language;
        self.translator.reset();
        self.practice.reset();
        self.practice.sink_mut().set_language(language);
        self.publish_settings();
        tracing::info!(%language, rtl = language.is_rtl(), "Language changed");

        if self.settings.section == Section::Practice {
            self.emit_practice_target();
        }
    }

    pub fn restart_practice(&mut self) {
        self.practice.reset();
        self.practice.sink_mut().restart();
        self.emit_practice_target();
    }

    pub fn append_current(&mut self) -> bool {
        let appended = self.translator.sink_mut().append(self.live);
        if appended {
            self.emit_text();
        }
        appended
    }

    pub fn space(&mut self) {
        self.translator.sink_mut().space();
        self.emit_text();
    }

    pub fn backspace(&mut self) -> Option<char> {
        let removed = self.translator.sink_mut().backspace();
        if removed.is_some() {
            self.emit_text();
        }
        removed
    }

    pub fn clear_text(&mut self) {
        let before = self.translator.sink().revision();
        self.translator.sink_mut().clear();
        if self.translator.sink().revision() != before {
            self.emit_text();
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let before = self.translator.sink().revision();
        self.translator.sink_mut().set_text(text);
        if self.translator.sink().revision() != before {
            self.emit_text();
        }
    }

    pub fn speak_current(&mut self) -> bool {
        self.speech.speak_now(self.live.as_str(), self.settings.language)
    }

    // --- Events ---

    fn publish_settings(&self) {
        self.settings_tx.send_replace(self.settings);
    }

    fn emit_commit(&self, commit: &Commit, context: &str) {
        emit_event(
            self.events.as_ref(),
            event_names::SIGN_COMMITTED,
            &SymbolCommittedEvent {
                symbol: commit.symbol.to_string(),
                context: context.to_string(),
                held_ms: commit.held_ms,
                at: Utc::now(),
            },
        );
    }

    fn emit_text(&self) {
        emit_event(
            self.events.as_ref(),
            event_names::TRANSLATOR_TEXT,
            &TextChangedEvent {
                text: self.text().to_string(),
            },
        );
    }

    fn emit_practice_target(&self) {
        let practice = self.practice.sink();
        emit_event(
            self.events.as_ref(),
            event_names::PRACTICE_TARGET,
            &PracticeTargetEvent {
                target: practice.target().to_string(),
                language: practice.language(),
                score: practice.score(),
                attempts: practice.attempts(),
            },
        );
    }

    fn emit_feedback(&self, outcome: PracticeOutcome) {
        let practice = self.practice.sink();
        let (correct, expected, got) = match outcome {
            PracticeOutcome::Correct { symbol } => (true, symbol, symbol),
            PracticeOutcome::Incorrect { expected, got } => (false, expected, got),
        };
        emit_event(
            self.events.as_ref(),
            event_names::PRACTICE_FEEDBACK,
            &PracticeFeedbackEvent {
                correct,
                expected: expected.to_string(),
                got: got.to_string(),
                score: practice.score(),
                attempts: practice.attempts(),
            },
        );
    }
}
