//! Practice session state machine.

use gestureai_signs::{alphabet, Language};
use gestureai_stabilizer::{Commit, CommitSink};
use serde::Serialize;

use crate::picker::{RandomPicker, TargetPicker};

/// How long the correct/incorrect banner stays up.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;

/// Feedback currently shown. `None` means the session is awaiting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Result of scoring one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeOutcome {
    Correct { symbol: &'static str },
    Incorrect {
        expected: &'static str,
        got: &'static str,
    },
}

impl PracticeOutcome {
    pub fn feedback(&self) -> Feedback {
        match self {
            PracticeOutcome::Correct { .. } => Feedback::Correct,
            PracticeOutcome::Incorrect { .. } => Feedback::Incorrect,
        }
    }
}

/// What happened when a feedback banner expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeTransition {
    /// After a correct answer: a fresh target.
    NextTarget(&'static str),
    /// After a wrong answer: same target again.
    Retry(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSnapshot {
    pub language: Language,
    pub target: &'static str,
    pub score: u32,
    pub attempts: u32,
    pub feedback: Feedback,
}

pub struct PracticeSession<P = RandomPicker> {
    language: Language,
    target: &'static str,
    score: u32,
    attempts: u32,
    feedback: Feedback,
    feedback_until_ms: Option<u64>,
    feedback_delay_ms: u64,
    picker: P,
    last_outcome: Option<PracticeOutcome>,
}

impl PracticeSession<RandomPicker> {
    pub fn new(language: Language) -> Self {
        Self::with_picker(language, RandomPicker::new())
    }
}

impl<P: TargetPicker> PracticeSession<P> {
    pub fn with_picker(language: Language, mut picker: P) -> Self {
        let target = picker.pick(alphabet(language));
        tracing::debug!(%language, target_letter = target, "practice session started");
        Self {
            language,
            target,
            score: 0,
            attempts: 0,
            feedback: Feedback::None,
            feedback_until_ms: None,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            picker,
            last_outcome: None,
        }
    }

    pub fn with_feedback_delay_ms(mut self, delay_ms: u64) -> Self {
        self.feedback_delay_ms = delay_ms;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.feedback == Feedback::None
    }

    pub fn snapshot(&self) -> PracticeSnapshot {
        PracticeSnapshot {
            language: self.language,
            target: self.target,
            score: self.score,
            attempts: self.attempts,
            feedback: self.feedback,
        }
    }

    /// Switch alphabets. Resets score, attempts and feedback.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.restart();
    }

    /// Zero the counters and draw a new target.
    pub fn restart(&mut self) {
        self.score = 0;
        self.attempts = 0;
        self.feedback = Feedback::None;
        self.feedback_until_ms = None;
        self.last_outcome = None;
        self.target = self.picker.pick(alphabet(self.language));
        tracing::debug!(
            language = %self.language,
            target_letter = self.target,
            "practice session restarted"
        );
    }

    /// Score a committed symbol. Ignored while feedback is showing and for
    /// anything that is not a letter.
    pub fn submit(&mut self, commit: &Commit) -> Option<PracticeOutcome> {
        if !self.is_awaiting_input() {
            tracing::trace!(symbol = %commit.symbol, "commit ignored during feedback");
            return None;
        }
        if !commit.symbol.is_letter() {
            return None;
        }
        let got = commit.symbol.text()?;

        self.attempts += 1;
        let outcome = if got == self.target {
            self.score += 1;
            self.feedback = Feedback::Correct;
            PracticeOutcome::Correct { symbol: got }
        } else {
            self.feedback = Feedback::Incorrect;
            PracticeOutcome::Incorrect {
                expected: self.target,
                got,
            }
        };
        self.feedback_until_ms = Some(commit.at_ms.saturating_add(self.feedback_delay_ms));

        tracing::info!(
            target_letter = self.target,
            got,
            score = self.score,
            attempts = self.attempts,
            feedback = ?self.feedback,
            "practice attempt scored"
        );

        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Take the outcome of the most recent [`submit`](Self::submit).
    pub fn take_outcome(&mut self) -> Option<PracticeOutcome> {
        self.last_outcome.take()
    }

    /// Expire the feedback banner once its delay has passed.
    ///
    /// A returned transition means the session is awaiting input again and the
    /// practice stabilizer should be re-armed.
    pub fn tick(&mut self, now_ms: u64) -> Option<PracticeTransition> {
        let until = self.feedback_until_ms?;
        if now_ms < until {
            return None;
        }

        let transition = match self.feedback {
            Feedback::Correct => {
                self.target = self.picker.pick(alphabet(self.language));
                PracticeTransition::NextTarget(self.target)
            }
            Feedback::Incorrect => PracticeTransition::Retry(self.target),
            Feedback::None => {
                self.feedback_until_ms = None;
                return None;
            }
        };

        self.feedback = Feedback::None;
        self.feedback_until_ms = None;
        tracing::debug!(?transition, "practice feedback expired");
        Some(transition)
    }
}

impl<P: TargetPicker> CommitSink for PracticeSession<P> {
    fn on_commit(&mut self, commit: &Commit) {
        self.submit(commit);
    }
}
