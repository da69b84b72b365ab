//! Hold/commit state machine.

use gestureai_signs::Symbol;
use serde::{Deserialize, Serialize};

/// How long a symbol must be held before it commits.
pub const DEFAULT_HOLD_MS: u64 = 1200;

/// Which symbols a context is willing to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    /// Letters, words and non-letter gestures.
    #[default]
    AnySign,
    /// Letters only. Words and gestures reset the hold like an empty frame.
    LettersOnly,
}

impl Acceptance {
    pub fn accepts(&self, symbol: &Symbol) -> bool {
        match self {
            Acceptance::AnySign => symbol.is_sign(),
            Acceptance::LettersOnly => symbol.is_letter(),
        }
    }
}

/// Treatment of "hand present, no rule matched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Unknown resets the hold exactly like an empty frame.
    #[default]
    Reset,
    /// Unknown leaves the candidate and its timer alone but cannot commit.
    /// An empty frame still resets.
    Freeze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizerConfig {
    pub hold_ms: u64,
    #[serde(default)]
    pub acceptance: Acceptance,
    #[serde(default)]
    pub unknown_policy: UnknownPolicy,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            hold_ms: DEFAULT_HOLD_MS,
            acceptance: Acceptance::AnySign,
            unknown_policy: UnknownPolicy::Reset,
        }
    }
}

impl StabilizerConfig {
    pub fn with_hold_ms(mut self, hold_ms: u64) -> Self {
        self.hold_ms = hold_ms;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_unknown_policy(mut self, unknown_policy: UnknownPolicy) -> Self {
        self.unknown_policy = unknown_policy;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    /// No stable candidate.
    Idle,
    /// `symbol` has been live since `since_ms`.
    Holding {
        symbol: Symbol,
        since_ms: u64,
        /// Set once this hold has produced its commit.
        committed: bool,
    },
}

/// A symbol that survived the hold threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub symbol: Symbol,
    /// Poll time at which the commit fired.
    pub at_ms: u64,
    /// How long the symbol had been held when it fired.
    pub held_ms: u64,
}

/// Debounces one consuming context's view of the live symbol.
#[derive(Debug, Clone)]
pub struct HoldStabilizer {
    name: &'static str,
    config: StabilizerConfig,
    state: HoldState,
}

impl HoldStabilizer {
    pub fn new(name: &'static str, config: StabilizerConfig) -> Self {
        Self {
            name,
            config,
            state: HoldState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn config(&self) -> StabilizerConfig {
        self.config
    }

    /// Takes effect on the next poll. The current hold is kept.
    pub fn set_config(&mut self, config: StabilizerConfig) {
        self.config = config;
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == HoldState::Idle
    }

    /// Current candidate, if any.
    pub fn candidate(&self) -> Option<Symbol> {
        match self.state {
            HoldState::Idle => None,
            HoldState::Holding { symbol, .. } => Some(symbol),
        }
    }

    /// Drop any candidate and commit marker.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            tracing::trace!(context = self.name, "stabilizer reset");
        }
        self.state = HoldState::Idle;
    }

    /// Run one polling tick against the latest live symbol.
    ///
    /// `now_ms` must not go backwards between calls.
    pub fn poll(&mut self, live: Symbol, now_ms: u64) -> Option<Commit> {
        if live.is_unknown() && self.config.unknown_policy == UnknownPolicy::Freeze {
            return None;
        }

        if !self.config.acceptance.accepts(&live) {
            self.reset();
            return None;
        }

        let (since_ms, committed) = match self.state {
            HoldState::Holding {
                symbol,
                since_ms,
                committed,
            } if symbol == live => (since_ms, committed),
            _ => {
                tracing::trace!(context = self.name, symbol = %live, "new candidate");
                self.state = HoldState::Holding {
                    symbol: live,
                    since_ms: now_ms,
                    committed: false,
                };
                (now_ms, false)
            }
        };

        let held_ms = now_ms.saturating_sub(since_ms);
        if committed || held_ms < self.config.hold_ms {
            return None;
        }

        self.state = HoldState::Holding {
            symbol: live,
            since_ms,
            committed: true,
        };
        tracing::debug!(context = self.name, symbol = %live, held_ms, "symbol committed");

        Some(Commit {
            symbol: live,
            at_ms: now_ms,
            held_ms,
        })
    }
}
