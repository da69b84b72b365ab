//! Temporal stabilization of the live symbol stream.
//!
//! The classifier output flickers with detector jitter and transient poses.
//! A [`HoldStabilizer`] turns it into discrete [`Commit`]s: a symbol must stay
//! the same for the hold threshold before it counts, and counts once per
//! uninterrupted hold.
//!
//! ```text
//!              accepted, != candidate
//!   ┌──────┐ ───────────────────────► ┌─────────────────────────┐
//!   │ Idle │                          │ Holding(symbol, since)  │──┐ same symbol,
//!   └──────┘ ◄─────────────────────── └─────────────────────────┘◄─┘ held >= hold
//!              rejected symbol                                       → Commit (once)
//! ```
//!
//! Each consuming context owns its own stabilizer; nothing is shared.

mod context;
mod stabilizer;

pub use context::{CommitSink, StabilizerContext};
pub use stabilizer::{
    Acceptance, Commit, HoldStabilizer, HoldState, StabilizerConfig, UnknownPolicy,
    DEFAULT_HOLD_MS,
};
