//! Practice mode: sign the letter shown, scored by stabilized commits.
//!
//! ```text
//!                   commit == target
//!   AwaitingInput ───────────────────► Correct ──(delay)──► AwaitingInput, new target
//!         │
//!         └──────────────────────────► Incorrect ─(delay)─► AwaitingInput, same target
//!                   commit != target
//! ```

mod picker;
mod session;

pub use picker::{RandomPicker, ScriptedPicker, TargetPicker};
pub use session::{
    Feedback, PracticeOutcome, PracticeSession, PracticeSnapshot, PracticeTransition,
    DEFAULT_FEEDBACK_DELAY_MS,
};
