//! Hand landmark model for gestureai.
//!
//! Models the 21 normalized points an external hand-landmark detector reports
//! per hand, and reduces them to a five-finger open/closed vector.
//!
//! ```text
//!   detector output ──► HandLandmarks (21 points) ──► FingerState
//! ```

mod fingers;
mod point;

pub use fingers::{extract_finger_state, is_finger_open, is_thumb_open, FingerState};
pub use point::{HandLandmark, HandLandmarks, LandmarkPoint, LANDMARK_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks per hand, got {actual}")]
    WrongPointCount { expected: usize, actual: usize },

    #[error("finger bits must be five 0/1 characters, got {0:?}")]
    InvalidFingerBits(String),
}

pub type Result<T> = std::result::Result<T, LandmarkError>;
