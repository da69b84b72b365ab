//! Landmark detector seam.

use gestureai_events::DetectorStatusPayload;
use gestureai_landmarks::HandLandmarks;

use crate::error::DetectorError;

/// A hand-landmark detector, such as a vision model wrapper.
pub trait LandmarkDetector: Send {
    /// Input the detector consumes (a video frame, a recorded sample).
    type Frame;

    /// Prepare the detector. Called once before the first frame.
    fn initialize(&mut self) -> Result<(), DetectorError>;

    /// Detect hands in `frame`. An empty vector means no hand is visible.
    fn detect(
        &mut self,
        frame: &Self::Frame,
        ts_ms: u64,
    ) -> Result<Vec<HandLandmarks>, DetectorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetectorStatus {
    #[default]
    Initializing,
    Ready,
    /// Initialization failed. Terminal; frames are ignored.
    Failed(String),
}

impl DetectorStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DetectorStatus::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DetectorStatus::Failed(_))
    }
}

impl From<&DetectorStatus> for DetectorStatusPayload {
    fn from(status: &DetectorStatus) -> Self {
        match status {
            DetectorStatus::Initializing => DetectorStatusPayload::Initializing,
            DetectorStatus::Ready => DetectorStatusPayload::Ready,
            DetectorStatus::Failed(reason) => DetectorStatusPayload::Failed(reason.clone()),
        }
    }
}
