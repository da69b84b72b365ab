//! Finger open/closed extraction.
//!
//! "Open" is a geometric heuristic on the 2D landmark positions, not a
//! biomechanical measurement.

use serde::{Deserialize, Serialize};

use crate::point::{HandLandmark, HandLandmarks, LandmarkPoint, LANDMARK_COUNT};
use crate::LandmarkError;

/// Open (extended) flag per finger for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub const fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Thumb, index, middle, ring, pinky.
    pub const fn from_array(fingers: [bool; 5]) -> Self {
        Self::new(fingers[0], fingers[1], fingers[2], fingers[3], fingers[4])
    }

    pub const fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Reduce a hand to its finger vector.
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        use HandLandmark::*;

        Self {
            thumb: is_thumb_open(hand),
            index: is_finger_open(hand, IndexTip, IndexPip, IndexMcp),
            middle: is_finger_open(hand, MiddleTip, MiddlePip, MiddleMcp),
            ring: is_finger_open(hand, RingTip, RingPip, RingMcp),
            pinky: is_finger_open(hand, PinkyTip, PinkyPip, PinkyMcp),
        }
    }

    /// An upright hand whose landmarks extract back to this vector.
    pub fn pose(&self) -> HandLandmarks {
        use HandLandmark::*;

        let mut points = [LandmarkPoint::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[Wrist.index()] = LandmarkPoint::new(0.5, 0.9, 0.0);
        points[ThumbMcp.index()] = LandmarkPoint::new(0.45, 0.8, 0.0);
        points[ThumbTip.index()] = if self.thumb {
            LandmarkPoint::new(0.25, 0.7, 0.0)
        } else {
            LandmarkPoint::new(0.48, 0.7, 0.0)
        };

        let fingers = [
            (self.index, IndexTip, IndexPip, 0.4),
            (self.middle, MiddleTip, MiddlePip, 0.5),
            (self.ring, RingTip, RingPip, 0.6),
            (self.pinky, PinkyTip, PinkyPip, 0.7),
        ];
        for (open, tip, pip, x) in fingers {
            points[pip.index()] = LandmarkPoint::new(x, 0.55, 0.0);
            points[tip.index()] = LandmarkPoint::new(x, if open { 0.3 } else { 0.65 }, 0.0);
        }

        HandLandmarks::new(points)
    }

    /// Every one of the 32 possible vectors, `00000` first.
    pub fn all() -> impl Iterator<Item = FingerState> {
        (0u8..32).map(|bits| {
            Self::from_array([
                bits & 0b10000 != 0,
                bits & 0b01000 != 0,
                bits & 0b00100 != 0,
                bits & 0b00010 != 0,
                bits & 0b00001 != 0,
            ])
        })
    }
}

impl From<&HandLandmarks> for FingerState {
    fn from(hand: &HandLandmarks) -> Self {
        Self::from_landmarks(hand)
    }
}

impl std::fmt::Display for FingerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for open in self.as_array() {
            f.write_str(if open { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses the `TIMRP` bit string written by `Display`, e.g. `"10000"`.
impl std::str::FromStr for FingerState {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s.trim().as_bytes();
        if bits.len() != 5 {
            return Err(LandmarkError::InvalidFingerBits(s.to_string()));
        }
        let mut fingers = [false; 5];
        for (slot, bit) in fingers.iter_mut().zip(bits) {
            *slot = match bit {
                b'1' => true,
                b'0' => false,
                _ => return Err(LandmarkError::InvalidFingerBits(s.to_string())),
            };
        }
        Ok(Self::from_array(fingers))
    }
}

/// A finger is open when its tip sits above its PIP joint in image space.
///
/// `_mcp` is part of the signature but does not take part in the comparison.
pub fn is_finger_open(
    hand: &HandLandmarks,
    tip: HandLandmark,
    pip: HandLandmark,
    _mcp: HandLandmark,
) -> bool {
    hand[tip].y < hand[pip].y
}

/// The thumb is open when its tip is horizontally farther from the wrist than
/// its MCP joint is.
///
/// Only the x axis is compared, so the result depends on handedness and hand
/// rotation. Treat it as approximate.
pub fn is_thumb_open(hand: &HandLandmarks) -> bool {
    let wrist = hand[HandLandmark::Wrist];
    let tip = hand[HandLandmark::ThumbTip];
    let mcp = hand[HandLandmark::ThumbMcp];
    (tip.x - wrist.x).abs() > (mcp.x - wrist.x).abs()
}

/// Free-function form of [`FingerState::from_landmarks`].
pub fn extract_finger_state(hand: &HandLandmarks) -> FingerState {
    FingerState::from_landmarks(hand)
}
