//! Landmark points and the fixed 21-point hand layout.

use serde::{Deserialize, Serialize};

use crate::LandmarkError;

/// Number of landmarks reported per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// One detector landmark.
///
/// `x` and `y` are normalized to the frame (0 is top-left, y grows downward),
/// `z` is depth relative to the wrist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Anatomical position of each landmark index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Position of this landmark in the detector's 21-point array.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The 21 landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LandmarkPoint>", into = "Vec<LandmarkPoint>")]
pub struct HandLandmarks {
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a detector result of unknown length.
    pub fn from_points(points: Vec<LandmarkPoint>) -> crate::Result<Self> {
        let actual = points.len();
        let points: [LandmarkPoint; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| LandmarkError::WrongPointCount {
                    expected: LANDMARK_COUNT,
                    actual,
                })?;
        Ok(Self { points })
    }

    pub fn point(&self, landmark: HandLandmark) -> LandmarkPoint {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }
}

impl std::ops::Index<HandLandmark> for HandLandmarks {
    type Output = LandmarkPoint;

    fn index(&self, landmark: HandLandmark) -> &Self::Output {
        &self.points[landmark.index()]
    }
}

impl TryFrom<Vec<LandmarkPoint>> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<LandmarkPoint>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<HandLandmarks> for Vec<LandmarkPoint> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices_follow_detector_layout() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbMcp.index(), 2);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexPip.index(), 6);
        assert_eq!(HandLandmark::IndexTip.index(), 8);
        assert_eq!(HandLandmark::MiddleTip.index(), 12);
        assert_eq!(HandLandmark::RingTip.index(), 16);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
    }

    #[test]
    fn test_from_points_rejects_wrong_count() {
        let err = HandLandmarks::from_points(vec![LandmarkPoint::default(); 20]).unwrap_err();
        assert_eq!(
            err,
            LandmarkError::WrongPointCount {
                expected: 21,
                actual: 20
            }
        );
    }

    #[test]
    fn test_index_by_landmark() {
        let mut points = [LandmarkPoint::default(); LANDMARK_COUNT];
        points[8] = LandmarkPoint::new(0.25, 0.5, -0.1);
        let hand = HandLandmarks::new(points);
        assert_eq!(hand[HandLandmark::IndexTip].x, 0.25);
        assert_eq!(hand.point(HandLandmark::IndexTip).z, -0.1);
    }

    #[test]
    fn test_deserialize_validates_length() {
        let short = r#"[{"x": 0.1, "y": 0.2}]"#;
        assert!(serde_json::from_str::<HandLandmarks>(short).is_err());

        let points: Vec<String> = (0..21)
            .map(|i| format!(r#"{{"x": {}, "y": 0.5, "z": 0.0}}"#, i as f32 / 100.0))
            .collect();
        let json = format!("[{}]", points.join(","));
        let hand: HandLandmarks = serde_json::from_str(&json).unwrap();
        assert!((hand[HandLandmark::PinkyTip].x - 0.2).abs() < 1e-6);
    }
}
