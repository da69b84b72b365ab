//! JSON Lines recordings of detector output and user actions.
//!
//! One record per line:
//!
//! ```text
//! {"ts_ms": 0, "hands": [[{"x":0.5,"y":0.9}, ... 21 points]]}
//! {"ts_ms": 50, "fingers": "10000"}
//! {"ts_ms": 60, "command": {"set_section": "practice"}}
//! ```
//!
//! `fingers` is shorthand for a synthetic hand with that `TIMRP` vector.
//! A record with neither `hands` nor `fingers` is a frame with no hand.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use gestureai_application::{DetectorError, LandmarkDetector, SessionCommand};
use gestureai_landmarks::{FingerState, HandLandmarks};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub ts_ms: u64,
    /// Source media position; defaults to `ts_ms`.
    #[serde(default)]
    pub media_ms: Option<u64>,
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
    #[serde(default)]
    pub fingers: Option<String>,
    #[serde(default)]
    pub command: Option<SessionCommand>,
}

/// A detector frame decoded from a record.
#[derive(Debug, Clone, Default)]
pub struct RecordedFrame {
    pub hands: Vec<HandLandmarks>,
}

#[derive(Debug)]
pub enum Step {
    Frame {
        ts_ms: u64,
        media_ms: u64,
        frame: RecordedFrame,
    },
    Command {
        ts_ms: u64,
        command: SessionCommand,
    },
}

impl Step {
    pub fn ts_ms(&self) -> u64 {
        match self {
            Step::Frame { ts_ms, .. } | Step::Command { ts_ms, .. } => *ts_ms,
        }
    }
}

impl TryFrom<Record> for Step {
    type Error = anyhow::Error;

    fn try_from(record: Record) -> anyhow::Result<Self> {
        if let Some(command) = record.command {
            return Ok(Step::Command {
                ts_ms: record.ts_ms,
                command,
            });
        }

        let mut hands = record.hands;
        if let Some(bits) = record.fingers.as_deref() {
            let fingers: FingerState = bits.parse()?;
            hands.insert(0, fingers.pose());
        }

        Ok(Step::Frame {
            ts_ms: record.ts_ms,
            media_ms: record.media_ms.unwrap_or(record.ts_ms),
            frame: RecordedFrame { hands },
        })
    }
}

/// Parse a whole recording. Blank lines and `#` comments are skipped.
/// Timestamps must not go backwards.
pub fn read_steps(reader: impl BufRead) -> anyhow::Result<Vec<Step>> {
    let mut steps: Vec<Step> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", number + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let record: Record = serde_json::from_str(line)
            .with_context(|| format!("parsing line {}", number + 1))?;
        let step = Step::try_from(record).with_context(|| format!("line {}", number + 1))?;

        if let Some(prev) = steps.last() {
            if step.ts_ms() < prev.ts_ms() {
                bail!(
                    "line {}: ts_ms {} goes backwards (previous {})",
                    number + 1,
                    step.ts_ms(),
                    prev.ts_ms()
                );
            }
        }
        steps.push(step);
    }

    Ok(steps)
}

/// Open and parse a recording file.
pub fn read_file(path: &Path) -> anyhow::Result<Vec<Step>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_steps(BufReader::new(file))
}

/// Detector that returns whatever the recording captured.
#[derive(Default)]
pub struct ReplayDetector {
    frames_seen: u64,
}

impl ReplayDetector {
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl LandmarkDetector for ReplayDetector {
    type Frame = RecordedFrame;

    fn initialize(&mut self) -> Result<(), DetectorError> {
        Ok(())
    }

    fn detect(
        &mut self,
        frame: &RecordedFrame,
        _ts_ms: u64,
    ) -> Result<Vec<HandLandmarks>, DetectorError> {
        self.frames_seen += 1;
        Ok(frame.hands.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestureai_application::Section;

    #[test]
    fn test_read_mixed_records() {
        let input = r#"
# fist, then practice
{"ts_ms": 0, "fingers": "00000"}
{"ts_ms": 50}
{"ts_ms": 60, "command": {"set_section": "practice"}}
"#;
        let steps = read_steps(input.as_bytes()).unwrap();
        assert_eq!(steps.len(), 3);

        match &steps[0] {
            Step::Frame { frame, media_ms, .. } => {
                assert_eq!(frame.hands.len(), 1);
                assert_eq!(*media_ms, 0);
                assert_eq!(FingerState::from_landmarks(&frame.hands[0]).to_string(), "00000");
            }
            Step::Command { .. } => panic!("expected frame"),
        }
        assert!(matches!(&steps[1], Step::Frame { frame, .. } if frame.hands.is_empty()));
        assert!(matches!(
            &steps[2],
            Step::Command {
                command: SessionCommand::SetSection(Section::Practice),
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_point_count_rejected() {
        let input = r#"{"ts_ms": 0, "hands": [[{"x": 0.1, "y": 0.2}]]}"#;
        assert!(read_steps(input.as_bytes()).is_err());
    }

    #[test]
    fn test_backwards_time_rejected() {
        let input = "{\"ts_ms\": 100}\n{\"ts_ms\": 50}\n";
        let err = read_steps(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("backwards"));
    }

    #[test]
    fn test_read_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fist.jsonl");
        std::fs::write(&path, "{\"ts_ms\": 0, \"fingers\": \"00000\"}\n").unwrap();

        let steps = read_file(&path).unwrap();
        assert_eq!(steps.len(), 1);
        assert!(read_file(&dir.path().join("missing.jsonl")).is_err());
    }

    #[test]
    fn test_bad_finger_bits_rejected() {
        let input = r#"{"ts_ms": 0, "fingers": "12"}"#;
        assert!(read_steps(input.as_bytes()).is_err());
    }
}
