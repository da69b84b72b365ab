//! Frame step: detector output to classified symbols on the bus.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use gestureai_bus::{PipelineStatus, SymbolBusSender};
use gestureai_events::{emit_event, event_names, DetectorStatusEvent, EventBusRef};
use gestureai_signs::{classify_hands, FingerState, Symbol};
use tokio::sync::watch;

use crate::detector::{DetectorStatus, LandmarkDetector};
use crate::settings::RecognitionSettings;

/// What happened to one input frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Detector not initialized (or failed); frame ignored.
    NotReady,
    /// Media time did not advance since the last processed frame.
    Skipped,
    /// Classified and handed to the poll step.
    Published(Symbol),
    /// Classified but not queued (bus full or closed). A full bus still
    /// hands it to the next drain as the latest frame.
    Dropped(Symbol),
}

pub struct FrameProcessor<D: LandmarkDetector> {
    detector: D,
    status: DetectorStatus,
    last_media_ms: Option<u64>,
    settings: watch::Receiver<RecognitionSettings>,
    sender: SymbolBusSender,
    pipeline: Arc<PipelineStatus>,
    events: EventBusRef,
}

impl<D: LandmarkDetector> FrameProcessor<D> {
    pub fn new(
        detector: D,
        settings: watch::Receiver<RecognitionSettings>,
        sender: SymbolBusSender,
        pipeline: Arc<PipelineStatus>,
        events: EventBusRef,
    ) -> Self {
        Self {
            detector,
            status: DetectorStatus::Initializing,
            last_media_ms: None,
            settings,
            sender,
            pipeline,
            events,
        }
    }

    pub fn status(&self) -> &DetectorStatus {
        &self.status
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Initialize the detector. Failure is terminal: no retry.
    pub fn initialize(&mut self) -> &DetectorStatus {
        self.set_status(DetectorStatus::Initializing);

        let status = match self.detector.initialize() {
            Ok(()) => {
                tracing::info!("Landmark detector ready");
                DetectorStatus::Ready
            }
            Err(e) => {
                tracing::error!(error = %e, "Landmark detector failed to initialize");
                DetectorStatus::Failed(e.to_string())
            }
        };
        self.set_status(status);
        &self.status
    }

    fn set_status(&mut self, status: DetectorStatus) {
        self.status = status;
        emit_event(
            self.events.as_ref(),
            event_names::DETECTOR_STATUS,
            &DetectorStatusEvent {
                status: (&self.status).into(),
                at: Utc::now(),
            },
        );
    }

    /// Process one frame.
    ///
    /// `media_ms` is the source's own position (video time) and gates
    /// duplicate frames; `ts_ms` is the monotonically increasing detection
    /// timestamp.
    pub fn process(&mut self, frame: &D::Frame, media_ms: u64, ts_ms: u64) -> FrameOutcome {
        if !self.status.is_ready() {
            return FrameOutcome::NotReady;
        }
        if self.last_media_ms == Some(media_ms) {
            self.pipeline.increment_frames_skipped();
            return FrameOutcome::Skipped;
        }
        self.last_media_ms = Some(media_ms);

        let started = Instant::now();
        let hands = match self.detector.detect(frame, ts_ms) {
            Ok(hands) => hands,
            Err(e) => {
                tracing::warn!(error = %e, ts_ms, "Detection failed, treating as no hand");
                Vec::new()
            }
        };
        self.pipeline.set_detector_time_ms(started.elapsed().as_millis() as u64);

        let settings = *self.settings.borrow();
        let symbol = classify_hands(&hands, settings.effective_mode(), settings.language);
        let fingers = hands.first().map(FingerState::from_landmarks);
        self.pipeline.increment_frames_processed();

        tracing::trace!(ts_ms, %symbol, hands = hands.len(), "Frame classified");

        if self.sender.send(ts_ms, symbol, fingers) {
            FrameOutcome::Published(symbol)
        } else {
            FrameOutcome::Dropped(symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectorError;
    use crate::settings::Section;
    use gestureai_bus::SymbolBus;
    use gestureai_events::InMemoryEventBus;
    use gestureai_landmarks::HandLandmarks;
    use gestureai_signs::{Language, Mode};

    fn hand(bits: &str) -> HandLandmarks {
        bits.parse::<FingerState>().unwrap().pose()
    }

    struct FakeDetector {
        fail_init: bool,
        hands: Vec<Result<Vec<HandLandmarks>, DetectorError>>,
        calls: usize,
    }

    impl LandmarkDetector for FakeDetector {
        type Frame = ();

        fn initialize(&mut self) -> Result<(), DetectorError> {
            if self.fail_init {
                Err(DetectorError::Init("model missing".into()))
            } else {
                Ok(())
            }
        }

        fn detect(&mut self, _: &(), _: u64) -> Result<Vec<HandLandmarks>, DetectorError> {
            self.calls += 1;
            if self.hands.is_empty() {
                Ok(Vec::new())
            } else {
                self.hands.remove(0)
            }
        }
    }

    struct Harness {
        processor: FrameProcessor<FakeDetector>,
        receiver: gestureai_bus::SymbolBusReceiver,
        settings: watch::Sender<RecognitionSettings>,
        events: Arc<InMemoryEventBus>,
        pipeline: Arc<PipelineStatus>,
    }

    fn harness(detector: FakeDetector) -> Harness {
        let mut bus = SymbolBus::new();
        let receiver = bus.take_receiver().unwrap();
        let (settings, settings_rx) = watch::channel(RecognitionSettings::default());
        let events = Arc::new(InMemoryEventBus::new());
        let pipeline = Arc::new(PipelineStatus::new());
        let processor = FrameProcessor::new(
            detector,
            settings_rx,
            bus.sender(),
            pipeline.clone(),
            events.clone(),
        );
        Harness {
            processor,
            receiver,
            settings,
            events,
            pipeline,
        }
    }

    fn detector(hands: Vec<Result<Vec<HandLandmarks>, DetectorError>>) -> FakeDetector {
        FakeDetector {
            fail_init: false,
            hands,
            calls: 0,
        }
    }

    #[test]
    fn test_frames_ignored_until_ready() {
        let mut h = harness(detector(vec![]));
        assert_eq!(h.processor.process(&(), 0, 0), FrameOutcome::NotReady);
        h.processor.initialize();
        assert!(h.processor.status().is_ready());
        assert_eq!(
            h.processor.process(&(), 16, 16),
            FrameOutcome::Published(Symbol::NoHand)
        );
    }

    #[test]
    fn test_init_failure_is_terminal_and_reported() {
        let mut h = harness(FakeDetector {
            fail_init: true,
            hands: vec![],
            calls: 0,
        });
        let status = h.processor.initialize().clone();
        assert!(status.is_failed());
        assert_eq!(h.processor.process(&(), 16, 16), FrameOutcome::NotReady);
        assert_eq!(h.processor.detector().calls, 0);

        let last = h.events.last_for(event_names::DETECTOR_STATUS).unwrap();
        assert_eq!(last["status"]["state"], "failed");
    }

    #[test]
    fn test_unchanged_media_time_skipped() {
        let mut h = harness(detector(vec![Ok(vec![hand("00000")])]));
        h.processor.initialize();

        assert_eq!(
            h.processor.process(&(), 100, 100),
            FrameOutcome::Published(Symbol::Letter("S"))
        );
        assert_eq!(h.processor.process(&(), 100, 116), FrameOutcome::Skipped);
        assert_eq!(h.processor.detector().calls, 1);
        assert_eq!(h.pipeline.frames_skipped(), 1);
        assert_eq!(h.pipeline.frames_processed(), 1);
    }

    #[test]
    fn test_detect_error_becomes_no_hand() {
        let mut h = harness(detector(vec![Err(DetectorError::Detect("gpu lost".into()))]));
        h.processor.initialize();

        assert_eq!(
            h.processor.process(&(), 1, 1),
            FrameOutcome::Published(Symbol::NoHand)
        );
        let frame = h.receiver.try_recv().unwrap();
        assert_eq!(frame.symbol, Symbol::NoHand);
        assert_eq!(frame.fingers, None);
    }

    #[test]
    fn test_classifies_with_current_settings() {
        let mut h = harness(detector(vec![
            Ok(vec![hand("11111")]),
            Ok(vec![hand("11111")]),
        ]));
        h.processor.initialize();

        h.settings.send_replace(RecognitionSettings {
            section: Section::Translator,
            mode: Mode::Words,
            language: Language::En,
        });
        assert_eq!(
            h.processor.process(&(), 1, 1),
            FrameOutcome::Published(Symbol::Word("Hello"))
        );

        // Practice forces letter classification regardless of mode.
        h.settings.send_modify(|s| s.section = Section::Practice);
        let FrameOutcome::Published(symbol) = h.processor.process(&(), 2, 2) else {
            panic!("expected published frame");
        };
        assert!(symbol.is_letter());

        let frame = h.receiver.drain_to_latest().unwrap();
        assert_eq!(frame.fingers.map(|f| f.to_string()).as_deref(), Some("11111"));
    }
}
