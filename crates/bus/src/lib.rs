//! Symbol bus between frame processing and polling.
//!
//! The frame step publishes one [`SymbolFrame`] per processed video frame; the
//! poll step drains to the newest one on each tick. Ownership of the "latest
//! symbol" moves through the channel instead of living in shared state.
//!
//! Frames are queued on a bounded mpsc channel. When the queue is full the
//! frame is not queued and counts as dropped, but it still replaces the value
//! in a `watch` slot, so [`SymbolBusReceiver::drain_to_latest`] always sees the
//! newest frame the sender produced.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gestureai_signs::{FingerState, Symbol};
use tokio::sync::{mpsc, watch};

/// Default channel capacity in frames (about half a second at 60 fps).
pub const DEFAULT_CAPACITY: usize = 32;

/// Classification of one processed video frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolFrame {
    /// Monotonic sequence number for ordering.
    pub seq: u64,
    /// Frame timestamp in milliseconds.
    pub ts_ms: u64,
    pub symbol: Symbol,
    /// Finger vector of the first hand, if one was detected.
    pub fingers: Option<FingerState>,
}

#[derive(Debug, Clone)]
pub struct SymbolBusConfig {
    /// Frames queued before new ones stop being queued.
    pub capacity: usize,
}

impl Default for SymbolBusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Sender half of the symbol bus.
#[derive(Clone)]
pub struct SymbolBusSender {
    tx: mpsc::Sender<SymbolFrame>,
    latest: Arc<watch::Sender<Option<SymbolFrame>>>,
    seq_counter: Arc<AtomicU64>,
    dropped_frames: Arc<AtomicU64>,
}

impl SymbolBusSender {
    /// Publish a frame. The latest slot is always updated; the queue only
    /// takes the frame while it has room.
    ///
    /// Returns true if queued, false if the queue was full or the bus is closed.
    pub fn send(&self, ts_ms: u64, symbol: Symbol, fingers: Option<FingerState>) -> bool {
        let seq = self.seq_counter.fetch_add(1, Ordering::Relaxed);
        let frame = SymbolFrame {
            seq,
            ts_ms,
            symbol,
            fingers,
        };
        self.latest.send_replace(Some(frame));

        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                let dropped = self.dropped_frames.fetch_add(1, Ordering::Relaxed) + 1;
                // Only log every 10th drop.
                if dropped % 10 == 1 {
                    tracing::warn!(dropped, seq, "Symbol bus full, dropping queued frames");
                }
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("Symbol bus closed");
                false
            }
        }
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiver half of the symbol bus.
pub struct SymbolBusReceiver {
    rx: mpsc::Receiver<SymbolFrame>,
    latest: watch::Receiver<Option<SymbolFrame>>,
    last_seq: Option<u64>,
    gaps_detected: u64,
}

impl SymbolBusReceiver {
    /// Record `frame` as seen. False if an equal or newer frame was seen already.
    fn track(&mut self, frame: &SymbolFrame) -> bool {
        if let Some(last) = self.last_seq {
            if frame.seq <= last {
                return false;
            }
            self.gaps_detected += frame.seq - last - 1;
        }
        self.last_seq = Some(frame.seq);
        true
    }

    /// Wait for the next queued frame. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<SymbolFrame> {
        loop {
            let frame = self.rx.recv().await?;
            if self.track(&frame) {
                return Some(frame);
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<SymbolFrame> {
        loop {
            let frame = self.rx.try_recv().ok()?;
            if self.track(&frame) {
                return Some(frame);
            }
        }
    }

    /// Drain the queue and return the newest frame published since the last
    /// call, including one that did not fit in the queue.
    pub fn drain_to_latest(&mut self) -> Option<SymbolFrame> {
        let mut latest = None;
        let mut drained = 0;

        while let Some(frame) = self.try_recv() {
            drained += 1;
            latest = Some(frame);
        }

        let newest = *self.latest.borrow_and_update();
        if let Some(frame) = newest {
            if self.track(&frame) {
                drained += 1;
                latest = Some(frame);
            }
        }

        if drained > 1 {
            tracing::trace!("Drained {} stale frames from symbol bus", drained - 1);
        }

        latest
    }

    /// Frames that were dropped by the sender before reaching this receiver.
    pub fn gaps_detected(&self) -> u64 {
        self.gaps_detected
    }
}

pub struct SymbolBus {
    sender: SymbolBusSender,
    receiver: Option<SymbolBusReceiver>,
}

impl SymbolBus {
    pub fn new() -> Self {
        Self::with_config(SymbolBusConfig::default())
    }

    pub fn with_config(config: SymbolBusConfig) -> Self {
        let capacity = config.capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        let (latest_tx, latest_rx) = watch::channel(None);

        tracing::debug!(capacity, "Created symbol bus");

        Self {
            sender: SymbolBusSender {
                tx,
                latest: Arc::new(latest_tx),
                seq_counter: Arc::new(AtomicU64::new(0)),
                dropped_frames: Arc::new(AtomicU64::new(0)),
            },
            receiver: Some(SymbolBusReceiver {
                rx,
                latest: latest_rx,
                last_seq: None,
                gaps_detected: 0,
            }),
        }
    }

    pub fn sender(&self) -> SymbolBusSender {
        self.sender.clone()
    }

    /// Take the receiver (can only be called once).
    pub fn take_receiver(&mut self) -> Option<SymbolBusReceiver> {
        self.receiver.take()
    }

}

impl Default for SymbolBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline counters, updated lock-free from the frame and poll steps.
#[derive(Debug, Default)]
pub struct PipelineStatus {
    frames_processed: AtomicU64,
    /// Frames whose timestamp had not advanced.
    frames_skipped: AtomicU64,
    /// Last detector call duration.
    detector_time_ms: AtomicU64,
    polls: AtomicU64,
    commits: AtomicU64,
}

impl PipelineStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed.load(Ordering::Relaxed)
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped.load(Ordering::Relaxed)
    }

    pub fn detector_time_ms(&self) -> u64 {
        self.detector_time_ms.load(Ordering::Relaxed)
    }

    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }

    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    pub fn increment_frames_processed(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_frames_skipped(&self) {
        self.frames_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_detector_time_ms(&self, value: u64) {
        self.detector_time_ms.store(value, Ordering::Relaxed);
    }

    pub fn increment_polls(&self) {
        self.polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_commits(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PipelineStatusSnapshot {
        PipelineStatusSnapshot {
            frames_processed: self.frames_processed(),
            frames_skipped: self.frames_skipped(),
            detector_time_ms: self.detector_time_ms(),
            polls: self.polls(),
            commits: self.commits(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PipelineStatusSnapshot {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub detector_time_ms: u64,
    pub polls: u64,
    pub commits: u64,
}
