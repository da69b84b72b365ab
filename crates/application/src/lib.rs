//! Orchestration of the sign pipeline.
//!
//! ```text
//! ┌──────────────┐  SymbolFrame   ┌──────────────┐
//! │FrameProcessor│ ─────────────► │  poll loop   │ ◄── SessionCommand
//! │ detect +     │   symbol bus   │ SignSession  │
//! │ classify     │                │  ├ translator stabilizer ─► TextAccumulator
//! └──────▲───────┘                │  ├ practice stabilizer ──► PracticeSession
//!        │ RecognitionSettings    │  └ SpeechScheduler
//!        └────────── watch ───────┴──────────────► EventBus
//! ```
//!
//! The frame step runs per video frame; the poll step runs every
//! [`POLL_INTERVAL_MS`]. They share nothing mutable: symbols flow forward over
//! the bus and settings flow back over a watch channel.

mod config;
mod constants;
mod detector;
mod error;
mod frame;
mod poller;
mod session;
mod settings;
mod speech;
mod translator;

pub use config::AppConfig;
pub use constants::*;
pub use detector::{DetectorStatus, LandmarkDetector};
pub use error::{ConfigError, DetectorError, Result};
pub use frame::{FrameOutcome, FrameProcessor};
pub use poller::{run_poll_loop, spawn_poll_loop, PollLoopHandle};
pub use session::{SessionCommand, SignSession};
pub use settings::{RecognitionSettings, Section};
pub use speech::{is_speakable, NullSynthesizer, SpeechScheduler, SpeechSynthesizer};
pub use translator::TextAccumulator;
