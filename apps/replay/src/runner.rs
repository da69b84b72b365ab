//! Drives a recording through the pipeline.

use std::sync::Arc;
use std::time::Duration;

use gestureai_application::{
    spawn_poll_loop, AppConfig, FrameProcessor, SignSession, SpeechSynthesizer,
};
use gestureai_bus::{PipelineStatusSnapshot, SymbolBus, SymbolBusConfig, SymbolBusReceiver};
use gestureai_events::EventBusRef;

use crate::recording::{ReplayDetector, Step};

/// Logs utterances instead of playing them.
pub struct LogSynthesizer;

impl SpeechSynthesizer for LogSynthesizer {
    fn cancel(&mut self) {}

    fn speak(&mut self, text: &str, lang_tag: &str) {
        tracing::info!(text, lang_tag, "speak");
    }
}

#[derive(Debug)]
pub struct ReplaySummary {
    pub text: String,
    /// Frames the detector was actually run on.
    pub detector_frames: u64,
    pub pipeline: PipelineStatusSnapshot,
}

fn build(
    config: &AppConfig,
    events: EventBusRef,
) -> anyhow::Result<(SignSession, FrameProcessor<ReplayDetector>, SymbolBus)> {
    let session = SignSession::new(config.clone(), events.clone(), Box::new(LogSynthesizer));
    let bus = SymbolBus::with_config(SymbolBusConfig {
        capacity: config.bus_capacity,
    });
    let mut frames = FrameProcessor::new(
        ReplayDetector::default(),
        session.subscribe_settings(),
        bus.sender(),
        session.pipeline_status(),
        events,
    );
    if !frames.initialize().is_ready() {
        anyhow::bail!("detector failed to initialize: {:?}", frames.status());
    }
    Ok((session, frames, bus))
}

/// Replay on a simulated clock: polls happen every `poll_interval_ms` of
/// recording time, independent of wall time.
pub fn run_simulated(
    config: AppConfig,
    events: EventBusRef,
    steps: Vec<Step>,
) -> anyhow::Result<ReplaySummary> {
    let (mut session, mut frames, mut bus) = build(&config, events)?;
    let mut receiver = bus
        .take_receiver()
        .ok_or_else(|| anyhow::anyhow!("symbol bus receiver already taken"))?;

    let interval = config.poll_interval_ms.max(1);
    let mut next_poll = 0u64;
    // Run every poll scheduled before `ts_ms`. A poll at T sees frames up to T.
    let mut poll_before = |session: &mut SignSession,
                           receiver: &mut SymbolBusReceiver,
                           ts_ms: u64| {
        while next_poll < ts_ms {
            if let Some(frame) = receiver.drain_to_latest() {
                session.on_frame(frame);
            }
            session.poll(next_poll);
            next_poll += interval;
        }
    };

    let last_ts = steps.last().map(Step::ts_ms).unwrap_or(0);
    for step in steps {
        poll_before(&mut session, &mut receiver, step.ts_ms());
        match step {
            Step::Frame {
                ts_ms,
                media_ms,
                frame,
            } => {
                frames.process(&frame, media_ms, ts_ms);
            }
            Step::Command { command, .. } => session.apply(command),
        }
    }
    // One more interval so the final records are polled.
    poll_before(&mut session, &mut receiver, last_ts + interval + 1);

    Ok(ReplaySummary {
        text: session.text().to_string(),
        detector_frames: frames.detector().frames_seen(),
        pipeline: session.pipeline_status().snapshot(),
    })
}

/// Replay against the real poll loop, sleeping between records.
pub async fn run_realtime(
    config: AppConfig,
    events: EventBusRef,
    steps: Vec<Step>,
) -> anyhow::Result<ReplaySummary> {
    let (session, mut frames, mut bus) = build(&config, events)?;
    let receiver = bus
        .take_receiver()
        .ok_or_else(|| anyhow::anyhow!("symbol bus receiver already taken"))?;
    let interval = Duration::from_millis(config.poll_interval_ms);
    let handle = spawn_poll_loop(session, receiver, interval);

    let mut clock = 0u64;
    for step in steps {
        let ts_ms = step.ts_ms();
        if ts_ms > clock {
            tokio::time::sleep(Duration::from_millis(ts_ms - clock)).await;
            clock = ts_ms;
        }
        match step {
            Step::Frame {
                ts_ms,
                media_ms,
                frame,
            } => {
                frames.process(&frame, media_ms, ts_ms);
            }
            Step::Command { command, .. } => {
                if !handle.send(command).await {
                    anyhow::bail!("poll loop exited early");
                }
            }
        }
    }
    tokio::time::sleep(interval * 2).await;

    let session = handle
        .stop()
        .await
        .ok_or_else(|| anyhow::anyhow!("poll loop did not return the session"))?;

    Ok(ReplaySummary {
        text: session.text().to_string(),
        detector_frames: frames.detector().frames_seen(),
        pipeline: session.pipeline_status().snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::read_steps;
    use gestureai_events::InMemoryEventBus;

    fn frames(bits: &str, from: u64, to: u64) -> String {
        (from..to)
            .step_by(50)
            .map(|ts| format!("{{\"ts_ms\": {ts}, \"fingers\": \"{bits}\"}}\n"))
            .collect()
    }

    #[test]
    fn test_simulated_replay_spells_text() {
        let mut input = frames("00000", 0, 1500);
        input += &frames("10000", 1500, 3000);
        let steps = read_steps(input.as_bytes()).unwrap();

        let summary = run_simulated(
            AppConfig::default(),
            Arc::new(InMemoryEventBus::new()),
            steps,
        )
        .unwrap();
        assert_eq!(summary.text, "SA");
        assert_eq!(summary.pipeline.frames_processed, 60);
        assert_eq!(summary.detector_frames, 60);
        assert_eq!(summary.pipeline.commits, 2);
    }

    #[test]
    fn test_bundled_recording_spells_hi() {
        let steps = read_steps(include_str!("../data/hi.jsonl").as_bytes()).unwrap();
        let summary = run_simulated(
            AppConfig::default(),
            Arc::new(InMemoryEventBus::new()),
            steps,
        )
        .unwrap();
        assert_eq!(summary.text, "HI");
    }

    #[test]
    fn test_simulated_replay_applies_commands() {
        let mut input = String::from("{\"ts_ms\": 0, \"command\": {\"set_mode\": \"WORDS\"}}\n");
        input += &frames("11111", 0, 1500);
        input += "{\"ts_ms\": 1500, \"command\": \"space\"}\n";
        let steps = read_steps(input.as_bytes()).unwrap();

        let summary = run_simulated(
            AppConfig::default(),
            Arc::new(InMemoryEventBus::new()),
            steps,
        )
        .unwrap();
        assert_eq!(summary.text, " Hello ");
    }

    #[tokio::test]
    async fn test_realtime_replay_commits() {
        let config = AppConfig {
            poll_interval_ms: 10,
            hold_ms: 30,
            auto_speak: false,
            ..AppConfig::default()
        };
        let input = frames("00000", 0, 200);
        let steps = read_steps(input.as_bytes()).unwrap();

        let summary = run_realtime(config, Arc::new(InMemoryEventBus::new()), steps)
            .await
            .unwrap();
        assert_eq!(summary.text, "S");
    }
}
